use std::path::{Path, PathBuf};
use std::process;

use tracing::{info, warn};

use crate::lexicon::{load_corpus_dirs, read_vowels, write_lexicon, Lexicon};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Build a lexicon from every corpus directory and write it to `<root>/<name>`.
pub fn lexicon_cmd(corpus_dirs: &[String], root: &str, name: &str, vowels_file: &str) {
    let out_dir = Path::new(root).join(name);
    let dirs: Vec<PathBuf> = corpus_dirs.iter().map(PathBuf::from).collect();
    let vowels = die!(
        read_vowels(Path::new(vowels_file)),
        "Error reading vowels {vowels_file}: {}"
    );

    let mut lexicon = Lexicon::new();
    let files = die!(load_corpus_dirs(&mut lexicon, &dirs), "Error: {}");
    if lexicon.is_empty() {
        warn!("no corpus records found, writing empty inventories");
    }

    die!(
        write_lexicon(&lexicon, &out_dir, &vowels),
        "Error writing lexicon: {}"
    );
    let groups = lexicon.groups().count();
    info!(files, groups, out_dir = %out_dir.display(), "lexicon written");
    println!(
        "{files} files, {groups} groups, {} phonemes -> {}",
        lexicon.phonemes().len(),
        out_dir.display()
    );
}
