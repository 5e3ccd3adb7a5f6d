use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::{info, warn};

use super::{Lexicon, LexiconError};

#[derive(Debug, Deserialize)]
struct CorpusRecord {
    transcript: String,
    ipa: String,
}

/// Read one JSONL corpus file into `group`. Returns the number of utterances.
pub fn load_jsonl(
    lexicon: &mut Lexicon,
    group: &str,
    path: &Path,
) -> Result<usize, LexiconError> {
    let reader = BufReader::new(fs::File::open(path)?);
    let mut count = 0;
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: CorpusRecord =
            serde_json::from_str(&line).map_err(|source| LexiconError::Record {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })?;
        lexicon.add_utterance(group, &record.transcript, &record.ipa)?;
        count += 1;
    }
    Ok(count)
}

/// Load every `*.jsonl` file in `dirs`, one language group per file stem.
///
/// Missing directories are skipped. Returns the number of files read.
pub fn load_corpus_dirs(
    lexicon: &mut Lexicon,
    dirs: &[PathBuf],
) -> Result<usize, LexiconError> {
    let mut files_read = 0;
    for dir in dirs {
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "corpus directory not found, skipping");
            continue;
        }

        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "jsonl"))
            .collect();
        files.sort();

        for path in files {
            let Some(group) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let count = load_jsonl(lexicon, group, &path)?;
            info!(file = %path.display(), group, utterances = count);
            files_read += 1;
        }
    }
    Ok(files_read)
}

/// Read a JSON array of vowel phonemes.
pub fn read_vowels(path: &Path) -> Result<Vec<String>, LexiconError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the lexicon under `out_dir`:
///
/// - `word2ipa/<group>.json`: word → sorted IPA forms
/// - `phonemes/<group>.txt`: one `<phoneme> <codepoints...>` line per phoneme
/// - `vowels.json`, `consonants.json`: sorted inventories over all groups
pub fn write_lexicon(
    lexicon: &Lexicon,
    out_dir: &Path,
    vowels: &[String],
) -> Result<(), LexiconError> {
    let word2ipa_dir = out_dir.join("word2ipa");
    let phonemes_dir = out_dir.join("phonemes");
    fs::create_dir_all(&word2ipa_dir)?;
    fs::create_dir_all(&phonemes_dir)?;

    for (group, entry) in lexicon.groups() {
        write_json(&word2ipa_dir.join(format!("{group}.json")), &entry.word2ipa)?;

        let mut w = BufWriter::new(fs::File::create(
            phonemes_dir.join(format!("{group}.txt")),
        )?);
        for phoneme in &entry.phonemes {
            writeln!(w, "{phoneme} {}", codepoints(phoneme))?;
        }
        w.flush()?;
    }

    let mut vowels = vowels.to_vec();
    vowels.sort();
    vowels.dedup();
    write_json(&out_dir.join("consonants.json"), &lexicon.consonants(&vowels))?;
    write_json(&out_dir.join("vowels.json"), &vowels)?;
    Ok(())
}

fn codepoints(phoneme: &str) -> String {
    phoneme
        .chars()
        .map(|c| (c as u32).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pretty-print `value` with 4-space indentation.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), LexiconError> {
    let mut w = BufWriter::new(fs::File::create(path)?);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut w, formatter);
    value.serialize(&mut ser)?;
    w.flush()?;
    Ok(())
}
