use std::process;

use super::convert_ops::open_engine;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn languages_cmd(rules_file: &str) {
    let g2p = open_engine(rules_file);
    for (language, rules) in g2p.table().iter() {
        println!("{language}\t{}", rules.len());
    }
}

pub fn rules_cmd(rules_file: &str, language: &str) {
    let g2p = open_engine(rules_file);
    let rules = die!(g2p.rule_set(language), "Error: {}");
    for rule in rules {
        println!("{}\t{}", rule.grapheme(), rule.phonemes().join(","));
    }
}
