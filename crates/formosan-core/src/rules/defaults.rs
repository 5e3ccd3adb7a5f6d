/// Single-letter mappings merged into every language's rule set.
///
/// These letters are not columns of every Formosan orthography table, so a
/// language that leaves them undefined falls back to these phonemes. A
/// language's own rule for the same grapheme always wins.
pub static SUPPLEMENTARY_G2P: &[(&str, &str)] = &[
    ("z", "z"),
    ("o", "o"),
    ("h", "h"),
    ("g", "g"),
    ("y", "j"),
    ("w", "w"),
    ("c", "ʦ"),
    ("u", "u"),
    ("f", "f"),
    ("v", "v"),
    ("j", "ɟ"),
    ("b", "b"),
    ("q", "q"),
    ("e", "e"),
    ("l", "l"),
    ("d", "d"),
];
