use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::process;

use formosan_core::{ConversionResult, EngineError, FormosanG2p};
use serde::Serialize;
use tracing::info;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Exit status of `convert` when the utterance has OOV characters.
pub const EXIT_OOV: i32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum ConvertFileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// One output line of `convert-file`.
#[derive(Debug, Serialize)]
struct ConvertRecord<'a> {
    text: &'a str,
    ipa: Option<String>,
    oov: String,
}

/// Counts reported after a file conversion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertStats {
    pub converted: usize,
    pub oov: usize,
}

pub(crate) fn open_engine(rules_file: &str) -> FormosanG2p {
    die!(
        FormosanG2p::open(Path::new(rules_file)),
        "Error loading rules {rules_file}: {}"
    )
}

/// What `convert` prints and the status it exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// IPA for stdout; exit 0.
    Ipa(String),
    /// OOV listing for stderr; exit [`EXIT_OOV`].
    Oov(String),
}

impl ConvertOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertOutcome::Ipa(_) => 0,
            ConvertOutcome::Oov(_) => EXIT_OOV,
        }
    }
}

/// Convert one utterance and decide what `convert` reports.
pub fn convert_outcome(
    g2p: &FormosanG2p,
    language: &str,
    text: &str,
) -> Result<ConvertOutcome, EngineError> {
    Ok(match g2p.convert(text, language)? {
        ConversionResult::Ipa(ipa) => ConvertOutcome::Ipa(ipa),
        ConversionResult::Oov(chars) if chars.is_empty() => {
            ConvertOutcome::Oov("OOV: no words to convert".to_string())
        }
        ConversionResult::Oov(chars) => {
            let listed: Vec<String> = chars.iter().map(char::to_string).collect();
            ConvertOutcome::Oov(format!("OOV: {}", listed.join(" ")))
        }
    })
}

pub fn convert_cmd(rules_file: &str, language: &str, text: &str) {
    let g2p = open_engine(rules_file);
    let outcome = die!(convert_outcome(&g2p, language, text), "Error: {}");
    match &outcome {
        ConvertOutcome::Ipa(ipa) => println!("{ipa}"),
        ConvertOutcome::Oov(message) => eprintln!("{message}"),
    }
    process::exit(outcome.exit_code());
}

pub fn convert_file_cmd(rules_file: &str, language: &str, input: &str, output: Option<&str>) {
    let g2p = open_engine(rules_file);
    let file = die!(fs::File::open(input), "Error opening {input}: {}");
    let reader = BufReader::new(file);

    let stats = match output {
        Some(path) => {
            let out = die!(fs::File::create(path), "Error creating {path}: {}");
            die!(
                convert_lines(&g2p, language, reader, BufWriter::new(out)),
                "Error: {}"
            )
        }
        None => {
            let stdout = io::stdout();
            die!(
                convert_lines(&g2p, language, reader, stdout.lock()),
                "Error: {}"
            )
        }
    };
    info!(input, converted = stats.converted, oov = stats.oov, "convert-file done");
    eprintln!("{} converted, {} with OOV", stats.converted, stats.oov);
}

/// Convert one utterance per input line, writing a JSON object per line.
///
/// Blank lines are skipped. OOV characters are written as one string so the
/// record can be joined with other corpus metadata as-is.
pub fn convert_lines<R: BufRead, W: Write>(
    g2p: &FormosanG2p,
    language: &str,
    reader: R,
    mut writer: W,
) -> Result<ConvertStats, ConvertFileError> {
    // fail before reading input when the language is unknown
    g2p.rule_set(language)?;

    let mut stats = ConvertStats::default();
    for line in reader.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let (ipa, oov) = g2p.convert(text, language)?.into_parts();
        if ipa.is_some() {
            stats.converted += 1;
        } else {
            stats.oov += 1;
        }
        let record = ConvertRecord {
            text,
            ipa,
            oov: oov.into_iter().collect(),
        };
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(stats)
}
