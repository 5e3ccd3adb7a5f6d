use std::path::Path;

use clap::{Parser, Subcommand};

use formosan_cli::commands::{config_ops, convert_ops, lexicon_ops, rules_ops};
use formosan_cli::trace_init;

#[derive(Parser)]
#[command(name = "formosan", about = "Formosan grapheme-to-IPA conversion tool")]
struct Cli {
    /// Settings TOML replacing the built-in defaults
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Directory for JSON trace output (requires --features trace)
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert one utterance to IPA
    Convert {
        /// Rule CSV file
        rules_file: String,
        /// Language tag (e.g. Amis, Rukai_Budai, 賽夏)
        language: String,
        /// Utterance text
        text: String,
    },
    /// Convert a text file, one utterance per line, to JSONL
    ConvertFile {
        /// Rule CSV file
        rules_file: String,
        /// Language tag
        language: String,
        /// Input text file
        input: String,
        /// Output JSONL file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List language tags and their rule counts
    Languages {
        /// Rule CSV file
        rules_file: String,
    },
    /// Show the ordered rules of one language
    Rules {
        /// Rule CSV file
        rules_file: String,
        /// Language tag
        language: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Build word and phoneme lexicons from transcript/IPA corpora
    Lexicon {
        /// Corpus directories of <language>.jsonl files
        #[arg(required = true)]
        sources: Vec<String>,
        /// Output root directory
        #[arg(long)]
        root: String,
        /// Lexicon name (output goes to <root>/<name>)
        #[arg(long)]
        name: String,
        /// JSON array of vowel phonemes
        #[arg(long)]
        vowels: String,
    },
}

fn main() {
    let cli = Cli::parse();

    trace_init::init_tracing(cli.log_dir.as_deref().map(Path::new));
    if let Some(file) = cli.settings.as_deref() {
        config_ops::load_settings(file);
    }

    match cli.command {
        Command::Convert {
            rules_file,
            language,
            text,
        } => convert_ops::convert_cmd(&rules_file, &language, &text),
        Command::ConvertFile {
            rules_file,
            language,
            input,
            output,
        } => convert_ops::convert_file_cmd(&rules_file, &language, &input, output.as_deref()),
        Command::Languages { rules_file } => rules_ops::languages_cmd(&rules_file),
        Command::Rules {
            rules_file,
            language,
        } => rules_ops::rules_cmd(&rules_file, &language),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::Lexicon {
            sources,
            root,
            name,
            vowels,
        } => lexicon_ops::lexicon_cmd(&sources, &root, &name, &vowels),
    }
}
