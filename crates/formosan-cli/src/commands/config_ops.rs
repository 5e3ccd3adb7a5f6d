use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", formosan_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        formosan_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    let punct: String = s.convert.end_punctuation().iter().collect();
    println!(
        "OK: rules.placeholder={:?}, convert.end_punctuation={:?}, normalize.leading_s_languages={}, normalize.keep_upper_r_languages={}",
        s.rules.placeholder,
        punct,
        s.normalize.leading_s_languages.len(),
        s.normalize.keep_upper_r_languages.len()
    );
}

/// Install a custom settings file. Must run before anything reads the
/// global settings.
pub fn load_settings(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        formosan_core::settings::init_custom(content),
        "Error in settings {file}: {}"
    );
}
