//! Configuration path and language utilities for menucon.
//!
//! This module resolves where user data lives (translation overrides, the
//! watched answers file, session logs) and which language phrases are shown
//! in, expanding shell variables like `~` in paths.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::translate::COMMAND_LANGUAGE;

/// Default directory for user data
const DEFAULT_DATA_DIR: &str = "~/.menucon";

/// Name of the answers file watched by the file reader
pub const INPUT_FILE_NAME: &str = "input.txt";

/// Environment variables consulted for the language, in order
pub const LANGUAGE_VARIABLES: [&str; 2] = ["CLI_LANG", "CLI-LANG"];

/// Environment variable holding the system locale
pub const SYSTEM_LANGUAGE_VARIABLE: &str = "LANG";

/// Resolves the data directory.
///
/// If a custom directory is provided, uses that directory. Otherwise, uses
/// the default one. Shell expansions like `~` are resolved.
///
/// # Arguments
///
/// * `data_dir_arg` - Optional custom data directory
///
/// # Returns
///
/// The resolved data directory path
///
/// # Examples
///
/// ```
/// use menucon_core::config::get_data_dir;
///
/// // Use default directory
/// let default_dir = get_data_dir(&None);
/// assert!(default_dir.ends_with(".menucon"));
///
/// // Use custom directory
/// let custom_dir = get_data_dir(&Some("/tmp/menucon".to_string()));
/// assert_eq!(custom_dir.to_str(), Some("/tmp/menucon"));
/// ```
pub fn get_data_dir(data_dir_arg: &Option<String>) -> PathBuf {
    let data_dir = match data_dir_arg {
        Some(data_dir) => data_dir,
        None => DEFAULT_DATA_DIR,
    };

    PathBuf::from(shellexpand::tilde(data_dir).to_string())
}

/// Path of the user's translation overrides for `language`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use menucon_core::config::translations_file_path;
///
/// let path = translations_file_path(Path::new("/data"), "pt-BR");
/// assert_eq!(path, Path::new("/data/translations.pt-BR.yml"));
/// ```
pub fn translations_file_path(data_dir: &Path, language: &str) -> PathBuf {
    data_dir.join(format!("translations.{language}.yml"))
}

/// Path of the answers file watched by the file reader.
pub fn input_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(INPUT_FILE_NAME)
}

/// Path of a new session log, named after the current time.
pub fn log_file_path(data_dir: &Path) -> PathBuf {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();

    data_dir.join(format!("menucon.{seconds}.log"))
}

/// Resolves the language phrases are shown in.
///
/// The explicit argument wins, then the `CLI_LANG`/`CLI-LANG` variables,
/// then the system locale from `LANG`. Anything starting with `pt` becomes
/// `pt-BR`; the command pseudo-language and the `C`/`POSIX` locales become
/// the empty (untranslated) language.
///
/// # Arguments
///
/// * `language_arg` - Optional language given on the command line
/// * `variable` - Environment lookup, usually `|name| std::env::var(name).ok()`
///
/// # Examples
///
/// ```
/// use menucon_core::config::resolve_language;
///
/// let language = resolve_language(&None, |name| match name {
///     "LANG" => Some("pt_PT.UTF-8".to_string()),
///     _ => None,
/// });
/// assert_eq!(language, "pt-BR");
/// ```
pub fn resolve_language<F>(language_arg: &Option<String>, variable: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let requested = language_arg.clone().or_else(|| {
        LANGUAGE_VARIABLES
            .iter()
            .find_map(|name| variable(name).filter(|value| !value.is_empty()))
    });

    let language = match requested {
        Some(language) => language,
        None => system_language(variable(SYSTEM_LANGUAGE_VARIABLE)),
    };

    normalize_language(&language)
}

fn system_language(locale: Option<String>) -> String {
    let Some(locale) = locale else {
        return String::new();
    };

    let name = locale.split(['.', '@']).next().unwrap_or_default();
    match name {
        "C" | "POSIX" => String::new(),
        name => name.replace('_', "-"),
    }
}

fn normalize_language(language: &str) -> String {
    let language = language.trim();
    if language == COMMAND_LANGUAGE {
        String::new()
    } else if language.to_lowercase().starts_with("pt") {
        "pt-BR".to_string()
    } else {
        language.to_string()
    }
}
