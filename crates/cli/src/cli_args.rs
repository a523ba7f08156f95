//! Command-line argument parsing.
//!
//! This module defines the command-line interface of the `menucon` binary
//! using the `clap` crate.

use clap::Parser;
use menucon_core::io::ANSWER_TO_EXIT;

/// Command-line arguments for the menucon binary.
///
/// Anything after the options is a scripted answer, consumed by the prompts
/// in order before any other input source is asked.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use menucon_cli::cli_args::Args;
///
/// let args = Args::parse_from(["menucon", "--no-console-input", "2", "$"]);
/// assert!(args.is_command_line_run());
/// ```
#[derive(Parser, Debug)]
#[command(term_width = 0)] // Just to make testing across clap features easier
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Directory holding the input file, log files and user translations.
    ///
    /// If not provided, defaults to `~/.menucon`.
    #[arg(long, short = 'd')]
    pub data_dir: Option<String>,

    /// Language of the phrases shown, like `pt-BR`.
    ///
    /// If not provided, `CLI_LANG` and then `LANG` are consulted.
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Extra translations file, phrase first, then language.
    #[arg(long, short = 't')]
    pub translations: Option<String>,

    /// Also take answers from `input.txt` in the data directory.
    ///
    /// Each line written to the file is consumed as one answer.
    #[arg(long, short = 'i', action)]
    pub file_input: bool,

    /// Also append everything shown to a log file in the data directory.
    #[arg(long = "log-file", short = 'o', action)]
    pub log_file: bool,

    /// Do not read answers from the terminal.
    #[arg(long, action)]
    pub no_console_input: bool,

    /// Run this module directly instead of listing the available ones.
    #[arg(long, short = 'm')]
    pub module: Option<String>,

    /// Scripted answers. `$` exits, `/` returns to the first menu.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub answers: Vec<String>,
}

impl Args {
    /// A run is a command-line run when its scripted answers end the
    /// program themselves: only results are shown then.
    #[must_use]
    pub fn is_command_line_run(&self) -> bool {
        self.answers
            .iter()
            .any(|answer| answer.trim() == ANSWER_TO_EXIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["menucon"]);

        assert!(args.data_dir.is_none());
        assert!(args.language.is_none());
        assert!(args.translations.is_none());
        assert!(!args.file_input);
        assert!(!args.log_file);
        assert!(!args.no_console_input);
        assert!(args.module.is_none());
        assert!(args.answers.is_empty());
        assert!(!args.is_command_line_run());
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from([
            "menucon",
            "-d",
            "/custom/data",
            "-l",
            "pt-BR",
            "-t",
            "/custom/extra.yml",
            "-i",
            "-o",
            "-m",
            "Counter",
        ]);

        assert_eq!(args.data_dir, Some("/custom/data".to_string()));
        assert_eq!(args.language, Some("pt-BR".to_string()));
        assert_eq!(args.translations, Some("/custom/extra.yml".to_string()));
        assert!(args.file_input);
        assert!(args.log_file);
        assert_eq!(args.module, Some("Counter".to_string()));
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "menucon",
            "--data-dir",
            "/custom/data",
            "--language",
            "en",
            "--translations",
            "/custom/extra.yml",
            "--file-input",
            "--log-file",
            "--no-console-input",
            "--module",
            "Phrases",
        ]);

        assert_eq!(args.data_dir, Some("/custom/data".to_string()));
        assert_eq!(args.language, Some("en".to_string()));
        assert_eq!(args.translations, Some("/custom/extra.yml".to_string()));
        assert!(args.file_input);
        assert!(args.log_file);
        assert!(args.no_console_input);
        assert_eq!(args.module, Some("Phrases".to_string()));
    }

    #[test]
    fn test_args_answers_keep_order() {
        let args = Args::parse_from(["menucon", "count", "3", "/", "$"]);

        assert_eq!(args.answers, vec!["count", "3", "/", "$"]);
        assert!(args.is_command_line_run());
    }

    #[test]
    fn test_args_answers_allow_hyphens() {
        let args = Args::parse_from(["menucon", "--no-console-input", "markup", "-x-"]);

        assert!(args.no_console_input);
        assert_eq!(args.answers, vec!["markup", "-x-"]);
        assert!(!args.is_command_line_run());
    }

    #[test]
    fn test_root_sentinel_alone_is_not_command_line_run() {
        let args = Args::parse_from(["menucon", "phrases", "/"]);
        assert!(!args.is_command_line_run());
    }
}
