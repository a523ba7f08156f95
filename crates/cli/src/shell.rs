//! Assembles a session from the command line and runs it.
//!
//! The shell wires the output sinks and input sources chosen on the command
//! line, loads translations, registers the built-in modules and shows the
//! welcome banner. Everything written before the banner, like translation
//! load errors, is held back and shown right after it.

use std::env;
use std::io::stdout;
use std::path::{Path, PathBuf};

use crossterm::terminal;
use log::{info, warn};
use menucon_core::busy::BusyIndicator;
use menucon_core::config;
use menucon_core::error::{Error, Result};
use menucon_core::io::{
    CommandLineReader, ConsoleReader, ConsoleWriter, FileReader, FileWriter, InputMultiplexer,
    MenuScope, OutputMultiplexer, Reader, ANSWER_TO_EXIT,
};
use menucon_core::level::OutputLevel;
use menucon_core::markup::escape;
use menucon_core::phrases;
use menucon_core::registry::{ModuleRegistry, ScopeObserver};
use menucon_core::session::{BusyWriter, Session};
use menucon_core::translate::{TranslationLookup, Translations};

use crate::cli_args::Args;
use crate::modules;
use crate::PROGRAM_NAME;

pub const MODULES_LOADED: &str = "Modules loaded: {0}";

/// Banner width when the terminal size is unknown.
pub const FALLBACK_WIDTH: u16 = 80;

/// A session ready to run, plus what the command line asked it to do.
pub struct Shell {
    session: Session,
    module: Option<String>,
    title: String,
}

impl Shell {
    /// Builds a shell on the terminal: console output, plus the log file,
    /// the input file and console input as the arguments ask.
    ///
    /// # Errors
    ///
    /// Returns an error if the log or input file cannot be created.
    pub fn from_args(args: &Args) -> Result<Self> {
        let data_dir = config::get_data_dir(&args.data_dir);

        let mut output = OutputMultiplexer::new();
        output.add(Box::new(ConsoleWriter::stdout()));
        if args.log_file {
            let writer = FileWriter::new(config::log_file_path(&data_dir))?;
            info!("Logging output to `{}`", writer.path().display());
            output.add(Box::new(writer));
        }

        let mut readers: Vec<Box<dyn Reader>> = Vec::new();
        if args.file_input {
            let reader = FileReader::new(config::input_file_path(&data_dir))?;
            info!("Watching `{}` for answers", reader.path().display());
            readers.push(Box::new(reader));
        }
        if !args.no_console_input {
            match ConsoleReader::new() {
                Ok(reader) => readers.push(Box::new(reader)),
                Err(e) => warn!("Console input unavailable: {e}"),
            }
        }
        if readers.is_empty() {
            info!("No interactive input, exiting once scripted answers run out");
            readers.push(Box::new(CommandLineReader::new([ANSWER_TO_EXIT])));
        }

        let shell = Self::new(args, output, readers)?;
        if args.is_command_line_run() {
            Ok(shell)
        } else {
            let writer: BusyWriter = Box::new(stdout());
            Ok(shell.with_busy_indicator(BusyIndicator::new(writer)))
        }
    }

    /// Builds a shell over the given sinks and readers.
    ///
    /// Scripted answers from `args` are read before any of `readers`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled translations are malformed or a
    /// start-up notice cannot be written.
    pub fn new(
        args: &Args,
        mut output: OutputMultiplexer,
        readers: Vec<Box<dyn Reader>>,
    ) -> Result<Self> {
        let data_dir = config::get_data_dir(&args.data_dir);
        let language = config::resolve_language(&args.language, |name| env::var(name).ok());
        info!("Data directory `{}`, language `{language}`", data_dir.display());

        output.set_prevent(true);
        output.set_level_filter(if args.is_command_line_run() {
            OutputLevel::COMMAND_LINE
        } else {
            OutputLevel::INTERACTIVE
        });

        let mut input = InputMultiplexer::new();
        input.add(Box::new(CommandLineReader::new(args.answers.iter().cloned())));
        for reader in readers {
            input.add(reader);
        }

        let translations = load_translations(args, &data_dir, &language, &mut output)?;

        let mut registry = ModuleRegistry::new();
        modules::register_builtin(&mut registry, &data_dir);
        let loaded = format!("#{}", translations.get_text(MODULES_LOADED, &language));
        output.write_line(&loaded, &[&registry.len()])?;

        let title = banner_title(&registry, &translations, &language);
        registry.subscribe(welcome_on_return(title.clone()));

        Ok(Self {
            session: Session::new(output, input, translations, language, registry),
            module: args.module.clone(),
            title,
        })
    }

    #[must_use]
    pub fn with_busy_indicator(mut self, busy: BusyIndicator<BusyWriter>) -> Self {
        self.session = self.session.with_busy_indicator(busy);
        self
    }

    /// Shows the banner, then the module list (or the module named on the
    /// command line) until the user leaves.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a module or an output sink.
    pub fn run(mut self) -> Result<Session> {
        write_banner(&mut self.session.output, &self.title, terminal_width())?;

        match &self.module {
            Some(name) => self.session.run_module_named(name)?,
            None => self
                .session
                .choose_module("", phrases::AVAILABLE_MODULES, true)?,
        }

        let finished = format!("_{}", self.session.translate(phrases::FINISHED));
        self.session.output.write_line(&finished, &[])?;
        Ok(self.session)
    }
}

/// Built-in, module and user translations. Files that fail to load are
/// reported on `output` and skipped.
fn load_translations(
    args: &Args,
    data_dir: &Path,
    language: &str,
    output: &mut OutputMultiplexer,
) -> Result<Translations> {
    let mut translations = Translations::builtin()?;
    translations.merge_phrases_str("modules", modules::TRANSLATIONS)?;

    let mut failures: Vec<(&str, PathBuf, Error)> = Vec::new();

    if let Some(path) = &args.translations {
        let path = PathBuf::from(path);
        if let Err(e) = translations.merge_phrases_file(&path) {
            failures.push((phrases::FILE_LOAD_ERROR, path, e));
        }
    }

    if !language.is_empty() {
        let path = config::translations_file_path(data_dir, language);
        if let Err(e) = translations.merge_language_file(language, &path) {
            failures.push((phrases::FILE_CONTENT_INVALID, path, e));
        }
    }

    for (phrase, path, e) in failures {
        warn!("Skipping translations `{}`: {e}", path.display());
        let notice = format!("!{}", translations.get_text(phrase, language));
        output
            .write_line(&notice, &[&escape(&path.display().to_string())])?
            .write_line("#{0}", &[&escape(&e.to_string())])?;
    }

    Ok(translations)
}

/// The single top-level module's name when there is only one, else the
/// program name.
fn banner_title(registry: &ModuleRegistry, translations: &Translations, language: &str) -> String {
    let top_level = registry.in_context("");
    match top_level.as_slice() {
        [only] => registry
            .get(*only)
            .map(|module| translations.get_text(module.name(), language))
            .unwrap_or_else(|| PROGRAM_NAME.to_string()),
        _ => PROGRAM_NAME.to_string(),
    }
}

fn terminal_width() -> u16 {
    terminal::size().map_or(FALLBACK_WIDTH, |(width, _)| width)
}

/// Writes the framed welcome banner, then releases held-back output.
///
/// # Errors
///
/// Returns an error if a sink fails.
pub fn write_banner(output: &mut OutputMultiplexer, title: &str, width: u16) -> Result<()> {
    let heading = format!("### {title} ###");
    let heading_width = heading.chars().count();
    let fill = "#".repeat(usize::from(width).saturating_sub(heading_width + 2));

    let frame = format!("{} {fill}", "#".repeat(heading_width));
    let middle = format!("{heading} {fill}");

    output.set_prevent(false);
    for row in [&frame, &middle, &frame] {
        output.write_line(&format!("^{}", escape(row.trim_end())), &[])?;
    }
    output.write_line("", &[])?;

    if !output.flushed() {
        output.queue_flush()?;
        output.write_line("", &[])?;
    }
    Ok(())
}

/// Observer showing the banner again each time the user comes back to the
/// root list from a nested prompt.
fn welcome_on_return(title: String) -> ScopeObserver {
    let mut previous: Option<MenuScope> = None;
    Box::new(move |scope: MenuScope, output: &mut OutputMultiplexer| {
        let returning = scope == MenuScope::Root && previous == Some(MenuScope::Nested);
        previous = Some(scope);
        if returning {
            write_banner(output, &title, terminal_width())?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use menucon_core::io::MemoryWriter;

    #[test]
    fn test_banner_fills_width() {
        let memory = MemoryWriter::new();
        let mut output = OutputMultiplexer::new();
        output.add(Box::new(memory.clone()));

        write_banner(&mut output, "demo", 20).unwrap();

        let text = memory.text().replace('\r', "");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "############ ######");
        assert_eq!(lines[1], "### demo ### ######");
        assert_eq!(lines[2], lines[0]);
    }

    #[test]
    fn test_banner_on_narrow_terminal() {
        let memory = MemoryWriter::new();
        let mut output = OutputMultiplexer::new();
        output.add(Box::new(memory.clone()));

        write_banner(&mut output, "demo", 4).unwrap();

        assert!(memory.text().contains("### demo ###"));
    }

    #[test]
    fn test_banner_releases_held_back_output() {
        let memory = MemoryWriter::new();
        let mut output = OutputMultiplexer::new();
        output.add(Box::new(memory.clone()));
        output.set_prevent(true);
        output.write_line("early", &[]).unwrap();
        assert!(memory.text().is_empty());

        write_banner(&mut output, "demo", 20).unwrap();

        assert!(!output.prevent());
        assert!(output.flushed());
        let text = memory.text();
        assert!(text.find("### demo ###").unwrap() < text.find("early").unwrap());
    }

    #[test]
    fn test_welcome_shown_only_on_return_to_root() {
        let memory = MemoryWriter::new();
        let mut output = OutputMultiplexer::new();
        output.add(Box::new(memory.clone()));
        let mut observer = welcome_on_return("demo".to_string());

        observer(MenuScope::Root, &mut output).unwrap();
        observer(MenuScope::Root, &mut output).unwrap();
        assert!(memory.text().is_empty());

        observer(MenuScope::Nested, &mut output).unwrap();
        observer(MenuScope::Root, &mut output).unwrap();
        assert_eq!(memory.text().matches("### demo ###").count(), 1);
    }
}
