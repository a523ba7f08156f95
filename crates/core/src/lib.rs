//! Menucon Core Library
//!
//! This crate provides the engine behind menucon, an interactive console
//! program built from selectable modules. Everything the user sees goes
//! through a small markup language, and everything the user answers comes
//! from interchangeable input sources.
//!
//! # Key Features
//!
//! - **Markup**: Single-character marks (`^title^`, `*highlight*`, `!error!`, ...)
//!   turned into styled runs
//! - **Output Multiplexing**: Fan-out to console, log file or memory sinks, with
//!   level filtering and a queue for writes made before output is ready
//! - **Input Multiplexing**: Answers from the terminal, a watched file or
//!   scripted command-line arguments, with `$` (exit) and `/` (back to root)
//!   sentinels
//! - **Selection**: Numbered option tables resolved by number, regular
//!   expression, command token or unique name prefix
//! - **Modules and Sessions**: A registry of modules run inside a [`session::Session`]
//!   offering prompt helpers, cancellable loops and a busy indicator
//! - **Translation**: Phrase lookup with YAML translation files
//!
//! # Examples
//!
//! Scripting a selection:
//!
//! ```
//! use menucon_core::io::{CommandLineReader, InputMultiplexer, MemoryWriter, OutputMultiplexer};
//! use menucon_core::registry::ModuleRegistry;
//! use menucon_core::session::Session;
//! use menucon_core::translate::Translations;
//!
//! let memory = MemoryWriter::new();
//! let mut output = OutputMultiplexer::new();
//! output.add(Box::new(memory.clone()));
//!
//! let mut input = InputMultiplexer::new();
//! input.add(Box::new(CommandLineReader::new(["2"])));
//!
//! let mut session = Session::new(output, input, Translations::new(), "", ModuleRegistry::new());
//! let options = ["Alpha", "Beta", "Gamma"];
//! let picked = session.choose_option(&options, "Pick")?;
//!
//! assert_eq!(picked, Some((1, &"Beta")));
//! assert!(memory.text().contains("2) Beta"));
//! # Ok::<(), menucon_core::error::Error>(())
//! ```

pub mod busy;
pub mod config;
pub mod error;
pub mod interpolation;
pub mod io;
pub mod level;
pub mod markup;
pub mod phrases;
pub mod registry;
pub mod selection;
pub mod session;
pub mod slug;
pub mod translate;
