//! Menucon CLI Library
//!
//! This crate provides the `menucon` binary: it reads the command line,
//! assembles a [`menucon_core::session::Session`] over the terminal and
//! runs the built-in modules.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`shell`]: Session assembly, welcome banner and the top-level menu
//! - [`modules`]: The modules shipped with the binary
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode - shows the module list
//! menucon
//!
//! # Portuguese phrases
//! menucon --language pt-BR
//!
//! # Scripted run: count to 5, print only the result, then exit
//! menucon --no-console-input count 5 '$'
//!
//! # Answers typed into ~/.menucon/input.txt are read too
//! menucon --file-input
//! ```

pub mod cli_args;
pub mod modules;
pub mod shell;

/// Name shown in the banner and the about page.
pub const PROGRAM_NAME: &str = "menucon";
