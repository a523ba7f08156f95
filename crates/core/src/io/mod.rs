//! Input and output providers.
//!
//! The engine talks to the user through two contracts:
//!
//! - [`Writer`]: a sink for styled text (console, log file, memory)
//! - [`Reader`]: a source of answers (console, watched file, scripted
//!   command-line answers)
//!
//! Any number of each are combined behind an [`OutputMultiplexer`] and an
//! [`InputMultiplexer`], which is what modules actually use.

pub mod command_line;
pub mod console;
pub mod file;
pub mod input;
pub mod memory;
pub mod output;
pub mod sentinel;

pub use command_line::CommandLineReader;
pub use console::{ConsoleReader, ConsoleWriter};
pub use file::{FileReader, FileWriter};
pub use input::InputMultiplexer;
pub use memory::MemoryWriter;
pub use output::{OutputMultiplexer, QueueHandle, QueuedMessage};
pub use sentinel::{Sentinel, SentinelLatch, ANSWER_TO_EXIT, ANSWER_TO_ROOT};

use crate::error::Result;
use crate::interpolation::interpolate;
use crate::level::OutputLevel;
use crate::markup::{self, StyledRun};

/// Whether the root module's own option list is what the user is looking at.
///
/// Readers use it to decide when a pending "return to root" answer has been
/// satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuScope {
    Root,
    #[default]
    Nested,
}

/// A source of user answers.
pub trait Reader {
    /// Produces the next answer.
    ///
    /// `Ok(None)` means there is nothing to hand out right now and the caller
    /// should keep waiting. An empty string is a real, blank answer.
    fn read(&mut self, is_sensitive: bool) -> Result<Option<String>>;

    /// Whether an answer is waiting to be read.
    fn has_read(&mut self, scope: MenuScope) -> Result<bool>;

    /// Reads a single key press.
    fn read_key(&mut self) -> Result<char>;
}

/// A destination for styled text.
///
/// Implementors supply the level accessors and [`write_now`](Writer::write_now);
/// formatting and markup parsing are shared.
pub trait Writer {
    fn level(&self) -> OutputLevel;
    fn set_level(&mut self, level: OutputLevel);
    fn level_filter(&self) -> OutputLevel;
    fn set_level_filter(&mut self, filter: OutputLevel);

    /// Emits one styled run. Implementations must honour [`can_write`](Writer::can_write).
    fn write_now(&mut self, run: StyledRun) -> Result<()>;

    fn can_write(&self) -> bool {
        self.level().passes(self.level_filter())
    }

    fn write(&mut self, format: &str, args: &[String]) -> Result<()> {
        let text = interpolate(format, args)?;
        markup::render(&text, |run| self.write_now(run))
    }

    fn write_line(&mut self, format: &str, args: &[String]) -> Result<()> {
        self.write(&format!("{format}\n"), args)
    }
}

/// Level and filter storage shared by the concrete writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SinkLevels {
    pub level: OutputLevel,
    pub filter: OutputLevel,
}
