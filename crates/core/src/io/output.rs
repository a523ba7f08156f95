use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::Display;
use std::rc::Rc;

use log::debug;

use super::Writer;
use crate::error::{Error, Result};
use crate::interpolation::capture_arguments;
use crate::level::OutputLevel;

/// A write that could not be delivered when it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedMessage {
    pub level: OutputLevel,
    pub format: String,
    pub args: Vec<String>,
}

/// Shared handle on an [`OutputMultiplexer`]'s pending-message queue.
///
/// Cloning the handle shares the queue, so messages can be appended from
/// outside the multiplexer, including while it is draining.
#[derive(Debug, Clone, Default)]
pub struct QueueHandle {
    messages: Rc<RefCell<VecDeque<QueuedMessage>>>,
}

impl QueueHandle {
    pub fn push(&self, message: QueuedMessage) {
        self.messages.borrow_mut().push_back(message);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    fn pop_front(&self) -> Option<QueuedMessage> {
        self.messages.borrow_mut().pop_front()
    }
}

/// Fans every write out to all registered sinks.
///
/// All sinks always share the multiplexer's level and level filter. While
/// there are no sinks, or output is prevented, writes are queued and can be
/// delivered later with [`queue_flush`](OutputMultiplexer::queue_flush).
///
/// # Examples
///
/// ```
/// use menucon_core::io::{MemoryWriter, OutputMultiplexer};
///
/// let mut output = OutputMultiplexer::new();
/// output.write_line("queued before any sink", &[])?;
///
/// let memory = MemoryWriter::new();
/// output.add(Box::new(memory.clone()));
/// output.queue_flush()?;
/// output.write_line("*{0}* sinks", &[&1])?;
///
/// assert_eq!(memory.text(), "queued before any sink\n1 sinks\n");
/// # Ok::<(), menucon_core::error::Error>(())
/// ```
#[derive(Default)]
pub struct OutputMultiplexer {
    sinks: Vec<Box<dyn Writer>>,
    level: OutputLevel,
    level_filter: OutputLevel,
    queue: QueueHandle,
    prevent: bool,
    flushed: bool,
}

impl OutputMultiplexer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sink, first stamping it with the current level and filter.
    pub fn add(&mut self, mut sink: Box<dyn Writer>) {
        sink.set_level(self.level);
        sink.set_level_filter(self.level_filter);
        self.sinks.push(sink);
        debug!("Output sink added, {} registered", self.sinks.len());
    }

    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Current level of written messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LevelMismatch`] if any sink has drifted from the
    /// multiplexer's value.
    pub fn level(&self) -> Result<OutputLevel> {
        if let Some(sink) = self.sinks.iter().find(|sink| sink.level() != self.level) {
            return Err(Error::level_mismatch("level", self.level, sink.level()));
        }
        Ok(self.level)
    }

    pub fn set_level(&mut self, level: OutputLevel) {
        self.level = level;
        for sink in &mut self.sinks {
            sink.set_level(level);
        }
    }

    /// Level a message needs for the sinks to display it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LevelMismatch`] if any sink has drifted from the
    /// multiplexer's value.
    pub fn level_filter(&self) -> Result<OutputLevel> {
        if let Some(sink) = self
            .sinks
            .iter()
            .find(|sink| sink.level_filter() != self.level_filter)
        {
            return Err(Error::level_mismatch(
                "level filter",
                self.level_filter,
                sink.level_filter(),
            ));
        }
        Ok(self.level_filter)
    }

    pub fn set_level_filter(&mut self, filter: OutputLevel) {
        self.level_filter = filter;
        for sink in &mut self.sinks {
            sink.set_level_filter(filter);
        }
    }

    /// Runs `f` with the level temporarily set to `level`.
    pub fn with_level<T>(
        &mut self,
        level: OutputLevel,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let previous = self.level()?;
        self.set_level(level);
        let result = f(self);
        self.set_level(previous);
        result
    }

    #[must_use]
    pub fn prevent(&self) -> bool {
        self.prevent
    }

    /// While set, every write is queued instead of delivered.
    pub fn set_prevent(&mut self, prevent: bool) {
        self.prevent = prevent;
    }

    /// Whether the queue has been drained since the last queued write.
    #[must_use]
    pub fn flushed(&self) -> bool {
        self.flushed && self.queue.is_empty()
    }

    #[must_use]
    pub fn queue_handle(&self) -> QueueHandle {
        self.queue.clone()
    }

    /// Writes marked-up text, substituting `{0}`, `{1}`, ... with `args`.
    pub fn write(&mut self, format: &str, args: &[&dyn Display]) -> Result<&mut Self> {
        let message = QueuedMessage {
            level: self.level()?,
            format: format.to_string(),
            args: capture_arguments(args),
        };
        self.deliver(message, false)?;
        Ok(self)
    }

    /// Same as [`write`](OutputMultiplexer::write), followed by a newline.
    pub fn write_line(&mut self, format: &str, args: &[&dyn Display]) -> Result<&mut Self> {
        self.write(&format!("{format}\n"), args)
    }

    fn deliver(&mut self, message: QueuedMessage, force: bool) -> Result<()> {
        if !force && (self.sinks.is_empty() || self.prevent) {
            self.queue.push(message);
            self.flushed = false;
            return Ok(());
        }

        for sink in &mut self.sinks {
            sink.write(&message.format, &message.args)?;
        }
        Ok(())
    }

    /// Delivers every queued message, oldest first, each at the level it was
    /// written with. Messages queued while draining are delivered too.
    pub fn queue_flush(&mut self) -> Result<()> {
        let level = self.level()?;
        debug!("Flushing {} queued messages", self.queue.len());

        while let Some(message) = self.queue.pop_front() {
            self.set_level(message.level);
            let delivered = self.deliver(message, true);
            self.set_level(level);
            delivered?;
        }

        self.flushed = true;
        Ok(())
    }
}
