use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{debug, warn};

use super::{MenuScope, Reader};
use crate::error::{Error, Result};

/// Pause between polls while no reader has anything to say.
pub const DEFAULT_IDLE_INTERVAL: Duration = Duration::from_millis(10);

/// Polls every registered reader and returns the first answer any of them
/// produces.
///
/// Waiting is unbounded unless a cancellation signal is installed with
/// [`set_cancel_signal`](InputMultiplexer::set_cancel_signal), in which case a
/// message on that channel aborts the wait with [`Error::InputCancelled`].
pub struct InputMultiplexer {
    readers: Vec<Box<dyn Reader>>,
    scope: MenuScope,
    cancel: Option<Receiver<()>>,
    idle: Duration,
}

impl Default for InputMultiplexer {
    fn default() -> Self {
        Self {
            readers: Vec::new(),
            scope: MenuScope::default(),
            cancel: None,
            idle: DEFAULT_IDLE_INTERVAL,
        }
    }
}

impl InputMultiplexer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, reader: Box<dyn Reader>) {
        self.readers.push(reader);
        debug!("Input reader added, {} registered", self.readers.len());
    }

    #[must_use]
    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    #[must_use]
    pub fn scope(&self) -> MenuScope {
        self.scope
    }

    /// Records which menu is on screen; passed to every reader's
    /// [`has_read`](Reader::has_read).
    pub fn set_scope(&mut self, scope: MenuScope) {
        self.scope = scope;
    }

    pub fn set_cancel_signal(&mut self, cancel: Receiver<()>) {
        self.cancel = Some(cancel);
    }

    pub fn set_idle_interval(&mut self, idle: Duration) {
        self.idle = idle;
    }

    /// Whether any reader has an answer waiting.
    pub fn has_read(&mut self) -> Result<bool> {
        let scope = self.scope;
        for reader in &mut self.readers {
            if reader.has_read(scope)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Blocks until some reader produces an answer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputCancelled`] when the cancellation signal fires,
    /// or the first error a reader reports.
    pub fn read(&mut self, is_sensitive: bool) -> Result<String> {
        loop {
            let scope = self.scope;
            for reader in &mut self.readers {
                if reader.has_read(scope)? {
                    if let Some(answer) = reader.read(is_sensitive)? {
                        return Ok(answer);
                    }
                }
            }
            self.wait()?;
        }
    }

    /// Blocks until some reader produces a key press.
    pub fn read_key(&mut self) -> Result<char> {
        loop {
            let scope = self.scope;
            for reader in &mut self.readers {
                if reader.has_read(scope)? {
                    return reader.read_key();
                }
            }
            self.wait()?;
        }
    }

    fn wait(&mut self) -> Result<()> {
        let Some(cancel) = &self.cancel else {
            thread::sleep(self.idle);
            return Ok(());
        };

        match cancel.recv_timeout(self.idle) {
            Ok(()) => {
                debug!("Input wait cancelled");
                Err(Error::InputCancelled)
            }
            Err(RecvTimeoutError::Timeout) => Ok(()),
            Err(RecvTimeoutError::Disconnected) => {
                warn!("Input cancellation channel disconnected");
                self.cancel = None;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::CommandLineReader;
    use crossbeam_channel::bounded;

    /// Reader that only becomes ready after a number of polls.
    struct SlowReader {
        polls_left: usize,
        answer: &'static str,
    }

    impl Reader for SlowReader {
        fn read(&mut self, _is_sensitive: bool) -> Result<Option<String>> {
            Ok(Some(self.answer.to_string()))
        }

        fn has_read(&mut self, _scope: MenuScope) -> Result<bool> {
            if self.polls_left == 0 {
                return Ok(true);
            }
            self.polls_left -= 1;
            Ok(false)
        }

        fn read_key(&mut self) -> Result<char> {
            Ok('k')
        }
    }

    #[test]
    fn test_first_ready_reader_wins() {
        let mut input = InputMultiplexer::new();
        input.set_idle_interval(Duration::ZERO);
        input.add(Box::new(SlowReader {
            polls_left: 3,
            answer: "slow",
        }));
        input.add(Box::new(CommandLineReader::new(["fast"])));

        assert_eq!(input.read(false).unwrap(), "fast");
        assert_eq!(input.read(false).unwrap(), "slow");
    }

    #[test]
    fn test_read_key_uses_ready_reader() {
        let mut input = InputMultiplexer::new();
        input.set_idle_interval(Duration::ZERO);
        input.add(Box::new(SlowReader {
            polls_left: 1,
            answer: "",
        }));

        assert_eq!(input.read_key().unwrap(), 'k');
    }

    #[test]
    fn test_has_read_without_readers() {
        let mut input = InputMultiplexer::new();
        assert!(!input.has_read().unwrap());
    }

    #[test]
    fn test_cancel_signal_aborts_wait() {
        let (sender, receiver) = bounded(1);
        let mut input = InputMultiplexer::new();
        input.set_cancel_signal(receiver);
        sender.send(()).unwrap();

        assert!(matches!(input.read(false), Err(Error::InputCancelled)));
    }

    #[test]
    fn test_scope_reaches_readers() {
        let mut input = InputMultiplexer::new();
        input.add(Box::new(CommandLineReader::new(["/", "after"])));

        input.set_scope(MenuScope::Nested);
        assert_eq!(input.read(false).unwrap(), "");
        assert_eq!(input.read(false).unwrap(), "");

        input.set_scope(MenuScope::Root);
        assert_eq!(input.read(false).unwrap(), "after");
    }
}
