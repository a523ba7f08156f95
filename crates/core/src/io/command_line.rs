use std::collections::VecDeque;

use super::{MenuScope, Reader, SentinelLatch};
use crate::error::Result;

/// Hands out a fixed sequence of answers, usually taken from the program
/// arguments.
#[derive(Debug, Default, Clone)]
pub struct CommandLineReader {
    answers: VecDeque<String>,
    latch: SentinelLatch,
}

impl CommandLineReader {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            latch: SentinelLatch::default(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Reader for CommandLineReader {
    fn read(&mut self, _is_sensitive: bool) -> Result<Option<String>> {
        if self.latch.is_latched() {
            return Ok(Some(String::new()));
        }

        Ok(self
            .answers
            .pop_front()
            .map(|answer| self.latch.filter(answer)))
    }

    fn has_read(&mut self, scope: MenuScope) -> Result<bool> {
        if self.latch.poll(scope) {
            return Ok(true);
        }
        Ok(!self.answers.is_empty())
    }

    fn read_key(&mut self) -> Result<char> {
        Ok('\0')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_in_order() {
        let mut reader = CommandLineReader::new(["1", "two"]);
        assert!(reader.has_read(MenuScope::Nested).unwrap());
        assert_eq!(reader.read(false).unwrap(), Some("1".to_string()));
        assert_eq!(reader.read(false).unwrap(), Some("two".to_string()));
        assert!(!reader.has_read(MenuScope::Nested).unwrap());
        assert_eq!(reader.read(false).unwrap(), None);
    }

    #[test]
    fn test_exit_sentinel_keeps_answering_blank() {
        let mut reader = CommandLineReader::new(["$", "never"]);
        assert_eq!(reader.read(false).unwrap(), Some(String::new()));

        for scope in [MenuScope::Nested, MenuScope::Root, MenuScope::Root] {
            assert!(reader.has_read(scope).unwrap());
            assert_eq!(reader.read(false).unwrap(), Some(String::new()));
        }
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_root_sentinel_released_at_root() {
        let mut reader = CommandLineReader::new(["/", "next"]);
        assert_eq!(reader.read(false).unwrap(), Some(String::new()));

        assert!(reader.has_read(MenuScope::Nested).unwrap());
        assert_eq!(reader.read(false).unwrap(), Some(String::new()));

        assert!(reader.has_read(MenuScope::Root).unwrap());
        assert_eq!(reader.read(false).unwrap(), Some("next".to_string()));
    }

    #[test]
    fn test_read_key_is_nul() {
        let mut reader = CommandLineReader::new(["p"]);
        assert_eq!(reader.read_key().unwrap(), '\0');
    }
}
