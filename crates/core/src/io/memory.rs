use std::cell::RefCell;
use std::rc::Rc;

use super::{SinkLevels, Writer};
use crate::error::Result;
use crate::level::OutputLevel;
use crate::markup::StyledRun;

#[derive(Debug, Default)]
struct MemoryState {
    runs: Vec<StyledRun>,
    levels: SinkLevels,
}

/// Sink that records the runs it receives.
///
/// Clones share the same record, so a test can keep one handle while the
/// multiplexer owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn runs(&self) -> Vec<StyledRun> {
        self.state.borrow().runs.clone()
    }

    /// Concatenated text of every recorded run, marks dropped.
    #[must_use]
    pub fn text(&self) -> String {
        self.state
            .borrow()
            .runs
            .iter()
            .map(|run| run.text.as_str())
            .collect()
    }

    pub fn clear(&self) {
        self.state.borrow_mut().runs.clear();
    }
}

impl Writer for MemoryWriter {
    fn level(&self) -> OutputLevel {
        self.state.borrow().levels.level
    }

    fn set_level(&mut self, level: OutputLevel) {
        self.state.borrow_mut().levels.level = level;
    }

    fn level_filter(&self) -> OutputLevel {
        self.state.borrow().levels.filter
    }

    fn set_level_filter(&mut self, filter: OutputLevel) {
        self.state.borrow_mut().levels.filter = filter;
    }

    fn write_now(&mut self, run: StyledRun) -> Result<()> {
        if self.can_write() {
            self.state.borrow_mut().runs.push(run);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Mark;

    #[test]
    fn test_records_runs_through_clones() {
        let memory = MemoryWriter::new();
        let mut sink = memory.clone();
        sink.write("plain ^title^", &[]).unwrap();

        assert_eq!(
            memory.runs(),
            vec![
                StyledRun::new("plain ", Mark::None),
                StyledRun::new("title", Mark::Title),
            ]
        );
        assert_eq!(memory.text(), "plain title");
    }

    #[test]
    fn test_filtered_writes_are_dropped() {
        let mut memory = MemoryWriter::new();
        memory.set_level_filter(OutputLevel::COMMAND_LINE);
        memory.write("interactive only", &[]).unwrap();
        assert!(memory.runs().is_empty());

        memory.set_level(OutputLevel::COMMAND_LINE);
        memory.write("result", &[]).unwrap();
        assert_eq!(memory.text(), "result");
    }
}
