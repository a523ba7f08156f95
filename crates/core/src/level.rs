//! Output levels used to filter what each sink displays.

use bitflags::bitflags;

bitflags! {
    /// Classification of a message, and of what a sink is willing to show.
    ///
    /// A sink emits a message only when `(level & filter) == filter`, so a sink
    /// filtered at [`COMMAND_LINE`](Self::COMMAND_LINE) shows only messages
    /// written at that level, while a sink filtered at
    /// [`INTERACTIVE`](Self::INTERACTIVE) shows everything.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OutputLevel: u8 {
        /// Common to every message.
        const INTERACTIVE = 0b01;
        /// Results meant for a non-interactive, command-line run. Superset of
        /// `INTERACTIVE`.
        const COMMAND_LINE = 0b11;
    }
}

impl Default for OutputLevel {
    fn default() -> Self {
        OutputLevel::INTERACTIVE
    }
}

impl OutputLevel {
    /// Whether a message at `self` passes a sink filtered at `filter`.
    #[must_use]
    pub fn passes(self, filter: OutputLevel) -> bool {
        (self & filter) == filter
    }

    /// Whether a filter describes a human at the keyboard.
    #[must_use]
    pub fn is_interactive_filter(self) -> bool {
        OutputLevel::INTERACTIVE.contains(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_is_superset_of_interactive() {
        assert!(OutputLevel::COMMAND_LINE.contains(OutputLevel::INTERACTIVE));
        assert!(!OutputLevel::INTERACTIVE.contains(OutputLevel::COMMAND_LINE));
    }

    #[test]
    fn test_passes() {
        assert!(OutputLevel::INTERACTIVE.passes(OutputLevel::INTERACTIVE));
        assert!(OutputLevel::COMMAND_LINE.passes(OutputLevel::INTERACTIVE));
        assert!(OutputLevel::COMMAND_LINE.passes(OutputLevel::COMMAND_LINE));
        assert!(!OutputLevel::INTERACTIVE.passes(OutputLevel::COMMAND_LINE));
    }

    #[test]
    fn test_interactive_filter() {
        assert!(OutputLevel::INTERACTIVE.is_interactive_filter());
        assert!(!OutputLevel::COMMAND_LINE.is_interactive_filter());
        assert_eq!(OutputLevel::default(), OutputLevel::INTERACTIVE);
    }
}
