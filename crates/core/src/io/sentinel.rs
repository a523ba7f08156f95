//! Reserved answers that steer the menus instead of reaching module logic.

use super::MenuScope;

/// Answer that unwinds every menu and ends the program.
pub const ANSWER_TO_EXIT: &str = "$";

/// Answer that unwinds menus until the root option list is shown again.
pub const ANSWER_TO_ROOT: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    Exit,
    Root,
}

impl Sentinel {
    #[must_use]
    pub fn parse(answer: &str) -> Option<Sentinel> {
        match answer {
            ANSWER_TO_EXIT => Some(Sentinel::Exit),
            ANSWER_TO_ROOT => Some(Sentinel::Root),
            _ => None,
        }
    }
}

/// Remembers a sentinel a reader has handed out.
///
/// While latched, the reader keeps reporting a pending blank answer so each
/// enclosing menu consumes one blank turn and returns. An exit latch never
/// clears; a root latch clears at the first poll made while the root option
/// list is displayed.
#[derive(Debug, Default, Clone)]
pub struct SentinelLatch {
    pending: Option<Sentinel>,
}

impl SentinelLatch {
    /// Passes an answer through, swallowing and latching sentinels.
    pub fn filter(&mut self, answer: String) -> String {
        match Sentinel::parse(answer.trim()) {
            Some(sentinel) => {
                log::debug!("Sentinel answer {sentinel:?} received");
                self.pending = Some(sentinel);
                String::new()
            }
            None => answer,
        }
    }

    pub fn latch(&mut self, sentinel: Sentinel) {
        self.pending = Some(sentinel);
    }

    #[must_use]
    pub fn is_latched(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending(&self) -> Option<Sentinel> {
        self.pending
    }

    /// Whether the latch still demands a blank turn in `scope`. Clears a
    /// satisfied latch.
    pub fn poll(&mut self, scope: MenuScope) -> bool {
        match (self.pending, scope) {
            (Some(Sentinel::Exit), _) | (Some(Sentinel::Root), MenuScope::Nested) => true,
            _ => {
                self.pending = None;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Sentinel::parse("$"), Some(Sentinel::Exit));
        assert_eq!(Sentinel::parse("/"), Some(Sentinel::Root));
        assert_eq!(Sentinel::parse("$$"), None);
        assert_eq!(Sentinel::parse(""), None);
    }

    #[test]
    fn test_filter_swallows_sentinels() {
        let mut latch = SentinelLatch::default();
        assert_eq!(latch.filter("hello".to_string()), "hello");
        assert!(!latch.is_latched());

        assert_eq!(latch.filter("/".to_string()), "");
        assert_eq!(latch.pending(), Some(Sentinel::Root));
    }

    #[test]
    fn test_exit_latch_never_clears() {
        let mut latch = SentinelLatch::default();
        latch.latch(Sentinel::Exit);
        assert!(latch.poll(MenuScope::Nested));
        assert!(latch.poll(MenuScope::Root));
        assert!(latch.poll(MenuScope::Root));
    }

    #[test]
    fn test_root_latch_clears_at_root() {
        let mut latch = SentinelLatch::default();
        latch.latch(Sentinel::Root);
        assert!(latch.poll(MenuScope::Nested));
        assert!(latch.poll(MenuScope::Nested));
        assert!(!latch.poll(MenuScope::Root));
        assert!(!latch.is_latched());
        assert!(!latch.poll(MenuScope::Nested));
    }
}
