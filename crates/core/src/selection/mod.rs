//! Option selection.
//!
//! Options are shown as a numbered table and the answer is resolved by
//! number, regular expression (multi-select), command token or unique name
//! prefix. The prompt helpers themselves live on
//! [`Session`](crate::session::Session).

mod prompt;
pub mod resolve;
pub mod types;
pub mod ui;

pub use resolve::resolve;
pub use types::{Candidate, Choice, ModuleChoice};
