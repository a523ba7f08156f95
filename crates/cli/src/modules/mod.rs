//! Modules shipped with the binary.
//!
//! - [`markup_preview`]: renders text typed by the user
//! - [`counter`]: a cancellable counting loop with the busy indicator
//! - [`phrase_browser`]: shows the translations of the built-in phrases
//! - [`about`]: program information, hidden from the list

use std::path::Path;

use log::debug;
use menucon_core::registry::ModuleRegistry;

pub mod about;
pub mod counter;
pub mod markup_preview;
pub mod phrase_browser;

/// Names, command tokens and phrases of the modules above, phrase first,
/// then language.
pub const TRANSLATIONS: &str = include_str!("translations.yml");

/// Registers every built-in module.
pub fn register_builtin(registry: &mut ModuleRegistry, data_dir: &Path) {
    registry.register(markup_preview::MarkupPreview);
    registry.register(counter::Counter::default());
    registry.register(phrase_browser::PhraseBrowser::default());
    registry.register(about::About::new(data_dir));
    debug!("Registered {} built-in modules", registry.len());
}
