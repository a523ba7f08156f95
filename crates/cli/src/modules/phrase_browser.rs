//! Shows how the built-in phrases read in the session language.

use menucon_core::error::Result;
use menucon_core::markup::escape;
use menucon_core::phrases::{self, CONFIRM_SELECTION};
use menucon_core::registry::Module;
use menucon_core::session::Session;

pub const NAME: &str = "Phrases";
pub const PICK_PHRASES: &str = "Phrases to show:";
pub const CONFIRM_RESPONSE: &str = "ok";

/// Label of the empty language, where phrases show as written.
const UNTRANSLATED: &str = "en";

/// Multi-select over a phrase table. Each confirmed pick is shown as its
/// key followed by its text in the session language.
pub struct PhraseBrowser {
    phrases: Vec<String>,
}

impl PhraseBrowser {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for PhraseBrowser {
    fn default() -> Self {
        Self::new(phrases::ALL)
    }
}

impl Module for PhraseBrowser {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, session: &mut Session) -> Result<()> {
        loop {
            let picked = session.choose_options(&self.phrases, PICK_PHRASES)?;
            if picked.is_empty() {
                return Ok(());
            }
            if !session.input_confirm(CONFIRM_SELECTION, CONFIRM_RESPONSE)? {
                continue;
            }

            let language = match session.language() {
                "" => UNTRANSLATED.to_string(),
                language => language.to_string(),
            };
            for (_, phrase) in picked {
                let text = session.translate(phrase);
                session
                    .output
                    .write_line("^{0}^", &[&escape(phrase)])?
                    .write_line("  #{0}:# {1}", &[&escape(&language), &escape(&text)])?;
            }
            session.output.write_line("", &[])?;
        }
    }
}
