//! Renders text typed by the user, or shows how to type it literally.

use indexmap::IndexMap;
use menucon_core::error::Result;
use menucon_core::markup::{escape, Mark};
use menucon_core::phrases::OPERATIONS;
use menucon_core::registry::Module;
use menucon_core::session::{Action, Session};

pub const NAME: &str = "Markup preview";
pub const RENDER: &str = "Render text";
pub const ESCAPE: &str = "Escape text";
pub const LEGEND: &str = "Show marks";
pub const TYPE_TEXT: &str = "Type marked-up text:";

/// Menu of markup operations over free text.
pub struct MarkupPreview;

impl Module for MarkupPreview {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, session: &mut Session) -> Result<()> {
        let mut actions: IndexMap<String, Action> = IndexMap::new();
        actions.insert(RENDER.to_string(), Box::new(render_text));
        actions.insert(ESCAPE.to_string(), Box::new(escape_text));
        actions.insert(LEGEND.to_string(), Box::new(show_marks));

        session.choose_action(&mut actions, OPERATIONS)
    }
}

fn render_text(session: &mut Session) -> Result<()> {
    let text = session.input_text(TYPE_TEXT)?;
    if !text.is_empty() {
        session.output.write_line(&text, &[])?.write_line("", &[])?;
    }
    Ok(())
}

/// Shows the escaped form of the text, which renders back to it verbatim.
fn escape_text(session: &mut Session) -> Result<()> {
    let text = session.input_text(TYPE_TEXT)?;
    if !text.is_empty() {
        let escaped = escape(&text);
        session
            .output
            .write_line("{0}", &[&escape(&escaped)])?
            .write_line("", &[])?;
    }
    Ok(())
}

fn show_marks(session: &mut Session) -> Result<()> {
    for mark in Mark::ESCAPABLE {
        if mark == Mark::Ignore {
            continue;
        }
        let c = mark.as_char();
        session
            .output
            .write_line("{0}{1}: {2}{3}{2}", &[&c, &c, &c, &format!("{mark:?}")])?;
    }
    let ignore = Mark::Ignore.as_char();
    session
        .output
        .write_line("{0}{0}: {0}*rest of the line*", &[&ignore])?
        .write_line("", &[])?;
    Ok(())
}
