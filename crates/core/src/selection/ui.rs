use super::types::Candidate;
use crate::markup::escape;

/// Renders the numbered option table as marked-up text, one row per
/// candidate, each ending with a newline.
///
/// Numbers are right-aligned to the width of the option count. When any
/// candidate has a command token different from its name, a detail-marked
/// column of `token:` cells is shown, right-aligned to the widest token.
#[must_use]
pub fn options_text(visible: &[Candidate]) -> String {
    let number_width = visible.len().to_string().len();
    let command_width = visible
        .iter()
        .filter(|c| c.has_distinct_command())
        .map(|c| c.command.chars().count())
        .max();

    let mut text = String::new();
    for (position, candidate) in visible.iter().enumerate() {
        let number = format!("{:>number_width$}", position + 1);
        let label = escape(candidate.label());

        match command_width {
            Some(width) => {
                let command = if candidate.has_distinct_command() {
                    format!("{}:", candidate.command)
                } else {
                    String::new()
                };
                let cell = format!("{command:>width$}", width = width + 1);
                text.push_str(&format!(" {number}) #{}# {label}\n", escape(&cell)));
            }
            None => text.push_str(&format!(" {number}) {label}\n")),
        }
    }
    text
}
