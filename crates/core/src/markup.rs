//! Inline markup for console output.
//!
//! Text written through the engine may carry single-character marks that
//! style the words between them:
//!
//! | Mark | Meaning |
//! |------|---------|
//! | `^`  | title |
//! | `*`  | highlight |
//! | `#`  | detail |
//! | `_`  | hint |
//! | `!`  | error |
//! | `?`  | question |
//! | `@`  | answer |
//! | `$`  | everything after this is literal |
//!
//! A mark opens a scope and the same mark closes it (`"Some *word* here"`);
//! different marks nest. A doubled mark is a literal character (`"100%% **"`
//! renders `*`). A newline always resets styling.
//!
//! # Examples
//!
//! ```
//! use menucon_core::markup::{parse, Mark};
//!
//! let runs = parse("Pick *one*");
//! assert_eq!(runs[0].text, "Pick ");
//! assert_eq!(runs[1].text, "one");
//! assert_eq!(runs[1].mark, Mark::Highlight);
//! ```

use std::fmt::{Display, Formatter};

/// Line ending handed to sinks in place of `\n`.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line ending handed to sinks in place of `\n`.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Character a sink must treat as "erase the previous character".
pub const BACKSPACE: char = '\u{8}';

/// Style tag carried by a [`StyledRun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    None,
    NewLine,
    Ignore,
    Title,
    Highlight,
    Detail,
    Hint,
    Error,
    Question,
    Answer,
}

impl Mark {
    /// Marks that are doubled by [`escape`]. Everything except the newline.
    pub const ESCAPABLE: [Mark; 8] = [
        Mark::Ignore,
        Mark::Title,
        Mark::Highlight,
        Mark::Detail,
        Mark::Hint,
        Mark::Error,
        Mark::Question,
        Mark::Answer,
    ];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Mark::None => '\0',
            Mark::NewLine => '\n',
            Mark::Ignore => '$',
            Mark::Title => '^',
            Mark::Highlight => '*',
            Mark::Detail => '#',
            Mark::Hint => '_',
            Mark::Error => '!',
            Mark::Question => '?',
            Mark::Answer => '@',
        }
    }

    /// Maps a character to the scope mark it stands for, if any.
    ///
    /// Newline is not a scope mark and is never returned here.
    #[must_use]
    pub fn from_char(c: char) -> Option<Mark> {
        Mark::ESCAPABLE.into_iter().find(|mark| mark.as_char() == c)
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::None => f.write_str(""),
            mark => write!(f, "{}", mark.as_char()),
        }
    }
}

/// A span of text sharing one mark. The unit handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub mark: Mark,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, mark: Mark) -> Self {
        Self {
            text: text.into(),
            mark,
        }
    }
}

/// Doubles every mark character so `text` renders literally.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        escaped.push(c);
        if Mark::from_char(c).is_some() {
            escaped.push(c);
        }
    }
    escaped
}

/// Renders marked-up `text`, calling `write` once per styled run.
///
/// # Errors
///
/// Stops at, and returns, the first error produced by `write`.
pub fn render<E, F>(text: &str, mut write: F) -> Result<(), E>
where
    F: FnMut(StyledRun) -> Result<(), E>,
{
    let text = text.replace('\r', "");
    let chars: Vec<char> = text.chars().collect();

    let mut marks: Vec<Mark> = Vec::new();
    let mut current = String::new();

    let top = |marks: &[Mark]| marks.last().copied().unwrap_or(Mark::None);

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            current.push_str(LINE_ENDING);
            write(StyledRun::new(std::mem::take(&mut current), top(&marks)))?;
            marks.clear();
        } else if let Some(mark) = Mark::from_char(c) {
            if chars.get(i + 1) == Some(&c) {
                current.push(c);
                i += 1;
            } else if mark == Mark::Ignore {
                if !current.is_empty() {
                    write(StyledRun::new(std::mem::take(&mut current), top(&marks)))?;
                }
                current.extend(&chars[i + 1..]);
                break;
            } else {
                if !current.is_empty() {
                    write(StyledRun::new(std::mem::take(&mut current), top(&marks)))?;
                }

                if top(&marks) == mark {
                    marks.pop();
                } else {
                    marks.push(mark);
                }
            }
        } else {
            current.push(c);
        }

        i += 1;
    }

    if !current.is_empty() {
        write(StyledRun::new(current, top(&marks)))?;
    }

    Ok(())
}

/// Emits `text` as a single run tagged `raw_mark`, without interpreting marks.
///
/// The text is escaped first, exactly as [`escape`] does.
///
/// # Errors
///
/// Returns the error produced by `write`.
pub fn render_raw<E, F>(text: &str, raw_mark: Mark, mut write: F) -> Result<(), E>
where
    F: FnMut(StyledRun) -> Result<(), E>,
{
    let text = escape(&text.replace('\r', ""));
    if text.is_empty() {
        return Ok(());
    }
    write(StyledRun::new(text, raw_mark))
}

/// Collects the runs [`render`] produces for `text`.
#[must_use]
pub fn parse(text: &str) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    let _ = render::<std::convert::Infallible, _>(text, |run| {
        runs.push(run);
        Ok(())
    });
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, mark: Mark) -> StyledRun {
        StyledRun::new(text, mark)
    }

    #[test]
    fn test_plain_text_is_one_run() {
        assert_eq!(parse("hello world"), vec![run("hello world", Mark::None)]);
    }

    #[test]
    fn test_escape_round_trip_for_every_mark() {
        for mark in Mark::ESCAPABLE {
            let c = mark.as_char();
            let original = format!("a{c}b{c}{c}c{c}");
            let runs = parse(&escape(&original));
            assert_eq!(runs, vec![run(&original, Mark::None)], "mark {c:?}");
        }
    }

    #[test]
    fn test_escape_doubles_marks_only() {
        assert_eq!(escape("50% off! *now*"), "50% off!! **now**");
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a\nb"), "a\nb");
    }

    #[test]
    fn test_toggle_open_close_then_escaped_literal() {
        for mark in [
            Mark::Title,
            Mark::Highlight,
            Mark::Detail,
            Mark::Hint,
            Mark::Error,
            Mark::Question,
            Mark::Answer,
        ] {
            let m = mark.as_char();
            let runs = parse(&format!("{m}a{m}b{m}{m}"));
            assert_eq!(
                runs,
                vec![run("a", mark), run(&format!("b{m}"), Mark::None)],
                "mark {m:?}"
            );
        }
    }

    #[test]
    fn test_newline_resets_style() {
        let runs = parse("^title\nplain");
        assert_eq!(
            runs,
            vec![
                run(&format!("title{LINE_ENDING}"), Mark::Title),
                run("plain", Mark::None)
            ]
        );
    }

    #[test]
    fn test_different_marks_nest() {
        let runs = parse("*outer #inner# back*");
        assert_eq!(
            runs,
            vec![
                run("outer ", Mark::Highlight),
                run("inner", Mark::Detail),
                run(" back", Mark::Highlight),
            ]
        );
    }

    #[test]
    fn test_closing_unopened_mark_never_underflows() {
        // The second `*` closes, the third opens a scope that is never closed.
        let runs = parse("a*b*c*d");
        assert_eq!(
            runs,
            vec![
                run("a", Mark::None),
                run("b", Mark::Highlight),
                run("c", Mark::None),
                run("d", Mark::Highlight),
            ]
        );
    }

    #[test]
    fn test_ignore_mark_keeps_the_rest_verbatim() {
        let runs = parse("?Question$ *not* styled\nstill raw");
        assert_eq!(
            runs,
            vec![
                run("Question", Mark::Question),
                run(" *not* styled\nstill raw", Mark::Question),
            ]
        );
    }

    #[test]
    fn test_carriage_returns_are_stripped() {
        let runs = parse("one\r\ntwo");
        assert_eq!(
            runs,
            vec![
                run(&format!("one{LINE_ENDING}"), Mark::None),
                run("two", Mark::None)
            ]
        );
    }

    #[test]
    fn test_lone_newline_is_emitted() {
        assert_eq!(parse("\n"), vec![run(LINE_ENDING, Mark::None)]);
    }

    #[test]
    fn test_backspace_passes_through_to_sink() {
        let runs = parse("ab\u{8}");
        assert_eq!(runs, vec![run("ab\u{8}", Mark::None)]);
    }

    #[test]
    fn test_render_raw_is_single_escaped_run() {
        let mut runs = Vec::new();
        render_raw::<(), _>("*raw* text", Mark::Answer, |r| {
            runs.push(r);
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![run("**raw** text", Mark::Answer)]);
    }

    #[test]
    fn test_render_stops_at_first_write_error() {
        let mut calls = 0;
        let result = render("*a* b *c*", |_| {
            calls += 1;
            Err("sink closed")
        });
        assert_eq!(result, Err("sink closed"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_mark_from_char() {
        assert_eq!(Mark::from_char('^'), Some(Mark::Title));
        assert_eq!(Mark::from_char('@'), Some(Mark::Answer));
        assert_eq!(Mark::from_char('\n'), None);
        assert_eq!(Mark::from_char('a'), None);
    }
}
