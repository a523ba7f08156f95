//! Terminal providers built on crossterm.

use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::cursor::MoveLeft;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, is_raw_mode_enabled, Clear, ClearType,
};
use crossterm::{execute, queue};
use log::debug;

use super::{MenuScope, Reader, Sentinel, SentinelLatch, SinkLevels, Writer};
use crate::error::Result;
use crate::level::OutputLevel;
use crate::markup::{Mark, StyledRun, BACKSPACE};

/// Key reported when the user asks to stop.
pub const ESCAPE: char = '\u{1b}';

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Foreground color for each mark.
#[must_use]
pub fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::Title => Color::White,
        Mark::Highlight => Color::DarkCyan,
        Mark::Detail => Color::DarkGrey,
        Mark::Hint => Color::Magenta,
        Mark::Error => Color::Red,
        Mark::Question => Color::DarkYellow,
        Mark::Answer => Color::Yellow,
        Mark::None | Mark::NewLine | Mark::Ignore => Color::Reset,
    }
}

/// Writes colored text to the terminal.
///
/// A backspace erases the previous character on screen.
pub struct ConsoleWriter<W: Write = Stdout> {
    out: W,
    levels: SinkLevels,
}

impl ConsoleWriter<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(stdout())
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            levels: SinkLevels::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Writer for ConsoleWriter<W> {
    fn level(&self) -> OutputLevel {
        self.levels.level
    }

    fn set_level(&mut self, level: OutputLevel) {
        self.levels.level = level;
    }

    fn level_filter(&self) -> OutputLevel {
        self.levels.filter
    }

    fn set_level_filter(&mut self, filter: OutputLevel) {
        self.levels.filter = filter;
    }

    fn write_now(&mut self, run: StyledRun) -> Result<()> {
        if !self.can_write() {
            return Ok(());
        }

        // In raw mode the terminal no longer returns the carriage on its own
        let mut text = run.text.replace(BACKSPACE, "\u{8} \u{8}");
        if is_raw_mode_enabled().unwrap_or(false) {
            text = text.replace("\r\n", "\n").replace('\n', "\r\n");
        }

        queue!(
            self.out,
            SetForegroundColor(mark_color(run.mark)),
            Print(text),
            ResetColor
        )?;
        self.out.flush()?;
        Ok(())
    }
}

/// Maps a key press to the character reported by [`Reader::read_key`].
#[must_use]
pub fn key_to_char(key: &KeyEvent) -> char {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => ESCAPE,
        KeyCode::Char(c) => c,
        KeyCode::Esc => ESCAPE,
        KeyCode::Enter => '\r',
        KeyCode::Tab => '\t',
        KeyCode::Backspace => BACKSPACE,
        _ => '\0',
    }
}

/// Reads answers typed at the terminal.
///
/// The terminal stays in raw mode for the reader's lifetime so key presses
/// can be polled without blocking. Typed text is echoed by the reader itself,
/// masked with `*` for sensitive answers. Ctrl+C behaves like the exit
/// answer.
pub struct ConsoleReader {
    pending: Option<KeyEvent>,
    latch: SentinelLatch,
    _raw_mode: RawModeGuard,
}

impl ConsoleReader {
    /// # Errors
    ///
    /// Fails when standard input is not a terminal.
    pub fn new() -> Result<Self> {
        let raw_mode = RawModeGuard::enable()?;
        debug!("Console input enabled");
        Ok(Self {
            pending: None,
            latch: SentinelLatch::default(),
            _raw_mode: raw_mode,
        })
    }

    fn next_key(&mut self) -> Result<KeyEvent> {
        if let Some(key) = self.pending.take() {
            return Ok(key);
        }

        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }

    fn echo(text: &str) -> Result<()> {
        execute!(stdout(), Print(text))?;
        Ok(())
    }
}

/// Wipes `typed` characters echoed on the current line, leaving the cursor
/// where typing started. The answer is echoed again by the menus.
fn erase_typed<W: Write>(out: &mut W, typed: usize) -> Result<()> {
    if typed > 0 {
        let columns = u16::try_from(typed).unwrap_or(u16::MAX);
        queue!(out, MoveLeft(columns), Clear(ClearType::UntilNewLine))?;
    }
    out.flush()?;
    Ok(())
}

impl Reader for ConsoleReader {
    fn read(&mut self, is_sensitive: bool) -> Result<Option<String>> {
        if self.latch.is_latched() {
            return Ok(Some(String::new()));
        }

        let mut line = String::new();
        loop {
            let key = self.next_key()?;
            match key.code {
                KeyCode::Enter => {
                    erase_typed(&mut stdout(), line.chars().count())?;
                    return Ok(Some(self.latch.filter(line)));
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    erase_typed(&mut stdout(), line.chars().count())?;
                    self.latch.latch(Sentinel::Exit);
                    return Ok(Some(String::new()));
                }
                KeyCode::Backspace => {
                    if line.pop().is_some() {
                        Self::echo("\u{8} \u{8}")?;
                    }
                }
                KeyCode::Char(c) => {
                    line.push(c);
                    if is_sensitive {
                        Self::echo("*")?;
                    } else {
                        Self::echo(c.encode_utf8(&mut [0u8; 4]))?;
                    }
                }
                _ => {}
            }
        }
    }

    fn has_read(&mut self, scope: MenuScope) -> Result<bool> {
        if self.latch.poll(scope) {
            return Ok(true);
        }
        if self.pending.is_some() {
            return Ok(true);
        }

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.pending = Some(key);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn read_key(&mut self) -> Result<char> {
        if self.latch.is_latched() {
            return Ok('\0');
        }
        let key = self.next_key()?;
        Ok(key_to_char(&key))
    }
}
