//! File-backed providers: a watched answers file and a log file.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info};

use super::{MenuScope, Reader, SentinelLatch, SinkLevels, Writer};
use crate::error::{Error, Result};
use crate::level::OutputLevel;
use crate::markup::{StyledRun, BACKSPACE};

/// How often a [`FileReader`] looks at its file.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_millis(1000);

fn io_error(file_description: &str, path: &Path, e: std::io::Error) -> Error {
    Error::io_error(
        file_description.to_string(),
        path.display().to_string(),
        e,
    )
}

fn create_empty(file_description: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(file_description, path, e))?;
    }
    File::create(path).map_err(|e| io_error(file_description, path, e))?;
    Ok(())
}

/// Reads answers that another process appends, one per line, to a file.
///
/// The file is emptied when the reader is created. Each read consumes the
/// first line and rewrites the rest. Checks for new content are throttled to
/// one per interval; in between, the previous result is reported.
#[derive(Debug)]
pub struct FileReader {
    path: PathBuf,
    interval: Duration,
    last_check: Option<Instant>,
    last_has_read: bool,
    latch: SentinelLatch,
}

impl FileReader {
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        create_empty("input", &path)?;
        info!("Watching `{}` for answers", path.display());

        Ok(Self {
            path,
            interval: DEFAULT_CHECK_INTERVAL,
            last_check: None,
            last_has_read: false,
            latch: SentinelLatch::default(),
        })
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_lines(&self) -> Result<Vec<String>> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| io_error("input", &self.path, e))?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

impl Reader for FileReader {
    fn read(&mut self, _is_sensitive: bool) -> Result<Option<String>> {
        if self.latch.is_latched() {
            return Ok(Some(String::new()));
        }

        self.last_check = None;

        let mut lines = self.load_lines()?;
        if lines.is_empty() {
            return Ok(None);
        }

        let answer = lines.remove(0);
        let mut rest = lines.join("\n");
        if !rest.is_empty() {
            rest.push('\n');
        }
        fs::write(&self.path, rest).map_err(|e| io_error("input", &self.path, e))?;

        debug!("Answer read from `{}`", self.path.display());
        Ok(Some(self.latch.filter(answer)))
    }

    fn has_read(&mut self, scope: MenuScope) -> Result<bool> {
        if self.latch.poll(scope) {
            return Ok(true);
        }

        if let Some(last_check) = self.last_check {
            if last_check.elapsed() <= self.interval {
                return Ok(self.last_has_read);
            }
        }

        self.last_check = Some(Instant::now());
        self.last_has_read = !self.load_lines()?.is_empty();
        Ok(self.last_has_read)
    }

    fn read_key(&mut self) -> Result<char> {
        Ok(self
            .read(false)?
            .and_then(|answer| answer.chars().next())
            .unwrap_or('\0'))
    }
}

/// Appends everything written to a log file.
///
/// A backspace removes the previous character, unless it ends a line.
#[derive(Debug)]
pub struct FileWriter {
    path: PathBuf,
    levels: SinkLevels,
}

impl FileWriter {
    /// Creates (or truncates) the log file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        create_empty("log", &path)?;
        info!("Writing session log to `{}`", path.display());

        Ok(Self {
            path,
            levels: SinkLevels::default(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, text: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        file.seek(SeekFrom::End(0))?;

        let mut buffer = [0u8; 4];
        for c in text.chars() {
            if c == BACKSPACE {
                erase_previous(&mut file)?;
            } else {
                file.write_all(c.encode_utf8(&mut buffer).as_bytes())?;
            }
        }

        let end = file.stream_position()?;
        file.set_len(end)?;
        Ok(())
    }
}

/// Moves the cursor back over the previous character, unless it is a line
/// break. Multi-byte characters are removed whole.
fn erase_previous(file: &mut File) -> std::io::Result<()> {
    let mut byte = [0u8; 1];
    loop {
        if file.stream_position()? == 0 {
            return Ok(());
        }

        file.seek(SeekFrom::Current(-1))?;
        file.read_exact(&mut byte)?;

        // UTF-8 continuation byte, keep walking back
        if byte[0] & 0xC0 == 0x80 {
            file.seek(SeekFrom::Current(-1))?;
            continue;
        }

        if byte[0] != b'\n' {
            file.seek(SeekFrom::Current(-1))?;
        }
        return Ok(());
    }
}

impl Writer for FileWriter {
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
        self.append(&run.text)
            .map_err(|e| io_error("log", &self.path, e))
    }
}
