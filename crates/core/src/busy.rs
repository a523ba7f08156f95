//! Spinner shown while a long operation runs.

use std::io::Write;
use std::mem;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};
use log::{debug, warn};

use crate::error::{Error, Result};

const SPRITES: [char; 4] = ['-', '\\', '|', '/'];

/// Time between two spinner frames.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(100);

enum State<W> {
    Idle(W),
    Running {
        stop: Sender<()>,
        handle: JoinHandle<W>,
    },
    Lost,
}

/// Animates a spinner on its own thread, writing each sprite followed by a
/// backspace so the next frame overwrites it.
///
/// The writer moves into the animation thread while running and comes back
/// when the indicator stops.
pub struct BusyIndicator<W: Write + Send + 'static> {
    state: State<W>,
    interval: Duration,
}

impl<W: Write + Send + 'static> BusyIndicator<W> {
    pub fn new(writer: W) -> Self {
        Self {
            state: State::Idle(writer),
            interval: DEFAULT_FRAME_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Starts animating. Does nothing if already running.
    pub fn start(&mut self) {
        if !matches!(self.state, State::Idle(_)) {
            return;
        }
        let State::Idle(mut writer) = mem::replace(&mut self.state, State::Lost) else {
            return;
        };

        let (stop, stopped) = bounded::<()>(1);
        let ticker = tick(self.interval);

        let handle = thread::spawn(move || {
            let mut frame = 0;
            loop {
                select! {
                    recv(stopped) -> _ => {
                        let _ = write!(writer, "\u{8} \u{8}");
                        let _ = writer.flush();
                        return writer;
                    }
                    recv(ticker) -> _ => {
                        let _ = write!(writer, "{}\u{8}", SPRITES[frame % SPRITES.len()]);
                        let _ = writer.flush();
                        frame += 1;
                    }
                }
            }
        });

        debug!("Busy indicator started");
        self.state = State::Running { stop, handle };
    }

    /// Stops animating and erases the last frame. Does nothing if idle.
    ///
    /// # Errors
    ///
    /// Returns an error if the animation thread panicked; the writer is lost
    /// and later starts do nothing.
    pub fn stop(&mut self) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        let State::Running { stop, handle } = mem::replace(&mut self.state, State::Lost) else {
            return Ok(());
        };

        let _ = stop.send(());
        match handle.join() {
            Ok(writer) => {
                self.state = State::Idle(writer);
                debug!("Busy indicator stopped");
                Ok(())
            }
            Err(_) => {
                warn!("Busy indicator thread panicked");
                Err(Error::Misc("busy indicator thread panicked".to_string()))
            }
        }
    }

    /// Stops the indicator and hands the writer back.
    pub fn into_inner(mut self) -> Result<W> {
        self.stop()?;
        match mem::replace(&mut self.state, State::Lost) {
            State::Idle(writer) => Ok(writer),
            _ => Err(Error::Misc("busy indicator writer lost".to_string())),
        }
    }
}

impl<W: Write + Send + 'static> Drop for BusyIndicator<W> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
