//! A cancellable counting loop.

use std::thread;
use std::time::Duration;

use log::debug;
use menucon_core::error::Result;
use menucon_core::markup::escape;
use menucon_core::registry::Module;
use menucon_core::session::Session;

pub const NAME: &str = "Counter";
pub const ASK_TARGET: &str = "Count up to:";
pub const NOT_A_NUMBER: &str = "\"{0}\" is not a number.";
pub const COUNTED: &str = "Counted to {0}.";

const DEFAULT_STEP: Duration = Duration::from_millis(250);

/// Counts up to a number typed by the user, one step at a time, with the
/// busy indicator spinning while each step runs. A blank answer goes back.
///
/// The count reached is written as a result, so scripted runs that only
/// show results still print it.
pub struct Counter {
    step: Duration,
}

impl Counter {
    #[must_use]
    pub fn with_step(step: Duration) -> Self {
        Self { step }
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::with_step(DEFAULT_STEP)
    }
}

impl Module for Counter {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, session: &mut Session) -> Result<()> {
        let answer = session.input_text(ASK_TARGET)?;
        if answer.is_empty() {
            return Ok(());
        }
        let Ok(target) = answer.parse::<u32>() else {
            let error = format!("!{}", session.translate(NOT_A_NUMBER));
            session
                .output
                .write_line(&error, &[&escape(&answer)])?
                .write_line("", &[])?;
            return Ok(());
        };

        let mut reached = 0;
        let completed = session.run_loop(0, |session, count| {
            if count >= target {
                return Ok(None);
            }
            session.start_busy();
            thread::sleep(self.step);
            session.stop_busy()?;

            let next = count + 1;
            reached = next;
            session.output.write_line("#{0}", &[&next])?;
            Ok(Some(next))
        })?;
        debug!("Counter stopped at {reached} of {target}, completed: {completed}");

        let counted = session.translate(COUNTED);
        session.write_result(&counted, &[&reached])?;
        session.output.write_line("", &[])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use menucon_core::busy::BusyIndicator;
    use menucon_core::io::{
        CommandLineReader, InputMultiplexer, OutputMultiplexer, SinkLevels, Writer,
    };
    use menucon_core::level::OutputLevel;
    use menucon_core::markup::StyledRun;
    use menucon_core::phrases::LOOP_CONTROL;
    use menucon_core::registry::ModuleRegistry;
    use menucon_core::session::BusyWriter;
    use menucon_core::translate::Translations;

    use super::*;

    /// Spinner frames and screen output, in the order they happened.
    #[derive(Clone, Default)]
    struct Events(Arc<Mutex<Vec<String>>>);

    impl Events {
        fn push(&self, event: String) {
            self.0.lock().unwrap().push(event);
        }

        fn all(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct Spinner(Events);

    impl Write for Spinner {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.push(format!("busy:{}", String::from_utf8_lossy(buf)));
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Screen {
        events: Events,
        levels: SinkLevels,
    }

    impl Writer for Screen {
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
            if self.can_write() {
                self.events.push(format!("out:{}", run.text));
            }
            Ok(())
        }
    }

    fn counting_session(answers: &[&str], events: &Events) -> Session {
        let mut output = OutputMultiplexer::new();
        output.add(Box::new(Screen {
            events: events.clone(),
            levels: SinkLevels::default(),
        }));
        let mut input = InputMultiplexer::new();
        input.add(Box::new(CommandLineReader::new(answers.iter().copied())));

        let spinner: BusyWriter = Box::new(Spinner(events.clone()));
        Session::new(output, input, Translations::new(), "", ModuleRegistry::new())
            .with_busy_indicator(BusyIndicator::new(spinner).with_interval(Duration::from_millis(1)))
    }

    #[test]
    fn test_spinner_is_stopped_whenever_output_is_written() {
        let events = Events::default();
        let mut session = counting_session(&["3"], &events);

        Counter::with_step(Duration::from_millis(20))
            .run(&mut session)
            .unwrap();

        let events = events.all();
        let hint = events
            .iter()
            .position(|event| event.contains(LOOP_CONTROL))
            .unwrap();
        assert!(!events[..hint].iter().any(|event| event.starts_with("busy:")));
        assert!(events.iter().any(|event| event.starts_with("busy:")));

        let mut spinning = false;
        for event in &events {
            match event.strip_prefix("busy:") {
                Some(frame) if frame.chars().any(|c| "-\\|/".contains(c)) => spinning = true,
                Some(frame) if frame.contains(' ') => spinning = false,
                Some(_) => {}
                None => assert!(!spinning, "written while spinning: {event:?}"),
            }
        }
        assert!(events.iter().any(|event| event.contains("Counted to 3.")));
    }

    #[test]
    fn test_blank_target_goes_back() {
        let events = Events::default();
        let mut session = counting_session(&[""], &events);

        Counter::with_step(Duration::from_millis(20))
            .run(&mut session)
            .unwrap();

        let events = events.all();
        assert!(!events.iter().any(|event| event.starts_with("busy:")));
        assert!(!events.iter().any(|event| event.contains("Counted to")));
    }
}
