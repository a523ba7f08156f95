use log::debug;

use super::resolve::resolve;
use super::types::{Candidate, Choice};
use super::ui::options_text;
use crate::error::Result;
use crate::io::console::ESCAPE;
use crate::level::OutputLevel;
use crate::markup::escape;
use crate::phrases;
use crate::session::Session;

impl Session {
    /// Translates options into candidates, hidden ones last.
    fn candidates<T: Choice>(&self, options: &[T]) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let name = option.display_name();
                Candidate {
                    index,
                    command: self.command_token(&name),
                    names: option
                        .names()
                        .iter()
                        .map(|name| self.translate(name))
                        .collect(),
                    name,
                    hidden: option.is_hidden(),
                }
            })
            .collect();

        candidates.sort_by_key(|c| c.hidden);
        candidates
    }

    fn choose<'a, T: Choice>(
        &mut self,
        options: &'a [T],
        title: &str,
        multiple: bool,
    ) -> Result<Vec<(usize, &'a T)>> {
        let candidates = self.candidates(options);
        let visible = candidates.iter().take_while(|c| !c.hidden).count();
        let table = options_text(&candidates[..visible]);

        let title = self.translate(title);
        let prompt = format!(
            "?{}",
            self.translate(if multiple {
                phrases::CHOOSE_MULTIPLE
            } else {
                phrases::CHOOSE_ONE
            })
        );

        loop {
            self.announce_scope()?;

            self.output.write_line(&title, &[])?;
            self.output.write_line(&table, &[])?;
            self.output.write(&prompt, &[])?;

            let answer = self.read_answer(false)?;

            if answer.trim().is_empty() {
                let blank = format!("_{}", self.translate(phrases::CHOOSE_BLANK));
                self.output.write_line(&blank, &[])?.write_line("", &[])?;
                return Ok(Vec::new());
            }

            let positions = resolve(&candidates, &answer, multiple);
            debug!("Answer `{answer}` selected {} options", positions.len());

            match positions.as_slice() {
                [] => {
                    let wrong = format!("!{}", self.translate(phrases::CHOOSE_WRONG));
                    self.output
                        .write_line(&format!("@{}", escape(&answer)), &[])?
                        .write_line("", &[])?;
                    self.output.write_line(&wrong, &[])?.write_line("", &[])?;
                }
                [position] => {
                    let candidate = &candidates[*position];
                    self.output
                        .write_line(
                            "@{1}) {0}",
                            &[&escape(candidate.label()), &(position + 1)],
                        )?
                        .write_line("", &[])?;
                    return Ok(vec![(candidate.index, &options[candidate.index])]);
                }
                _ => {
                    for position in &positions {
                        let candidate = &candidates[*position];
                        self.output
                            .write("@{1}) {0} ", &[&escape(candidate.label()), &(position + 1)])?;
                    }
                    self.output.write_line("", &[])?.write_line("", &[])?;
                    return Ok(positions
                        .iter()
                        .map(|position| {
                            let index = candidates[*position].index;
                            (index, &options[index])
                        })
                        .collect());
                }
            }
        }
    }

    /// Shows `options` and lets the user pick one.
    ///
    /// Returns the picked option with its index in `options`, or `None` when
    /// the user answered blank. Wrong answers re-prompt.
    pub fn choose_option<'a, T: Choice>(
        &mut self,
        options: &'a [T],
        title: &str,
    ) -> Result<Option<(usize, &'a T)>> {
        Ok(self.choose(options, title, false)?.into_iter().next())
    }

    /// Shows `options` and lets the user pick several with a regular
    /// expression. An empty result means the user answered blank.
    pub fn choose_options<'a, T: Choice>(
        &mut self,
        options: &'a [T],
        title: &str,
    ) -> Result<Vec<(usize, &'a T)>> {
        self.choose(options, title, true)
    }

    /// Asks the user to type `response` to confirm.
    ///
    /// `title` may reference the expected response as `{0}`.
    pub fn input_confirm(&mut self, title: &str, response: &str) -> Result<bool> {
        let question = format!("?{}", self.translate(title));
        self.output.write_line(&question, &[&response])?;
        self.output.write("?> ", &[])?;

        let answer = self.read_answer(false)?;
        let confirmed = answer.trim().to_lowercase() == response.to_lowercase();

        let notice = if confirmed {
            format!("@{}", self.translate(phrases::CONFIRMED))
        } else {
            format!("_{}", self.translate(phrases::CANCELED))
        };
        self.output.write_line(&notice, &[])?.write_line("", &[])?;

        Ok(confirmed)
    }

    /// Asks for free text. Returns the trimmed answer, empty when blank.
    pub fn input_text(&mut self, title: &str) -> Result<String> {
        self.input_text_with(title, false)
    }

    /// Like [`input_text`](Session::input_text), masking what is typed and
    /// not echoing the answer back.
    pub fn input_secret(&mut self, title: &str) -> Result<String> {
        self.input_text_with(title, true)
    }

    fn input_text_with(&mut self, title: &str, is_sensitive: bool) -> Result<String> {
        let question = format!("?{}", self.translate(title));
        self.output.write_line(&question, &[])?;
        self.output.write("?> ", &[])?;

        let answer = self.read_answer(is_sensitive)?.trim().to_string();

        let echo = if answer.is_empty() {
            format!("_{}", self.translate(phrases::CHOOSE_BLANK))
        } else if is_sensitive {
            format!("@{}", escape(&"*".repeat(answer.chars().count())))
        } else {
            format!("@{}", escape(&answer))
        };
        self.output.write_line(&echo, &[])?.write_line("", &[])?;

        Ok(answer)
    }

    /// Runs `step` repeatedly, feeding each returned control value into the
    /// next call, until it returns `None`.
    ///
    /// In an interactive session the user can press `Esc` between steps to
    /// cancel, or `P` to pause until any key. Returns `false` when cancelled.
    pub fn run_loop<T, F>(&mut self, control: T, mut step: F) -> Result<bool>
    where
        F: FnMut(&mut Session, T) -> Result<Option<T>>,
    {
        if self.is_interactive()? {
            let hint = format!("_{}", self.translate(phrases::LOOP_CONTROL));
            self.output.write_line(&hint, &[])?.write_line("", &[])?;
        }

        let mut control = control;
        loop {
            match step(self, control)? {
                Some(next) => control = next,
                None => return Ok(true),
            }

            if !self.is_interactive()? || !self.input.has_read()? {
                continue;
            }

            match self.input.read_key()? {
                ESCAPE => {
                    self.stop_busy()?;
                    let canceled = format!("_{}", self.translate(phrases::LOOP_CANCELED));
                    self.output.write_line("", &[])?.write_line(&canceled, &[])?;
                    return Ok(false);
                }
                'p' | 'P' => {
                    self.stop_busy()?;
                    let paused = format!("_{}", self.translate(phrases::LOOP_PAUSED));
                    self.output
                        .write_line("", &[])?
                        .write_line(&paused, &[])?
                        .write_line("", &[])?;
                    self.read_key()?;
                }
                _ => {}
            }
        }
    }

    /// Writes the closing result of a command-line run: shown even when the
    /// output is filtered to results only.
    pub fn write_result(&mut self, format: &str, args: &[&dyn std::fmt::Display]) -> Result<()> {
        self.output.with_level(OutputLevel::COMMAND_LINE, |output| {
            output.write_line(format, args)?;
            Ok(())
        })
    }

    fn is_interactive(&self) -> Result<bool> {
        Ok(self.output.level_filter()?.is_interactive_filter())
    }
}
