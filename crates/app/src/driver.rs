use std::io::{self, BufRead, Write};

use quiz_core::model::{DifficultyFilter, QuizSettings};
use services::{Advance, QuizService, QuizSession};
use tracing::{debug, warn};
use ui::views::ViewError;
use ui::vm::{FeedbackVm, QuestionVm, ResultsVm, map_review_items, start_session};
use ui::{render_feedback, render_question, render_results, render_review};

use crate::input::{Command, HELP};

/// How a quiz run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Finished,
    Quit,
}

/// Line-driven quiz loop over any reader and writer.
///
/// Owns the session for its whole life; the renderers only see view models.
pub struct Driver<R, W> {
    input: R,
    out: W,
    service: QuizService,
    settings: QuizSettings,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    pub fn new(service: QuizService, settings: QuizSettings, input: R, out: W) -> Self {
        Self {
            input,
            out,
            service,
            settings,
        }
    }

    /// Play quizzes until the user quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            let Some(mut session) = self.open_session()? else {
                return Ok(());
            };

            if self.play(&mut session)? == Flow::Quit {
                return Ok(());
            }

            let results = ResultsVm::from_session(&session)?;
            render_results(&mut self.out, &results)?;

            if !self.after_results(&session)? {
                return Ok(());
            }
            debug!("restarting with the same settings");
        }
    }

    fn read_command(&mut self) -> io::Result<Option<Command>> {
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(Command::parse(&line)))
    }

    /// Start a session, asking for another difficulty while the filter matches nothing.
    fn open_session(&mut self) -> Result<Option<QuizSession>, Box<dyn std::error::Error>> {
        loop {
            match start_session(&self.service, self.settings) {
                Ok(session) => return Ok(Some(session)),
                Err(ViewError::EmptySession) => {
                    warn!(difficulty = %self.settings.difficulty(), "no questions for settings");
                    writeln!(self.out, "{}", ViewError::EmptySession.message())?;
                    write!(
                        self.out,
                        "Difficulty (all, basic, intermediate, advanced) or `quit`: "
                    )?;
                    self.out.flush()?;

                    let mut line = String::new();
                    if self.input.read_line(&mut line)? == 0 {
                        return Ok(None);
                    }
                    let line = line.trim();
                    if matches!(Command::parse(line), Command::Quit) {
                        return Ok(None);
                    }
                    match line.parse::<DifficultyFilter>() {
                        Ok(filter) => self.settings = self.settings.with_difficulty(filter),
                        Err(err) => writeln!(self.out, "{err}")?,
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn show_question(&mut self, session: &QuizSession) -> io::Result<()> {
        render_question(&mut self.out, &QuestionVm::from_session(session))
    }

    fn play(&mut self, session: &mut QuizSession) -> Result<Flow, Box<dyn std::error::Error>> {
        self.show_question(session)?;

        loop {
            let Some(command) = self.read_command()? else {
                return Ok(Flow::Quit);
            };

            match command {
                Command::Select(ids) => {
                    if session.is_current_submitted() {
                        writeln!(self.out, "Already submitted. Enter `next` to continue.")?;
                        continue;
                    }
                    for id in &ids {
                        if !session.select(id) && !session.select(&id.to_uppercase()) {
                            writeln!(self.out, "No choice `{id}` on this question.")?;
                        }
                    }
                    self.show_question(session)?;
                }
                Command::Submit => self.submit(session)?,
                Command::Next => {
                    if self.advance(session)? == Some(Flow::Finished) {
                        return Ok(Flow::Finished);
                    }
                }
                Command::Empty => {
                    if session.is_current_submitted() {
                        if self.advance(session)? == Some(Flow::Finished) {
                            return Ok(Flow::Finished);
                        }
                    } else if session.can_submit() {
                        self.submit(session)?;
                    }
                }
                Command::Review | Command::Restart => {
                    writeln!(self.out, "Finish the quiz first.")?;
                }
                Command::Help => writeln!(self.out, "{HELP}")?,
                Command::Quit => return Ok(Flow::Quit),
            }
        }
    }

    fn submit(&mut self, session: &mut QuizSession) -> io::Result<()> {
        match session.submit() {
            Some(result) => {
                self.show_question(session)?;
                render_feedback(&mut self.out, &FeedbackVm::from(&result))
            }
            None if session.is_current_submitted() => {
                writeln!(self.out, "Already submitted. Enter `next` to continue.")
            }
            None => writeln!(self.out, "Select at least one choice first."),
        }
    }

    fn advance(&mut self, session: &mut QuizSession) -> io::Result<Option<Flow>> {
        match session.advance() {
            Advance::Next => {
                self.show_question(session)?;
                Ok(None)
            }
            Advance::Finished => Ok(Some(Flow::Finished)),
            Advance::Unanswered => {
                writeln!(self.out, "Submit an answer first.")?;
                Ok(None)
            }
        }
    }

    /// Results menu. Returns `true` when the user asked to restart.
    fn after_results(&mut self, session: &QuizSession) -> Result<bool, Box<dyn std::error::Error>> {
        loop {
            writeln!(self.out, "Enter `review`, `restart` or `quit`.")?;
            let Some(command) = self.read_command()? else {
                return Ok(false);
            };

            match command {
                Command::Review => {
                    let items = map_review_items(&session.review()?);
                    render_review(&mut self.out, &items)?;
                }
                Command::Restart => return Ok(true),
                Command::Quit => return Ok(false),
                Command::Help => writeln!(self.out, "{HELP}")?,
                _ => {}
            }
        }
    }
}
