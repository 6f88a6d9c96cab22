use std::sync::Arc;

use tracing::debug;

use crate::content::validate_catalog;
use crate::dictionary::{merge, EffectiveDictionary};
use crate::error::LessonResult;
use crate::lesson::{Lesson, LessonCatalog, LessonStep};
use crate::session::{Completion, TerminalConfig, TerminalSession, DEFAULT_PROMPT};

/// A navigation request from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepTransition {
    NextStep,
    PreviousStep,
    GoToStep(usize),
    /// Only honored on the last step of the current lesson
    NextLesson,
    /// Only honored on the first step of the current lesson
    PreviousLesson,
    GoToLesson(String),
}

/// Tracks the active lesson and step and owns that step's terminal
///
/// Every change of step builds a new effective dictionary and a fresh
/// [`TerminalSession`]; scrollback and recall never carry over between steps.
#[derive(Debug)]
pub struct LessonStepController {
    catalog: Arc<LessonCatalog>,
    lesson_index: usize,
    step_index: usize,
    effective: EffectiveDictionary,
    session: TerminalSession,
    prompt: String,
}

impl LessonStepController {
    /// Start on the first step of the first lesson
    pub fn new(catalog: Arc<LessonCatalog>) -> LessonResult<Self> {
        validate_catalog(&catalog)?;

        let effective = merge(
            &catalog.global_commands,
            &catalog.lessons[0].steps[0].terminal_commands,
        );
        Ok(Self {
            catalog,
            lesson_index: 0,
            step_index: 0,
            effective,
            session: TerminalSession::new(),
            prompt: DEFAULT_PROMPT.to_string(),
        })
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn catalog(&self) -> &LessonCatalog {
        &self.catalog
    }

    pub fn lesson_index(&self) -> usize {
        self.lesson_index
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn current_lesson(&self) -> &Lesson {
        &self.catalog.lessons[self.lesson_index]
    }

    pub fn current_step(&self) -> &LessonStep {
        &self.current_lesson().steps[self.step_index]
    }

    /// Animation the presentation layer should show for the active step
    pub fn animation_key(&self) -> &str {
        &self.current_step().animation_key
    }

    pub fn effective_dictionary(&self) -> &EffectiveDictionary {
        &self.effective
    }

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    /// (1-based step number, steps in the current lesson)
    pub fn progress(&self) -> (usize, usize) {
        (self.step_index + 1, self.current_lesson().steps.len())
    }

    pub fn can_go_next_step(&self) -> bool {
        self.step_index + 1 < self.current_lesson().steps.len()
    }

    pub fn can_go_previous_step(&self) -> bool {
        self.step_index > 0
    }

    pub fn can_go_next_lesson(&self) -> bool {
        !self.can_go_next_step() && self.lesson_index + 1 < self.catalog.lessons.len()
    }

    pub fn can_go_previous_lesson(&self) -> bool {
        !self.can_go_previous_step() && self.lesson_index > 0
    }

    /// Apply a navigation request; returns whether the active step changed
    ///
    /// Requests that cannot be honored are ignored.
    pub fn transition(&mut self, transition: StepTransition) -> bool {
        match transition {
            StepTransition::NextStep => self.next_step(),
            StepTransition::PreviousStep => self.previous_step(),
            StepTransition::GoToStep(index) => self.go_to_step(index),
            StepTransition::NextLesson => self.next_lesson(),
            StepTransition::PreviousLesson => self.previous_lesson(),
            StepTransition::GoToLesson(slug) => self.go_to_lesson(&slug),
        }
    }

    pub fn go_to_step(&mut self, index: usize) -> bool {
        if index >= self.current_lesson().steps.len() || index == self.step_index {
            return false;
        }
        self.enter(self.lesson_index, index);
        true
    }

    pub fn next_step(&mut self) -> bool {
        if !self.can_go_next_step() {
            return false;
        }
        self.enter(self.lesson_index, self.step_index + 1);
        true
    }

    pub fn previous_step(&mut self) -> bool {
        if !self.can_go_previous_step() {
            return false;
        }
        self.enter(self.lesson_index, self.step_index - 1);
        true
    }

    pub fn next_lesson(&mut self) -> bool {
        if !self.can_go_next_lesson() {
            return false;
        }
        self.enter(self.lesson_index + 1, 0);
        true
    }

    pub fn previous_lesson(&mut self) -> bool {
        if !self.can_go_previous_lesson() {
            return false;
        }
        self.enter(self.lesson_index - 1, 0);
        true
    }

    /// Open a lesson by slug at its first step
    pub fn go_to_lesson(&mut self, slug: &str) -> bool {
        match self.catalog.lesson_index(slug) {
            Some(index) if (index, 0) != (self.lesson_index, self.step_index) => {
                self.enter(index, 0);
                true
            }
            _ => false,
        }
    }

    fn enter(&mut self, lesson_index: usize, step_index: usize) {
        self.lesson_index = lesson_index;
        self.step_index = step_index;

        let step = &self.catalog.lessons[lesson_index].steps[step_index];
        self.effective = merge(&self.catalog.global_commands, &step.terminal_commands);
        self.session = TerminalSession::new();

        debug!(
            lesson = %self.catalog.lessons[lesson_index].slug,
            step = step_index,
            commands = self.effective.len(),
            "Entered step"
        );
    }

    /// Terminal presentation for the active step
    ///
    /// The banner lists every command of the effective dictionary, global
    /// ones included, so it always agrees with `help`.
    pub fn terminal_config(&self) -> TerminalConfig {
        let (step, total) = self.progress();
        let mut messages = vec![format!(
            "{} - step {}/{}: {}",
            self.current_lesson().title,
            step,
            total,
            self.current_step().title
        )];

        if !self.effective.is_empty() {
            messages.push("Available commands for this step:".to_string());
            for command in self.effective.sorted_commands() {
                let line = match self.effective.get(command).and_then(|e| e.hint.as_deref()) {
                    Some(hint) => format!("  {}  - {}", command, hint),
                    None => format!("  {}", command),
                };
                messages.push(line);
            }
        }
        messages.push("Type 'help' to list commands or 'clear' to clear the screen.".to_string());

        TerminalConfig {
            prompt: self.prompt.clone(),
            initial_messages: messages,
        }
    }

    /// Feed the active session through one transition
    pub fn update_session<F>(&mut self, f: F)
    where
        F: FnOnce(TerminalSession, &EffectiveDictionary) -> TerminalSession,
    {
        let session = std::mem::take(&mut self.session);
        self.session = f(session, &self.effective);
    }

    pub fn edit_input(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.update_session(|session, _| session.edit(text));
    }

    pub fn submit(&mut self) {
        self.update_session(|session, dict| session.submit(dict));
    }

    pub fn recall_previous(&mut self) {
        self.update_session(|session, _| session.recall_previous());
    }

    pub fn recall_next(&mut self) {
        self.update_session(|session, _| session.recall_next());
    }

    pub fn complete(&mut self) -> Completion {
        let session = std::mem::take(&mut self.session);
        let (session, completion) = session.complete(&self.effective);
        self.session = session;
        completion
    }
}
