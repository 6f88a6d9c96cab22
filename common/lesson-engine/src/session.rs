//! Terminal session state machine
//!
//! A [`TerminalSession`] holds everything one terminal surface needs: the
//! line being typed, the scrollback and the command recall log. Every
//! transition consumes the session and returns the next state, so the
//! presentation layer only ever swaps one value for another.

use tracing::debug;

use crate::dictionary::EffectiveDictionary;
use crate::resolver::{resolve, Resolution};

/// Prompt shown before the input line when none is configured
pub const DEFAULT_PROMPT: &str = "$ ";

/// One executed command and what it printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Unique within the session, strictly increasing
    pub id: u64,
    /// Trimmed command text, never empty
    pub command: String,
    pub output: String,
    /// True when the command was not recognized
    pub is_error: bool,
}

/// How a terminal surface is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    pub prompt: String,
    /// Rendered once above the scrollback; never part of it and never cleared
    pub initial_messages: Vec<String>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            initial_messages: Vec::new(),
        }
    }
}

/// Result of a Tab completion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing in the dictionary starts with the input
    NoMatch,
    /// Exactly one command matched and replaced the input
    Applied,
    /// Several commands matched; the input is left alone
    Candidates(Vec<String>),
}

/// Mutable state of one terminal instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalSession {
    input: String,
    history: Vec<HistoryEntry>,
    /// `None` while editing live, `Some(i)` while showing `submitted[i]`
    recall_cursor: Option<usize>,
    submitted: Vec<String>,
    next_id: u64,
}

impl TerminalSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn recall_cursor(&self) -> Option<usize> {
        self.recall_cursor
    }

    /// Every non-empty command submitted so far, oldest first
    pub fn submitted_commands(&self) -> &[String] {
        &self.submitted
    }

    /// Replace the input line, leaving recall mode
    pub fn edit(mut self, text: impl Into<String>) -> Self {
        self.input = text.into();
        self.recall_cursor = None;
        self
    }

    pub fn push_char(mut self, c: char) -> Self {
        self.input.push(c);
        self.recall_cursor = None;
        self
    }

    pub fn backspace(mut self) -> Self {
        self.input.pop();
        self.recall_cursor = None;
        self
    }

    /// Execute the input line against `dict`
    pub fn submit(mut self, dict: &EffectiveDictionary) -> Self {
        let raw = std::mem::take(&mut self.input);
        let command = raw.trim();

        let resolution = resolve(command, dict);
        if resolution == Resolution::NoOp {
            return self;
        }

        self.submitted.push(command.to_string());
        self.recall_cursor = None;

        match resolution {
            Resolution::NoOp => {}
            Resolution::Clear => {
                debug!("Clearing {} scrollback entries", self.history.len());
                self.history.clear();
            }
            Resolution::Output { output, is_error } => {
                debug!(command, is_error, "Command resolved");
                let id = self.next_id;
                self.next_id += 1;
                self.history.push(HistoryEntry {
                    id,
                    command: command.to_string(),
                    output,
                    is_error,
                });
            }
        }

        self
    }

    /// Step back through submitted commands (Up arrow)
    pub fn recall_previous(mut self) -> Self {
        if self.submitted.is_empty() {
            return self;
        }

        let index = match self.recall_cursor {
            None => self.submitted.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.recall_cursor = Some(index);
        self.input = self.submitted[index].clone();
        self
    }

    /// Step forward through submitted commands (Down arrow)
    pub fn recall_next(mut self) -> Self {
        let Some(current) = self.recall_cursor else {
            return self;
        };

        let index = current + 1;
        if index >= self.submitted.len() {
            self.recall_cursor = None;
            self.input.clear();
        } else {
            self.recall_cursor = Some(index);
            self.input = self.submitted[index].clone();
        }
        self
    }

    /// Complete the input line from the dictionary (Tab)
    pub fn complete(self, dict: &EffectiveDictionary) -> (Self, Completion) {
        let candidates = dict.completions(&self.input);
        match candidates.as_slice() {
            [] => (self, Completion::NoMatch),
            [only] => {
                let only = only.to_string();
                (self.edit(only), Completion::Applied)
            }
            many => {
                let many = many.iter().map(|c| c.to_string()).collect();
                (self, Completion::Candidates(many))
            }
        }
    }
}
