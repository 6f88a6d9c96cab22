//! lesson-engine - simulated terminal for guided command-line lessons
//!
//! This library resolves typed commands against a layered command dictionary,
//! keeps terminal scrollback and command recall state, and keeps the active
//! dictionary in step with the lesson step being shown.

pub mod content;
pub mod controller;
pub mod dictionary;
pub mod error;
pub mod lesson;
pub mod resolver;
pub mod session;

// Re-export commonly used types
pub use content::{builtin_catalog, parse_catalog, read_catalog};
pub use controller::{LessonStepController, StepTransition};
pub use dictionary::{merge, CommandDictionary, CommandEntry, EffectiveDictionary};
pub use error::{LessonError, LessonResult};
pub use lesson::{Lesson, LessonCatalog, LessonStep};
pub use resolver::{resolve, Resolution};
pub use session::{Completion, HistoryEntry, TerminalConfig, TerminalSession, DEFAULT_PROMPT};
