use serde::{Deserialize, Serialize};

use crate::dictionary::CommandDictionary;

/// One screen of a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonStep {
    pub title: String,
    /// Narrative text shown beside the terminal
    pub content: String,
    /// Selects the animation the presentation layer plays for this step
    pub animation_key: String,
    /// Commands added or redefined for this step only; empty when omitted
    #[serde(default, skip_serializing_if = "CommandDictionary::is_empty")]
    pub terminal_commands: CommandDictionary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub steps: Vec<LessonStep>,
}

/// All lesson content plus the commands available on every step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonCatalog {
    #[serde(default)]
    pub global_commands: CommandDictionary,
    pub lessons: Vec<Lesson>,
}

impl LessonCatalog {
    pub fn lesson_index(&self, slug: &str) -> Option<usize> {
        self.lessons.iter().position(|lesson| lesson.slug == slug)
    }
}
