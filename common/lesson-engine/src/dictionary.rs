//! Command dictionaries and the global/step merge
//!
//! A dictionary maps the exact text a learner types (arguments included) to
//! the canned output the terminal prints for it. The global dictionary is
//! available on every step; a step may add commands or redefine global ones.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Canned result for one literal command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Text printed for the command; may span several lines
    pub output: String,
    /// Optional short explanation shown next to the command in banners
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl CommandEntry {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Read-only mapping from literal command text to its entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandDictionary {
    entries: HashMap<String, CommandEntry>,
}

impl CommandDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, command: &str) -> Option<&CommandEntry> {
        self.entries.get(command)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.entries.contains_key(command)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CommandEntry)> {
        self.entries.iter()
    }

    /// Command keys in lexicographic order
    pub fn sorted_commands(&self) -> Vec<&str> {
        sorted_keys(&self.entries)
    }
}

impl<K: Into<String>> FromIterator<(K, CommandEntry)> for CommandDictionary {
    fn from_iter<I: IntoIterator<Item = (K, CommandEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// The merged global + step command table in force for one step
///
/// Built once per step transition by [`merge`] and kept until the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveDictionary {
    entries: HashMap<String, CommandEntry>,
}

impl EffectiveDictionary {
    pub fn get(&self, command: &str) -> Option<&CommandEntry> {
        self.entries.get(command)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.entries.contains_key(command)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Command keys in lexicographic order
    pub fn sorted_commands(&self) -> Vec<&str> {
        sorted_keys(&self.entries)
    }

    /// Commands that start with `partial`, sorted
    ///
    /// Only used to help the learner type; resolution never prefix-matches.
    pub fn completions(&self, partial: &str) -> Vec<&str> {
        let mut matches: Vec<&str> = self
            .entries
            .keys()
            .map(String::as_str)
            .filter(|command| command.starts_with(partial))
            .collect();
        matches.sort_unstable();
        matches
    }
}

/// Merge the global dictionary with a step's dictionary
///
/// Step entries replace global entries with the same key. Neither input is
/// modified.
pub fn merge(global: &CommandDictionary, step: &CommandDictionary) -> EffectiveDictionary {
    let mut entries = HashMap::with_capacity(global.len() + step.len());
    for (command, entry) in global.iter().chain(step.iter()) {
        entries.insert(command.clone(), entry.clone());
    }
    EffectiveDictionary { entries }
}

fn sorted_keys(entries: &HashMap<String, CommandEntry>) -> Vec<&str> {
    let mut keys: Vec<&str> = entries.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}
