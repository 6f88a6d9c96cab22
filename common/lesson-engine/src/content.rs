//! Loading and validating lesson content
//!
//! Lesson content is a TOML document shaped like [`LessonCatalog`]: a
//! `global_commands` table and an array of `lessons`, each with `steps`.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::dictionary::CommandDictionary;
use crate::error::{LessonError, LessonResult};
use crate::lesson::LessonCatalog;

const BUILTIN_CONTENT: &str = include_str!("../content/docker.toml");

/// Parse and validate a catalog from TOML text
pub fn parse_catalog(content: &str) -> LessonResult<LessonCatalog> {
    let catalog: LessonCatalog = toml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Read a catalog from a TOML file
pub async fn read_catalog(path: &Path) -> LessonResult<LessonCatalog> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LessonError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let catalog = parse_catalog(&content)?;
    info!(
        "Loaded {} lessons from {}",
        catalog.lessons.len(),
        path.display()
    );
    Ok(catalog)
}

/// The Docker lessons bundled with the crate
pub fn builtin_catalog() -> LessonResult<LessonCatalog> {
    parse_catalog(BUILTIN_CONTENT)
}

/// Reject catalogs the controller cannot navigate or commands nobody can type
pub fn validate_catalog(catalog: &LessonCatalog) -> LessonResult<()> {
    if catalog.lessons.is_empty() {
        return Err(LessonError::InvalidContent(
            "catalog has no lessons".to_string(),
        ));
    }

    validate_commands(&catalog.global_commands, "global commands")?;

    let mut slugs = HashSet::new();
    for lesson in &catalog.lessons {
        if lesson.slug.trim().is_empty() {
            return Err(LessonError::InvalidContent(format!(
                "lesson '{}' has an empty slug",
                lesson.title
            )));
        }
        if !slugs.insert(lesson.slug.as_str()) {
            return Err(LessonError::InvalidContent(format!(
                "duplicate lesson slug '{}'",
                lesson.slug
            )));
        }
        if lesson.steps.is_empty() {
            return Err(LessonError::InvalidContent(format!(
                "lesson '{}' has no steps",
                lesson.slug
            )));
        }
        for (index, step) in lesson.steps.iter().enumerate() {
            validate_commands(
                &step.terminal_commands,
                &format!("lesson '{}' step {}", lesson.slug, index),
            )?;
        }
    }

    Ok(())
}

// Input is trimmed before lookup, so padded or blank keys can never match.
fn validate_commands(commands: &CommandDictionary, location: &str) -> LessonResult<()> {
    for (command, _) in commands.iter() {
        if command.trim().is_empty() {
            return Err(LessonError::InvalidContent(format!(
                "{}: empty command",
                location
            )));
        }
        if command.trim() != command {
            return Err(LessonError::InvalidContent(format!(
                "{}: command '{}' has leading or trailing whitespace",
                location, command
            )));
        }
    }
    Ok(())
}
