use std::io::Write;

use lesson_engine::{read_catalog, LessonError};

#[tokio::test]
async fn reads_catalog_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[global_commands.pwd]
output = "/srv"

[[lessons]]
slug = "basics"
title = "Basics"

[[lessons.steps]]
title = "Where am I"
content = "Print the working directory"
animation_key = "folder"

[lessons.steps.terminal_commands."ls -la"]
output = """
total 8
drwxr-xr-x 2 learner learner 4096 .
drwxr-xr-x 3 learner learner 4096 .."""
hint = "List files"
"#
    )
    .unwrap();

    let catalog = read_catalog(file.path()).await.unwrap();

    assert_eq!(catalog.lessons[0].slug, "basics");
    let entry = catalog.lessons[0].steps[0]
        .terminal_commands
        .get("ls -la")
        .unwrap();
    assert!(entry.output.starts_with("total 8\n"));
    assert_eq!(entry.hint.as_deref(), Some("List files"));
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let err = read_catalog(&path).await.unwrap_err();

    assert!(matches!(err, LessonError::Io { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

#[tokio::test]
async fn invalid_content_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "lessons = []").unwrap();

    let err = read_catalog(file.path()).await.unwrap_err();

    assert!(matches!(err, LessonError::InvalidContent(_)));
}
