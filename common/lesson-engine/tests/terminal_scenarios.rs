use std::sync::Arc;

use lesson_engine::{
    builtin_catalog, merge, CommandDictionary, CommandEntry, Lesson, LessonCatalog,
    LessonStep, LessonStepController, TerminalSession,
};

fn single_step_catalog(commands: CommandDictionary) -> LessonCatalog {
    LessonCatalog {
        global_commands: CommandDictionary::new(),
        lessons: vec![Lesson {
            slug: "containers".to_string(),
            title: "Containers".to_string(),
            description: "Listing containers".to_string(),
            icon: "🐳".to_string(),
            steps: vec![LessonStep {
                title: "docker ps".to_string(),
                content: "List what is running".to_string(),
                animation_key: "container-list".to_string(),
                terminal_commands: commands,
            }],
        }],
    }
}

#[test]
fn docker_ps_then_help() {
    let commands: CommandDictionary = [(
        "docker ps",
        CommandEntry::new("CONTAINER ID ...\nwebserver"),
    )]
    .into_iter()
    .collect();
    let mut controller =
        LessonStepController::new(Arc::new(single_step_catalog(commands))).unwrap();

    for c in "docker ps".chars() {
        controller.update_session(|session, _| session.push_char(c));
    }
    controller.submit();

    let history = controller.session().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].command, "docker ps");
    assert_eq!(history[0].output, "CONTAINER ID ...\nwebserver");
    assert!(!history[0].is_error);

    controller.edit_input("help");
    controller.submit();

    let history = controller.session().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].output, "Available commands: docker ps");
    assert!(!history[1].is_error);
}

#[test]
fn every_builtin_command_resolves_on_every_step() {
    let catalog = Arc::new(builtin_catalog().unwrap());
    let mut controller = LessonStepController::new(catalog.clone()).unwrap();

    loop {
        let step = controller.current_step().clone();
        let expected = merge(&catalog.global_commands, &step.terminal_commands);
        assert_eq!(controller.effective_dictionary(), &expected);

        for command in expected.sorted_commands() {
            let session = TerminalSession::new()
                .edit(command)
                .submit(controller.effective_dictionary());
            let entry = &session.history()[0];
            assert_eq!(entry.output, expected.get(command).unwrap().output);
            assert!(!entry.is_error, "{} should be recognized", command);
        }

        if !controller.next_step() && !controller.next_lesson() {
            break;
        }
    }

    assert_eq!(controller.lesson_index(), catalog.lessons.len() - 1);
}

#[test]
fn unknown_commands_never_escape_as_errors() {
    let mut controller = LessonStepController::new(Arc::new(builtin_catalog().unwrap())).unwrap();

    for line in ["rm -rf /", "docker ps -a", "sudo su", "docker  ps", "ünïcödé"] {
        controller.edit_input(line);
        controller.submit();
    }

    let history = controller.session().history();
    assert_eq!(history.len(), 5);
    assert!(history
        .iter()
        .all(|e| e.is_error && e.output.starts_with("Command not recognized. Try: ")));
}

#[test]
fn clear_then_recall() {
    let mut controller = LessonStepController::new(Arc::new(builtin_catalog().unwrap())).unwrap();

    controller.edit_input("docker --version");
    controller.submit();
    controller.edit_input("clear");
    controller.submit();

    assert!(controller.session().history().is_empty());

    controller.recall_previous();
    assert_eq!(controller.session().input(), "clear");
    controller.recall_previous();
    assert_eq!(controller.session().input(), "docker --version");
}
