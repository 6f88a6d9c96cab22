use crate::dictionary::EffectiveDictionary;

/// Outcome of resolving one line of learner input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Blank line; nothing happens
    NoOp,
    /// Wipe the visible scrollback without adding a line
    Clear,
    /// A line to append to scrollback
    Output { output: String, is_error: bool },
}

/// Resolve raw input against the effective dictionary
///
/// Matching is by exact equality of the trimmed line. Dictionary entries
/// take precedence over the `clear` and `help` built-ins.
pub fn resolve(raw_input: &str, dict: &EffectiveDictionary) -> Resolution {
    let command = raw_input.trim();

    if command.is_empty() {
        return Resolution::NoOp;
    }

    if let Some(entry) = dict.get(command) {
        return Resolution::Output {
            output: entry.output.clone(),
            is_error: false,
        };
    }

    match command {
        "clear" => Resolution::Clear,
        "help" => Resolution::Output {
            output: format!("Available commands: {}", dict.sorted_commands().join(", ")),
            is_error: false,
        },
        _ => Resolution::Output {
            output: format!(
                "Command not recognized. Try: {}",
                dict.sorted_commands().join(", ")
            ),
            is_error: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{merge, CommandDictionary, CommandEntry};

    fn effective(pairs: &[(&str, &str)]) -> EffectiveDictionary {
        let global: CommandDictionary = pairs
            .iter()
            .map(|(k, v)| (*k, CommandEntry::new(*v)))
            .collect();
        merge(&global, &CommandDictionary::new())
    }

    #[test]
    fn test_blank_input_is_noop() {
        let dict = effective(&[("ls", "app")]);
        assert_eq!(resolve("", &dict), Resolution::NoOp);
        assert_eq!(resolve("   \t ", &dict), Resolution::NoOp);
    }

    #[test]
    fn test_exact_match_after_trim() {
        let dict = effective(&[("docker ps", "CONTAINER ID ...\nwebserver")]);

        assert_eq!(
            resolve("  docker ps ", &dict),
            Resolution::Output {
                output: "CONTAINER ID ...\nwebserver".to_string(),
                is_error: false,
            }
        );
    }

    #[test]
    fn test_no_prefix_or_argument_matching() {
        let dict = effective(&[("docker run myapp", "started")]);

        match resolve("docker run myapp2", &dict) {
            Resolution::Output { is_error, .. } => assert!(is_error),
            other => panic!("Expected error output, got {:?}", other),
        }
        match resolve("docker run", &dict) {
            Resolution::Output { is_error, .. } => assert!(is_error),
            other => panic!("Expected error output, got {:?}", other),
        }
    }

    #[test]
    fn test_clear_builtin() {
        let dict = effective(&[("ls", "app")]);
        assert_eq!(resolve("clear", &dict), Resolution::Clear);
        assert_eq!(resolve(" clear ", &dict), Resolution::Clear);
    }

    #[test]
    fn test_help_lists_sorted_commands() {
        let dict = effective(&[("ls", ""), ("docker ps", ""), ("docker images", "")]);

        assert_eq!(
            resolve("help", &dict),
            Resolution::Output {
                output: "Available commands: docker images, docker ps, ls".to_string(),
                is_error: false,
            }
        );
    }

    #[test]
    fn test_unknown_command() {
        let dict = effective(&[("ls", ""), ("docker ps", "")]);

        assert_eq!(
            resolve("rm -rf /", &dict),
            Resolution::Output {
                output: "Command not recognized. Try: docker ps, ls".to_string(),
                is_error: true,
            }
        );
    }

    #[test]
    fn test_dictionary_shadows_builtins() {
        let dict = effective(&[("clear", "custom clear"), ("help", "custom help")]);

        assert_eq!(
            resolve("clear", &dict),
            Resolution::Output {
                output: "custom clear".to_string(),
                is_error: false,
            }
        );
        assert_eq!(
            resolve("help", &dict),
            Resolution::Output {
                output: "custom help".to_string(),
                is_error: false,
            }
        );
    }

    #[test]
    fn test_help_and_unknown_with_empty_dictionary() {
        let dict = EffectiveDictionary::default();

        assert_eq!(
            resolve("help", &dict),
            Resolution::Output {
                output: "Available commands: ".to_string(),
                is_error: false,
            }
        );
        match resolve("ls", &dict) {
            Resolution::Output { output, is_error } => {
                assert!(is_error);
                assert!(output.contains("Command not recognized"));
            }
            other => panic!("Expected error output, got {:?}", other),
        }
    }
}
