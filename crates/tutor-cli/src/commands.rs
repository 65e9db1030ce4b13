//! Command parsing for the interactive chat
//!
//! Anything that is not one of the keywords below is sent to the agent as a
//! chat message.

/// Parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Leave the REPL
    Quit,
    /// Ask the Curator for a full curation pass
    CurateAll,
    /// Ask the Curator to curate one topic
    CurateTopic { topic_id: String },
    /// Ask the Curator to analyze overall progress
    Analyze,
    /// Show help
    Help,
    /// Chat message for the connected agent
    Message { text: String },
}

impl ReplCommand {
    /// Parse one line of input; blank lines yield `None`
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let lower = input.to_lowercase();
        let command = match lower.as_str() {
            "quit" | "exit" => Self::Quit,
            "curate" => Self::CurateAll,
            "analyze" => Self::Analyze,
            "help" => Self::Help,
            _ if lower.starts_with("curate ") => Self::CurateTopic {
                topic_id: input["curate ".len()..].trim().to_string(),
            },
            _ => Self::Message {
                text: input.to_string(),
            },
        };
        Some(command)
    }

    /// Help text for the REPL
    pub fn help_text() -> &'static str {
        r"
Commands:
  curate            Full curation session with the Curator
  curate <topic>    Curate content for one topic (e.g. curate game-loop)
  analyze           Analyze learning progress with the Curator
  help              Show this help
  quit | exit       Leave the chat

Anything else is sent to the agent as a message.
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        assert_eq!(ReplCommand::parse("quit"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("EXIT"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("  curate  "), Some(ReplCommand::CurateAll));
        assert_eq!(ReplCommand::parse("Analyze"), Some(ReplCommand::Analyze));
        assert_eq!(ReplCommand::parse("help"), Some(ReplCommand::Help));
    }

    #[test]
    fn test_parse_curate_topic() {
        assert_eq!(
            ReplCommand::parse("curate game-loop"),
            Some(ReplCommand::CurateTopic {
                topic_id: "game-loop".to_string()
            })
        );
        assert_eq!(
            ReplCommand::parse("Curate   signals "),
            Some(ReplCommand::CurateTopic {
                topic_id: "signals".to_string()
            })
        );
    }

    #[test]
    fn test_parse_message() {
        assert_eq!(
            ReplCommand::parse("How do signals work?"),
            Some(ReplCommand::Message {
                text: "How do signals work?".to_string()
            })
        );
        // Only a leading keyword followed by a space selects a topic
        assert_eq!(
            ReplCommand::parse("curated lists please"),
            Some(ReplCommand::Message {
                text: "curated lists please".to_string()
            })
        );
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(ReplCommand::parse(""), None);
        assert_eq!(ReplCommand::parse("   \n"), None);
    }
}
