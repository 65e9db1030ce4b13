//! Terminal rendering of agent replies

use tutor_platform::AgentMessage;

const REASONING_PREVIEW: usize = 300;
const ARGS_PREVIEW: usize = 150;

/// First `max` characters of `text`
fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Render one reply message as the lines shown to the user
///
/// Reasoning is always cut to a preview; tool arguments only when long.
pub fn render_message(message: &AgentMessage, agent_name: &str) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(reasoning) = &message.reasoning {
        lines.push(format!(
            "[Thinking]: {}...",
            preview(reasoning, REASONING_PREVIEW)
        ));
    }

    if let Some(text) = &message.text {
        lines.push(format!("[{agent_name}]: {text}"));
    }

    for call in &message.tool_calls {
        lines.push(format!("[Tool: {}]", call.name));
        if call.arguments.is_empty() {
            continue;
        }
        if call.arguments.chars().count() > ARGS_PREVIEW {
            lines.push(format!("  Args: {}...", preview(&call.arguments, ARGS_PREVIEW)));
        } else {
            lines.push(format!("  Args: {}", call.arguments));
        }
    }

    lines
}

/// Print a whole reply, each entry preceded by a blank line
pub fn print_reply(messages: &[AgentMessage], agent_name: &str) {
    for message in messages {
        for line in render_message(message, agent_name) {
            println!("\n{line}");
        }
    }
}
