//! Chat session with the provisioned agents

use crate::commands::ReplCommand;
use crate::render::print_reply;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::debug;
use tutor_platform::{AgentIds, Conversation, Prompts};

const NO_CURATOR: &str = "Curator agent not available. Run `tutor setup` first.";

/// Which agent a message goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agent {
    Gideon,
    Curator,
}

impl Agent {
    pub fn name(self) -> &'static str {
        match self {
            Self::Gideon => "Gideon",
            Self::Curator => "Curator",
        }
    }
}

pub struct Session {
    conversation: Conversation,
    ids: AgentIds,
    prompts: Prompts,
}

impl Session {
    pub fn new(conversation: Conversation, ids: AgentIds, prompts: Prompts) -> Self {
        Self {
            conversation,
            ids,
            prompts,
        }
    }

    /// Id of `agent`, if one is configured
    pub fn agent_id(&self, agent: Agent) -> Option<&str> {
        match agent {
            Agent::Gideon => Some(&self.ids.gideon),
            Agent::Curator => self.ids.curator.as_deref(),
        }
    }

    /// Send `text` to `agent` and print the reply
    pub async fn send(&self, agent: Agent, text: &str) -> Result<()> {
        let Some(agent_id) = self.agent_id(agent) else {
            println!("{NO_CURATOR}");
            return Ok(());
        };

        self.send_to(agent_id, agent.name(), text).await
    }

    /// Send `text` to the agent with `agent_id`, labelling its reply `name`
    pub async fn send_to(&self, agent_id: &str, name: &str, text: &str) -> Result<()> {
        debug!(agent = name, agent_id, "Sending message");
        let messages = self.conversation.send(agent_id, text).await?;
        print_reply(&messages, name);
        Ok(())
    }

    pub async fn curate_all(&self) -> Result<()> {
        if self.ids.curator.is_none() {
            println!("{NO_CURATOR}");
            return Ok(());
        }
        println!("\nTriggering full curation session with Curator...");
        self.send(Agent::Curator, &self.prompts.curate_all()?).await
    }

    pub async fn curate_topic(&self, topic_id: &str) -> Result<()> {
        if self.ids.curator.is_none() {
            println!("{NO_CURATOR}");
            return Ok(());
        }
        println!("\nCurating content for topic: {topic_id}...");
        self.send(Agent::Curator, &self.prompts.curate_topic(topic_id)?)
            .await
    }

    pub async fn analyze(&self) -> Result<()> {
        if self.ids.curator.is_none() {
            println!("{NO_CURATOR}");
            return Ok(());
        }
        println!("\nAnalyzing learning progress...");
        self.send(Agent::Curator, &self.prompts.analyze()?).await
    }

    /// Interactive loop; returns on `quit`, `exit` or end of input
    pub async fn interactive(&self, agent: Agent) -> Result<()> {
        println!("\nInteractive mode with {}.", agent.name());
        println!("Commands: 'quit' to exit, 'curate' for curation, 'analyze' for progress analysis");
        println!("{}", "-".repeat(50));

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("\nYou: ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {e}");
                    continue;
                }
            }

            let Some(command) = ReplCommand::parse(&input) else {
                continue;
            };

            let result = match command {
                ReplCommand::Quit => break,
                ReplCommand::Help => {
                    println!("{}", ReplCommand::help_text());
                    Ok(())
                }
                ReplCommand::CurateAll => self.curate_all().await,
                ReplCommand::CurateTopic { topic_id } => self.curate_topic(&topic_id).await,
                ReplCommand::Analyze => self.analyze().await,
                ReplCommand::Message { text } => self.send(agent, &text).await,
            };

            if let Err(e) = result {
                eprintln!("Error: {e:#}");
            }
        }

        Ok(())
    }
}
