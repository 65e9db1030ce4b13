//! Command-line interface for godot-tutor
//!
//! # Usage
//!
//! ```bash
//! # Start Letta and the learning app, then provision the agents
//! tutor setup --test
//!
//! # Chat with Gideon, or send one message
//! tutor chat
//! tutor chat "How does the game loop work?"
//!
//! # Curation with the Curator agent
//! tutor curate
//! tutor curate game-loop
//! tutor analyze
//!
//! # Exercise a learning tool without an agent
//! tutor tool get_student_notes '{"topic_id": "signals"}'
//! ```

mod commands;
mod render;
mod session;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;
use session::{Agent, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tutor_platform::personas::DEFAULT_STUDENT;
use tutor_platform::{
    AgentIds, Conversation, LettaClient, Profile, Prompts, Provisioner, check_learning_app,
};
use tutor_tools::{LearningAppClient, ToolRegistry, learning};
use tutor_utils::TutorConfig;
use tutor_utils::config::MULTI_AGENT_LEARNING_APP_URL;

#[derive(Parser, Debug)]
#[command(name = "tutor", version)]
#[command(about = "Godot learning tutor agents on Letta", long_about = None)]
struct Cli {
    /// Base URL of the learning application
    #[arg(long, env = "LEARNING_APP_URL", global = true)]
    learning_app_url: Option<String>,

    /// Base URL of the Letta server
    #[arg(long = "letta-url", env = "LETTA_BASE_URL", global = true)]
    letta_url: Option<String>,

    /// Directory holding agent_ids.json / agent_id.txt
    #[arg(long, env = "TUTOR_AGENTS_DIR", global = true)]
    agents_dir: Option<PathBuf>,

    /// Student the personas and prompts address
    #[arg(long, default_value = DEFAULT_STUDENT, global = true)]
    student: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Provision the agents on the Letta server
    Setup {
        /// Create a single curator agent instead of Gideon and the Curator
        #[arg(long)]
        single: bool,

        /// Send a test message to each created agent
        #[arg(long)]
        test: bool,
    },

    /// Chat with Gideon (or the Curator); without a message, start a REPL
    Chat {
        /// Talk to the Curator instead of Gideon
        #[arg(long)]
        curator: bool,

        /// One-shot message
        message: Vec<String>,
    },

    /// Ask the Curator to curate all topics, or one topic
    Curate {
        /// Topic id, e.g. game-loop
        topic: Option<String>,
    },

    /// Ask the Curator to analyze learning progress
    Analyze,

    /// List the learning tools
    Tools,

    /// Invoke one learning tool locally and print its result
    Tool {
        name: String,

        /// Arguments as a JSON object
        args: Option<String>,
    },
}

impl Cli {
    fn config(&self, learning_app_default: Option<&str>) -> Result<TutorConfig> {
        let mut builder = TutorConfig::builder();
        if let Some(url) = learning_app_default {
            builder = builder.learning_app_url(url);
        }
        if let Some(url) = &self.learning_app_url {
            builder = builder.learning_app_url(url);
        }
        if let Some(url) = &self.letta_url {
            builder = builder.letta_base_url(url);
        }
        if let Some(dir) = &self.agents_dir {
            builder = builder.agents_dir(dir);
        }
        Ok(builder.build()?)
    }
}

fn tool_registry(config: &TutorConfig) -> Result<Arc<ToolRegistry>> {
    let app = LearningAppClient::from_config(config)?;
    Ok(Arc::new(learning::registry(&app)))
}

fn conversation(config: &TutorConfig, letta: Arc<LettaClient>) -> Result<Conversation> {
    Ok(Conversation::new(
        letta,
        tool_registry(config)?,
        config.max_tool_rounds,
    ))
}

fn confirm(question: &str) -> Result<bool> {
    print!("\n{question} (y/n): ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

async fn setup(cli: &Cli, single: bool, test: bool) -> Result<()> {
    let (profile, app_default) = if single {
        (Profile::SingleAgent, None)
    } else {
        (Profile::MultiAgent, Some(MULTI_AGENT_LEARNING_APP_URL))
    };
    let config = cli.config(app_default)?;
    let prompts = Prompts::new(&cli.student)?;
    let letta = Arc::new(LettaClient::from_config(&config)?);
    let provisioner = Provisioner::new(&letta, &prompts);

    println!("{}", "=".repeat(60));
    println!("Godot Learning App - Agent Setup");
    println!("{}", "=".repeat(60));
    println!("\nLetta Server: {}", config.letta_base_url);
    println!("Learning App: {}", config.learning_app_url);

    println!("\nChecking Letta server...");
    if let Err(e) = provisioner.check_platform().await {
        println!("Cannot reach Letta server: {e}");
        println!("\nStart the server first:");
        println!("  ANTHROPIC_API_KEY=your_key letta server");
        return Err(e.into());
    }
    println!("Letta server is running at {}", config.letta_base_url);

    println!("\nChecking learning app...");
    let app = LearningAppClient::from_config(&config)?;
    match check_learning_app(&app, config.health_timeout).await {
        Ok(status) if (200..300).contains(&status) => {
            println!("Learning app is running at {}", config.learning_app_url);
        }
        Ok(status) => println!(
            "Learning app at {} answered with status {status}",
            config.learning_app_url
        ),
        Err(e) => {
            println!("Cannot reach learning app: {}", e.render(learning::Access::Read));
            if !confirm("Continue anyway?")? {
                bail!("setup cancelled");
            }
        }
    }

    println!("\nCreating agents...");
    let ids = provisioner.provision(profile).await?;
    ids.save(&config.agents_dir)?;
    info!(dir = %config.agents_dir.display(), "Agent ids saved");

    println!("\n{}", "=".repeat(60));
    println!("Setup complete!\n");
    match (&ids.curator, &ids.shared_blocks) {
        (Some(curator), Some(_)) => {
            println!("Multi-Agent System:");
            println!("  Gideon (Chat):        {}", ids.gideon);
            println!("  Curator (Background): {curator}");
            println!("\nShared Memory Blocks:");
            println!("  - learning_progress: Tracks learning journey");
            println!("  - curated_content: Tracks what has been added");
        }
        _ => println!("Curator agent: {}", ids.gideon),
    }
    println!("\nTo interact with agents:");
    println!("  - Letta ADE: {}", config.letta_base_url);
    println!("  - CLI: tutor chat");
    println!("  - Trigger curation: tutor curate");
    println!("{}", "=".repeat(60));

    if test {
        let message = match profile {
            Profile::MultiAgent => prompts.introduce(),
            Profile::SingleAgent => prompts.first_curation(),
        };
        let targets = targets_to_test(profile, &ids);
        let session = Session::new(conversation(&config, letta)?, ids.clone(), prompts);
        for (agent, agent_id) in targets {
            println!("\nTesting {}...", agent.name());
            session.send_to(agent_id, agent.name(), message).await?;
        }
    }

    Ok(())
}

/// Agents a setup test message goes to, each with the id it was created under
///
/// The single-agent profile stores its curator in the `gideon` slot.
fn targets_to_test(profile: Profile, ids: &AgentIds) -> Vec<(Agent, &str)> {
    match profile {
        Profile::MultiAgent => {
            let mut targets = vec![(Agent::Gideon, ids.gideon.as_str())];
            if let Some(curator) = ids.curator.as_deref() {
                targets.push((Agent::Curator, curator));
            }
            targets
        }
        Profile::SingleAgent => vec![(Agent::Curator, ids.gideon.as_str())],
    }
}

fn open_session(cli: &Cli) -> Result<Session> {
    let config = cli.config(None)?;
    let ids = AgentIds::load(&config.agents_dir)?;
    let letta = Arc::new(LettaClient::from_config(&config)?);
    let prompts = Prompts::new(&cli.student)?;
    Ok(Session::new(conversation(&config, letta)?, ids, prompts))
}

async fn run_tool(cli: &Cli, name: &str, args: Option<&str>) -> Result<()> {
    let registry = tool_registry(&cli.config(None)?)?;
    let params: Value = match args {
        Some(raw) => serde_json::from_str(raw).context("tool arguments must be a JSON object")?,
        None => Value::Object(serde_json::Map::new()),
    };
    println!("{}", registry.invoke(name, params).await);
    Ok(())
}

fn list_tools(cli: &Cli) -> Result<()> {
    let registry = tool_registry(&cli.config(None)?)?;
    for def in registry.definitions() {
        let summary = def.description.lines().next().unwrap_or_default();
        println!("{:<26} {summary}", def.name);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tutor_utils::init_tracing();

    let cli = Cli::parse();

    match &cli.command {
        Command::Setup { single, test } => setup(&cli, *single, *test).await,
        Command::Chat { curator, message } => {
            let session = open_session(&cli)?;
            let agent = if *curator { Agent::Curator } else { Agent::Gideon };
            let Some(agent_id) = session.agent_id(agent) else {
                bail!("Curator agent not available. Run `tutor setup` first.");
            };
            println!("Connected to {}: {agent_id}", agent.name());

            if message.is_empty() {
                session.interactive(agent).await
            } else {
                session.send(agent, &message.join(" ")).await
            }
        }
        Command::Curate { topic } => {
            let session = open_session(&cli)?;
            match topic {
                Some(topic) => session.curate_topic(topic).await,
                None => session.curate_all().await,
            }
        }
        Command::Analyze => open_session(&cli)?.analyze().await,
        Command::Tools => list_tools(&cli),
        Command::Tool { name, args } => run_tool(&cli, name, args.as_deref()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_platform::SharedBlocks;

    #[test]
    fn test_single_agent_is_tested_as_curator() {
        let ids = AgentIds::single("agent-solo");
        let targets = targets_to_test(Profile::SingleAgent, &ids);
        assert_eq!(targets, vec![(Agent::Curator, "agent-solo")]);
    }

    #[test]
    fn test_multi_agent_tests_both_agents() {
        let ids = AgentIds {
            gideon: "agent-g".to_string(),
            curator: Some("agent-c".to_string()),
            shared_blocks: Some(SharedBlocks {
                learning_progress: "block-lp".to_string(),
                curated_content: "block-cc".to_string(),
            }),
        };
        let targets = targets_to_test(Profile::MultiAgent, &ids);
        assert_eq!(
            targets,
            vec![(Agent::Gideon, "agent-g"), (Agent::Curator, "agent-c")]
        );
    }
}
