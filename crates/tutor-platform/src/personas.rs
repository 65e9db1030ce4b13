//! Personas, memory block seeds and prompt templates
//!
//! All text is rendered through MiniJinja with the student's name available as
//! `{{ student }}`; the curate-topic prompt also receives `{{ topic_id }}`.

use crate::Result;
use minijinja::{Environment, context};

/// Student name used when none is configured
pub const DEFAULT_STUDENT: &str = "Mark";

/// Curriculum topics, as `(id, title)`
pub const CURRICULUM: &[(&str, &str)] = &[
    ("game-loop", "The Game Loop (fundamentals)"),
    ("scene-tree", "Scene Trees & Hierarchies (architecture)"),
    ("signals", "Signals/Observer Pattern (patterns)"),
    ("nodes-resources", "Nodes vs Resources (architecture)"),
    ("servers", "Server Architecture (internals)"),
    ("gdscript-internals", "GDScript Internals (internals)"),
    ("composition", "Composition Over Inheritance (patterns)"),
    ("state-machines", "State Machines (patterns)"),
];

/// Initial value of the shared `learning_progress` block
pub const LEARNING_PROGRESS_SEED: &str =
    "No learning sessions analyzed yet. Use get_recent_conversations to see student activity.";

/// Initial value of the shared `curated_content` block
pub const CURATED_CONTENT_SEED: &str =
    "No content curated yet. Use get_current_extensions to see what has been added.";

const GIDEON_PERSONA: &str = r"
I am Gideon, a friendly and knowledgeable Godot game engine tutor.

My role is to help {{ student }} learn game engine internals through their tic-tac-toe project.
I explain concepts clearly, connect them to their code, and guide their learning journey.

My personality:
- Patient and encouraging - learning takes time
- Practical - I relate everything to {{ student }}'s actual code
- Curious - I ask questions to understand their confusion
- Proactive - I notice gaps and create resources to fill them

When responding:
- Be concise but thorough
- Use code examples when helpful
- Connect concepts to the tic-tac-toe project
- Suggest exercises to reinforce learning
- If I notice a knowledge gap, I may add a resource or lesson to help

I have access to:
- The full curriculum of {{ curriculum | length }} topics
- {{ student }}'s conversation history
- Their learning progress and notes
- The ability to add resources, code examples, and lessons

I share memory with the Curator agent who handles background curation.
";

const CURATOR_PERSONA: &str = r"
I am the Curator agent - a background processor for the Godot Learning App.

My role is to analyze {{ student }}'s learning journey and proactively curate content:
1. Review recent conversations to identify knowledge gaps
2. Analyze patterns across topics to understand their learning style
3. Search for high-quality resources that address their specific struggles
4. Generate structured lessons based on their questions and confusion points
5. Add code examples that reinforce concepts they are learning

I work when triggered from the chat or the command line:
- When {{ student }} visits a topic, I check if they need more resources
- After conversations, I analyze what they asked and may create lessons
- I track what's already been added to avoid duplicates

My curation philosophy:
- Quality over quantity - only add truly helpful content
- Personalized - resources should address {{ student }}'s specific questions
- Progressive - content should match their current level
- Connected - show how concepts relate to each other

I share memory with Gideon (the chat agent) so we stay coordinated.
";

const SOLO_CURATOR_PERSONA: &str = r"
I am a learning curator agent for a Godot game engine learning application.

My primary responsibilities:
1. Monitor the student's learning conversations to understand their progress
2. Identify knowledge gaps and areas where they need more resources
3. Proactively find and add high-quality learning resources
4. Create helpful code examples based on what the student is learning
5. Build a personalized, curated learning experience over time

The student is learning game engine internals through Godot. They know Python well
but are new to game development. They're building a tic-tac-toe game as their
learning project.

Topics in the curriculum:
{% for id, title in curriculum %}- {{ id }}: {{ title }}
{% endfor %}
When curating content, I should:
- Check what topics have recent conversations (student activity)
- Review conversation details to understand specific questions/struggles
- Search for relevant resources (official docs, tutorials, videos, source code)
- Add resources that directly address the student's needs
- Avoid adding duplicate content
- Focus on practical, beginner-friendly resources
- Prioritize official Godot documentation and well-known game dev resources
";

const HUMAN_CONTEXT: &str = r"
Name: {{ student }}
Background: Experienced Python developer, new to game development
Current project: Building a tic-tac-toe game in Godot to learn engine internals
Learning style: Prefers understanding concepts deeply before implementation
Goals: Understand how game engines work under the hood, not just use them

Current curriculum topics:
{% for id, title in curriculum %}- {{ id }}: {{ title }}
{% endfor %}";

const CURATE_ALL: &str = r"
Please perform a comprehensive curation session:

1. Use get_recent_conversations to see which topics have recent activity
2. For active topics, use get_conversation_details to understand what the student asked
3. Use get_student_progress to see overall learning status
4. Use get_current_extensions to see what has already been added
5. Based on your analysis:
   - Identify knowledge gaps or confusion points
   - Search for 2-3 high-quality resources to address these gaps
   - Add resources using add_resource
   - If you see code-related questions, create helpful examples with add_code_example
   - If there's a significant confusion, consider generating a lesson with add_lesson

Focus on:
- Official Godot documentation
- GDQuest tutorials
- Game Programming Patterns book references
- Clear, beginner-friendly explanations

Update your memory with what you've learned about {{ student }}'s progress.
";

const CURATE_TOPIC: &str = r"
Please curate content specifically for the topic: {{ topic_id }}

1. Use get_conversation_details('{{ topic_id }}') to see what the student asked about this topic
2. Use get_student_notes('{{ topic_id }}') to see their personal notes
3. Use get_current_extensions to check what's already been added
4. Based on the conversation and notes:
   - Identify specific questions or confusion points
   - Find 1-2 highly relevant resources
   - Create a code example if it would help clarify a concept
   - Consider generating a focused lesson if there's a pattern of confusion

Remember: Quality over quantity. Only add content that directly addresses {{ student }}'s needs.
";

const ANALYZE: &str = r"
Please analyze {{ student }}'s overall learning progress:

1. Use get_student_progress to see completion status across all topics
2. Use get_recent_conversations to see activity patterns
3. Use get_topics to understand the curriculum structure

Provide insights on:
- Which topics has {{ student }} spent the most time on?
- What patterns do you see in their questions?
- What topics should they focus on next?
- Are there any knowledge gaps that span multiple topics?

Update your memory with these insights for future curation.
";

const INTRODUCE: &str =
    "Hello! Please introduce yourself briefly and tell me what tools you have available.";

const FIRST_CURATION: &str = "Please check the learning app for recent student conversations \
and identify any topics where you could add helpful resources. Start by getting the list of \
topics and recent notebooks.";

/// Rendered personas and prompts for one student
pub struct Prompts {
    env: Environment<'static>,
    student: String,
}

impl Prompts {
    /// Load all templates for `student`
    pub fn new(student: impl Into<String>) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("gideon_persona", GIDEON_PERSONA)?;
        env.add_template("curator_persona", CURATOR_PERSONA)?;
        env.add_template("solo_curator_persona", SOLO_CURATOR_PERSONA)?;
        env.add_template("human", HUMAN_CONTEXT)?;
        env.add_template("curate_all", CURATE_ALL)?;
        env.add_template("curate_topic", CURATE_TOPIC)?;
        env.add_template("analyze", ANALYZE)?;

        Ok(Self {
            env,
            student: student.into(),
        })
    }

    /// The student these prompts address
    pub fn student(&self) -> &str {
        &self.student
    }

    fn render(&self, name: &str, topic_id: Option<&str>) -> Result<String> {
        let template = self.env.get_template(name)?;
        let rendered = template.render(context! {
            student => &self.student,
            curriculum => CURRICULUM,
            topic_id => topic_id,
        })?;
        Ok(rendered)
    }

    /// Persona of the Gideon tutor agent
    pub fn gideon_persona(&self) -> Result<String> {
        self.render("gideon_persona", None)
    }

    /// Persona of the background Curator agent
    pub fn curator_persona(&self) -> Result<String> {
        self.render("curator_persona", None)
    }

    /// Persona of the single-agent curator setup
    pub fn solo_curator_persona(&self) -> Result<String> {
        self.render("solo_curator_persona", None)
    }

    /// The `human` block: who the student is and the curriculum
    pub fn human_context(&self) -> Result<String> {
        self.render("human", None)
    }

    /// Ask the Curator for a full curation pass
    pub fn curate_all(&self) -> Result<String> {
        self.render("curate_all", None)
    }

    /// Ask the Curator to curate one topic
    pub fn curate_topic(&self, topic_id: &str) -> Result<String> {
        self.render("curate_topic", Some(topic_id))
    }

    /// Ask the Curator to analyze overall progress
    pub fn analyze(&self) -> Result<String> {
        self.render("analyze", None)
    }

    /// Test message sent to freshly created agents
    pub fn introduce(&self) -> &'static str {
        INTRODUCE
    }

    /// Test message sent to a freshly created single-agent curator
    pub fn first_curation(&self) -> &'static str {
        FIRST_CURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompts() -> Prompts {
        Prompts::new(DEFAULT_STUDENT).unwrap()
    }

    #[test]
    fn test_curate_topic_mentions_topic() {
        let text = prompts().curate_topic("game-loop").unwrap();
        assert!(text.contains("specifically for the topic: game-loop"));
        assert!(text.contains("get_student_notes('game-loop')"));
        assert!(text.contains("addresses Mark's needs"));
    }

    #[test]
    fn test_human_context_lists_curriculum() {
        let text = prompts().human_context().unwrap();
        assert!(text.contains("Name: Mark"));
        for (id, title) in CURRICULUM {
            assert!(text.contains(&format!("- {id}: {title}")), "missing {id}");
        }
    }

    #[test]
    fn test_personas_use_student_name() {
        let prompts = Prompts::new("Ada").unwrap();
        assert!(prompts.gideon_persona().unwrap().contains("help Ada learn"));
        assert!(prompts.gideon_persona().unwrap().contains("curriculum of 8 topics"));
        assert!(prompts.curator_persona().unwrap().contains("analyze Ada's learning journey"));
        assert!(!prompts.curator_persona().unwrap().contains("sleeptime"));
        assert!(prompts.analyze().unwrap().contains("Ada's overall learning progress"));
        assert!(!prompts.curate_all().unwrap().contains("{{"));
    }

    #[test]
    fn test_solo_persona_lists_topics() {
        let text = prompts().solo_curator_persona().unwrap();
        assert!(text.contains("- state-machines: State Machines (patterns)"));
    }
}
