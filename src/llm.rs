use crate::config::Config;
use crate::prompt::Prompt;
use ::llm::{
    builder::{FunctionBuilder, LLMBackend, LLMBuilder, ParamBuilder},
    chat::{ChatMessage, ToolChoice},
};
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const ASK_NEXT_QUESTION: &str = "ask_next_question";

const MOCK_FOLLOW_UP: &str = "Is there anything else readers should know?";

/// The two calls the generator makes against a chat model.
#[async_trait]
pub trait ReadmeModel: Send + Sync {
    async fn next_question(&self, prompt: &Prompt) -> Result<String>;

    async fn write_readme(&self, prompt: &Prompt) -> Result<String>;
}

#[derive(Deserialize)]
struct AskNextQuestion {
    question: String,
}

/// A chat model reached through the `llm` crate.
pub struct LlmModel {
    backend: LLMBackend,
    api_key: String,
    model: String,
    base_url: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl LlmModel {
    pub fn new(config: &Config, api_key: String) -> Result<Self> {
        let backend = config
            .backend
            .parse::<LLMBackend>()
            .map_err(|e| anyhow::anyhow!("Unknown backend '{}': {}", config.backend, e))?;
        Ok(Self {
            backend,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn builder(&self, system: &str) -> LLMBuilder {
        let mut builder = LLMBuilder::new()
            .backend(self.backend.clone())
            .api_key(self.api_key.clone())
            .model(self.model.clone())
            .system(system.to_string());

        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.clone());
        }
        if let Some(max_tokens) = self.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            builder = builder.temperature(temperature);
        }
        builder
    }
}

#[async_trait]
impl ReadmeModel for LlmModel {
    async fn next_question(&self, prompt: &Prompt) -> Result<String> {
        let llm = self
            .builder(&prompt.system)
            .function(
                FunctionBuilder::new(ASK_NEXT_QUESTION)
                    .description("Ask the user the next question.")
                    .param(
                        ParamBuilder::new("question")
                            .type_of("string")
                            .description(
                                "The question to ask the user, for example, 'What is your project called?'",
                            ),
                    )
                    .required(vec!["question".to_string()]),
            )
            .tool_choice(ToolChoice::Tool(ASK_NEXT_QUESTION.to_string()))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build LLM ({}): {}", self.model, e))?;

        let messages = vec![ChatMessage::user().content(prompt.user.clone()).build()];
        tracing::debug!(model = %self.model, "requesting next question");
        let response = llm
            .chat_with_tools(&messages, llm.tools())
            .await
            .map_err(|e| anyhow::anyhow!("Chat error: {e}"))?;

        let arguments = response
            .tool_calls()
            .unwrap_or_default()
            .into_iter()
            .find(|call| call.function.name == ASK_NEXT_QUESTION)
            .map(|call| call.function.arguments);

        match arguments {
            Some(arguments) => parse_question(&arguments),
            None => {
                // Not every backend honors a forced tool choice.
                tracing::warn!("model answered without calling {}", ASK_NEXT_QUESTION);
                question_from_text(response.text())
            }
        }
    }

    async fn write_readme(&self, prompt: &Prompt) -> Result<String> {
        let llm = self
            .builder(&prompt.system)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build LLM ({}): {}", self.model, e))?;

        let messages = vec![ChatMessage::user().content(prompt.user.clone()).build()];
        tracing::debug!(model = %self.model, "requesting README");
        let response = llm
            .chat(&messages)
            .await
            .map_err(|e| anyhow::anyhow!("Chat error: {e}"))?;

        response
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("The model returned an empty README."))
    }
}

fn parse_question(arguments: &str) -> Result<String> {
    let args: AskNextQuestion = serde_json::from_str(arguments).map_err(|e| {
        anyhow::anyhow!(
            "Malformed {} arguments {:?}: {}",
            ASK_NEXT_QUESTION,
            arguments,
            e
        )
    })?;
    question_from_text(Some(args.question))
}

fn question_from_text(text: Option<String>) -> Result<String> {
    text.map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| anyhow::anyhow!("The model did not return a question."))
}

/// Scripted model for tests, configured through `MOCK_LLM*` variables.
pub struct MockModel {
    questions: Mutex<VecDeque<String>>,
    readme: Option<String>,
}

impl MockModel {
    pub fn new(questions: Vec<String>, readme: Option<String>) -> Self {
        Self {
            questions: Mutex::new(questions.into()),
            readme,
        }
    }

    pub fn from_env() -> Option<Self> {
        let questions = std::env::var("MOCK_LLM_QUESTIONS").ok();
        let readme = std::env::var("MOCK_LLM_CONTENT").ok();
        if questions.is_none() && readme.is_none() && std::env::var("MOCK_LLM").is_err() {
            return None;
        }

        let questions = questions
            .map(|q| {
                q.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Some(Self::new(questions, readme))
    }
}

#[async_trait]
impl ReadmeModel for MockModel {
    async fn next_question(&self, _prompt: &Prompt) -> Result<String> {
        let mut questions = self
            .questions
            .lock()
            .map_err(|_| anyhow::anyhow!("mock question queue poisoned"))?;
        Ok(questions
            .pop_front()
            .unwrap_or_else(|| MOCK_FOLLOW_UP.to_string()))
    }

    async fn write_readme(&self, prompt: &Prompt) -> Result<String> {
        Ok(self.readme.clone().unwrap_or_else(|| prompt.user.clone()))
    }
}
