use crate::input::Console;
use crate::llm::ReadmeModel;
use crate::prompt;
use crate::session::{QuestionAnswer, SessionStore};
use anyhow::Result;
use std::io::{BufRead, Write};

pub const LOAD_QUESTION: &str = "Would you like to load the configuration from a previous session?";
pub const ANSWER_HINT: &str = " Leave empty to generate the README";

/// What to do with a saved session for the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPolicy {
    Ask,
    Resume,
    Fresh,
}

pub struct Generator<M> {
    project_name: String,
    store: SessionStore,
    model: M,
    records: Vec<QuestionAnswer>,
}

impl<M: ReadmeModel> Generator<M> {
    pub fn new(project_name: impl Into<String>, store: SessionStore, model: M) -> Self {
        Self {
            project_name: project_name.into(),
            store,
            model,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[QuestionAnswer] {
        &self.records
    }

    /// Runs the question loop and returns the generated README.
    pub async fn run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        policy: LoadPolicy,
    ) -> Result<String> {
        self.load_previous(console, policy)?;

        while let Some(record) = self.ask_next_question(console).await? {
            self.records.push(record);
            self.store.save(&self.project_name, &self.records)?;
        }

        self.generate_readme().await
    }

    fn load_previous<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        policy: LoadPolicy,
    ) -> Result<()> {
        if !self.store.exists(&self.project_name) {
            return Ok(());
        }

        let load = match policy {
            LoadPolicy::Resume => true,
            LoadPolicy::Fresh => false,
            LoadPolicy::Ask => console.confirm(LOAD_QUESTION)?,
        };
        if load {
            self.records = self.store.load(&self.project_name)?;
            writeln!(
                console.writer(),
                "Loaded {} answer(s) from the previous session.",
                self.records.len()
            )?;
        } else {
            tracing::info!(project = %self.project_name, "starting a fresh session");
        }
        Ok(())
    }

    /// `None` once the user leaves the answer empty.
    async fn ask_next_question<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<Option<QuestionAnswer>> {
        let prompt = prompt::question_prompt(&self.project_name, &self.records)?;
        let question = self.model.next_question(&prompt).await?;
        tracing::debug!(%question, "model asked");

        let answer = console.read_multiline(&format!("{}{}", question, ANSWER_HINT))?;
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(QuestionAnswer::new(question, answer)))
    }

    async fn generate_readme(&self) -> Result<String> {
        let prompt = prompt::readme_prompt(&self.project_name, &self.records)?;
        tracing::info!(
            project = %self.project_name,
            answers = self.records.len(),
            "generating README"
        );
        self.model.write_readme(&prompt).await
    }
}
