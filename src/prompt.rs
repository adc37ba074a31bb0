use crate::session::QuestionAnswer;
use anyhow::Result;
use minijinja::{context, Environment};

pub const PROJECT_NAME_QUESTION: &str = "What is the name of your project?";

const QUESTION_SYSTEM: &str = "question_system.md.j2";
const QUESTION_USER: &str = "question_user.md.j2";
const README_SYSTEM: &str = "readme_system.md.j2";
const README_USER: &str = "readme_user.md.j2";

/// A system message and the user message that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template(QUESTION_SYSTEM, include_str!("../prompts/question_system.md.j2"))?;
    env.add_template(QUESTION_USER, include_str!("../prompts/question_user.md.j2"))?;
    env.add_template(README_SYSTEM, include_str!("../prompts/readme_system.md.j2"))?;
    env.add_template(README_USER, include_str!("../prompts/readme_user.md.j2"))?;
    Ok(env)
}

/// The project name answer first, then every recorded answer, blank-line separated.
fn questions_block(project_name: &str, records: &[QuestionAnswer]) -> String {
    std::iter::once(QuestionAnswer::new(PROJECT_NAME_QUESTION, project_name))
        .chain(records.iter().cloned())
        .map(|qa| qa.to_markdown())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render(
    system: &str,
    user: &str,
    project_name: &str,
    records: &[QuestionAnswer],
) -> Result<Prompt> {
    let env = environment()?;
    let questions = questions_block(project_name, records);
    Ok(Prompt {
        system: env.get_template(system)?.render(context! {})?,
        user: env
            .get_template(user)?
            .render(context! { questions => questions })?,
    })
}

/// Asks the model for one more question to put to the user.
pub fn question_prompt(project_name: &str, records: &[QuestionAnswer]) -> Result<Prompt> {
    render(QUESTION_SYSTEM, QUESTION_USER, project_name, records)
}

/// Asks the model for the finished README.
pub fn readme_prompt(project_name: &str, records: &[QuestionAnswer]) -> Result<Prompt> {
    render(README_SYSTEM, README_USER, project_name, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<QuestionAnswer> {
        vec![
            QuestionAnswer::new("What problem does it solve?", "Writing READMEs is tedious."),
            QuestionAnswer::new("How do I use it?", "Run it and answer\nthe questions."),
        ]
    }

    #[test]
    fn test_question_prompt() {
        let prompt = question_prompt("readme-creator", &records()).unwrap();

        assert!(prompt.system.starts_with("You are a README generator."));
        assert!(prompt.system.contains("the problem it solves, and how to use it."));

        let expected = "I am writing a README for my project that I'm planning to publish on github. \
Here are some questions and answers that I think matter.\n\n\
**What is the name of your project?**\nreadme-creator\n\n\
**What problem does it solve?**\nWriting READMEs is tedious.\n\n\
**How do I use it?**\nRun it and answer\nthe questions.\n\n\
Ask another question that you think is important for a README file. I will add it to the list.";
        assert_eq!(prompt.user, expected);
    }

    #[test]
    fn test_question_prompt_without_answers() {
        let prompt = question_prompt("demo", &[]).unwrap();
        assert!(prompt
            .user
            .contains("matter.\n\n**What is the name of your project?**\ndemo\n\nAsk another"));
    }

    #[test]
    fn test_readme_prompt() {
        let prompt = readme_prompt("readme-creator", &records()).unwrap();

        assert!(prompt.system.contains("the README itself, in Markdown."));

        let expected = "Here are some questions and answers about my project:\n\n\
**What is the name of your project?**\nreadme-creator\n\n\
**What problem does it solve?**\nWriting READMEs is tedious.\n\n\
**How do I use it?**\nRun it and answer\nthe questions.\n\n\
Write a readme for my project. Follow usual conventions for a readme file.";
        assert_eq!(prompt.user, expected);
    }

    #[test]
    fn test_answers_are_not_template_syntax() {
        let records = vec![QuestionAnswer::new("Example?", "{{ questions }} <b>&</b>")];
        let prompt = readme_prompt("demo", &records).unwrap();
        assert!(prompt.user.contains("**Example?**\n{{ questions }} <b>&</b>"));
    }
}
