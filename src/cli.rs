use clap::Parser;
use std::path::PathBuf;

/// Write a README for your project by answering questions from an AI model.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The name of the project
    pub project_name: String,

    /// Your OpenAI API key
    #[arg(short = 'k', long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// The file to write the README to. Use `-` for stdout.
    #[arg(short, long, default_value = "README.md")]
    pub file: PathBuf,

    /// The model to use (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// The provider backend, e.g. `openai` or `google` (overrides config)
    #[arg(long)]
    pub backend: Option<String>,

    /// Load the previous session for this project without asking
    #[arg(long, conflicts_with = "fresh")]
    pub resume: bool,

    /// Ignore any previous session for this project
    #[arg(long)]
    pub fresh: bool,

    /// Do not save answers to the session file
    #[arg(long)]
    pub no_save: bool,

    /// Write each answer in $EDITOR
    #[arg(short, long)]
    pub editor: bool,
}
