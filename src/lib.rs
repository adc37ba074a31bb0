use clap::Parser;
use std::io;
use std::path::Path;

pub mod cli;
pub mod config;
pub mod credentials;
pub mod generator;
pub mod input;
pub mod llm;
pub mod output;
pub mod prompt;
pub mod session;

use generator::{Generator, LoadPolicy};
use input::Console;
use session::SessionStore;

pub async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let mut config = config::load()?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    let store = if cli.no_save {
        SessionStore::disabled()
    } else {
        SessionStore::new(&config.sessions_dir)
    };
    let policy = match (cli.resume, cli.fresh) {
        (true, _) => LoadPolicy::Resume,
        (_, true) => LoadPolicy::Fresh,
        _ => LoadPolicy::Ask,
    };

    let mut console = Console::new(io::stdin().lock(), io::stdout()).with_editor(cli.editor);

    // Tests script the model through MOCK_LLM*, which needs no API key.
    let readme = match llm::MockModel::from_env() {
        Some(model) => {
            Generator::new(&cli.project_name, store, model)
                .run(&mut console, policy)
                .await?
        }
        None => {
            let api_key =
                credentials::resolve(cli.api_key.as_deref(), Path::new(&config.api_key_path))?;
            let model = llm::LlmModel::new(&config, api_key)?;
            Generator::new(&cli.project_name, store, model)
                .run(&mut console, policy)
                .await?
        }
    };

    output::write_readme(&cli.file, &readme)
}
