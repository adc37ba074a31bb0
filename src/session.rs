//! Saved question/answer sessions, one JSON file per project.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

impl QuestionAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Bold question followed by the answer on the next line.
    pub fn to_markdown(&self) -> String {
        format!("**{}**\n{}", self.question, self.answer)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    questions: Vec<QuestionAnswer>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("session file {path} is not valid: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Stores sessions under a directory. A store without a directory keeps nothing.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: Option<PathBuf>,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { dir: None }
    }

    pub fn file_path(&self, project_name: &str) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", file_stem(project_name))))
    }

    pub fn exists(&self, project_name: &str) -> bool {
        self.file_path(project_name).is_some_and(|path| path.is_file())
    }

    pub fn load(&self, project_name: &str) -> Result<Vec<QuestionAnswer>, SessionError> {
        let Some(path) = self.file_path(project_name) else {
            return Ok(Vec::new());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no saved session");
                return Ok(Vec::new());
            }
            Err(source) => return Err(SessionError::Io { path, source }),
        };

        let session: SessionFile =
            serde_json::from_str(&contents).map_err(|source| SessionError::Json {
                path: path.clone(),
                source,
            })?;
        tracing::info!(
            path = %path.display(),
            count = session.questions.len(),
            "loaded session"
        );
        Ok(session.questions)
    }

    pub fn save(&self, project_name: &str, records: &[QuestionAnswer]) -> Result<(), SessionError> {
        let Some(path) = self.file_path(project_name) else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let session = SessionFile {
            questions: records.to_vec(),
        };
        let json = serde_json::to_string(&session).map_err(|source| SessionError::Json {
            path: path.clone(),
            source,
        })?;
        write_file(&path, &json)?;
        tracing::debug!(path = %path.display(), count = records.len(), "saved session");
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), SessionError> {
    fs::write(path, contents).map_err(|source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn file_stem(project_name: &str) -> String {
    let stem: String = project_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    // "." and ".." would still resolve outside the file name.
    if stem.chars().all(|c| c == '.') {
        stem.replace('.', "_")
    } else {
        stem
    }
}
