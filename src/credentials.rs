use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Finds the API key: the flag or env value, then the saved key file, then a
/// hidden prompt whose answer is saved for next time.
pub fn resolve(explicit: Option<&str>, key_path: &Path) -> Result<String> {
    if let Some(key) = non_empty(explicit) {
        return Ok(key);
    }

    if let Some(key) = read_saved(key_path)? {
        tracing::debug!(path = %key_path.display(), "using saved API key");
        return Ok(key);
    }

    let entered = rpassword::prompt_password("OpenAI API key: ")?;
    let key = non_empty(Some(&entered)).ok_or_else(|| anyhow::anyhow!("No API key provided."))?;
    save(key_path, &key)?;
    Ok(key)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

pub fn read_saved(key_path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(key_path) {
        Ok(contents) => Ok(non_empty(Some(&contents))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", key_path.display())),
    }
}

pub fn save(key_path: &Path, key: &str) -> Result<()> {
    if let Some(parent) = key_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(key_path, key).with_context(|| format!("Failed to write {}", key_path.display()))?;
    tracing::info!(path = %key_path.display(), "saved API key");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_key_wins() -> Result<()> {
        let temp_dir = tempdir()?;
        let key_path = temp_dir.path().join("api_key");
        fs::write(&key_path, "saved-key")?;

        assert_eq!(resolve(Some(" flag-key "), &key_path)?, "flag-key");
        Ok(())
    }

    #[test]
    fn test_saved_key_is_used_when_flag_is_blank() -> Result<()> {
        let temp_dir = tempdir()?;
        let key_path = temp_dir.path().join("api_key");
        fs::write(&key_path, "saved-key\n")?;

        assert_eq!(resolve(Some(""), &key_path)?, "saved-key");
        assert_eq!(resolve(None, &key_path)?, "saved-key");
        Ok(())
    }

    #[test]
    fn test_read_saved_missing_or_blank() -> Result<()> {
        let temp_dir = tempdir()?;
        let key_path = temp_dir.path().join("api_key");
        assert_eq!(read_saved(&key_path)?, None);

        fs::write(&key_path, "  \n")?;
        assert_eq!(read_saved(&key_path)?, None);
        Ok(())
    }

    #[test]
    fn test_save_creates_parent_directories() -> Result<()> {
        let temp_dir = tempdir()?;
        let key_path = temp_dir.path().join("config/readme-creator/api_key");
        save(&key_path, "secret")?;
        assert_eq!(read_saved(&key_path)?, Some("secret".to_string()));
        Ok(())
    }
}
