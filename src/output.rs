use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes the README to `path`, or to stdout when `path` is `-`.
pub fn write_readme(path: &Path, readme: &str) -> Result<()> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(readme.as_bytes())?;
        if !readme.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
        return Ok(());
    }

    fs::write(path, readme).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("README written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_overwrites_existing_file() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("README.md");
        fs::write(&path, "old contents that are longer")?;

        write_readme(&path, "# New")?;
        assert_eq!(fs::read_to_string(&path)?, "# New");
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_an_error() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("missing/README.md");
        let err = write_readme(&path, "# New").unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
        Ok(())
    }
}
