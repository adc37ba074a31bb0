use anyhow::Result;
use std::io::{BufRead, Write};

/// Terminal prompts over any reader/writer pair.
pub struct Console<R, W> {
    reader: R,
    writer: W,
    use_editor: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            use_editor: false,
        }
    }

    /// Compose answers in `$EDITOR` instead of on the terminal.
    pub fn with_editor(mut self, use_editor: bool) -> Self {
        self.use_editor = use_editor;
        self
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Reads lines until a blank line or EOF and returns them trimmed.
    pub fn read_multiline(&mut self, prompt: &str) -> Result<String> {
        if self.use_editor {
            writeln!(self.writer, "{} (Save and close the editor to finish.)", prompt)?;
            self.writer.flush()?;
            let text = edit::edit("")?;
            return Ok(text.trim().to_string());
        }

        writeln!(self.writer, "{} (Finish with an empty line.)", prompt)?;
        self.writer.flush()?;

        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                break;
            }
            lines.push(line.to_string());
        }
        Ok(lines.join("\n").trim().to_string())
    }

    /// A `[Y/n]` question where an empty answer means yes and EOF means no.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.writer, "{} [Y/n] ", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let answer = line.trim().to_lowercase();
        Ok(matches!(answer.as_str(), "" | "y" | "yes"))
    }
}
