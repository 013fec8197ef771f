//! Line-oriented user input: commands, form fields, confirmations, alerts.

use std::io::{self, BufRead, Write};

/// Source of user input and sink for console output.
pub trait Prompter {
    /// Show `prompt` and read one line without its terminator. `None` at end
    /// of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Ask a yes/no question; anything but `y`/`yes` is no.
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        let answer = self.read_line(&format!("{message} [y/N] "))?;
        Ok(answer.is_some_and(|a| matches!(a.trim().to_ascii_lowercase().as_str(), "y" | "yes")))
    }

    /// Ask for a value. An empty answer picks `default` when there is one.
    fn prompt(&mut self, message: &str, default: Option<&str>) -> io::Result<Option<String>> {
        let label = match default {
            Some(d) => format!("{message} [{d}]: "),
            None => format!("{message}: "),
        };
        let Some(answer) = self.read_line(&label)? else {
            return Ok(None);
        };
        match default {
            Some(d) if answer.trim().is_empty() => Ok(Some(d.to_string())),
            _ => Ok(Some(answer)),
        }
    }

    /// Blocking notice: waits for one acknowledgement line before returning.
    fn alert(&mut self, message: &str) -> io::Result<()> {
        self.write(&format!("!! {message}\n"))?;
        self.read_line("Press Enter to continue. ")?;
        Ok(())
    }
}

/// Prompter over any line reader and writer (stdin/stdout in the binary).
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.writer.write_all(prompt.as_bytes())?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reads_lines_until_end_of_input() {
        let mut p = prompter("first\r\nsecond\n");
        assert_eq!(p.read_line("> ").unwrap().as_deref(), Some("first"));
        assert_eq!(p.read_line("> ").unwrap().as_deref(), Some("second"));
        assert_eq!(p.read_line("> ").unwrap(), None);
        assert_eq!(String::from_utf8(p.into_writer()).unwrap(), "> > > ");
    }

    #[test]
    fn prompt_uses_default_for_empty_answer() {
        let mut p = prompter("\n2048\n");
        assert_eq!(
            p.prompt("Storage (MB)", Some("1024")).unwrap().as_deref(),
            Some("1024")
        );
        assert_eq!(
            p.prompt("Storage (MB)", Some("1024")).unwrap().as_deref(),
            Some("2048")
        );
    }

    #[test]
    fn alert_waits_for_acknowledgement() {
        let mut p = prompter("\nnext\n");
        p.alert("Invalid credentials.").unwrap();
        assert_eq!(p.read_line("> ").unwrap().as_deref(), Some("next"));
        assert_eq!(
            String::from_utf8(p.into_writer()).unwrap(),
            "!! Invalid credentials.\nPress Enter to continue. > "
        );
    }

    #[test]
    fn confirm_defaults_to_no() {
        let mut p = prompter("y\n\nnope\n");
        assert!(p.confirm("Delete?").unwrap());
        assert!(!p.confirm("Delete?").unwrap());
        assert!(!p.confirm("Delete?").unwrap());
        assert!(!p.confirm("Delete?").unwrap());
    }
}
