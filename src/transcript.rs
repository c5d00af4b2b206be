//! Markdown export of a finished dialogue.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::dialogue::ConversationTurn;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Read-only view of a conversation plus its export metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub title: String,
    pub subtitle: Option<String>,
    /// Local wall-clock time the transcript was created.
    pub generated_at: NaiveDateTime,
    pub turns: Vec<ConversationTurn>,
}

impl Transcript {
    /// Creates a transcript stamped with the current local time.
    pub fn new(
        title: impl Into<String>,
        subtitle: Option<String>,
        turns: Vec<ConversationTurn>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle,
            generated_at: Local::now().naive_local(),
            turns,
        }
    }

    /// Overrides the generation timestamp.
    #[must_use]
    pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = at;
        self
    }

    /// Renders the "book dialogue" Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.title.trim());
        if let Some(subtitle) = self
            .subtitle
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            out.push_str(&format!("_{subtitle}_\n\n"));
        }
        out.push_str(&format!(
            "> Transcript gerado em {}\n\n---\n\n",
            self.generated_at.format(TIMESTAMP_FORMAT)
        ));
        for turn in &self.turns {
            out.push_str(&format!(
                "**{}**: {}\n\n",
                turn.speaker.trim(),
                turn.text.trim()
            ));
        }
        out
    }
}

/// Writes transcripts to a fixed destination, replacing any previous file.
#[derive(Debug, Clone)]
pub struct TranscriptWriter {
    path: PathBuf,
}

impl TranscriptWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshots `turns` into a transcript and writes it.
    pub fn export(
        &self,
        turns: &[ConversationTurn],
        title: &str,
        subtitle: Option<&str>,
    ) -> io::Result<Transcript> {
        let transcript = Transcript::new(title, subtitle.map(str::to_string), turns.to_vec());
        self.write(&transcript)?;
        Ok(transcript)
    }

    /// Writes `transcript`, creating missing parent directories.
    pub fn write(&self, transcript: &Transcript) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, transcript.to_markdown())?;
        log::info!(
            "wrote {} turns to {}",
            transcript.turns.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 12)
            .and_then(|d| d.and_hms_opt(hour, min, 0))
            .expect("valid timestamp")
    }

    fn sample_turns() -> Vec<ConversationTurn> {
        vec![
            ConversationTurn::new("Homem (40)", "  Olá! Café amanhã?  "),
            ConversationTurn::new("Mulher (35)", "Combinado.\n"),
        ]
    }

    #[test]
    fn renders_book_dialogue_markdown() {
        let transcript = Transcript::new("Do Match ao Cappuccino", Some("pt-PT".into()), sample_turns())
            .generated_at(at(19, 5));

        assert_eq!(
            transcript.to_markdown(),
            "# Do Match ao Cappuccino\n\n\
             _pt-PT_\n\n\
             > Transcript gerado em 2025-06-12 19:05\n\n\
             ---\n\n\
             **Homem (40)**: Olá! Café amanhã?\n\n\
             **Mulher (35)**: Combinado.\n\n"
        );
    }

    #[test]
    fn omits_blank_subtitle() {
        let transcript = Transcript::new("T", Some("  ".into()), Vec::new()).generated_at(at(8, 0));
        assert_eq!(
            transcript.to_markdown(),
            "# T\n\n> Transcript gerado em 2025-06-12 08:00\n\n---\n\n"
        );
    }

    #[test]
    fn export_creates_directories_and_overwrites() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("out").join("dialogue.md");
        let writer = TranscriptWriter::new(&path);

        writer
            .export(&sample_turns(), "Primeiro", None)
            .expect("first export");
        writer
            .export(&sample_turns()[..1], "Segundo", None)
            .expect("second export");

        let written = fs::read_to_string(&path).expect("read transcript");
        assert!(written.starts_with("# Segundo\n"));
        assert!(!written.contains("Primeiro"));
        assert!(!written.contains("Mulher (35)"));
    }

    #[test]
    fn rewriting_same_turns_differs_only_in_timestamp() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("dialogue.md");
        let writer = TranscriptWriter::new(&path);
        let base = Transcript::new("T", Some("S".into()), sample_turns());

        writer.write(&base.clone().generated_at(at(10, 0))).expect("write");
        let first = fs::read_to_string(&path).expect("read");
        writer.write(&base.clone().generated_at(at(10, 0))).expect("write");
        let second = fs::read_to_string(&path).expect("read");
        assert_eq!(first, second);

        writer.write(&base.generated_at(at(11, 30))).expect("write");
        let third = fs::read_to_string(&path).expect("read");
        let differing: Vec<_> = first
            .lines()
            .zip(third.lines())
            .filter(|(a, b)| a != b)
            .collect();
        assert_eq!(differing.len(), 1);
        assert!(differing[0].0.contains("10:00"));
        assert!(differing[0].1.contains("11:30"));
    }

    #[test]
    fn export_error_is_propagated() {
        let dir = tempdir().expect("tempdir");
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").expect("write blocker");
        let writer = TranscriptWriter::new(blocker.join("nested.md"));
        assert!(writer.export(&sample_turns(), "T", None).is_err());
    }
}
