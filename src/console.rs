//! Terminal output for the CLI.
//!
//! Colors are used only when stdout is a TTY and `NO_COLOR` is unset.

use crate::model::{EntryState, Vocabulary};
use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// ANSI SGR attributes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Dim,
    Green,
    Yellow,
    Blue,
    Magenta,
    Gray,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Bold => "1",
            Style::Dim => "2",
            Style::Green => "32",
            Style::Yellow => "33",
            Style::Blue => "34",
            Style::Magenta => "35",
            Style::Gray => "90",
        }
    }
}

/// Severity of a status line, rendered as a colored `[LABEL]` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
}

impl Level {
    fn tag(self) -> (&'static str, Style) {
        match self {
            Level::Info => ("INFO", Style::Blue),
            Level::Success => ("OK", Style::Green),
            Level::Warning => ("WARN", Style::Yellow),
        }
    }
}

/// Styled writer for CLI status lines and dictionary entries.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    colors: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// Detects color support from the environment.
    pub fn new() -> Self {
        Self::with_colors(std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal())
    }

    pub fn with_colors(colors: bool) -> Self {
        Self { colors }
    }

    /// Wraps `text` in the given styles, or returns it unchanged when colors are off.
    pub fn paint(&self, text: &str, styles: &[Style]) -> String {
        if !self.colors || styles.is_empty() {
            return text.to_string();
        }
        let codes = styles.iter().map(|s| s.code()).collect::<Vec<_>>().join(";");
        format!("\x1b[{codes}m{text}{RESET}")
    }

    /// Formats a status line such as `[OK] Added 3 new words`.
    pub fn status_line(&self, level: Level, message: &str) -> String {
        let (tag, color) = level.tag();
        format!("[{}] {}", self.paint(tag, &[color, Style::Bold]), message)
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.status_line(Level::Info, message));
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.status_line(Level::Success, message));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.status_line(Level::Warning, message));
    }

    /// Prints a blank line and a bold heading.
    pub fn section(&self, title: &str) {
        println!("\n{}", self.paint(title, &[Style::Magenta, Style::Bold]));
    }

    /// Renders a dictionary entry as `headword → translation`, tagging known words.
    pub fn entry(&self, entry: &Vocabulary) -> String {
        let headword = self.paint(entry.headword(), &[Style::Bold]);
        let translation = if entry.is_translated() {
            self.paint(&entry.translation, &[Style::Green])
        } else {
            self.paint("(untranslated)", &[Style::Gray, Style::Dim])
        };

        let mut line = format!("{headword} → {translation}");
        if entry.state() == EntryState::Known {
            line.push(' ');
            line.push_str(&self.paint("[known]", &[Style::Gray, Style::Dim]));
        }
        line
    }

    pub fn count(&self, n: usize) -> String {
        self.paint(&n.to_string(), &[Style::Green, Style::Bold])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_without_colors() {
        let console = Console::with_colors(false);
        assert_eq!(console.paint("hello", &[Style::Green]), "hello");
    }

    #[test]
    fn test_paint_with_colors() {
        let console = Console::with_colors(true);
        assert_eq!(
            console.paint("hello", &[Style::Bold, Style::Yellow]),
            "\x1b[1;33mhello\x1b[0m"
        );
        assert_eq!(console.paint("plain", &[]), "plain");
    }

    #[test]
    fn test_status_lines() {
        let console = Console::with_colors(false);
        assert_eq!(console.status_line(Level::Info, "hi"), "[INFO] hi");
        assert_eq!(console.status_line(Level::Success, "done"), "[OK] done");
        assert_eq!(console.status_line(Level::Warning, "careful"), "[WARN] careful");
    }

    #[test]
    fn test_entry_rendering() {
        let console = Console::with_colors(false);
        assert_eq!(
            console.entry(&Vocabulary::new("house")),
            "house → (untranslated)"
        );

        let mut entry = Vocabulary::with_translation("house", "das Haus");
        assert_eq!(console.entry(&entry), "house → das Haus");

        entry.known = true;
        assert_eq!(console.entry(&entry), "house → das Haus [known]");
    }
}
