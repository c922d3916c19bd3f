use colored::Colorize;

/// Sink for the text a demo narrates.
///
/// Demos never call `println!` directly; they go through a `Narrator` so the
/// same demo can print to the console or be captured and asserted on.
pub trait Narrator {
    /// Emits a section title.
    fn heading(&mut self, title: &str);

    /// Emits a single line of narration.
    fn line(&mut self, text: &str);

    /// Emits an empty separator line.
    fn blank(&mut self) {
        self.line("");
    }

    /// Emits every line in order.
    fn lines(&mut self, lines: &[String]) {
        for line in lines {
            self.line(line);
        }
    }
}

/// Prints narration to standard output.
///
/// Headings are bold cyan unless colour has been disabled in the config.
pub struct ConsoleNarrator {
    colored: bool,
}

impl ConsoleNarrator {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }
}

impl Narrator for ConsoleNarrator {
    fn heading(&mut self, title: &str) {
        if self.colored {
            println!("{}", title.cyan().bold());
        } else {
            println!("{title}");
        }
    }

    fn line(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Records narration in memory.
#[derive(Debug, Default)]
pub struct MemoryNarrator {
    headings: Vec<String>,
    lines: Vec<String>,
}

impl MemoryNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headings(&self) -> &[String] {
        &self.headings
    }

    /// Every recorded line, headings included, in emission order.
    pub fn transcript(&self) -> &[String] {
        &self.lines
    }

    /// Whether any recorded line contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl Narrator for MemoryNarrator {
    fn heading(&mut self, title: &str) {
        self.headings.push(title.to_string());
        self.lines.push(title.to_string());
    }

    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_narrator_keeps_order() {
        let mut narrator = MemoryNarrator::new();
        narrator.heading("Demo");
        narrator.line("first");
        narrator.blank();
        narrator.lines(&["second".to_string(), "third".to_string()]);

        assert_eq!(narrator.headings(), ["Demo"]);
        assert_eq!(
            narrator.transcript(),
            ["Demo", "first", "", "second", "third"]
        );
        assert!(narrator.mentions("sec"));
        assert!(!narrator.mentions("fourth"));
    }
}
