/// Indentation unit of the generated C#
const INDENT: &str = "  ";

/// Output buffer that accumulates generated code line by line
pub struct Output {
    lines: Vec<String>,
    current_line: String,
}

impl Output {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            current_line: String::new(),
        }
    }

    /// Add text to the current line
    pub fn push(&mut self, text: &str) {
        self.current_line.push_str(text);
    }

    /// Add `level` indentation units to the current line
    pub fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.current_line.push_str(INDENT);
        }
    }

    /// Add a newline
    pub fn newline(&mut self) {
        self.current_line.push('\n');
        self.lines.push(std::mem::take(&mut self.current_line));
    }

    /// Emit one complete line at `level`. Empty text produces an empty line
    /// without trailing whitespace.
    pub fn line(&mut self, level: usize, text: &str) {
        if !text.is_empty() {
            self.indent(level);
            self.push(text);
        }
        self.newline();
    }

    /// Separate the next member from the previous one with an empty line,
    /// unless the previous line already is empty or opens a block.
    pub fn blank_line(&mut self) {
        if !self.current_line.is_empty() {
            self.newline();
        }
        let needs_blank = match self.lines.last() {
            Some(last) => {
                let trimmed = last.trim_end();
                !trimmed.is_empty() && !trimmed.ends_with('{')
            }
            None => false,
        };
        if needs_blank {
            self.newline();
        }
    }

    /// Open a `{` block at `level`
    pub fn open(&mut self, level: usize) {
        self.line(level, "{");
    }

    /// Close a block at `level` with `}` plus an optional suffix (`;`, `);`)
    pub fn close(&mut self, level: usize, suffix: &str) {
        self.line(level, &format!("}}{}", suffix));
    }

    /// Finish and return the generated code
    pub fn finish(mut self) -> String {
        if !self.current_line.is_empty() {
            self.lines.push(std::mem::take(&mut self.current_line));
        }
        self.lines.join("")
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
