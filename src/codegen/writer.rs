/// Line-oriented output buffer.
///
/// Text is collected into the current line with [`Writer::emit`] and flushed by
/// [`Writer::emitln`]. Indentation is applied when a line is flushed, so the
/// depth in effect at that moment wins.
#[derive(Debug, Default)]
pub struct Writer {
    buf: String,
    line: String,
    indent: usize,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, s: &str) {
        self.line.push_str(s);
    }

    pub fn emitln(&mut self, s: &str) {
        self.line.push_str(s);
        self.flush_line();
    }

    /// Flushes the current line if anything was written to it.
    pub fn end_line(&mut self) {
        if !self.line.trim().is_empty() {
            self.flush_line();
        } else {
            self.line.clear();
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Position after all completed lines.
    pub fn mark(&mut self) -> usize {
        self.end_line();
        self.buf.len()
    }

    /// Removes and returns everything written since `mark`.
    pub fn take_from(&mut self, mark: usize) -> String {
        self.end_line();
        if mark >= self.buf.len() {
            return String::new();
        }
        self.buf.split_off(mark)
    }

    pub fn finish(mut self) -> String {
        self.end_line();
        self.buf
    }

    fn flush_line(&mut self) {
        let text = self.line.trim_end();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.buf.push('\t');
            }
            self.buf.push_str(text.trim_start());
        }
        self.buf.push('\n');
        self.line.clear();
    }
}
