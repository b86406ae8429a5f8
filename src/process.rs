//! Whole-document comment removal — line-by-line state machine.
//!
//! Walks a file one physical line at a time, carrying a [`LexicalMode`]
//! across lines:
//!
//! - **Header**: blank lines, the shebang and magic directives at the top of
//!   the file are kept; other leading comments are removed.
//! - **Normal**: code lines are split with [`LineScanner`] and their comment
//!   spans classified with [`classify`].
//! - **InBlockComment**: everything up to and including `=end` is removed.
//! - **InHeredoc**: heredoc bodies are copied verbatim up to the delimiter.
//!
//! Every removed comment is recorded with its original line number.

use crate::classify::{classify, Category};
use crate::scanner::LineScanner;
use serde::Serialize;

const BLOCK_COMMENT_OPEN: &str = "=begin";
const BLOCK_COMMENT_CLOSE: &str = "=end";

/// `=begin`/`=end` alone, or followed by whitespace and trailing text.
fn is_block_marker(stripped: &str, marker: &str) -> bool {
    stripped
        .strip_prefix(marker)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Cross-line lexical state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexicalMode {
    #[default]
    Header,
    Normal,
    InBlockComment,
    /// Inside a heredoc body closed by the given delimiter.
    InHeredoc(String),
}

/// Options for [`process`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Keep documentation comments (`# @param ...`, `# :nodoc:`, comments
    /// directly above `class`/`module`) in place and out of the report.
    pub keep_doc_comments: bool,
}

/// A comment that was removed: 1-based line number in the input and the
/// stripped comment text, marker included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRecord {
    pub line: usize,
    pub text: String,
}

impl CommentRecord {
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

/// Output of [`process`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessingResult {
    /// Cleaned file content. Empty, or ending in exactly one `\n`.
    pub cleaned: String,
    /// Removed comments in ascending line order.
    pub comments: Vec<CommentRecord>,
}

/// A kept output line.
#[derive(Debug)]
enum Emitted {
    Code(String),
    /// Heredoc body line; survives blank-line collapse.
    Literal(String),
}

/// Per-file processor. Construct one per document; it is consumed by
/// [`DocumentProcessor::process`].
#[derive(Debug, Default)]
pub struct DocumentProcessor {
    options: ProcessOptions,
    mode: LexicalMode,
    line_number: usize,
    output: Vec<Emitted>,
    comments: Vec<CommentRecord>,
}

/// Process one document with a fresh [`DocumentProcessor`].
pub fn process(content: &str, options: ProcessOptions) -> ProcessingResult {
    DocumentProcessor::new(options).process(content)
}

impl DocumentProcessor {
    pub fn new(options: ProcessOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    #[cfg(test)]
    fn mode(&self) -> &LexicalMode {
        &self.mode
    }

    pub fn process(mut self, content: &str) -> ProcessingResult {
        let lines: Vec<&str> = content.lines().collect();

        for (idx, line) in lines.iter().enumerate() {
            self.line_number = idx + 1;
            let next = lines.get(idx + 1).map(|l| l.trim());
            self.process_line(line, next);
        }

        if let LexicalMode::InHeredoc(ref delim) = self.mode {
            log::debug!("heredoc {} not closed before end of input", delim);
        }

        ProcessingResult {
            cleaned: self.finish(),
            comments: self.comments,
        }
    }

    // -- Dispatch -------------------------------------------------------------

    fn process_line(&mut self, line: &str, next: Option<&str>) {
        let stripped = line.trim();
        match self.mode {
            LexicalMode::Header => self.handle_header(line, stripped, next),
            LexicalMode::Normal => self.handle_normal(line, stripped, next),
            LexicalMode::InBlockComment => self.handle_block_comment(stripped),
            LexicalMode::InHeredoc(ref delim) => {
                let closes = LineScanner::is_heredoc_close(stripped, delim);
                self.output.push(Emitted::Literal(line.to_string()));
                if closes {
                    log::trace!("line {}: heredoc closed", self.line_number);
                    self.mode = LexicalMode::Normal;
                }
            }
        }
    }

    fn handle_header(&mut self, line: &str, stripped: &str, next: Option<&str>) {
        if stripped.is_empty() || stripped.starts_with("#!") {
            self.keep(line);
            return;
        }
        if !stripped.starts_with('#') {
            // First code line: the header is over.
            self.mode = LexicalMode::Normal;
            self.handle_normal(line, stripped, next);
            return;
        }
        match classify(stripped, next) {
            Category::MagicDirective | Category::ToolDirective => self.keep(line),
            Category::DocComment if self.options.keep_doc_comments => self.keep(line),
            _ => self.record(stripped),
        }
    }

    fn handle_normal(&mut self, line: &str, stripped: &str, next: Option<&str>) {
        if is_block_marker(stripped, BLOCK_COMMENT_OPEN) {
            log::trace!("line {}: block comment opened", self.line_number);
            self.record(stripped);
            self.mode = LexicalMode::InBlockComment;
            return;
        }

        if let Some(delim) = LineScanner::detect_heredoc_open(line) {
            log::trace!("line {}: heredoc {} opened", self.line_number, delim);
            self.keep(line);
            self.mode = LexicalMode::InHeredoc(delim);
            return;
        }

        let scan = LineScanner::split_line(line);
        let Some(comment) = scan.comment else {
            self.keep(line);
            return;
        };
        let comment = comment.trim();

        match classify(comment, next) {
            Category::ToolDirective => self.keep(line),
            Category::DocComment if self.options.keep_doc_comments => self.keep(line),
            // Stripping the comment must not leave a bare block marker behind.
            _ if is_block_marker(scan.code.trim(), BLOCK_COMMENT_OPEN) => self.keep(line),
            _ => {
                self.record(comment);
                self.keep(scan.code);
            }
        }
    }

    fn handle_block_comment(&mut self, stripped: &str) {
        self.record(stripped);
        if is_block_marker(stripped, BLOCK_COMMENT_CLOSE) {
            log::trace!("line {}: block comment closed", self.line_number);
            self.mode = LexicalMode::Normal;
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Keep `text` with trailing whitespace removed. Whitespace-only text is
    /// dropped by the final collapse.
    fn keep(&mut self, text: &str) {
        self.output.push(Emitted::Code(text.trim_end().to_string()));
    }

    fn record(&mut self, text: &str) {
        self.comments
            .push(CommentRecord::new(self.line_number, text.to_string()));
    }

    /// Collapse blank lines and join with a single trailing newline.
    fn finish(&mut self) -> String {
        let mut cleaned = String::new();
        for emitted in self.output.drain(..) {
            let text = match emitted {
                Emitted::Code(text) if text.trim().is_empty() => continue,
                Emitted::Code(text) | Emitted::Literal(text) => text,
            };
            cleaned.push_str(&text);
            cleaned.push('\n');
        }
        cleaned
    }
}
