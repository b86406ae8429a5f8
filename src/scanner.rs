//! Per-line lexical scanning for Ruby source.
//!
//! Splits one physical line into a code span and an optional trailing
//! comment span. A `#` only starts a comment when it sits outside single-
//! and double-quoted strings and outside regex literals. Also recognizes
//! heredoc openers so the document processor can switch to verbatim mode.

use regex::Regex;
use std::sync::LazyLock;

/// `<<ID`, `<<-ID` or `<<~ID`, with the identifier optionally wrapped in a
/// matching pair of `"`, `'` or backticks.
static RE_HEREDOC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<<[-~]?(?:"([A-Za-z_]\w*)"|'([A-Za-z_]\w*)'|`([A-Za-z_]\w*)`|([A-Za-z_]\w*))"#,
    )
    .unwrap()
});

/// Characters after which a `/` starts a regex literal rather than a division.
const OPERATOR_CHARS: &[char] = &[
    '[', '=', '+', '-', '*', '/', '%', '|', '&', '!', '<', '>', '^', '~', '(', ',', '?', ':',
    ';', '{',
];

/// One line split at its first unguarded `#`.
///
/// `code` followed by `comment` (when present) is exactly the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult<'a> {
    pub code: &'a str,
    pub comment: Option<&'a str>,
}

/// Stateless line scanner.
pub struct LineScanner;

impl LineScanner {
    /// Split `line` into code and comment at the first `#` that is not
    /// inside a string or regex literal.
    ///
    /// A backslash suppresses the special meaning of the next character in
    /// every context. Scanning is total: a line with unbalanced quotes is
    /// simply treated as code from the point the quote opened.
    pub fn split_line(line: &str) -> ScanResult<'_> {
        let chars: Vec<char> = line.chars().collect();
        let mut in_single = false;
        let mut in_double = false;
        let mut in_regex = false;
        let mut escape = false;

        for (i, (pos, ch)) in line.char_indices().enumerate() {
            if escape {
                escape = false;
                continue;
            }
            match ch {
                '\\' => escape = true,
                '\'' if !in_double && !in_regex => in_single = !in_single,
                '"' if !in_single && !in_regex => in_double = !in_double,
                '/' if in_regex => in_regex = false,
                '/' if !in_single && !in_double && operator_precedes(&chars, i) => {
                    in_regex = true;
                }
                '#' if !in_single && !in_double && !in_regex => {
                    return ScanResult {
                        code: &line[..pos],
                        comment: Some(&line[pos..]),
                    };
                }
                _ => {}
            }
        }

        ScanResult {
            code: line,
            comment: None,
        }
    }

    /// Returns true if a `/` at char index `index` would open a regex literal.
    ///
    /// Walks back over whitespace. Start of line, a `::` pair, or one of
    /// [`OPERATOR_CHARS`] means regex; anything else (identifier characters,
    /// sigils, closing brackets, dots, quotes) means division. This is a
    /// heuristic and is wrong on some nested expressions.
    pub fn preceding_char_is_operator(line: &str, index: usize) -> bool {
        let chars: Vec<char> = line.chars().collect();
        operator_precedes(&chars, index)
    }

    /// Find a heredoc opener in the code span of `line` and return its
    /// closing delimiter.
    ///
    /// Only the code span is searched, so `<<EOS` written inside a trailing
    /// comment does not switch the document into heredoc mode.
    pub fn detect_heredoc_open(line: &str) -> Option<String> {
        let code = Self::split_line(line).code;
        let caps = RE_HEREDOC.captures(code)?;
        (1..=4)
            .find_map(|group| caps.get(group))
            .map(|m| m.as_str().to_string())
    }

    /// Returns true if the stripped line closes the heredoc named `delimiter`.
    pub fn is_heredoc_close(stripped_line: &str, delimiter: &str) -> bool {
        stripped_line == delimiter
    }
}

fn operator_precedes(chars: &[char], index: usize) -> bool {
    if index > chars.len() {
        return false;
    }
    let mut end = index;
    while end > 0 && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    if end == 0 {
        return true;
    }
    let prev = chars[end - 1];
    if prev == ':' && end >= 2 && chars[end - 2] == ':' {
        return true;
    }
    OPERATOR_CHARS.contains(&prev)
}
