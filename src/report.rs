//! Audit report rendering — trait-based format dispatch.
//!
//! Files without removed comments are left out of every format.

use crate::error::{Error, Result};
use crate::process::CommentRecord;
use crate::run::FileOutcome;
use serde::Serialize;

/// Render the audit findings for a run.
pub trait Reporter: Send + Sync {
    fn render(&self, files: &[FileOutcome]) -> Result<String>;

    /// Whether free-form status lines may follow the report on stdout.
    fn allows_trailer(&self) -> bool {
        true
    }
}

/// Create a reporter for the given format name.
pub fn create_reporter(format: &str) -> Result<Box<dyn Reporter>> {
    match format {
        "text" | "txt" => Ok(Box::new(TextReporter)),
        "json" => Ok(Box::new(JsonReporter)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}

/// ```text
/// File: lib/foo.rb
///   Line 3: # comment
/// ```
pub struct TextReporter;

impl Reporter for TextReporter {
    fn render(&self, files: &[FileOutcome]) -> Result<String> {
        let mut out = String::new();
        for file in files.iter().filter(|f| !f.comments.is_empty()) {
            out.push_str(&format!("File: {}\n", file.path.display()));
            for comment in &file.comments {
                out.push_str(&format!("  Line {}: {}\n", comment.line, comment.text));
            }
        }
        Ok(out)
    }
}

/// JSON array of `{ "file", "comments": [{ "line", "text" }] }`.
pub struct JsonReporter;

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    comments: &'a [CommentRecord],
}

impl Reporter for JsonReporter {
    fn render(&self, files: &[FileOutcome]) -> Result<String> {
        let reports: Vec<FileReport> = files
            .iter()
            .filter(|f| !f.comments.is_empty())
            .map(|f| FileReport {
                file: f.path.display().to_string(),
                comments: &f.comments,
            })
            .collect();
        let mut out = serde_json::to_string_pretty(&reports)?;
        out.push('\n');
        Ok(out)
    }

    fn allows_trailer(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn outcomes() -> Vec<FileOutcome> {
        vec![
            FileOutcome {
                path: PathBuf::from("dir/file1.rb"),
                comments: vec![
                    CommentRecord::new(1, "# Comment in file1"),
                    CommentRecord::new(3, "# Inline comment"),
                ],
            },
            FileOutcome {
                path: PathBuf::from("dir/clean.rb"),
                comments: vec![],
            },
            FileOutcome {
                path: PathBuf::from("dir/subdir/file2.rb"),
                comments: vec![CommentRecord::new(2, "# Comment in file2")],
            },
        ]
    }

    #[test]
    fn text_report() {
        let out = TextReporter.render(&outcomes()).unwrap();
        assert_eq!(
            out,
            "File: dir/file1.rb\n  Line 1: # Comment in file1\n  Line 3: # Inline comment\nFile: dir/subdir/file2.rb\n  Line 2: # Comment in file2\n"
        );
    }

    #[test]
    fn text_report_empty() {
        assert_eq!(TextReporter.render(&[]).unwrap(), "");
    }

    #[test]
    fn json_report() {
        let out = JsonReporter.render(&outcomes()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let files = value.as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["file"], "dir/file1.rb");
        assert_eq!(files[0]["comments"][1]["line"], 3);
        assert_eq!(files[0]["comments"][1]["text"], "# Inline comment");
        assert_eq!(files[1]["file"], "dir/subdir/file2.rb");
    }

    #[test]
    fn unknown_format() {
        let err = create_reporter("yaml").err().unwrap();
        assert!(err.to_string().contains("unknown report format: yaml"));
    }
}
