//! Strip or audit comments in Ruby source files without a full parser.
//!
//! The core is three pieces composed bottom-up:
//!
//! 1. [`scanner`] — split one line into code and comment, skipping `#`
//!    inside strings and regex literals; detect heredoc openers
//! 2. [`classify`] — tell magic, tool and documentation comments apart
//!    from plain ones
//! 3. [`process`] — drive both over a whole file, tracking block comments,
//!    heredoc bodies and the leading header region
//!
//! [`discover`], [`run`] and [`report`] wrap the core for the command line.

pub mod classify;
pub mod discover;
pub mod error;
pub mod process;
pub mod report;
pub mod run;
pub mod scanner;

pub use error::{Error, Result};
pub use process::{process, CommentRecord, ProcessOptions, ProcessingResult};
