//! The line-oriented `.vialog` text format.
//!
//! ```text
//! <speaker_name>   speaker declaration
//! -body text       line body
//! ?answer text     one answer, repeatable
//!                  blank line, record separator
//! ```

mod parser;
mod writer;

pub(crate) use parser::parse_lines;
pub(crate) use writer::write_lines;

/// Conventional file extension for dialogue files.
pub const FILE_EXTENSION: &str = "vialog";

pub(crate) const SPEAKER_OPEN: char = '<';
pub(crate) const SPEAKER_CLOSE: char = '>';
pub(crate) const BODY_PREFIX: char = '-';
pub(crate) const ANSWER_PREFIX: char = '?';
