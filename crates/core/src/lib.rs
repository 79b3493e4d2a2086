//! Branching dialogues: lines spoken by named speakers, each offering a set
//! of answers, stored in the line-oriented `.vialog` text format.
//!
//! ```
//! use vialog::Dialogue;
//!
//! let mut dialogue = Dialogue::parse("<Foofel>\n-Hello world!\n?Hi!\n?Bye bye").unwrap();
//! assert_eq!(dialogue.active_line().unwrap().answers.len(), 2);
//! dialogue.advance();
//! assert_eq!(dialogue.active_index(), Some(0));
//! ```

mod answer;
mod dialogue;
mod error;
mod format;
mod line;
mod options;

pub use answer::Answer;
pub use dialogue::Dialogue;
pub use error::{VialogError, VialogResult};
pub use format::FILE_EXTENSION;
pub use line::Line;
pub use options::{ParseMode, ParseOptions};
