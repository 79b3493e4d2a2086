use std::path::PathBuf;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub type VialogResult<T> = Result<T, VialogError>;

#[derive(Debug, Error, Diagnostic)]
pub enum VialogError {
    #[error("line index {index} out of range for dialogue with {len} lines")]
    #[diagnostic(code("vialog.index_out_of_range"))]
    IndexOutOfRange { index: usize, len: usize },
    #[error("dialogue has no active line")]
    #[diagnostic(
        code("vialog.no_active_line"),
        help("jump to an index or speaker before reading the active line")
    )]
    NoActiveLine,
    #[error("format error on line {line}: {message}")]
    #[diagnostic(code("vialog.format"))]
    Format {
        line: usize,
        message: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },
    #[error("cannot serialize a dialogue without lines")]
    #[diagnostic(code("vialog.empty_dialogue"))]
    EmptyDialogue,
    #[error("line {line}: {field} contains a line break")]
    #[diagnostic(
        code("vialog.unrepresentable"),
        help("the .vialog format stores each field on a single line")
    )]
    Unrepresentable { line: usize, field: &'static str },
    #[error("resource limit exceeded: {0}")]
    #[diagnostic(code("vialog.resource_limit"))]
    ResourceLimit(String),
    #[error("i/o error on {}: {source}", .path.display())]
    #[diagnostic(code("vialog.io"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    #[diagnostic(code("vialog.serialization"))]
    Serialization(String),
}

impl VialogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the index-class failures: out-of-range jumps and edits, or
    /// reading an undefined active line.
    pub fn is_index_error(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. } | Self::NoActiveLine)
    }
}
