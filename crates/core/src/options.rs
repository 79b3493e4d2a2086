//! Parser configuration.

/// How the parser treats lines it does not recognize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Unrecognized lines are skipped without changing parser state.
    #[default]
    Permissive,
    /// Unrecognized or malformed lines fail with [`VialogError::Format`](crate::VialogError::Format).
    Strict,
}

/// Parser settings. The default is permissive with no input size cap.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    pub mode: ParseMode,
    pub max_input_bytes: usize,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
            ..Self::default()
        }
    }

    /// Rejects input longer than `max_bytes` with
    /// [`VialogError::ResourceLimit`](crate::VialogError::ResourceLimit).
    pub fn with_max_input_bytes(self, max_bytes: usize) -> Self {
        Self {
            max_input_bytes: max_bytes,
            ..self
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::Permissive,
            max_input_bytes: usize::MAX,
        }
    }
}
