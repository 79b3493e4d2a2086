//! Dialogue container, persistence and active-line navigation.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::answer::Answer;
use crate::error::{VialogError, VialogResult};
use crate::format;
use crate::line::Line;
use crate::options::ParseOptions;

/// Ordered lines of a conversation plus the active-line cursor.
///
/// The cursor is either undefined or a valid index into the lines; every
/// mutating operation keeps it that way.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Dialogue {
    lines: Vec<Line>,
    #[serde(rename = "active_index")]
    cursor: Option<usize>,
}

impl Dialogue {
    /// Creates a dialogue with no lines and no active line.
    pub fn create_empty() -> Self {
        Self::default()
    }

    /// Creates a single-line dialogue to start editing from.
    pub fn create_template() -> Self {
        let line = Line::new(
            "Foofel",
            "Hello world!",
            vec![Answer::new("Hi!"), Answer::new("Bye bye")],
        );
        Self::from_lines(vec![line])
    }

    /// Wraps existing lines; the first one becomes active.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        let cursor = if lines.is_empty() { None } else { Some(0) };
        Self { lines, cursor }
    }

    /// Parses `.vialog` content with the default permissive options.
    pub fn parse(content: &str) -> VialogResult<Self> {
        Self::parse_with_options(content, ParseOptions::default())
    }

    pub fn parse_with_options(content: &str, options: ParseOptions) -> VialogResult<Self> {
        let lines = format::parse_lines(content, options)?;
        Ok(Self::from_lines(lines))
    }

    /// Reads and parses a `.vialog` file.
    pub fn open_from_file(path: impl AsRef<Path>) -> VialogResult<Self> {
        Self::open_from_file_with_options(path, ParseOptions::default())
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open_from_file_with_options(
        path: impl AsRef<Path>,
        options: ParseOptions,
    ) -> VialogResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| VialogError::io(path, err))?;
        let dialogue = Self::parse_with_options(&content, options)?;
        info!(lines = dialogue.len(), "opened dialogue");
        Ok(dialogue)
    }

    /// Serializes to `.vialog` text.
    ///
    /// Fails with [`VialogError::EmptyDialogue`] when there are no lines.
    ///
    /// Known quirk: when the speaker changes, the line that introduces the new
    /// speaker is written as the declaration alone and its body and answers
    /// are dropped. Parsing the output therefore does not restore that line.
    pub fn serialize(&self) -> VialogResult<String> {
        format::write_lines(&self.lines)
    }

    /// Serializes and writes the dialogue to `path`, replacing any existing file.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), lines = self.len()))]
    pub fn save(&self, path: impl AsRef<Path>) -> VialogResult<()> {
        let path = path.as_ref();
        let content = self.serialize()?;
        fs::write(path, content).map_err(|err| VialogError::io(path, err))?;
        info!("saved dialogue");
        Ok(())
    }

    /// Serializes lines and cursor to pretty JSON.
    pub fn to_json(&self) -> VialogResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| VialogError::Serialization(err.to_string()))
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    /// Appends a line. The cursor is left untouched.
    pub fn push_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Inserts a line at `index` (which may equal `len()`), keeping the
    /// cursor on the same line it designated before.
    pub fn insert_line(&mut self, index: usize, line: Line) -> VialogResult<()> {
        if index > self.lines.len() {
            return Err(self.out_of_range(index));
        }
        self.lines.insert(index, line);
        if let Some(active) = self.cursor.as_mut() {
            if *active >= index {
                *active += 1;
            }
        }
        Ok(())
    }

    /// Removes and returns the line at `index`.
    ///
    /// Removing the active line moves the cursor to the line that took its
    /// place, or to the new last line. Emptying the dialogue undefines it.
    pub fn remove_line(&mut self, index: usize) -> VialogResult<Line> {
        if index >= self.lines.len() {
            return Err(self.out_of_range(index));
        }
        let removed = self.lines.remove(index);
        self.cursor = match self.cursor {
            _ if self.lines.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) => Some(active.min(self.lines.len() - 1)),
            None => None,
        };
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.cursor = None;
    }

    /// Index of the active line, or `None` when no line is active.
    pub fn active_index(&self) -> Option<usize> {
        self.cursor
    }

    pub fn active_line(&self) -> VialogResult<&Line> {
        self.cursor
            .and_then(|index| self.lines.get(index))
            .ok_or(VialogError::NoActiveLine)
    }

    pub fn active_line_mut(&mut self) -> VialogResult<&mut Line> {
        self.cursor
            .and_then(|index| self.lines.get_mut(index))
            .ok_or(VialogError::NoActiveLine)
    }

    /// Moves to the next line, staying put on the last one.
    ///
    /// With no active line, moves to the first line if there is one.
    pub fn advance(&mut self) {
        let Some(last) = self.lines.len().checked_sub(1) else {
            return;
        };
        self.cursor = Some(match self.cursor {
            Some(active) => (active + 1).min(last),
            None => 0,
        });
    }

    /// Moves to the previous line, staying put on the first one.
    pub fn retreat(&mut self) {
        if let Some(active) = self.cursor.as_mut() {
            *active = active.saturating_sub(1);
        }
    }

    /// Activates the first line spoken by `name`.
    ///
    /// When no line matches, no line is active afterwards. This is not an
    /// error; the returned flag reports whether a line was found.
    pub fn jump_to_speaker(&mut self, name: &str) -> bool {
        self.cursor = self.lines.iter().position(|line| line.speaker == name);
        if self.cursor.is_none() {
            debug!(speaker = name, "no line for speaker");
        }
        self.cursor.is_some()
    }

    pub fn jump_to_index(&mut self, index: usize) -> VialogResult<()> {
        if index >= self.lines.len() {
            return Err(self.out_of_range(index));
        }
        self.cursor = Some(index);
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> VialogError {
        VialogError::IndexOutOfRange {
            index,
            len: self.lines.len(),
        }
    }
}

impl<'a> IntoIterator for &'a Dialogue {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Human-readable listing: one `Speaker> Text` row per line with numbered answers.
impl fmt::Display for Dialogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/dialogue_tests.rs"]
mod tests;
