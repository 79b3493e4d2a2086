use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answer::Answer;

/// One utterance: who speaks, what they say, and the answers offered.
///
/// A line without answers is terminal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Line {
    pub speaker: String,
    pub text: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Line {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            answers,
        }
    }

    /// Appends an answer and returns the line, for builder-style construction.
    pub fn with_answer(mut self, answer: impl Into<Answer>) -> Self {
        self.answers.push(answer.into());
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.answers.is_empty()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}> {}", self.speaker, self.text)?;
        for (index, answer) in self.answers.iter().enumerate() {
            writeln!(f, "\t{}) {}", index + 1, answer)?;
        }
        Ok(())
    }
}
