use tracing::debug;

use crate::answer::Answer;
use crate::error::{VialogError, VialogResult};
use crate::line::Line;
use crate::options::{ParseMode, ParseOptions};

use super::{ANSWER_PREFIX, BODY_PREFIX, SPEAKER_CLOSE, SPEAKER_OPEN};

/// Classification of one input line.
#[derive(Debug, PartialEq, Eq)]
enum Record<'a> {
    Speaker(&'a str),
    Body(&'a str),
    Answer(&'a str),
    Separator,
    Invalid(&'static str),
}

fn classify(line: &str) -> Record<'_> {
    let Some(first) = line.chars().next() else {
        return Record::Separator;
    };
    match first {
        SPEAKER_OPEN => {
            if line.len() >= 2 && line.ends_with(SPEAKER_CLOSE) {
                Record::Speaker(&line[1..line.len() - 1])
            } else {
                Record::Invalid("malformed speaker declaration")
            }
        }
        BODY_PREFIX => Record::Body(&line[1..]),
        ANSWER_PREFIX => Record::Answer(&line[1..]),
        _ => Record::Invalid("unrecognized line prefix"),
    }
}

/// Pending record state carried between input lines.
///
/// Speaker and text survive a flush and act as defaults for the next record;
/// only the answers are reset.
#[derive(Debug, Default)]
struct RecordBuilder {
    pending_speaker: String,
    pending_text: String,
    pending_answers: Vec<Answer>,
}

impl RecordBuilder {
    fn apply(&mut self, record: Record<'_>) {
        match record {
            Record::Speaker(name) => self.pending_speaker = name.to_string(),
            Record::Body(text) => self.pending_text = text.to_string(),
            Record::Answer(text) => self.pending_answers.push(Answer::new(text)),
            Record::Separator | Record::Invalid(_) => {}
        }
    }

    fn flush(&mut self) -> Line {
        Line::new(
            self.pending_speaker.clone(),
            self.pending_text.clone(),
            std::mem::take(&mut self.pending_answers),
        )
    }
}

/// Parses `.vialog` content into lines in file order.
pub(crate) fn parse_lines(content: &str, options: ParseOptions) -> VialogResult<Vec<Line>> {
    if content.len() > options.max_input_bytes {
        return Err(VialogError::ResourceLimit(format!(
            "input is {} bytes, limit is {}",
            content.len(),
            options.max_input_bytes
        )));
    }

    let mut builder = RecordBuilder::default();
    let mut lines = Vec::new();
    // True while the last line read was something other than a separator.
    let mut record_open = false;
    let mut offset = 0usize;

    for (index, raw) in content.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += raw.len();
        let text = raw.strip_suffix('\n').unwrap_or(raw);
        let text = text.strip_suffix('\r').unwrap_or(text);

        match classify(text) {
            Record::Separator => {
                lines.push(builder.flush());
                record_open = false;
                continue;
            }
            Record::Invalid(reason) => match options.mode {
                ParseMode::Permissive => {
                    debug!(line = index + 1, reason, "skipping line");
                }
                ParseMode::Strict => {
                    return Err(VialogError::Format {
                        line: index + 1,
                        message: reason.to_string(),
                        src: content.to_string(),
                        span: (start, text.len()).into(),
                    });
                }
            },
            record => builder.apply(record),
        }
        record_open = true;
    }

    if record_open {
        lines.push(builder.flush());
    }
    debug!(lines = lines.len(), "parsed dialogue");
    Ok(lines)
}
