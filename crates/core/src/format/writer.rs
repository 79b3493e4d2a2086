use crate::error::{VialogError, VialogResult};
use crate::line::Line;

use super::{ANSWER_PREFIX, BODY_PREFIX, SPEAKER_CLOSE, SPEAKER_OPEN};

fn push_record(out: &mut String, prefix: char, text: &str) {
    out.push(prefix);
    out.push_str(text);
    out.push('\n');
}

fn push_speaker(out: &mut String, speaker: &str) {
    out.push(SPEAKER_OPEN);
    out.push_str(speaker);
    out.push(SPEAKER_CLOSE);
    out.push('\n');
}

fn ensure_single_line(index: usize, field: &'static str, text: &str) -> VialogResult<()> {
    if text.contains(['\n', '\r']) {
        return Err(VialogError::Unrepresentable { line: index, field });
    }
    Ok(())
}

fn ensure_representable(index: usize, line: &Line) -> VialogResult<()> {
    ensure_single_line(index, "speaker", &line.speaker)?;
    ensure_single_line(index, "text", &line.text)?;
    for answer in &line.answers {
        ensure_single_line(index, "answer", answer.text())?;
    }
    Ok(())
}

/// Writes lines in `.vialog` form.
///
/// A line whose speaker differs from the previous one only contributes its
/// speaker declaration; its body and answers are not written. Files written
/// by older tools rely on this, so it is kept.
///
/// Fields containing line breaks are rejected up front so nothing partial is
/// produced.
pub(crate) fn write_lines(lines: &[Line]) -> VialogResult<String> {
    let first = lines.first().ok_or(VialogError::EmptyDialogue)?;
    for (index, line) in lines.iter().enumerate() {
        ensure_representable(index, line)?;
    }
    let last = lines.len() - 1;
    let mut out = String::new();
    let mut speaker = first.speaker.as_str();
    push_speaker(&mut out, speaker);

    for (index, line) in lines.iter().enumerate() {
        if line.speaker != speaker {
            speaker = &line.speaker;
            push_speaker(&mut out, speaker);
            continue;
        }
        push_record(&mut out, BODY_PREFIX, &line.text);
        for answer in &line.answers {
            push_record(&mut out, ANSWER_PREFIX, answer.text());
        }
        if index != last {
            out.push('\n');
        }
    }
    Ok(out)
}
