use miette::Diagnostic;
use vialog::{Answer, Dialogue, Line, ParseMode, ParseOptions, VialogError};

fn answers(texts: &[&str]) -> Vec<Answer> {
    texts.iter().copied().map(Answer::new).collect()
}

#[test]
fn parses_single_record_without_trailing_separator() {
    let dialogue = Dialogue::parse("<Foofel>\n-Hello world!\n?Hi!\n?Bye bye").unwrap();
    assert_eq!(dialogue.len(), 1);
    assert_eq!(dialogue.active_index(), Some(0));
    let line = dialogue.active_line().unwrap();
    assert_eq!(line.speaker, "Foofel");
    assert_eq!(line.text, "Hello world!");
    assert_eq!(line.answers, answers(&["Hi!", "Bye bye"]));
}

#[test]
fn record_count_matches_records_not_separators() {
    let with_trailing = Dialogue::parse("<A>\n-one\n\n-two\n?ok\n\n").unwrap();
    let without_trailing = Dialogue::parse("<A>\n-one\n\n-two\n?ok").unwrap();
    assert_eq!(with_trailing.len(), 2);
    assert_eq!(with_trailing, without_trailing);
}

#[test]
fn trailing_newline_is_not_a_separator() {
    let dialogue = Dialogue::parse("<A>\n-one\n?yes\n").unwrap();
    assert_eq!(dialogue.len(), 1);
    assert_eq!(dialogue.lines()[0].answers, answers(&["yes"]));
}

#[test]
fn speaker_and_text_carry_over_separators() {
    let dialogue = Dialogue::parse("<A>\n-x\n?q\n\n?r").unwrap();
    assert_eq!(
        dialogue.lines(),
        &[
            Line::new("A", "x", answers(&["q"])),
            Line::new("A", "x", answers(&["r"])),
        ]
    );
}

#[test]
fn last_speaker_declaration_before_flush_wins() {
    let dialogue = Dialogue::parse("<A>\n-x\n<B>\n<C>\n?q").unwrap();
    assert_eq!(dialogue.len(), 1);
    assert_eq!(dialogue.lines()[0].speaker, "C");
}

#[test]
fn each_blank_line_flushes_a_record() {
    let dialogue = Dialogue::parse("<A>\n-x\n?q\n\n\n-y").unwrap();
    let texts: Vec<_> = dialogue.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(texts, ["x", "x", "y"]);
    assert!(dialogue.lines()[1].is_terminal());
}

#[test]
fn empty_input_yields_empty_dialogue() {
    let dialogue = Dialogue::parse("").unwrap();
    assert!(dialogue.is_empty());
    assert_eq!(dialogue.active_index(), None);

    let lone_separator = Dialogue::parse("\n").unwrap();
    assert_eq!(lone_separator.lines(), &[Line::default()]);
}

#[test]
fn crlf_input_parses_like_lf() {
    let lf = Dialogue::parse("<A>\n-x\n?q\n\n-y").unwrap();
    let crlf = Dialogue::parse("<A>\r\n-x\r\n?q\r\n\r\n-y\r\n").unwrap();
    assert_eq!(lf, crlf);
}

#[test]
fn permissive_mode_skips_unknown_lines() {
    let dialogue = Dialogue::parse("# notes\n<A\n<A>\n  -indented\n-x\nstray text").unwrap();
    assert_eq!(dialogue.lines(), &[Line::new("A", "x", vec![])]);
}

#[test]
fn strict_mode_reports_unknown_prefix_with_line_number() {
    let err = Dialogue::parse_with_options("<A>\n-x\nstray text\n?q", ParseOptions::strict())
        .unwrap_err();
    match &err {
        VialogError::Format { line, message, .. } => {
            assert_eq!(*line, 3);
            assert_eq!(message, "unrecognized line prefix");
        }
        other => panic!("expected format error, got {other:?}"),
    }
    assert_eq!(err.code().map(|code| code.to_string()).as_deref(), Some("vialog.format"));
}

#[test]
fn strict_mode_rejects_malformed_speaker() {
    let options = ParseOptions {
        mode: ParseMode::Strict,
        ..ParseOptions::default()
    };
    let err = Dialogue::parse_with_options("<Ava\n-x", options).unwrap_err();
    assert!(matches!(err, VialogError::Format { line: 1, .. }));
}

#[test]
fn strict_mode_accepts_well_formed_input() {
    let text = "<A>\n-x\n?q\n\n<B>\n-y";
    let strict = Dialogue::parse_with_options(text, ParseOptions::strict()).unwrap();
    assert_eq!(strict, Dialogue::parse(text).unwrap());
}

#[test]
fn input_limit_is_opt_in() {
    let options = ParseOptions::default().with_max_input_bytes(8);
    let err = Dialogue::parse_with_options("<Foofel>\n-Hello", options).unwrap_err();
    assert!(matches!(err, VialogError::ResourceLimit(_)));
    assert_eq!(ParseOptions::default().max_input_bytes, usize::MAX);
}

#[test]
fn default_parse_accepts_input_over_one_mebibyte() {
    let record = "-hello there\n?ok\n\n";
    let count = (1024 * 1024) / record.len() + 2;
    let text = format!("<A>\n{}", record.repeat(count));
    assert!(text.len() > 1024 * 1024);

    let dialogue = Dialogue::parse(&text).unwrap();
    assert_eq!(dialogue.len(), count);
    assert_eq!(dialogue.lines()[count - 1], Line::new("A", "hello there", answers(&["ok"])));
}

#[test]
fn serializer_writes_one_group_per_line() {
    let dialogue = Dialogue::from_lines(vec![
        Line::new("A", "one", answers(&["yes", "no"])),
        Line::new("A", "two", vec![]),
    ]);
    assert_eq!(
        dialogue.serialize().unwrap(),
        "<A>\n-one\n?yes\n?no\n\n-two\n"
    );
}

#[test]
fn serializer_drops_body_of_line_that_changes_speaker() {
    let dialogue = Dialogue::from_lines(vec![
        Line::new("A", "a1", answers(&["ok"])),
        Line::new("B", "b1", answers(&["lost"])),
        Line::new("B", "b2", vec![]),
        Line::new("B", "b3", answers(&["bye"])),
    ]);
    let text = dialogue.serialize().unwrap();
    insta::assert_snapshot!(text.trim_end(), @r###"
<A>
-a1
?ok

<B>
-b2

-b3
?bye
"###);
}

#[test]
fn serializer_rejects_line_breaks_in_fields() {
    let cases = [
        (Line::new("A", "one\n?injected\n\n-two", vec![]), "text"),
        (Line::new("A", "one", answers(&["yes\r\nno"])), "answer"),
        (Line::new("A\nB", "one", vec![]), "speaker"),
    ];
    for (broken, field) in cases {
        let dialogue = Dialogue::from_lines(vec![Line::new("A", "fine", vec![]), broken]);
        let err = dialogue.serialize().unwrap_err();
        match err {
            VialogError::Unrepresentable { line, field: reported } => {
                assert_eq!(line, 1);
                assert_eq!(reported, field);
            }
            other => panic!("expected unrepresentable field, got {other:?}"),
        }
    }
}

#[test]
fn speaker_with_closing_bracket_round_trips() {
    let dialogue = Dialogue::from_lines(vec![
        Line::new("A>", "one", answers(&["ok"])),
        Line::new("A>", "two", vec![]),
    ]);
    let text = dialogue.serialize().unwrap();
    assert!(text.starts_with("<A>>\n"));
    let reparsed = Dialogue::parse_with_options(&text, ParseOptions::strict()).unwrap();
    assert_eq!(reparsed, dialogue);
}

#[test]
fn round_trip_preserves_all_but_first_line_of_later_speaker_runs() {
    let original = Dialogue::from_lines(vec![
        Line::new("A", "a1", answers(&["go", "stay"])),
        Line::new("A", "a2", vec![]),
        Line::new("A", "a3", answers(&["next"])),
        Line::new("B", "b1", answers(&["dropped"])),
        Line::new("B", "b2", answers(&["kept"])),
        Line::new("B", "b3", vec![]),
    ]);

    let reparsed = Dialogue::parse(&original.serialize().unwrap()).unwrap();

    let expected: Vec<Line> = original
        .iter()
        .enumerate()
        .filter(|(index, line)| *index == 0 || original.lines()[index - 1].speaker == line.speaker)
        .map(|(_, line)| line.clone())
        .collect();
    assert_eq!(reparsed.lines(), expected.as_slice());
    assert_eq!(reparsed.active_index(), Some(0));
}

#[test]
fn template_round_trips_exactly() {
    let template = Dialogue::create_template();
    let text = template.serialize().unwrap();
    assert_eq!(text, "<Foofel>\n-Hello world!\n?Hi!\n?Bye bye\n");
    assert_eq!(Dialogue::parse(&text).unwrap(), template);
}
