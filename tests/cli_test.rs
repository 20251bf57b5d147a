use std::io::Write;

use clap::Parser;
use nearspan::cli::{Command, MatchReport, NearArgs, NearSpanArgs, render_human, run_near};
use tempfile::NamedTempFile;

fn document_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"content": "the quick brown fox jumps", "title": "Fox"}}"#).unwrap();
    writeln!(file, r#"{{"content": "a fox is quick"}}"#).unwrap();
    writeln!(file).unwrap();
    writeln!(file, r#"{{"content": "quick fox, quick red fox"}}"#).unwrap();
    file
}

fn parse_near(args: &[&str]) -> NearArgs {
    let parsed = NearSpanArgs::try_parse_from(args).unwrap();
    match parsed.command {
        Command::Near(near_args) => near_args,
        Command::Phrase(phrase_args) => NearArgs::from(phrase_args),
    }
}

#[test]
fn test_near_command_report() {
    let file = document_file();
    let path = file.path().to_str().unwrap();

    let report = run_near(&parse_near(&["nearspan", "near", path, "quick", "fox", "-s", "1"]))
        .unwrap();

    assert_eq!(report.documents_scanned, 4);
    assert_eq!(report.total_docs, 2);
    assert_eq!(report.total_matches, 3);
    assert_eq!(report.docs[0].doc, 0);
    assert_eq!(report.docs[0].min_slop, 1);
    assert_eq!(report.docs[1].doc, 3);
    assert_eq!(report.docs[1].matches.len(), 2);
    assert_eq!(report.docs[1].matches[1].slop, 1);
}

#[test]
fn test_phrase_command_report() {
    let file = document_file();
    let path = file.path().to_str().unwrap();

    let report = run_near(&parse_near(&["nearspan", "phrase", path, "quick", "fox"])).unwrap();
    assert_eq!(report.allowed_slop, 0);
    assert_eq!(report.total_matches, 1);
    assert_eq!(report.docs[0].doc, 3);

    let text = render_human(&report, 1);
    assert!(text.contains("Document 3: 1 match(es), min slop 0"));
    assert!(text.contains("Total: 1 match(es) in 1 of 4 document(s)"));
}

#[test]
fn test_report_json_round_trip() {
    let file = document_file();
    let path = file.path().to_str().unwrap();

    let report = run_near(&parse_near(&["nearspan", "near", path, "fox", "quick", "-s", "5"]))
        .unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let parsed: MatchReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.terms, vec!["fox", "quick"]);
    assert_eq!(parsed.total_docs, 2);
    assert_eq!(parsed.docs[0].doc, 1);
}

#[test]
fn test_missing_document_file() {
    let args = parse_near(&["nearspan", "near", "/nonexistent/docs.jsonl", "a", "b"]);
    assert!(run_near(&args).is_err());
}
