//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{NearSpanArgs, OutputFormat};
use crate::error::Result;
use crate::query::DocMatches;

/// Result structure for near and phrase commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub field: String,
    pub terms: Vec<String>,
    pub allowed_slop: u32,
    pub documents_scanned: u64,
    pub total_docs: usize,
    pub total_matches: u64,
    pub duration_ms: u64,
    pub docs: Vec<DocMatches>,
}

/// Output a result in the specified format.
pub fn output_report(report: &MatchReport, args: &NearSpanArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(report, args),
        OutputFormat::Json => output_json(report, args),
    }
}

/// Output in human-readable format.
fn output_human(report: &MatchReport, args: &NearSpanArgs) -> Result<()> {
    print!("{}", render_human(report, args.verbosity()));
    Ok(())
}

/// Render a report as human-readable text.
pub fn render_human(report: &MatchReport, verbosity: u8) -> String {
    let mut out = String::new();

    if verbosity > 0 {
        out.push_str(&format!(
            "Near matches for {} in '{}' (slop {}):\n",
            report.terms.join(" "),
            report.field,
            report.allowed_slop
        ));
        out.push_str("═══════════════\n");
    }

    for doc in &report.docs {
        out.push_str(&format!(
            "\nDocument {}: {} match(es), min slop {}\n",
            doc.doc, doc.total_matches, doc.min_slop
        ));
        for found in &doc.matches {
            out.push_str(&format!(
                "  [{}, {}) slop {}\n",
                found.start, found.end, found.slop
            ));
        }
        let hidden = doc.total_matches.saturating_sub(doc.matches.len());
        if hidden > 0 {
            out.push_str(&format!("  ... {hidden} more\n"));
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "Total: {} match(es) in {} of {} document(s)\n",
        report.total_matches, report.total_docs, report.documents_scanned
    ));
    if verbosity > 1 {
        out.push_str(&format!("Search time: {}ms\n", report.duration_ms));
    }
    out
}

/// Output in JSON format.
fn output_json(report: &MatchReport, args: &NearSpanArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spans::Match;

    fn report() -> MatchReport {
        MatchReport {
            field: "content".to_string(),
            terms: vec!["quick".to_string(), "fox".to_string()],
            allowed_slop: 2,
            documents_scanned: 5,
            total_docs: 1,
            total_matches: 3,
            duration_ms: 1,
            docs: vec![DocMatches {
                doc: 4,
                matches: vec![Match { doc: 4, start: 1, end: 4, slop: 1 }],
                total_matches: 3,
                min_slop: 0,
            }],
        }
    }

    #[test]
    fn test_render_human() {
        let text = render_human(&report(), 1);

        assert!(text.starts_with("Near matches for quick fox in 'content' (slop 2):"));
        assert!(text.contains("Document 4: 3 match(es), min slop 0"));
        assert!(text.contains("  [1, 4) slop 1"));
        assert!(text.contains("  ... 2 more"));
        assert!(text.contains("Total: 3 match(es) in 1 of 5 document(s)"));
        assert!(!text.contains("Search time"));
    }

    #[test]
    fn test_render_human_quiet() {
        let text = render_human(&report(), 0);
        assert!(!text.contains("Near matches for"));
    }

    #[test]
    fn test_report_json() {
        let value = serde_json::to_value(report()).unwrap();
        assert_eq!(value["total_matches"], 3);
        assert_eq!(value["docs"][0]["matches"][0]["slop"], 1);
    }
}
