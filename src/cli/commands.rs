//! Command implementations for the nearspan CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use serde_json::Value;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::NearQueryConfig;
use crate::error::{NearSpanError, Result};
use crate::index::{MemoryPositionIndex, PositionIndex};
use crate::query::{Collector, MatchCollector, SpanQueryBuilder};

/// Execute a CLI command.
pub fn execute_command(args: NearSpanArgs) -> Result<()> {
    let report = match &args.command {
        Command::Near(near_args) => run_near(near_args)?,
        Command::Phrase(phrase_args) => run_near(&NearArgs::from(phrase_args.clone()))?,
    };
    output_report(&report, &args)
}

/// Run a near query over a document file and build its report.
pub fn run_near(args: &NearArgs) -> Result<MatchReport> {
    let config = resolve_config(args)?;
    let index = load_documents(&args.document_file)?;

    let start_time = Instant::now();
    let query = SpanQueryBuilder::new(args.field.as_str())
        .proximity(args.terms.clone(), config.allowed_slop);
    let mut spans = query.near_spans(&index)?;

    let mut collector = MatchCollector::from_config(&config);
    collector.collect_all(&mut spans)?;
    let duration = start_time.elapsed();

    info!(
        "Found {} match(es) in {} document(s) in {:?}",
        collector.total_matches(),
        collector.total_docs(),
        duration
    );

    Ok(MatchReport {
        field: args.field.clone(),
        terms: args.terms.clone(),
        allowed_slop: config.allowed_slop,
        documents_scanned: index.doc_count(),
        total_docs: collector.total_docs(),
        total_matches: collector.total_matches(),
        duration_ms: duration.as_millis() as u64,
        docs: collector.into_results(),
    })
}

/// Merge the config file with the command line overrides.
fn resolve_config(args: &NearArgs) -> Result<NearQueryConfig> {
    let mut config = match &args.config {
        Some(path) => {
            debug!("Loading query config from: {}", path.display());
            NearQueryConfig::from_json_file(path)?
        }
        None => NearQueryConfig::default(),
    };

    if let Some(slop) = args.slop {
        config.allowed_slop = slop;
    }
    if let Some(limit) = args.limit {
        config.max_docs = Some(limit);
    }
    config.validate()?;
    Ok(config)
}

/// Index a JSONL file, one document per line.
///
/// Every string field of a line's object is indexed under its key. The
/// document id is the 0-based line number; blank lines still take an id.
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<MemoryPositionIndex> {
    let path = path.as_ref();
    debug!("Loading documents from: {}", path.display());

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut index = MemoryPositionIndex::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            index.add_document(std::iter::empty::<(String, String)>())?;
            continue;
        }

        let value: Value = serde_json::from_str(&line).map_err(|e| {
            NearSpanError::other(format!(
                "Error parsing document on line {}: {e}",
                line_num + 1
            ))
        })?;
        let Value::Object(object) = value else {
            return Err(NearSpanError::other(format!(
                "Document on line {} is not a JSON object",
                line_num + 1
            )));
        };

        let fields: Vec<(String, String)> = object
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(text) => Some((key, text)),
                _ => None,
            })
            .collect();
        if fields.is_empty() {
            warn!("Document on line {} has no text fields", line_num + 1);
        }
        index.add_document(fields)?;
    }

    info!(
        "Indexed {} document(s) from {}",
        index.doc_count(),
        path.display()
    );
    Ok(index)
}
