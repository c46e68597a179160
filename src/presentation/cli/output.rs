//! Result rendering for the CLI
//!
//! Everything writes to a caller supplied [`Write`] so output can be tested.

use crate::application::dto::{BatchSummary, IdentificationReport, ResourceOutcome};
use crate::domain::entities::spaced_hex;
use crate::domain::services::SignatureRegistry;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonBatch<'a> {
    results: &'a [ResourceOutcome],
    summary: BatchSummary,
}

/// Writes a batch as a single JSON document
pub fn write_outcomes_json<W: Write>(mut w: W, outcomes: &[ResourceOutcome]) -> io::Result<()> {
    let batch = JsonBatch {
        results: outcomes,
        summary: BatchSummary::from_outcomes(outcomes),
    };
    serde_json::to_writer_pretty(&mut w, &batch)?;
    writeln!(w)
}

/// Writes a batch in human readable form
pub fn write_outcomes_text<W: Write>(mut w: W, outcomes: &[ResourceOutcome]) -> io::Result<()> {
    for outcome in outcomes {
        match outcome {
            ResourceOutcome::Identified(report) => write_report_text(&mut w, report)?,
            ResourceOutcome::Failed { origin, error } => {
                writeln!(w, "{origin}")?;
                writeln!(w, "  Error: {error}")?;
            }
        }
    }

    if outcomes.len() > 1 {
        let s = BatchSummary::from_outcomes(outcomes);
        writeln!(
            w,
            "\n{} resources: {} matched, {} text, {} binary, {} failed",
            s.total(),
            s.matched,
            s.text,
            s.binary,
            s.failed
        )?;
    }
    Ok(())
}

fn write_report_text<W: Write>(w: &mut W, report: &IdentificationReport) -> io::Result<()> {
    let classification = &report.identification.classification;
    writeln!(w, "{}", report.origin)?;

    if let Some(assessment) = &report.identification.assessment {
        writeln!(
            w,
            "  File has {}% UTF-8 text content.",
            report.utf8_percent().unwrap_or(0)
        )?;
        writeln!(w, "  Text: {}", assessment.decoded_text.escape_debug())?;
    }

    let label = if classification.is_match() {
        classification.label()
    } else {
        "unknown"
    };
    writeln!(
        w,
        "  Filetype detected: {}\tMagic: {}",
        label,
        spaced_hex(classification.matched_pattern())
    )?;
    writeln!(
        w,
        "  Mode: {}\tContent: {}",
        classification.mode(),
        classification.category()
    )?;

    if let Some(head) = &report.sample_head {
        writeln!(w, "  Sample: {head}")?;
    }
    Ok(())
}

/// Writes the signature table, one signature per line
pub fn write_signatures_text<W: Write>(mut w: W, registry: &SignatureRegistry) -> io::Result<()> {
    writeln!(
        w,
        "{:<5} {:<12} {:>6}  {:<50} MAGIC",
        "MODE", "CONTENT", "OFFSET", "TYPE"
    )?;
    for sig in registry.signatures() {
        writeln!(
            w,
            "{:<5} {:<12} {:>6}  {:<50} {}",
            sig.mode().name(),
            sig.category().name(),
            sig.offset(),
            sig.label(),
            sig.pattern_hex()
        )?;
    }
    writeln!(w, "\n{} signatures", registry.signature_count())
}

/// Writes the signature table as a JSON array
pub fn write_signatures_json<W: Write>(mut w: W, registry: &SignatureRegistry) -> io::Result<()> {
    let signatures: Vec<_> = registry.signatures().collect();
    serde_json::to_writer_pretty(&mut w, &signatures)?;
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Sample;
    use crate::domain::repositories::SampleError;
    use crate::domain::services::identify;

    fn outcome(origin: &str, data: &[u8]) -> ResourceOutcome {
        let sample = Sample::new(origin, data.to_vec());
        let id = identify(sample.as_bytes());
        ResourceOutcome::Identified(IdentificationReport::new(&sample, id))
    }

    #[test]
    fn test_text_output_for_match() {
        let mut out = Vec::new();
        write_outcomes_text(&mut out, &[outcome("a.png", b"\x89PNG\r\n\x1a\n")]).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Filetype detected: PNG image\tMagic: 89 50 4e 47"));
        assert!(out.contains("Mode: bin\tContent: consumable"));
        assert!(!out.contains("Sample:"));
    }

    #[test]
    fn test_text_output_for_unknown() {
        let mut out = Vec::new();
        let sentence = b"Hello, world! This is a plain sentence with enough bytes.";
        write_outcomes_text(&mut out, &[outcome("a.txt", sentence)]).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("File has 100% UTF-8 text content."));
        assert!(out.contains("Filetype detected: unknown\tMagic: \n"));
        assert!(out.contains("Mode: text\tContent: unknown"));
        assert!(out.contains("Sample: 48 65 6c 6c 6f"));
    }

    #[test]
    fn test_json_output() {
        let err = SampleError::NotFound("gone.bin".to_string());
        let outcomes = vec![
            outcome("a.pdf", b"%PDF-1.7"),
            ResourceOutcome::failed("gone.bin", &err),
        ];
        let mut out = Vec::new();
        write_outcomes_json(&mut out, &outcomes).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        let first = &value["results"][0];
        assert_eq!(first["status"], "identified");
        assert_eq!(first["classification"]["label"], "Adobe PDF .pdf");
        assert_eq!(first["classification"]["category"], "packedmulti");
        assert_eq!(first["classification"]["matched_pattern"], "25504446");
        assert!(first["assessment"].is_null());

        let second = &value["results"][1];
        assert_eq!(second["status"], "failed");
        assert_eq!(second["error"], "Resource not found: gone.bin");
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["summary"]["matched"], 1);
    }

    #[test]
    fn test_signature_listing() {
        let mut out = Vec::new();
        write_signatures_text(&mut out, SignatureRegistry::builtin()).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Adobe PDF .pdf"));
        assert!(out.contains("25 50 44 46"));

        let mut out = Vec::new();
        write_signatures_json(&mut out, SignatureRegistry::builtin()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let count = SignatureRegistry::builtin().signature_count();
        assert_eq!(value.as_array().map(Vec::len), Some(count));
    }
}
