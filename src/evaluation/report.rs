use crate::evaluation::{EvaluationError, Measurement};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Final accuracies of an evaluation session.
///
/// `classifiers` holds one measurement per model, named after it, in report
/// order. Its `Display` form is the console summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// RFC 3339, UTC.
    pub generated_at: String,
    pub scored: u64,
    pub failed: u64,
    pub classifiers: Vec<Measurement>,
}

impl AccuracyReport {
    pub fn new(scored: u64, failed: u64, classifiers: Vec<Measurement>) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            scored,
            failed,
            classifiers,
        }
    }

    pub fn accuracy_of(&self, name: &str) -> Option<f64> {
        self.classifiers
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }

    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), EvaluationError> {
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut w, self)?;
        writeln!(w)?;
        w.flush()?;
        Ok(())
    }
}

impl Display for AccuracyReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Correctness:")?;
        for m in &self.classifiers {
            writeln!(f, "{}: {:.5}", m.name, m.value)?;
        }
        Ok(())
    }
}
