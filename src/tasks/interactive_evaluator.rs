use crate::classifiers::{ClassifierEnsemble, ClassifierKind};
use crate::config::ConfigError;
use crate::core::LabelEncoding;
use crate::dataset::{FileImageLoader, ImageLoader, SampleError};
use crate::evaluation::{AccuracyReport, EvaluationError, SessionTally};
use crate::features::FeatureMethod;
use crate::silhouette::{SilhouetteConfig, SilhouetteExtractor};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use strum::IntoEnumIterator;
use strum_macros::Display;
use tracing::{debug, info, warn};

/// First token that ends a session.
pub const SENTINEL: &str = "-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EvaluatorState {
    AwaitingSample,
    Extracting,
    Predicting,
    Scoring,
    Terminated,
}

#[derive(Debug, Clone, PartialEq)]
struct Query {
    subject: PathBuf,
    label: String,
    background: PathBuf,
    threshold: Option<f64>,
}

/// Line-oriented evaluation session against a trained ensemble.
///
/// Each query is `<subject_path> <true_label>`, then `<background_path>`,
/// then `<threshold>` when per-sample thresholds are on. A query whose images
/// or features cannot be produced, or that a classifier rejects, is reported
/// and left out of every tally. A label unknown to the training set counts as
/// a miss for every classifier.
pub struct InteractiveEvaluator<'a, R: BufRead, W: Write> {
    ensemble: &'a ClassifierEnsemble,
    encoding: &'a LabelEncoding,
    method: FeatureMethod,
    extractor: SilhouetteExtractor,
    per_sample_thresholds: bool,
    loader: Box<dyn ImageLoader>,
    input: R,
    output: W,
    state: EvaluatorState,
    tally: SessionTally,
}

impl<'a, R: BufRead, W: Write> InteractiveEvaluator<'a, R, W> {
    pub fn new(
        ensemble: &'a ClassifierEnsemble,
        encoding: &'a LabelEncoding,
        method: FeatureMethod,
        config: SilhouetteConfig,
        input: R,
        output: W,
    ) -> Self {
        Self {
            ensemble,
            encoding,
            method,
            extractor: SilhouetteExtractor::new(config),
            per_sample_thresholds: false,
            loader: Box::new(FileImageLoader),
            input,
            output,
            state: EvaluatorState::AwaitingSample,
            tally: SessionTally::new(ClassifierKind::iter()),
        }
    }

    pub fn with_loader(mut self, loader: Box<dyn ImageLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_per_sample_thresholds(mut self, enabled: bool) -> Self {
        self.per_sample_thresholds = enabled;
        self
    }

    pub fn state(&self) -> EvaluatorState {
        self.state
    }

    pub fn tally(&self) -> &SessionTally {
        &self.tally
    }

    /// Processes queries until the sentinel or end of input, prints the
    /// summary, and returns it.
    pub fn run(&mut self) -> Result<AccuracyReport, EvaluationError> {
        while self.step()? != EvaluatorState::Terminated {}

        let report = self.tally.report()?;
        write!(self.output, "{report}")?;
        self.output.flush()?;
        info!(
            scored = report.scored,
            failed = report.failed,
            "evaluation finished"
        );
        Ok(report)
    }

    /// Handles one query and returns the state it ends in.
    pub fn step(&mut self) -> Result<EvaluatorState, EvaluationError> {
        if self.state == EvaluatorState::Terminated {
            return Ok(self.state);
        }
        self.state = EvaluatorState::AwaitingSample;
        let Some(query) = self.read_query()? else {
            self.state = EvaluatorState::Terminated;
            return Ok(self.state);
        };

        self.state = EvaluatorState::Extracting;
        let features = match self.describe(&query) {
            Ok(f) => f,
            Err(e) => {
                self.fail(&query, &e.to_string())?;
                return Ok(self.state);
            }
        };

        self.state = EvaluatorState::Predicting;
        let mut predictions = Vec::with_capacity(3);
        for (kind, answer) in self.ensemble.predict_all(&features) {
            match answer {
                Ok(id) => predictions.push((kind, id)),
                Err(e) => {
                    self.fail(&query, &format!("{kind}: {e}"))?;
                    return Ok(self.state);
                }
            }
        }
        for &(kind, id) in &predictions {
            let name = self.encoding.decode(id).unwrap_or("<unknown>");
            writeln!(self.output, "{kind} result: {name}")?;
        }

        self.state = EvaluatorState::Scoring;
        let true_class = match self.encoding.encode(&query.label) {
            Some(id) => id,
            None => {
                warn!(label = %query.label, "label was not part of the training set");
                self.encoding.len()
            }
        };
        self.tally.record(true_class, &predictions);
        debug!(
            subject = %query.subject.display(),
            label = %query.label,
            scored = self.tally.scored(),
            "scored query"
        );

        self.state = EvaluatorState::AwaitingSample;
        Ok(self.state)
    }

    fn fail(&mut self, query: &Query, reason: &str) -> Result<(), EvaluationError> {
        warn!(subject = %query.subject.display(), %reason, "query failed");
        writeln!(self.output, "Query failed: {reason}")?;
        self.tally.record_failure();
        self.state = EvaluatorState::AwaitingSample;
        Ok(())
    }

    fn describe(&self, query: &Query) -> Result<Vec<f64>, SampleError> {
        let subject = self.loader.load(&query.subject)?;
        let background = self.loader.load(&query.background)?;
        let mask = match query.threshold {
            Some(t) => self.extractor.extract_with_threshold(&subject, &background, t)?,
            None => self.extractor.extract(&subject, &background)?,
        };
        Ok(self.method.extract(&mask)?)
    }

    /// Next non-blank line without its line ending, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, EvaluationError> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    /// `None` on the sentinel, at end of input, or when the input ends in the
    /// middle of a query.
    fn read_query(&mut self) -> Result<Option<Query>, EvaluationError> {
        let Some(head) = self.read_line()? else {
            return Ok(None);
        };
        if head.split_whitespace().next() == Some(SENTINEL) {
            debug!("sentinel received");
            return Ok(None);
        }
        let (subject, label) = match head.rsplit_once(char::is_whitespace) {
            Some((s, l)) if !s.trim().is_empty() => (s.trim().to_string(), l.to_string()),
            _ => (head.clone(), String::new()),
        };

        let Some(background) = self.read_line()? else {
            warn!(%subject, "input ended before the background path");
            return Ok(None);
        };

        let threshold = if self.per_sample_thresholds {
            let line = self.read_line()?;
            Some(parse_threshold(&subject, line.as_deref())?)
        } else {
            None
        };

        Ok(Some(Query {
            subject: PathBuf::from(subject),
            label,
            background: PathBuf::from(background),
            threshold,
        }))
    }
}

fn parse_threshold(origin: &str, line: Option<&str>) -> Result<f64, ConfigError> {
    let Some(text) = line else {
        return Err(ConfigError::SampleThreshold {
            origin: origin.to_string(),
            reason: "input ended before the threshold".into(),
        });
    };
    text.parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| ConfigError::SampleThreshold {
            origin: origin.to_string(),
            reason: format!("`{text}` is not a number"),
        })
}
