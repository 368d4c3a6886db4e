use crate::classifiers::ClassifierKind;
use crate::evaluation::{
    AccuracyEvaluator, AccuracyReport, BasicEstimator, EvaluationError, Measurement,
    PerformanceEvaluator,
};

/// Per-classifier tallies for one evaluation session.
///
/// A query either counts for every classifier or, when it failed, for none.
pub struct SessionTally {
    evaluators: Vec<(ClassifierKind, AccuracyEvaluator<BasicEstimator>)>,
    scored: u64,
    failed: u64,
}

impl SessionTally {
    pub fn new<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = ClassifierKind>,
    {
        Self {
            evaluators: kinds
                .into_iter()
                .map(|k| (k, AccuracyEvaluator::new()))
                .collect(),
            scored: 0,
            failed: 0,
        }
    }

    /// Records one answered query. `predictions` pairs each classifier with its
    /// predicted class id; classifiers not listed are left untouched.
    pub fn record(&mut self, true_class: usize, predictions: &[(ClassifierKind, usize)]) {
        for &(kind, predicted) in predictions {
            if let Some((_, ev)) = self.evaluators.iter_mut().find(|(k, _)| *k == kind) {
                ev.add_result(true_class, predicted);
            }
        }
        self.scored += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn scored(&self) -> u64 {
        self.scored
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    pub fn report(&self) -> Result<AccuracyReport, EvaluationError> {
        if self.scored == 0 {
            return Err(EvaluationError::NoSamplesScored);
        }
        let classifiers = self
            .evaluators
            .iter()
            .map(|(kind, ev)| Measurement::new(kind.to_string(), ev.accuracy()))
            .collect();
        Ok(AccuracyReport::new(self.scored, self.failed, classifiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn empty_session_has_no_report() {
        let mut tally = SessionTally::new(ClassifierKind::iter());
        tally.record_failure();
        assert!(matches!(tally.report(), Err(EvaluationError::NoSamplesScored)));
    }

    #[test]
    fn accuracy_is_correct_over_scored() {
        use ClassifierKind::*;
        let mut tally = SessionTally::new(ClassifierKind::iter());
        tally.record(0, &[(Bayes, 0), (Knn, 1), (Tree, 0)]);
        tally.record(1, &[(Bayes, 1), (Knn, 1), (Tree, 0)]);
        tally.record_failure();

        let report = tally.report().unwrap();
        assert_eq!(report.scored, 2);
        assert_eq!(report.failed, 1);
        let names: Vec<&str> = report.classifiers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Bayes", "KNN", "Tree"]);
        assert_eq!(report.accuracy_of("Bayes"), Some(1.0));
        assert_eq!(report.accuracy_of("KNN"), Some(0.5));
        assert_eq!(report.accuracy_of("Tree"), Some(0.5));
    }
}
