use crate::Error;
use crate::classifiers::ClassifierEnsemble;
use crate::config::RunConfig;
use crate::dataset::{DatasetBuilder, DirectorySource};
use crate::evaluation::AccuracyReport;
use crate::tasks::InteractiveEvaluator;
use std::io::{BufRead, Write};
use tracing::info;

/// Trains on the directory named by `config`, then evaluates the queries read
/// from `input`, writing predictions and the summary to `output`.
pub fn run_session<R: BufRead, W: Write>(
    config: &RunConfig,
    input: R,
    output: W,
) -> Result<AccuracyReport, Error> {
    config.validate()?;
    let root = config.path()?;
    let method = config.method()?;
    let silhouette = config.silhouette_config()?;

    let mut source = DirectorySource::open(root, config.param_flag)?;
    info!(samples = source.len(), root = %root.display(), "found training samples");

    let dataset = DatasetBuilder::new(method, silhouette, config.sample_policy()).build(&mut source)?;
    let ensemble = ClassifierEnsemble::train(&dataset, &config.ensemble_params()?)?;

    let mut evaluator = InteractiveEvaluator::new(
        &ensemble,
        dataset.encoding(),
        method,
        silhouette,
        input,
        output,
    )
    .with_per_sample_thresholds(config.param_flag);
    Ok(evaluator.run()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::evaluation::EvaluationError;
    use crate::features::FeatureMethod;
    use crate::testing::{Shape, shape_pair};
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;

    const SIZE: u32 = 96;

    fn write_category(root: &Path, name: &str, shape: Shape) {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        for (i, (half, angle)) in [(18.0, 0.0), (20.0, 10.0), (22.0, 20.0), (24.0, 30.0), (26.0, 40.0)]
            .into_iter()
            .enumerate()
        {
            let (subject, background) = shape_pair(shape, SIZE, half, angle);
            subject.save(dir.join(format!("{name}{i}.png"))).unwrap();
            if i == 0 {
                background.save(dir.join("background.png")).unwrap();
            }
        }
    }

    fn config(root: &Path) -> RunConfig {
        RunConfig {
            path: Some(root.to_path_buf()),
            method: Some(FeatureMethod::ClassicalMoments),
            threshold: Some(30.0),
            ..RunConfig::default()
        }
    }

    fn training_root() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        write_category(root.path(), "square", Shape::Square);
        write_category(root.path(), "circle", Shape::Circle);
        root
    }

    #[test]
    fn immediate_sentinel_is_a_config_class_failure() {
        let root = training_root();
        let mut out = Vec::new();
        let err = run_session(&config(root.path()), Cursor::new("-1\n"), &mut out).unwrap_err();
        assert!(matches!(err, Error::Evaluation(EvaluationError::NoSamplesScored)));
        assert!(err.is_config());
    }

    #[test]
    fn missing_method_fails_before_training() {
        let root = training_root();
        let cfg = RunConfig {
            method: None,
            ..config(root.path())
        };
        let err = run_session(&cfg, Cursor::new("-1\n"), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Missing("method"))));
        assert!(err.is_config());
    }

    #[test]
    fn empty_directory_is_not_a_config_failure() {
        let root = tempfile::tempdir().unwrap();
        let err = run_session(&config(root.path()), Cursor::new("-1\n"), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
        assert!(!err.is_config());
    }

    #[test]
    fn trains_from_disk_and_scores_queries() {
        let root = training_root();
        let queries = tempfile::tempdir().unwrap();
        let (subject, background) = shape_pair(Shape::Square, SIZE, 21.0, 15.0);
        let subject_path = queries.path().join("q.png");
        let background_path = queries.path().join("q_bg.png");
        subject.save(&subject_path).unwrap();
        background.save(&background_path).unwrap();

        let script = format!(
            "{} square\n{}\n-1\n",
            subject_path.display(),
            background_path.display()
        );
        let mut out = Vec::new();
        let report = run_session(&config(root.path()), Cursor::new(script), &mut out).unwrap();

        assert_eq!(report.scored, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(report.classifiers.len(), 3);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Bayes result: "));
        assert!(text.contains("Correctness:\n"));
    }
}
