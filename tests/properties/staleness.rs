//! Property tests for the order of staleness checks.

use proptest::prelude::*;
use tempfile::tempdir;

use stylesmith::domain::services::{StaleReason, StalenessEvaluator, Verdict};
use stylesmith::{BuildRecord, ContentHash, JobDefinition, Style};

fn style() -> impl Strategy<Value = Style> {
    proptest::sample::select(Style::ALL.to_vec())
}

fn source() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..256)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: force wins over every other condition.
    #[test]
    fn property_force_always_rebuilds(
        content in source(),
        recorded in source(),
        recorded_style in style(),
        current_style in style(),
        has_record in any::<bool>(),
        has_output in any::<bool>(),
    ) {
        let dir = tempdir().unwrap();
        let job = JobDefinition::new("main", dir.path().join("main.scss"), dir.path().join("main.css"));
        std::fs::write(job.input_path(), &content).unwrap();
        if has_output {
            std::fs::write(job.output_path(), "css").unwrap();
        }
        let record = BuildRecord::for_job(&job, ContentHash::from_bytes(&recorded), recorded_style, None);
        let record = has_record.then_some(&record);

        let verdict = StalenessEvaluator::default()
            .evaluate(&job, record, current_style, true)
            .unwrap();
        prop_assert_eq!(verdict, Verdict::Stale(StaleReason::Forced));
    }

    /// PROPERTY: without a record the reason is always a first build, even
    /// when the input cannot be read.
    #[test]
    fn property_no_record_is_first_build(has_input in any::<bool>(), current_style in style()) {
        let dir = tempdir().unwrap();
        let job = JobDefinition::new("main", dir.path().join("main.scss"), dir.path().join("main.css"));
        if has_input {
            std::fs::write(job.input_path(), "a {}").unwrap();
        }

        let verdict = StalenessEvaluator::default()
            .evaluate(&job, None, current_style, false)
            .unwrap();
        prop_assert_eq!(verdict, Verdict::Stale(StaleReason::FirstBuild));
    }

    /// PROPERTY: a missing output is reported before style or source changes.
    #[test]
    fn property_missing_output_precedes_content_checks(
        content in source(),
        recorded in source(),
        recorded_style in style(),
        current_style in style(),
    ) {
        let dir = tempdir().unwrap();
        let job = JobDefinition::new("main", dir.path().join("main.scss"), dir.path().join("main.css"));
        std::fs::write(job.input_path(), &content).unwrap();
        let record = BuildRecord::for_job(&job, ContentHash::from_bytes(&recorded), recorded_style, None);

        let verdict = StalenessEvaluator::default()
            .evaluate(&job, Some(&record), current_style, false)
            .unwrap();
        prop_assert_eq!(verdict, Verdict::Stale(StaleReason::OutputMissing));
    }

    /// PROPERTY: with output present and style unchanged, the digest alone decides.
    #[test]
    fn property_digest_decides_when_everything_else_matches(
        content in source(),
        recorded in source(),
        current_style in style(),
    ) {
        let dir = tempdir().unwrap();
        let job = JobDefinition::new("main", dir.path().join("main.scss"), dir.path().join("main.css"));
        std::fs::write(job.input_path(), &content).unwrap();
        std::fs::write(job.output_path(), "css").unwrap();
        let record = BuildRecord::for_job(&job, ContentHash::from_bytes(&recorded), current_style, None);

        let verdict = StalenessEvaluator::default()
            .evaluate(&job, Some(&record), current_style, false)
            .unwrap();
        prop_assert_eq!(verdict.needs_rebuild(), content != recorded);
    }
}
