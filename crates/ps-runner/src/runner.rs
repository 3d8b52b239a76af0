//! Runs the detector over a set of submissions and minimizes the result.

use crate::detector::{Detector, Invocation, JplagCli};
use crate::{language, staging};
use chrono::Utc;
use ps_core::error::{PlagError, Result};
use ps_core::{PlagReport, Settings, Submission, SubmissionIndex};
use ps_report::ReportMinimizer;

const RUN_MODE: &str = "RUN";

pub struct PlagRunner<D = JplagCli> {
    settings: Settings,
    detector: D,
}

impl PlagRunner<JplagCli> {
    /// Runner backed by `java -jar <jplag_jar>`. Clears the report directory.
    pub fn new(settings: Settings) -> Result<Self> {
        let detector = JplagCli::from_settings(&settings);
        Self::with_detector(settings, detector)
    }
}

impl<D: Detector> PlagRunner<D> {
    /// Runner with a custom detector. Clears the report directory.
    pub fn with_detector(settings: Settings, detector: D) -> Result<Self> {
        if settings.report_dir.exists() {
            tracing::info!(dir = %settings.report_dir.display(), "clearing report directory");
            std::fs::remove_dir_all(&settings.report_dir)?;
        }
        Ok(Self { settings, detector })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Run the detector on `submissions` written in `lang`.
    ///
    /// A nonzero detector status is reported, not raised. When the run
    /// succeeds and author filtering is on, the report is minimized and any
    /// minimization failure fails the whole run.
    pub fn run(&self, lang: &str, submissions: &[Submission]) -> Result<PlagReport> {
        language::check_language(lang, self.settings.ignore_unsupported_language)?;
        std::fs::create_dir_all(&self.settings.report_dir)?;
        if submissions.len() <= 1 {
            return Err(PlagError::TooFewSubmissions(submissions.len()));
        }

        let started = Utc::now();
        let staged = staging::stage(submissions)?;
        let invocation = Invocation {
            lang: lang.to_string(),
            mode: RUN_MODE.to_string(),
            report_path: self.settings.report_dir.join(format!("{lang}.jplag")),
            submissions_dir: staged.path().to_path_buf(),
            skip_clustering: !self.settings.clustering,
        };
        tracing::info!(
            lang,
            submissions = submissions.len(),
            report = %invocation.report_path.display(),
            "running detector"
        );
        let output = self.detector.run(&invocation)?;
        drop(staged);

        let mut report_min_path = None;
        let mut minimize_stats = None;
        if output.success() {
            if self.settings.filter_runs_by_author {
                let index = SubmissionIndex::new(submissions.iter().cloned())?;
                let result = ReportMinimizer::new(&index).minimize(&invocation.report_path)?;
                report_min_path = Some(result.report_min_path);
                minimize_stats = Some(result.stats);
            }
        } else {
            tracing::warn!(
                status = output.status,
                "detector exited with failure; skipping minimization"
            );
        }

        Ok(PlagReport {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
            report_path: invocation.report_path,
            report_min_path,
            minimize_stats,
            elapsed_ms: (Utc::now() - started).num_milliseconds(),
        })
    }
}
