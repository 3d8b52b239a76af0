//! The external plagiarism detector.

use ps_core::error::{PlagError, Result};
use ps_core::Settings;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// What to run the detector on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub lang: String,
    /// JPlag run mode, `RUN` for a plain run that writes a report.
    pub mode: String,
    pub report_path: PathBuf,
    /// Directory holding one subdirectory per submission.
    pub submissions_dir: PathBuf,
    pub skip_clustering: bool,
}

/// Exit status and captured output of a detector run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl DetectorOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

pub trait Detector {
    /// Run to completion. A nonzero exit status is not an error here;
    /// only failing to launch the detector is.
    fn run(&self, invocation: &Invocation) -> Result<DetectorOutput>;
}

/// JPlag launched as `java -jar jplag.jar`.
#[derive(Debug, Clone)]
pub struct JplagCli {
    pub java_cmd: String,
    pub jar: PathBuf,
}

impl JplagCli {
    pub fn new(java_cmd: impl Into<String>, jar: impl Into<PathBuf>) -> Self {
        Self {
            java_cmd: java_cmd.into(),
            jar: jar.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.java_cmd.clone(), settings.jplag_jar.clone())
    }

    /// Arguments passed after the java command.
    pub fn args(&self, invocation: &Invocation) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-jar".into(),
            self.jar.clone().into(),
            "-l".into(),
            invocation.lang.clone().into(),
            "-M".into(),
            invocation.mode.clone().into(),
            "-r".into(),
            invocation.report_path.clone().into(),
        ];
        if invocation.skip_clustering {
            args.push("--cluster-skip".into());
        }
        args.push(invocation.submissions_dir.clone().into());
        args
    }
}

impl Detector for JplagCli {
    fn run(&self, invocation: &Invocation) -> Result<DetectorOutput> {
        tracing::debug!(
            java = %self.java_cmd,
            jar = %self.jar.display(),
            lang = %invocation.lang,
            "launching jplag"
        );
        let output = Command::new(&self.java_cmd)
            .args(self.args(invocation))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| PlagError::Detector(format!("could not start {}: {e}", self.java_cmd)))?;

        Ok(DetectorOutput {
            // Killed by a signal: no exit code.
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
