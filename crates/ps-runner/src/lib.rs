//! Detector orchestration: language checks, staging, invocation.

pub mod detector;
pub mod language;
pub mod runner;
pub mod staging;

pub use detector::{Detector, DetectorOutput, Invocation, JplagCli};
pub use language::{check_language, is_supported, SUPPORTED_LANGUAGES};
pub use runner::PlagRunner;
