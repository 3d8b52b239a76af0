pub mod config;
pub mod error;
pub mod submission;
pub mod types;

pub use config::Settings;
pub use error::{PlagError, Result};
pub use submission::{load_manifest, Submission, SubmissionIndex};
pub use types::{MinimizeStats, PlagReport};
