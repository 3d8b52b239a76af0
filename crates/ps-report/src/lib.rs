//! JPlag report minimization.
//!
//! Stages:
//! 1. Extract the report archive into a scratch directory
//! 2. Parse `overview.json` and enumerate `<id1>-<id2>` comparison entries
//! 3. Drop same-author comparisons, correcting the MAX/AVG histograms and
//!    pruning the pair index and top list
//! 4. Repackage into `<stem>.min.<ext>`

pub mod archive;
pub mod comparison;
pub mod filter;
pub mod overview;
pub mod pipeline;

pub use comparison::{ComparisonEntry, ComparisonRecord};
pub use filter::{collision_verdict, AuthorCollisionFilter, Verdict};
pub use overview::{bucket_index, OverviewDocument, TopComparison};
pub use pipeline::{post_process, MinimizeResult, ReportMinimizer};
