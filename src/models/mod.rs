// Data model for the link-reputation engine

pub mod report;
pub mod verdict;

pub use report::{AlertRecord, NewReport, Report, ReportId, SubmitterId, SubscriberId};
pub use verdict::{Evidence, Verdict, VerifierResult};
