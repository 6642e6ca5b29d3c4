pub mod aggregate;

pub use aggregate::{CfpStatus, CfpSubmission, CfpSubmissionDto, CfpSubmissionId};
