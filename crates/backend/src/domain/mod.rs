pub mod a001_event;
pub mod a002_cfp_submission;
pub mod a003_attendee;
pub mod a004_sponsorship;
pub mod a005_approval_workflow;
pub mod a006_asset;
