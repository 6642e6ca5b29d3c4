pub mod aggregate;
pub mod status;

pub use aggregate::{
    ApprovalWorkflow, ApprovalWorkflowDto, ApprovalWorkflowId, DecisionRequest, Reviewer,
};
pub use status::{ItemType, ReviewerDecision, TransitionError, WorkflowStatus};
