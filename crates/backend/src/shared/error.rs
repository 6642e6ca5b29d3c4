use axum::http::StatusCode;
use contracts::domain::a005_approval_workflow::TransitionError;
use thiserror::Error;

/// Failure of a domain service call, mapped to an HTTP status by the handlers
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Transition(_) => StatusCode::CONFLICT,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs the failure and returns the matching status code
    pub fn into_status(self) -> StatusCode {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{:#}", self);
        } else {
            tracing::warn!("{}", self);
        }
        status
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Internal(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a005_approval_workflow::WorkflowStatus;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::from(TransitionError::Locked(WorkflowStatus::Approved)).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::from(anyhow::anyhow!("db down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
