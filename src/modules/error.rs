use shelf_db::StoreError;
use shelf_http::AppError;
use thiserror::Error;

/// Business-rule failures raised by the entity services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    AlreadyExists(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(message) => AppError::not_found(message),
            ServiceError::AlreadyExists(message) => AppError::conflict(message),
            ServiceError::Store(err @ StoreError::UnknownSortField { .. }) => {
                AppError::bad_request(err.to_string())
            }
            ServiceError::Store(err) => AppError::Internal(err.into()),
        }
    }
}
