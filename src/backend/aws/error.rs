use crate::error::FetchError;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use std::fmt::Debug;

const THROTTLING_CODES: &[&str] = &[
    "ThrottlingException",
    "TooManyRequestsException",
    "ProvisionedThroughputExceededException",
    "RequestLimitExceeded",
    "InternalServiceError",
    "InternalServerError",
];

/// Map an SDK failure onto [`FetchError`].
///
/// `is_not_found` recognizes the operation's own not-found variants.
pub(super) fn classify<E, R, F>(err: SdkError<E, R>, is_not_found: F) -> FetchError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
    F: Fn(&E) -> bool,
{
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            FetchError::Transient(message)
        }
        SdkError::ServiceError(service) => {
            let inner = service.err();
            let code = inner.code().unwrap_or_default();
            if is_not_found(inner) {
                FetchError::NotFound(message)
            } else if code.starts_with("AccessDenied") {
                FetchError::AccessDenied(message)
            } else if THROTTLING_CODES.contains(&code) {
                FetchError::Transient(message)
            } else {
                FetchError::Other(message)
            }
        }
        _ => FetchError::Other(message),
    }
}
