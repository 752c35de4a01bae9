use thiserror::Error;

use crate::{pool::PoolId, request::RequestId};

#[derive(Debug, Error, PartialEq)]
pub enum PoolingError {
    #[error("Pool {0} not found")]
    PoolNotFound(PoolId),

    #[error("Request {0} not found")]
    RequestNotFound(RequestId),

    #[error("Request {0} is already pooled")]
    DuplicateRequest(RequestId),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
