use crate::response::Status;
use serde::{Deserialize, Serialize};
use std::error;
use std::fmt;

/// Failure reported back to the caller of the clustering function.
///
/// The matching engine itself never fails; these only come out of IO,
/// configuration and CSV parsing around it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceError {
    pub msg: String,
    pub status: Status,
    /// Which file or event field the failure belongs to, e.g. `input`,
    /// `reference` or an `s3://` location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl error::Error for ServiceError {}

impl ServiceError {
    fn new<T: fmt::Display>(msg: T, status: Status) -> ServiceError {
        ServiceError {
            msg: msg.to_string(),
            status,
            origin: None,
        }
    }

    pub fn bad_request<T: fmt::Display>(msg: T) -> ServiceError {
        ServiceError::new(msg, Status::BadRequest)
    }

    pub fn not_found<T: fmt::Display>(msg: T) -> ServiceError {
        ServiceError::new(msg, Status::NotFound)
    }

    pub fn internal_server_error<T: fmt::Display>(msg: T) -> ServiceError {
        ServiceError::new(msg, Status::InternalServerError)
    }

    /// An event field holds a value the run cannot use.
    pub fn invalid_setting<T: fmt::Display>(field: &str, detail: T) -> ServiceError {
        ServiceError::bad_request(format!("invalid {field}: {detail}")).with_origin(field)
    }

    /// A delimited file could not be read at all. Bad rows never end up here.
    pub fn unreadable_file<T: fmt::Display>(file: &str, err: T) -> ServiceError {
        ServiceError::internal_server_error(format!("unable to read {file} file: {err}"))
            .with_origin(file)
    }

    pub fn with_origin(mut self, origin: &str) -> ServiceError {
        self.origin = Some(origin.to_string());
        self
    }
}
