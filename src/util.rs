use crate::dto::DataFile;
use crate::error::ServiceError;
use futures::stream::TryStreamExt;
use rusoto_core::{Region, RusotoError};
use rusoto_s3::{GetObjectError, GetObjectRequest, PutObjectRequest, S3Client, S3};
use std::env;
use std::str::FromStr;

pub fn get_region() -> Result<Region, ServiceError> {
    let name = get_env_var("REGION")?;
    Region::from_str(&name)
        .map_err(|_| ServiceError::internal_server_error(format!("Unable to parse region {}", name)))
}

pub fn get_env_var(name: &str) -> Result<String, ServiceError> {
    env::var(name).map_err(|_| {
        ServiceError::internal_server_error(format!("Environment variable '{}' not found", name))
    })
}

/// Reads an optional setting, falling back when it is unset or blank.
pub fn get_env_var_or(name: &str, default: &str) -> String {
    get_env_var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Fetches a whole object. A missing key is the caller's mistake (404);
/// anything else from S3 is a 500. Both name the object they were after.
pub async fn download_object_from_s3(
    client: &S3Client,
    file: &DataFile,
) -> Result<Vec<u8>, ServiceError> {
    let location = file.location();
    let request = GetObjectRequest {
        bucket: file.bucket.clone(),
        key: file.key.clone(),
        ..Default::default()
    };
    let mut object = client
        .get_object(request)
        .await
        .map_err(|err| get_object_error(err).with_origin(&location))?;
    let body = object.body.take().ok_or_else(|| {
        ServiceError::internal_server_error("Unable to extract body").with_origin(&location)
    })?;
    body.map_ok(|b| b.to_vec())
        .try_concat()
        .await
        .map_err(|err| ServiceError::internal_server_error(err).with_origin(&location))
}

fn get_object_error(err: RusotoError<GetObjectError>) -> ServiceError {
    match err {
        RusotoError::Service(GetObjectError::NoSuchKey(key)) => {
            ServiceError::not_found(format!("No object with key {key}"))
        }
        other => ServiceError::internal_server_error(other),
    }
}

/// Stores one CSV artifact.
pub async fn upload_object_to_s3(
    client: &S3Client,
    object: Vec<u8>,
    file: &DataFile,
) -> Result<(), ServiceError> {
    let request = PutObjectRequest {
        bucket: file.bucket.clone(),
        key: file.key.clone(),
        body: Some(object.into()),
        content_type: Some("text/csv".to_string()),
        ..Default::default()
    };
    client
        .put_object(request)
        .await
        .map(|_| ())
        .map_err(|err| ServiceError::internal_server_error(err).with_origin(&file.location()))
}
