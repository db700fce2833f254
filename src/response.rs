use serde::{de, Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
        }
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.code())
    }
}

struct StatusCodeVisitor;

impl<'de> de::Visitor<'de> for StatusCodeVisitor {
    type Value = Status;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an HTTP status code")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match v {
            200 => Ok(Status::Ok),
            400 => Ok(Status::BadRequest),
            404 => Ok(Status::NotFound),
            500 => Ok(Status::InternalServerError),
            value => Err(de::Error::custom(format!("unsupported status {value}"))),
        }
    }
}

impl<'de> de::Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_u16(StatusCodeVisitor)
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    pub status_code: Status,
    pub headers: Value,
    pub body: Value,
}

/// Wraps the outcome of a clustering run in the envelope returned by the function.
/// Failures become `{"message", "origin"}` so callers can tell a bad input file
/// from a bad reference file without parsing the message.
pub fn make_response_payload(
    result: Result<Value, ServiceError>,
) -> Result<Value, lambda_runtime::Error> {
    let headers = json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*"
    });
    let response_payload = match result {
        Err(err) => ResponsePayload {
            status_code: err.status,
            headers,
            body: json!({
                "message": err.msg,
                "origin": err.origin,
            }),
        },
        Ok(body) => ResponsePayload {
            status_code: Status::Ok,
            headers,
            body,
        },
    };
    serde_json::to_value(response_payload).map_err(lambda_runtime::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_results_carry_their_status_and_origin() {
        let payload = make_response_payload(Err(ServiceError::unreadable_file(
            "input",
            "CSV error: record 3: found record with 0 fields",
        )))
        .unwrap();
        assert_eq!(payload["statusCode"], 500);
        assert_eq!(payload["body"]["origin"], "input");
        assert!(payload["body"]["message"]
            .as_str()
            .unwrap()
            .starts_with("unable to read input file"));
    }

    #[test]
    fn missing_objects_are_not_found() {
        let payload = make_response_payload(Err(ServiceError::not_found(
            "no object at s3://banks/reference/master.csv",
        )
        .with_origin("s3://banks/reference/master.csv")))
        .unwrap();
        assert_eq!(payload["statusCode"], 404);
        let parsed: ResponsePayload = serde_json::from_value(payload).unwrap();
        assert_eq!(parsed.status_code, Status::NotFound);
    }

    #[test]
    fn payload_round_trips_through_status_visitor() {
        let payload = make_response_payload(Ok(json!({"groups": 3}))).unwrap();
        let parsed: ResponsePayload = serde_json::from_value(payload).unwrap();
        assert_eq!(parsed.status_code, Status::Ok);
        assert_eq!(parsed.body["groups"], 3);
    }
}
