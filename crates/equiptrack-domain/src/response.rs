use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// Wire shape of a registry call.
///
/// Serializes as `{"value": ...}` on success (`{"value": null}` for a read
/// miss, which is not an error) and `{"error": code}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CallResponse<T> {
    Value { value: Option<T> },
    Error { error: u16 },
}

impl<T> CallResponse<T> {
    pub fn value(value: T) -> Self {
        CallResponse::Value { value: Some(value) }
    }

    pub fn miss() -> Self {
        CallResponse::Value { value: None }
    }

    pub fn error(err: &DomainError) -> Self {
        CallResponse::Error { error: err.code() }
    }

    /// Envelope for a mutation or id-returning operation
    pub fn from_result(result: DomainResult<T>) -> Self {
        match result {
            Ok(value) => Self::value(value),
            Err(err) => Self::error(&err),
        }
    }

    /// Envelope for a read; a miss is `{"value": null}`, never an error
    pub fn from_read(result: DomainResult<Option<T>>) -> Self {
        match result {
            Ok(value) => CallResponse::Value { value },
            Err(err) => Self::error(&err),
        }
    }
}

impl CallResponse<bool> {
    /// Envelope for a mutation: `{"value": true}` on success
    pub fn from_mutation(result: DomainResult<()>) -> Self {
        match result {
            Ok(()) => Self::value(true),
            Err(err) => Self::error(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_as_value() {
        let response = CallResponse::from_result(Ok(1u64));
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({"value": 1}));
    }

    #[test]
    fn read_miss_serializes_as_null_value() {
        let response: CallResponse<u64> = CallResponse::from_read(Ok(None));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"value": null})
        );
    }

    #[test]
    fn not_found_serializes_as_error_404() {
        let response: CallResponse<u64> =
            CallResponse::from_result(Err(DomainError::DeviceNotFound(999)));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": 404})
        );
    }

    #[test]
    fn forbidden_serializes_as_error_403() {
        let response: CallResponse<bool> = CallResponse::from_result(Err(DomainError::NotOwner));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": 403})
        );
    }

    #[test]
    fn successful_mutation_serializes_as_value_true() {
        let response = CallResponse::from_mutation(Ok(()));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"value": true})
        );
    }
}
