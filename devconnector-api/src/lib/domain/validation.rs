use std::fmt;

use serde::Serialize;

/// One rejected input field, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    pub fn new(param: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            msg: error.to_string(),
            param: Some(param.into()),
        }
    }

    /// Rejection that is not tied to a single input field.
    pub fn general(error: impl fmt::Display) -> Self {
        Self {
            msg: error.to_string(),
            param: None,
        }
    }
}

/// Collects every field failure of a request instead of stopping at the first.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one field check, keeping the value on success.
    pub fn check<T, E: fmt::Display>(&mut self, param: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(FieldError::new(param, e));
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_error_omits_param() {
        let json = serde_json::to_value(FieldError::general("User exists already.")).unwrap();
        assert_eq!(json, serde_json::json!({ "msg": "User exists already." }));

        let json = serde_json::to_value(FieldError::new("email", "Please include a valid email"))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "msg": "Please include a valid email", "param": "email" })
        );
    }

    #[test]
    fn test_collects_all_failures_in_order() {
        let mut errors = FieldErrors::new();

        let a: Option<u8> = errors.check("a", Err::<u8, _>("first"));
        let b = errors.check("b", Ok::<_, String>(2u8));
        let c: Option<u8> = errors.check("c", Err::<u8, _>("third"));

        assert_eq!(a, None);
        assert_eq!(b, Some(2));
        assert_eq!(c, None);
        assert_eq!(
            errors.into_inner(),
            vec![FieldError::new("a", "first"), FieldError::new("c", "third")]
        );
    }
}
