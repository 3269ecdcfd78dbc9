use thiserror::Error;

pub type Result<T> = std::result::Result<T, DealerError>;

#[derive(Debug, Error)]
pub enum DealerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Token store error: {0}")]
    TokenStore(String),
}

impl DealerError {
    /// True for 401/403 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DealerError::Api { status, .. } if *status == 401 || *status == 403)
    }

    /// Build an `Api` error from a non-success response body. The backend
    /// reports failures as `{"error": "..."}`; anything else is kept verbatim.
    pub(crate) fn from_body(status: u16, body: String) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            error: String,
        }

        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) => body,
        };
        DealerError::Api { status, message }
    }
}

impl From<reqwest::Error> for DealerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DealerError::Parse(err.to_string())
        } else {
            DealerError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DealerError {
    fn from(err: serde_json::Error) -> Self {
        DealerError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for DealerError {
    fn from(err: std::io::Error) -> Self {
        DealerError::TokenStore(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_is_extracted_from_json_body() {
        let err = DealerError::from_body(400, r#"{"error": "Username already taken"}"#.into());
        assert_eq!(err.to_string(), "API error (status 400): Username already taken");
    }

    #[test]
    fn non_json_body_is_kept_verbatim() {
        let err = DealerError::from_body(500, "<html>boom</html>".into());
        match err {
            DealerError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "<html>boom</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn forbidden_counts_as_unauthorized() {
        let err = DealerError::from_body(403, r#"{"error": "Access Denied"}"#.into());
        assert!(err.is_unauthorized());
        assert!(!DealerError::InvalidCredentials.is_unauthorized());
    }
}
