use serde::Deserialize;
use serde::de::DeserializeOwned;
use yomu_core::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
    Error,
}

impl ResponseStatus {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

/// Body of every lookup server response.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: ResponseStatus,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> Result<T, FetchError> {
        match (self.status, self.data) {
            (ResponseStatus::Success, Some(data)) => Ok(data),
            (ResponseStatus::Success, None) => Err(FetchError::InvalidResponse(
                "success response without data".to_string(),
            )),
            (status, _) => Err(FetchError::Rejected {
                status: status.as_str().to_string(),
                message: self.message.unwrap_or_default(),
            }),
        }
    }
}

/// Decodes a response body. `http_status` only matters when the body is not
/// an envelope.
pub fn decode<T: DeserializeOwned>(http_status: u16, body: &[u8]) -> Result<T, FetchError> {
    match serde_json::from_slice::<Envelope<T>>(body) {
        Ok(envelope) => envelope.into_result(),
        Err(_) if !(200..300).contains(&http_status) => Err(FetchError::Rejected {
            status: http_status.to_string(),
            message: String::from_utf8_lossy(body).into_owned(),
        }),
        Err(e) => Err(FetchError::InvalidResponse(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use yomu_types::DefinitionTag;

    use super::*;

    #[test]
    fn test_success_yields_data() {
        let body = br#"{"status":"success","data":[{"id":1,"dictionary_id":3,"name":"v1"}]}"#;

        let tags: Vec<DefinitionTag> = decode(200, body).unwrap();

        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].dictionary_id, 3);
    }

    #[test]
    fn test_fail_and_error_are_rejections() {
        let fail = decode::<Vec<String>>(400, br#"{"status":"fail","message":"sentence: length"}"#);
        let error = decode::<Vec<String>>(500, br#"{"status":"error","message":"db down"}"#);

        assert_eq!(
            fail,
            Err(FetchError::Rejected {
                status: "fail".to_string(),
                message: "sentence: length".to_string()
            })
        );
        assert_eq!(
            error,
            Err(FetchError::Rejected {
                status: "error".to_string(),
                message: "db down".to_string()
            })
        );
    }

    #[test]
    fn test_success_without_data_is_invalid() {
        let result = decode::<Vec<String>>(200, br#"{"status":"success"}"#);

        assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
    }

    #[test]
    fn test_non_envelope_bodies() {
        assert_eq!(
            decode::<Vec<String>>(502, b"Bad Gateway"),
            Err(FetchError::Rejected {
                status: "502".to_string(),
                message: "Bad Gateway".to_string()
            })
        );
        assert!(matches!(
            decode::<Vec<String>>(200, b"<html>"),
            Err(FetchError::InvalidResponse(_))
        ));
    }
}
