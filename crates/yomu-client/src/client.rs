use std::time::Duration;

use serde::de::DeserializeOwned;
use yomu_core::{DictionaryBackend, FetchError, TokenizerClient};
use yomu_types::{DefinitionTag, DictionaryEntry, Lexeme};

use crate::envelope::decode;

/// Lookup server client. One server provides tokenization and both
/// dictionary searches.
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the server answers
    pub async fn check_health(&self) -> Result<(), FetchError> {
        let response = self
            .client
            .get(self.endpoint("health"))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(FetchError::Rejected {
                status: status.as_u16().to_string(),
                message: "health check failed".to_string(),
            })
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// GET `path` with a single query parameter and unwrap the envelope
    async fn get<T>(&self, path: &str, parameter: (&str, &str)) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("GET {} {}={}", path, parameter.0, parameter.1);

        let response = self
            .client
            .get(self.endpoint(path))
            .query(&[parameter])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(request_error)?;

        decode(status, &body)
    }
}

fn request_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(e.to_string())
    }
}

#[async_trait::async_trait]
impl TokenizerClient for HttpBackend {
    async fn tokenize(&self, sentence: &str) -> Result<Vec<Lexeme>, FetchError> {
        self.get("tokenize", ("sentence", sentence)).await
    }
}

#[async_trait::async_trait]
impl DictionaryBackend for HttpBackend {
    async fn search_entries(&self, expression: &str) -> Result<Vec<DictionaryEntry>, FetchError> {
        self.get("dictionary_entries/search", ("expression", expression))
            .await
    }

    async fn search_definition_tags(&self, name: &str) -> Result<Vec<DefinitionTag>, FetchError> {
        self.get("definition_tags/search", ("name", name)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serves every connection with `status` and `body`, recording each
    /// request line.
    async fn serve(status: &'static str, body: &'static str) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buffer = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buffer.windows(4).any(|window| window == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buffer.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buffer);
                if let Some(line) = request.lines().next() {
                    seen.lock().unwrap().push(line.to_string());
                }

                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{address}/"), requests)
    }

    #[tokio::test]
    async fn test_tokenize_request() {
        let (url, requests) = serve(
            "200 OK",
            r#"{"status":"success","data":[{"word":"食べ","tokens":[{"lemma":"食べる"}]}]}"#,
        )
        .await;
        let backend = HttpBackend::new(url, Duration::from_secs(5));

        let lexemes = backend.tokenize("食べ").await.unwrap();

        assert_eq!(lexemes.len(), 1);
        assert_eq!(lexemes[0].head_lemma(), Some("食べる"));
        let requests = requests.lock().unwrap();
        assert!(requests[0].starts_with("GET /tokenize?sentence=%E9%A3%9F%E3%81%B9 "));
    }

    #[tokio::test]
    async fn test_search_paths() {
        let (url, requests) = serve("200 OK", r#"{"status":"success","data":[]}"#).await;
        let backend = HttpBackend::new(url, Duration::from_secs(5));

        assert!(backend.search_entries("a").await.unwrap().is_empty());
        assert!(backend.search_definition_tags("v1").await.unwrap().is_empty());

        let requests = requests.lock().unwrap();
        assert!(requests[0].starts_with("GET /dictionary_entries/search?expression=a "));
        assert!(requests[1].starts_with("GET /definition_tags/search?name=v1 "));
    }

    #[tokio::test]
    async fn test_server_rejection() {
        let (url, _) = serve(
            "400 Bad Request",
            r#"{"status":"fail","message":"name: length"}"#,
        )
        .await;
        let backend = HttpBackend::new(url, Duration::from_secs(5));

        let result = backend.search_definition_tags("x").await;

        assert_eq!(
            result,
            Err(FetchError::Rejected {
                status: "fail".to_string(),
                message: "name: length".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);
        let backend = HttpBackend::new(format!("http://{address}"), Duration::from_secs(5));

        let result = backend.tokenize("x").await;

        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[tokio::test]
    async fn test_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        // Accept and hold connections without answering
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        let backend = HttpBackend::new(format!("http://{address}"), Duration::from_millis(50));

        assert_eq!(backend.tokenize("x").await, Err(FetchError::Timeout));
    }

    #[tokio::test]
    async fn test_health() {
        let (url, requests) = serve("200 OK", "Ok").await;
        let backend = HttpBackend::new(url, Duration::from_secs(5));

        backend.check_health().await.unwrap();
        assert!(requests.lock().unwrap()[0].starts_with("GET /health "));
    }
}
