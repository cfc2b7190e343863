//! reqwest implementation of the backend API

use crate::api::types::*;
use crate::api::DashboardApi;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Longest server error body carried into an error message
const MAX_ERROR_BODY: usize = 200;

/// HTTP client for the copy-trading backend
pub struct HttpDashboardApi {
    client: Client,
    base_url: Url,
}

impl HttpDashboardApi {
    /// Create a client rooted at `base_url`
    ///
    /// `session_cookie` is sent verbatim as the `Cookie` header on every request.
    pub fn new(base_url: &str, timeout: Duration, session_cookie: Option<&str>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;

        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| AppError::Config(format!("Invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Resolve an endpoint path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::Internal(format!("Invalid endpoint '{}': {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(self.endpoint(path)?).send().await?;
        let body = read_body(response).await?;
        decode(&body)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        read_body(response).await
    }

    /// POST whose response body carries no data; an `{status: "error"}` envelope is still a failure
    async fn post_command<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let body = self.post_json(path, body).await?;
        reject_error_envelope(&body)
    }
}

/// Read the body, turning non-2xx statuses into `AppError::Server`
async fn read_body(response: Response) -> Result<Vec<u8>> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| AppError::Network(format!("Failed to read response body: {}", e)))?;

    if !status.is_success() {
        return Err(AppError::Server {
            status: status.as_u16(),
            message: server_message(status, &body),
        });
    }

    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| AppError::Decode(format!("Unexpected response: {}", e)))
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    status: Option<String>,
    message: Option<String>,
}

fn reject_error_envelope(body: &[u8]) -> Result<()> {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
        if envelope.status.as_deref() == Some("error") {
            return Err(AppError::Server {
                status: StatusCode::OK.as_u16(),
                message: envelope.message.unwrap_or_default(),
            });
        }
    }
    Ok(())
}

fn server_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(ErrorEnvelope {
        message: Some(message),
        ..
    }) = serde_json::from_slice::<ErrorEnvelope>(body)
    {
        return message;
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return status.canonical_reason().unwrap_or("request failed").to_string();
    }
    text.chars().take(MAX_ERROR_BODY).collect()
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn get_accounts_details(&self) -> Result<Snapshot> {
        let response: AccountsResponse = self.get_json("/get-accounts-details").await?;
        Ok(Snapshot::new(response.accounts))
    }

    async fn get_accounts_summary(&self) -> Result<Vec<TradeSummaryRow>> {
        let response: SummaryResponse = self.get_json("/get-accounts-summary").await?;
        Ok(response.accounts)
    }

    async fn add_account(&self, request: &AddAccountRequest) -> Result<ActionResponse> {
        let body = self.post_json("/add-account", request).await?;
        decode(&body)
    }

    async fn edit_account(&self, request: &EditAccountRequest) -> Result<()> {
        self.post_command("/edit-account", request).await
    }

    async fn delete_account(&self, client_id: &str) -> Result<()> {
        self.post_command("/delete-account", &ClientIdRequest { client_id })
            .await
    }

    async fn toggle_autologin(&self, client_id: &str, autologin: bool) -> Result<()> {
        self.post_command(
            "/toggle-autologin",
            &AutologinRequest {
                client_id,
                autologin,
            },
        )
        .await
    }

    async fn refresh_session(&self, client_id: &str) -> Result<()> {
        self.post_command("/refresh-session", &ClientIdRequest { client_id })
            .await
    }

    async fn toggle_copy_trading(&self, enabled: bool) -> Result<()> {
        self.post_command("/toggle-copy-trading", &CopyTradingRequest { enabled })
            .await
    }

    async fn toggle_child_copy(&self, client_id: &str, enabled: bool) -> Result<()> {
        self.post_command("/toggle-child-copy", &ChildCopyRequest { client_id, enabled })
            .await
    }

    async fn set_multiplier(&self, client_id: &str, multiplier: Multiplier) -> Result<()> {
        self.post_command(
            "/set-multiplier",
            &MultiplierRequest {
                client_id,
                multiplier: multiplier.value(),
            },
        )
        .await
    }

    async fn make_master(&self, name: &str) -> Result<()> {
        let path = format!("/make-master/{}", urlencoding::encode(name));
        let response = self.client.post(self.endpoint(&path)?).send().await?;
        let body = read_body(response).await?;
        reject_error_envelope(&body)
    }

    async fn get_chartink_log(&self) -> Result<Vec<ChartinkLogEntry>> {
        let response: ChartinkLogResponse = self.get_json("/chartink-log").await?;
        Ok(response.log)
    }

    async fn get_copy_config(&self) -> Result<CopyConfig> {
        let response = self.client.get(self.endpoint("/config.yaml")?).send().await?;
        let body = read_body(response).await?;
        Ok(serde_yaml::from_slice(&body)?)
    }

    async fn logout(&self) -> Result<()> {
        let response = self.client.get(self.endpoint("/logout")?).send().await?;
        read_body(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and return the base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut read = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                read.extend_from_slice(&buf[..n]);
                if read.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    fn client(base: &str) -> HttpDashboardApi {
        HttpDashboardApi::new(base, Duration::from_secs(5), None).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = client("http://localhost:5000/dash");
        assert_eq!(
            api.endpoint("/get-accounts-details").unwrap().as_str(),
            "http://localhost:5000/dash/get-accounts-details"
        );

        let api = client("http://localhost:5000");
        assert_eq!(
            api.endpoint("/chartink-log").unwrap().as_str(),
            "http://localhost:5000/chartink-log"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpDashboardApi::new("not a url", Duration::from_secs(1), None);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_server_message_prefers_envelope() {
        let message = server_message(
            StatusCode::BAD_REQUEST,
            br#"{"status": "error", "message": "Account not found"}"#,
        );
        assert_eq!(message, "Account not found");

        let message = server_message(StatusCode::BAD_GATEWAY, b"");
        assert_eq!(message, "Bad Gateway");
    }

    #[test]
    fn test_error_envelope_rejected() {
        assert!(reject_error_envelope(br#"{"status": "success"}"#).is_ok());
        assert!(reject_error_envelope(b"").is_ok());
        let err = reject_error_envelope(br#"{"status": "error", "message": "nope"}"#).unwrap_err();
        assert!(matches!(err, AppError::Server { message, .. } if message == "nope"));
    }

    #[tokio::test]
    async fn test_accounts_decoded() {
        let base = serve_once(
            "200 OK",
            r#"{"accounts": [{"name": "M1", "is_master": true, "balance": 100.5}]}"#,
        )
        .await;

        let snapshot = client(&base).get_accounts_details().await.unwrap();
        assert_eq!(snapshot.accounts.len(), 1);
        assert_eq!(snapshot.master().unwrap().name, "M1");
    }

    #[tokio::test]
    async fn test_bad_body_is_decode_error() {
        let base = serve_once("200 OK", "<html>login</html>").await;
        let err = client(&base).get_accounts_details().await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn test_error_status_is_server_error() {
        let base = serve_once("500 Internal Server Error", "boom").await;
        let err = client(&base).get_chartink_log().await.unwrap_err();
        match err {
            AppError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .get_accounts_summary()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
    }
}
