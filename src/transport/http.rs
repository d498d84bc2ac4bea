// file: src/transport/http.rs
// version: 1.1.0
// guid: 6e035c1d-c039-4b95-8aaa-2ccea0954bec

//! SigV4-signed HTTPS transport for the EC2 Query API

use super::signing::{form_encode, SigV4Signer};
use super::{xml, Ec2Transport, QueryParams, TransportError, TransportResult, API_VERSION};
use crate::config::{Credentials, RetryConfig, Settings};
use crate::error::{Ec2CmdError, Result};
use chrono::Utc;
use rand::Rng;
use reqwest::Client;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::time::Duration;
use tracing::{debug, warn};

const SERVICE: &str = "ec2";

/// Production transport: one signed POST per attempt.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    signer: SigV4Signer,
    endpoint: String,
    host: String,
    retry: RetryConfig,
    user_agent: String,
}

impl HttpTransport {
    /// Build a transport for the region and endpoint in `settings`
    pub fn new(settings: &Settings, credentials: &Credentials) -> Result<Self> {
        let region = settings.require_region()?;
        let endpoint = settings.ec2_endpoint()?;
        let host = url::Url::parse(&endpoint)
            .ok()
            .and_then(|u| {
                u.host_str().map(|h| match u.port() {
                    Some(port) => format!("{}:{}", h, port),
                    None => h.to_string(),
                })
            })
            .ok_or_else(|| Ec2CmdError::config(format!("Endpoint has no host: {}", endpoint)))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_seconds))
            .build()
            .map_err(|e| Ec2CmdError::config(format!("Failed to build HTTP client: {}", e)))?;

        let signer = SigV4Signer::new(
            &credentials.access_key_id,
            &credentials.secret_access_key,
            credentials.session_token.as_deref(),
            region,
            SERVICE,
        );

        Ok(Self {
            http,
            signer,
            endpoint,
            host,
            retry: settings.retry.clone(),
            user_agent: format!("ec2-cmd/{}", crate::VERSION),
        })
    }

    /// Endpoint every request is sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_once(&self, body: &str) -> TransportResult<String> {
        let mut headers = BTreeMap::new();
        headers.insert("host".to_string(), self.host.clone());
        headers.insert(
            "content-type".to_string(),
            "application/x-www-form-urlencoded; charset=utf-8".to_string(),
        );
        let signed = self
            .signer
            .sign("POST", &self.endpoint, &headers, body, Utc::now())?;

        let mut request = self
            .http
            .post(&self.endpoint)
            .header("user-agent", &self.user_agent)
            .body(body.to_string());
        for (name, value) in &signed {
            if name != "host" {
                request = request.header(name.as_str(), value.as_str());
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify(&self.endpoint, e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| classify(&self.endpoint, e))?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(TransportError::Service(xml::parse_error(status.as_u16(), &text)))
        }
    }

    /// Capped exponential backoff with full jitter.
    fn backoff_ms(&self, attempt: u32) -> u64 {
        let exponential = self
            .retry
            .initial_backoff_ms
            .saturating_mul(2u64.saturating_pow(attempt));
        let capped = exponential.min(self.retry.max_backoff_ms);
        rand::thread_rng().gen_range(0..=capped)
    }
}

#[async_trait::async_trait]
impl Ec2Transport for HttpTransport {
    async fn send(&self, action: &str, params: &QueryParams) -> TransportResult<String> {
        let mut form = params.clone();
        form.insert("Action".to_string(), action.to_string());
        form.insert("Version".to_string(), API_VERSION.to_string());
        let body = form_encode(&form);

        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            debug!("POST {} {} (attempt {})", self.endpoint, action, attempt + 1);
            match self.send_once(&body).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && attempt + 1 < max_attempts => {
                    let delay = self.backoff_ms(attempt);
                    warn!(
                        "{} failed (attempt {}/{}): {} - retrying in {}ms",
                        action,
                        attempt + 1,
                        max_attempts,
                        err,
                        delay
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn classify(endpoint: &str, err: reqwest::Error) -> TransportError {
    if err.is_connect() && is_name_resolution(&err) {
        return TransportError::NameResolution {
            endpoint: endpoint.to_string(),
            source: Box::new(err),
        };
    }
    TransportError::Http(err)
}

/// Walks the source chain looking for a resolver failure.
fn is_name_resolution(err: &(dyn StdError + 'static)) -> bool {
    const MARKERS: [&str; 5] = [
        "dns error",
        "failed to lookup address",
        "name or service not known",
        "no such host",
        "nodename nor servname",
    ];

    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(cause) = current {
        let text = cause.to_string().to_ascii_lowercase();
        if MARKERS.iter().any(|marker| text.contains(marker)) {
            return true;
        }
        current = cause.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const UNAVAILABLE: &str = "<Response><Errors><Error><Code>Unavailable</Code>\
        <Message>busy</Message></Error></Errors><RequestID>r-1</RequestID></Response>";
    const AUTH_FAILURE: &str = "<Response><Errors><Error><Code>AuthFailure</Code>\
        <Message>no</Message></Error></Errors><RequestID>r-2</RequestID></Response>";
    const OK_BODY: &str = "<GetEbsEncryptionByDefaultResponse>\
        <ebsEncryptionByDefault>true</ebsEncryptionByDefault></GetEbsEncryptionByDefaultResponse>";

    #[derive(Debug)]
    struct Wrapped {
        inner: std::io::Error,
    }

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error trying to connect")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    fn settings(endpoint: Option<&str>) -> Settings {
        Settings {
            region: Some("us-west-2".to_string()),
            endpoint_url: endpoint.map(str::to_string),
            ..Settings::default()
        }
    }

    #[test]
    fn test_resolver_failure_found_in_source_chain() {
        let err = Wrapped {
            inner: std::io::Error::new(
                std::io::ErrorKind::Other,
                "failed to lookup address information: Name or service not known",
            ),
        };
        assert!(is_name_resolution(&err));
    }

    #[test]
    fn test_refused_connection_is_not_resolution() {
        let err = Wrapped {
            inner: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused"),
        };
        assert!(!is_name_resolution(&err));
    }

    #[test]
    fn test_regional_endpoint_and_host() {
        let transport =
            HttpTransport::new(&settings(None), &Credentials::new("AKID", "SECRET")).unwrap();
        assert_eq!(transport.endpoint(), "https://ec2.us-west-2.amazonaws.com");
        assert_eq!(transport.host, "ec2.us-west-2.amazonaws.com");
    }

    #[test]
    fn test_endpoint_override_keeps_port() {
        let transport = HttpTransport::new(
            &settings(Some("http://localhost:4566")),
            &Credentials::new("AKID", "SECRET"),
        )
        .unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:4566");
        assert_eq!(transport.host, "localhost:4566");
    }

    #[test]
    fn test_missing_region_is_config_error() {
        let settings = Settings::default();
        let err = HttpTransport::new(&settings, &Credentials::new("AKID", "SECRET")).unwrap_err();
        assert!(matches!(err, Ec2CmdError::Config(_)));
    }

    /// Serves one canned reply per connection and counts the requests seen.
    async fn serve(replies: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            for (status, body) in replies {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                read_request(&mut socket).await;
                counter.fetch_add(1, Ordering::SeqCst);

                let response = format!(
                    "HTTP/1.1 {} X\r\ncontent-type: text/xml\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), hits)
    }

    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => n,
            };
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return;
                }
            }
        }
    }

    fn local_transport(endpoint: &str, max_attempts: u32) -> HttpTransport {
        let mut settings = settings(Some(endpoint));
        settings.retry = RetryConfig {
            max_attempts,
            initial_backoff_ms: 1,
            max_backoff_ms: 5,
        };
        HttpTransport::new(&settings, &Credentials::new("AKID", "SECRET")).unwrap()
    }

    #[tokio::test]
    async fn test_unavailable_is_retried_until_success() {
        let (endpoint, hits) = serve(vec![(503, UNAVAILABLE), (200, OK_BODY)]).await;
        let transport = local_transport(&endpoint, 3);

        let body = transport
            .send("GetEbsEncryptionByDefault", &QueryParams::new())
            .await
            .unwrap();

        assert_eq!(body, OK_BODY);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let (endpoint, hits) = serve(vec![(400, AUTH_FAILURE), (200, OK_BODY)]).await;
        let transport = local_transport(&endpoint, 3);

        let err = transport
            .send("GetEbsEncryptionByDefault", &QueryParams::new())
            .await
            .unwrap_err();

        match err {
            TransportError::Service(service) => {
                assert_eq!(service.code, "AuthFailure");
                assert_eq!(service.status, 400);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_stop_at_max_attempts() {
        let (endpoint, hits) = serve(vec![
            (503, UNAVAILABLE),
            (503, UNAVAILABLE),
            (200, OK_BODY),
        ])
        .await;
        let transport = local_transport(&endpoint, 2);

        let err = transport
            .send("GetEbsEncryptionByDefault", &QueryParams::new())
            .await
            .unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_backoff_is_capped() {
        let mut settings = settings(None);
        settings.retry = RetryConfig {
            max_attempts: 5,
            initial_backoff_ms: 100,
            max_backoff_ms: 250,
        };
        let transport = HttpTransport::new(&settings, &Credentials::new("AKID", "SECRET")).unwrap();
        for attempt in 0..6 {
            assert!(transport.backoff_ms(attempt) <= 250);
        }
    }
}
