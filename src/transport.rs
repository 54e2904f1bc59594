//! Transport abstraction used by the validator to reach the lookup service.
//!
//! A transport takes a URL and hands back the response body as a byte stream.
//! Any `Fn(String) -> Future` with the right output is a transport, so tests
//! and callers can plug in plain async functions. [`HttpTransport`] is the
//! wreq-backed implementation used against the real service.

use std::future::Future;

use anyhow::{Context, Result};
use futures::future::{self, BoxFuture};
use futures::stream::{self, BoxStream, StreamExt};
use wreq::Client;
use wreq_util::Emulation;

use crate::error::BoxError;

/// Response body as a stream of byte chunks.
pub type ResponseBody = BoxStream<'static, Result<Vec<u8>, BoxError>>;

/// Given a URL, produce a response body or fail.
pub trait Transport: Send + Sync {
    fn call<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<ResponseBody, BoxError>>;
}

impl<F, Fut> Transport for F
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ResponseBody, BoxError>> + Send + 'static,
{
    fn call<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<ResponseBody, BoxError>> {
        Box::pin(self(url.to_string()))
    }
}

/// Build a single-chunk body from an in-memory payload.
pub fn body_from_bytes(bytes: impl Into<Vec<u8>>) -> ResponseBody {
    stream::once(future::ready(Ok(bytes.into()))).boxed()
}

/// HTTP transport performing GET requests with wreq.
///
/// Non-2xx responses are reported as transport failures. The body is read
/// lazily when the returned stream is polled.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .emulation(Emulation::Chrome143)
            .gzip(true)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client))
    }

    /// Use a caller-configured client (proxy, timeouts, ...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, url: &str) -> Result<ResponseBody, BoxError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Lookup request failed: {} for {}", status, url).into());
        }

        let body = stream::once(async move {
            response
                .bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(BoxError::from)
        })
        .boxed();
        Ok(body)
    }
}

impl Transport for HttpTransport {
    fn call<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<ResponseBody, BoxError>> {
        Box::pin(self.fetch(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn echo_url(url: String) -> Result<ResponseBody, BoxError> {
        Ok(body_from_bytes(url))
    }

    /// Serve one canned HTTP/1.1 response and return the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fn_transport_receives_url() {
        let body = Transport::call(&echo_url, "http://lookup/11111111/json")
            .await
            .unwrap();
        let bytes: Vec<u8> = body.try_concat().await.unwrap();
        assert_eq!(bytes, b"http://lookup/11111111/json");
    }

    #[tokio::test]
    async fn test_body_from_bytes_single_chunk() {
        let chunks: Vec<Vec<u8>> = body_from_bytes("{}").try_collect().await.unwrap();
        assert_eq!(chunks, vec![b"{}".to_vec()]);
    }

    #[tokio::test]
    async fn test_http_transport_reads_body() {
        let base = serve_once("200 OK", r#"{"cep":"11111111"}"#).await;
        let transport = HttpTransport::new().unwrap();
        let body = transport
            .call(&format!("{}/11111111/json", base))
            .await
            .unwrap();
        let bytes: Vec<u8> = body.try_concat().await.unwrap();
        assert_eq!(bytes, br#"{"cep":"11111111"}"#);
    }

    #[tokio::test]
    async fn test_http_transport_rejects_error_status() {
        let base = serve_once("400 Bad Request", "<h1>Bad Request</h1>").await;
        let transport = HttpTransport::new().unwrap();
        let result = transport.call(&format!("{}/abc/json", base)).await;
        let err = result.err().expect("error status should fail");
        assert!(err.to_string().contains("400"), "unexpected error: {}", err);
    }
}
