//! HTTP 디코드 클라이언트.
//!
//! `ScanDecoder` 포트 구현. 재시도 없이 스캔 1회당 요청 1회.

use async_trait::async_trait;
use scanform_core::config::ServerConfig;
use scanform_core::error::CoreError;
use scanform_core::models::scan::{DecodeReply, ScanRequest};
use scanform_core::ports::decoder::ScanDecoder;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// 디코드 서버 클라이언트 — `ScanDecoder` 포트 구현
#[derive(Debug)]
pub struct HttpScanDecoder {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpScanDecoder {
    /// 새 디코드 클라이언트 생성
    ///
    /// `timeout`이 `None`이면 요청 타임아웃을 두지 않는다.
    pub fn new(
        base_url: &str,
        parse_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, CoreError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), parse_path),
        })
    }

    /// 서버 설정으로 생성
    pub fn from_config(server: &ServerConfig) -> Result<Self, CoreError> {
        server.validate()?;
        Self::new(&server.base_url, &server.parse_path, server.request_timeout())
    }

    /// 디코드 엔드포인트 전체 URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScanDecoder for HttpScanDecoder {
    async fn decode(&self, qr_data: &str) -> Result<DecodeReply, CoreError> {
        debug!("디코드 요청: {} ({} bytes)", self.endpoint, qr_data.len());

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&ScanRequest::new(qr_data))
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("디코드 요청 실패: {e}")))?;

        // 디코드 실패 시 서버는 4xx와 함께 `error` 본문을 보낸다.
        // 상태 코드와 무관하게 본문을 해석한다.
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("응답 본문 읽기 실패: {e}")))?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            CoreError::InvalidResponse(format!("JSON 파싱 실패 (HTTP {status}): {e}"))
        })?;

        let reply = DecodeReply::from_body(body)?;
        debug!(
            "디코드 응답: HTTP {status}, {}",
            match &reply {
                DecodeReply::Record(_) => "record",
                DecodeReply::Rejected(_) => "rejected",
            }
        );
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use mockito::Matcher;

    fn decoder_for(server: &mockito::ServerGuard) -> HttpScanDecoder {
        HttpScanDecoder::new(&server.url(), "/parse_qr", Some(Duration::from_secs(5))).unwrap()
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let decoder = HttpScanDecoder::new("http://localhost:5000/", "/parse_qr", None).unwrap();
        assert_eq!(decoder.endpoint(), "http://localhost:5000/parse_qr");
    }

    #[test]
    fn from_config_validates() {
        let server = ServerConfig {
            parse_path: "parse_qr".to_string(),
            ..ServerConfig::default()
        };
        assert_matches!(
            HttpScanDecoder::from_config(&server),
            Err(CoreError::Config(_))
        );
    }

    #[tokio::test]
    async fn decode_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/parse_qr")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({ "qrData": "ABC123" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"name":"Jane Doe","gender":"F","dob":"1990-01-01","address":"1 Main St","source":"ID"}"#,
            )
            .create_async()
            .await;

        let reply = decoder_for(&server).decode("ABC123").await.unwrap();
        let DecodeReply::Record(record) = reply else {
            panic!("expected record");
        };
        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.source.as_deref(), Some("ID"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn decode_error_body_on_bad_request() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/parse_qr")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Unsupported or invalid QR data"}"#)
            .create_async()
            .await;

        let reply = decoder_for(&server).decode("garbage").await.unwrap();
        assert_eq!(
            reply,
            DecodeReply::Rejected("Unsupported or invalid QR data".to_string())
        );
    }

    #[tokio::test]
    async fn decode_non_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/parse_qr")
            .with_status(500)
            .with_body("<html>Internal Server Error</html>")
            .create_async()
            .await;

        let result = decoder_for(&server).decode("ABC123").await;
        assert_matches!(result, Err(CoreError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn decode_connection_refused() {
        // 포트 1은 열려있지 않음
        let decoder = HttpScanDecoder::new("http://127.0.0.1:1", "/parse_qr", None).unwrap();
        let result = decoder.decode("ABC123").await;
        assert_matches!(result, Err(CoreError::Network(_)));
    }

    #[tokio::test]
    async fn decode_timeout_is_network_error() {
        // 연결은 받지만 응답하지 않는 서버
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _hold = tokio::spawn(async move {
            let mut sockets = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                sockets.push(socket);
            }
        });

        let decoder = HttpScanDecoder::new(
            &format!("http://{addr}"),
            "/parse_qr",
            Some(Duration::from_millis(200)),
        )
        .unwrap();
        let result = decoder.decode("ABC123").await;
        assert_matches!(result, Err(CoreError::Network(_)));
    }
}
