//! # scanform-network
//!
//! 스캔 디코드 서버 HTTP 어댑터.
//! `ScanDecoder` 포트를 reqwest로 구현하며 `/parse_qr` 와이어 계약을 따른다.
//!
//! ```rust,ignore
//! use scanform_network::http_decoder::HttpScanDecoder;
//!
//! let decoder = HttpScanDecoder::from_config(&config.server)?;
//! let reply = decoder.decode("ABC123").await?;
//! ```

pub mod http_decoder;
