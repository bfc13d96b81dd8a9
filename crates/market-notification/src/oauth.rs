//! OAuth 1.0a 요청 서명 (HMAC-SHA1).
//!
//! 서명 기준 문자열:
//! `METHOD&enc(base_url)&enc(정렬된 파라미터)`
//!
//! 서명 키: `enc(consumer_secret)&enc(token_secret)`

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;
use std::fmt;

use crate::types::{NotificationError, NotificationResult};

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 비예약 문자(`A-Z a-z 0-9 - . _ ~`)를 제외한 모든 바이트를 인코딩
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// OAuth 1.0a 사용자 컨텍스트 서명기.
pub struct OAuthSigner {
    consumer_key: SecretString,
    consumer_secret: SecretString,
    token: SecretString,
    token_secret: SecretString,
}

impl fmt::Debug for OAuthSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthSigner")
            .field("consumer_key", &"***REDACTED***")
            .field("consumer_secret", &"***REDACTED***")
            .field("token", &"***REDACTED***")
            .field("token_secret", &"***REDACTED***")
            .finish()
    }
}

impl OAuthSigner {
    pub fn new(
        consumer_key: SecretString,
        consumer_secret: SecretString,
        token: SecretString,
        token_secret: SecretString,
    ) -> Self {
        Self {
            consumer_key,
            consumer_secret,
            token,
            token_secret,
        }
    }

    /// 새 nonce와 현재 시각으로 `Authorization` 헤더 값을 생성합니다.
    ///
    /// `params`에는 쿼리/폼 파라미터만 넣습니다. JSON, multipart 본문은
    /// 서명 대상이 아닙니다.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
    ) -> NotificationResult<String> {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();

        self.authorization_header_with(method, url, params, &nonce, &timestamp)
    }

    /// 주어진 nonce와 timestamp로 `Authorization` 헤더 값을 생성합니다.
    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> NotificationResult<String> {
        let oauth_params = [
            ("oauth_consumer_key", self.consumer_key.expose_secret()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.token.expose_secret()),
            ("oauth_version", "1.0"),
        ];

        let signature = self.signature(method, url, params, &oauth_params)?;

        let header = oauth_params
            .iter()
            .map(|(k, v)| (*k, *v))
            .chain(std::iter::once(("oauth_signature", signature.as_str())))
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {}", header))
    }

    /// 요청 서명 (base64 HMAC-SHA1).
    fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        oauth_params: &[(&str, &str)],
    ) -> NotificationResult<String> {
        let parsed = Url::parse(url)
            .map_err(|e| NotificationError::InvalidConfig(format!("잘못된 URL {}: {}", url, e)))?;
        let base_url = base_url(&parsed);

        let mut pairs: Vec<(String, String)> = params
            .iter()
            .chain(oauth_params.iter())
            .map(|(k, v)| (encode(k), encode(v)))
            .chain(parsed.query_pairs().map(|(k, v)| (encode(&k), encode(&v))))
            .collect();
        pairs.sort();

        let param_string = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let base_string = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            encode(&base_url),
            encode(&param_string)
        );
        let signing_key = format!(
            "{}&{}",
            encode(self.consumer_secret.expose_secret()),
            encode(self.token_secret.expose_secret())
        );

        let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
            .map_err(|e| NotificationError::InvalidConfig(format!("서명 키 오류: {}", e)))?;
        mac.update(base_string.as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// 쿼리와 프래그먼트를 제외한 서명용 URL (`scheme://host[:port]/path`).
fn base_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}
