//! Twitter(X) 게시기.
//!
//! 1. `POST upload.twitter.com/1.1/media/upload.json` (multipart `media`) → `media_id_string`
//! 2. `POST api.twitter.com/2/tweets` (`{"text", "media": {"media_ids"}}`) → `data.id`
//!
//! 두 요청 모두 OAuth 1.0a 사용자 컨텍스트로 서명합니다.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use market_core::PublishConfig;

use crate::oauth::OAuthSigner;
use crate::types::{
    NotificationError, NotificationResult, PostDraft, PublishedPost, SocialPublisher,
};

/// 필요한 인증 정보 환경 변수 (순서: API 키, API 시크릿, 액세스 토큰, 액세스 토큰 시크릿)
pub const CREDENTIAL_VARS: [&str; 4] = [
    "TWITTER_API_KEY",
    "TWITTER_API_SECRET",
    "TWITTER_ACCESS_TOKEN",
    "TWITTER_ACCESS_TOKEN_SECRET",
];

/// Twitter API 인증 정보.
pub struct TwitterCredentials {
    api_key: SecretString,
    api_secret: SecretString,
    access_token: SecretString,
    access_token_secret: SecretString,
}

impl fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("api_key", &"***REDACTED***")
            .field("api_secret", &"***REDACTED***")
            .field("access_token", &"***REDACTED***")
            .field("access_token_secret", &"***REDACTED***")
            .finish()
    }
}

impl TwitterCredentials {
    /// 환경 변수에서 인증 정보를 읽습니다.
    ///
    /// 하나라도 없거나 비어 있으면 누락된 변수 이름 목록을 반환합니다.
    pub fn from_env() -> Result<Self, Vec<&'static str>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 조회 함수로 인증 정보를 읽습니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Vec<&'static str>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = Vec::with_capacity(CREDENTIAL_VARS.len());
        let mut missing = Vec::new();

        for key in CREDENTIAL_VARS {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(value) => values.push(SecretString::from(value)),
                None => missing.push(key),
            }
        }

        if !missing.is_empty() {
            return Err(missing);
        }

        let mut values = values.into_iter();
        match (values.next(), values.next(), values.next(), values.next()) {
            (Some(api_key), Some(api_secret), Some(access_token), Some(access_token_secret)) => {
                Ok(Self {
                    api_key,
                    api_secret,
                    access_token,
                    access_token_secret,
                })
            }
            _ => Err(CREDENTIAL_VARS.to_vec()),
        }
    }

    fn into_signer(self) -> OAuthSigner {
        OAuthSigner::new(
            self.api_key,
            self.api_secret,
            self.access_token,
            self.access_token_secret,
        )
    }
}

#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    media_id_string: String,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
}

/// Twitter 게시기.
pub struct TwitterPublisher {
    client: Client,
    signer: OAuthSigner,
    media_upload_url: String,
    post_url: String,
}

impl TwitterPublisher {
    pub fn new(credentials: TwitterCredentials, config: &PublishConfig) -> NotificationResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            signer: credentials.into_signer(),
            media_upload_url: config.media_upload_url.clone(),
            post_url: config.post_url.clone(),
        })
    }

    /// 이미지를 업로드하고 media id를 반환합니다.
    async fn upload_media(&self, image_path: &Path) -> NotificationResult<String> {
        let bytes = tokio::fs::read(image_path).await?;
        let file_name = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "update.png".to_string());
        debug!(bytes = bytes.len(), file = %file_name, "미디어 업로드");

        let part = Part::bytes(bytes).file_name(file_name).mime_str("image/png")?;
        let form = Form::new().part("media", part);
        let auth = self
            .signer
            .authorization_header("POST", &self.media_upload_url, &[])?;

        let response = self
            .client
            .post(&self.media_upload_url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .multipart(form)
            .send()
            .await?;

        let body: MediaUploadResponse = parse_response(response).await?;
        Ok(body.media_id_string)
    }

    /// 미디어를 첨부한 게시글을 작성하고 게시글 id를 반환합니다.
    async fn create_post(&self, text: &str, media_id: &str) -> NotificationResult<String> {
        let payload = json!({
            "text": text,
            "media": { "media_ids": [media_id] },
        });
        let auth = self.signer.authorization_header("POST", &self.post_url, &[])?;

        let response = self
            .client
            .post(&self.post_url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&payload)
            .send()
            .await?;

        let body: CreatePostResponse = parse_response(response).await?;
        Ok(body.data.id)
    }
}

/// 상태 코드를 확인하고 JSON 본문을 파싱합니다.
async fn parse_response<T: for<'de> Deserialize<'de>>(response: Response) -> NotificationResult<T> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        return Err(NotificationError::RateLimited(retry_after));
    }

    let text = response.text().await?;
    if !status.is_success() {
        return Err(NotificationError::SendFailed(format!("HTTP {}: {}", status, text)));
    }

    serde_json::from_str(&text)
        .map_err(|e| NotificationError::InvalidResponse(format!("{}: {}", e, text)))
}

#[async_trait]
impl SocialPublisher for TwitterPublisher {
    async fn publish(&self, draft: &PostDraft) -> NotificationResult<PublishedPost> {
        let media_id = self.upload_media(&draft.image_path).await?;
        info!(%media_id, "미디어 업로드 완료");

        let post_id = self.create_post(&draft.text, &media_id).await?;
        Ok(PublishedPost { post_id, media_id })
    }

    fn name(&self) -> &str {
        "twitter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn full_lookup() -> impl Fn(&str) -> Option<String> {
        lookup_from(&[
            ("TWITTER_API_KEY", "key"),
            ("TWITTER_API_SECRET", "secret"),
            ("TWITTER_ACCESS_TOKEN", "token"),
            ("TWITTER_ACCESS_TOKEN_SECRET", "token-secret"),
        ])
    }

    fn temp_png(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.png", name, std::process::id()));
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nfake").unwrap();
        path
    }

    #[test]
    fn test_missing_credentials_are_named() {
        let lookup = lookup_from(&[
            ("TWITTER_API_KEY", "key"),
            ("TWITTER_API_SECRET", ""),
            ("TWITTER_ACCESS_TOKEN", "token"),
        ]);

        let missing = TwitterCredentials::from_lookup(lookup).unwrap_err();
        assert_eq!(missing, vec!["TWITTER_API_SECRET", "TWITTER_ACCESS_TOKEN_SECRET"]);
    }

    #[test]
    fn test_credentials_debug_is_masked() {
        let credentials = TwitterCredentials::from_lookup(full_lookup()).unwrap();
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("token-secret"));
    }

    #[tokio::test]
    async fn test_publish_uploads_then_posts() {
        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/1.1/media/upload.json")
            .match_header("authorization", Matcher::Regex(r#"^OAuth .*oauth_signature=""#.to_string()))
            .match_header("content-type", Matcher::Regex("^multipart/form-data".to_string()))
            .with_status(200)
            .with_body(r#"{"media_id":710511363345354753,"media_id_string":"710511363345354753"}"#)
            .create_async()
            .await;
        let post = server
            .mock("POST", "/2/tweets")
            .match_body(Matcher::PartialJson(json!({
                "text": "Global Market Update",
                "media": {"media_ids": ["710511363345354753"]}
            })))
            .with_status(201)
            .with_body(r#"{"data":{"id":"1445880548472328192","text":"Global Market Update"}}"#)
            .create_async()
            .await;

        let config = PublishConfig {
            media_upload_url: format!("{}/1.1/media/upload.json", server.url()),
            post_url: format!("{}/2/tweets", server.url()),
            ..Default::default()
        };
        let credentials = TwitterCredentials::from_lookup(full_lookup()).unwrap();
        let publisher = TwitterPublisher::new(credentials, &config).unwrap();

        let image_path = temp_png("publish-ok");
        let result = publisher
            .publish(&PostDraft {
                text: "Global Market Update".to_string(),
                image_path: image_path.clone(),
            })
            .await;
        std::fs::remove_file(&image_path).ok();

        let published = result.unwrap();
        assert_eq!(published.media_id, "710511363345354753");
        assert_eq!(published.post_id, "1445880548472328192");
        upload.assert_async().await;
        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_failure_skips_post() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/1.1/media/upload.json")
            .with_status(401)
            .with_body(r#"{"errors":[{"code":32,"message":"Could not authenticate you."}]}"#)
            .create_async()
            .await;
        let post = server
            .mock("POST", "/2/tweets")
            .expect(0)
            .create_async()
            .await;

        let config = PublishConfig {
            media_upload_url: format!("{}/1.1/media/upload.json", server.url()),
            post_url: format!("{}/2/tweets", server.url()),
            ..Default::default()
        };
        let publisher =
            TwitterPublisher::new(TwitterCredentials::from_lookup(full_lookup()).unwrap(), &config)
                .unwrap();

        let image_path = temp_png("publish-fail");
        let err = publisher
            .publish(&PostDraft {
                text: "x".to_string(),
                image_path: image_path.clone(),
            })
            .await
            .unwrap_err();
        std::fs::remove_file(&image_path).ok();

        assert!(matches!(err, NotificationError::SendFailed(ref m) if m.contains("401")));
        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limit_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/1.1/media/upload.json")
            .with_status(429)
            .with_header("retry-after", "900")
            .create_async()
            .await;

        let config = PublishConfig {
            media_upload_url: format!("{}/1.1/media/upload.json", server.url()),
            post_url: format!("{}/2/tweets", server.url()),
            ..Default::default()
        };
        let publisher =
            TwitterPublisher::new(TwitterCredentials::from_lookup(full_lookup()).unwrap(), &config)
                .unwrap();

        let image_path = temp_png("publish-429");
        let err = publisher
            .publish(&PostDraft {
                text: "x".to_string(),
                image_path: image_path.clone(),
            })
            .await
            .unwrap_err();
        std::fs::remove_file(&image_path).ok();

        assert!(matches!(err, NotificationError::RateLimited(900)));
    }
}
