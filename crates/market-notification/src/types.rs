//! 게시 타입 및 trait 정의.

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

/// 게시 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 게시 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("게시 실패: {0}")]
    SendFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("요청 한도 초과: {0}초 후 재시도")]
    RateLimited(u64),

    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("직렬화 에러: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("이미지 읽기 실패: {0}")]
    Io(#[from] std::io::Error),

    #[error("예상하지 못한 응답: {0}")]
    InvalidResponse(String),
}

/// 게시할 내용.
#[derive(Debug, Clone)]
pub struct PostDraft {
    /// 게시글 본문
    pub text: String,
    /// 첨부할 PNG 파일
    pub image_path: PathBuf,
}

/// 게시 완료된 글.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPost {
    pub post_id: String,
    pub media_id: String,
}

/// 게시 단계 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// 설정에서 게시 비활성화 또는 `--skip-publish`
    Disabled,
    /// 인증 정보 누락으로 건너뜀 (네트워크 호출 없음)
    Skipped { missing: Vec<&'static str> },
    /// 게시 완료
    Posted { post_id: String, media_id: String },
    /// 업로드 또는 게시 실패
    Failed { reason: String },
}

impl PublishOutcome {
    /// 로그/리포트용 짧은 상태 문자열.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Skipped { .. } => "skipped",
            Self::Posted { .. } => "posted",
            Self::Failed { .. } => "failed",
        }
    }
}

/// SNS 게시기 trait.
#[async_trait]
pub trait SocialPublisher: Send + Sync {
    /// 이미지를 첨부하여 게시합니다.
    async fn publish(&self, draft: &PostDraft) -> NotificationResult<PublishedPost>;

    /// 게시기 이름을 반환합니다.
    fn name(&self) -> &str;
}

/// 게시를 시도하고 에러를 `Failed`로 변환합니다.
pub async fn publish_with(publisher: &dyn SocialPublisher, draft: &PostDraft) -> PublishOutcome {
    match publisher.publish(draft).await {
        Ok(post) => {
            info!(publisher = publisher.name(), post_id = %post.post_id, "게시 완료");
            PublishOutcome::Posted {
                post_id: post.post_id,
                media_id: post.media_id,
            }
        }
        Err(e) => {
            error!(publisher = publisher.name(), error = %e, "게시 실패");
            PublishOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingPublisher;

    #[async_trait]
    impl SocialPublisher for FailingPublisher {
        async fn publish(&self, _draft: &PostDraft) -> NotificationResult<PublishedPost> {
            Err(NotificationError::RateLimited(900))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_publish_with_converts_error() {
        let draft = PostDraft {
            text: "hello".to_string(),
            image_path: PathBuf::from("update.png"),
        };
        let outcome = publish_with(&FailingPublisher, &draft).await;

        assert_eq!(outcome.label(), "failed");
        match outcome {
            PublishOutcome::Failed { reason } => assert!(reason.contains("900")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(PublishOutcome::Skipped {
            missing: vec!["TWITTER_API_KEY"],
        })
        .unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["missing"][0], "TWITTER_API_KEY");
    }
}
