//! 게시 단계.

use tracing::info;

use market_core::PublishConfig;

use crate::twitter::{TwitterCredentials, TwitterPublisher};
use crate::types::{publish_with, PostDraft, PublishOutcome};

/// 인증 정보 조회 결과. 실패하면 누락된 변수 이름 목록.
pub type CredentialSource = Result<TwitterCredentials, Vec<&'static str>>;

/// 설정과 인증 정보에 따라 게시를 수행합니다.
///
/// 인증 정보는 게시가 활성화된 경우에만 읽습니다.
/// 비활성화되어 있거나 인증 정보가 없으면 네트워크 호출 없이 반환합니다.
/// 어떤 경우에도 에러를 반환하지 않습니다.
pub async fn publish_update<C>(config: &PublishConfig, draft: &PostDraft, credentials: C) -> PublishOutcome
where
    C: FnOnce() -> CredentialSource,
{
    if !config.enabled {
        info!("게시 비활성화, 건너뜀");
        return PublishOutcome::Disabled;
    }

    let credentials = match credentials() {
        Ok(credentials) => credentials,
        Err(missing) => {
            info!(missing = ?missing, "Twitter 인증 정보 없음, 게시 건너뜀");
            return PublishOutcome::Skipped { missing };
        }
    };

    match TwitterPublisher::new(credentials, config) {
        Ok(publisher) => publish_with(&publisher, draft).await,
        Err(e) => PublishOutcome::Failed {
            reason: e.to_string(),
        },
    }
}
