//! 마켓 업데이트 SNS 게시.
//!
//! 렌더링된 이미지를 Twitter(X)에 업로드하고 요약 게시글을 작성합니다.
//!
//! - `oauth`: OAuth 1.0a HMAC-SHA1 요청 서명
//! - `twitter`: 미디어 업로드(v1.1) + 게시글 작성(v2)
//! - `message`: 게시글 본문 구성 (280자 제한)
//!
//! 인증 정보가 없으면 네트워크 호출 없이 건너뛰고, 게시 실패는 실행을
//! 중단시키지 않습니다.

pub mod message;
pub mod oauth;
pub mod publish;
pub mod twitter;
pub mod types;

pub use message::{compose_post, weighted_len, MAX_POST_CHARS};
pub use oauth::OAuthSigner;
pub use publish::{publish_update, CredentialSource};
pub use twitter::{TwitterCredentials, TwitterPublisher, CREDENTIAL_VARS};
pub use types::*;
