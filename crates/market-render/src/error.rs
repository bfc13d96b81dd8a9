//! 렌더링 오류 타입.

use thiserror::Error;

/// 렌더링 오류.
#[derive(Debug, Error)]
pub enum RenderError {
    /// 이미지 인코딩/저장 실패
    #[error("이미지 저장 실패: {0}")]
    Image(#[from] image::ImageError),

    /// 출력 디렉토리 생성 실패
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
}

/// 렌더링 Result 타입.
pub type Result<T> = std::result::Result<T, RenderError>;
