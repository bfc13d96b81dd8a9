//! 일일 마켓 업데이트 파이프라인.
//!
//! 순서대로 실행되는 다섯 단계:
//! 1. 종목 시세 수집
//! 2. F&O 밴 리스트 수집
//! 3. 52주 신고가/신저가 수집
//! 4. 이미지 렌더링
//! 5. SNS 게시
//!
//! 각 단계의 실패는 대체값으로 바뀌며 파이프라인은 끝까지 진행됩니다.

pub mod pipeline;
pub mod report;

pub use pipeline::{collect, run, run_with, MarketDigest, PipelineOptions};
pub use report::RunReport;
