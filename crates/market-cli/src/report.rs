//! 실행 결과 리포트.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use market_core::MarketBias;
use market_notification::PublishOutcome;

/// 한 번의 파이프라인 실행 결과.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// 기준일 (거래소 시간대)
    pub date: NaiveDate,
    /// 정상 수집된 종목 수
    pub instruments_fetched: usize,
    /// 전체 종목 수
    pub instruments_total: usize,
    pub bias: MarketBias,
    /// 밴 리스트 상태 (fetched / degraded)
    pub ban_list_status: &'static str,
    /// 밴 종목 수
    pub ban_count: usize,
    /// 52주 고저 상태 (fetched / degraded)
    pub extremes_status: &'static str,
    /// 저장된 이미지 경로 (렌더링 실패 시 없음)
    pub image_path: Option<PathBuf>,
    /// 게시 결과
    pub publish: PublishOutcome,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunReport {
    /// 모든 단계가 대체값 없이 끝났는지.
    pub fn is_complete(&self) -> bool {
        self.instruments_fetched == self.instruments_total
            && self.ban_list_status == "fetched"
            && self.extremes_status == "fetched"
            && self.image_path.is_some()
    }

    /// 리포트 요약 로그 출력
    pub fn log_summary(&self) {
        tracing::info!(
            date = %self.date,
            instruments = format!("{}/{}", self.instruments_fetched, self.instruments_total),
            bias = %self.bias,
            ban_list = self.ban_list_status,
            ban_count = self.ban_count,
            extremes = self.extremes_status,
            image = self
                .image_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
            publish = self.publish.label(),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "마켓 업데이트 완료"
        );
    }
}
