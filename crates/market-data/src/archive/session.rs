//! 거래소 아카이브 HTTP 세션.
//!
//! 아카이브 서버는 브라우저 User-Agent와 Referer, 홈페이지에서 발급한 쿠키가
//! 없는 요청을 거부하는 경우가 있으므로 쿠키 저장소가 있는 클라이언트를
//! 사용하고 스캔 전에 홈페이지를 한 번 요청합니다.

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use market_core::{ArchiveConfig, BanList, ExtremesRecord, Outcome};

use super::ban_list::parse_ban_list;
use super::extremes::parse_extremes;
use crate::error::{DataError, Result};
use crate::scan::{first_success, trailing_dates};

/// 거래소 아카이브 클라이언트.
pub struct ArchiveClient {
    client: Client,
    config: ArchiveConfig,
}

impl ArchiveClient {
    pub fn new(config: ArchiveConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            REFERER,
            HeaderValue::from_str(&config.referer)
                .map_err(|e| DataError::Parse(format!("잘못된 Referer 헤더: {}", e)))?,
        );

        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// 쿠키 발급을 위해 홈페이지를 요청합니다. 실패는 무시합니다.
    pub async fn warm_up(&self) {
        if self.config.warmup_url.is_empty() {
            return;
        }

        match self
            .client
            .get(&self.config.warmup_url)
            .timeout(self.config.warmup_timeout())
            .send()
            .await
        {
            Ok(response) => debug!(status = %response.status(), "아카이브 세션 준비"),
            Err(e) => warn!(error = %e, "아카이브 홈페이지 요청 실패, 쿠키 없이 진행"),
        }
    }

    /// 날짜 템플릿 경로를 전체 URL로 변환합니다.
    pub fn dated_url(&self, path_template: &str, date: NaiveDate) -> String {
        let stamp = date.format("%d%m%Y").to_string();
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            path_template.replace("{date}", &stamp)
        )
    }

    /// 해당 날짜의 파일 본문을 가져옵니다. 200 이외의 응답은 에러입니다.
    pub async fn fetch_dated(
        &self,
        path_template: &str,
        date: NaiveDate,
        timeout: Duration,
    ) -> Result<String> {
        let url = self.dated_url(path_template, date);
        debug!(%url, "아카이브 파일 요청");

        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DataError::Timeout(url.clone())
                } else {
                    DataError::Http(e)
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(DataError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }

    /// 최근 밴 리스트를 수집합니다.
    pub async fn fetch_ban_list(&self, today: NaiveDate) -> Outcome<BanList> {
        let candidates = trailing_dates(today, self.config.lookback_days);
        let path = self.config.ban_list_path.as_str();
        let timeout = self.config.ban_list_timeout();

        let outcome = first_success(candidates, |date| async move {
            let body = self.fetch_dated(path, date, timeout).await?;
            parse_ban_list(&body)
        })
        .await
        .map(|(as_of, symbols)| BanList { as_of, symbols });

        match &outcome {
            Outcome::Fetched(list) => {
                info!(as_of = %list.as_of, count = list.symbols.len(), "F&O 밴 리스트 수집 완료")
            }
            Outcome::Degraded { reason } => warn!(%reason, "F&O 밴 리스트 수집 실패"),
        }
        outcome
    }

    /// 최근 52주 신고가/신저가를 수집합니다.
    pub async fn fetch_extremes(&self, today: NaiveDate) -> Outcome<ExtremesRecord> {
        let candidates = trailing_dates(today, self.config.lookback_days);
        let path = self.config.extremes_path.as_str();
        let timeout = self.config.extremes_timeout();

        let outcome = first_success(candidates, |date| async move {
            let body = self.fetch_dated(path, date, timeout).await?;
            parse_extremes(&body)
        })
        .await
        .map(|(_, record)| record);

        match &outcome {
            Outcome::Fetched(record) => info!(
                date = %record.display_date(),
                highs = record.highs.len(),
                lows = record.lows.len(),
                "52주 고저 수집 완료"
            ),
            Outcome::Degraded { reason } => warn!(%reason, "52주 고저 수집 실패"),
        }
        outcome
    }
}
