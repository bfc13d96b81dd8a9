//! Yahoo v8 chart JSON 엔드포인트 Provider.
//!
//! `yahoo_finance_api` 커넥터가 실패할 때 사용하는 보조 경로입니다.
//! 기본 URL을 설정할 수 있어 테스트에서는 로컬 mock 서버를 사용합니다.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::history::HistoryProvider;
use crate::error::{DataError, Result};

/// Yahoo chart API 응답.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Yahoo chart API 종가 Provider.
pub struct ChartApiProvider {
    client: Client,
    base_url: String,
}

impl ChartApiProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; market-update/0.1)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, symbol)
    }
}

/// chart 응답에서 유효 종가만 추립니다 (null, 0 이하 제외).
fn closes_from_response(symbol: &str, response: ChartResponse) -> Result<Vec<Decimal>> {
    if let Some(error) = response.chart.error {
        return Err(DataError::Yahoo {
            symbol: symbol.to_string(),
            message: error.description.unwrap_or_else(|| "unknown".to_string()),
        });
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DataError::Insufficient(format!("{symbol}: chart result 없음")))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DataError::Insufficient(format!("{symbol}: quote 없음")))?;

    Ok(quote
        .close
        .into_iter()
        .flatten()
        .filter(|c| c.is_finite() && *c > 0.0)
        .filter_map(Decimal::from_f64_retain)
        .collect())
}

#[async_trait]
impl HistoryProvider for ChartApiProvider {
    async fn daily_closes(&self, symbol: &str, bars: usize) -> Result<Vec<Decimal>> {
        let url = self.chart_url(symbol);
        let range = format!("{}d", bars.max(2));

        let response = self
            .client
            .get(&url)
            .query(&[("interval", "1d"), ("range", range.as_str())])
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
        if !status.is_success() {
            return Err(DataError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body: ChartResponse = response.json().await?;
        let closes = closes_from_response(symbol, body)?;
        debug!(symbol, count = closes.len(), "chart API 종가 수신");

        Ok(closes)
    }

    fn name(&self) -> &str {
        "chart_api"
    }
}
