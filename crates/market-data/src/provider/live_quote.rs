//! 실시간 시세 페이지 크롤러.
//!
//! Next.js 페이지에 포함된 `<script id="__NEXT_DATA__">` JSON에서
//! `props.pageProps.globalIndicesData.priceData`의 `value`, `dayChangePerc`를 읽습니다.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use market_core::Quote;

use crate::error::{DataError, Result};

/// 가격 데이터 JSON 경로
const PRICE_DATA_POINTER: &str = "/props/pageProps/globalIndicesData/priceData";

/// 실시간 시세 소스.
#[async_trait]
pub trait LiveQuoteSource: Send + Sync {
    async fn fetch_quote(&self) -> Result<Quote>;
}

/// 웹 페이지 기반 실시간 시세 수집기.
pub struct LivePageQuoteFetcher {
    client: Client,
    url: String,
}

impl LivePageQuoteFetcher {
    pub fn new(url: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl LiveQuoteSource for LivePageQuoteFetcher {
    async fn fetch_quote(&self) -> Result<Quote> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                DataError::Timeout(self.url.clone())
            } else {
                DataError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let html = response.text().await?;
        let quote = extract_quote(&html)?;
        debug!(value = %quote.value, change_pct = quote.change_pct, "실시간 시세 파싱 완료");

        Ok(quote)
    }
}

/// HTML에서 `__NEXT_DATA__` 스크립트의 JSON을 추출합니다.
fn extract_next_data(html: &str) -> Result<Value> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script#__NEXT_DATA__")
        .map_err(|e| DataError::Parse(format!("셀렉터 오류: {:?}", e)))?;

    let script = document
        .select(&selector)
        .next()
        .ok_or_else(|| DataError::Parse("__NEXT_DATA__ 스크립트 없음".to_string()))?;

    let text: String = script.text().collect();
    Ok(serde_json::from_str(&text)?)
}

/// HTML 페이지에서 현재 값과 일간 변동률을 추출합니다.
pub fn extract_quote(html: &str) -> Result<Quote> {
    let data = extract_next_data(html)?;
    let price = data
        .pointer(PRICE_DATA_POINTER)
        .ok_or_else(|| DataError::Parse("priceData 없음".to_string()))?;

    let value = price
        .get("value")
        .and_then(json_decimal)
        .ok_or_else(|| DataError::Parse("priceData.value 없음".to_string()))?;
    let change_pct = price
        .get("dayChangePerc")
        .and_then(json_decimal)
        .and_then(|d| rust_decimal::prelude::ToPrimitive::to_f64(&d))
        .ok_or_else(|| DataError::Parse("priceData.dayChangePerc 없음".to_string()))?;

    Ok(Quote::new(value, change_pct))
}

/// 숫자 또는 숫자 문자열을 Decimal로 변환합니다.
fn json_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.replace(',', ""),
        _ => return None,
    };
    let text = text.trim();

    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn page(price_data: &str) -> String {
        format!(
            r#"<html><head><title>GIFT Nifty</title></head><body>
<div id="__next">24,350.50</div>
<script id="__NEXT_DATA__" type="application/json">{{"props":{{"pageProps":{{"globalIndicesData":{{"priceData":{price_data}}}}}}}}}</script>
</body></html>"#
        )
    }

    #[test]
    fn test_extract_quote() {
        let quote = extract_quote(&page(r#"{"value":24350.5,"dayChangePerc":-0.42}"#)).unwrap();
        assert_eq!(quote.value, dec!(24350.5));
        assert!((quote.change_pct - (-0.42)).abs() < 1e-9);
    }

    #[test]
    fn test_extract_quote_from_strings() {
        let quote =
            extract_quote(&page(r#"{"value":"24,350.50","dayChangePerc":"0.31"}"#)).unwrap();
        assert_eq!(quote.value, dec!(24350.50));
        assert!((quote.change_pct - 0.31).abs() < 1e-9);
    }

    #[test]
    fn test_missing_script() {
        let err = extract_quote("<html><body>maintenance</body></html>").unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn test_missing_field() {
        assert!(extract_quote(&page(r#"{"value":24350.5}"#)).is_err());
    }

    #[tokio::test]
    async fn test_fetch_quote_from_page() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/indices/global-indices/sgx-nifty")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(page(r#"{"value":24100,"dayChangePerc":1.25}"#))
            .create_async()
            .await;

        let fetcher = LivePageQuoteFetcher::new(
            format!("{}/indices/global-indices/sgx-nifty", server.url()),
            "Mozilla/5.0",
            Duration::from_secs(5),
        )
        .unwrap();

        let quote = fetcher.fetch_quote().await.unwrap();
        assert_eq!(quote.value, dec!(24100));
        assert!((quote.change_pct - 1.25).abs() < 1e-9);
    }
}
