//! 종목 시세.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::outcome::Outcome;
use crate::format::{format_change, format_value};

/// 수집 실패 시 표시되는 값
pub const PLACEHOLDER_VALUE: &str = "N/A";
/// 수집 실패 시 표시되는 변동률
pub const PLACEHOLDER_CHANGE: &str = "0.00%";

/// 현재가와 전일 대비 변동률.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    /// 현재 값 (최근 종가 또는 실시간 시세)
    pub value: Decimal,
    /// 전일 대비 변동률 (%)
    pub change_pct: f64,
}

impl Quote {
    pub fn new(value: Decimal, change_pct: f64) -> Self {
        Self { value, change_pct }
    }

    /// 전일 종가와 현재 종가로 시세를 계산합니다.
    ///
    /// 전일 종가가 0 이하이면 변동률을 정의할 수 없으므로 `None`.
    pub fn from_closes(previous: Decimal, current: Decimal) -> Option<Self> {
        if previous <= Decimal::ZERO {
            return None;
        }

        let pct = ((current - previous) / previous) * Decimal::ONE_HUNDRED;
        Some(Self {
            value: current,
            change_pct: pct.to_f64()?,
        })
    }

    /// 종가 시계열(오래된 순)의 마지막 두 값으로 시세를 계산합니다.
    ///
    /// 유효 종가가 2개 미만이면 `None`.
    pub fn from_close_series(closes: &[Decimal]) -> Option<Self> {
        match closes {
            [.., previous, current] => Self::from_closes(*previous, *current),
            _ => None,
        }
    }
}

/// 카드 색상/화살표를 결정하는 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    /// 변동률 표시 문자열의 부호로 방향을 판정합니다.
    ///
    /// `-`로 시작하면 하락, `+`로 시작하면 상승, 그 외는 보합.
    pub fn from_change_str(change: &str) -> Self {
        if change.starts_with('-') {
            Self::Down
        } else if change.starts_with('+') {
            Self::Up
        } else {
            Self::Flat
        }
    }
}

/// 이름이 붙은 종목 시세 수집 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentQuote {
    /// 종목 표시 이름 (예: "Nasdaq")
    pub name: String,
    /// 수집 결과
    pub outcome: Outcome<Quote>,
}

impl InstrumentQuote {
    pub fn new(name: impl Into<String>, outcome: Outcome<Quote>) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }

    /// 대체값 시세를 생성합니다.
    pub fn placeholder(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(name, Outcome::degraded(reason))
    }

    /// 표시용 값 (실패 시 "N/A").
    pub fn display_value(&self) -> String {
        match &self.outcome {
            Outcome::Fetched(quote) => format_value(quote.value),
            Outcome::Degraded { .. } => PLACEHOLDER_VALUE.to_string(),
        }
    }

    /// 표시용 변동률 (실패 시 "0.00%").
    pub fn display_change(&self) -> String {
        match &self.outcome {
            Outcome::Fetched(quote) => format_change(quote.change_pct),
            Outcome::Degraded { .. } => PLACEHOLDER_CHANGE.to_string(),
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::from_change_str(&self.display_change())
    }
}

/// 한 번의 실행에서 수집된 전체 종목 시세.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketSnapshot {
    /// 설정 순서대로 정렬된 종목 시세
    pub quotes: Vec<InstrumentQuote>,
}

impl MarketSnapshot {
    pub fn new(quotes: Vec<InstrumentQuote>) -> Self {
        Self { quotes }
    }

    /// 이름으로 종목 시세를 조회합니다.
    pub fn get(&self, name: &str) -> Option<&InstrumentQuote> {
        self.quotes.iter().find(|q| q.name == name)
    }

    /// 정상 수집된 종목 수.
    pub fn fetched_count(&self) -> usize {
        self.quotes.iter().filter(|q| q.outcome.is_fetched()).count()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_nasdaq_example() {
        let quote = Quote::from_close_series(&[dec!(19800), dec!(20000.00), dec!(20300.00)])
            .expect("종가 2개 이상");
        let nasdaq = InstrumentQuote::new("Nasdaq", Outcome::fetched(quote));

        assert_eq!(nasdaq.display_value(), "20,300.00");
        assert_eq!(nasdaq.display_change(), "+1.50%");
        assert_eq!(nasdaq.direction(), Direction::Up);
    }

    #[test]
    fn test_insufficient_history() {
        assert!(Quote::from_close_series(&[]).is_none());
        assert!(Quote::from_close_series(&[dec!(100)]).is_none());
        assert!(Quote::from_closes(Decimal::ZERO, dec!(100)).is_none());
    }

    #[test]
    fn test_placeholder_display() {
        let failed = InstrumentQuote::placeholder("Hang Seng", "timeout");
        assert_eq!(failed.display_value(), PLACEHOLDER_VALUE);
        assert_eq!(failed.display_change(), PLACEHOLDER_CHANGE);
        assert_eq!(failed.direction(), Direction::Flat);
    }

    #[test]
    fn test_direction_from_change_str() {
        assert_eq!(Direction::from_change_str("-0.35%"), Direction::Down);
        assert_eq!(Direction::from_change_str("+0.00%"), Direction::Up);
        assert_eq!(Direction::from_change_str("0.00%"), Direction::Flat);
    }

    #[test]
    fn test_snapshot_lookup() {
        let snapshot = MarketSnapshot::new(vec![
            InstrumentQuote::new("Bitcoin", Outcome::fetched(Quote::new(dec!(65000), -2.1))),
            InstrumentQuote::placeholder("Gold (Fut)", "404"),
        ]);

        assert_eq!(snapshot.fetched_count(), 1);
        assert_eq!(snapshot.get("Bitcoin").map(|q| q.direction()), Some(Direction::Down));
        assert!(snapshot.get("Nikkei 225").is_none());
    }
}
