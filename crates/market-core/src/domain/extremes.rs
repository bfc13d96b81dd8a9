//! F&O 밴 리스트와 52주 신고가/신저가 레코드.

use chrono::NaiveDate;
use serde::Serialize;

/// 거래소가 공시한 F&O 거래 제한 종목 목록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BanList {
    /// 공시 파일의 기준일
    pub as_of: NaiveDate,
    /// 파일에 기재된 순서의 종목 심볼
    pub symbols: Vec<String>,
}

/// 52주 고저 CSV의 한 행.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtremeRow {
    pub symbol: String,
    /// 52주 최고가 기록일
    pub high_date: NaiveDate,
    /// 52주 최저가 기록일
    pub low_date: NaiveDate,
}

/// 가장 최근 날짜에 52주 신고가/신저가를 기록한 종목들.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtremesRecord {
    /// 최신 최고가 기록일의 종목 (동률 모두 포함)
    pub highs: Vec<String>,
    /// 최신 최저가 기록일의 종목 (동률 모두 포함)
    pub lows: Vec<String>,
    /// 가장 최근 최고가 기록일
    pub high_date: NaiveDate,
    /// 가장 최근 최저가 기록일
    pub low_date: NaiveDate,
}

impl ExtremesRecord {
    /// 파싱된 행들에서 최신 날짜에 해당하는 종목을 추립니다.
    ///
    /// 행이 없으면 `None`.
    pub fn from_rows(rows: &[ExtremeRow]) -> Option<Self> {
        let high_date = rows.iter().map(|r| r.high_date).max()?;
        let low_date = rows.iter().map(|r| r.low_date).max()?;

        let highs = rows
            .iter()
            .filter(|r| r.high_date == high_date)
            .map(|r| r.symbol.clone())
            .collect();
        let lows = rows
            .iter()
            .filter(|r| r.low_date == low_date)
            .map(|r| r.symbol.clone())
            .collect();

        Some(Self {
            highs,
            lows,
            high_date,
            low_date,
        })
    }

    /// 표시용 기준일 (`15-Jan`).
    pub fn display_date(&self) -> String {
        self.high_date.format("%d-%b").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(symbol: &str, high: (i32, u32, u32), low: (i32, u32, u32)) -> ExtremeRow {
        ExtremeRow {
            symbol: symbol.to_string(),
            high_date: NaiveDate::from_ymd_opt(high.0, high.1, high.2).unwrap(),
            low_date: NaiveDate::from_ymd_opt(low.0, low.1, low.2).unwrap(),
        }
    }

    #[test]
    fn test_ties_are_all_retained() {
        let rows = vec![
            row("INFY", (2025, 1, 15), (2024, 6, 4)),
            row("TCS", (2025, 1, 14), (2024, 6, 4)),
            row("HDFCBANK", (2025, 1, 15), (2024, 3, 1)),
            row("WIPRO", (2024, 12, 2), (2025, 1, 10)),
        ];

        let record = ExtremesRecord::from_rows(&rows).expect("행 존재");
        assert_eq!(record.highs, vec!["INFY", "HDFCBANK"]);
        assert_eq!(record.lows, vec!["WIPRO"]);
        assert_eq!(record.display_date(), "15-Jan");
    }

    #[test]
    fn test_empty_rows() {
        assert!(ExtremesRecord::from_rows(&[]).is_none());
    }
}
