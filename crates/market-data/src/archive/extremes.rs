//! 52주 신고가/신저가 CSV 파싱.
//!
//! 파일 앞부분에 안내 문구 행이 있을 수 있으므로 첫 열에 `SYMBOL`이 포함된
//! 행을 헤더로 찾습니다. 데이터 행의 열 배치:
//!
//! | 0 | 1 | 2 | 3 | 4 | 5 |
//! |---|---|---|---|---|---|
//! | SYMBOL | SERIES | 52W H | 52W H DT | 52W L | 52W L DT |

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use market_core::{ExtremeRow, ExtremesRecord};

use crate::error::{DataError, Result};

/// 헤더 행 식별 문자열
const HEADER_MARKER: &str = "SYMBOL";
/// 기록일 형식 (예: `15-JAN-2025`)
const DATE_FORMAT: &str = "%d-%b-%Y";
const MIN_COLUMNS: usize = 6;

/// 52주 고저 CSV 본문을 파싱합니다.
///
/// 행이 2개 이하이거나 유효한 데이터 행이 없으면 에러입니다.
/// 날짜를 읽을 수 없는 행은 개별적으로 건너뜁니다.
pub fn parse_extremes(body: &str) -> Result<ExtremesRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let records: Vec<csv::StringRecord> = reader.records().filter_map(|r| r.ok()).collect();
    if records.len() <= 2 {
        return Err(DataError::Insufficient(format!("CSV 행 {}개", records.len())));
    }

    // 헤더를 찾지 못하면 첫 행을 헤더로 간주
    let header_idx = records
        .iter()
        .position(|r| r.get(0).is_some_and(|c| c.contains(HEADER_MARKER)))
        .unwrap_or(0);

    let rows: Vec<ExtremeRow> = records[header_idx + 1..]
        .iter()
        .filter_map(parse_row)
        .collect();

    debug!(total = records.len(), parsed = rows.len(), "52주 고저 행 파싱");

    ExtremesRecord::from_rows(&rows)
        .ok_or_else(|| DataError::Parse("유효한 52주 고저 행 없음".to_string()))
}

fn parse_row(record: &csv::StringRecord) -> Option<ExtremeRow> {
    if record.len() < MIN_COLUMNS {
        return None;
    }

    Some(ExtremeRow {
        symbol: record.get(0)?.trim().to_string(),
        high_date: parse_date(record.get(3)?)?,
        low_date: parse_date(record.get(5)?)?,
    })
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), DATE_FORMAT).ok()
}
