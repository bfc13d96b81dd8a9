//! 최근 날짜 스캔.
//!
//! 거래소 아카이브는 영업일에만 파일을 올리므로, 오늘부터 하루씩
//! 거슬러 올라가며 처음 성공한 파일을 사용합니다.

use chrono::{Days, NaiveDate};
use std::fmt::Display;
use std::future::Future;
use tracing::debug;

use market_core::Outcome;

use crate::error::Result;

/// `anchor`부터 과거로 `window`일의 날짜 (최신 순).
///
/// `window`가 0이면 빈 목록.
pub fn trailing_dates(anchor: NaiveDate, window: u32) -> Vec<NaiveDate> {
    (0..window)
        .filter_map(|i| anchor.checked_sub_days(Days::new(u64::from(i))))
        .collect()
}

/// 후보를 순서대로 시도하여 처음 성공한 결과를 반환합니다.
///
/// 모든 후보가 실패하면 마지막 실패 사유를 포함한 `Degraded`.
pub async fn first_success<K, T, F, Fut>(candidates: Vec<K>, mut fetch: F) -> Outcome<(K, T)>
where
    K: Display + Clone,
    F: FnMut(K) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let total = candidates.len();
    let mut last_error = None;

    for candidate in candidates {
        match fetch(candidate.clone()).await {
            Ok(value) => return Outcome::fetched((candidate, value)),
            Err(e) => {
                debug!(candidate = %candidate, error = %e, "후보 실패, 다음 후보 시도");
                last_error = Some(e.to_string());
            }
        }
    }

    match last_error {
        Some(e) => Outcome::degraded(format!("{total}개 후보 모두 실패 (마지막: {e})")),
        None => Outcome::degraded("시도할 후보 없음"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_dates_cross_month() {
        let dates = trailing_dates(date(2025, 3, 2), 5);
        assert_eq!(
            dates,
            vec![
                date(2025, 3, 2),
                date(2025, 3, 1),
                date(2025, 2, 28),
                date(2025, 2, 27),
                date(2025, 2, 26),
            ]
        );
        assert!(trailing_dates(date(2025, 3, 2), 0).is_empty());
    }

    #[tokio::test]
    async fn test_first_success_stops_at_first_hit() {
        let mut attempts = Vec::new();
        let outcome = first_success(vec![1, 2, 3, 4], |n| {
            attempts.push(n);
            async move {
                if n >= 3 {
                    Ok(n * 10)
                } else {
                    Err(DataError::Status {
                        status: 404,
                        url: format!("/{n}"),
                    })
                }
            }
        })
        .await;

        assert_eq!(outcome, Outcome::fetched((3, 30)));
        assert_eq!(attempts, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_first_success_exhausted() {
        let outcome: Outcome<(u32, u32)> = first_success(vec![1, 2], |n| async move {
            Err(DataError::Parse(format!("bad {n}")))
        })
        .await;

        let reason = outcome.reason().expect("모두 실패");
        assert!(reason.contains("2개 후보"));
        assert!(reason.contains("bad 2"));

        let empty: Outcome<(u32, u32)> =
            first_success(Vec::new(), |_: u32| async { Ok(0) }).await;
        assert!(!empty.is_fetched());
    }
}
