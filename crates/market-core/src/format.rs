//! 카드/게시글에 표시되는 값 형식.
//!
//! - 값: 천 단위 구분자 + 소수점 2자리 (`20300` → `20,300.00`)
//! - 변동률: 부호 + 소수점 2자리 + `%` (`1.5` → `+1.50%`)

use rust_decimal::{Decimal, RoundingStrategy};

/// 가격/지수 값을 천 단위 구분자와 소수점 2자리로 포맷합니다.
pub fn format_value(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded);

    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.00 은 부호 없이 표시
    if sign == "-" && rounded.is_zero() {
        return format!("{grouped}.{frac_part}");
    }
    format!("{sign}{grouped}.{frac_part}")
}

/// 변동률(%)을 부호 포함 소수점 2자리 문자열로 포맷합니다.
///
/// 반올림 결과가 0이면 `+0.00%`를 반환합니다.
pub fn format_change(change_pct: f64) -> String {
    if !change_pct.is_finite() {
        return crate::domain::PLACEHOLDER_CHANGE.to_string();
    }

    let rounded = (change_pct * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "+0.00%".to_string();
    }
    format!("{:+.2}%", rounded)
}
