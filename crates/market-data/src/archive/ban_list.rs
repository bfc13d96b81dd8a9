//! F&O 밴 리스트 CSV 파싱.
//!
//! ```text
//! Securities in Ban For Trade Date 15-JAN-2025:
//! 1,MANAPPURAM
//! 2,RBLBANK
//! ```

use crate::error::{DataError, Result};

/// 밴 리스트 CSV 본문에서 종목 심볼을 추출합니다.
///
/// 첫 번째 비어있지 않은 줄은 헤더로 건너뛰고, 이후 각 줄의 두 번째 열을
/// 심볼로 사용합니다. 헤더만 있는 파일은 밴 종목이 없는 날로 보고 빈 목록을
/// 반환합니다. 본문이 비어 있거나 HTML이면 에러입니다.
pub fn parse_ban_list(body: &str) -> Result<Vec<String>> {
    let mut lines = body
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let header = lines
        .next()
        .ok_or_else(|| DataError::Parse("빈 밴 리스트 응답".to_string()))?;

    if header.starts_with('<') {
        return Err(DataError::Parse("CSV 대신 HTML 응답".to_string()));
    }

    Ok(lines
        .filter_map(|line| line.split(',').nth(1))
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ban_list() {
        let body = "Securities in Ban For Trade Date 15-JAN-2025:\r\n1,MANAPPURAM\r\n\r\n2, RBLBANK \r\n";
        assert_eq!(parse_ban_list(body).unwrap(), vec!["MANAPPURAM", "RBLBANK"]);
    }

    #[test]
    fn test_header_only_is_empty_list() {
        let body = "Securities in Ban For Trade Date 15-JAN-2025: NIL\n";
        assert!(parse_ban_list(body).unwrap().is_empty());
    }

    #[test]
    fn test_rows_without_second_column_are_skipped() {
        let body = "header\n1,IDEA\nmalformed\n3,\n";
        assert_eq!(parse_ban_list(body).unwrap(), vec!["IDEA"]);
    }

    #[test]
    fn test_empty_or_html_body_is_error() {
        assert!(parse_ban_list("").is_err());
        assert!(parse_ban_list(" \n\n").is_err());
        assert!(parse_ban_list("<!DOCTYPE html><html>Access Denied</html>").is_err());
    }
}
