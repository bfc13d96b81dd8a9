//! 게시글 본문 구성.

use chrono::NaiveDate;

use market_core::{MarketBias, MarketSnapshot};

/// 게시글 최대 글자 수 (가중치 기준)
pub const MAX_POST_CHARS: usize = 280;

/// 1글자로 세는 코드 포인트 범위. 나머지(이모지, CJK 등)는 2글자.
const SINGLE_WEIGHT_RANGES: [(u32, u32); 4] = [
    (0x0000, 0x10FF),
    (0x2000, 0x200D),
    (0x2010, 0x201F),
    (0x2032, 0x2037),
];

fn char_weight(ch: char) -> usize {
    let code = ch as u32;
    if SINGLE_WEIGHT_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code))
    {
        1
    } else {
        2
    }
}

/// X(Twitter)가 세는 방식의 글자 수.
///
/// 여러 코드 포인트로 된 이모지는 실제보다 크게 셉니다.
pub fn weighted_len(text: &str) -> usize {
    text.chars().map(char_weight).sum()
}

/// 가중치 합이 `limit` 이하가 되도록 앞에서부터 자릅니다.
fn truncate_weighted(text: &str, limit: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|&ch| {
            used += char_weight(ch);
            used <= limit
        })
        .collect()
}

/// 게시글 본문을 만듭니다.
///
/// ```text
/// Global Market Update – 15 Jan
///
/// 📊 Market Bias: BULLISH
/// GIFTNIFTY: 24,350.50 (+0.42%)
/// S&P 500: 5,950.25 (-0.12%)
///
/// #StockMarket #Nifty #Trading
/// ```
///
/// 가중치 기준 280자를 넘으면 뒤쪽 종목 줄부터 제외합니다.
pub fn compose_post(
    snapshot: &MarketSnapshot,
    bias: MarketBias,
    date: NaiveDate,
    featured: &[String],
    hashtags: &str,
) -> String {
    let heading = format!(
        "Global Market Update – {}\n\n📊 Market Bias: {}",
        date.format("%d %b"),
        bias
    );

    let mut lines: Vec<String> = featured
        .iter()
        .filter_map(|name| snapshot.get(name))
        .map(|q| format!("{}: {} ({})", q.name, q.display_value(), q.display_change()))
        .collect();

    loop {
        let text = assemble(&heading, &lines, hashtags);
        if weighted_len(&text) <= MAX_POST_CHARS {
            return text;
        }
        if lines.pop().is_none() {
            return truncate_weighted(&text, MAX_POST_CHARS);
        }
    }
}

fn assemble(heading: &str, lines: &[String], hashtags: &str) -> String {
    let mut text = heading.to_string();
    for line in lines {
        text.push('\n');
        text.push_str(line);
    }

    let hashtags = hashtags.trim();
    if !hashtags.is_empty() {
        text.push_str("\n\n");
        text.push_str(hashtags);
    }
    text
}
