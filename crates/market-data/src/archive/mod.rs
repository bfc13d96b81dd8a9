//! 거래소 아카이브 CSV 수집.
//!
//! - `fo_secban_{DDMMYYYY}.csv`: F&O 밴 리스트
//! - `CM_52_wk_High_low_{DDMMYYYY}.csv`: 52주 신고가/신저가
//!
//! 두 파일 모두 오늘부터 거슬러 올라가며 처음 받은 파일을 사용합니다.

pub mod ban_list;
pub mod extremes;
pub mod session;

pub use ban_list::parse_ban_list;
pub use extremes::parse_extremes;
pub use session::ArchiveClient;
