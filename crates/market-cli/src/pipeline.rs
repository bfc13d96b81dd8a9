//! 파이프라인 실행.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};

use market_core::{
    BanList, DigestConfig, ExtremesRecord, InstrumentQuote, MarketBias, MarketSnapshot, Outcome,
};
use market_data::{ArchiveClient, MarketDataFetcher};
use market_notification::{
    compose_post, publish_update, CredentialSource, PostDraft, PublishOutcome, TwitterCredentials,
};
use market_render::{ImageRenderer, RenderInput};

use crate::report::RunReport;

/// 실행 옵션 (CLI 플래그).
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// 게시 단계 생략
    pub skip_publish: bool,
    /// 출력 경로 덮어쓰기
    pub output_override: Option<PathBuf>,
    /// 기준일 덮어쓰기 (없으면 설정 시간대의 오늘)
    pub date: Option<NaiveDate>,
}

/// 수집 단계 결과.
#[derive(Debug, Clone, Serialize)]
pub struct MarketDigest {
    pub date: NaiveDate,
    pub bias: MarketBias,
    pub snapshot: MarketSnapshot,
    pub ban_list: Outcome<BanList>,
    pub extremes: Outcome<ExtremesRecord>,
}

/// 전체 파이프라인을 실행합니다. 인증 정보는 환경 변수에서 읽습니다.
pub async fn run(config: &DigestConfig, options: &PipelineOptions) -> RunReport {
    run_with(config, options, TwitterCredentials::from_env).await
}

/// 인증 정보 조회 함수를 지정하여 파이프라인을 실행합니다.
pub async fn run_with<C>(config: &DigestConfig, options: &PipelineOptions, credentials: C) -> RunReport
where
    C: FnOnce() -> CredentialSource,
{
    let started = Instant::now();
    info!("=== 마켓 업데이트 시작 ===");

    // 1~3. 수집
    let date = options.date.unwrap_or_else(|| config.today());
    let digest = collect(config, date).await;

    // 4. 렌더링
    info!("Step 4/5: 이미지 렌더링");
    let mut render_config = config.render.clone();
    if let Some(output) = &options.output_override {
        render_config.output_path = output.clone();
    }
    let renderer = ImageRenderer::new(render_config);
    let image_path = match renderer.render(RenderInput {
        snapshot: &digest.snapshot,
        ban_list: &digest.ban_list,
        extremes: &digest.extremes,
        date: digest.date,
    }) {
        Ok(path) => Some(path),
        Err(e) => {
            error!(error = %e, "이미지 렌더링 실패");
            None
        }
    };

    // 5. 게시
    info!("Step 5/5: 게시");
    let publish = match (&image_path, options.skip_publish) {
        (_, true) => {
            info!("--skip-publish 지정, 게시 건너뜀");
            PublishOutcome::Disabled
        }
        (None, false) => {
            warn!("이미지가 없어 게시 건너뜀");
            PublishOutcome::Failed {
                reason: "렌더링된 이미지 없음".to_string(),
            }
        }
        (Some(path), false) => {
            let draft = PostDraft {
                text: compose_post(
                    &digest.snapshot,
                    digest.bias,
                    digest.date,
                    &config.publish.featured,
                    &config.publish.hashtags,
                ),
                image_path: path.clone(),
            };
            publish_update(&config.publish, &draft, credentials).await
        }
    };

    info!("=== 마켓 업데이트 종료 ===");

    RunReport {
        date: digest.date,
        instruments_fetched: digest.snapshot.fetched_count(),
        instruments_total: digest.snapshot.len(),
        bias: digest.bias,
        ban_list_status: digest.ban_list.status_label(),
        ban_count: digest.ban_list.as_fetched().map_or(0, |l| l.symbols.len()),
        extremes_status: digest.extremes.status_label(),
        image_path,
        publish,
        elapsed: started.elapsed(),
    }
}

/// 시세, 밴 리스트, 52주 고저를 순서대로 수집합니다.
///
/// `date`는 아카이브 파일 탐색의 시작일이자 이미지에 표시되는 기준일입니다.
pub async fn collect(config: &DigestConfig, date: NaiveDate) -> MarketDigest {
    info!(%date, timezone = %config.timezone, "기준일");

    info!("Step 1/5: 종목 시세 수집");
    let snapshot = match MarketDataFetcher::from_config(&config.market) {
        Ok(fetcher) => fetcher.fetch_all().await,
        Err(e) => {
            error!(error = %e, "시세 수집기 생성 실패, 전 종목 대체값 사용");
            let reason = e.to_string();
            MarketSnapshot::new(
                config
                    .market
                    .instruments
                    .iter()
                    .map(|i| InstrumentQuote::placeholder(i.name.clone(), reason.clone()))
                    .collect(),
            )
        }
    };

    let (ban_list, extremes) = match ArchiveClient::new(config.archive.clone()) {
        Ok(client) => {
            client.warm_up().await;

            info!("Step 2/5: F&O 밴 리스트 수집");
            let ban_list = client.fetch_ban_list(date).await;

            info!("Step 3/5: 52주 고저 수집");
            let extremes = client.fetch_extremes(date).await;

            (ban_list, extremes)
        }
        Err(e) => {
            error!(error = %e, "아카이브 클라이언트 생성 실패");
            (
                Outcome::degraded(e.to_string()),
                Outcome::degraded(e.to_string()),
            )
        }
    };

    let bias = MarketBias::from_snapshot(&snapshot);
    info!(%bias, "시장 분위기 판정");

    MarketDigest {
        date,
        bias,
        snapshot,
        ban_list,
        extremes,
    }
}
