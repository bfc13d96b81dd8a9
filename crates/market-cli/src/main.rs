//! 일일 마켓 업데이트 CLI.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use market_cli::{collect, run, PipelineOptions};
use market_core::{init_logging, DigestConfig, LogConfig};

#[derive(Parser)]
#[command(name = "market-update")]
#[command(about = "Daily global market update image generator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 전체 파이프라인 실행 (수집 → 렌더링 → 게시)
    Run {
        /// 게시 단계 생략
        #[arg(long)]
        skip_publish: bool,

        /// 이미지 출력 경로
        #[arg(long)]
        output: Option<PathBuf>,

        /// 기준일 (YYYY-MM-DD, 기본값: 오늘)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// 데이터만 수집하여 JSON으로 출력
    Fetch {
        /// 기준일 (YYYY-MM-DD, 기본값: 오늘)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = DigestConfig::load(cli.config.as_deref()).context("설정 로드 실패")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format.or_else(|| std::env::var("LOG_FORMAT").ok()) {
        config.logging.format = format;
    }

    init_logging(LogConfig::from_config(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    match cli.command {
        Commands::Run {
            skip_publish,
            output,
            date,
        } => {
            let options = PipelineOptions {
                skip_publish,
                output_override: output,
                date,
            };
            let report = run(&config, &options).await;
            report.log_summary();
        }
        Commands::Fetch { date } => {
            let date = date.unwrap_or_else(|| config.today());
            let digest = collect(&config, date).await;
            println!("{}", serde_json::to_string_pretty(&digest)?);
        }
    }

    Ok(())
}
