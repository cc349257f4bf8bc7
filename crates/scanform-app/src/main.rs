//! # scanform
//!
//! 키보드 에뮬레이션 스캐너 입력(stdin 한 줄 = 스캔 1회)을 디코드 서버로 보내고
//! 결과 폼을 출력하는 CLI.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use directories::ProjectDirs;
use scanform_app::binder::ScanFormBinder;
use scanform_app::form::InMemoryForm;
use scanform_app::notifier::ConsoleNotifier;
use scanform_core::config::{AppConfig, SubmissionPolicy};
use scanform_core::config_manager::{ConfigManager, CONFIG_FILE_NAME};
use scanform_core::models::scan::ScanOutcome;
use scanform_network::http_decoder::HttpScanDecoder;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 스캔 → 폼 바인딩 클라이언트
#[derive(Parser, Debug)]
#[command(name = "scanform")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 디코드 서버 URL (기본: 설정 파일 값)
    #[arg(long, short = 's')]
    server: Option<String>,

    /// 설정 파일 경로 (기본: 플랫폼별 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 겹치는 스캔 처리 정책
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// 요청 타임아웃 (밀리초)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// CLI로 지정한 서버/타임아웃/정책을 설정 파일에 저장
    #[arg(long)]
    save: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Serial,
    LatestWins,
}

impl From<PolicyArg> for SubmissionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Serial => SubmissionPolicy::Serial,
            PolicyArg::LatestWins => SubmissionPolicy::LatestWins,
        }
    }
}

/// 설정 파일 경로 결정 (CLI 인자 또는 플랫폼별 기본 경로)
///
/// - macOS: `~/Library/Application Support/com.scanform.scanform/config.json`
/// - Windows: `%APPDATA%\scanform\scanform\config\config.json`
/// - Linux: `~/.config/scanform/config.json`
fn resolve_config_path(config: Option<PathBuf>) -> PathBuf {
    config
        .or_else(|| {
            ProjectDirs::from("com", "scanform", "scanform")
                .map(|p| p.config_dir().join(CONFIG_FILE_NAME))
        })
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// 처리 결과 출력 (스캔 필드가 정리된 사이클만)
fn report(outcome: &ScanOutcome, form: &InMemoryForm) {
    if !outcome.clears_input() {
        return;
    }
    if let ScanOutcome::Applied(_) = outcome {
        println!("✅ 디코드 완료");
    }
    println!("{}", form.render());
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "scanform={},scanform_app={},scanform_core={},scanform_network={}",
        args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    // 설정 로드
    let config_path = resolve_config_path(args.config.clone());
    let manager = ConfigManager::with_path(config_path.clone())
        .with_context(|| format!("설정 로드 실패: {}", config_path.display()))?;

    // CLI 인자로 설정 오버라이드 (--save 시에만 파일에 저장)
    let apply_overrides = |config: &mut AppConfig| {
        if let Some(server_url) = &args.server {
            config.server.base_url = server_url.clone();
        }
        if let Some(timeout_ms) = args.timeout_ms {
            config.server.request_timeout_ms = Some(timeout_ms);
        }
        if let Some(policy) = args.policy {
            config.scan.submission_policy = policy.into();
        }
    };

    let config = if args.save {
        let saved = manager
            .update_with(apply_overrides)
            .context("설정 저장 실패")?;
        info!("설정 저장 완료: {}", config_path.display());
        saved
    } else {
        let mut config = manager.get();
        apply_overrides(&mut config);
        config
    };

    let decoder = HttpScanDecoder::from_config(&config.server).context("디코드 클라이언트 생성 실패")?;
    info!("디코드 서버: {}", decoder.endpoint());

    // ── 어댑터 생성 (DI 와이어링) ──
    let form = Arc::new(InMemoryForm::new());
    let binder = Arc::new(
        ScanFormBinder::new(form.clone(), Arc::new(decoder), Arc::new(ConsoleNotifier))
            .with_policy(config.scan.submission_policy),
    );
    binder.on_ready();

    println!("📷 스캔 대기 중... (종료: Ctrl+D)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();

    while let Some(line) = lines.next_line().await.context("stdin 읽기 실패")? {
        match binder.policy() {
            SubmissionPolicy::Serial => {
                let outcome = binder.on_scan_submitted(&line).await;
                report(&outcome, &form);
            }
            SubmissionPolicy::LatestWins => {
                let binder = binder.clone();
                let form = form.clone();
                in_flight.spawn(async move {
                    let outcome = binder.on_scan_submitted(&line).await;
                    report(&outcome, &form);
                });
                // 완료된 작업 정리
                while let Some(joined) = in_flight.try_join_next() {
                    if let Err(e) = joined {
                        warn!("스캔 작업 비정상 종료: {e}");
                    }
                }
            }
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            warn!("스캔 작업 비정상 종료: {e}");
        }
    }

    info!("입력 종료");
    Ok(())
}
