//! Homework Status Bot CLI
//!
//! 轮询 Practicum 作业状态接口，状态变化时发送 Telegram 消息

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{fmt, EnvFilter};

use homework_status_bot::config::{
    load_env_file, DEFAULT_ENDPOINT, DEFAULT_RETRY_SECS, DEFAULT_TELEGRAM_API, DEFAULT_TIMEOUT_SECS,
};
use homework_status_bot::{
    BotConfig, Credentials, DryRunSender, MessageSender, Notifier, PracticumClient, StatusBot,
    TelegramConfig, TelegramSender,
};

#[derive(Parser)]
#[command(name = "hwbot")]
#[command(about = "Homework Status Bot - 作业审阅状态变化推送到 Telegram")]
#[command(version)]
struct Cli {
    /// 作业状态接口 URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// 轮询间隔（秒）
    #[arg(long, short, default_value_t = DEFAULT_RETRY_SECS)]
    interval: u64,
    /// Telegram Bot API 地址
    #[arg(long, default_value = DEFAULT_TELEGRAM_API)]
    telegram_api: String,
    /// HTTP 请求超时（秒）
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
    /// 只执行一个周期后退出
    #[arg(long)]
    once: bool,
    /// Dry-run 模式（只打印不发送）
    #[arg(long)]
    dry_run: bool,
    /// 环境变量文件（默认查找 .env）
    #[arg(long)]
    env_file: Option<PathBuf>,
    /// 同时把日志追加写入该文件
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn bot_config(&self) -> BotConfig {
        BotConfig {
            endpoint: self.endpoint.clone(),
            telegram_api: self.telegram_api.clone(),
            retry_interval: Duration::from_secs(self.interval),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// 初始化 tracing 日志系统
///
/// 通过 RUST_LOG 环境变量控制日志级别，默认为 debug
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("homework_status_bot=debug,hwbot=debug"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            fmt()
                .with_writer(std::io::stderr.and(Mutex::new(file)))
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .init();
        }
        None => {
            fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .with_target(false)
                .init();
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // .env 可能包含 RUST_LOG，必须先于日志初始化加载
    let env_file = load_env_file(cli.env_file.as_deref()).context("Failed to load environment file")?;
    init_logging(cli.log_file.as_deref())?;
    if let Some(path) = env_file {
        info!(path = %path.display(), "Loaded environment file");
    }

    let credentials = match Credentials::from_env().validate() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(error = %e, "Required credentials are missing, exiting");
            std::process::exit(1);
        }
    };
    let config = cli.bot_config();

    info!(
        endpoint = %config.endpoint,
        interval_secs = config.retry_interval.as_secs(),
        dry_run = cli.dry_run,
        "Starting homework status bot"
    );

    let api = PracticumClient::new(&config.endpoint, &credentials.practicum_token, config.timeout)
        .context("Failed to create homework API client")?;

    let sender: Box<dyn MessageSender> = if cli.dry_run {
        Box::new(DryRunSender)
    } else {
        let telegram = TelegramSender::new(TelegramConfig {
            token: credentials.telegram_token.clone(),
            api_url: config.telegram_api.clone(),
            timeout: config.timeout,
        })
        .context("Failed to create Telegram client")?;
        Box::new(telegram)
    };
    let notifier = Notifier::new(sender, credentials.telegram_chat_id.clone());

    let mut bot = StatusBot::new(api, notifier);
    if cli.once {
        let outcome = bot.run_cycle();
        info!(?outcome, "Single cycle finished");
        return Ok(());
    }

    bot.run_forever(config.retry_interval)
}
