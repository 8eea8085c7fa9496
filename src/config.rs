//! 配置 - 凭据校验与运行参数
//!
//! 凭据只从环境变量读取一次（启动前会先加载工作目录下的 `.env`）。
//! 任何一个凭据缺失或为空都是致命错误，进程在进入轮询循环前退出。

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::{BotError, Result};

/// Practicum API token 环境变量
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
/// Telegram bot token 环境变量
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
/// Telegram chat id 环境变量
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// 默认作业状态接口
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
/// 默认 Telegram Bot API 地址
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";
/// 默认轮询间隔（秒）
pub const DEFAULT_RETRY_SECS: u64 = 600;
/// 默认 HTTP 超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 加载 `.env` 文件到进程环境，已存在的环境变量不会被覆盖
///
/// 未指定路径时从工作目录向上查找 `.env`，找不到不算错误；
/// 显式指定的文件不存在则返回错误。
pub fn load_env_file(path: Option<&Path>) -> std::result::Result<Option<PathBuf>, dotenvy::Error> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => match dotenvy::dotenv() {
            Err(e) if e.not_found() => return Ok(None),
            other => other,
        },
    }?;
    debug!(path = %loaded.display(), "Loaded environment file");
    Ok(Some(loaded))
}

/// 从环境读取的三项凭据
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl Credentials {
    /// 从进程环境读取凭据
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 通过任意查找函数读取凭据，空字符串视为缺失
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            practicum_token: read(PRACTICUM_TOKEN_VAR),
            telegram_token: read(TELEGRAM_TOKEN_VAR),
            telegram_chat_id: read(TELEGRAM_CHAT_ID_VAR),
        }
    }

    /// 三项凭据是否全部存在
    pub fn check_tokens(&self) -> bool {
        self.missing().is_empty()
    }

    /// 缺失的环境变量名
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// 校验并转换为完整的凭据，缺失时返回 `MissingConfig`
    pub fn validate(self) -> Result<ValidCredentials> {
        if !self.check_tokens() {
            return Err(BotError::MissingConfig {
                names: self.missing(),
            });
        }

        debug!("All required credentials are present");
        Ok(ValidCredentials {
            practicum_token: self.practicum_token.unwrap_or_default(),
            telegram_token: self.telegram_token.unwrap_or_default(),
            telegram_chat_id: self.telegram_chat_id.unwrap_or_default(),
        })
    }
}

/// 已校验的凭据
#[derive(Debug, Clone)]
pub struct ValidCredentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

/// 运行参数
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// 作业状态接口 URL
    pub endpoint: String,
    /// Telegram Bot API 基础地址
    pub telegram_api: String,
    /// 两次轮询之间的固定间隔
    pub retry_interval: Duration,
    /// 单次 HTTP 请求超时
    pub timeout: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            telegram_api: DEFAULT_TELEGRAM_API.to_string(),
            retry_interval: Duration::from_secs(DEFAULT_RETRY_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
