//! Telegram 渠道（Bot API `sendMessage`）

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BotError, Result};
use crate::notification::channel::{MessageSender, SendResult};

/// Telegram 渠道配置
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token
    pub token: String,
    /// Bot API 基础地址（测试时可指向本地 mock）
    pub api_url: String,
    /// 超时时间
    pub timeout: Duration,
}

/// sendMessage 请求体
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Bot API 响应
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram 渠道
pub struct TelegramSender {
    client: reqwest::blocking::Client,
    config: TelegramConfig,
}

impl TelegramSender {
    /// 创建新的 Telegram 渠道
    pub fn new(config: TelegramConfig) -> Result<Self> {
        if config.token.is_empty() {
            return Err(BotError::delivery("telegram token is required"));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BotError::delivery(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_url.trim_end_matches('/'),
            self.config.token
        )
    }
}

impl MessageSender for TelegramSender {
    fn name(&self) -> &str {
        "telegram"
    }

    fn send(&self, chat_id: &str, text: &str) -> Result<SendResult> {
        debug!(chat_id = %chat_id, len = text.len(), "Sending Telegram message");

        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest { chat_id, text })
            .send()
            // URL 中包含 bot token，不能进入错误文本
            .map_err(|e| BotError::delivery(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        let parsed = serde_json::from_str::<BotApiResponse>(&body).ok();

        match parsed {
            Some(BotApiResponse { ok: true, .. }) if status.is_success() => Ok(SendResult::Sent),
            Some(BotApiResponse {
                description: Some(description),
                ..
            }) => Err(BotError::delivery(format!("{} ({})", description, status.as_u16()))),
            _ => Err(BotError::delivery(format!("Bot API returned HTTP {}", status.as_u16()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: &str, api_url: &str) -> TelegramConfig {
        TelegramConfig {
            token: token.to_string(),
            api_url: api_url.to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_requires_token() {
        let result = TelegramSender::new(config("", "http://localhost:8081"));
        assert!(matches!(result, Err(BotError::Delivery { .. })));
    }

    #[test]
    fn test_send_message_url() {
        let sender = TelegramSender::new(config("123:abc", "http://localhost:8081/")).unwrap();
        assert_eq!(sender.send_message_url(), "http://localhost:8081/bot123:abc/sendMessage");
    }

    #[test]
    fn test_transport_error_does_not_leak_token() {
        let sender = TelegramSender::new(config("123:SECRET", "http://127.0.0.1:1")).unwrap();

        let err = sender.send("42", "hi").unwrap_err();

        let text = err.to_string();
        assert!(text.starts_with("failed to deliver message: HTTP request failed"));
        assert!(!text.contains("SECRET"), "token leaked: {text}");
    }
}
