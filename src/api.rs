//! Practicum API 客户端 - 每个周期发起一次作业状态请求
//!
//! 请求格式：`GET <endpoint>?from_date=<unix 时间戳>`，
//! 携带 `Authorization: OAuth <token>` 头。这里不做重试，
//! 失败由外层循环在下个周期自然重试。

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error};

use crate::error::{BotError, Result};

/// 作业状态数据源
pub trait HomeworkApi {
    /// 请求 `since` 之后的作业状态，返回解码后的原始 JSON
    ///
    /// `since` 为 `None` 时使用当前时间。
    fn get_api_answer(&self, since: Option<i64>) -> Result<Value>;
}

/// 解析请求时间戳，缺省为当前 unix 时间
pub fn resolve_since(since: Option<i64>) -> i64 {
    since.unwrap_or_else(|| chrono::Utc::now().timestamp())
}

/// Practicum API 客户端
pub struct PracticumClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// 创建新客户端
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(BotError::Transport)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }
}

impl HomeworkApi for PracticumClient {
    fn get_api_answer(&self, since: Option<i64>) -> Result<Value> {
        let from_date = resolve_since(since);
        debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .map_err(|e| {
                error!(endpoint = %self.endpoint, error = %e, "Homework API request failed");
                BotError::Transport(e)
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            error!(endpoint = %self.endpoint, status = status.as_u16(), "Homework API endpoint unavailable");
            return Err(BotError::EndpointUnavailable {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(BotError::Transport)?;
        serde_json::from_str(&body)
            .map_err(|e| BotError::malformed(format!("response body is not valid JSON: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_since_keeps_explicit_value() {
        assert_eq!(resolve_since(Some(1000)), 1000);
    }

    #[test]
    fn test_resolve_since_defaults_to_now() {
        let before = chrono::Utc::now().timestamp();
        let resolved = resolve_since(None);
        let after = chrono::Utc::now().timestamp();
        assert!(resolved >= before && resolved <= after);
    }
}
