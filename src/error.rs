//! 错误类型 - 轮询周期内所有可能的失败
//!
//! 除 `MissingConfig` 外，所有错误都在循环边界被捕获并转换为一条失败通知，
//! 不会终止进程。`Display` 文本即通知中的错误描述，也是去重比较的依据。

/// 本 crate 的 `Result` 别名
pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// 请求 API 时网络/传输层失败
    #[error("failed to reach the homework API: {0}")]
    Transport(#[source] reqwest::Error),

    /// API 返回非 200 状态码
    #[error("homework API endpoint is unavailable: HTTP {status}")]
    EndpointUnavailable { status: u16 },

    /// 响应结构不符合预期
    #[error("malformed API response: {reason}")]
    MalformedResponse { reason: String },

    /// 作业记录缺少必需字段
    #[error("homework record is missing the '{field}' field")]
    MissingField { field: &'static str },

    /// 未文档化的作业状态
    #[error("unknown homework status: {status}")]
    UnknownStatus { status: String },

    /// 消息投递失败（仅记录日志，不上报）
    #[error("failed to deliver message: {reason}")]
    Delivery { reason: String },

    /// 启动时缺少必需的环境变量（致命）
    #[error("missing required environment variables: {}", names.join(", "))]
    MissingConfig { names: Vec<&'static str> },
}

impl BotError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub fn delivery(reason: impl Into<String>) -> Self {
        Self::Delivery {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            BotError::EndpointUnavailable { status: 503 }.to_string(),
            "homework API endpoint is unavailable: HTTP 503"
        );
        assert_eq!(
            BotError::malformed("homeworks is not a list").to_string(),
            "malformed API response: homeworks is not a list"
        );
        assert_eq!(
            BotError::MissingField { field: "homework_name" }.to_string(),
            "homework record is missing the 'homework_name' field"
        );
        assert_eq!(
            BotError::MissingConfig {
                names: vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]
            }
            .to_string(),
            "missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }
}
