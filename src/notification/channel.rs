//! 消息渠道 trait 定义

use tracing::{error, info};

use crate::error::Result;

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 跳过（例如 dry-run）
    Skipped(String),
    /// 发送失败
    Failed(String),
}

impl SendResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendResult::Sent)
    }
}

/// 消息发送能力：`send(chat_id, text)`
pub trait MessageSender {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 发送消息，无法投递时返回 `BotError::Delivery`
    fn send(&self, chat_id: &str, text: &str) -> Result<SendResult>;
}

/// 绑定 chat id 的尽力而为通知器
pub struct Notifier {
    sender: Box<dyn MessageSender>,
    chat_id: String,
}

impl Notifier {
    pub fn new(sender: Box<dyn MessageSender>, chat_id: impl Into<String>) -> Self {
        Self {
            sender,
            chat_id: chat_id.into(),
        }
    }

    /// 发送消息；投递失败只记录日志，不会返回错误
    pub fn send_message(&self, text: &str) -> SendResult {
        match self.sender.send(&self.chat_id, text) {
            Ok(SendResult::Sent) => {
                info!(channel = self.sender.name(), message = %text, "Message sent to chat");
                SendResult::Sent
            }
            Ok(other) => other,
            Err(e) => {
                error!(
                    channel = self.sender.name(),
                    chat_id = %self.chat_id,
                    error = %e,
                    "Failed to send message"
                );
                SendResult::Failed(e.to_string())
            }
        }
    }
}
