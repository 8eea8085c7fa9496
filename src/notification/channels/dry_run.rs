//! Dry-run 渠道：只写日志，不实际发送

use tracing::info;

use crate::error::Result;
use crate::notification::channel::{MessageSender, SendResult};

#[derive(Debug, Default)]
pub struct DryRunSender;

impl MessageSender for DryRunSender {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn send(&self, chat_id: &str, text: &str) -> Result<SendResult> {
        info!(chat_id = %chat_id, message = %text, "[DRY-RUN] Would send message");
        Ok(SendResult::Skipped("dry-run".to_string()))
    }
}
