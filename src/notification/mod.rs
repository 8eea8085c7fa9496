//! 通知层 - 把文本消息投递到聊天
//!
//! 所有渠道实现 `MessageSender` trait；`Notifier` 绑定 chat id 并保证
//! 投递是尽力而为的：失败只记录日志，不会向调用方传播。

pub mod channel;
pub mod channels;

pub use channel::{MessageSender, Notifier, SendResult};
pub use channels::{DryRunSender, TelegramConfig, TelegramSender};
