//! Homework Status Bot - 轮询作业审阅 API，把状态变化推送到 Telegram

pub mod api;
pub mod config;
pub mod error;
pub mod homework;
pub mod notification;
pub mod response;
pub mod tracker;

pub use api::{HomeworkApi, PracticumClient};
pub use config::{BotConfig, Credentials, ValidCredentials};
pub use error::{BotError, Result};
pub use homework::{HomeworkRecord, HomeworkStatus, VERDICTS};
pub use notification::{DryRunSender, MessageSender, Notifier, SendResult, TelegramConfig, TelegramSender};
pub use response::{check_response, parse_status};
pub use tracker::{CycleOutcome, StatusBot, TrackedState};
