//! 状态跟踪与轮询循环
//!
//! 每个周期严格按顺序执行：拉取 -> 校验 -> 比较 -> 通知，然后固定休眠。
//! 只比较响应中的第一条作业记录。
//!
//! ## 通知规则
//! - 状态与上次不同（含首次观察到）时发送一条状态变更消息
//! - 状态相同时不发送
//! - 周期内任何错误转换为 `Program failure: ...`，与上一次发送的失败消息相同则不再发送

use std::thread;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::api::{resolve_since, HomeworkApi};
use crate::error::{BotError, Result};
use crate::homework::{failure_message, HomeworkStatus};
use crate::notification::Notifier;
use crate::response::{check_response, current_date, parse_record};

/// 进程内跟踪状态，重启即丢失
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedState {
    /// 最近一次通知过的作业状态（`None` 表示 Unknown）
    pub last_status: Option<HomeworkStatus>,
    /// 最近一次通知过的失败消息
    pub last_error_message: Option<String>,
}

impl TrackedState {
    /// 记录观察到的状态，状态发生变化时返回 `true`
    pub fn observe_status(&mut self, status: HomeworkStatus) -> bool {
        if self.last_status == Some(status) {
            return false;
        }
        self.last_status = Some(status);
        true
    }

    /// 记录失败消息，与上一次不同时返回 `true`
    pub fn observe_failure(&mut self, message: &str) -> bool {
        if self.last_error_message.as_deref() == Some(message) {
            return false;
        }
        self.last_error_message = Some(message.to_string());
        true
    }
}

/// 单个周期的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// 状态变化，已发送（或尝试发送）通知
    Notified { message: String, delivered: bool },
    /// 状态未变化
    Unchanged,
    /// 响应中没有作业记录
    NoHomeworks,
    /// 周期失败；`reported` 表示是否发送了失败通知
    Failed { message: String, reported: bool },
}

/// 轮询机器人：持有数据源、通知器、跟踪状态和时间游标
pub struct StatusBot<A: HomeworkApi> {
    api: A,
    notifier: Notifier,
    state: TrackedState,
    cursor: i64,
}

impl<A: HomeworkApi> StatusBot<A> {
    /// 创建新的机器人，时间游标从当前时间开始
    pub fn new(api: A, notifier: Notifier) -> Self {
        Self::with_cursor(api, notifier, resolve_since(None))
    }

    pub fn with_cursor(api: A, notifier: Notifier, cursor: i64) -> Self {
        Self {
            api,
            notifier,
            state: TrackedState::default(),
            cursor,
        }
    }

    pub fn state(&self) -> &TrackedState {
        &self.state
    }

    /// 下一次请求使用的 `from_date`
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// 执行一个完整周期，所有错误在这里被吸收
    pub fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll() {
            Ok(outcome) => outcome,
            Err(e) => self.report_failure(&e),
        }
    }

    /// 无限循环；每个周期后固定休眠 `interval`，无论成功与否
    pub fn run_forever(&mut self, interval: Duration) -> ! {
        info!(interval_secs = interval.as_secs(), "Starting polling loop");
        loop {
            let outcome = self.run_cycle();
            debug!(?outcome, cursor = self.cursor, "Cycle finished");
            thread::sleep(interval);
        }
    }

    fn poll(&mut self) -> Result<CycleOutcome> {
        let payload = self.api.get_api_answer(Some(self.cursor))?;
        let homeworks = check_response(&payload)?;

        let Some(first) = homeworks.first() else {
            debug!("No new homework records in the response");
            self.advance_cursor(&payload);
            return Ok(CycleOutcome::NoHomeworks);
        };

        if self.status_unchanged(first) {
            debug!(status = ?self.state.last_status, "Homework status has not changed");
            return Ok(CycleOutcome::Unchanged);
        }

        let record = parse_record(first)?;
        let message = record.status_message();
        let delivered = self.notifier.send_message(&message).is_sent();
        self.state.observe_status(record.status);
        self.advance_cursor(&payload);

        Ok(CycleOutcome::Notified { message, delivered })
    }

    fn status_unchanged(&self, record: &Value) -> bool {
        let observed = record
            .get("status")
            .and_then(Value::as_str)
            .and_then(HomeworkStatus::from_code);
        observed.is_some() && observed == self.state.last_status
    }

    fn advance_cursor(&mut self, payload: &Value) {
        match current_date(payload) {
            Some(date) => self.cursor = date,
            None => debug!(cursor = self.cursor, "Response has no current_date, cursor kept"),
        }
    }

    fn report_failure(&mut self, e: &BotError) -> CycleOutcome {
        let message = failure_message(e);
        error!(error = %e, "Program failure");

        let reported = self.state.observe_failure(&message);
        if reported {
            self.notifier.send_message(&message);
        } else {
            debug!("Same failure was already reported, skipping notification");
        }

        CycleOutcome::Failed { message, reported }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_status_transitions() {
        let mut state = TrackedState::default();
        assert!(state.observe_status(HomeworkStatus::Reviewing));
        assert!(!state.observe_status(HomeworkStatus::Reviewing));
        assert!(state.observe_status(HomeworkStatus::Approved));
        assert_eq!(state.last_status, Some(HomeworkStatus::Approved));
    }

    #[test]
    fn test_observe_failure_dedup() {
        let mut state = TrackedState::default();
        assert!(state.observe_failure("Program failure: a"));
        assert!(!state.observe_failure("Program failure: a"));
        assert!(state.observe_failure("Program failure: b"));
        assert!(state.observe_failure("Program failure: a"));
        assert_eq!(state.last_error_message.as_deref(), Some("Program failure: a"));
    }
}
