//! 作业数据模型与审阅结论文本

/// 通知消息常量
pub mod msg {
    // 审阅结论
    pub const VERDICT_APPROVED: &str = "The work has been checked: the reviewer liked everything. Hooray!";
    pub const VERDICT_REVIEWING: &str = "Work has been taken up for review by the reviewer.";
    pub const VERDICT_REJECTED: &str = "The work has been checked: the reviewer has comments.";

    // 消息前缀
    pub const STATUS_CHANGED: &str = "Changed review status of";
    pub const PROGRAM_FAILURE: &str = "Program failure:";
}

/// API 返回的审阅状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

/// 状态 -> 结论文本，每个状态恰好一项
pub const VERDICTS: [(HomeworkStatus, &str); 3] = [
    (HomeworkStatus::Approved, msg::VERDICT_APPROVED),
    (HomeworkStatus::Reviewing, msg::VERDICT_REVIEWING),
    (HomeworkStatus::Rejected, msg::VERDICT_REJECTED),
];

impl HomeworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// 解析 API 状态码，未文档化的状态返回 `None`
    pub fn from_code(code: &str) -> Option<Self> {
        VERDICTS
            .iter()
            .map(|(status, _)| *status)
            .find(|status| status.as_str() == code)
    }

    pub fn verdict(&self) -> &'static str {
        VERDICTS
            .iter()
            .find(|(status, _)| status == self)
            .map(|(_, text)| *text)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 已校验的作业记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    /// API 字段 `homework_name`
    pub name: String,
    pub status: HomeworkStatus,
}

impl HomeworkRecord {
    /// 状态变更消息
    pub fn status_message(&self) -> String {
        format!(
            "{} \"{}\". {}",
            msg::STATUS_CHANGED,
            self.name,
            self.status.verdict()
        )
    }
}

/// 发送到聊天的失败通知
pub fn failure_message(error: &impl std::fmt::Display) -> String {
    format!("{} {}", msg::PROGRAM_FAILURE, error)
}
