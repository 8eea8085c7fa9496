//! 响应校验 - 检查 API 返回结构并解析作业记录
//!
//! 校验顺序（第一个不满足的条件决定错误）：
//! 1. 响应必须是 JSON object
//! 2. 必须包含 `homeworks` 键
//! 3. `homeworks` 必须是数组
//!
//! 数组元素在这里不做校验，由 [`parse_status`] 负责。

use serde_json::Value;

use crate::error::{BotError, Result};
use crate::homework::{HomeworkRecord, HomeworkStatus};

/// 校验 API 响应，原样返回 `homeworks` 列表（保持顺序）
pub fn check_response(payload: &Value) -> Result<&[Value]> {
    let object = payload
        .as_object()
        .ok_or_else(|| BotError::malformed("response is not an object"))?;

    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| BotError::malformed("missing homeworks list"))?;

    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| BotError::malformed("homeworks is not a list"))
}

/// 解析单条作业记录
pub fn parse_record(record: &Value) -> Result<HomeworkRecord> {
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(BotError::MissingField {
            field: "homework_name",
        })?;

    let raw_status = record
        .get("status")
        .ok_or(BotError::MissingField { field: "status" })?;

    let status = raw_status
        .as_str()
        .and_then(HomeworkStatus::from_code)
        .ok_or_else(|| BotError::UnknownStatus {
            status: match raw_status {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        })?;

    Ok(HomeworkRecord {
        name: name.to_string(),
        status,
    })
}

/// 解析作业记录并生成状态变更消息
pub fn parse_status(record: &Value) -> Result<String> {
    parse_record(record).map(|record| record.status_message())
}

/// 读取响应中的 `current_date`；缺失或不是整数时返回 `None`
pub fn current_date(payload: &Value) -> Option<i64> {
    payload.get("current_date").and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_malformed(result: Result<&[Value]>, expected: &str) {
        match result {
            Err(BotError::MalformedResponse { reason }) => assert_eq!(reason, expected),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(list) => panic!("expected failure, got {list:?}"),
        }
    }

    #[test]
    fn test_check_response_returns_list_unchanged() {
        let payload = json!({
            "homeworks": [
                {"homework_name": "b", "status": "approved"},
                {"homework_name": "a", "status": "reviewing"},
                {"unexpected": true}
            ],
            "current_date": 1000
        });
        let list = check_response(&payload).unwrap();
        assert_eq!(list, payload["homeworks"].as_array().unwrap().as_slice());
        assert_eq!(list[0]["homework_name"], "b");
        assert_eq!(list[2], json!({"unexpected": true}));
    }

    #[test]
    fn test_check_response_empty_list() {
        let payload = json!({"homeworks": []});
        assert!(check_response(&payload).unwrap().is_empty());
    }

    #[test]
    fn test_check_response_not_an_object() {
        assert_malformed(check_response(&json!([1, 2])), "response is not an object");
        assert_malformed(check_response(&json!("homeworks")), "response is not an object");
        assert_malformed(check_response(&Value::Null), "response is not an object");
    }

    #[test]
    fn test_check_response_missing_homeworks() {
        assert_malformed(
            check_response(&json!({"current_date": 1000})),
            "missing homeworks list",
        );
    }

    #[test]
    fn test_check_response_homeworks_not_a_list() {
        assert_malformed(
            check_response(&json!({"homeworks": {"homework_name": "hw"}})),
            "homeworks is not a list",
        );
        assert_malformed(
            check_response(&json!({"homeworks": null})),
            "homeworks is not a list",
        );
    }

    #[test]
    fn test_parse_status_each_verdict() {
        for (code, verdict) in [
            ("approved", crate::homework::msg::VERDICT_APPROVED),
            ("reviewing", crate::homework::msg::VERDICT_REVIEWING),
            ("rejected", crate::homework::msg::VERDICT_REJECTED),
        ] {
            let message = parse_status(&json!({"homework_name": "hw_api", "status": code})).unwrap();
            assert_eq!(message, format!("Changed review status of \"hw_api\". {verdict}"));
            assert_eq!(message.matches(verdict).count(), 1);
        }
    }

    #[test]
    fn test_parse_status_unknown_status() {
        let err = parse_status(&json!({"homework_name": "hw", "status": "lost"})).unwrap_err();
        assert!(matches!(err, BotError::UnknownStatus { ref status } if status == "lost"));

        let err = parse_status(&json!({"homework_name": "hw", "status": 3})).unwrap_err();
        assert!(matches!(err, BotError::UnknownStatus { ref status } if status == "3"));
    }

    #[test]
    fn test_parse_status_missing_fields() {
        let err = parse_status(&json!({"status": "approved"})).unwrap_err();
        assert!(matches!(err, BotError::MissingField { field: "homework_name" }));

        let err = parse_status(&json!({"homework_name": "hw"})).unwrap_err();
        assert!(matches!(err, BotError::MissingField { field: "status" }));

        let err = parse_status(&json!("hw")).unwrap_err();
        assert!(matches!(err, BotError::MissingField { field: "homework_name" }));
    }

    #[test]
    fn test_current_date() {
        assert_eq!(current_date(&json!({"current_date": 1000})), Some(1000));
        assert_eq!(current_date(&json!({"current_date": "1000"})), None);
        assert_eq!(current_date(&json!({"homeworks": []})), None);
    }
}
