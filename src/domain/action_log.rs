// ==========================================
// AgendaQX 排班日历 - 操作日志领域模型
// ==========================================
// 用途: 审计追踪（初始化排班、人工编辑）
// 对齐: action_log 表
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,        // 日志ID (UUID)
    pub action_type: String,      // 操作类型 (存储为字符串)
    pub action_ts: NaiveDateTime, // 操作时间戳
    pub actor: String,            // 操作人

    pub payload_json: Option<JsonValue>, // 操作参数 (JSON)

    pub shift_name: Option<String>,        // 涉及的班次
    pub date_range_start: Option<NaiveDate>, // 影响开始日期
    pub date_range_end: Option<NaiveDate>,   // 影响结束日期
    pub affected_rows: i64,                  // 影响行数
    pub detail: Option<String>,              // 详细描述
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    SeedAssignments, // 首次运行生成排班
    EditSingleDate,  // 单日编辑
    EditForward,     // 向后传播编辑
}

impl ActionType {
    /// 转换为字符串 (用于数据库存储)
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::SeedAssignments => "SeedAssignments",
            ActionType::EditSingleDate => "EditSingleDate",
            ActionType::EditForward => "EditForward",
        }
    }

}

impl ActionLog {
    /// 创建新的操作日志
    ///
    /// # 参数
    /// - `action_type`: 操作类型
    /// - `actor`: 操作人
    pub fn new(action_type: ActionType, actor: &str) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            action_type: action_type.as_str().to_string(),
            action_ts: chrono::Utc::now().naive_utc(),
            actor: actor.to_string(),
            payload_json: None,
            shift_name: None,
            date_range_start: None,
            date_range_end: None,
            affected_rows: 0,
            detail: None,
        }
    }

    /// 设置操作负载 (转换为JSON)
    pub fn with_payload<T: Serialize>(mut self, payload: &T) -> Self {
        self.payload_json = serde_json::to_value(payload).ok();
        self
    }

    /// 设置日期范围
    pub fn with_date_range(mut self, start: NaiveDate, end: Option<NaiveDate>) -> Self {
        self.date_range_start = Some(start);
        self.date_range_end = end;
        self
    }

    pub fn with_shift_name(mut self, shift_name: &str) -> Self {
        self.shift_name = Some(shift_name.to_string());
        self
    }

    pub fn with_affected_rows(mut self, rows: usize) -> Self {
        self.affected_rows = rows as i64;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_storage_names() {
        assert_eq!(ActionType::SeedAssignments.as_str(), "SeedAssignments");
        assert_eq!(ActionType::EditSingleDate.as_str(), "EditSingleDate");
        assert_eq!(ActionType::EditForward.as_str(), "EditForward");
    }

    #[test]
    fn test_builder_fills_fields() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        let log = ActionLog::new(ActionType::EditForward, "admin")
            .with_shift_name("Turno jueves")
            .with_date_range(start, None)
            .with_affected_rows(12)
            .with_payload(&serde_json::json!({ "surgeon1": "Dr. Soto" }));

        assert_eq!(log.action_type, "EditForward");
        assert_eq!(log.actor, "admin");
        assert_eq!(log.shift_name.as_deref(), Some("Turno jueves"));
        assert_eq!(log.date_range_start, Some(start));
        assert_eq!(log.date_range_end, None);
        assert_eq!(log.affected_rows, 12);
        assert_eq!(log.action_id.len(), 36);
        assert!(log.payload_json.is_some());
    }
}
