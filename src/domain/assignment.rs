// ==========================================
// AgendaQX 排班日历 - 值班分配领域模型
// ==========================================
// 对齐: shift_assignment 表
// 红线: 每个日期至多一条记录；编辑只改医生姓名
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// shift_name 列最大长度（字符）
pub const MAX_SHIFT_NAME_LEN: usize = 50;

/// surgeon1 / surgeon2 列最大长度（字符）
pub const MAX_SURGEON_NAME_LEN: usize = 100;

// ==========================================
// ShiftAssignment - 已持久化的值班分配
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub id: i64,             // 代理主键
    pub date: NaiveDate,     // 日期 (唯一)
    pub shift_name: String,  // 班次名称
    pub surgeon1: String,    // 医生 1
    pub surgeon2: String,    // 医生 2
}

// ==========================================
// NewShiftAssignment - 待插入的值班分配
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShiftAssignment {
    pub date: NaiveDate,
    pub shift_name: String,
    pub surgeon1: String,
    pub surgeon2: String,
}

impl NewShiftAssignment {
    pub fn new(date: NaiveDate, shift_name: &str, surgeons: &SurgeonPair) -> Self {
        Self {
            date,
            shift_name: shift_name.to_string(),
            surgeon1: surgeons.surgeon1.clone(),
            surgeon2: surgeons.surgeon2.clone(),
        }
    }
}

// ==========================================
// SurgeonPair - 一个班次的两名医生
// ==========================================
// 用途: 默认排班名单、编辑请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurgeonPair {
    pub surgeon1: String,
    pub surgeon2: String,
}

impl SurgeonPair {
    pub fn new(surgeon1: impl Into<String>, surgeon2: impl Into<String>) -> Self {
        Self {
            surgeon1: surgeon1.into(),
            surgeon2: surgeon2.into(),
        }
    }
}

impl ShiftAssignment {
    pub fn surgeons(&self) -> SurgeonPair {
        SurgeonPair::new(self.surgeon1.clone(), self.surgeon2.clone())
    }
}
