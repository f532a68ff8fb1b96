// ==========================================
// AgendaQX 排班日历 - 领域类型定义
// ==========================================
// 班次种类、编辑模式等枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 班次种类 (Shift Kind)
// ==========================================
// 序列化格式: snake_case (与配置文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    Cyclic,   // 按星期锚定，42 天周期
    Floating, // 机动班 (Volante)，每 6 天一次
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftKind::Cyclic => write!(f, "cyclic"),
            ShiftKind::Floating => write!(f, "floating"),
        }
    }
}

// ==========================================
// 编辑模式 (Edit Mode)
// ==========================================
// 由编辑请求中的 apply_forward 标志决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditMode {
    SingleDate, // 仅修改指定日期
    Forward,    // 指定日期及之后、同一班次的全部记录
}

impl EditMode {
    pub fn from_apply_forward(apply_forward: bool) -> Self {
        if apply_forward {
            EditMode::Forward
        } else {
            EditMode::SingleDate
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::SingleDate => write!(f, "SINGLE_DATE"),
            EditMode::Forward => write!(f, "FORWARD"),
        }
    }
}
