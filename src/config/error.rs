// ==========================================
// AgendaQX 排班日历 - 配置层错误类型
// ==========================================
// 配置错误在启动期即为致命错误
// ==========================================

use thiserror::Error;

use crate::domain::shift::DefinitionError;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 班次定义 =====
    #[error("班次定义无效: {0}")]
    Definition(#[from] DefinitionError),

    #[error("班次定义表为空")]
    EmptyDefinitions,

    #[error("班次名称重复: {0}")]
    DuplicateShiftName(String),

    #[error("班次名称过长 (shift={name}): 最多{max}个字符")]
    ShiftNameTooLong { name: String, max: usize },

    #[error("班次缺少显示颜色: {0}")]
    MissingColor(String),

    #[error("未知班次: {0}")]
    UnknownShift(String),

    // ===== 默认排班名单 =====
    #[error("班次缺少默认排班名单: {0}")]
    MissingRoster(String),

    #[error("默认排班名单包含未定义的班次: {0}")]
    UnknownRosterShift(String),

    #[error("默认排班名单无效 (shift={shift}): {reason}")]
    InvalidRoster { shift: String, reason: String },

    // ===== 日历窗口 =====
    #[error("日历年份为空")]
    EmptyCalendarYears,

    #[error("无效的日历年份: {0}")]
    InvalidCalendarYear(i32),

    // ===== 配置文件 =====
    #[error("配置文件读取失败 ({path}): {message}")]
    Io { path: String, message: String },

    #[error("配置文件解析失败: {0}")]
    Parse(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
