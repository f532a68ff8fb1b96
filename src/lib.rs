// ==========================================
// AgendaQX 排班日历 - 核心库
// ==========================================
// 技术栈: Tauri + Rust + SQLite
// 系统定位: 外科值班排班日历（轮班生成 + 人工调整）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 轮班规则与排班初始化
pub mod engine;

// 配置层 - 班次定义与默认名单
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 启动装配与 Tauri 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{EditMode, ShiftKind};

// 领域实体
pub use domain::{
    ActionLog, ActionType, CyclicShift, FloatingShift, NewShiftAssignment, ShiftAssignment,
    ShiftDefinition, SurgeonPair,
};

// 配置
pub use config::{ConfigError, RotationConfig};

// 引擎
pub use engine::{shift_for_date, AssignmentSeeder, RotationEngine, SeedOutcome};

// API
pub use api::{AssignmentApi, CalendarApi, EditAssignmentRequest, EditAssignmentResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "AgendaQX";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
