// ==========================================
// AgendaQX 排班日历 - 配置层
// ==========================================
// 职责: 轮班配置的加载与校验
// 约束: 启动期构造一次，之后以 Arc<RotationConfig> 只读共享
// ==========================================

pub mod error;
pub mod rotation_config;

// 重导出核心配置
pub use error::{ConfigError, ConfigResult};
pub use rotation_config::{
    RotationConfig, RotationConfigFile, ShiftRecord, DEFAULT_CALENDAR_YEARS, ROTATION_CONFIG_ENV,
};
