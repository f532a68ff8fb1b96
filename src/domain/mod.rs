// ==========================================
// AgendaQX 排班日历 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod assignment;
pub mod shift;
pub mod types;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use assignment::{
    NewShiftAssignment, ShiftAssignment, SurgeonPair, MAX_SHIFT_NAME_LEN, MAX_SURGEON_NAME_LEN,
};
pub use shift::{
    anchor_weekday_for, CyclicShift, DefinitionError, FloatingShift, ShiftDefinition,
    CYCLE_DAYS, CYCLIC_WEEKDAY_MAP, FLOATING_INTERVAL_DAYS, WEEKS_PER_CYCLE,
};
pub use types::{EditMode, ShiftKind};
