// ==========================================
// AgendaQX 排班日历 - 引擎层
// ==========================================
// 职责: 轮班规则与排班初始化
// 红线: 轮班规则不拼 SQL，不读取持久化数据
// ==========================================

pub mod rotation;
pub mod seeder;

// 重导出核心引擎
pub use rotation::{
    cyclic_matches, definition_matches, floating_matches, shift_for_date, week_in_cycle,
    RotationEngine,
};
pub use seeder::{build_seed_rows, AssignmentSeeder, SeedError, SeedOutcome, SEED_ACTOR};
