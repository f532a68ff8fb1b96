// ==========================================
// AgendaQX 排班日历 - 操作日志数据仓储
// ==========================================
// 红线: 初始化排班与人工编辑必须记录
// ==========================================

mod core;
mod queries;


pub use core::ActionLogRepository;
