// ==========================================
// AgendaQX 排班日历 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 Tauri 命令与命令行调用
// ==========================================

pub mod assignment_api;
pub mod calendar_api;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use assignment_api::{AssignmentApi, EditAssignmentResponse, DEFAULT_EDIT_ACTOR, MAX_RECENT_ACTIONS};
pub use calendar_api::{
    days_in_month, CalendarApi, CalendarView, DayCell, MonthGrid, ShiftCell, ShiftLegendItem,
    YearCalendar,
};
pub use error::{ApiError, ApiResult};
pub use validator::{EditAssignmentRequest, EditRequestValidator, ValidatedEdit};
