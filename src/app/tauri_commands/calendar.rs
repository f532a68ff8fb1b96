use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// 日历视图相关命令
// ==========================================

/// 查询完整日历视图
#[tauri::command(rename_all = "snake_case")]
pub async fn get_calendar(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state.calendar_api.get_calendar().map_err(map_api_error)?;
    to_json(&result)
}

/// 查询班次图例
#[tauri::command(rename_all = "snake_case")]
pub async fn list_shift_definitions(state: tauri::State<'_, AppState>) -> Result<String, String> {
    to_json(&state.calendar_api.list_shift_definitions())
}
