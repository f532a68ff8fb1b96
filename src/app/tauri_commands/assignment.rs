use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// 值班编辑相关命令
// ==========================================

/// 修改值班医生
///
/// 始终返回 Ok：失败信息（含请求格式错误）在响应体的 success/error 字段中
#[tauri::command(rename_all = "snake_case")]
pub async fn update_assignment(
    state: tauri::State<'_, AppState>,
    request: serde_json::Value,
) -> Result<String, String> {
    let response = state.assignment_api.update_assignment_json(request);
    to_json(&response)
}

/// 查询某日值班
#[tauri::command(rename_all = "snake_case")]
pub async fn get_assignment(
    state: tauri::State<'_, AppState>,
    date: String,
) -> Result<String, String> {
    let result = state
        .assignment_api
        .get_assignment(&date)
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 查询最近的操作日志
#[tauri::command(rename_all = "snake_case")]
pub async fn list_recent_actions(
    state: tauri::State<'_, AppState>,
    limit: Option<usize>,
) -> Result<String, String> {
    let result = state
        .assignment_api
        .list_recent_actions(limit.unwrap_or(50))
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 查询某班次的操作日志
#[tauri::command(rename_all = "snake_case")]
pub async fn list_actions_by_shift(
    state: tauri::State<'_, AppState>,
    shift_name: String,
) -> Result<String, String> {
    let result = state
        .assignment_api
        .list_actions_for_shift(&shift_name)
        .map_err(map_api_error)?;
    to_json(&result)
}
