// ==========================================
// AgendaQX 排班日历 - 值班编辑 API
// ==========================================
// 职责: 修改值班医生（单日 / 自某日起向后覆盖），记录操作日志
// 红线: 只修改 surgeon1/surgeon2，日期与班次名称不变
// 约束: 向后覆盖仅作用于同一班次且日期 >= 指定日期的记录
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{parse_date, EditAssignmentRequest, EditRequestValidator, ValidatedEdit};
use crate::config::RotationConfig;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::assignment::ShiftAssignment;
use crate::domain::types::EditMode;
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::assignment_repo::ShiftAssignmentRepository;

/// 默认操作人
pub const DEFAULT_EDIT_ACTOR: &str = "admin";

/// 操作日志查询上限
pub const MAX_RECENT_ACTIONS: usize = 500;

/// 编辑响应
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditAssignmentResponse {
    pub success: bool,
    pub updated_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EditAssignmentResponse {
    pub fn ok(updated_count: usize) -> Self {
        Self {
            success: true,
            updated_count,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            updated_count: 0,
            error: Some(error.into()),
        }
    }
}

// ==========================================
// AssignmentApi - 值班编辑 API
// ==========================================

/// 值班编辑API
///
/// 职责：
/// 1. 单日修改 / 向后覆盖修改
/// 2. 单日查询
/// 3. ActionLog记录与查询
pub struct AssignmentApi {
    config: Arc<RotationConfig>,
    assignment_repo: Arc<ShiftAssignmentRepository>,
    action_log_repo: Arc<ActionLogRepository>,
    validator: EditRequestValidator,
}

impl AssignmentApi {
    pub fn new(
        config: Arc<RotationConfig>,
        assignment_repo: Arc<ShiftAssignmentRepository>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            validator: EditRequestValidator::new(config.clone()),
            config,
            assignment_repo,
            action_log_repo,
        }
    }

    /// 修改值班医生
    ///
    /// 不返回 Err：校验失败、记录不存在、存储失败都折叠为 success=false
    pub fn update_assignment(&self, request: &EditAssignmentRequest) -> EditAssignmentResponse {
        match self.apply_edit(request) {
            Ok(updated) => EditAssignmentResponse::ok(updated),
            Err(e) => {
                tracing::warn!(
                    date = %request.date,
                    shift_name = %request.shift_name,
                    "值班修改失败: {}",
                    e
                );
                EditAssignmentResponse::failed(e.to_string())
            }
        }
    }

    /// 修改值班医生（原始 JSON 请求）
    ///
    /// 字段类型错误（如 apply_forward 为字符串）同样折叠为 success=false
    pub fn update_assignment_json(&self, raw: serde_json::Value) -> EditAssignmentResponse {
        match serde_json::from_value::<EditAssignmentRequest>(raw) {
            Ok(request) => self.update_assignment(&request),
            Err(e) => {
                tracing::warn!("编辑请求解析失败: {}", e);
                EditAssignmentResponse::failed(
                    ApiError::InvalidInput(format!("请求格式错误: {}", e)).to_string(),
                )
            }
        }
    }

    /// 执行修改
    ///
    /// # 返回
    /// - Ok(usize): 更新行数（单日模式为 1）
    /// - Err(ApiError::InvalidInput / ValidationError): 请求不合法
    /// - Err(ApiError::NotFound): 没有可修改的记录
    #[instrument(skip(self, request), fields(date = %request.date, apply_forward = request.apply_forward))]
    pub fn apply_edit(&self, request: &EditAssignmentRequest) -> ApiResult<usize> {
        let edit = self.validator.validate(request)?;

        let updated = match edit.mode {
            EditMode::SingleDate => self.apply_single_date(&edit)?,
            EditMode::Forward => self.apply_forward(&edit)?,
        };

        tracing::info!(
            mode = %edit.mode,
            shift_name = %edit.shift_name,
            "值班修改完成，更新 {} 条",
            updated
        );

        let actor = request
            .actor
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_EDIT_ACTOR);
        self.record_edit(&edit, actor, updated);

        Ok(updated)
    }

    fn apply_single_date(&self, edit: &ValidatedEdit) -> ApiResult<usize> {
        let existing = self
            .assignment_repo
            .find_by_date(edit.date)?
            .ok_or_else(|| ApiError::NotFound(format!("{} 没有值班记录", edit.date)))?;

        if existing.shift_name != edit.shift_name {
            return Err(ApiError::ValidationError(format!(
                "{} 的班次为 {}，与请求的 {} 不一致",
                edit.date, existing.shift_name, edit.shift_name
            )));
        }

        let updated = self
            .assignment_repo
            .update_surgeons_on_date(edit.date, &edit.surgeons)?;
        if updated == 0 {
            return Err(ApiError::NotFound(format!("{} 没有值班记录", edit.date)));
        }
        Ok(updated)
    }

    fn apply_forward(&self, edit: &ValidatedEdit) -> ApiResult<usize> {
        let updated = self.assignment_repo.update_surgeons_from_date(
            &edit.shift_name,
            edit.date,
            &edit.surgeons,
        )?;
        if updated == 0 {
            return Err(ApiError::NotFound(format!(
                "{} 自 {} 起没有值班记录",
                edit.shift_name, edit.date
            )));
        }
        Ok(updated)
    }

    fn record_edit(&self, edit: &ValidatedEdit, actor: &str, updated: usize) {
        let action_type = match edit.mode {
            EditMode::SingleDate => ActionType::EditSingleDate,
            EditMode::Forward => ActionType::EditForward,
        };
        let end = match edit.mode {
            EditMode::SingleDate => Some(edit.date),
            EditMode::Forward => None,
        };

        let log = ActionLog::new(action_type, actor)
            .with_shift_name(&edit.shift_name)
            .with_date_range(edit.date, end)
            .with_affected_rows(updated)
            .with_payload(&serde_json::json!({
                "surgeon1": edit.surgeons.surgeon1,
                "surgeon2": edit.surgeons.surgeon2,
            }));

        if let Err(e) = self.action_log_repo.insert(&log) {
            tracing::warn!("操作日志写入失败(修改已生效): {}", e);
        }
    }

    /// 查询某日值班
    ///
    /// # 参数
    /// - date: YYYY-MM-DD
    pub fn get_assignment(&self, date: &str) -> ApiResult<Option<ShiftAssignment>> {
        let date = parse_date(date)?;
        Ok(self.assignment_repo.find_by_date(date)?)
    }

    /// 最近的操作日志（新的在前）
    pub fn list_recent_actions(&self, limit: usize) -> ApiResult<Vec<ActionLog>> {
        if limit == 0 || limit > MAX_RECENT_ACTIONS {
            return Err(ApiError::InvalidInput(format!(
                "limit 必须在 1..={} 之间",
                MAX_RECENT_ACTIONS
            )));
        }
        Ok(self.action_log_repo.find_recent(limit)?)
    }

    /// 某班次的操作日志（新的在前）
    pub fn list_actions_for_shift(&self, shift_name: &str) -> ApiResult<Vec<ActionLog>> {
        let shift_name = shift_name.trim();
        if shift_name.is_empty() {
            return Err(ApiError::InvalidInput("班次名称不能为空".to_string()));
        }
        if !self.config.is_known_shift(shift_name) {
            return Err(ApiError::ValidationError(format!("未知班次: {}", shift_name)));
        }
        Ok(self.action_log_repo.find_by_shift_name(shift_name)?)
    }
}
