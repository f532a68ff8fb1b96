// ==========================================
// AgendaQX 排班日历 - 编辑请求校验器
// ==========================================
// 职责: 编辑请求的字段校验（日期格式、班次、医生姓名）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::RotationConfig;
use crate::domain::assignment::{SurgeonPair, MAX_SURGEON_NAME_LEN};
use crate::domain::types::EditMode;

/// 编辑请求日期格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// EditAssignmentRequest - 编辑请求
// ==========================================
// 所有字段带默认值：缺失字段在校验阶段报错，而不是在反序列化阶段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditAssignmentRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub shift_name: String,
    #[serde(default)]
    pub surgeon1: String,
    #[serde(default)]
    pub surgeon2: String,
    #[serde(default)]
    pub apply_forward: bool,
    /// 操作人（可选，缺省为 admin）
    #[serde(default)]
    pub actor: Option<String>,
}

/// 校验通过的编辑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEdit {
    pub date: NaiveDate,
    pub shift_name: String,
    pub surgeons: SurgeonPair,
    pub mode: EditMode,
}

/// 解析 YYYY-MM-DD 日期（月、日必须补零）
pub fn parse_date(date_str: &str) -> ApiResult<NaiveDate> {
    let date_str = date_str.trim();
    if date_str.len() != 10 {
        return Err(ApiError::InvalidInput(format!(
            "日期格式错误（应为YYYY-MM-DD）: {}",
            date_str
        )));
    }
    NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|e| ApiError::InvalidInput(format!("日期格式错误（应为YYYY-MM-DD）: {}", e)))
}

// ==========================================
// EditRequestValidator - 编辑请求校验器
// ==========================================
pub struct EditRequestValidator {
    config: Arc<RotationConfig>,
}

impl EditRequestValidator {
    pub fn new(config: Arc<RotationConfig>) -> Self {
        Self { config }
    }

    /// 校验编辑请求
    ///
    /// # 返回
    /// - Ok(ValidatedEdit): 校验通过（医生姓名已去除首尾空白）
    /// - Err(ApiError::InvalidInput): 字段缺失或格式错误
    /// - Err(ApiError::ValidationError): 未知班次或姓名超长
    pub fn validate(&self, request: &EditAssignmentRequest) -> ApiResult<ValidatedEdit> {
        if request.date.trim().is_empty() {
            return Err(ApiError::InvalidInput("缺少字段: date".to_string()));
        }
        let date = parse_date(&request.date)?;

        let shift_name = request.shift_name.trim();
        if shift_name.is_empty() {
            return Err(ApiError::InvalidInput("缺少字段: shift_name".to_string()));
        }
        if !self.config.is_known_shift(shift_name) {
            return Err(ApiError::ValidationError(format!("未知班次: {}", shift_name)));
        }

        let surgeon1 = validate_surgeon_name("surgeon1", &request.surgeon1)?;
        let surgeon2 = validate_surgeon_name("surgeon2", &request.surgeon2)?;

        Ok(ValidatedEdit {
            date,
            shift_name: shift_name.to_string(),
            surgeons: SurgeonPair::new(surgeon1, surgeon2),
            mode: EditMode::from_apply_forward(request.apply_forward),
        })
    }
}

fn validate_surgeon_name(field: &str, value: &str) -> ApiResult<String> {
    let name = value.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput(format!("缺少字段: {}", field)));
    }
    if name.chars().count() > MAX_SURGEON_NAME_LEN {
        return Err(ApiError::ValidationError(format!(
            "{}最多{}个字符",
            field, MAX_SURGEON_NAME_LEN
        )));
    }
    Ok(name.to_string())
}
