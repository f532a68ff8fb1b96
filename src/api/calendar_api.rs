// ==========================================
// AgendaQX 排班日历 - 日历视图 API
// ==========================================
// 职责: 按年/月组装日历网格（周一开始），附带班次颜色与医生
// 约束: 只读；每个年份一次范围查询
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::RotationConfig;
use crate::domain::assignment::ShiftAssignment;
use crate::domain::types::ShiftKind;
use crate::i18n;
use crate::repository::assignment_repo::ShiftAssignmentRepository;

// ==========================================
// 视图 DTO
// ==========================================

/// 日历视图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarView {
    pub title: String,
    /// 星期表头（周一开始）
    pub weekday_labels: Vec<String>,
    pub years: Vec<YearCalendar>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearCalendar {
    pub year: i32,
    pub months: Vec<MonthGrid>,
}

/// 单月网格
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthGrid {
    pub month: u32,
    pub name: String,
    /// 1 日之前的空白格数（周一为 0）
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub shift: Option<ShiftCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShiftCell {
    pub shift_name: String,
    pub color: String,
    pub surgeon1: String,
    pub surgeon2: String,
}

/// 图例项
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShiftLegendItem {
    pub name: String,
    pub color: String,
    pub kind: ShiftKind,
}

/// 某月天数
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

// ==========================================
// CalendarApi - 日历视图 API
// ==========================================
pub struct CalendarApi {
    config: Arc<RotationConfig>,
    assignment_repo: Arc<ShiftAssignmentRepository>,
    locale: String,
}

impl CalendarApi {
    pub fn new(
        config: Arc<RotationConfig>,
        assignment_repo: Arc<ShiftAssignmentRepository>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            config,
            assignment_repo,
            locale: locale.into(),
        }
    }

    /// 组装完整日历视图
    ///
    /// # 返回
    /// - Ok(CalendarView): 配置年份的 12 个月网格
    /// - Err(ApiError::ConfigurationError): 存在颜色表中没有的班次
    /// - Err(ApiError): 数据库错误
    #[tracing::instrument(skip(self))]
    pub fn get_calendar(&self) -> ApiResult<CalendarView> {
        let mut years = Vec::with_capacity(self.config.calendar_years().len());

        for &year in self.config.calendar_years() {
            years.push(self.build_year(year)?);
        }

        Ok(CalendarView {
            title: i18n::t_in(&self.locale, "app.title"),
            weekday_labels: i18n::weekday_labels(&self.locale),
            years,
        })
    }

    /// 图例（按优先级顺序）
    pub fn list_shift_definitions(&self) -> Vec<ShiftLegendItem> {
        self.config
            .definitions()
            .iter()
            .map(|def| ShiftLegendItem {
                name: def.name().to_string(),
                color: def.color().to_string(),
                kind: def.kind(),
            })
            .collect()
    }

    fn build_year(&self, year: i32) -> ApiResult<YearCalendar> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| ApiError::ConfigurationError(format!("无效年份: {}", year)))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| ApiError::ConfigurationError(format!("无效年份: {}", year)))?;

        let by_date: HashMap<NaiveDate, ShiftAssignment> = self
            .assignment_repo
            .find_by_date_range(start, end)?
            .into_iter()
            .map(|a| (a.date, a))
            .collect();

        let mut months = Vec::with_capacity(12);
        for month in 1..=12 {
            let first = NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or_else(|| ApiError::InternalError(format!("无效月份: {}-{}", year, month)))?;

            let mut days = Vec::new();
            for date in first.iter_days().take(days_in_month(year, month) as usize) {
                let shift = match by_date.get(&date) {
                    Some(assignment) => Some(self.shift_cell(assignment)?),
                    None => None,
                };
                days.push(DayCell {
                    day: date.day(),
                    date,
                    shift,
                });
            }

            months.push(MonthGrid {
                month,
                name: i18n::month_name(&self.locale, month),
                leading_blanks: first.weekday().num_days_from_monday(),
                days,
            });
        }

        Ok(YearCalendar { year, months })
    }

    fn shift_cell(&self, assignment: &ShiftAssignment) -> ApiResult<ShiftCell> {
        let color = self.config.color_for(&assignment.shift_name).ok_or_else(|| {
            ApiError::ConfigurationError(format!(
                "班次 {} 没有配置颜色 (date={})",
                assignment.shift_name, assignment.date
            ))
        })?;

        Ok(ShiftCell {
            shift_name: assignment.shift_name.clone(),
            color: color.to_string(),
            surgeon1: assignment.surgeon1.clone(),
            surgeon2: assignment.surgeon2.clone(),
        })
    }
}
