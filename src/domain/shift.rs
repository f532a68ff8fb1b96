// ==========================================
// AgendaQX 排班日历 - 班次定义领域模型
// ==========================================
// 职责: 班次定义的数据形态与构造期校验
// 红线: 匹配规则在 engine::rotation，这里只保存参数
// ==========================================

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use thiserror::Error;

use crate::domain::types::ShiftKind;

/// 周期长度（天）
pub const CYCLE_DAYS: i64 = 42;

/// 每个周期的周数
pub const WEEKS_PER_CYCLE: i64 = 6;

/// 机动班的间隔（天）
pub const FLOATING_INTERVAL_DAYS: i64 = 6;

/// 星期锚定班次 → 目标星期
///
/// 仅覆盖周一至周四四个班次，其它名称的周期班次视为配置错误
pub const CYCLIC_WEEKDAY_MAP: [(&str, Weekday); 4] = [
    ("Turno lunes", Weekday::Mon),
    ("Turno martes", Weekday::Tue),
    ("Turno miércoles", Weekday::Wed),
    ("Turno jueves", Weekday::Thu),
];

/// 按名称查找周期班次的目标星期
pub fn anchor_weekday_for(name: &str) -> Option<Weekday> {
    CYCLIC_WEEKDAY_MAP
        .iter()
        .find(|(shift_name, _)| *shift_name == name)
        .map(|(_, weekday)| *weekday)
}

/// 班次定义构造错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("班次名称不能为空")]
    EmptyName,

    #[error("周期班次名称不受支持: {0}（仅支持周一至周四四个班次）")]
    UnsupportedCyclicName(String),

    #[error("起始周序号超出范围 (shift={name}): {starting_week}，应为 1..=6")]
    StartingWeekOutOfRange { name: String, starting_week: u8 },
}

// ==========================================
// CyclicShift - 星期锚定周期班次
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CyclicShift {
    name: String,
    color: String,
    reference_date: NaiveDate,
    starting_week: u8,
    target_weekday: Weekday,
}

impl CyclicShift {
    /// 创建周期班次
    ///
    /// # 参数
    /// - name: 班次名称（必须在 CYCLIC_WEEKDAY_MAP 中）
    /// - color: 显示颜色
    /// - reference_date: 周期基准日期
    /// - starting_week: 基准日期所在周的起始周序号 (1..=6)
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        reference_date: NaiveDate,
        starting_week: u8,
    ) -> Result<Self, DefinitionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DefinitionError::EmptyName);
        }

        let target_weekday = anchor_weekday_for(&name)
            .ok_or_else(|| DefinitionError::UnsupportedCyclicName(name.clone()))?;

        if !(1..=WEEKS_PER_CYCLE as u8).contains(&starting_week) {
            return Err(DefinitionError::StartingWeekOutOfRange {
                name,
                starting_week,
            });
        }

        Ok(Self {
            name,
            color: color.into(),
            reference_date,
            starting_week,
            target_weekday,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn starting_week(&self) -> u8 {
        self.starting_week
    }

    pub fn target_weekday(&self) -> Weekday {
        self.target_weekday
    }
}

// ==========================================
// FloatingShift - 机动班 (Volante)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloatingShift {
    name: String,
    color: String,
    reference_date: NaiveDate,
}

impl FloatingShift {
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        reference_date: NaiveDate,
    ) -> Result<Self, DefinitionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DefinitionError::EmptyName);
        }

        Ok(Self {
            name,
            color: color.into(),
            reference_date,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }
}

// ==========================================
// ShiftDefinition - 班次定义
// ==========================================
// 表内顺序即匹配优先级
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShiftDefinition {
    Cyclic(CyclicShift),
    Floating(FloatingShift),
}

impl ShiftDefinition {
    pub fn name(&self) -> &str {
        match self {
            ShiftDefinition::Cyclic(shift) => shift.name(),
            ShiftDefinition::Floating(shift) => shift.name(),
        }
    }

    pub fn color(&self) -> &str {
        match self {
            ShiftDefinition::Cyclic(shift) => shift.color(),
            ShiftDefinition::Floating(shift) => shift.color(),
        }
    }

    pub fn kind(&self) -> ShiftKind {
        match self {
            ShiftDefinition::Cyclic(_) => ShiftKind::Cyclic,
            ShiftDefinition::Floating(_) => ShiftKind::Floating,
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        match self {
            ShiftDefinition::Cyclic(shift) => shift.reference_date(),
            ShiftDefinition::Floating(shift) => shift.reference_date(),
        }
    }
}

impl From<CyclicShift> for ShiftDefinition {
    fn from(shift: CyclicShift) -> Self {
        ShiftDefinition::Cyclic(shift)
    }
}

impl From<FloatingShift> for ShiftDefinition {
    fn from(shift: FloatingShift) -> Self {
        ShiftDefinition::Floating(shift)
    }
}
