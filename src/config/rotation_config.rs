// ==========================================
// AgendaQX 排班日历 - 轮班配置
// ==========================================
// 职责: 班次定义表、颜色表、默认排班名单、日历年份
// 约束: 启动时构造一次并校验，之后只读，显式传递给引擎与展示层
// 来源: 内置默认表，或 AGENDA_QX_ROTATION_CONFIG 指向的 JSON 文件
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::assignment::{SurgeonPair, MAX_SHIFT_NAME_LEN, MAX_SURGEON_NAME_LEN};
use crate::domain::shift::{CyclicShift, FloatingShift, ShiftDefinition};
use crate::domain::types::ShiftKind;

/// 配置文件路径环境变量
pub const ROTATION_CONFIG_ENV: &str = "AGENDA_QX_ROTATION_CONFIG";

/// 默认日历年份（排班初始化与日历展示共用）
pub const DEFAULT_CALENDAR_YEARS: [i32; 2] = [2025, 2026];

// ==========================================
// RotationConfig - 轮班配置（不可变）
// ==========================================
#[derive(Debug, Clone)]
pub struct RotationConfig {
    definitions: Vec<ShiftDefinition>,
    rosters: HashMap<String, SurgeonPair>,
    calendar_years: Vec<i32>,
}

impl RotationConfig {
    /// 创建并校验轮班配置
    ///
    /// # 参数
    /// - definitions: 班次定义（顺序即匹配优先级）
    /// - rosters: 班次名称 → 默认医生
    /// - calendar_years: 日历年份
    ///
    /// # 返回
    /// - Ok(RotationConfig): 校验通过
    /// - Err(ConfigError): 任一校验失败
    pub fn new(
        definitions: Vec<ShiftDefinition>,
        rosters: HashMap<String, SurgeonPair>,
        calendar_years: Vec<i32>,
    ) -> ConfigResult<Self> {
        if definitions.is_empty() {
            return Err(ConfigError::EmptyDefinitions);
        }

        let mut seen = HashSet::new();
        for def in &definitions {
            let name = def.name();
            if !seen.insert(name.to_string()) {
                return Err(ConfigError::DuplicateShiftName(name.to_string()));
            }
            if name.chars().count() > MAX_SHIFT_NAME_LEN {
                return Err(ConfigError::ShiftNameTooLong {
                    name: name.to_string(),
                    max: MAX_SHIFT_NAME_LEN,
                });
            }
            if def.color().trim().is_empty() {
                return Err(ConfigError::MissingColor(name.to_string()));
            }

            let roster = rosters
                .get(name)
                .ok_or_else(|| ConfigError::MissingRoster(name.to_string()))?;
            validate_roster(name, roster)?;
        }

        if let Some(extra) = rosters.keys().find(|k| !seen.contains(k.as_str())) {
            return Err(ConfigError::UnknownRosterShift(extra.clone()));
        }

        let mut calendar_years = calendar_years;
        calendar_years.sort_unstable();
        calendar_years.dedup();
        if calendar_years.is_empty() {
            return Err(ConfigError::EmptyCalendarYears);
        }
        for year in &calendar_years {
            if NaiveDate::from_ymd_opt(*year, 1, 1).is_none() {
                return Err(ConfigError::InvalidCalendarYear(*year));
            }
        }

        Ok(Self {
            definitions,
            rosters,
            calendar_years,
        })
    }

    /// 内置默认配置
    ///
    /// 优先级顺序: 周三、周四、Volante 1、Volante 2、周一、周二
    pub fn agenda_default() -> ConfigResult<Self> {
        let anchor = ymd(2025, 1, 1)?;

        let definitions: Vec<ShiftDefinition> = vec![
            CyclicShift::new("Turno miércoles", "#4EBFBFB3", anchor, 3)?.into(),
            CyclicShift::new("Turno jueves", "#4F97A3B3", anchor, 4)?.into(),
            FloatingShift::new("Volante 1", "#7CC6A6B3", ymd(2025, 1, 3)?)?.into(),
            FloatingShift::new("Volante 2", "#006D77B3", ymd(2025, 1, 4)?)?.into(),
            CyclicShift::new("Turno lunes", "#20B2AAB3", anchor, 1)?.into(),
            CyclicShift::new("Turno martes", "#5F9EA0B3", anchor, 2)?.into(),
        ];

        let rosters: HashMap<String, SurgeonPair> = [
            ("Turno miércoles", "Dr. Espinoza", "Dra. Fuentes"),
            ("Turno jueves", "Dr. González", "Dra. Herrera"),
            ("Volante 1", "Dr. Ibáñez", "Dra. Jara"),
            ("Volante 2", "Dr. Muñoz", "Dra. Núñez"),
            ("Turno lunes", "Dr. Álvarez", "Dra. Bravo"),
            ("Turno martes", "Dr. Castro", "Dra. Díaz"),
        ]
        .into_iter()
        .map(|(shift, s1, s2)| (shift.to_string(), SurgeonPair::new(s1, s2)))
        .collect();

        Self::new(definitions, rosters, DEFAULT_CALENDAR_YEARS.to_vec())
    }

    /// 加载配置：环境变量指定文件优先，否则使用内置默认配置
    pub fn load() -> ConfigResult<Self> {
        match std::env::var(ROTATION_CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                tracing::info!("从配置文件加载轮班配置: {}", path.trim());
                Self::from_json_file(path.trim())
            }
            _ => Self::agenda_default(),
        }
    }

    /// 从 JSON 文件加载
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// 从 JSON 字符串加载
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let file: RotationConfigFile =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.into_config()
    }

    // ===== 查询 =====

    /// 班次定义（按优先级）
    pub fn definitions(&self) -> &[ShiftDefinition] {
        &self.definitions
    }

    pub fn definition(&self, shift_name: &str) -> Option<&ShiftDefinition> {
        self.definitions.iter().find(|d| d.name() == shift_name)
    }

    /// 颜色表查询，仅覆盖已定义班次
    pub fn color_for(&self, shift_name: &str) -> Option<&str> {
        self.definition(shift_name).map(|d| d.color())
    }

    /// 默认排班名单查询
    pub fn roster_for(&self, shift_name: &str) -> Option<&SurgeonPair> {
        self.rosters.get(shift_name)
    }

    pub fn is_known_shift(&self, shift_name: &str) -> bool {
        self.definition(shift_name).is_some()
    }

    pub fn shift_names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name()).collect()
    }

    /// 日历年份（升序）
    pub fn calendar_years(&self) -> &[i32] {
        &self.calendar_years
    }

    /// 日历窗口首尾日期（闭区间）
    pub fn calendar_window(&self) -> (NaiveDate, NaiveDate) {
        let first = self.calendar_years[0];
        let last = self.calendar_years[self.calendar_years.len() - 1];
        (
            NaiveDate::from_ymd_opt(first, 1, 1).unwrap_or(NaiveDate::MIN),
            NaiveDate::from_ymd_opt(last, 12, 31).unwrap_or(NaiveDate::MAX),
        )
    }

    /// 校验持久化数据中的班次名称
    pub fn ensure_known_shifts<'a>(
        &self,
        shift_names: impl IntoIterator<Item = &'a str>,
    ) -> ConfigResult<()> {
        for name in shift_names {
            if !self.is_known_shift(name) {
                return Err(ConfigError::UnknownShift(name.to_string()));
            }
        }
        Ok(())
    }
}

fn ymd(year: i32, month: u32, day: u32) -> ConfigResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ConfigError::Parse(format!("无效日期: {}-{}-{}", year, month, day)))
}

fn validate_roster(shift: &str, roster: &SurgeonPair) -> ConfigResult<()> {
    for name in [&roster.surgeon1, &roster.surgeon2] {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidRoster {
                shift: shift.to_string(),
                reason: "医生姓名不能为空".to_string(),
            });
        }
        if name.chars().count() > MAX_SURGEON_NAME_LEN {
            return Err(ConfigError::InvalidRoster {
                shift: shift.to_string(),
                reason: format!("医生姓名最多{}个字符", MAX_SURGEON_NAME_LEN),
            });
        }
    }
    Ok(())
}

// ==========================================
// 配置文件格式
// ==========================================

/// 配置文件根结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfigFile {
    #[serde(default = "default_calendar_years")]
    pub calendar_years: Vec<i32>,
    pub shifts: Vec<ShiftRecord>,
}

/// 配置文件中的单个班次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRecord {
    pub name: String,
    pub color: String,
    pub kind: ShiftKind,
    pub reference_date: NaiveDate,
    #[serde(default)]
    pub starting_week: Option<u8>,
    pub roster: SurgeonPair,
}

fn default_calendar_years() -> Vec<i32> {
    DEFAULT_CALENDAR_YEARS.to_vec()
}

impl RotationConfigFile {
    pub fn into_config(self) -> ConfigResult<RotationConfig> {
        let mut definitions = Vec::with_capacity(self.shifts.len());
        let mut rosters = HashMap::with_capacity(self.shifts.len());

        for record in self.shifts {
            let def: ShiftDefinition = match record.kind {
                ShiftKind::Cyclic => {
                    let starting_week = record.starting_week.ok_or_else(|| {
                        ConfigError::Parse(format!("周期班次缺少 starting_week: {}", record.name))
                    })?;
                    CyclicShift::new(
                        record.name.clone(),
                        record.color,
                        record.reference_date,
                        starting_week,
                    )?
                    .into()
                }
                ShiftKind::Floating => {
                    FloatingShift::new(record.name.clone(), record.color, record.reference_date)?
                        .into()
                }
            };
            definitions.push(def);
            rosters.insert(record.name, record.roster);
        }

        RotationConfig::new(definitions, rosters, self.calendar_years)
    }
}
