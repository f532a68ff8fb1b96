// ==========================================
// AgendaQX 排班日历 - 轮班生成引擎
// ==========================================
// 职责: 日期 → 班次名称（或无）
// 红线: 纯函数，不读取任何持久化数据
// ==========================================
// 周期班次规则（42 天 / 6 周）:
//   d            = date - reference_date（天，可为负）
//   day_in_cycle = d mod 42（取非负余数）
//   week         = (day_in_cycle / 7 + starting_week) mod 6，0 视为 6
//   week 1..3 → 目标星期
//   week 4    → 目标星期 或 周日
//   week 5    → 周六
//   week 6    → 周五
// 机动班规则: d >= 0 且 d mod 6 == 0
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};
use std::sync::Arc;

use crate::config::RotationConfig;
use crate::domain::shift::{
    CyclicShift, FloatingShift, ShiftDefinition, CYCLE_DAYS, FLOATING_INTERVAL_DAYS,
    WEEKS_PER_CYCLE,
};

/// 返回第一个匹配的班次名称（按定义表顺序）
///
/// # 参数
/// - date: 日期
/// - definitions: 班次定义表（顺序即优先级）
///
/// # 返回
/// - Some(name): 命中的班次
/// - None: 当天无班次
pub fn shift_for_date(date: NaiveDate, definitions: &[ShiftDefinition]) -> Option<&str> {
    definitions
        .iter()
        .find(|def| definition_matches(def, date))
        .map(|def| def.name())
}

/// 单个班次定义是否匹配指定日期
pub fn definition_matches(definition: &ShiftDefinition, date: NaiveDate) -> bool {
    match definition {
        ShiftDefinition::Cyclic(shift) => cyclic_matches(shift, date),
        ShiftDefinition::Floating(shift) => floating_matches(shift, date),
    }
}

/// 周期内的周序号 (1..=6)
pub fn week_in_cycle(shift: &CyclicShift, date: NaiveDate) -> u8 {
    let delta_days = (date - shift.reference_date()).num_days();
    let day_in_cycle = delta_days.rem_euclid(CYCLE_DAYS);
    let week = (day_in_cycle / 7 + i64::from(shift.starting_week())) % WEEKS_PER_CYCLE;
    if week == 0 {
        WEEKS_PER_CYCLE as u8
    } else {
        week as u8
    }
}

/// 周期班次匹配
pub fn cyclic_matches(shift: &CyclicShift, date: NaiveDate) -> bool {
    let weekday = date.weekday();
    let target = shift.target_weekday();

    match week_in_cycle(shift, date) {
        1..=3 => weekday == target,
        4 => weekday == target || weekday == Weekday::Sun,
        5 => weekday == Weekday::Sat,
        _ => weekday == Weekday::Fri,
    }
}

/// 机动班匹配（基准日期之前不匹配）
pub fn floating_matches(shift: &FloatingShift, date: NaiveDate) -> bool {
    let delta_days = (date - shift.reference_date()).num_days();
    delta_days >= 0 && delta_days % FLOATING_INTERVAL_DAYS == 0
}

// ==========================================
// RotationEngine - 轮班生成引擎
// ==========================================
pub struct RotationEngine {
    config: Arc<RotationConfig>,
}

impl RotationEngine {
    /// 创建新的轮班生成引擎
    pub fn new(config: Arc<RotationConfig>) -> Self {
        Self { config }
    }

    /// 轮班配置
    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// 指定日期的班次名称
    pub fn shift_for(&self, date: NaiveDate) -> Option<&str> {
        shift_for_date(date, self.config.definitions())
    }

    /// 闭区间内每个有班次的日期
    pub fn generate_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, &str)> {
        start
            .iter_days()
            .take_while(|date| *date <= end)
            .filter_map(|date| self.shift_for(date).map(|name| (date, name)))
            .collect()
    }
}
