// ==========================================
// AgendaQX 排班日历 - 排班初始化
// ==========================================
// 职责: 遍历日历年份，按轮班引擎生成值班分配并写入 shift_assignment
// 红线: 表中已有任意记录则整体跳过（一次性迁移步骤）
// 约束: 逐年按自然日遍历（不构造 2 月 30 日之类的日期）；全部行在单个事务内提交
// ==========================================

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

use crate::config::RotationConfig;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::assignment::NewShiftAssignment;
use crate::engine::rotation::RotationEngine;
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::assignment_repo::ShiftAssignmentRepository;
use crate::repository::error::RepositoryError;

/// 初始化操作人
pub const SEED_ACTOR: &str = "system";

/// 初始化错误
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("班次缺少默认排班名单: shift={shift_name}, date={date}")]
    MissingRoster { shift_name: String, date: NaiveDate },

    #[error("排班初始化写入失败: {0}")]
    Repository(#[from] RepositoryError),
}

/// 初始化结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeedOutcome {
    /// 已写入
    Seeded { inserted: usize },
    /// 表非空，未写入
    Skipped { existing_rows: i64 },
}

/// 生成待写入的全部值班分配
///
/// 每个日历年份从 1 月 1 日到 12 月 31 日逐日判定班次
pub fn build_seed_rows(engine: &RotationEngine) -> Result<Vec<NewShiftAssignment>, SeedError> {
    let config = engine.config();
    let mut rows = Vec::new();

    for &year in config.calendar_years() {
        let (Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            continue;
        };

        for (date, shift_name) in engine.generate_range(start, end) {
            let roster = config
                .roster_for(shift_name)
                .ok_or_else(|| SeedError::MissingRoster {
                    shift_name: shift_name.to_string(),
                    date,
                })?;

            rows.push(NewShiftAssignment::new(date, shift_name, roster));
        }
    }

    Ok(rows)
}

// ==========================================
// AssignmentSeeder - 排班初始化器
// ==========================================
pub struct AssignmentSeeder {
    engine: RotationEngine,
    assignment_repo: Arc<ShiftAssignmentRepository>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl AssignmentSeeder {
    pub fn new(
        config: Arc<RotationConfig>,
        assignment_repo: Arc<ShiftAssignmentRepository>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            engine: RotationEngine::new(config),
            assignment_repo,
            action_log_repo,
        }
    }

    /// 表为空时生成并写入值班分配
    ///
    /// # 返回
    /// - Ok(SeedOutcome::Seeded): 已写入
    /// - Ok(SeedOutcome::Skipped): 表非空，跳过
    /// - Err(SeedError): 名单缺失或写入失败（启动期致命）
    #[instrument(skip(self))]
    pub fn seed_if_empty(&self) -> Result<SeedOutcome, SeedError> {
        let existing_rows = self.assignment_repo.count()?;
        if existing_rows > 0 {
            tracing::info!("shift_assignment 已有 {} 条记录，跳过初始化", existing_rows);
            return Ok(SeedOutcome::Skipped { existing_rows });
        }

        let rows = build_seed_rows(&self.engine)?;
        tracing::debug!("生成待写入值班分配 {} 条", rows.len());

        let Some(inserted) = self.assignment_repo.insert_batch_if_empty(&rows)? else {
            let existing_rows = self.assignment_repo.count()?;
            tracing::info!("写入前检测到已有记录 ({} 条)，跳过初始化", existing_rows);
            return Ok(SeedOutcome::Skipped { existing_rows });
        };

        tracing::info!("排班初始化完成，写入 {} 条", inserted);

        let config = self.engine.config();
        let (start, end) = config.calendar_window();
        let log = ActionLog::new(ActionType::SeedAssignments, SEED_ACTOR)
            .with_date_range(start, Some(end))
            .with_affected_rows(inserted)
            .with_payload(&serde_json::json!({ "calendar_years": config.calendar_years() }))
            .with_detail("首次运行生成排班");
        if let Err(e) = self.action_log_repo.insert(&log) {
            tracing::warn!("初始化操作日志写入失败(不影响排班): {}", e);
        }

        Ok(SeedOutcome::Seeded { inserted })
    }
}
