// ==========================================
// AgendaQX 排班日历 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 启动顺序: 打开数据库 -> 建表 -> 加载轮班配置 -> 初始化排班 -> 校验已存班次
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{AssignmentApi, CalendarApi};
use crate::config::RotationConfig;
use crate::db::{open_sqlite_connection, prepare_schema};
use crate::engine::{AssignmentSeeder, SeedOutcome};
use crate::i18n;
use crate::repository::{
    action_log_repo::ActionLogRepository, assignment_repo::ShiftAssignmentRepository,
};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "AGENDA_QX_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 在Tauri应用中作为全局状态管理
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 轮班配置（启动后只读）
    pub config: Arc<RotationConfig>,

    /// 日历视图API
    pub calendar_api: Arc<CalendarApi>,

    /// 值班编辑API
    pub assignment_api: Arc<AssignmentApi>,

    /// 值班分配仓储
    pub assignment_repo: Arc<ShiftAssignmentRepository>,

    /// 操作日志仓储（用于审计追踪）
    pub action_log_repo: Arc<ActionLogRepository>,

    seeder: AssignmentSeeder,
}

impl AppState {
    /// 创建新的AppState实例（配置来自环境变量或内置默认值）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new(db_path: String) -> Result<Self, String> {
        let config = RotationConfig::load().map_err(|e| format!("轮班配置无效: {}", e))?;
        Self::with_config(db_path, config, &i18n::locale_from_env())
    }

    /// 使用给定配置创建AppState
    pub fn with_config(db_path: String, config: RotationConfig, locale: &str) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        let previous_version = prepare_schema(&conn)?;
        tracing::debug!(?previous_version, "schema_version 校验通过");
        let conn = Arc::new(Mutex::new(conn));

        let config = Arc::new(config);

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let assignment_repo = Arc::new(ShiftAssignmentRepository::new(conn.clone()));
        let action_log_repo = Arc::new(ActionLogRepository::new(conn));

        // ==========================================
        // 初始化Engine/API层
        // ==========================================
        let seeder = AssignmentSeeder::new(
            config.clone(),
            assignment_repo.clone(),
            action_log_repo.clone(),
        );
        let calendar_api = Arc::new(CalendarApi::new(
            config.clone(),
            assignment_repo.clone(),
            locale,
        ));
        let assignment_api = Arc::new(AssignmentApi::new(
            config.clone(),
            assignment_repo.clone(),
            action_log_repo.clone(),
        ));

        tracing::info!(
            shifts = config.definitions().len(),
            locale = locale,
            "AppState初始化完成"
        );

        Ok(Self {
            db_path,
            config,
            calendar_api,
            assignment_api,
            assignment_repo,
            action_log_repo,
            seeder,
        })
    }

    /// 启动期初始化：空表时生成排班，并校验已存班次都在配置中
    ///
    /// 任一步失败都应终止启动
    pub fn initialize(&self) -> Result<SeedOutcome, String> {
        let outcome = self
            .seeder
            .seed_if_empty()
            .map_err(|e| format!("排班初始化失败: {}", e))?;

        let stored = self
            .assignment_repo
            .list_distinct_shift_names()
            .map_err(|e| format!("读取已存班次失败: {}", e))?;
        self.config
            .ensure_known_shifts(stored.iter().map(String::as_str))
            .map_err(|e| format!("数据库中存在未配置的班次: {}", e))?;

        Ok(outcome)
    }
}

/// 获取默认数据库路径
///
/// 优先读取 AGENDA_QX_DB_PATH，其次用户数据目录，最后回退到当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./agenda_qx.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("agenda-qx-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("agenda-qx");
        }

        if let Err(e) = std::fs::create_dir_all(&path) {
            tracing::warn!("无法创建数据目录 {}: {}", path.display(), e);
        }
        path = path.join("agenda_qx.db");
    }

    path.to_string_lossy().to_string()
}
