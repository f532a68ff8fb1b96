// ==========================================
// AgendaQX 排班日历 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少偶发 busy 错误
// - 幂等建表（schema_version / shift_assignment / action_log）
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS shift_assignment (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL UNIQUE,
    shift_name TEXT NOT NULL CHECK (length(shift_name) <= 50),
    surgeon1 TEXT NOT NULL CHECK (length(surgeon1) <= 100),
    surgeon2 TEXT NOT NULL CHECK (length(surgeon2) <= 100)
);

CREATE INDEX IF NOT EXISTS idx_shift_assignment_shift_date
    ON shift_assignment(shift_name, date);

CREATE TABLE IF NOT EXISTS action_log (
    action_id TEXT PRIMARY KEY,
    action_type TEXT NOT NULL,
    action_ts TEXT NOT NULL,
    actor TEXT NOT NULL,
    payload_json TEXT,
    shift_name TEXT,
    date_range_start TEXT,
    date_range_end TEXT,
    affected_rows INTEGER NOT NULL DEFAULT 0,
    detail TEXT
);

CREATE INDEX IF NOT EXISTS idx_action_ts ON action_log(action_ts);
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 校验数据库未被更新版本的程序写入过，然后幂等建表
///
/// # 返回
/// - Ok(Some(v)): 建表前已存在的 schema_version
/// - Ok(None): 新数据库
/// - Err(String): schema_version 高于当前程序所支持的版本，或 SQLite 错误
pub fn prepare_schema(conn: &Connection) -> Result<Option<i64>, String> {
    let existing = read_schema_version(conn).map_err(|e| format!("读取 schema_version 失败: {}", e))?;
    if let Some(v) = existing {
        if v > CURRENT_SCHEMA_VERSION {
            return Err(format!(
                "数据库 schema_version={} 高于当前程序支持的版本 {}",
                v, CURRENT_SCHEMA_VERSION
            ));
        }
    }
    ensure_schema(conn).map_err(|e| format!("数据库建表失败: {}", e))?;
    Ok(existing)
}

/// 幂等建表，并记录 schema_version
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
