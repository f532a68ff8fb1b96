// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供临时数据库、已初始化排班的应用状态
// ==========================================

#![allow(dead_code)]

use std::error::Error;
use tempfile::NamedTempFile;

use agenda_qx::api::EditAssignmentRequest;
use agenda_qx::app::AppState;
use agenda_qx::RotationConfig;

/// 创建临时数据库文件
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是有效 UTF-8")?
        .to_string();
    Ok((temp_file, db_path))
}

/// 测试环境：临时数据库 + 应用状态
pub struct TestEnv {
    pub _temp_file: NamedTempFile,
    pub db_path: String,
    pub state: AppState,
}

impl TestEnv {
    /// 默认配置、未初始化排班的环境
    pub fn empty() -> Result<Self, Box<dyn Error>> {
        Self::with_config(RotationConfig::agenda_default()?)
    }

    /// 默认配置、已初始化排班的环境
    pub fn seeded() -> Result<Self, Box<dyn Error>> {
        let env = Self::empty()?;
        env.state.initialize()?;
        Ok(env)
    }

    pub fn with_config(config: RotationConfig) -> Result<Self, Box<dyn Error>> {
        agenda_qx::logging::init_test();
        let (temp_file, db_path) = create_test_db()?;
        let state = AppState::with_config(db_path.clone(), config, "es")?;
        Ok(Self {
            _temp_file: temp_file,
            db_path,
            state,
        })
    }
}

/// 构造编辑请求
pub fn edit_request(
    date: &str,
    shift_name: &str,
    surgeon1: &str,
    surgeon2: &str,
    apply_forward: bool,
) -> EditAssignmentRequest {
    EditAssignmentRequest {
        date: date.to_string(),
        shift_name: shift_name.to_string(),
        surgeon1: surgeon1.to_string(),
        surgeon2: surgeon2.to_string(),
        apply_forward,
        actor: None,
    }
}
