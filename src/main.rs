// ==========================================
// AgendaQX 排班日历 - 主入口
// ==========================================
// 技术栈: Tauri + Rust + SQLite
// 未启用 tauri-app 特性时以命令行方式运行：初始化后输出各月排班统计
// ==========================================

// 禁止控制台窗口 (Windows)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use agenda_qx::app::{get_default_db_path, AppState};

fn bootstrap() -> Result<AppState, String> {
    tracing::info!("==================================================");
    tracing::info!("{} - 外科值班排班日历", agenda_qx::APP_NAME);
    tracing::info!("系统版本: {}", agenda_qx::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let app_state = AppState::new(db_path)?;
    let outcome = app_state.initialize()?;
    tracing::info!(?outcome, "排班初始化检查完成");

    Ok(app_state)
}

#[cfg(feature = "tauri-app")]
fn main() {
    use agenda_qx::app::tauri_commands::*;

    agenda_qx::logging::init();

    let app_state = match bootstrap() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("启动失败: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("启动Tauri应用...");

    let result = tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // 日历视图
            get_calendar,
            list_shift_definitions,
            // 值班编辑
            update_assignment,
            get_assignment,
            list_recent_actions,
            list_actions_by_shift,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        tracing::error!("Tauri应用运行失败: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Tauri应用已退出");
}

#[cfg(not(feature = "tauri-app"))]
fn main() -> anyhow::Result<()> {
    agenda_qx::logging::init();

    let app_state = bootstrap().map_err(anyhow::Error::msg)?;

    let (start, end) = app_state.config.calendar_window();
    let per_month = app_state.assignment_repo.count_by_month(start, end)?;

    println!("{} v{}", agenda_qx::APP_NAME, agenda_qx::VERSION);
    println!("数据库: {}", app_state.db_path);
    println!();
    for (month, count) in &per_month {
        println!("{}  {:>3}", month, count);
    }
    println!();
    println!("合计: {}", per_month.iter().map(|(_, c)| c).sum::<i64>());
    println!();
    println!("图形界面需要启用 tauri-app 特性: cargo run --features tauri-app");

    Ok(())
}
