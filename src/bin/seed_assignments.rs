use chrono::Local;
use std::error::Error;
use std::fs;
use std::path::Path;

use agenda_qx::app::{get_default_db_path, AppState};
use agenda_qx::engine::SeedOutcome;

// 用法: seed_assignments [db_path] [--reset]
// --reset: 先备份并删除已有数据库，再重新生成排班
fn main() -> Result<(), Box<dyn Error>> {
    agenda_qx::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let reset = args.iter().any(|a| a == "--reset");
    let db_path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(get_default_db_path);

    if reset {
        backup_and_reset_db(&db_path)?;
    }

    let state = AppState::new(db_path.clone())?;
    match state.initialize()? {
        SeedOutcome::Seeded { inserted } => {
            println!("Seeded {} assignments into {}", inserted, db_path);
        }
        SeedOutcome::Skipped { existing_rows } => {
            println!(
                "Skipped: {} already holds {} assignments (use --reset to regenerate)",
                db_path, existing_rows
            );
        }
    }

    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}
