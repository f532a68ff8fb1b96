// ==========================================
// AgendaQX 排班日历 - Tauri 命令（按域拆分）
// ==========================================
// 职责: Tauri 命令定义,连接前端与后端 API
// ==========================================

#![cfg(feature = "tauri-app")]

mod assignment;
mod calendar;
mod common;

pub use assignment::*;
pub use calendar::*;
