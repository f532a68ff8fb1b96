// ==========================================
// AssignmentApi 集成测试
// ==========================================
// 测试范围:
// 1. 向后覆盖：同班次、日期 >= 指定日期的记录全部修改，其余不变
// 2. 单日修改：仅修改指定日期
// 3. 失败请求：返回 success=false，不修改任何记录
// 4. 操作日志
// ==========================================

mod test_helpers;

use chrono::{Datelike, NaiveDate, Weekday};
use serde_json::json;
use test_helpers::{edit_request, TestEnv};

use agenda_qx::api::MAX_RECENT_ACTIONS;
use agenda_qx::{ActionType, SurgeonPair};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// 向后覆盖
// ==========================================

#[test]
fn test_forward_edit_updates_same_shift_from_date() {
    let env = TestEnv::seeded().expect("无法创建测试环境");
    let repo = &env.state.assignment_repo;
    let from = ymd(2025, 6, 5);

    let target = repo.find_by_date(from).unwrap().expect("2025-06-05 应有值班");
    assert_eq!(target.shift_name, "Turno jueves");

    let (start, end) = env.state.config.calendar_window();
    let before = repo.find_by_date_range(start, end).unwrap();
    let expected_updates = before
        .iter()
        .filter(|a| a.shift_name == "Turno jueves" && a.date >= from)
        .count();

    let response = env.state.assignment_api.update_assignment(&edit_request(
        "2025-06-05",
        "Turno jueves",
        "Dr. Soto",
        "Dra. Rojas",
        true,
    ));
    assert!(response.success, "修改应成功: {:?}", response.error);
    assert_eq!(response.updated_count, expected_updates);

    let after = repo.find_by_date_range(start, end).unwrap();
    assert_eq!(before.len(), after.len());

    let new_pair = SurgeonPair::new("Dr. Soto", "Dra. Rojas");
    for (old, new) in before.iter().zip(after.iter()) {
        assert_eq!(old.date, new.date);
        assert_eq!(old.shift_name, new.shift_name, "班次名称不应被修改");

        if new.shift_name == "Turno jueves" && new.date >= from {
            assert_eq!(new.surgeons(), new_pair, "{} 应被修改", new.date);
        } else {
            assert_eq!(old.surgeons(), new.surgeons(), "{} 不应被修改", new.date);
        }
    }

    // 第 4-6 周的周五/周六/周日同属 Turno jueves，也在覆盖范围内
    let off_weekday_updates = after
        .iter()
        .filter(|a| a.shift_name == "Turno jueves" && a.date >= from)
        .filter(|a| matches!(a.date.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun))
        .inspect(|a| assert_eq!(a.surgeons(), new_pair, "{} 应被修改", a.date))
        .count();
    assert!(off_weekday_updates > 0, "应覆盖非周四的 Turno jueves 记录");
}

#[test]
fn test_forward_edit_without_rows_is_failure() {
    let env = TestEnv::seeded().expect("无法创建测试环境");
    let total_before = env.state.assignment_repo.count().unwrap();

    let response = env.state.assignment_api.update_assignment(&edit_request(
        "2030-01-01",
        "Turno jueves",
        "Dr. Soto",
        "Dra. Rojas",
        true,
    ));
    assert!(!response.success);
    assert_eq!(response.updated_count, 0);
    assert!(response.error.is_some());
    assert_eq!(env.state.assignment_repo.count().unwrap(), total_before);
}

// ==========================================
// 单日修改
// ==========================================

#[test]
fn test_single_date_edit_touches_only_that_date() {
    let env = TestEnv::seeded().expect("无法创建测试环境");
    let repo = &env.state.assignment_repo;
    let date = ymd(2025, 6, 5);

    let jueves_before = repo.find_by_shift_from("Turno jueves", ymd(2025, 1, 1)).unwrap();

    let response = env.state.assignment_api.update_assignment(&edit_request(
        "2025-06-05",
        "Turno jueves",
        "Dr. Soto",
        "Dra. Rojas",
        false,
    ));
    assert!(response.success, "修改应成功: {:?}", response.error);
    assert_eq!(response.updated_count, 1);

    let jueves_after = repo.find_by_shift_from("Turno jueves", ymd(2025, 1, 1)).unwrap();
    for (old, new) in jueves_before.iter().zip(jueves_after.iter()) {
        if new.date == date {
            assert_eq!(new.surgeons(), SurgeonPair::new("Dr. Soto", "Dra. Rojas"));
        } else {
            assert_eq!(old.surgeons(), new.surgeons());
        }
    }
}

#[test]
fn test_single_date_edit_without_row_is_failure() {
    let env = TestEnv::seeded().expect("无法创建测试环境");

    let response = env.state.assignment_api.update_assignment(&edit_request(
        "2031-06-05",
        "Turno jueves",
        "Dr. Soto",
        "Dra. Rojas",
        false,
    ));
    assert!(!response.success);
    assert!(response.error.unwrap().contains("2031-06-05"));
}

#[test]
fn test_single_date_edit_rejects_shift_mismatch() {
    let env = TestEnv::seeded().expect("无法创建测试环境");
    let before = env.state.assignment_repo.find_by_date(ymd(2025, 6, 5)).unwrap().unwrap();

    let response = env.state.assignment_api.update_assignment(&edit_request(
        "2025-06-05",
        "Turno lunes",
        "Dr. Soto",
        "Dra. Rojas",
        false,
    ));
    assert!(!response.success);

    let after = env.state.assignment_repo.find_by_date(ymd(2025, 6, 5)).unwrap().unwrap();
    assert_eq!(before, after);
}

// ==========================================
// 失败请求
// ==========================================

#[test]
fn test_invalid_requests_are_failures_not_errors() {
    let env = TestEnv::seeded().expect("无法创建测试环境");
    let too_long = "x".repeat(101);

    let cases = vec![
        edit_request("05-06-2025", "Turno jueves", "Dr. Soto", "Dra. Rojas", true),
        edit_request("", "Turno jueves", "Dr. Soto", "Dra. Rojas", true),
        edit_request("2025-06-05", "", "Dr. Soto", "Dra. Rojas", true),
        edit_request("2025-06-05", "Turno jueves", "", "Dra. Rojas", true),
        edit_request("2025-06-05", "Turno viernes", "Dr. Soto", "Dra. Rojas", true),
        edit_request("2025-06-05", "Turno jueves", &too_long, "Dra. Rojas", true),
    ];

    let (start, end) = env.state.config.calendar_window();
    let before = env.state.assignment_repo.find_by_date_range(start, end).unwrap();

    for request in &cases {
        let response = env.state.assignment_api.update_assignment(request);
        assert!(!response.success, "请求应失败: {:?}", request);
        assert_eq!(response.updated_count, 0);
        assert!(response.error.is_some());
    }

    let after = env.state.assignment_repo.find_by_date_range(start, end).unwrap();
    assert_eq!(before, after, "失败请求不应修改任何记录");
}

#[test]
fn test_missing_json_fields_are_failures() {
    let env = TestEnv::seeded().expect("无法创建测试环境");
    let request = serde_json::from_str(r#"{"date": "2025-06-05", "apply_forward": true}"#).unwrap();

    let response = env.state.assignment_api.update_assignment(&request);
    assert!(!response.success);
    assert!(response.error.unwrap().contains("shift_name"));
}

#[test]
fn test_json_request_with_wrong_field_type_is_failure() {
    let env = TestEnv::seeded().expect("无法创建测试环境");
    let (start, end) = env.state.config.calendar_window();
    let before = env.state.assignment_repo.find_by_date_range(start, end).unwrap();

    let response = env.state.assignment_api.update_assignment_json(json!({
        "date": "2025-06-05",
        "shift_name": "Turno jueves",
        "surgeon1": "Dr. Soto",
        "surgeon2": "Dra. Rojas",
        "apply_forward": "yes",
    }));
    assert!(!response.success);
    assert_eq!(response.updated_count, 0);
    assert!(response.error.is_some());

    let after = env.state.assignment_repo.find_by_date_range(start, end).unwrap();
    assert_eq!(before, after);

    let response = env.state.assignment_api.update_assignment_json(json!({
        "date": "2025-06-05",
        "shift_name": "Turno jueves",
        "surgeon1": "Dr. Soto",
        "surgeon2": "Dra. Rojas",
        "apply_forward": false,
    }));
    assert!(response.success, "修改应成功: {:?}", response.error);
    assert_eq!(response.updated_count, 1);
}

#[test]
fn test_unpadded_date_is_failure() {
    let env = TestEnv::seeded().expect("无法创建测试环境");
    let response = env.state.assignment_api.update_assignment(&edit_request(
        "2025-6-5",
        "Turno jueves",
        "Dr. Soto",
        "Dra. Rojas",
        false,
    ));
    assert!(!response.success);
}

// ==========================================
// 查询与操作日志
// ==========================================

#[test]
fn test_get_assignment() {
    let env = TestEnv::seeded().expect("无法创建测试环境");

    let found = env.state.assignment_api.get_assignment("2025-01-01").unwrap();
    assert_eq!(found.unwrap().shift_name, "Turno miércoles");

    assert!(env.state.assignment_api.get_assignment("2025/01/01").is_err());
}

#[test]
fn test_edits_are_recorded_in_action_log() {
    let env = TestEnv::seeded().expect("无法创建测试环境");
    let mut request = edit_request("2025-06-05", "Turno jueves", "Dr. Soto", "Dra. Rojas", true);
    request.actor = Some("coordinadora".to_string());

    let response = env.state.assignment_api.update_assignment(&request);
    assert!(response.success);

    let recent = env.state.assignment_api.list_recent_actions(10).unwrap();
    let latest = &recent[0];
    assert_eq!(latest.action_type, ActionType::EditForward.as_str());
    assert_eq!(latest.actor, "coordinadora");
    assert_eq!(latest.shift_name.as_deref(), Some("Turno jueves"));
    assert_eq!(latest.date_range_start, Some(ymd(2025, 6, 5)));
    assert_eq!(latest.date_range_end, None);
    assert_eq!(latest.affected_rows, response.updated_count as i64);

    // 失败的修改不记录
    env.state.assignment_api.update_assignment(&edit_request(
        "2025-06-05",
        "Turno viernes",
        "Dr. Soto",
        "Dra. Rojas",
        true,
    ));
    assert_eq!(env.state.assignment_api.list_recent_actions(10).unwrap().len(), recent.len());
}

#[test]
fn test_list_recent_actions_limit_bounds() {
    let env = TestEnv::seeded().expect("无法创建测试环境");
    assert!(env.state.assignment_api.list_recent_actions(0).is_err());
    assert!(env
        .state
        .assignment_api
        .list_recent_actions(MAX_RECENT_ACTIONS + 1)
        .is_err());
    assert_eq!(env.state.assignment_api.list_recent_actions(1).unwrap().len(), 1);
}

#[test]
fn test_list_actions_for_shift() {
    let env = TestEnv::seeded().expect("无法创建测试环境");
    let api = &env.state.assignment_api;

    assert!(api.list_actions_for_shift("Turno jueves").unwrap().is_empty());

    let response = api.update_assignment(&edit_request(
        "2025-06-05",
        "Turno jueves",
        "Dr. Soto",
        "Dra. Rojas",
        true,
    ));
    assert!(response.success);

    let logs = api.list_actions_for_shift(" Turno jueves ").unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action_type, ActionType::EditForward.as_str());
    assert!(api.list_actions_for_shift("Turno martes").unwrap().is_empty());

    assert!(api.list_actions_for_shift("").is_err());
    assert!(api.list_actions_for_shift("Turno viernes").is_err());
}
