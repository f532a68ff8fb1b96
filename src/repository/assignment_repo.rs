// ==========================================
// AgendaQX 排班日历 - 值班分配数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 管理 shift_assignment 表的读写
// 约束: 批量写入、编辑均在单个事务内提交
// ==========================================

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

use crate::domain::assignment::{NewShiftAssignment, ShiftAssignment, SurgeonPair};
use crate::repository::error::{RepositoryError, RepositoryResult};

const SELECT_COLUMNS: &str = "id, date, shift_name, surgeon1, surgeon2";

// ==========================================
// ShiftAssignmentRepository - 值班分配仓储
// ==========================================
pub struct ShiftAssignmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ShiftAssignmentRepository {
    /// 从已有连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<ShiftAssignment> {
        Ok(ShiftAssignment {
            id: row.get(0)?,
            date: row.get(1)?,
            shift_name: row.get(2)?,
            surgeon1: row.get(3)?,
            surgeon2: row.get(4)?,
        })
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 记录总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM shift_assignment", [], |row| row.get(0))?;
        Ok(count)
    }

    /// 按日期查询
    ///
    /// # 返回
    /// - Ok(Some(ShiftAssignment)): 找到记录
    /// - Ok(None): 当天无记录
    pub fn find_by_date(&self, date: NaiveDate) -> RepositoryResult<Option<ShiftAssignment>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM shift_assignment WHERE date = ?1", SELECT_COLUMNS);

        let assignment = conn
            .query_row(&sql, params![date], Self::map_row)
            .optional()?;

        Ok(assignment)
    }

    /// 按日期范围查询（闭区间，按日期升序）
    pub fn find_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<Vec<ShiftAssignment>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM shift_assignment WHERE date BETWEEN ?1 AND ?2 ORDER BY date",
            SELECT_COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let assignments = stmt
            .query_map(params![start_date, end_date], Self::map_row)?
            .collect::<SqliteResult<Vec<ShiftAssignment>>>()?;

        Ok(assignments)
    }

    /// 查询某班次自指定日期起的全部记录
    pub fn find_by_shift_from(
        &self,
        shift_name: &str,
        from_date: NaiveDate,
    ) -> RepositoryResult<Vec<ShiftAssignment>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM shift_assignment WHERE shift_name = ?1 AND date >= ?2 ORDER BY date",
            SELECT_COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let assignments = stmt
            .query_map(params![shift_name, from_date], Self::map_row)?
            .collect::<SqliteResult<Vec<ShiftAssignment>>>()?;

        Ok(assignments)
    }

    /// 表中出现过的班次名称（去重，升序）
    pub fn list_distinct_shift_names(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT DISTINCT shift_name FROM shift_assignment ORDER BY shift_name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<String>>>()?;
        Ok(names)
    }

    /// 按月统计记录数（闭区间）
    ///
    /// # 返回
    /// - Vec<(YYYY-MM, count)>，按月份升序
    pub fn count_by_month(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<Vec<(String, i64)>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT substr(date, 1, 7) AS month, COUNT(*)
            FROM shift_assignment
            WHERE date BETWEEN ?1 AND ?2
            GROUP BY month
            ORDER BY month
            "#,
        )?;

        let rows = stmt
            .query_map(params![start_date, end_date], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<SqliteResult<Vec<(String, i64)>>>()?;

        Ok(rows)
    }

    // ==========================================
    // 写入
    // ==========================================

    /// 表为空时批量插入（单个事务）
    ///
    /// # 返回
    /// - Ok(Some(inserted)): 已插入
    /// - Ok(None): 表非空，未写入任何记录
    pub fn insert_batch_if_empty(
        &self,
        assignments: &[NewShiftAssignment],
    ) -> RepositoryResult<Option<usize>> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let existing: i64 =
            tx.query_row("SELECT COUNT(*) FROM shift_assignment", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(None);
        }

        let inserted = Self::insert_all(&tx, assignments)?;
        tx.commit()?;
        Ok(Some(inserted))
    }

    fn insert_all(conn: &Connection, assignments: &[NewShiftAssignment]) -> RepositoryResult<usize> {
        let mut stmt = conn.prepare(
            r#"
            INSERT INTO shift_assignment (date, shift_name, surgeon1, surgeon2)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )?;

        let mut inserted = 0;
        for assignment in assignments {
            inserted += stmt.execute(params![
                assignment.date,
                assignment.shift_name,
                assignment.surgeon1,
                assignment.surgeon2,
            ])?;
        }

        Ok(inserted)
    }

    /// 修改指定日期的医生（单个事务）
    ///
    /// # 返回
    /// - Ok(usize): 更新行数（0 或 1）
    pub fn update_surgeons_on_date(
        &self,
        date: NaiveDate,
        surgeons: &SurgeonPair,
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let updated = tx.execute(
            "UPDATE shift_assignment SET surgeon1 = ?1, surgeon2 = ?2 WHERE date = ?3",
            params![surgeons.surgeon1, surgeons.surgeon2, date],
        )?;
        tx.commit()?;
        Ok(updated)
    }

    /// 修改某班次自指定日期起全部记录的医生（单个事务）
    ///
    /// 早于 from_date 的记录与其它班次的记录不受影响
    pub fn update_surgeons_from_date(
        &self,
        shift_name: &str,
        from_date: NaiveDate,
        surgeons: &SurgeonPair,
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let updated = tx.execute(
            r#"
            UPDATE shift_assignment
            SET surgeon1 = ?1, surgeon2 = ?2
            WHERE shift_name = ?3 AND date >= ?4
            "#,
            params![surgeons.surgeon1, surgeons.surgeon2, shift_name, from_date],
        )?;
        tx.commit()?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_repo() -> ShiftAssignmentRepository {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::ensure_schema(&conn).unwrap();
        ShiftAssignmentRepository::new(Arc::new(Mutex::new(conn)))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(d: NaiveDate, shift: &str) -> NewShiftAssignment {
        NewShiftAssignment::new(d, shift, &SurgeonPair::new("Dr. A", "Dra. B"))
    }

    #[test]
    fn test_insert_and_find_by_date() {
        let repo = setup_repo();
        let inserted = repo
            .insert_batch_if_empty(&[row(date(2025, 1, 1), "Turno miércoles"), row(date(2025, 1, 3), "Volante 1")])
            .unwrap();
        assert_eq!(inserted, Some(2));
        assert_eq!(repo.count().unwrap(), 2);

        let found = repo.find_by_date(date(2025, 1, 3)).unwrap().unwrap();
        assert_eq!(found.shift_name, "Volante 1");
        assert_eq!(found.surgeon1, "Dr. A");
        assert!(repo.find_by_date(date(2025, 1, 2)).unwrap().is_none());
    }

    #[test]
    fn test_batch_insert_rolls_back_on_duplicate_date() {
        let repo = setup_repo();
        let result = repo.insert_batch_if_empty(&[
            row(date(2025, 1, 1), "Turno miércoles"),
            row(date(2025, 1, 1), "Volante 1"),
        ]);
        assert!(matches!(result, Err(RepositoryError::UniqueConstraintViolation(_))));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_batch_if_empty_skips_non_empty_table() {
        let repo = setup_repo();
        assert_eq!(
            repo.insert_batch_if_empty(&[row(date(2025, 1, 1), "Turno miércoles")]).unwrap(),
            Some(1)
        );
        assert_eq!(
            repo.insert_batch_if_empty(&[row(date(2025, 1, 3), "Volante 1")]).unwrap(),
            None
        );
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_update_surgeons_from_date_only_touches_later_rows_of_shift() {
        let repo = setup_repo();
        repo.insert_batch_if_empty(&[
            row(date(2025, 6, 1), "Turno jueves"),
            row(date(2025, 6, 5), "Turno jueves"),
            row(date(2025, 6, 6), "Volante 1"),
            row(date(2025, 6, 12), "Turno jueves"),
        ])
        .unwrap();

        let pair = SurgeonPair::new("Dr. Nuevo", "Dra. Nueva");
        let updated = repo
            .update_surgeons_from_date("Turno jueves", date(2025, 6, 5), &pair)
            .unwrap();
        assert_eq!(updated, 2);

        assert_eq!(repo.find_by_date(date(2025, 6, 1)).unwrap().unwrap().surgeon1, "Dr. A");
        assert_eq!(repo.find_by_date(date(2025, 6, 5)).unwrap().unwrap().surgeon1, "Dr. Nuevo");
        assert_eq!(repo.find_by_date(date(2025, 6, 6)).unwrap().unwrap().surgeon1, "Dr. A");
        assert_eq!(repo.find_by_date(date(2025, 6, 12)).unwrap().unwrap().surgeon2, "Dra. Nueva");
    }

    #[test]
    fn test_update_surgeons_on_date() {
        let repo = setup_repo();
        repo.insert_batch_if_empty(&[row(date(2025, 6, 5), "Turno jueves"), row(date(2025, 6, 12), "Turno jueves")])
            .unwrap();

        let pair = SurgeonPair::new("Dr. Solo", "Dra. Solo");
        assert_eq!(repo.update_surgeons_on_date(date(2025, 6, 5), &pair).unwrap(), 1);
        assert_eq!(repo.update_surgeons_on_date(date(2025, 6, 6), &pair).unwrap(), 0);

        let untouched = repo.find_by_date(date(2025, 6, 12)).unwrap().unwrap();
        assert_eq!(untouched.surgeon1, "Dr. A");
        let edited = repo.find_by_date(date(2025, 6, 5)).unwrap().unwrap();
        assert_eq!(edited.shift_name, "Turno jueves");
        assert_eq!(edited.surgeons(), pair);
    }

    #[test]
    fn test_surgeon_name_length_is_checked() {
        let repo = setup_repo();
        repo.insert_batch_if_empty(&[row(date(2025, 6, 5), "Turno jueves")]).unwrap();
        let pair = SurgeonPair::new("x".repeat(101), "ok");
        let result = repo.update_surgeons_on_date(date(2025, 6, 5), &pair);
        assert!(matches!(result, Err(RepositoryError::CheckConstraintViolation(_))));
    }

    #[test]
    fn test_range_distinct_and_month_counts() {
        let repo = setup_repo();
        repo.insert_batch_if_empty(&[
            row(date(2025, 1, 1), "Turno miércoles"),
            row(date(2025, 1, 3), "Volante 1"),
            row(date(2025, 2, 3), "Volante 1"),
        ])
        .unwrap();

        let january = repo.find_by_date_range(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(january.len(), 2);
        assert!(january[0].date < january[1].date);

        assert_eq!(
            repo.list_distinct_shift_names().unwrap(),
            vec!["Turno miércoles".to_string(), "Volante 1".to_string()]
        );
        assert_eq!(
            repo.count_by_month(date(2025, 1, 1), date(2025, 12, 31)).unwrap(),
            vec![("2025-01".to_string(), 2), ("2025-02".to_string(), 1)]
        );
        assert_eq!(repo.find_by_shift_from("Volante 1", date(2025, 1, 4)).unwrap().len(), 1);
    }
}
