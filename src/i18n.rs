// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持西班牙语（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "es";

/// 语言环境变量
pub const LOCALE_ENV: &str = "AGENDA_QX_LOCALE";

/// 从环境变量解析语言，未设置时返回默认语言
pub fn locale_from_env() -> String {
    std::env::var(LOCALE_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// 翻译消息（指定语言，不读写全局 locale）
///
/// # 示例
/// ```no_run
/// use agenda_qx::i18n::t_in;
/// let title = t_in("es", "app.title");
/// ```
pub fn t_in(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 月份名称（1-12）
pub fn month_name(locale: &str, month: u32) -> String {
    t_in(locale, &format!("calendar.month.{}", month))
}

/// 星期表头（周一开始）
pub fn weekday_labels(locale: &str) -> Vec<String> {
    (0..7)
        .map(|i| t_in(locale, &format!("calendar.weekday.{}", i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names_es() {
        assert_eq!(month_name("es", 1), "Enero");
        assert_eq!(month_name("es", 12), "Diciembre");
    }

    #[test]
    fn test_month_names_en() {
        assert_eq!(month_name("en", 2), "February");
    }

    #[test]
    fn test_weekday_labels() {
        let es = weekday_labels("es");
        assert_eq!(es.len(), 7);
        assert_eq!(es[0], "Lun");
        assert_eq!(es[6], "Dom");

        let en = weekday_labels("en");
        assert_eq!(en[0], "Mon");
    }

    #[test]
    fn test_app_title_es() {
        assert_eq!(t_in("es", "app.title"), "AgendaQX - Calendario de Turnos");
    }
}
