// ==========================================
// 差旅数据分析系统 - 字段清洗器
// ==========================================
// 职责: 金额 / 日期 / 项目代码 / 标识字段的单值清洗
// 原则: 永不 panic,脏值降级为 0.0 / None / "未知"
// ==========================================

use crate::domain::types::UNKNOWN;
use chrono::NaiveDate;

/// 项目名称截断长度（字符数,非字节数）
const PROJECT_NAME_MAX_CHARS: usize = 50;

pub struct FieldCleaner;

impl FieldCleaner {
    // ==========================================
    // 金额清洗
    // ==========================================

    /// 解析金额文本,去除货币符号 / 千分位逗号 / 空白
    ///
    /// 返回 None 表示缺失或无法解析,调用方据此计数数据质量事件。
    pub fn parse_amount(raw: Option<&str>) -> Option<f64> {
        let raw = raw?;
        let cleaned: String = raw
            .chars()
            .filter(|c| *c != '¥' && *c != '￥' && *c != ',' && !c.is_whitespace())
            .collect();
        cleaned.parse::<f64>().ok()
    }

    // ==========================================
    // 项目代码提取
    // ==========================================

    /// 从"项目"字段提取项目代码与名称
    ///
    /// 格式: "05010013 市场-整星..." → 代码 "05010013",名称 "市场-整星..."
    /// 不以数字开头或缺失时代码为"未知",名称截断到 50 字。
    pub fn extract_project(raw: Option<&str>) -> (String, Option<String>) {
        let raw = match raw {
            Some(v) => v.trim(),
            None => return (UNKNOWN.to_string(), None),
        };

        let code: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
        if code.is_empty() {
            return (UNKNOWN.to_string(), None);
        }

        let name: String = raw[code.len()..]
            .trim()
            .chars()
            .take(PROJECT_NAME_MAX_CHARS)
            .collect();
        let name = if name.is_empty() { None } else { Some(name) };

        (code, name)
    }

    // ==========================================
    // 日期解析
    // ==========================================

    /// 解析日历日期,兼容常见表格导出格式
    ///
    /// 依次尝试: YYYY-MM-DD / YYYY/MM/DD / YYYYMMDD / 带时间的日期时间串。
    /// 全部失败返回 None（计入数据质量,不中断流水线）。
    pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }

        const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
                return Some(date);
            }
        }

        // 日期时间串只取日期部分,如 "2024-05-01 08:30:00"
        const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"];
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt.date());
            }
        }

        None
    }

    // ==========================================
    // 标识与数值字段
    // ==========================================

    /// 标识字段清洗（姓名/部门/状态）,缺失填哨兵"未知"
    pub fn clean_identifier(raw: Option<&str>) -> String {
        match raw {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => UNKNOWN.to_string(),
        }
    }

    /// 工时清洗,非数值为 0,负值归 0
    pub fn parse_hours(raw: Option<&str>) -> f64 {
        raw.and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
            .max(0.0)
    }

    /// 提前预定天数清洗,非数值为 0,负值归 0
    pub fn parse_advance_days(raw: Option<&str>) -> i64 {
        let raw = match raw {
            Some(v) => v.trim(),
            None => return 0,
        };
        raw.parse::<i64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().map(|v| v as i64))
            .unwrap_or(0)
            .max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_strips_currency_glyphs() {
        assert_eq!(FieldCleaner::parse_amount(Some("¥1,234.56")), Some(1234.56));
        assert_eq!(FieldCleaner::parse_amount(Some("￥ 2,000")), Some(2000.0));
        assert_eq!(FieldCleaner::parse_amount(Some(" 88.5 ")), Some(88.5));
    }

    #[test]
    fn test_parse_amount_idempotent_on_clean_value() {
        // 已清洗数值再次清洗保持不变
        assert_eq!(FieldCleaner::parse_amount(Some("1234.56")), Some(1234.56));
        assert_eq!(FieldCleaner::parse_amount(Some("0")), Some(0.0));
    }

    #[test]
    fn test_parse_amount_missing_or_dirty_is_none() {
        assert_eq!(FieldCleaner::parse_amount(None), None);
        assert_eq!(FieldCleaner::parse_amount(Some("N/A")), None);
        assert_eq!(FieldCleaner::parse_amount(Some("")), None);
        assert_eq!(FieldCleaner::parse_amount(Some("abc")), None);
    }

    #[test]
    fn test_extract_project_basic() {
        let (code, name) = FieldCleaner::extract_project(Some("05010013 市场"));
        assert_eq!(code, "05010013");
        assert_eq!(name.as_deref(), Some("市场"));
    }

    #[test]
    fn test_extract_project_unknown_cases() {
        assert_eq!(FieldCleaner::extract_project(None).0, UNKNOWN);
        assert_eq!(FieldCleaner::extract_project(Some("")).0, UNKNOWN);
        assert_eq!(FieldCleaner::extract_project(Some("市场项目")).0, UNKNOWN);
    }

    #[test]
    fn test_extract_project_name_truncated_by_chars() {
        let long_name = "项".repeat(80);
        let raw = format!("001 {}", long_name);
        let (code, name) = FieldCleaner::extract_project(Some(&raw));
        assert_eq!(code, "001");
        assert_eq!(name.map(|n| n.chars().count()), Some(50));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(FieldCleaner::parse_date(Some("2024-05-01")), Some(expected));
        assert_eq!(FieldCleaner::parse_date(Some("2024/05/01")), Some(expected));
        assert_eq!(FieldCleaner::parse_date(Some("20240501")), Some(expected));
        assert_eq!(
            FieldCleaner::parse_date(Some("2024-05-01 08:30:00")),
            Some(expected)
        );
    }

    #[test]
    fn test_parse_date_invalid_is_none() {
        assert_eq!(FieldCleaner::parse_date(None), None);
        assert_eq!(FieldCleaner::parse_date(Some("不是日期")), None);
        assert_eq!(FieldCleaner::parse_date(Some("2024-13-45")), None);
    }

    #[test]
    fn test_clean_identifier_sentinel() {
        assert_eq!(FieldCleaner::clean_identifier(Some(" 张三 ")), "张三");
        assert_eq!(FieldCleaner::clean_identifier(Some("  ")), UNKNOWN);
        assert_eq!(FieldCleaner::clean_identifier(None), UNKNOWN);
    }

    #[test]
    fn test_numeric_fields_default_zero() {
        assert_eq!(FieldCleaner::parse_hours(Some("8.5")), 8.5);
        assert_eq!(FieldCleaner::parse_hours(Some("无")), 0.0);
        assert_eq!(FieldCleaner::parse_hours(Some("-3")), 0.0);
        assert_eq!(FieldCleaner::parse_advance_days(Some("2")), 2);
        assert_eq!(FieldCleaner::parse_advance_days(Some("2.0")), 2);
        assert_eq!(FieldCleaner::parse_advance_days(Some("x")), 0);
        assert_eq!(FieldCleaner::parse_advance_days(Some("-1")), 0);
        assert_eq!(FieldCleaner::parse_advance_days(None), 0);
    }
}
