// ==========================================
// 差旅数据分析系统 - 交叉验证引擎
// ==========================================
// 职责: 考勤 × 差旅按 (姓名, 日期) 连接,输出异常记录
// 规则: Conflict 默认启用; NoExpense 保留实现,由配置开关控制
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::expense::{AttendanceRecord, UnifiedExpenseRecord};
use crate::domain::metrics::Anomaly;
use crate::domain::types::{AnomalyKind, AttendanceStatus, UNKNOWN};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

pub struct CrossValidator;

impl CrossValidator {
    /// 交叉验证入口
    ///
    /// 任一侧数据为空时短路返回空列表（降级,不报错）。
    /// 一条"上班"考勤对应 N 条同日差旅时产出 N 条异常。
    #[instrument(skip(attendance, expenses, config), fields(
        attendance_rows = attendance.len(),
        expense_rows = expenses.len()
    ))]
    pub fn detect(
        attendance: &[AttendanceRecord],
        expenses: &[UnifiedExpenseRecord],
        config: &AnalysisConfig,
    ) -> Vec<Anomaly> {
        if attendance.is_empty() || expenses.is_empty() {
            warn!("考勤数据或差旅数据为空，无法进行异常检测");
            return Vec::new();
        }

        let mut anomalies = Self::detect_conflicts(attendance, expenses);

        if config.enable_no_expense_rule {
            anomalies.extend(Self::detect_no_expense(
                attendance,
                expenses,
                config.no_expense_window_days,
            ));
        }

        info!("异常检测完成, 发现 {} 条异常记录", anomalies.len());
        anomalies
    }

    // ==========================================
    // Conflict: 上班考勤 + 同日差旅消费
    // ==========================================

    fn detect_conflicts(
        attendance: &[AttendanceRecord],
        expenses: &[UnifiedExpenseRecord],
    ) -> Vec<Anomaly> {
        // (姓名, 消费日期) → 差旅记录索引
        // 姓名缺失降级为哨兵"未知"的行不参与连接, 避免哨兵对哨兵的假性命中
        let mut by_person_date: HashMap<(&str, NaiveDate), Vec<&UnifiedExpenseRecord>> =
            HashMap::new();
        for expense in expenses {
            if expense.person == UNKNOWN {
                continue;
            }
            if let Some(date) = expense.consumption_date {
                by_person_date
                    .entry((expense.person.as_str(), date))
                    .or_default()
                    .push(expense);
            }
        }

        let mut anomalies = Vec::new();
        for record in attendance {
            if record.status != AttendanceStatus::Present || record.person == UNKNOWN {
                continue;
            }
            let date = match record.date {
                Some(d) => d,
                None => continue,
            };

            if let Some(matches) = by_person_date.get(&(record.person.as_str(), date)) {
                for expense in matches {
                    anomalies.push(Anomaly {
                        kind: AnomalyKind::Conflict,
                        person: record.person.clone(),
                        date: date.to_string(),
                        attendance_status: record.status_raw.clone(),
                        travel_type: Some(expense.travel_type),
                        amount: expense.amount,
                        department: record.department.clone(),
                        description: "考勤显示上班但同日有异地差旅消费".to_string(),
                    });
                }
            }
        }

        debug!("Conflict 异常: {} 条", anomalies.len());
        anomalies
    }

    // ==========================================
    // NoExpense: 出差考勤 + 时间窗内无差旅消费
    // ==========================================
    // 业务规则默认关闭: 出差不一定产生系统内差旅消费
    // （对方承担交通/住宿、本地出差等）,由 enable_no_expense_rule 启用
    // ==========================================

    fn detect_no_expense(
        attendance: &[AttendanceRecord],
        expenses: &[UnifiedExpenseRecord],
        window_days: i64,
    ) -> Vec<Anomaly> {
        // 姓名 → 消费日期列表
        let mut dates_by_person: HashMap<&str, Vec<NaiveDate>> = HashMap::new();
        for expense in expenses {
            if let Some(date) = expense.consumption_date {
                dates_by_person
                    .entry(expense.person.as_str())
                    .or_default()
                    .push(date);
            }
        }

        let window = Duration::days(window_days);
        let mut anomalies = Vec::new();

        for record in attendance {
            if record.status != AttendanceStatus::Traveling || record.person == UNKNOWN {
                continue;
            }
            let date = match record.date {
                Some(d) => d,
                None => continue,
            };

            let has_expense_in_window = dates_by_person
                .get(record.person.as_str())
                .map(|dates| {
                    dates
                        .iter()
                        .any(|d| *d >= date - window && *d <= date + window)
                })
                .unwrap_or(false);

            if !has_expense_in_window {
                anomalies.push(Anomaly {
                    kind: AnomalyKind::NoExpense,
                    person: record.person.clone(),
                    date: date.to_string(),
                    attendance_status: record.status_raw.clone(),
                    travel_type: None,
                    amount: 0.0,
                    department: record.department.clone(),
                    description: "考勤显示出差但无任何差旅消费记录".to_string(),
                });
            }
        }

        debug!("NoExpense 异常: {} 条", anomalies.len());
        anomalies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{TravelType, UNKNOWN};

    fn att(person: &str, date: &str, status_raw: &str) -> AttendanceRecord {
        AttendanceRecord {
            person: person.to_string(),
            department: "市场部".to_string(),
            date: date.parse().ok(),
            status_raw: status_raw.to_string(),
            status: AttendanceStatus::classify(status_raw),
            work_hours: 8.0,
        }
    }

    fn exp(person: &str, date: &str, travel_type: TravelType, amount: f64) -> UnifiedExpenseRecord {
        UnifiedExpenseRecord {
            person: person.to_string(),
            department: "市场部".to_string(),
            project_raw: None,
            project_code: UNKNOWN.to_string(),
            amount,
            consumption_date: date.parse().ok(),
            travel_type,
            advance_days: 0,
            over_standard: false,
        }
    }

    #[test]
    fn test_one_attendance_two_expenses_two_anomalies() {
        let attendance = vec![att("张三", "2024-05-01", "正常上班")];
        let expenses = vec![
            exp("张三", "2024-05-01", TravelType::Flight, 1000.0),
            exp("张三", "2024-05-01", TravelType::Hotel, 300.0),
        ];

        let anomalies =
            CrossValidator::detect(&attendance, &expenses, &AnalysisConfig::default());
        assert_eq!(anomalies.len(), 2);
        assert!(anomalies.iter().all(|a| a.kind == AnomalyKind::Conflict));
        assert!(anomalies.iter().all(|a| a.person == "张三"));
        assert!(anomalies.iter().all(|a| a.date == "2024-05-01"));
    }

    #[test]
    fn test_no_conflict_for_different_person_or_date() {
        let attendance = vec![att("张三", "2024-05-01", "上班")];
        let expenses = vec![
            exp("李四", "2024-05-01", TravelType::Flight, 1000.0),
            exp("张三", "2024-05-02", TravelType::Hotel, 300.0),
        ];

        let anomalies =
            CrossValidator::detect(&attendance, &expenses, &AnalysisConfig::default());
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_sentinel_person_never_joins() {
        // 两侧姓名均缺失 → 同为哨兵"未知", 不得连接成 Conflict
        let attendance = vec![att(UNKNOWN, "2024-05-01", "正常上班")];
        let expenses = vec![exp(UNKNOWN, "2024-05-01", TravelType::Flight, 1000.0)];

        let anomalies =
            CrossValidator::detect(&attendance, &expenses, &AnalysisConfig::default());
        assert!(anomalies.is_empty());

        // NoExpense 规则同样跳过哨兵考勤
        let config = AnalysisConfig {
            enable_no_expense_rule: true,
            ..AnalysisConfig::default()
        };
        let attendance = vec![att(UNKNOWN, "2024-05-10", "出差")];
        let anomalies = CrossValidator::detect(&attendance, &expenses, &config);
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_empty_attendance_short_circuits() {
        let expenses = vec![exp("张三", "2024-05-01", TravelType::Flight, 1000.0)];
        let anomalies = CrossValidator::detect(&[], &expenses, &AnalysisConfig::default());
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_no_expense_rule_disabled_by_default() {
        let attendance = vec![att("张三", "2024-05-10", "出差")];
        let expenses = vec![exp("李四", "2024-05-01", TravelType::Flight, 1000.0)];

        let anomalies =
            CrossValidator::detect(&attendance, &expenses, &AnalysisConfig::default());
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_no_expense_rule_when_enabled() {
        let config = AnalysisConfig {
            enable_no_expense_rule: true,
            ..AnalysisConfig::default()
        };

        // 出差日 ±3 天内无消费 → 异常
        let attendance = vec![att("张三", "2024-05-10", "出差")];
        let expenses = vec![exp("张三", "2024-05-01", TravelType::Flight, 1000.0)];
        let anomalies = CrossValidator::detect(&attendance, &expenses, &config);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::NoExpense);
        assert_eq!(anomalies[0].travel_type, None);
        assert_eq!(anomalies[0].amount, 0.0);

        // 窗口边界命中（+3 天）→ 无异常
        let expenses = vec![exp("张三", "2024-05-13", TravelType::Rail, 200.0)];
        let anomalies = CrossValidator::detect(&attendance, &expenses, &config);
        assert!(anomalies.is_empty());
    }
}
