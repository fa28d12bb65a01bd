// ==========================================
// 差旅数据分析系统 - 成本聚合引擎
// ==========================================
// 职责: 项目轴 / 部门轴成本归集 + 超标订单分解
// 红线: "未知"项目单独记账不丢弃;"未知"/空部门整体排除
// 确定性: 分组键按首次出现顺序收集,稳定排序,同值保持输入序
// ==========================================

use crate::domain::expense::{AttendanceRecord, UnifiedExpenseRecord};
use crate::domain::metrics::{DepartmentMetric, OverStandardBreakdown, ProjectCostSummary};
use crate::domain::types::{TravelType, UNKNOWN};
use crate::engine::top_n::round2;
use crate::engine::unifier::AMOUNT_TOLERANCE;
use crate::normalizer::FieldCleaner;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

/// 项目展示名不可提取时的占位
const UNNAMED_PROJECT: &str = "未命名";

// ==========================================
// 项目成本归集结果
// ==========================================

/// 项目轴聚合结果: 有效项目明细 + 被排除的"未知"项目记账
#[derive(Debug, Clone)]
pub struct ProjectCostRollup {
    /// 有效项目,按总成本降序
    pub projects: Vec<ProjectCostSummary>,
    /// 项目代码为"未知"的记录数（不进明细,单独记账）
    pub excluded_count: u64,
    /// "未知"项目记录的金额合计
    pub excluded_amount: f64,
}

// ==========================================
// CostAggregator - 成本聚合引擎
// ==========================================

pub struct CostAggregator;

impl CostAggregator {
    // ==========================================
    // 项目轴
    // ==========================================

    /// 项目成本归集
    ///
    /// "未知"项目行被排除在明细外但金额单独记账,保证
    /// sum(项目总成本) + 未知项目金额 == 统一表总金额。
    #[instrument(skip(records), fields(rows = records.len()))]
    pub fn aggregate_project_cost(records: &[UnifiedExpenseRecord]) -> ProjectCostRollup {
        struct Acc {
            code: String,
            name: Option<String>,
            total: f64,
            flight: f64,
            hotel: f64,
            rail: f64,
            count: u64,
        }

        let mut order: Vec<Acc> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut excluded_count = 0u64;
        let mut excluded_amount = 0.0f64;

        for record in records {
            if record.has_unknown_project() {
                excluded_count += 1;
                excluded_amount += record.amount;
                continue;
            }

            let idx = *index
                .entry(record.project_code.clone())
                .or_insert_with(|| {
                    order.push(Acc {
                        code: record.project_code.clone(),
                        name: None,
                        total: 0.0,
                        flight: 0.0,
                        hotel: 0.0,
                        rail: 0.0,
                        count: 0,
                    });
                    order.len() - 1
                });
            let acc = &mut order[idx];

            // 展示名取首条可提取的"项目"原文
            if acc.name.is_none() {
                if let Some(raw) = record.project_raw.as_deref() {
                    if raw.trim() != UNKNOWN {
                        acc.name = FieldCleaner::extract_project(Some(raw)).1;
                    }
                }
            }

            acc.total += record.amount;
            match record.travel_type {
                TravelType::Flight => acc.flight += record.amount,
                TravelType::Hotel => acc.hotel += record.amount,
                TravelType::Rail => acc.rail += record.amount,
            }
            acc.count += 1;
        }

        if excluded_count > 0 {
            warn!(
                "发现 {} 条'未知'项目记录(金额 {:.2}), 已排除在项目成本统计外",
                excluded_count, excluded_amount
            );
        }

        let mut projects: Vec<ProjectCostSummary> = order
            .into_iter()
            .map(|acc| {
                // 分类求和与直接求和的对账自检
                let split_sum = acc.flight + acc.hotel + acc.rail;
                if (split_sum - acc.total).abs() > AMOUNT_TOLERANCE {
                    warn!(
                        "项目 {} 成本对账差异: 直接求和 {:.2}, 分类求和 {:.2}",
                        acc.code, acc.total, split_sum
                    );
                }

                ProjectCostSummary {
                    project_code: acc.code,
                    project_name: acc.name.unwrap_or_else(|| UNNAMED_PROJECT.to_string()),
                    total_cost: round2(acc.total),
                    flight_cost: round2(acc.flight),
                    hotel_cost: round2(acc.hotel),
                    rail_cost: round2(acc.rail),
                    order_count: acc.count,
                }
            })
            .collect();

        // 稳定排序: 总成本相同的项目保持首次出现顺序
        projects.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));

        info!(
            "项目成本归集完成: 有效项目 {} 个, 排除'未知'记录 {} 条",
            projects.len(),
            excluded_count
        );

        ProjectCostRollup {
            projects,
            excluded_count,
            excluded_amount,
        }
    }

    // ==========================================
    // 部门轴
    // ==========================================

    /// 部门指标计算
    ///
    /// 成本来自统一差旅表,工时与人数来自考勤表,
    /// 按两侧部门键的并集合并,缺失侧按 0 计。
    /// 部门为"未知"或空串的行整体排除（与项目轴的记账策略刻意不同）。
    #[instrument(skip(records, attendance), fields(
        expense_rows = records.len(),
        attendance_rows = attendance.len()
    ))]
    pub fn calculate_department_metrics(
        records: &[UnifiedExpenseRecord],
        attendance: &[AttendanceRecord],
        standard_monthly_hours: f64,
    ) -> Vec<DepartmentMetric> {
        let mut key_order: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut cost: HashMap<String, f64> = HashMap::new();
        let mut hours: HashMap<String, f64> = HashMap::new();
        let mut persons: HashMap<String, HashSet<String>> = HashMap::new();

        let usable = |dept: &str| dept != UNKNOWN && !dept.is_empty();

        for record in records {
            if !usable(&record.department) {
                continue;
            }
            if seen.insert(record.department.clone()) {
                key_order.push(record.department.clone());
            }
            *cost.entry(record.department.clone()).or_insert(0.0) += record.amount;
        }

        for record in attendance {
            if !usable(&record.department) {
                continue;
            }
            if seen.insert(record.department.clone()) {
                key_order.push(record.department.clone());
            }
            *hours.entry(record.department.clone()).or_insert(0.0) += record.work_hours;
            persons
                .entry(record.department.clone())
                .or_default()
                .insert(record.person.clone());
        }

        let mut metrics: Vec<DepartmentMetric> = key_order
            .into_iter()
            .map(|dept| {
                let total_cost = cost.get(&dept).copied().unwrap_or(0.0);
                let total_hours = hours.get(&dept).copied().unwrap_or(0.0);
                let person_count = persons.get(&dept).map(|s| s.len() as u64).unwrap_or(0);

                // 饱和度 = 工时 / (人数 × 标准月工时), 人数为 0 时为 0
                let saturation = if person_count > 0 {
                    total_hours / (person_count as f64 * standard_monthly_hours) * 100.0
                } else {
                    0.0
                };

                DepartmentMetric {
                    department: dept,
                    total_cost: round2(total_cost),
                    total_hours: round2(total_hours),
                    person_count,
                    saturation: round2(saturation),
                }
            })
            .collect();

        metrics.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));

        debug!("部门指标计算完成: {} 个部门", metrics.len());
        metrics
    }

    // ==========================================
    // 超标订单分解
    // ==========================================

    /// 各差旅类型的超标订单计数
    ///
    /// 超标标志在规范化时按类型专属规则判定,
    /// 三个计数来自互不相交的源,总数为简单相加。
    pub fn over_standard_breakdown(records: &[UnifiedExpenseRecord]) -> OverStandardBreakdown {
        let mut flight = 0u64;
        let mut hotel = 0u64;
        let mut rail = 0u64;

        for record in records.iter().filter(|r| r.over_standard) {
            match record.travel_type {
                TravelType::Flight => flight += 1,
                TravelType::Hotel => hotel += 1,
                TravelType::Rail => rail += 1,
            }
        }

        OverStandardBreakdown {
            total: flight + hotel + rail,
            flight,
            hotel,
            rail,
        }
    }
}
