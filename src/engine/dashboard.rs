// ==========================================
// 差旅数据分析系统 - Dashboard 聚合引擎
// ==========================================
// 职责: 规范化 → 合并 → 聚合 → 交叉验证 → KPI 打包
// 定位: 核心引擎对外的唯一入口,外部采集/展示层只调用此处
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::metrics::{
    BookingBehaviorStat, DashboardData, DashboardKpi, DepartmentMetric, ProjectCostSummary,
};
use crate::domain::types::{SourceKind, TravelType};
use crate::engine::booking::BookingAnalyzer;
use crate::engine::cost_aggregator::CostAggregator;
use crate::engine::cross_validator::CrossValidator;
use crate::engine::top_n::{mean, round2, top_n_with_others, OTHERS_LABEL};
use crate::engine::unifier::RecordUnifier;
use crate::error::{AnalysisError, AnalysisResult};
use crate::normalizer::{QualityReport, RawTable, RecordMapper};
use tracing::{info, instrument};

// ==========================================
// 分析输入
// ==========================================

/// 四张固定语义名的原始表
///
/// 任一数据源缺失时以空表传入,不是错误；
/// 只有三张差旅表全空才会使分析失败。
#[derive(Debug, Clone, Default)]
pub struct AnalysisInputs {
    pub attendance: RawTable,
    pub flight: RawTable,
    pub hotel: RawTable,
    pub rail: RawTable,
}

// ==========================================
// TravelAnalyzer - 差旅数据分析器
// ==========================================

pub struct TravelAnalyzer {
    config: AnalysisConfig,
}

impl TravelAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 执行完整分析,生成 Dashboard 数据
    ///
    /// 无内部状态,重复调用同一输入得到相同数值结果。
    #[instrument(skip(self, inputs), fields(
        attendance = inputs.attendance.len(),
        flight = inputs.flight.len(),
        hotel = inputs.hotel.len(),
        rail = inputs.rail.len()
    ))]
    pub fn analyze(&self, inputs: &AnalysisInputs) -> AnalysisResult<DashboardData> {
        let mut quality = QualityReport::default();

        // 1. 规范化（行级脏数据就地降级,表级缺列报错）
        let attendance =
            RecordMapper::normalize_attendance_table(&inputs.attendance, &mut quality);
        let flight = RecordMapper::normalize_expense_table(
            &inputs.flight,
            SourceKind::Flight,
            TravelType::Flight,
            &mut quality,
        )?;
        let hotel = RecordMapper::normalize_expense_table(
            &inputs.hotel,
            SourceKind::Hotel,
            TravelType::Hotel,
            &mut quality,
        )?;
        let rail = RecordMapper::normalize_expense_table(
            &inputs.rail,
            SourceKind::Rail,
            TravelType::Rail,
            &mut quality,
        )?;

        if flight.is_empty() && hotel.is_empty() && rail.is_empty() {
            return Err(AnalysisError::AllSourcesEmpty);
        }

        // 2. 合并为统一差旅表
        let unified = RecordUnifier::unify(flight, hotel, rail);

        // 3. 项目成本 Top-N + "其他"
        let rollup = CostAggregator::aggregate_project_cost(&unified);
        let top_projects =
            Self::bucket_projects(rollup.projects, self.config.project_top_n);

        // 4. 部门指标 Top-N + "其他"
        let dept_metrics = CostAggregator::calculate_department_metrics(
            &unified,
            &attendance,
            self.config.standard_monthly_hours,
        );
        let department_metrics =
            Self::bucket_departments(dept_metrics, self.config.department_top_n);

        // 5. 交叉验证（异常列表保序截断）
        let mut anomalies = CrossValidator::detect(&attendance, &unified, &self.config);
        let anomaly_count = anomalies.len() as u64;
        anomalies.truncate(self.config.anomaly_list_cap);

        // 6. 预订行为 + 超标分解
        // 三张源表均无"提前预定天数"列时统计返回全零,
        // 否则缺列行的默认值 0 会把所有订单算成紧急订单
        let has_advance_days = RecordMapper::has_advance_days_column(&inputs.flight)
            || RecordMapper::has_advance_days_column(&inputs.hotel)
            || RecordMapper::has_advance_days_column(&inputs.rail);
        let booking_behavior = if has_advance_days {
            BookingAnalyzer::analyze(&unified, self.config.urgent_threshold_days)
        } else {
            info!("差旅数据缺少提前预定天数列, 预订行为统计置零");
            BookingBehaviorStat::empty()
        };
        let over_standard_breakdown = CostAggregator::over_standard_breakdown(&unified);

        // 7. KPI 汇总
        let kpi = DashboardKpi {
            total_cost: round2(RecordUnifier::sum(&unified)),
            total_orders: unified.len() as u64,
            anomaly_count,
            over_standard_count: over_standard_breakdown.total,
            urgent_booking_ratio: booking_behavior.urgent_ratio,
        };

        info!(
            "Dashboard 数据生成完成: 总成本={:.2}, 订单数={}, 异常数={}, 超标数={}",
            kpi.total_cost, kpi.total_orders, kpi.anomaly_count, kpi.over_standard_count
        );

        Ok(DashboardData {
            kpi,
            department_metrics,
            top_projects,
            anomalies,
            booking_behavior,
            over_standard_breakdown,
            quality,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    /// 项目列表分桶: 尾部汇总到"其他",全部列求和
    fn bucket_projects(
        projects: Vec<ProjectCostSummary>,
        top_n: usize,
    ) -> Vec<ProjectCostSummary> {
        top_n_with_others(projects, top_n, |tail| ProjectCostSummary {
            project_code: OTHERS_LABEL.to_string(),
            project_name: OTHERS_LABEL.to_string(),
            total_cost: round2(tail.iter().map(|p| p.total_cost).sum()),
            flight_cost: round2(tail.iter().map(|p| p.flight_cost).sum()),
            hotel_cost: round2(tail.iter().map(|p| p.hotel_cost).sum()),
            rail_cost: round2(tail.iter().map(|p| p.rail_cost).sum()),
            order_count: tail.iter().map(|p| p.order_count).sum(),
        })
    }

    /// 部门列表分桶: 成本/工时/人数求和,饱和度取均值
    fn bucket_departments(
        metrics: Vec<DepartmentMetric>,
        top_n: usize,
    ) -> Vec<DepartmentMetric> {
        top_n_with_others(metrics, top_n, |tail| DepartmentMetric {
            department: OTHERS_LABEL.to_string(),
            total_cost: round2(tail.iter().map(|m| m.total_cost).sum()),
            total_hours: round2(tail.iter().map(|m| m.total_hours).sum()),
            person_count: tail.iter().map(|m| m.person_count).sum(),
            saturation: round2(mean(tail, |m| m.saturation)),
        })
    }
}
