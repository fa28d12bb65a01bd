// ==========================================
// 差旅数据分析系统 - 分析结果结构
// ==========================================
// 职责: 项目成本 / 部门指标 / 异常 / 预订行为 / Dashboard 输出
// 红线: 输出只含原始数值与文本,不做货币格式化与本地化
// ==========================================

use crate::domain::types::{AnomalyKind, TravelType};
use serde::{Deserialize, Serialize};

// ==========================================
// 项目成本汇总 (Project Cost Summary)
// ==========================================

/// 单个项目的成本归集结果
///
/// 不变式: flight_cost + hotel_cost + rail_cost == total_cost（0.01 容差内）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCostSummary {
    /// 项目代码
    pub project_code: String,
    /// 展示名（取自首条可用"项目"原文,截断 50 字）
    pub project_name: String,
    /// 总成本
    pub total_cost: f64,
    /// 机票成本
    pub flight_cost: f64,
    /// 酒店成本
    pub hotel_cost: f64,
    /// 火车票成本
    pub rail_cost: f64,
    /// 订单数量
    pub order_count: u64,
}

// ==========================================
// 部门指标 (Department Metric)
// ==========================================

/// 单个部门的成本/工时/饱和度指标
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentMetric {
    /// 一级部门
    pub department: String,
    /// 差旅总成本
    pub total_cost: f64,
    /// 考勤总工时
    pub total_hours: f64,
    /// 去重人数
    pub person_count: u64,
    /// 饱和度 = 工时 / (人数 × 标准月工时) × 100,人数为 0 时为 0
    pub saturation: f64,
}

// ==========================================
// 交叉验证异常 (Anomaly)
// ==========================================

/// 考勤与差旅交叉验证发现的单条异常
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    /// 异常类型
    pub kind: AnomalyKind,
    /// 姓名
    pub person: String,
    /// 日期（YYYY-MM-DD,无法解析时为空串）
    pub date: String,
    /// 考勤状态原文
    pub attendance_status: String,
    /// 差旅类型（NoExpense 异常无对应消费时为 None）
    pub travel_type: Option<TravelType>,
    /// 差旅金额
    pub amount: f64,
    /// 一级部门
    pub department: String,
    /// 人读描述
    pub description: String,
}

// ==========================================
// 预订行为统计 (Booking Behavior)
// ==========================================

/// 提前预订天数分布统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingBehaviorStat {
    /// 总订单数
    pub total_orders: u64,
    /// 紧急订单数（提前天数 ≤ 阈值）
    pub urgent_orders: u64,
    /// 紧急订单占比（%,保留 2 位小数）
    pub urgent_ratio: f64,
    /// 平均提前天数（保留 2 位小数）
    pub avg_advance_days: f64,
}

impl BookingBehaviorStat {
    /// 空输入时的全零结果
    pub fn empty() -> Self {
        Self {
            total_orders: 0,
            urgent_orders: 0,
            urgent_ratio: 0.0,
            avg_advance_days: 0.0,
        }
    }
}

// ==========================================
// 超标订单分解 (Over-standard Breakdown)
// ==========================================

/// 各差旅类型的超标订单计数
///
/// 三个计数来自三张互不相交的源表,total 为三者简单相加,不存在重复计数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverStandardBreakdown {
    pub total: u64,
    pub flight: u64,
    pub hotel: u64,
    pub rail: u64,
}

// ==========================================
// Dashboard 输出 (Dashboard Data)
// ==========================================

/// KPI 汇总块
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardKpi {
    /// 差旅总成本（含"未知"项目记录）
    pub total_cost: f64,
    /// 总订单数
    pub total_orders: u64,
    /// 异常记录数（截断前的全量计数）
    pub anomaly_count: u64,
    /// 超标订单总数
    pub over_standard_count: u64,
    /// 紧急预订占比（%）
    pub urgent_booking_ratio: f64,
}

/// Dashboard 聚合结果,核心引擎对外的唯一产出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub kpi: DashboardKpi,
    /// 部门指标（Top-N + "其他"）
    pub department_metrics: Vec<DepartmentMetric>,
    /// 项目成本（Top-N + "其他"）
    pub top_projects: Vec<ProjectCostSummary>,
    /// 异常列表（保序截断至上限条数）
    pub anomalies: Vec<Anomaly>,
    /// 预订行为统计
    pub booking_behavior: BookingBehaviorStat,
    /// 超标订单分解
    pub over_standard_breakdown: OverStandardBreakdown,
    /// 数据质量计数（清洗阶段产生）
    pub quality: crate::normalizer::QualityReport,
    /// 生成时间（YYYY-MM-DD HH:MM:SS）
    pub generated_at: String,
}
