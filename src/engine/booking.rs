// ==========================================
// 差旅数据分析系统 - 预订行为分析引擎
// ==========================================
// 职责: 提前预定天数的纯聚合统计
// ==========================================

use crate::domain::expense::UnifiedExpenseRecord;
use crate::domain::metrics::BookingBehaviorStat;
use crate::engine::top_n::round2;
use tracing::{info, instrument};

pub struct BookingAnalyzer;

impl BookingAnalyzer {
    /// 预订行为分析
    ///
    /// 统计提前预定天数 ≤ 阈值的紧急订单比例与平均提前天数。
    /// 空输入返回全零结果,不报错。
    #[instrument(skip(records), fields(rows = records.len()))]
    pub fn analyze(records: &[UnifiedExpenseRecord], urgent_threshold_days: i64) -> BookingBehaviorStat {
        if records.is_empty() {
            return BookingBehaviorStat::empty();
        }

        let total_orders = records.len() as u64;
        let urgent_orders = records
            .iter()
            .filter(|r| r.advance_days <= urgent_threshold_days)
            .count() as u64;
        let urgent_ratio = urgent_orders as f64 / total_orders as f64 * 100.0;
        let avg_advance_days =
            records.iter().map(|r| r.advance_days as f64).sum::<f64>() / total_orders as f64;

        info!(
            "预订行为分析完成: 总订单={}, 紧急订单={}, 紧急比例={:.2}%, 平均提前天数={:.2}",
            total_orders, urgent_orders, urgent_ratio, avg_advance_days
        );

        BookingBehaviorStat {
            total_orders,
            urgent_orders,
            urgent_ratio: round2(urgent_ratio),
            avg_advance_days: round2(avg_advance_days),
        }
    }
}
