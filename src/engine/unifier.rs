// ==========================================
// 差旅数据分析系统 - 记录合并器
// ==========================================
// 职责: 三类规范化差旅记录 → 单张统一表
// 顺序: 机票 → 酒店 → 火车票（稳定,保证输出确定性）
// ==========================================

use crate::domain::expense::UnifiedExpenseRecord;
use tracing::{error, info, instrument};

/// 金额对账的浮点容差
pub const AMOUNT_TOLERANCE: f64 = 0.01;

pub struct RecordUnifier;

impl RecordUnifier {
    /// 按固定顺序合并三类差旅记录
    ///
    /// 缺失的数据源贡献零行。合并后做金额对账:
    /// 统一表总额须等于三源分别求和,差异只记日志,不作为故障抛出。
    #[instrument(skip(flight, hotel, rail), fields(
        flight = flight.len(),
        hotel = hotel.len(),
        rail = rail.len()
    ))]
    pub fn unify(
        flight: Vec<UnifiedExpenseRecord>,
        hotel: Vec<UnifiedExpenseRecord>,
        rail: Vec<UnifiedExpenseRecord>,
    ) -> Vec<UnifiedExpenseRecord> {
        let source_total: f64 = Self::sum(&flight) + Self::sum(&hotel) + Self::sum(&rail);

        let mut unified = flight;
        unified.extend(hotel);
        unified.extend(rail);

        let merged_total = Self::sum(&unified);
        if (merged_total - source_total).abs() > AMOUNT_TOLERANCE {
            // 对账差异: 设计级自检,记录后继续
            error!(
                "合并金额对账失败: 分源合计 {:.2}, 合并后合计 {:.2}",
                source_total, merged_total
            );
        }

        info!(
            "差旅数据合并完成: 总记录数 {}, 总金额 {:.2}",
            unified.len(),
            merged_total
        );

        unified
    }

    /// 记录序列的金额合计
    pub fn sum(records: &[UnifiedExpenseRecord]) -> f64 {
        records.iter().map(|r| r.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{TravelType, UNKNOWN};

    fn record(travel_type: TravelType, amount: f64) -> UnifiedExpenseRecord {
        UnifiedExpenseRecord {
            person: "张三".to_string(),
            department: "市场部".to_string(),
            project_raw: None,
            project_code: UNKNOWN.to_string(),
            amount,
            consumption_date: None,
            travel_type,
            advance_days: 0,
            over_standard: false,
        }
    }

    #[test]
    fn test_union_order_is_flight_hotel_rail() {
        let unified = RecordUnifier::unify(
            vec![record(TravelType::Flight, 1.0)],
            vec![record(TravelType::Hotel, 2.0)],
            vec![record(TravelType::Rail, 3.0)],
        );
        let types: Vec<TravelType> = unified.iter().map(|r| r.travel_type).collect();
        assert_eq!(
            types,
            vec![TravelType::Flight, TravelType::Hotel, TravelType::Rail]
        );
    }

    #[test]
    fn test_merge_conserves_amounts() {
        let flight = vec![record(TravelType::Flight, 100.5), record(TravelType::Flight, 0.0)];
        let hotel = vec![record(TravelType::Hotel, 999.99)];
        let rail: Vec<UnifiedExpenseRecord> = vec![];

        let source_total =
            RecordUnifier::sum(&flight) + RecordUnifier::sum(&hotel) + RecordUnifier::sum(&rail);
        let unified = RecordUnifier::unify(flight, hotel, rail);

        assert_eq!(unified.len(), 3);
        assert!((RecordUnifier::sum(&unified) - source_total).abs() <= AMOUNT_TOLERANCE);
    }

    #[test]
    fn test_missing_sources_contribute_zero_rows() {
        let unified = RecordUnifier::unify(vec![], vec![record(TravelType::Hotel, 5.0)], vec![]);
        assert_eq!(unified.len(), 1);
        assert_eq!(RecordUnifier::sum(&unified), 5.0);

        let empty = RecordUnifier::unify(vec![], vec![], vec![]);
        assert!(empty.is_empty());
    }
}
