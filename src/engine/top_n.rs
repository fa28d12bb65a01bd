// ==========================================
// 差旅数据分析系统 - Top-N + "其他" 分桶
// ==========================================
// 职责: 有界展示列表的共享原语,项目/部门两条聚合轴复用
// 不变式: 可求和列在分桶前后总和不变
// ==========================================

use tracing::debug;

/// "其他"条目的统一名称
pub const OTHERS_LABEL: &str = "其他";

/// 按上限分桶: 长度 ≤ top_n 时原样返回,
/// 否则保留前 top_n 条,尾部用 make_others 汇总为一条追加在末尾
///
/// make_others 负责对尾部切片求和/求均值,由调用方决定各列语义,
/// 保证求和列在分桶前后守恒。
pub fn top_n_with_others<T, F>(items: Vec<T>, top_n: usize, make_others: F) -> Vec<T>
where
    F: FnOnce(&[T]) -> T,
{
    let total = items.len();
    if total <= top_n {
        debug!("记录数({}) <= {}, 返回全部数据", total, top_n);
        return items;
    }

    let mut items = items;
    let tail = items.split_off(top_n);
    let others = make_others(&tail);
    items.push(others);

    debug!(
        "总计{}条, 展示前{}条 + \"{}\"({}条汇总)",
        total,
        top_n,
        OTHERS_LABEL,
        tail.len()
    );

    items
}

/// 保留 2 位小数（对外数值的统一舍入）
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 均值,空切片为 0
pub fn mean<T, F>(items: &[T], value: F) -> f64
where
    F: Fn(&T) -> f64,
{
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(value).sum::<f64>() / items.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        value: f64,
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row {
                name: format!("row-{}", i),
                value: (i + 1) as f64,
            })
            .collect()
    }

    fn bucket(items: Vec<Row>, top_n: usize) -> Vec<Row> {
        top_n_with_others(items, top_n, |tail| Row {
            name: OTHERS_LABEL.to_string(),
            value: round2(tail.iter().map(|r| r.value).sum()),
        })
    }

    #[test]
    fn test_no_op_when_within_cap() {
        let input = rows(5);
        let output = bucket(input.clone(), 5);
        assert_eq!(output, input);

        let output = bucket(rows(3), 10);
        assert_eq!(output.len(), 3);
        assert!(output.iter().all(|r| r.name != OTHERS_LABEL));
    }

    #[test]
    fn test_tail_collapsed_into_others() {
        let output = bucket(rows(25), 20);
        assert_eq!(output.len(), 21);
        assert_eq!(output[20].name, OTHERS_LABEL);
        // 尾部 21..=25 的和
        assert_eq!(output[20].value, (21..=25).sum::<i32>() as f64);
    }

    #[test]
    fn test_sum_preserved_for_any_cap() {
        let input = rows(17);
        let expected: f64 = input.iter().map(|r| r.value).sum();
        for cap in 0..20 {
            let output = bucket(input.clone(), cap);
            let actual: f64 = output.iter().map(|r| r.value).sum();
            assert!(
                (actual - expected).abs() < 0.01,
                "cap={} 求和不守恒: {} != {}",
                cap,
                actual,
                expected
            );
        }
    }

    #[test]
    fn test_cap_zero_collapses_everything() {
        let output = bucket(rows(4), 0);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].name, OTHERS_LABEL);
        assert_eq!(output[0].value, 10.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005), 1.0); // 1.005 的二进制表示略小于 1.005
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
    }

    #[test]
    fn test_mean_empty_is_zero() {
        let empty: Vec<Row> = vec![];
        assert_eq!(mean(&empty, |r| r.value), 0.0);
        assert_eq!(mean(&rows(4), |r| r.value), 2.5);
    }
}
