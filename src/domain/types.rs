// ==========================================
// 差旅数据分析系统 - 领域类型定义
// ==========================================
// 职责: 差旅类型 / 考勤状态 / 异常类型枚举
// 红线: 状态分类只在此处定义一次,各组件复用
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 标识字段缺失时的统一哨兵值
///
/// 项目代码 / 姓名 / 部门等字段无法解析时填入此值。
/// 下游约定: 项目代码为哨兵的行被排除在项目成本表外(单独记账),
/// 部门为哨兵的行被排除在部门指标外(不记账)。
pub const UNKNOWN: &str = "未知";

// ==========================================
// 差旅类型 (Travel Type)
// ==========================================
// 每条统一差旅记录恰好属于一种类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelType {
    Flight, // 机票
    Hotel,  // 酒店
    Rail,   // 火车票
}

impl TravelType {
    /// 三种类型的固定合并顺序（机票 → 酒店 → 火车票）
    pub const ALL: [TravelType; 3] = [TravelType::Flight, TravelType::Hotel, TravelType::Rail];

    /// 类型专用的消费日期列名
    pub fn date_column(&self) -> &'static str {
        match self {
            TravelType::Flight | TravelType::Rail => "出发日期",
            TravelType::Hotel => "入住日期",
        }
    }
}

impl fmt::Display for TravelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelType::Flight => write!(f, "机票"),
            TravelType::Hotel => write!(f, "酒店"),
            TravelType::Rail => write!(f, "火车票"),
        }
    }
}

// ==========================================
// 考勤状态分类 (Attendance Status)
// ==========================================
// 原始"当日状态判断"为自由文本,按子串归类,
// 分类逻辑集中在 classify,禁止各组件自行做子串判断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,   // 上班
    Traveling, // 出差
    Leave,     // 请假/休息
    Unknown,   // 无法判断
}

impl AttendanceStatus {
    /// 从自由文本状态归类
    ///
    /// 匹配顺序: 上班 → 出差 → 请假/休 → Unknown。
    /// 文本同时含多个关键词时以先命中者为准。
    pub fn classify(raw: &str) -> Self {
        if raw.contains("上班") {
            AttendanceStatus::Present
        } else if raw.contains("出差") {
            AttendanceStatus::Traveling
        } else if raw.contains("请假") || raw.contains("休") {
            AttendanceStatus::Leave
        } else {
            AttendanceStatus::Unknown
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "上班"),
            AttendanceStatus::Traveling => write!(f, "出差"),
            AttendanceStatus::Leave => write!(f, "请假"),
            AttendanceStatus::Unknown => write!(f, "未知"),
        }
    }
}

// ==========================================
// 异常类型 (Anomaly Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyKind {
    /// 考勤显示上班但同日有异地差旅消费
    Conflict,
    /// 考勤显示出差但时间窗内无任何差旅消费
    /// 默认关闭: 出差不一定产生系统内消费(对方承担交通/本地出差)
    NoExpense,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyKind::Conflict => write!(f, "Conflict"),
            AnomalyKind::NoExpense => write!(f, "NoExpense"),
        }
    }
}

// ==========================================
// 数据源类型 (Source Kind)
// ==========================================
// 四张输入表的固定语义名,用于错误报告与日志
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Attendance,
    Flight,
    Hotel,
    Rail,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Attendance => write!(f, "考勤"),
            SourceKind::Flight => write!(f, "机票"),
            SourceKind::Hotel => write!(f, "酒店"),
            SourceKind::Rail => write!(f, "火车票"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_present() {
        assert_eq!(AttendanceStatus::classify("正常上班"), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::classify("上班(补卡)"), AttendanceStatus::Present);
    }

    #[test]
    fn test_classify_traveling() {
        assert_eq!(AttendanceStatus::classify("出差"), AttendanceStatus::Traveling);
        assert_eq!(AttendanceStatus::classify("外地出差-北京"), AttendanceStatus::Traveling);
    }

    #[test]
    fn test_classify_leave_and_unknown() {
        assert_eq!(AttendanceStatus::classify("请假"), AttendanceStatus::Leave);
        assert_eq!(AttendanceStatus::classify("调休"), AttendanceStatus::Leave);
        assert_eq!(AttendanceStatus::classify("未知"), AttendanceStatus::Unknown);
        assert_eq!(AttendanceStatus::classify(""), AttendanceStatus::Unknown);
    }

    #[test]
    fn test_travel_type_date_column() {
        assert_eq!(TravelType::Flight.date_column(), "出发日期");
        assert_eq!(TravelType::Hotel.date_column(), "入住日期");
        assert_eq!(TravelType::Rail.date_column(), "出发日期");
    }
}
