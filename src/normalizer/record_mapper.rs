// ==========================================
// 差旅数据分析系统 - 记录映射器
// ==========================================
// 职责: 原始表行 → 规范化记录,按源施加列级结构契约
// 契约: 非空差旅表必须有"授信金额"列;考勤表整体可降级
// ==========================================

use crate::domain::expense::{AttendanceRecord, UnifiedExpenseRecord};
use crate::domain::types::{AttendanceStatus, SourceKind, TravelType};
use crate::error::AnalysisResult;
use crate::normalizer::field_cleaner::FieldCleaner;
use crate::normalizer::quality::QualityReport;
use crate::normalizer::table::{cell, RawRow, RawTable};
use tracing::{debug, instrument, warn};

// 差旅表公共列名
const COL_PERSON: &str = "差旅人员姓名";
const COL_DEPARTMENT: &str = "一级部门";
const COL_PROJECT: &str = "项目";
const COL_AMOUNT: &str = "授信金额";
const COL_ADVANCE_DAYS: &str = "提前预定天数";
const COL_VIOLATION_TYPE: &str = "超标类型";
const COL_OVER_STANDARD: &str = "是否超标";

// 考勤表列名（"一级部门"与差旅表同名复用）
const COL_ATT_PERSON: &str = "姓名";
const COL_ATT_DEPARTMENT: &str = COL_DEPARTMENT;
const COL_ATT_DATE: &str = "日期";
const COL_ATT_STATUS: &str = "当日状态判断";
const COL_ATT_HOURS: &str = "工时";

pub struct RecordMapper;

impl RecordMapper {
    // ==========================================
    // 差旅表规范化
    // ==========================================

    /// 规范化单张差旅表（机票/酒店/火车票）
    ///
    /// 空表返回零行。非空表缺少"授信金额"列是结构性错误,
    /// 其余脏数据全部就地降级并计入质量报告。
    #[instrument(skip(table, quality), fields(rows = table.len(), travel_type = %travel_type))]
    pub fn normalize_expense_table(
        table: &RawTable,
        source_kind: SourceKind,
        travel_type: TravelType,
        quality: &mut QualityReport,
    ) -> AnalysisResult<Vec<UnifiedExpenseRecord>> {
        if table.is_empty() {
            warn!("{} 数据为空", travel_type);
            return Ok(Vec::new());
        }

        table.require_columns(source_kind, &[COL_AMOUNT])?;

        // 超标规则的回落按整表判定: 仅在全表无"超标类型"列时改用"是否超标"
        let has_violation_type = table.has_column(COL_VIOLATION_TYPE);

        let records: Vec<UnifiedExpenseRecord> = table
            .rows()
            .iter()
            .map(|row| Self::map_expense_row(row, travel_type, has_violation_type, quality))
            .collect();

        let total: f64 = records.iter().map(|r| r.amount).sum();
        debug!(
            "{} 数据规范化完成: {} 条, 总金额 {:.2}",
            travel_type,
            records.len(),
            total
        );

        Ok(records)
    }

    /// 判断差旅表是否带"提前预定天数"列（预订行为统计的前置条件）
    pub fn has_advance_days_column(table: &RawTable) -> bool {
        table.has_column(COL_ADVANCE_DAYS)
    }

    fn map_expense_row(
        row: &RawRow,
        travel_type: TravelType,
        has_violation_type: bool,
        quality: &mut QualityReport,
    ) -> UnifiedExpenseRecord {
        let person = Self::identifier(row, COL_PERSON, quality);
        let department = Self::identifier(row, COL_DEPARTMENT, quality);

        let project_raw = cell(row, COL_PROJECT).map(|s| s.to_string());
        let (project_code, _) = FieldCleaner::extract_project(project_raw.as_deref());
        if project_code == crate::domain::types::UNKNOWN {
            quality.unknown_projects += 1;
        }

        let amount = match FieldCleaner::parse_amount(cell(row, COL_AMOUNT)) {
            Some(v) => v,
            None => {
                quality.invalid_amounts += 1;
                debug!("金额解析失败, 降级为 0.0: {:?}", cell(row, COL_AMOUNT));
                0.0
            }
        };
        if project_code == crate::domain::types::UNKNOWN {
            quality.unknown_project_amount += amount;
        }

        // 统一消费日期: 机票/火车票取出发日期, 酒店取入住日期
        let date_raw = cell(row, travel_type.date_column());
        let consumption_date = FieldCleaner::parse_date(date_raw);
        if date_raw.is_some() && consumption_date.is_none() {
            quality.invalid_dates += 1;
        }

        let advance_days = FieldCleaner::parse_advance_days(cell(row, COL_ADVANCE_DAYS));
        let over_standard = Self::is_over_standard(row, travel_type, has_violation_type);

        UnifiedExpenseRecord {
            person,
            department,
            project_raw,
            project_code,
            amount,
            consumption_date,
            travel_type,
            advance_days,
            over_standard,
        }
    }

    /// 按类型专属规则判定超标
    ///
    /// 机票: "超标类型"含"超折扣"或"超时间"（全表无此列时回落到"是否超标",
    /// 列存在但单元格为空的行不超标）
    /// 酒店/火车票: "是否超标"含"是"
    fn is_over_standard(row: &RawRow, travel_type: TravelType, has_violation_type: bool) -> bool {
        match travel_type {
            TravelType::Flight if has_violation_type => cell(row, COL_VIOLATION_TYPE)
                .map(|v| v.contains("超折扣") || v.contains("超时间"))
                .unwrap_or(false),
            TravelType::Flight | TravelType::Hotel | TravelType::Rail => {
                Self::contains_yes(row, COL_OVER_STANDARD)
            }
        }
    }

    fn contains_yes(row: &RawRow, column: &str) -> bool {
        cell(row, column).map(|v| v.contains('是')).unwrap_or(false)
    }

    // ==========================================
    // 考勤表规范化
    // ==========================================

    /// 规范化考勤表
    ///
    /// 考勤缺列不阻断整体分析（交叉验证自行退化为空结果）,
    /// 因此不施加结构契约,全部走降级路径。
    #[instrument(skip(table, quality), fields(rows = table.len()))]
    pub fn normalize_attendance_table(
        table: &RawTable,
        quality: &mut QualityReport,
    ) -> Vec<AttendanceRecord> {
        if table.is_empty() {
            warn!("考勤数据为空");
            return Vec::new();
        }

        let records: Vec<AttendanceRecord> = table
            .rows()
            .iter()
            .map(|row| Self::map_attendance_row(row, quality))
            .collect();

        debug!("考勤数据规范化完成: {} 条", records.len());
        records
    }

    fn map_attendance_row(row: &RawRow, quality: &mut QualityReport) -> AttendanceRecord {
        let person = Self::identifier(row, COL_ATT_PERSON, quality);
        let department = Self::identifier(row, COL_ATT_DEPARTMENT, quality);

        let date_raw = cell(row, COL_ATT_DATE);
        let date = FieldCleaner::parse_date(date_raw);
        if date_raw.is_some() && date.is_none() {
            quality.invalid_dates += 1;
        }

        let status_raw = FieldCleaner::clean_identifier(cell(row, COL_ATT_STATUS));
        let status = AttendanceStatus::classify(&status_raw);
        let work_hours = FieldCleaner::parse_hours(cell(row, COL_ATT_HOURS));

        AttendanceRecord {
            person,
            department,
            date,
            status_raw,
            status,
            work_hours,
        }
    }

    /// 标识字段清洗并计数降级事件
    fn identifier(row: &RawRow, column: &str, quality: &mut QualityReport) -> String {
        let raw = cell(row, column);
        if raw.is_none() {
            quality.unknown_identifiers += 1;
        }
        FieldCleaner::clean_identifier(raw)
    }
}
