// ==========================================
// 差旅数据分析系统 - 演示入口
// ==========================================
// 用法: travel-analytics <输入JSON> [配置JSON]
// 输入: {"attendance": [...], "flight": [...], "hotel": [...], "rail": [...]}
// 输出: Dashboard 分析结果 JSON（stdout）
// ==========================================

use anyhow::{Context, Result};
use serde_json::Value;
use travel_analytics::{
    logging, AnalysisConfig, AnalysisInputs, RawTable, SourceKind, TravelAnalyzer,
};

fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", travel_analytics::APP_NAME, travel_analytics::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let input_path = args
        .next()
        .context("用法: travel-analytics <输入JSON> [配置JSON]")?;
    let config_path = args.next();

    // 加载配置（可选,缺省字段回落到默认值）
    let config = match config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("配置文件读取失败: {}", path))?;
            serde_json::from_str::<AnalysisConfig>(&raw)
                .with_context(|| format!("配置文件解析失败: {}", path))?
        }
        None => AnalysisConfig::default(),
    };

    // 加载四张输入表,缺失的表按空表处理
    let raw = std::fs::read_to_string(&input_path)
        .with_context(|| format!("输入文件读取失败: {}", input_path))?;
    let document: Value =
        serde_json::from_str(&raw).with_context(|| format!("输入文件解析失败: {}", input_path))?;

    let inputs = AnalysisInputs {
        attendance: load_table(&document, "attendance", SourceKind::Attendance)?,
        flight: load_table(&document, "flight", SourceKind::Flight)?,
        hotel: load_table(&document, "hotel", SourceKind::Hotel)?,
        rail: load_table(&document, "rail", SourceKind::Rail)?,
    };

    let analyzer = TravelAnalyzer::new(config);
    let dashboard = analyzer.analyze(&inputs)?;

    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}

/// 按语义名取出单表,键缺失等价于空表
fn load_table(document: &Value, key: &str, source_kind: SourceKind) -> Result<RawTable> {
    match document.get(key) {
        Some(value) => Ok(RawTable::from_json(source_kind, value)?),
        None => Ok(RawTable::empty()),
    }
}
