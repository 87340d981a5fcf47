// ==========================================
// 档案著录迁移 - 命令行入口
// ==========================================
// 用法:
//   archives-migration <input.json> [output.json] [config.json]
//
// input.json: 源记录 JSON 数组（每条带 "kind" 字段）
// output.json: 省略时输出到标准输出
// ==========================================

use archives_migration::converter::{ConversionContext, ConversionRun, RecordConverter};
use archives_migration::{logging, MapperConfig, SourceRecord};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let input_path = args
        .next()
        .map(PathBuf::from)
        .ok_or("usage: archives-migration <input.json> [output.json] [config.json]")?;
    let output_path = args.next().map(PathBuf::from);
    let config_path = args.next().map(PathBuf::from);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", archives_migration::APP_NAME, archives_migration::VERSION);
    tracing::info!("==================================================");

    let config = MapperConfig::resolve(config_path.as_deref())?;
    let context = ConversionContext::from_config(config)?;

    let raw = fs::read_to_string(&input_path)?;
    let records: Vec<SourceRecord> = serde_json::from_str(&raw)?;
    tracing::info!(path = %input_path.display(), records = records.len(), "读取源记录");

    let mut run = ConversionRun::new(context, RecordConverter::default());
    let converted = run.convert_all(&records);
    let report = run.finish();

    let output = Value::Array(converted.iter().map(|r| r.to_json()).collect());
    let rendered = serde_json::to_string_pretty(&output)?;
    match &output_path {
        Some(path) => {
            fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), documents = converted.len(), "写出目标文档");
        }
        None => println!("{}", rendered),
    }

    for failure in &report.failures {
        tracing::error!(
            kind = %failure.kind,
            source_id = failure.source_id,
            "失败: {}",
            failure.message
        );
    }
    tracing::info!(
        converted = report.converted,
        skipped = report.skipped,
        failed = report.failed(),
        diagnostics = report.diagnostics.len(),
        "运行汇总"
    );

    Ok(())
}
