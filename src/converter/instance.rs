// ==========================================
// 档案著录迁移 - 实例转换
// ==========================================
// 职责: 实物实例（容器 1..3 + 当前位置）与登记占位实例
// ==========================================

use crate::converter::common::{user_defined, UserDefinedScope};
use crate::converter::context::ConversionContext;
use crate::converter::error::ConvertResult;
use crate::domain::source::AnalogInstance;
use crate::domain::target::TargetDocument;
use crate::domain::types::RecordKind;
use crate::engine::data_cleaner::{fix_empty_string, non_blank};
use crate::resolver::EnumCategory;
use chrono::Local;
use serde_json::{json, Map, Value};

/// 容器号空白占位
pub const NOT_SPECIFIED: &str = "not specified";

/// 当前位置状态
const CURRENT_STATUS: &str = "current";

pub fn convert_analog_instance(
    ctx: &mut ConversionContext,
    record: &AnalogInstance,
) -> ConvertResult<TargetDocument> {
    let mut doc = ctx.new_document(RecordKind::AnalogInstance, record.source_id);

    doc.insert(
        "instance_type",
        ctx.resolve(EnumCategory::InstanceType, &record.instance_type)?,
    );

    let mut container = Map::new();
    container.insert(
        "type_1".into(),
        json!(ctx.resolve(EnumCategory::ContainerType, &record.container_1_type)?),
    );
    container.insert(
        "indicator_1".into(),
        json!(fix_empty_string(&record.container_1_indicator, Some(NOT_SPECIFIED))),
    );
    container.insert("barcode_1".into(), json!(record.barcode));

    let nested = [
        ("2", &record.container_2_type, &record.container_2_indicator),
        ("3", &record.container_3_type, &record.container_3_indicator),
    ];
    for (level, container_type, indicator) in nested {
        if non_blank(container_type).is_none() {
            continue;
        }
        container.insert(
            format!("type_{}", level),
            json!(ctx.resolve(EnumCategory::ContainerType, container_type)?),
        );
        container.insert(
            format!("indicator_{}", level),
            json!(fix_empty_string(indicator, Some(NOT_SPECIFIED))),
        );
    }

    if let Some(location_uri) = record.location_uri.as_deref().and_then(non_blank) {
        container.insert(
            "container_locations".into(),
            json!([{
                "status": CURRENT_STATUS,
                "start_date": today(),
                "ref": location_uri,
            }]),
        );
    }

    doc.insert("container", Value::Object(container));
    doc.insert(
        "user_defined",
        user_defined(&record.user_defined, UserDefinedScope::AnalogInstance),
    );

    Ok(doc)
}

/// 登记占位实例（登记号作为容器号,位置附注挂在当前位置上）
///
/// # 参数
/// - accession_number: 登记号显示形式
/// - location_uri: 已上传的位置 URI
/// - location_note: 位置附注
pub fn accession_instance(accession_number: &str, location_uri: &str, location_note: &str) -> Value {
    json!({
        "instance_type": "accession",
        "container": {
            "type_1": "item",
            "indicator_1": accession_number,
            "container_locations": [{
                "status": CURRENT_STATUS,
                "start_date": today(),
                "ref": location_uri,
                "note": location_note,
            }],
        },
    })
}

fn today() -> String {
    Local::now().date_naive().to_string()
}
