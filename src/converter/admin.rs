// ==========================================
// 档案著录迁移 - 位置 / 用户转换
// ==========================================

use crate::converter::context::ConversionContext;
use crate::converter::error::ConvertResult;
use crate::domain::source::{Location, User};
use crate::domain::target::TargetDocument;
use crate::domain::types::RecordKind;
use crate::engine::data_cleaner::fix_empty_string;

pub fn convert_location(ctx: &mut ConversionContext, record: &Location) -> ConvertResult<TargetDocument> {
    let mut doc = ctx.new_document(RecordKind::Location, record.source_id);

    doc.insert(
        "building",
        fix_empty_string(&record.building, Some("Unknown Building")),
    );
    for (key, value) in [
        ("floor", &record.floor),
        ("room", &record.room),
        ("area", &record.area),
        ("barcode", &record.barcode),
        ("classification", &record.classification_number),
        ("coordinate_1_label", &record.coordinate_1_label),
        ("coordinate_1_indicator", &record.coordinate_1),
        ("coordinate_2_label", &record.coordinate_2_label),
        ("coordinate_2_indicator", &record.coordinate_2),
        ("coordinate_3_label", &record.coordinate_3_label),
        ("coordinate_3_indicator", &record.coordinate_3),
    ] {
        doc.insert(key, value.clone());
    }

    Ok(doc)
}

pub fn convert_user(ctx: &mut ConversionContext, record: &User) -> ConvertResult<TargetDocument> {
    let mut doc = ctx.new_document(RecordKind::User, record.source_id);

    doc.insert("username", record.username.trim());
    doc.insert(
        "name",
        fix_empty_string(&record.full_name, Some("full name no entered")),
    );
    doc.insert("email", record.email.clone());
    doc.insert("title", record.title.clone());
    doc.insert("department", record.department.clone());

    Ok(doc)
}
