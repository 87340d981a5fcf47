// ==========================================
// 档案著录迁移 - 数字对象转换
// ==========================================
// 职责: 数字对象 / 数字对象组件 → 目标文档（含文件版本列表）
// 红线: 仅数字对象本身进入标识登记表；组件标识使用随机后备值
// ==========================================

use crate::converter::common::{add_language, insert_dates, insert_notes, reference};
use crate::converter::context::ConversionContext;
use crate::converter::error::ConvertResult;
use crate::domain::date::DateRange;
use crate::domain::source::{ArchDescription, DigitalObject, DigitalObjectComponent, FileVersion};
use crate::domain::target::TargetDocument;
use crate::domain::types::RecordKind;
use crate::engine::data_cleaner::{fix_empty_string, non_blank};
use crate::engine::date_normalizer::{DateNormalizer, SummaryDate};
use crate::engine::note_builder::{NoteModelBuilder, NoteOwner};
use crate::resolver::EnumCategory;
use serde_json::{json, Value};

/// 数字对象日期标签
const DIGITIZED_LABEL: &str = "digitized";

pub fn convert_digital_object(
    ctx: &mut ConversionContext,
    record: &DigitalObject,
) -> ConvertResult<TargetDocument> {
    let description = &record.description;
    let mut doc = ctx.new_document(RecordKind::DigitalObject, record.source_id);

    doc.insert("title", fix_empty_string(&record.object_label, None));
    add_language(ctx, &mut doc, &description.language_code)?;

    let dates = digitized_dates(
        ctx,
        description,
        &format!("Digital Object: {}", record.mets_identifier),
    );
    insert_dates(&mut doc, &dates)?;

    doc.insert("file_versions", file_versions(ctx, &record.file_versions)?);
    doc.insert(
        "digital_object_id",
        ctx.unique_digital_object_id(&record.mets_identifier),
    );

    if let Some(object_type) =
        ctx.resolve_present(EnumCategory::DigitalObjectType, &record.object_type)?
    {
        doc.insert("digital_object_type", object_type);
    }

    doc.insert("restrictions", record.restrictions_apply);

    let notes =
        NoteModelBuilder::build_notes(description, NoteOwner::DigitalObject, &mut ctx.lookup())?;
    insert_notes(&mut doc, &notes)?;

    Ok(doc)
}

pub fn convert_digital_object_component(
    ctx: &mut ConversionContext,
    record: &DigitalObjectComponent,
) -> ConvertResult<TargetDocument> {
    let description = &record.description;
    let mut doc = ctx.new_document(RecordKind::DigitalObjectComponent, record.source_id);

    doc.insert("title", fix_empty_string(&record.object_label, None));
    add_language(ctx, &mut doc, &description.language_code)?;
    doc.insert("file_versions", file_versions(ctx, &record.file_versions)?);
    doc.insert("label", record.label.clone());

    let fallback = format!("ID_{}", ctx.token());
    let component_id = fix_empty_string(&record.component_id, Some(&fallback));

    let dates = digitized_dates(
        ctx,
        description,
        &format!("Digital Object Component: {}", component_id),
    );
    insert_dates(&mut doc, &dates)?;
    doc.insert("component_id", component_id);

    let notes =
        NoteModelBuilder::build_notes(description, NoteOwner::DigitalObject, &mut ctx.lookup())?;
    insert_notes(&mut doc, &notes)?;

    Ok(doc)
}

/// 文件版本列表
pub fn file_versions(
    ctx: &mut ConversionContext,
    versions: &[FileVersion],
) -> ConvertResult<Vec<Value>> {
    let mut converted = Vec::with_capacity(versions.len());
    for version in versions {
        converted.push(json!({
            "file_uri": version.uri,
            "use_statement": ctx.resolve(EnumCategory::FileVersionUseStatement, &version.use_statement)?,
            "xlink_actuate_attribute": version.ead_dao_actuate,
            "xlink_show_attribute": version.ead_dao_show,
        }));
    }
    Ok(converted)
}

/// 数字对象实例引用（URI 空白时为 None）
pub fn digital_instance(digital_object_uri: &str) -> Option<Value> {
    non_blank(digital_object_uri).map(|uri| {
        json!({
            "instance_type": "digital_object",
            "digital_object": reference(uri),
        })
    })
}

/// 数字对象只取摘要日期（无 bulk,无结构化日期）
fn digitized_dates(
    ctx: &mut ConversionContext,
    description: &ArchDescription,
    record_identifier: &str,
) -> Vec<DateRange> {
    let summary = SummaryDate {
        expression: &description.date_expression,
        begin: description.date_begin,
        end: description.date_end,
        ..SummaryDate::default()
    };
    DateNormalizer::summary_dates(&summary, DIGITIZED_LABEL, record_identifier, ctx.sink())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostic::DiagnosticKind;
    use crate::domain::source::SourceNote;

    fn digital_object(mets: &str) -> DigitalObject {
        DigitalObject {
            source_id: 40,
            mets_identifier: mets.to_string(),
            object_type: "still image".to_string(),
            file_versions: vec![FileVersion {
                uri: "http://example.org/img.tif".to_string(),
                use_statement: "Image-Master".to_string(),
                ead_dao_actuate: "onRequest".to_string(),
                ead_dao_show: "new".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_digital_object_fields() {
        let mut ctx = ConversionContext::with_defaults();
        let mut record = digital_object("mets-1");
        record.description.date_begin = Some(2000);
        record.description.notes.push(SourceNote {
            note_type: "General note".to_string(),
            content: "scanned".to_string(),
            ..Default::default()
        });

        let doc = convert_digital_object(&mut ctx, &record).unwrap();
        assert_eq!(doc.get_str("title"), Some("unspecified"));
        assert_eq!(doc.get_str("digital_object_id"), Some("mets-1"));
        assert_eq!(doc.get_str("digital_object_type"), Some("still_image"));
        assert_eq!(doc.get("dates").unwrap()[0]["label"], "digitized");
        assert_eq!(
            doc.get("file_versions").unwrap()[0]["use_statement"],
            "image-master"
        );
        assert_eq!(
            doc.get("notes").unwrap()[0]["jsonmodel_type"],
            "note_digital_object"
        );
    }

    #[test]
    fn test_duplicate_digital_object_ids_disambiguated() {
        let mut ctx = ConversionContext::with_defaults();
        let first = convert_digital_object(&mut ctx, &digital_object("mets-2")).unwrap();
        let second = convert_digital_object(&mut ctx, &digital_object("mets-2")).unwrap();

        assert_eq!(first.get_str("digital_object_id"), Some("mets-2"));
        assert_ne!(second.get_str("digital_object_id"), Some("mets-2"));
        assert_eq!(
            ctx.diagnostics().count_of(DiagnosticKind::IdentifierDuplicate),
            1
        );
    }

    #[test]
    fn test_component_id_fallback() {
        let mut ctx = ConversionContext::with_defaults();
        let component = DigitalObjectComponent {
            source_id: 41,
            label: "page 1".to_string(),
            ..Default::default()
        };

        let doc = convert_digital_object_component(&mut ctx, &component).unwrap();
        assert!(doc.get_str("component_id").unwrap().starts_with("ID_"));
        assert_eq!(doc.get_str("label"), Some("page 1"));
        assert_eq!(doc.get_str("title"), Some("unspecified"));
        assert!(!doc.contains_key("digital_object_id"));
    }

    #[test]
    fn test_digital_instance_reference() {
        assert!(digital_instance("  ").is_none());
        let instance = digital_instance("/repositories/2/digital_objects/9").unwrap();
        assert_eq!(instance["instance_type"], "digital_object");
        assert_eq!(
            instance["digital_object"]["ref"],
            "/repositories/2/digital_objects/9"
        );
    }
}
