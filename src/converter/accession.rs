// ==========================================
// 档案著录迁移 - 登记记录转换
// ==========================================
// 职责: 登记 → 目标登记文档 + 伴随事件列表
// 红线: 登记日期缺失 → 跳过记录（RECORD_SKIPPED）
//       四段登记号经标识登记表左移补齐并保证唯一
// ==========================================

use crate::converter::common::{
    deaccessions, external_documents, insert_dates, part_extents, user_defined, whole_extent,
    UserDefinedScope,
};
use crate::converter::context::ConversionContext;
use crate::converter::error::ConvertResult;
use crate::domain::diagnostic::DiagnosticKind;
use crate::domain::source::Accession;
use crate::domain::target::TargetDocument;
use crate::domain::types::{IdentifierClass, RecordKind};
use crate::engine::data_cleaner::fix_empty_string;
use crate::engine::date_normalizer::{DateNormalizer, SummaryDate};
use crate::resolver::EnumCategory;
use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use tracing::debug;

/// # 返回
/// - Ok(None): 登记日期缺失（已写入 RECORD_SKIPPED 诊断）
pub fn convert_accession(
    ctx: &mut ConversionContext,
    record: &Accession,
) -> ConvertResult<Option<TargetDocument>> {
    let accession_number = record.accession_number();

    let accession_date = match record.accession_date {
        Some(date) => date,
        None => {
            ctx.report(
                DiagnosticKind::RecordSkipped,
                format!("Invalid Accession Date for {}", accession_number),
            );
            return Ok(None);
        }
    };

    let description = &record.description;
    let mut doc = ctx.new_document(RecordKind::Accession, record.source_id);

    doc.insert("title", fix_empty_string(&description.title, None));
    doc.insert("accession_date", accession_date.to_string());

    // 标识
    let key = ctx.register_segments(
        IdentifierClass::Accession,
        &[
            &record.accession_number_1,
            &record.accession_number_2,
            &record.accession_number_3,
            &record.accession_number_4,
        ],
    );
    for (index, segment) in key.padded().into_iter().enumerate() {
        doc.insert(&format!("id_{}", index), segment);
    }

    doc.insert("content_description", record.content_description.clone());
    doc.insert("condition_description", record.condition_note.clone());
    doc.insert("inventory", record.inventory.clone());

    // 数量
    let mut extents = vec![whole_extent(
        ctx,
        record.extent_number,
        &record.extent_type,
        &record.container_summary,
    )?];
    extents.extend(part_extents(ctx, &description.physical_descriptions)?);
    doc.insert("extents", extents);

    // 日期
    let summary = SummaryDate {
        expression: &description.date_expression,
        begin: description.date_begin,
        end: description.date_end,
        bulk_begin: record.bulk_date_begin,
        bulk_end: record.bulk_date_end,
    };
    let dates = DateNormalizer::collect(
        &summary,
        &description.dates,
        "other",
        &format!("Accession: {}", accession_number),
        &mut ctx.lookup(),
    )?;
    insert_dates(&mut doc, &dates)?;

    if !description.external_references.is_empty() {
        doc.insert(
            "external_documents",
            external_documents(&description.external_references),
        );
    }

    if !record.deaccessions.is_empty() {
        doc.insert("deaccessions", deaccessions(ctx, &record.deaccessions)?);
    }

    if record.rights_transferred == Some(true) {
        doc.insert("rights_statements", json!([rights_statement()]));
    }

    doc.insert("collection_management", collection_management(ctx, record)?);

    doc.insert("suppressed", record.internal_only);
    doc.insert(
        "acquisition_type",
        ctx.resolve(EnumCategory::AcquisitionType, &record.acquisition_type)?,
    );
    doc.insert(
        "resource_type",
        ctx.resolve(EnumCategory::AccessionResourceType, &record.resource_type)?,
    );
    doc.insert("restrictions_apply", record.restrictions_apply);
    doc.insert("retention_rule", record.retention_rule.clone());
    doc.insert("general_note", record.general_accession_note.clone());
    doc.insert("access_restrictions", record.access_restrictions);
    doc.insert("use_restrictions_note", record.access_restrictions_note.clone());
    doc.insert(
        "user_defined",
        user_defined(&record.user_defined, UserDefinedScope::Accession),
    );

    // 伴随事件
    let agent_uri = record
        .agent_uri
        .clone()
        .unwrap_or_else(|| ctx.config().placeholder_agent_uri.clone());
    let record_uri = record
        .record_uri
        .clone()
        .unwrap_or_else(|| ctx.config().placeholder_record_uri.clone());
    for event in accession_events(record, accession_date, &agent_uri, &record_uri) {
        doc.push_event(event);
    }

    debug!(
        source_id = record.source_id,
        accession = %key.full_id(),
        events = doc.events().len(),
        "登记转换完成"
    );
    Ok(Some(doc))
}

/// 版权转让声明
fn rights_statement() -> Value {
    json!({
        "rights_type": "intellectual_property",
        "ip_status": "copyrighted",
        "jurisdiction": "US",
    })
}

/// 馆藏管理子文档
fn collection_management(ctx: &mut ConversionContext, record: &Accession) -> ConvertResult<Value> {
    let mut map = Map::new();
    map.insert("cataloged_note".into(), json!(record.cataloged_note));
    map.insert("processing_plan".into(), json!(record.processing_plan));

    if let Some(priority) =
        ctx.resolve_present(EnumCategory::ProcessingPriority, &record.processing_priority)?
    {
        map.insert("processing_priority".into(), json!(priority));
    }
    if let Some(status) =
        ctx.resolve_present(EnumCategory::ProcessingStatus, &record.processing_status)?
    {
        map.insert("processing_status".into(), json!(status));
    }

    map.insert("processors".into(), json!(record.processors));
    map.insert(
        "rights_determined".into(),
        json!(record.rights_transferred.unwrap_or(false)),
    );
    Ok(Value::Object(map))
}

/// 里程碑标志 → 事件列表
///
/// # 参数
/// - accession_date: 事件自身日期缺失时的替代日期
/// - agent_uri / record_uri: 关联代理与关联记录引用
pub fn accession_events(
    record: &Accession,
    accession_date: NaiveDate,
    agent_uri: &str,
    record_uri: &str,
) -> Vec<Value> {
    let flagged = |flag: Option<bool>| flag == Some(true);

    let milestones: [(&str, bool, Option<NaiveDate>); 7] = [
        (
            "processed",
            flagged(record.accession_processed),
            record.accession_processed_date,
        ),
        (
            "acknowledgement_sent",
            flagged(record.acknowledgement_sent),
            record.acknowledgement_date,
        ),
        (
            "agreement_signed",
            flagged(record.agreement_received),
            record.agreement_received_date,
        ),
        (
            "agreement_sent",
            flagged(record.agreement_sent),
            record.agreement_sent_date,
        ),
        ("cataloged", flagged(record.cataloged), record.cataloged_date),
        (
            "processing_started",
            record.processing_started_date.is_some(),
            record.processing_started_date,
        ),
        (
            "copyright_transfer",
            flagged(record.rights_transferred),
            record.rights_transferred_date,
        ),
    ];

    milestones
        .into_iter()
        .filter(|(_, active, _)| *active)
        .map(|(event_type, _, date)| {
            let day = date.unwrap_or(accession_date).to_string();
            let mut event = json!({
                "event_type": event_type,
                "date": {
                    "date_type": "single",
                    "label": "other",
                    "begin": day,
                    "end": day,
                },
                "linked_agents": [{ "role": "recipient", "ref": agent_uri }],
                "linked_records": [{ "role": "source", "ref": record_uri }],
            });
            if event_type == "copyright_transfer" {
                event["outcome_note"] = json!(record.rights_transferred_note);
            }
            event
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostic::DiagnosticKind;

    fn accession(number_1: &str, number_2: &str) -> Accession {
        Accession {
            source_id: 10,
            accession_number_1: number_1.to_string(),
            accession_number_2: number_2.to_string(),
            accession_date: NaiveDate::from_ymd_opt(2001, 3, 4),
            extent_type: "Linear Feet".to_string(),
            acquisition_type: "Gift".to_string(),
            resource_type: "Papers".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_accession_date_skips_record() {
        let mut ctx = ConversionContext::with_defaults();
        let record = Accession {
            accession_date: None,
            ..accession("2001", "1")
        };

        assert!(convert_accession(&mut ctx, &record).unwrap().is_none());
        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(
            ctx.diagnostics().entries()[0].kind,
            DiagnosticKind::RecordSkipped
        );
        // 跳过的记录不占用标识
        assert_eq!(ctx.registry().registered_count(IdentifierClass::Accession), 0);
    }

    #[test]
    fn test_accession_core_fields() {
        let mut ctx = ConversionContext::with_defaults();
        let mut record = accession("", "15");
        record.description.date_begin = Some(1950);
        record.description.date_end = Some(1960);

        let doc = convert_accession(&mut ctx, &record).unwrap().unwrap();
        assert_eq!(doc.get_str("title"), Some("unspecified"));
        assert_eq!(doc.get_str("accession_date"), Some("2001-03-04"));
        assert_eq!(doc.get_str("id_0"), Some("15"));
        assert_eq!(doc.get_str("id_1"), Some(""));
        assert_eq!(doc.get("extents").unwrap()[0]["extent_type"], "linear_feet");
        assert_eq!(doc.get("dates").unwrap()[0]["date_type"], "inclusive");
        assert_eq!(doc.get_str("acquisition_type"), Some("gift"));
        assert!(!doc.contains_key("rights_statements"));
        assert_eq!(
            ctx.diagnostics().count_of(DiagnosticKind::IdentifierShifted),
            1
        );
    }

    #[test]
    fn test_duplicate_accessions_differ_on_first_segment() {
        let mut ctx = ConversionContext::with_defaults();
        let first = convert_accession(&mut ctx, &accession("2001", "7")).unwrap().unwrap();
        let second = convert_accession(&mut ctx, &accession("2001", "7")).unwrap().unwrap();

        assert_eq!(first.get_str("id_0"), Some("2001"));
        let second_id = second.get_str("id_0").unwrap();
        assert!(second_id.starts_with("2001 ##"));
        assert_eq!(second.get_str("id_1"), Some("7"));
    }

    #[test]
    fn test_events_and_rights() {
        let mut ctx = ConversionContext::with_defaults();
        let mut record = accession("2002", "1");
        record.accession_processed = Some(true);
        record.cataloged = Some(true);
        record.cataloged_date = NaiveDate::from_ymd_opt(2003, 1, 2);
        record.processing_started_date = NaiveDate::from_ymd_opt(2002, 5, 5);
        record.rights_transferred = Some(true);
        record.rights_transferred_note = "Transferred by deed".to_string();
        record.agreement_sent = Some(false);

        let doc = convert_accession(&mut ctx, &record).unwrap().unwrap();
        let events = doc.events();
        let types: Vec<&str> = events
            .iter()
            .map(|e| e["event_type"].as_str().unwrap())
            .collect();
        assert_eq!(
            types,
            vec!["processed", "cataloged", "processing_started", "copyright_transfer"]
        );

        // 无自身日期时取登记日期
        assert_eq!(events[0]["date"]["begin"], "2001-03-04");
        assert_eq!(events[1]["date"]["end"], "2003-01-02");
        assert_eq!(events[3]["outcome_note"], "Transferred by deed");
        assert_eq!(events[0]["linked_agents"][0]["ref"], "/agents/people/1");
        assert_eq!(events[0]["linked_records"][0]["role"], "source");

        assert_eq!(
            doc.get("rights_statements").unwrap()[0]["ip_status"],
            "copyrighted"
        );
        assert_eq!(
            doc.get("collection_management").unwrap()["rights_determined"],
            true
        );
    }
}
