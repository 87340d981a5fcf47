// ==========================================
// 档案著录迁移 - 全宗 / 组件转换
// ==========================================
// 职责: 全宗 → 目标全宗文档（含检索工具元数据）
//       组件 → 目标档案对象文档
// 红线: 全宗号经标识登记表保证唯一；EAD 号按检索工具类别去重
//       组件 ref_id 每次生成都带新随机标记,不进入标识登记表
// ==========================================

use crate::converter::common::{
    add_language, deaccessions, external_documents, insert_dates, insert_notes, part_extents,
    present, user_defined, whole_extent, UserDefinedScope,
};
use crate::converter::context::ConversionContext;
use crate::converter::error::ConvertResult;
use crate::domain::source::{Resource, ResourceComponent};
use crate::domain::target::TargetDocument;
use crate::domain::types::{IdentifierClass, RecordKind};
use crate::engine::data_cleaner::{fix_empty_string, UNSPECIFIED};
use crate::engine::date_normalizer::{DateNormalizer, SummaryDate};
use crate::engine::note_builder::{NoteModelBuilder, NoteOwner};
use crate::resolver::EnumCategory;
use tracing::debug;

/// 层级取值: 需要附带 other_level
const OTHER_LEVEL: &str = "otherlevel";

pub fn convert_resource(
    ctx: &mut ConversionContext,
    record: &Resource,
) -> ConvertResult<TargetDocument> {
    let description = &record.description;
    let mut doc = ctx.new_document(RecordKind::Resource, record.source_id);

    doc.insert("title", fix_empty_string(&description.title, None));
    add_language(ctx, &mut doc, &description.language_code)?;

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
    let resource_identifier = record.resource_identifier();
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
        &format!("Resource: {}", resource_identifier),
        &mut ctx.lookup(),
    )?;
    insert_dates(&mut doc, &dates)?;

    // 后续组件诊断引用
    ctx.set_current_resource(resource_identifier);

    if !description.external_references.is_empty() {
        doc.insert(
            "external_documents",
            external_documents(&description.external_references),
        );
    }

    // 标识
    let key = ctx.register_segments(
        IdentifierClass::Resource,
        &[
            &record.resource_identifier_1,
            &record.resource_identifier_2,
            &record.resource_identifier_3,
            &record.resource_identifier_4,
        ],
    );
    for (index, segment) in key.padded().into_iter().enumerate() {
        doc.insert(&format!("id_{}", index), segment);
    }

    insert_level(ctx, &mut doc, EnumCategory::ResourceLevel, &record.level, &record.other_level)?;

    doc.insert("publish", !record.internal_only);
    doc.insert(
        "repository_processing_note",
        record.repository_processing_note.clone(),
    );
    doc.insert("container_summary", record.container_summary.clone());

    // 检索工具 (EAD)
    let ead_id = ctx.unique_ead_id(&record.ead_fa_unique_identifier);
    doc.insert("ead_id", ead_id);
    doc.insert("ead_location", record.ead_fa_location.clone());
    doc.insert(
        "finding_aid_title",
        format!("{}\n{}", record.finding_aid_title, record.finding_aid_subtitle),
    );
    doc.insert("finding_aid_date", record.finding_aid_date.clone());
    doc.insert("finding_aid_author", record.author.clone());

    if let Some(rules) = &record.description_rules {
        doc.insert(
            "finding_aid_description_rules",
            ctx.resolve(EnumCategory::FindingAidDescriptionRules, rules)?,
        );
    }

    doc.insert("finding_aid_language", record.language_of_finding_aid.clone());
    doc.insert("finding_aid_sponsor", record.sponsor_note.clone());
    doc.insert(
        "finding_aid_edition_statement",
        record.edition_statement.clone(),
    );
    doc.insert("finding_aid_series_statement", record.series.clone());
    doc.insert("finding_aid_revision_date", record.revision_date.clone());
    doc.insert(
        "finding_aid_revision_description",
        record.revision_description.clone(),
    );

    if let Some(status) = &record.finding_aid_status {
        doc.insert(
            "finding_aid_status",
            ctx.resolve(EnumCategory::FindingAidStatus, status)?,
        );
    }

    doc.insert("finding_aid_note", record.finding_aid_note.clone());

    if !record.deaccessions.is_empty() {
        doc.insert("deaccessions", deaccessions(ctx, &record.deaccessions)?);
    }

    let notes = NoteModelBuilder::build_notes(description, NoteOwner::Archival, &mut ctx.lookup())?;
    insert_notes(&mut doc, &notes)?;

    doc.insert(
        "user_defined",
        user_defined(&record.user_defined, UserDefinedScope::Resource),
    );

    debug!(
        source_id = record.source_id,
        resource = %key.full_id(),
        notes = notes.len(),
        "全宗转换完成"
    );
    Ok(doc)
}

pub fn convert_resource_component(
    ctx: &mut ConversionContext,
    record: &ResourceComponent,
) -> ConvertResult<TargetDocument> {
    let description = &record.description;
    let mut doc = ctx.new_document(RecordKind::ResourceComponent, record.source_id);

    add_language(ctx, &mut doc, &description.language_code)?;

    let record_identifier = format!(
        "Resource Component: {}/{}",
        ctx.current_resource(),
        record.persistent_id
    );
    let summary = SummaryDate {
        expression: &description.date_expression,
        begin: description.date_begin,
        end: description.date_end,
        ..SummaryDate::default()
    };
    let dates = DateNormalizer::collect(
        &summary,
        &description.dates,
        "other",
        &record_identifier,
        &mut ctx.lookup(),
    )?;

    // 无日期且无标题时标题不可为空
    let title = if dates.is_empty() {
        fix_empty_string(&description.title, None)
    } else {
        description.title.clone()
    };
    doc.insert("title", title);
    insert_dates(&mut doc, &dates)?;

    doc.insert(
        "ref_id",
        format!("{}_{}", record.persistent_id, ctx.token()),
    );

    insert_level(
        ctx,
        &mut doc,
        EnumCategory::ArchivalObjectLevel,
        &record.level,
        &record.other_level,
    )?;

    doc.insert_opt("component_id", present(&record.component_unique_identifier));
    doc.insert("position", record.sequence_number);

    // 附注（无数量类型时容器摘要作为附注保留）
    let mut notes =
        NoteModelBuilder::build_notes(description, NoteOwner::Archival, &mut ctx.lookup())?;
    let has_extent_type = !record.extent_type.trim().is_empty();
    if !has_extent_type && !record.container_summary.trim().is_empty() {
        notes.push(NoteModelBuilder::container_summary_note(
            &record.container_summary,
        ));
    }
    insert_notes(&mut doc, &notes)?;

    // 数量
    let mut extents = Vec::new();
    if has_extent_type {
        extents.push(whole_extent(
            ctx,
            record.extent_number,
            &record.extent_type,
            &record.container_summary,
        )?);
    }
    extents.extend(part_extents(ctx, &description.physical_descriptions)?);
    if !extents.is_empty() {
        doc.insert("extents", extents);
    }

    Ok(doc)
}

/// 层级 + other_level
fn insert_level(
    ctx: &mut ConversionContext,
    doc: &mut TargetDocument,
    category: EnumCategory,
    level: &str,
    other_level: &str,
) -> ConvertResult<()> {
    let level = ctx.resolve(category, level)?;
    if level == OTHER_LEVEL {
        doc.insert("other_level", fix_empty_string(other_level, Some(UNSPECIFIED)));
    }
    doc.insert("level", level);
    Ok(())
}
