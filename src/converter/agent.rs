// ==========================================
// 档案著录迁移 - 主题 / 名称 / 机构转换
// ==========================================
// 职责: 主题词、代理（个人/家族/团体）、机构及其团体代理
// 红线: 名称类型无法识别 → 跳过记录 + 一条诊断,不得中断运行
// ==========================================

use crate::converter::common::reference;
use crate::converter::context::ConversionContext;
use crate::converter::error::ConvertResult;
use crate::domain::diagnostic::DiagnosticKind;
use crate::domain::source::{Name, Repository, Subject};
use crate::domain::target::TargetDocument;
use crate::domain::types::{NameType, RecordKind};
use crate::engine::data_cleaner::{fix_empty_string, fix_url};
use crate::engine::note_builder::NoteModelBuilder;
use crate::resolver::EnumCategory;
use serde_json::{json, Map, Value};
use tracing::debug;

/// 主题词分隔符: "--"（两侧空白忽略）
fn split_terms(term: &str) -> Vec<String> {
    term.split("--").map(|t| t.trim().to_string()).collect()
}

// ==========================================
// 主题 (Subject)
// ==========================================
pub fn convert_subject(ctx: &mut ConversionContext, record: &Subject) -> ConvertResult<TargetDocument> {
    let mut doc = ctx.new_document(RecordKind::Subject, record.source_id);

    if !record.source.is_empty() {
        let source = ctx.resolve(EnumCategory::SubjectSource, &record.source)?;
        doc.insert("source", source);
    }

    let term_type = ctx.resolve(EnumCategory::SubjectTermType, &record.term_type)?;
    let vocabulary = ctx.config().vocabulary_uri.clone();

    let terms: Vec<Value> = split_terms(&record.term)
        .into_iter()
        .map(|term| {
            json!({
                "term": term,
                "term_type": term_type,
                "vocabulary": vocabulary,
            })
        })
        .collect();

    doc.insert("terms", terms);
    doc.insert("vocabulary", vocabulary);
    Ok(doc)
}

// ==========================================
// 名称 → 代理 (Name → Agent)
// ==========================================

/// # 返回
/// - Ok(None): 名称类型无法识别（已写入 RECORD_SKIPPED 诊断）
pub fn convert_name(ctx: &mut ConversionContext, record: &Name) -> ConvertResult<Option<TargetDocument>> {
    // 先判别类型,跳过的记录只产生一条诊断
    let name_type = match NameType::from_discriminant(&record.name_type) {
        Some(name_type) => name_type,
        None => {
            ctx.report(
                DiagnosticKind::RecordSkipped,
                format!(
                    "{}:: Unknown name type: {}",
                    record.sort_name, record.name_type
                ),
            );
            return Ok(None);
        }
    };

    let mut doc = ctx.new_document(RecordKind::Name, record.source_id);
    doc.insert("agent_type", name_type.agent_type());

    // 联系信息
    let mut contact = Map::new();
    if let Some(salutation) = ctx.probe(EnumCategory::Salutation, &record.salutation)? {
        contact.insert("salutation".into(), json!(salutation));
    }
    let c = &record.contact;
    for (key, value) in [
        ("address_1", &c.address_1),
        ("address_2", &c.address_2),
        ("city", &c.city),
        ("region", &c.region),
        ("country", &c.country),
        ("post_code", &c.mail_code),
        ("telephone", &c.phone),
        ("fax", &c.fax),
        ("email", &c.email),
    ] {
        contact.insert(key.into(), json!(value));
    }
    if let Some(note) = NoteModelBuilder::contact_note(&record.contact_notes) {
        contact.insert("note".into(), json!(note));
    }

    // 传记/历史附注
    let bioghist = NoteModelBuilder::bioghist_note(record, &mut ctx.lookup())?;
    if let Some(note) = bioghist {
        doc.insert_serialized("notes", &[note])?;
    }

    // 名称公共部分
    let mut names = Map::new();
    names.insert("authority_id".into(), json!("unknown"));
    names.insert("dates".into(), json!(record.personal_dates));
    names.insert("qualifier".into(), json!(record.qualifier));
    names.insert(
        "source".into(),
        json!(ctx.resolve(EnumCategory::NameSource, &record.name_source)?),
    );
    names.insert(
        "rules".into(),
        json!(ctx.resolve(EnumCategory::NameRule, &record.name_rule)?),
    );
    names.insert(
        "sort_name".into(),
        json!(fix_empty_string(&record.sort_name, None)),
    );

    let contact_name = match name_type {
        NameType::Person => {
            let primary_name = fix_empty_string(&record.personal_primary_name, None);
            names.insert("primary_name".into(), json!(primary_name));
            names.insert(
                "title".into(),
                json!(fix_empty_string(&record.personal_title, None)),
            );
            names.insert("name_order".into(), json!("direct"));
            names.insert("prefix".into(), json!(record.personal_prefix));
            names.insert("rest_of_name".into(), json!(record.personal_rest_of_name));
            names.insert("suffix".into(), json!(record.personal_suffix));
            names.insert("fuller_form".into(), json!(record.personal_fuller_form));
            names.insert("number".into(), json!(record.number));
            primary_name
        }
        NameType::Family => {
            let family_name = fix_empty_string(&record.family_name, None);
            names.insert("family_name".into(), json!(family_name));
            names.insert("prefix".into(), json!(record.family_name_prefix));
            family_name
        }
        NameType::CorporateBody => {
            let primary_name = fix_empty_string(&record.corporate_primary_name, None);
            names.insert("primary_name".into(), json!(primary_name));
            names.insert(
                "subordinate_name_1".into(),
                json!(record.corporate_subordinate_1),
            );
            names.insert(
                "subordinate_name_2".into(),
                json!(record.corporate_subordinate_2),
            );
            names.insert("number".into(), json!(record.number));
            primary_name
        }
    };
    contact.insert("name".into(), json!(contact_name));

    doc.insert("agent_contacts", json!([Value::Object(contact)]));
    doc.insert("names", json!([Value::Object(names)]));

    debug!(source_id = record.source_id, agent_type = name_type.agent_type(), "名称转换完成");
    Ok(Some(doc))
}

// ==========================================
// 机构 (Repository)
// ==========================================
pub fn convert_repository(
    ctx: &mut ConversionContext,
    record: &Repository,
) -> ConvertResult<TargetDocument> {
    let mut doc = ctx.new_document(RecordKind::Repository, record.source_id);

    doc.insert("repo_code", record.short_name.clone());
    doc.insert("name", fix_empty_string(&record.name, None));
    doc.insert("org_code", record.agency_code.clone());
    doc.insert("parent_institution_name", record.institution_name.clone());
    doc.insert("url", fix_url(&record.url));

    if let Some(agent_uri) = &record.agent_uri {
        doc.insert("agent_representation", reference(agent_uri));
    }

    Ok(doc)
}

/// 机构的团体代理文档（先于机构上传,供 agent_representation 引用）
pub fn corporate_agent(record: &Repository) -> Value {
    let country = format!("{} {}", record.country, record.country_code);

    json!({
        "agent_type": "agent_corporate_entity",
        "agent_contacts": [{
            "name": record.name,
            "address_1": record.address_1,
            "address_2": record.address_2,
            "address_3": record.address_3,
            "city": record.city,
            "country": country.trim(),
            "post_code": record.mail_code,
            "telephone": record.telephone,
            "fax": record.fax,
            "email": record.email,
        }],
        "names": [{
            "source": "local",
            "primary_name": record.name,
            "sort_name": record.name,
        }],
    })
}
