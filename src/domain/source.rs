// ==========================================
// 档案著录迁移 - 源系统记录模型
// ==========================================
// 职责: 定义源系统各记录种类的输入结构（只读）
// 说明: 空字符串表示源字段未填写；数值/日期缺失用 Option
// 红线: 转换过程不修改源记录
// ==========================================

use crate::domain::types::RecordKind;
use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

// ==========================================
// SourceRecord - 源记录封闭变体
// ==========================================
// JSON 输入以 "kind" 字段区分记录种类
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceRecord {
    Subject(Subject),
    Name(Name),
    Repository(Repository),
    Location(Location),
    User(User),
    Accession(Accession),
    Resource(Resource),
    ResourceComponent(ResourceComponent),
    DigitalObject(DigitalObject),
    DigitalObjectComponent(DigitalObjectComponent),
    AnalogInstance(AnalogInstance),
}

impl SourceRecord {
    /// 记录种类
    pub fn kind(&self) -> RecordKind {
        match self {
            SourceRecord::Subject(_) => RecordKind::Subject,
            SourceRecord::Name(_) => RecordKind::Name,
            SourceRecord::Repository(_) => RecordKind::Repository,
            SourceRecord::Location(_) => RecordKind::Location,
            SourceRecord::User(_) => RecordKind::User,
            SourceRecord::Accession(_) => RecordKind::Accession,
            SourceRecord::Resource(_) => RecordKind::Resource,
            SourceRecord::ResourceComponent(_) => RecordKind::ResourceComponent,
            SourceRecord::DigitalObject(_) => RecordKind::DigitalObject,
            SourceRecord::DigitalObjectComponent(_) => RecordKind::DigitalObjectComponent,
            SourceRecord::AnalogInstance(_) => RecordKind::AnalogInstance,
        }
    }

    /// 源系统内部标识（不可变）
    pub fn source_id(&self) -> i64 {
        match self {
            SourceRecord::Subject(r) => r.source_id,
            SourceRecord::Name(r) => r.source_id,
            SourceRecord::Repository(r) => r.source_id,
            SourceRecord::Location(r) => r.source_id,
            SourceRecord::User(r) => r.source_id,
            SourceRecord::Accession(r) => r.source_id,
            SourceRecord::Resource(r) => r.source_id,
            SourceRecord::ResourceComponent(r) => r.source_id,
            SourceRecord::DigitalObject(r) => r.source_id,
            SourceRecord::DigitalObjectComponent(r) => r.source_id,
            SourceRecord::AnalogInstance(r) => r.source_id,
        }
    }
}

// ==========================================
// 简单记录: 主题 / 位置 / 用户 / 机构
// ==========================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Subject {
    pub source_id: i64,
    pub term: String,      // 以 "--" 分隔的复合主题词
    pub term_type: String, // 主题词类型
    pub source: String,    // 主题来源
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    pub source_id: i64,
    pub building: String,
    pub floor: String,
    pub room: String,
    pub area: String,
    pub barcode: String,
    pub classification_number: String,
    pub coordinate_1_label: String,
    pub coordinate_1: String,
    pub coordinate_2_label: String,
    pub coordinate_2: String,
    pub coordinate_3_label: String,
    pub coordinate_3: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct User {
    pub source_id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub title: String,
    pub department: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub source_id: i64,
    pub short_name: String,
    pub name: String,
    pub agency_code: String,
    pub institution_name: String,
    pub url: String,
    pub address_1: String,
    pub address_2: String,
    pub address_3: String,
    pub city: String,
    pub country: String,
    pub country_code: String,
    pub mail_code: String,
    pub telephone: String,
    pub fax: String,
    pub email: String,
    pub agent_uri: Option<String>, // 已上传的机构代理 URI（由调用方提供）
}

// ==========================================
// 名称（代理）记录
// ==========================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Name {
    pub source_id: i64,
    pub name_type: String, // 判别值: Person / Family / Corporate Body
    pub sort_name: String,
    pub name_source: String,
    pub name_rule: String,
    pub qualifier: String,
    pub personal_dates: String,
    pub number: String,
    pub salutation: String,

    // 个人
    pub personal_title: String,
    pub personal_primary_name: String,
    pub personal_prefix: String,
    pub personal_rest_of_name: String,
    pub personal_suffix: String,
    pub personal_fuller_form: String,

    // 家族
    pub family_name: String,
    pub family_name_prefix: String,

    // 团体
    pub corporate_primary_name: String,
    pub corporate_subordinate_1: String,
    pub corporate_subordinate_2: String,

    // 联系信息
    pub contact: NameContact,
    pub contact_notes: Vec<ContactNote>,

    // 传记/历史
    pub description_type: String,
    pub description_note: String,
    pub citation: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NameContact {
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub mail_code: String,
    pub phone: String,
    pub fax: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactNote {
    pub label: String,
    pub note_text: String,
}

// ==========================================
// 著录公共部分 (ArchDescription)
// ==========================================
// 登记/全宗/组件/数字对象共用
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArchDescription {
    pub title: String,
    pub language_code: String,
    pub date_expression: String,
    pub date_begin: Option<i32>,
    pub date_end: Option<i32>,
    pub dates: Vec<ArchDate>,
    pub notes: Vec<SourceNote>,
    pub structured_notes: Vec<StructuredNote>,
    pub physical_descriptions: Vec<PhysicalDescription>,
    pub external_references: Vec<ExternalReference>,
}

/// 结构化日期（ISO 字符串，"" 或 "0" 视为缺失）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArchDate {
    pub expression: String,
    pub iso_date_begin: String,
    pub iso_date_end: String,
    pub label: String, // 源系统日期标签（creation / publication ...）
    pub bulk: bool,
    pub certainty: String,
    pub era: String,
    pub calendar: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PhysicalDescription {
    pub extent_number: Option<f64>,
    pub extent_type: String,
    pub container_summary: String,
    pub physical_detail: String,
    pub dimensions: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExternalReference {
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Deaccession {
    pub description: String,
    pub reason: String,
    pub disposition: String,
    pub notification: Option<bool>,
    pub deaccession_date: Option<NaiveDate>,
    pub extent: Option<f64>,
    pub extent_type: String,
}

/// 用户自定义字段（各记录种类取用子集）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserDefinedFields {
    pub boolean_1: Option<bool>,
    pub boolean_2: Option<bool>,
    pub integer_1: Option<i64>,
    pub integer_2: Option<i64>,
    pub real_1: Option<f64>,
    pub real_2: Option<f64>,
    pub string_1: String,
    pub string_2: String,
    pub string_3: String,
    pub text_1: String,
    pub text_2: String,
    pub text_3: String,
    pub text_4: String,
    pub date_1: Option<NaiveDate>,
    pub date_2: Option<NaiveDate>,
}

// ==========================================
// 登记记录 (Accession)
// ==========================================
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Accession {
    pub source_id: i64,
    pub accession_number_1: String,
    pub accession_number_2: String,
    pub accession_number_3: String,
    pub accession_number_4: String,
    pub accession_date: Option<NaiveDate>,

    #[serde(flatten)]
    pub description: ArchDescription,
    pub bulk_date_begin: Option<i32>,
    pub bulk_date_end: Option<i32>,

    // 数量
    pub extent_number: Option<f64>,
    pub extent_type: String,
    pub container_summary: String,

    pub content_description: String,
    pub condition_note: String,
    pub inventory: String,
    pub deaccessions: Vec<Deaccession>,

    // 里程碑（事件派生）
    pub accession_processed: Option<bool>,
    pub accession_processed_date: Option<NaiveDate>,
    pub acknowledgement_sent: Option<bool>,
    pub acknowledgement_date: Option<NaiveDate>,
    pub agreement_sent: Option<bool>,
    pub agreement_sent_date: Option<NaiveDate>,
    pub agreement_received: Option<bool>,
    pub agreement_received_date: Option<NaiveDate>,
    pub cataloged: Option<bool>,
    pub cataloged_date: Option<NaiveDate>,
    pub processing_started_date: Option<NaiveDate>,
    pub rights_transferred: Option<bool>,
    pub rights_transferred_date: Option<NaiveDate>,
    pub rights_transferred_note: String,

    // 馆藏管理
    pub cataloged_note: String,
    pub processing_plan: String,
    pub processing_priority: String,
    pub processing_status: String,
    pub processors: String,

    pub internal_only: bool,
    pub acquisition_type: String,
    pub resource_type: String,
    pub restrictions_apply: bool,
    pub retention_rule: String,
    pub general_accession_note: String,
    pub access_restrictions: bool,
    pub access_restrictions_note: String,
    pub user_defined: UserDefinedFields,

    // 事件关联（未提供时使用占位引用）
    pub agent_uri: Option<String>,
    pub record_uri: Option<String>,
}

impl Accession {
    /// 登记号显示形式（非空分段以 "." 连接）
    pub fn accession_number(&self) -> String {
        [
            &self.accession_number_1,
            &self.accession_number_2,
            &self.accession_number_3,
            &self.accession_number_4,
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(".")
    }
}

// ==========================================
// 全宗记录 (Resource)
// ==========================================
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub source_id: i64,
    pub resource_identifier_1: String,
    pub resource_identifier_2: String,
    pub resource_identifier_3: String,
    pub resource_identifier_4: String,

    #[serde(flatten)]
    pub description: ArchDescription,
    pub bulk_date_begin: Option<i32>,
    pub bulk_date_end: Option<i32>,

    pub extent_number: Option<f64>,
    pub extent_type: String,
    pub container_summary: String,

    pub level: String,
    pub other_level: String,
    pub internal_only: bool,
    pub repository_processing_note: String,

    // 检索工具 (EAD)
    pub ead_fa_unique_identifier: String,
    pub ead_fa_location: String,
    pub finding_aid_title: String,
    pub finding_aid_subtitle: String,
    pub finding_aid_date: String,
    pub author: String,
    pub description_rules: Option<String>,
    pub language_of_finding_aid: String,
    pub sponsor_note: String,
    pub edition_statement: String,
    pub series: String,
    pub revision_date: String,
    pub revision_description: String,
    pub finding_aid_status: Option<String>,
    pub finding_aid_note: String,

    pub deaccessions: Vec<Deaccession>,
    pub user_defined: UserDefinedFields,
}

impl Resource {
    /// 全宗号显示形式
    pub fn resource_identifier(&self) -> String {
        [
            &self.resource_identifier_1,
            &self.resource_identifier_2,
            &self.resource_identifier_3,
            &self.resource_identifier_4,
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(".")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResourceComponent {
    pub source_id: i64,
    pub persistent_id: String,

    #[serde(flatten)]
    pub description: ArchDescription,

    pub level: String,
    pub other_level: String,
    pub component_unique_identifier: String,
    pub sequence_number: i32,

    pub extent_number: Option<f64>,
    pub extent_type: String,
    pub container_summary: String,
}

// ==========================================
// 数字对象
// ==========================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DigitalObject {
    pub source_id: i64,
    pub object_label: String,
    pub mets_identifier: String,
    pub object_type: String,
    pub restrictions_apply: bool,

    #[serde(flatten)]
    pub description: ArchDescription,
    pub file_versions: Vec<FileVersion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DigitalObjectComponent {
    pub source_id: i64,
    pub object_label: String,
    pub label: String,
    pub component_id: String,

    #[serde(flatten)]
    pub description: ArchDescription,
    pub file_versions: Vec<FileVersion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileVersion {
    pub uri: String,
    pub use_statement: String,
    pub ead_dao_actuate: String,
    pub ead_dao_show: String,
}

// ==========================================
// 实物实例 (Analog Instance)
// ==========================================
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalogInstance {
    pub source_id: i64,
    pub instance_type: String,
    pub container_1_type: String,
    pub container_1_indicator: String,
    pub barcode: String,
    pub container_2_type: String,
    pub container_2_indicator: String,
    pub container_3_type: String,
    pub container_3_indicator: String,
    pub location_uri: Option<String>,
    pub user_defined: UserDefinedFields,
}

// ==========================================
// 附注 (Notes)
// ==========================================

/// 非结构化附注（可带多部分子项）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceNote {
    pub title: String,
    pub note_type: String,
    pub content: String,
    pub multi_part: Option<bool>,
    pub children: Vec<NoteChild>,
}

/// 顶层结构化附注
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuredNote {
    Bibliography(BibliographyPart),
    Index(IndexPart),
}

/// 多部分附注的子项
///
/// 反序列化时按 "kind" 分派；无法识别的 kind 保留为 `Other`，
/// 由附注构建器按纯文本处理。
#[derive(Debug, Clone)]
pub enum NoteChild {
    Text(TextPart),
    OrderedList(OrderedListPart),
    DefinedList(DefinedListPart),
    Chronology(ChronologyPart),
    Bibliography(BibliographyPart),
    Index(IndexPart),
    Other { kind: String, content: String },
}

impl<'de> Deserialize<'de> for NoteChild {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or("text")
            .to_string();

        let child = match kind.as_str() {
            "text" => serde_json::from_value(value).map(NoteChild::Text),
            "ordered_list" => serde_json::from_value(value).map(NoteChild::OrderedList),
            "defined_list" => serde_json::from_value(value).map(NoteChild::DefinedList),
            "chronology" => serde_json::from_value(value).map(NoteChild::Chronology),
            "bibliography" => serde_json::from_value(value).map(NoteChild::Bibliography),
            "index" => serde_json::from_value(value).map(NoteChild::Index),
            _ => {
                let content = value
                    .get("content")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Ok(NoteChild::Other { kind, content })
            }
        };

        child.map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextPart {
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderedListPart {
    pub title: String,
    pub numeration: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefinedListPart {
    pub title: String,
    pub items: Vec<DefinedListEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefinedListEntry {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChronologyPart {
    pub title: String,
    pub ingest_problem: String,
    pub items: Vec<ChronologyEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChronologyEntry {
    pub event_date: String,
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BibliographyPart {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndexPart {
    pub title: String,
    pub content: String,
    pub items: Vec<IndexEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndexEntry {
    pub value: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub reference: String,
    pub reference_text: String,
}
