// ==========================================
// 档案著录迁移 - 受控词解析 Trait
// ==========================================
// 职责: 定义受控词（枚举）翻译接口（不包含实现）
// 红线: 找不到映射时返回 UNMAPPED 哨兵,不返回错误
// ==========================================

use crate::converter::error::ConvertResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 未映射哨兵值（在目标文档中可见）
pub const UNMAPPED: &str = "UNMAPPED";

// ==========================================
// EnumCategory - 受控词类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumCategory {
    SubjectSource,
    SubjectTermType,
    Salutation,
    NameSource,
    NameRule,
    NameDescriptionType,
    ExtentType,
    DateLabel,
    DateCertainty,
    DateEra,
    DateCalendar,
    AcquisitionType,
    AccessionResourceType,
    ProcessingPriority,
    ProcessingStatus,
    LanguageCode,
    ResourceLevel,
    ArchivalObjectLevel,
    FindingAidDescriptionRules,
    FindingAidStatus,
    DigitalObjectType,
    FileVersionUseStatement,
    DigitalObjectNoteType,
    SinglePartNoteType,
    MultiPartNoteType,
    OrderedListEnumeration,
    InstanceType,
    ContainerType,
}

impl EnumCategory {
    /// 类别名称（与表文件键、动态列表名一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            EnumCategory::SubjectSource => "subject_source",
            EnumCategory::SubjectTermType => "subject_term_type",
            EnumCategory::Salutation => "salutation",
            EnumCategory::NameSource => "name_source",
            EnumCategory::NameRule => "name_rule",
            EnumCategory::NameDescriptionType => "name_description_type",
            EnumCategory::ExtentType => "extent_type",
            EnumCategory::DateLabel => "date_label",
            EnumCategory::DateCertainty => "date_certainty",
            EnumCategory::DateEra => "date_era",
            EnumCategory::DateCalendar => "date_calendar",
            EnumCategory::AcquisitionType => "acquisition_type",
            EnumCategory::AccessionResourceType => "accession_resource_type",
            EnumCategory::ProcessingPriority => "processing_priority",
            EnumCategory::ProcessingStatus => "processing_status",
            EnumCategory::LanguageCode => "language_code",
            EnumCategory::ResourceLevel => "resource_level",
            EnumCategory::ArchivalObjectLevel => "archival_object_level",
            EnumCategory::FindingAidDescriptionRules => "finding_aid_description_rules",
            EnumCategory::FindingAidStatus => "finding_aid_status",
            EnumCategory::DigitalObjectType => "digital_object_type",
            EnumCategory::FileVersionUseStatement => "file_version_use_statement",
            EnumCategory::DigitalObjectNoteType => "digital_object_note_type",
            EnumCategory::SinglePartNoteType => "single_part_note_type",
            EnumCategory::MultiPartNoteType => "multi_part_note_type",
            EnumCategory::OrderedListEnumeration => "ordered_list_enumeration",
            EnumCategory::InstanceType => "instance_type",
            EnumCategory::ContainerType => "container_type",
        }
    }

    /// 是否为目标系统中可扩展的动态枚举
    pub fn is_dynamic(&self) -> bool {
        matches!(
            self,
            EnumCategory::ExtentType
                | EnumCategory::SubjectSource
                | EnumCategory::NameSource
                | EnumCategory::NameRule
                | EnumCategory::AcquisitionType
                | EnumCategory::AccessionResourceType
                | EnumCategory::ContainerType
                | EnumCategory::FileVersionUseStatement
                | EnumCategory::DigitalObjectType
                | EnumCategory::ProcessingPriority
                | EnumCategory::ProcessingStatus
        )
    }

    /// 类别名称 → 类别（as_str 的逆）
    pub fn from_name(name: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(name.trim().to_string())).ok()
    }

    /// 源系统查找列表名 → 可扩展的动态类别
    ///
    /// # 返回
    /// - None: 该查找列表在目标系统中不是动态枚举
    pub fn from_lookup_list(list_name: &str) -> Option<Self> {
        match list_name.trim().to_lowercase().as_str() {
            "extent type" => Some(EnumCategory::ExtentType),
            "subject term source" => Some(EnumCategory::SubjectSource),
            "name source" => Some(EnumCategory::NameSource),
            "name rules" => Some(EnumCategory::NameRule),
            "acquisition type" => Some(EnumCategory::AcquisitionType),
            "resource type" => Some(EnumCategory::AccessionResourceType),
            "container types" => Some(EnumCategory::ContainerType),
            "file version use statements" => Some(EnumCategory::FileVersionUseStatement),
            "digital object types" => Some(EnumCategory::DigitalObjectType),
            "processing priority" => Some(EnumCategory::ProcessingPriority),
            "processing status" => Some(EnumCategory::ProcessingStatus),
            _ => None,
        }
    }
}

impl fmt::Display for EnumCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// EnumResolver Trait
// ==========================================
// 用途: 源受控词 → 目标受控词
// 实现者: StaticEnumResolver
pub trait EnumResolver {
    /// 翻译受控词
    ///
    /// # 返回
    /// - Ok(目标值): 映射成功
    /// - Ok(UNMAPPED): 无映射
    /// - Err: 解析器自身故障（向上传播,中止当前记录）
    fn resolve(&self, category: EnumCategory, value: &str) -> ConvertResult<String>;

    /// 精确查表（映射表或动态列表命中才返回）
    ///
    /// 不受"返回源值"模式影响,用于判断某值是否属于目标列表
    fn lookup_exact(&self, category: EnumCategory, value: &str) -> ConvertResult<Option<String>>;

    /// 向用户可扩展列表追加值
    ///
    /// # 返回
    /// - Err(ResolverError): 列表名不是可扩展的动态类别
    fn register_dynamic_value(&mut self, list_name: &str, value: &str) -> ConvertResult<()>;
}
