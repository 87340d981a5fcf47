// ==========================================
// 档案著录迁移 - 领域类型定义
// ==========================================
// 职责: 记录种类、标识类别、日期类型、名称类型
// 红线: 记录种类为封闭集合,新增种类必须同步转换分发表
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 记录种类 (Record Kind)
// ==========================================
// 源系统中参与迁移的实体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Subject,
    Name,
    Repository,
    Location,
    User,
    Accession,
    Resource,
    ResourceComponent,
    DigitalObject,
    DigitalObjectComponent,
    AnalogInstance,
}

impl RecordKind {
    /// 全部记录种类（分发表构建时遍历）
    pub const ALL: [RecordKind; 11] = [
        RecordKind::Subject,
        RecordKind::Name,
        RecordKind::Repository,
        RecordKind::Location,
        RecordKind::User,
        RecordKind::Accession,
        RecordKind::Resource,
        RecordKind::ResourceComponent,
        RecordKind::DigitalObject,
        RecordKind::DigitalObjectComponent,
        RecordKind::AnalogInstance,
    ];

    /// 外部标识来源标签中使用的名称
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Subject => "subject",
            RecordKind::Name => "name",
            RecordKind::Repository => "repository",
            RecordKind::Location => "location",
            RecordKind::User => "user",
            RecordKind::Accession => "accession",
            RecordKind::Resource => "resource",
            RecordKind::ResourceComponent => "resource_component",
            RecordKind::DigitalObject => "digital_object",
            RecordKind::DigitalObjectComponent => "digital_object_component",
            RecordKind::AnalogInstance => "analog_instance",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 标识类别 (Identifier Class)
// ==========================================
// 每个类别独立维护唯一性集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentifierClass {
    Accession,     // 登记号
    Resource,      // 全宗/案卷号
    DigitalObject, // 数字对象号
    FindingAid,    // EAD 检索工具号
}

impl IdentifierClass {
    /// 诊断信息中使用的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            IdentifierClass::Accession => "Accession",
            IdentifierClass::Resource => "Resource",
            IdentifierClass::DigitalObject => "Digital Object",
            IdentifierClass::FindingAid => "EAD",
        }
    }
}

impl fmt::Display for IdentifierClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierClass::Accession => write!(f, "ACCESSION"),
            IdentifierClass::Resource => write!(f, "RESOURCE"),
            IdentifierClass::DigitalObject => write!(f, "DIGITAL_OBJECT"),
            IdentifierClass::FindingAid => write!(f, "FINDING_AID"),
        }
    }
}

// ==========================================
// 日期类型 (Date Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateType {
    Single,    // 单一日期
    Inclusive, // 起止范围
    Bulk,      // 主体年代
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateType::Single => write!(f, "single"),
            DateType::Inclusive => write!(f, "inclusive"),
            DateType::Bulk => write!(f, "bulk"),
        }
    }
}

// ==========================================
// 名称类型 (Name Type)
// ==========================================
// 三个互斥子模式: 个人 / 家族 / 团体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameType {
    Person,
    Family,
    CorporateBody,
}

impl NameType {
    /// 解析源系统名称类型判别值（不区分大小写）
    ///
    /// # 返回
    /// - None: 无法识别的判别值（调用方跳过该记录）
    pub fn from_discriminant(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("person") {
            Some(NameType::Person)
        } else if value.eq_ignore_ascii_case("family") {
            Some(NameType::Family)
        } else if value.eq_ignore_ascii_case("corporate body") {
            Some(NameType::CorporateBody)
        } else {
            None
        }
    }

    /// 目标系统代理类型
    pub fn agent_type(&self) -> &'static str {
        match self {
            NameType::Person => "agent_person",
            NameType::Family => "agent_family",
            NameType::CorporateBody => "agent_corporate_entity",
        }
    }
}
