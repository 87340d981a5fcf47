// ==========================================
// 档案著录迁移 - 日期条目
// ==========================================
// 红线: end >= begin（违反时由日期规范化器修复为 end = begin）
// ==========================================

use crate::domain::types::DateType;
use serde::Serialize;

/// 目标系统日期条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub date_type: DateType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certainty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<String>,
}

impl DateRange {
    /// 空白日期条目（只有类型与标签）
    pub fn new(date_type: DateType, label: impl Into<String>) -> Self {
        Self {
            date_type,
            label: label.into(),
            expression: None,
            begin: None,
            end: None,
            certainty: None,
            era: None,
            calendar: None,
        }
    }
}
