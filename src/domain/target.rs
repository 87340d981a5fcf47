// ==========================================
// 档案著录迁移 - 目标文档
// ==========================================
// 职责: 目标系统 JSON 文档（字符串键字段树）
// 红线: 始终携带指向源记录的外部标识 {external_id, source}
// ==========================================

use crate::domain::types::RecordKind;
use serde::Serialize;
use serde_json::{json, Map, Value};

// ==========================================
// TargetDocument
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDocument {
    kind: RecordKind,
    fields: Map<String, Value>,
    events: Vec<Value>, // 伴随文档（登记事件）,不属于主文档字段
}

impl TargetDocument {
    /// 创建带外部标识回引的文档
    ///
    /// # 参数
    /// - kind: 记录种类
    /// - source_id: 源系统内部标识
    /// - source_tag: 来源标签前缀（如 "Archivists Toolkit Database"）
    pub fn for_record(kind: RecordKind, source_id: i64, source_tag: &str) -> Self {
        let mut doc = Self::from_fields(kind, Map::new());
        doc.set_external_id(source_id, source_tag);
        doc
    }

    /// 从已有字段构建（覆写钩子输出使用）
    pub fn from_fields(kind: RecordKind, fields: Map<String, Value>) -> Self {
        Self {
            kind,
            fields,
            events: Vec::new(),
        }
    }

    /// 从 JSON 值构建（必须是对象）
    pub fn from_value(kind: RecordKind, value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::from_fields(kind, fields)),
            _ => None,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// 写入外部标识回引
    pub fn set_external_id(&mut self, source_id: i64, source_tag: &str) {
        let source = format!("{}::{}", source_tag, self.kind.label().to_uppercase());
        self.fields.insert(
            "external_ids".to_string(),
            json!([{ "external_id": source_id.to_string(), "source": source }]),
        );
    }

    /// 读取外部标识回引 (external_id, source)
    pub fn external_id(&self) -> Option<(&str, &str)> {
        let first = self.fields.get("external_ids")?.as_array()?.first()?;
        Some((
            first.get("external_id")?.as_str()?,
            first.get("source")?.as_str()?,
        ))
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// 写入可序列化的子结构
    pub fn insert_serialized<T: Serialize>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        self.fields
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// 仅在值存在时写入
    pub fn insert_opt(&mut self, key: &str, value: Option<impl Into<Value>>) {
        if let Some(v) = value {
            self.insert(key, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn push_event(&mut self, event: Value) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// 主文档 JSON
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_id_back_reference() {
        let doc = TargetDocument::for_record(
            RecordKind::DigitalObject,
            17,
            "Archivists Toolkit Database",
        );
        assert_eq!(
            doc.external_id(),
            Some(("17", "Archivists Toolkit Database::DIGITAL_OBJECT"))
        );
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(TargetDocument::from_value(RecordKind::User, json!([1, 2])).is_none());
        let doc = TargetDocument::from_value(RecordKind::User, json!({"username": "x"})).unwrap();
        assert_eq!(doc.get_str("username"), Some("x"));
        assert!(doc.external_id().is_none());
    }

    #[test]
    fn test_insert_opt_skips_none() {
        let mut doc = TargetDocument::for_record(RecordKind::Subject, 1, "src");
        doc.insert_opt("source", None::<String>);
        doc.insert_opt("vocabulary", Some("/vocabularies/1"));
        assert!(!doc.contains_key("source"));
        assert_eq!(doc.get_str("vocabulary"), Some("/vocabularies/1"));
    }
}
