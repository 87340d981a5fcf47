// ==========================================
// 档案著录迁移 - 目标附注树
// ==========================================
// 职责: 目标系统附注结构（jsonmodel_type 标签变体）
// 红线: 多部分附注的首个子项必须是合成的文本附注
// ==========================================

use serde::Serialize;

// ==========================================
// NoteNode - 附注节点
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "jsonmodel_type")]
pub enum NoteNode {
    #[serde(rename = "note_text")]
    Text { content: String },

    #[serde(rename = "note_multipart")]
    Multipart(MultipartNote),

    #[serde(rename = "note_singlepart")]
    Singlepart {
        label: String,
        #[serde(rename = "type")]
        note_type: String,
        content: Vec<String>,
    },

    #[serde(rename = "note_digital_object")]
    DigitalObject {
        label: String,
        #[serde(rename = "type")]
        note_type: String,
        content: Vec<String>,
    },

    #[serde(rename = "note_orderedlist")]
    OrderedList {
        title: String,
        enumeration: String,
        items: Vec<String>,
    },

    #[serde(rename = "note_definedlist")]
    DefinedList {
        title: String,
        items: Vec<DefinedListItem>,
    },

    #[serde(rename = "note_chronology")]
    Chronology {
        title: String,
        ingest_problem: String,
        items: Vec<ChronologyItem>,
    },

    #[serde(rename = "note_bibliography")]
    Bibliography {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        content: Vec<String>,
    },

    #[serde(rename = "note_index")]
    Index {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        content: Vec<String>,
        items: Vec<IndexItem>,
    },

    #[serde(rename = "note_bioghist")]
    Bioghist {
        label: String,
        subnotes: Vec<NoteNode>,
    },

    #[serde(rename = "note_citation")]
    Citation { content: Vec<String> },
}

impl NoteNode {
    /// 文本附注
    pub fn text(content: impl Into<String>) -> Self {
        NoteNode::Text {
            content: content.into(),
        }
    }

    /// jsonmodel_type 标签值
    pub fn model_type(&self) -> &'static str {
        match self {
            NoteNode::Text { .. } => "note_text",
            NoteNode::Multipart(_) => "note_multipart",
            NoteNode::Singlepart { .. } => "note_singlepart",
            NoteNode::DigitalObject { .. } => "note_digital_object",
            NoteNode::OrderedList { .. } => "note_orderedlist",
            NoteNode::DefinedList { .. } => "note_definedlist",
            NoteNode::Chronology { .. } => "note_chronology",
            NoteNode::Bibliography { .. } => "note_bibliography",
            NoteNode::Index { .. } => "note_index",
            NoteNode::Bioghist { .. } => "note_bioghist",
            NoteNode::Citation { .. } => "note_citation",
        }
    }
}

// ==========================================
// MultipartNote - 多部分附注
// ==========================================
// 字段私有: 只能通过 new 构造,保证首个子项为文本附注
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultipartNote {
    label: String,
    #[serde(rename = "type")]
    note_type: String,
    subnotes: Vec<NoteNode>,
}

impl MultipartNote {
    /// 创建多部分附注
    ///
    /// # 参数
    /// - label: 附注标签
    /// - note_type: 目标系统多部分附注类型
    /// - base_content: 附注正文（合成为首个文本子项）
    /// - children: 其余子项（保持源顺序）
    pub fn new(
        label: impl Into<String>,
        note_type: impl Into<String>,
        base_content: impl Into<String>,
        children: Vec<NoteNode>,
    ) -> Self {
        let mut subnotes = Vec::with_capacity(children.len() + 1);
        subnotes.push(NoteNode::text(base_content));
        subnotes.extend(children);

        Self {
            label: label.into(),
            note_type: note_type.into(),
            subnotes,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn note_type(&self) -> &str {
        &self.note_type
    }

    pub fn subnotes(&self) -> &[NoteNode] {
        &self.subnotes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinedListItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChronologyItem {
    pub event_date: String,
    pub events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexItem {
    pub value: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub reference: String,
    pub reference_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_multipart_first_child_is_text() {
        let note = MultipartNote::new(
            "Scope",
            "scopecontent",
            "Base text",
            vec![NoteNode::OrderedList {
                title: "List".to_string(),
                enumeration: "arabic".to_string(),
                items: vec!["a".to_string()],
            }],
        );

        assert_eq!(note.subnotes().len(), 2);
        assert_eq!(note.subnotes()[0], NoteNode::text("Base text"));
        assert_eq!(note.subnotes()[1].model_type(), "note_orderedlist");
    }

    #[test]
    fn test_note_serialization_uses_jsonmodel_type() {
        let note = NoteNode::Multipart(MultipartNote::new("Bio", "bioghist", "Born", vec![]));
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonmodel_type": "note_multipart",
                "label": "Bio",
                "type": "bioghist",
                "subnotes": [{"jsonmodel_type": "note_text", "content": "Born"}]
            })
        );

        let placeholder = NoteNode::Bibliography {
            label: None,
            content: vec![],
        };
        assert_eq!(
            serde_json::to_value(&placeholder).unwrap(),
            json!({"jsonmodel_type": "note_bibliography"})
        );
    }
}
