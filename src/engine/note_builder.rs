// ==========================================
// 档案著录迁移 - 附注构建引擎
// ==========================================
// 职责: 源系统附注 → 目标附注树（jsonmodel_type 标签）
// 规则: 多部分标志 或 单部分类型无映射 → 多部分附注
//       数字对象附注一律为 note_digital_object
// 红线: 多部分附注首个子项为合成的文本附注
// ==========================================

use crate::converter::error::ConvertResult;
use crate::domain::note::{ChronologyItem, DefinedListItem, IndexItem, MultipartNote, NoteNode};
use crate::domain::source::{
    ArchDescription, BibliographyPart, ChronologyPart, ContactNote, DefinedListPart, IndexPart,
    Name, NoteChild, OrderedListPart, SourceNote, StructuredNote,
};
use crate::engine::data_cleaner::{fix_empty_string, non_blank};
use crate::resolver::{EnumCategory, EnumLookup};
use tracing::debug;

/// 单部分附注空白正文占位
pub const NO_CONTENT: &str = "no content";
/// 多部分附注空白正文占位
pub const MULTI_PART_CONTENT: &str = "multi-part note content";
/// 列表类子项空白标题占位
pub const MISSING_TITLE: &str = "Missing Title";

/// 附注所属记录形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteOwner {
    Archival,      // 登记 / 全宗 / 组件
    DigitalObject, // 数字对象 / 数字对象组件
}

// ==========================================
// NoteModelBuilder
// ==========================================
pub struct NoteModelBuilder;

impl NoteModelBuilder {
    /// 记录的全部附注（非结构化在前,结构化在后）
    pub fn build_notes(
        description: &ArchDescription,
        owner: NoteOwner,
        lookup: &mut EnumLookup<'_>,
    ) -> ConvertResult<Vec<NoteNode>> {
        let mut notes = Vec::with_capacity(
            description.notes.len() + description.structured_notes.len(),
        );

        for note in &description.notes {
            notes.push(Self::convert_note(note, owner, lookup)?);
        }
        for note in &description.structured_notes {
            notes.push(Self::structured_note(note));
        }

        debug!(count = notes.len(), "附注转换完成");
        Ok(notes)
    }

    /// 单条非结构化附注
    pub fn convert_note(
        note: &SourceNote,
        owner: NoteOwner,
        lookup: &mut EnumLookup<'_>,
    ) -> ConvertResult<NoteNode> {
        let content = vec![fix_empty_string(&note.content, Some(NO_CONTENT))];

        if owner == NoteOwner::DigitalObject {
            return Ok(NoteNode::DigitalObject {
                label: note.title.clone(),
                note_type: lookup.resolve(EnumCategory::DigitalObjectNoteType, &note.note_type)?,
                content,
            });
        }

        if note.multi_part == Some(true) {
            return Self::multipart(note, lookup);
        }

        // 目标系统中部分类型只允许多部分形式
        let single_type = match lookup.probe(EnumCategory::SinglePartNoteType, &note.note_type)? {
            Some(single_type) => single_type,
            None => return Self::multipart(note, lookup),
        };

        Ok(NoteNode::Singlepart {
            label: note.title.clone(),
            note_type: single_type,
            content,
        })
    }

    /// 多部分附注（子项保持源顺序）
    pub fn multipart(note: &SourceNote, lookup: &mut EnumLookup<'_>) -> ConvertResult<NoteNode> {
        let note_type = lookup.resolve(EnumCategory::MultiPartNoteType, &note.note_type)?;

        let mut children = Vec::with_capacity(note.children.len());
        for child in &note.children {
            children.push(Self::convert_child(child, lookup)?);
        }

        Ok(NoteNode::Multipart(MultipartNote::new(
            note.title.clone(),
            note_type,
            fix_empty_string(&note.content, Some(MULTI_PART_CONTENT)),
            children,
        )))
    }

    /// 多部分附注子项
    pub fn convert_child(child: &NoteChild, lookup: &mut EnumLookup<'_>) -> ConvertResult<NoteNode> {
        let node = match child {
            NoteChild::Text(part) => NoteNode::text(part.content.clone()),
            NoteChild::OrderedList(list) => Self::ordered_list(list, lookup)?,
            NoteChild::DefinedList(list) => Self::defined_list(list),
            NoteChild::Chronology(chronology) => Self::chronology(chronology),
            NoteChild::Bibliography(_) => NoteNode::Bibliography {
                label: None,
                content: Vec::new(),
            },
            NoteChild::Index(index) => NoteNode::Index {
                label: None,
                content: Vec::new(),
                items: index_items(index),
            },
            NoteChild::Other { kind, content } => {
                debug!(kind = %kind, "未知附注子项,按文本处理");
                NoteNode::text(content.clone())
            }
        };
        Ok(node)
    }

    /// 顶层结构化附注（书目 / 索引）
    pub fn structured_note(note: &StructuredNote) -> NoteNode {
        match note {
            StructuredNote::Bibliography(BibliographyPart { title, content }) => {
                NoteNode::Bibliography {
                    label: Some(title.clone()),
                    content: vec![fix_empty_string(content, Some(NO_CONTENT))],
                }
            }
            StructuredNote::Index(index) => NoteNode::Index {
                label: Some(index.title.clone()),
                content: vec![fix_empty_string(&index.content, Some(NO_CONTENT))],
                items: index_items(index),
            },
        }
    }

    /// 无结构化数量的装具摘要 → 单部分 physdesc 附注
    pub fn container_summary_note(summary: &str) -> NoteNode {
        NoteNode::Singlepart {
            label: "Container Summary".to_string(),
            note_type: "physdesc".to_string(),
            content: vec![summary.to_string()],
        }
    }

    /// 名称的传记/历史附注
    ///
    /// # 返回
    /// - None: 无描述正文
    pub fn bioghist_note(name: &Name, lookup: &mut EnumLookup<'_>) -> ConvertResult<Option<NoteNode>> {
        if name.description_note.is_empty() {
            return Ok(None);
        }

        let label = lookup.resolve(EnumCategory::NameDescriptionType, &name.description_type)?;
        let mut subnotes = vec![NoteNode::text(name.description_note.clone())];
        if let Some(citation) = non_blank(&name.citation) {
            subnotes.push(NoteNode::Citation {
                content: vec![citation.to_string()],
            });
        }

        Ok(Some(NoteNode::Bioghist { label, subnotes }))
    }

    /// 联系附注合并为一段文本
    pub fn contact_note(notes: &[ContactNote]) -> Option<String> {
        if notes.is_empty() {
            return None;
        }

        let mut text = String::new();
        for note in notes {
            if !note.label.is_empty() {
                text.push_str("Label: ");
                text.push_str(&note.label);
                text.push('\n');
            }
            text.push_str("Content: \n");
            text.push_str(&note.note_text);
            text.push_str("\n\n");
        }
        Some(text)
    }

    fn ordered_list(list: &OrderedListPart, lookup: &mut EnumLookup<'_>) -> ConvertResult<NoteNode> {
        Ok(NoteNode::OrderedList {
            title: fix_empty_string(&list.title, Some(MISSING_TITLE)),
            enumeration: lookup.resolve(EnumCategory::OrderedListEnumeration, &list.numeration)?,
            items: list.items.clone(),
        })
    }

    fn defined_list(list: &DefinedListPart) -> NoteNode {
        NoteNode::DefinedList {
            title: fix_empty_string(&list.title, Some(MISSING_TITLE)),
            items: list
                .items
                .iter()
                .map(|entry| DefinedListItem {
                    label: entry.label.clone(),
                    value: entry.value.clone(),
                })
                .collect(),
        }
    }

    fn chronology(chronology: &ChronologyPart) -> NoteNode {
        NoteNode::Chronology {
            title: fix_empty_string(&chronology.title, Some(MISSING_TITLE)),
            ingest_problem: chronology.ingest_problem.clone(),
            items: chronology
                .items
                .iter()
                .map(|entry| ChronologyItem {
                    event_date: entry.event_date.clone(),
                    events: entry.events.clone(),
                })
                .collect(),
        }
    }
}

fn index_items(index: &IndexPart) -> Vec<IndexItem> {
    index
        .items
        .iter()
        .map(|entry| IndexItem {
            value: entry.value.clone(),
            item_type: entry.item_type.clone(),
            reference: entry.reference.clone(),
            reference_text: entry.reference_text.clone(),
        })
        .collect()
}
