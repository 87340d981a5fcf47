// ==========================================
// 档案著录迁移 - 领域模型层
// ==========================================
// 职责: 源记录、目标文档、附注树、日期条目、诊断
// 红线: 不含转换规则,不含 I/O
// ==========================================

pub mod date;
pub mod diagnostic;
pub mod note;
pub mod source;
pub mod target;
pub mod types;

// 重导出核心类型
pub use date::DateRange;
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticsSink};
pub use note::{ChronologyItem, DefinedListItem, IndexItem, MultipartNote, NoteNode};
pub use source::{
    Accession, AnalogInstance, ArchDate, ArchDescription, DigitalObject, DigitalObjectComponent,
    Location, Name, NoteChild, Repository, Resource, ResourceComponent, SourceNote, SourceRecord,
    StructuredNote, Subject, User,
};
pub use target::TargetDocument;
pub use types::{DateType, IdentifierClass, NameType, RecordKind};
