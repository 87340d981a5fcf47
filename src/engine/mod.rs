// ==========================================
// 档案著录迁移 - 引擎层
// ==========================================
// 职责: 与记录种类无关的通用转换规则
// 红线: 引擎不做 I/O,所有修复必须写入诊断
// ==========================================

pub mod data_cleaner;
pub mod date_normalizer;
pub mod identity_registry;
pub mod note_builder;

// 重导出核心引擎
pub use data_cleaner::{fix_empty_string, fix_url};
pub use date_normalizer::{DateNormalizer, SummaryDate};
pub use identity_registry::{shift_and_repair, IdentifierKey, IdentityRegistry, ShiftRepair};
pub use note_builder::{NoteModelBuilder, NoteOwner};
