// ==========================================
// 档案著录迁移 - 诊断信息
// ==========================================
// 职责: 记录每一次修复/未映射/跳过情况（只追加）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

// ==========================================
// DiagnosticKind - 诊断类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    DateRepaired,        // 日期倒置已修复
    IdentifierShifted,   // 标识分段已左移补齐
    IdentifierDuplicate, // 标识重复已消歧
    UnmappedValue,       // 受控词未映射
    RecordSkipped,       // 记录致命错误,已跳过
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::DateRepaired => write!(f, "DATE_REPAIRED"),
            DiagnosticKind::IdentifierShifted => write!(f, "IDENTIFIER_SHIFTED"),
            DiagnosticKind::IdentifierDuplicate => write!(f, "IDENTIFIER_DUPLICATE"),
            DiagnosticKind::UnmappedValue => write!(f, "UNMAPPED_VALUE"),
            DiagnosticKind::RecordSkipped => write!(f, "RECORD_SKIPPED"),
        }
    }
}

// ==========================================
// Diagnostic - 单条诊断
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

// ==========================================
// DiagnosticsSink Trait
// ==========================================
// 用途: 诊断输出接口（只追加）
// 实现者: DiagnosticLog
pub trait DiagnosticsSink {
    /// 追加一条诊断
    fn report(&mut self, diagnostic: Diagnostic);
}

// ==========================================
// DiagnosticLog - 内存诊断日志
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按类别统计
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    /// 丢弃 len 之后的诊断（记录转换失败时回滚）
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// 取出全部诊断并清空
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }
}

impl DiagnosticsSink for DiagnosticLog {
    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(kind = %diagnostic.kind, message = %diagnostic.message, "转换诊断");
        self.entries.push(diagnostic);
    }
}
