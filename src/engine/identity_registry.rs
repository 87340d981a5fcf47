// ==========================================
// 档案著录迁移 - 标识唯一性登记表
// ==========================================
// 职责: 分段标识左移补齐 + 按类别保证全局唯一
// 生命周期: 一次转换运行一个实例,运行结束即丢弃
// 红线: 同一类别内,非空分段以 "." 连接后的完整标识不得重复
// ==========================================

use crate::domain::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticsSink};
use crate::domain::types::IdentifierClass;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

/// 消歧标记前缀
pub const DISAMBIGUATION_MARKER: &str = " ##";

/// 默认消歧标记长度（十六进制字符）
pub const DEFAULT_TOKEN_LENGTH: usize = 6;

/// 标识最多分段数
pub const MAX_SEGMENTS: usize = 4;

/// 生成随机消歧标记（十六进制,长度 1..=32）
pub fn disambiguation_token(length: usize) -> String {
    let length = length.clamp(1, 32);
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(length);
    token
}

/// 连接非空分段（以 "." 分隔,空段不出现）
pub fn concat_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

// ==========================================
// ShiftRepair - 分段左移结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRepair {
    pub segments: Vec<String>, // 稠密分段（无空段）
    pub shifted: bool,         // 是否有分段前移
}

/// 左移补齐: 跳过空白分段,保持相对顺序
///
/// # 示例
/// - ["", "B", "", "D"] → ["B", "D"], shifted = true
/// - ["A", "B", "C", "D"] → 不变, shifted = false
pub fn shift_and_repair<S: AsRef<str>>(raw: &[S]) -> ShiftRepair {
    let mut segments: Vec<String> = Vec::with_capacity(MAX_SEGMENTS);
    let mut shifted = false;

    for (position, segment) in raw.iter().take(MAX_SEGMENTS).enumerate() {
        let segment = segment.as_ref().trim();
        if segment.is_empty() {
            continue;
        }
        if segments.len() < position {
            shifted = true;
        }
        segments.push(segment.to_string());
    }

    ShiftRepair { segments, shifted }
}

// ==========================================
// IdentifierKey - 已登记的分段标识
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierKey {
    pub class: IdentifierClass,
    pub segments: Vec<String>, // 稠密分段,1..=4 段（全部为空时为 0 段）
}

impl IdentifierKey {
    /// 完整标识
    pub fn full_id(&self) -> String {
        concat_segments(&self.segments)
    }

    /// 补齐为 4 段（id_0..id_3,缺位为空字符串）
    pub fn padded(&self) -> [String; MAX_SEGMENTS] {
        let mut padded: [String; MAX_SEGMENTS] = Default::default();
        for (slot, segment) in padded.iter_mut().zip(self.segments.iter()) {
            *slot = segment.clone();
        }
        padded
    }
}

// ==========================================
// IdentityRegistry
// ==========================================
#[derive(Debug, Clone)]
pub struct IdentityRegistry {
    seen: HashMap<IdentifierClass, HashSet<String>>,
    pending: Vec<(IdentifierClass, String)>, // 当前记录登记的标识（回滚用）
    token_length: usize,
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_LENGTH)
    }
}

impl IdentityRegistry {
    /// 创建空登记表
    ///
    /// # 参数
    /// - token_length: 消歧标记长度
    pub fn new(token_length: usize) -> Self {
        Self {
            seen: HashMap::new(),
            pending: Vec::new(),
            token_length: token_length.clamp(1, 32),
        }
    }

    pub fn is_registered(&self, class: IdentifierClass, id: &str) -> bool {
        self.seen.get(&class).map_or(false, |ids| ids.contains(id))
    }

    pub fn registered_count(&self, class: IdentifierClass) -> usize {
        self.seen.get(&class).map_or(0, HashSet::len)
    }

    /// 确认当前记录已登记的标识
    pub fn commit(&mut self) {
        self.pending.clear();
    }

    /// 撤销自上次 commit 以来登记的标识
    ///
    /// # 返回
    /// - 撤销的标识数量
    pub fn rollback(&mut self) -> usize {
        let count = self.pending.len();
        for (class, id) in self.pending.drain(..) {
            if let Some(ids) = self.seen.get_mut(&class) {
                ids.remove(&id);
            }
        }
        count
    }

    fn mark_seen(&mut self, class: IdentifierClass, id: &str) {
        self.seen.entry(class).or_default().insert(id.to_string());
        self.pending.push((class, id.to_string()));
    }

    fn next_token(&self) -> String {
        format!("{}{}", DISAMBIGUATION_MARKER, disambiguation_token(self.token_length))
    }

    /// 多分段唯一性保证
    ///
    /// # 参数
    /// - candidate: 当前完整标识
    /// - segments: 稠密分段（冲突时首段被追加消歧标记）
    ///
    /// # 返回
    /// - 已登记的完整标识（未冲突时即 candidate）
    pub fn ensure_unique(
        &mut self,
        class: IdentifierClass,
        candidate: &str,
        segments: &mut Vec<String>,
        sink: &mut dyn DiagnosticsSink,
    ) -> String {
        if !self.is_registered(class, candidate) {
            self.mark_seen(class, candidate);
            return candidate.to_string();
        }

        if segments.is_empty() {
            segments.push(String::new());
        }

        let full_id = loop {
            let token = self.next_token();
            segments[0].push_str(&token);
            let full_id = concat_segments(segments);
            if !self.is_registered(class, &full_id) {
                break full_id;
            }
        };

        self.mark_seen(class, &full_id);
        debug!(class = %class, original = candidate, replacement = %full_id, "标识重复,已消歧");
        sink.report(Diagnostic::new(
            DiagnosticKind::IdentifierDuplicate,
            format!(
                "Duplicate {} Id: {} Changed to: {}",
                class.display_name(),
                candidate,
                full_id
            ),
        ));

        full_id
    }

    /// 四段标识: 左移补齐 → 唯一性保证 → 左移诊断
    pub fn register_segments<S: AsRef<str>>(
        &mut self,
        class: IdentifierClass,
        raw: &[S],
        sink: &mut dyn DiagnosticsSink,
    ) -> IdentifierKey {
        let ShiftRepair {
            mut segments,
            shifted,
        } = shift_and_repair(raw);

        let candidate = concat_segments(&segments);
        let full_id = self.ensure_unique(class, &candidate, &mut segments, sink);

        if shifted {
            sink.report(Diagnostic::new(
                DiagnosticKind::IdentifierShifted,
                format!("{} Id Cleaned Up: {}", class.display_name(), full_id),
            ));
        }

        IdentifierKey { class, segments }
    }

    /// 单段唯一性保证（EAD 检索工具标识）
    ///
    /// # 返回
    /// - "": 输入为空白（不登记）
    /// - 唯一标识
    pub fn ensure_unique_single(
        &mut self,
        class: IdentifierClass,
        id: &str,
        sink: &mut dyn DiagnosticsSink,
    ) -> String {
        let id = id.trim();
        if id.is_empty() {
            return String::new();
        }
        self.disambiguate_single(class, id, sink)
    }

    /// 数字对象标识: 空白时生成占位标识,再保证唯一
    pub fn unique_digital_object_id(&mut self, id: &str, sink: &mut dyn DiagnosticsSink) -> String {
        let id = id.trim();
        let id = if id.is_empty() {
            format!("Digital Object ID{}", self.next_token())
        } else {
            id.to_string()
        };
        self.disambiguate_single(IdentifierClass::DigitalObject, &id, sink)
    }

    fn disambiguate_single(
        &mut self,
        class: IdentifierClass,
        id: &str,
        sink: &mut dyn DiagnosticsSink,
    ) -> String {
        if !self.is_registered(class, id) {
            self.mark_seen(class, id);
            return id.to_string();
        }

        let replacement = loop {
            let candidate = format!("{}{}", id, self.next_token());
            if !self.is_registered(class, &candidate) {
                break candidate;
            }
        };

        self.mark_seen(class, &replacement);
        sink.report(Diagnostic::new(
            DiagnosticKind::IdentifierDuplicate,
            format!(
                "Duplicate {} Id: {} Changed to: {}",
                class.display_name(),
                id,
                replacement
            ),
        ));

        replacement
    }
}
