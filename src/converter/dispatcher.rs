// ==========================================
// 档案著录迁移 - 转换分发器
// ==========================================
// 职责: 按记录种类路由到内置转换器或外部覆写钩子
// 规则: 分发表在转换开始前一次性构建,之后不可变
//       全局覆写优先于任何按种类的设置
// 红线: 不吞掉下层错误；覆写输出必须是对象且种类一致
// ==========================================

use crate::converter::accession::convert_accession;
use crate::converter::admin::{convert_location, convert_user};
use crate::converter::agent::{convert_name, convert_repository, convert_subject};
use crate::converter::context::ConversionContext;
use crate::converter::digital_object::{convert_digital_object, convert_digital_object_component};
use crate::converter::error::{ConvertError, ConvertResult};
use crate::converter::instance::convert_analog_instance;
use crate::converter::resource::{convert_resource, convert_resource_component};
use crate::domain::source::SourceRecord;
use crate::domain::target::TargetDocument;
use crate::domain::types::RecordKind;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 覆写钩子: 源记录 → 目标文档
pub type OverrideHook = Arc<dyn Fn(&SourceRecord) -> ConvertResult<TargetDocument> + Send + Sync>;

/// 以 JSON 值为输出的钩子适配（非对象输出 → OverrideSchemaMismatch）
pub fn json_hook<F>(hook: F) -> OverrideHook
where
    F: Fn(&SourceRecord) -> ConvertResult<Value> + Send + Sync + 'static,
{
    Arc::new(move |record: &SourceRecord| {
        let kind = record.kind();
        let value = hook(record)?;
        TargetDocument::from_value(kind, value).ok_or_else(|| ConvertError::OverrideSchemaMismatch {
            kind,
            message: "钩子输出不是 JSON 对象".to_string(),
        })
    })
}

// ==========================================
// ConversionStrategy / DispatchTable
// ==========================================

#[derive(Clone)]
pub enum ConversionStrategy {
    Builtin,
    Override(OverrideHook),
}

impl ConversionStrategy {
    pub fn is_override(&self) -> bool {
        matches!(self, ConversionStrategy::Override(_))
    }
}

impl fmt::Debug for ConversionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionStrategy::Builtin => write!(f, "Builtin"),
            ConversionStrategy::Override(_) => write!(f, "Override(<hook>)"),
        }
    }
}

static BUILTIN: ConversionStrategy = ConversionStrategy::Builtin;

/// 记录种类 → 转换策略（不可变）
#[derive(Debug, Clone)]
pub struct DispatchTable {
    strategies: BTreeMap<RecordKind, ConversionStrategy>,
}

impl DispatchTable {
    /// 全部种类使用内置转换器
    pub fn builtin() -> Self {
        Self {
            strategies: RecordKind::ALL
                .iter()
                .map(|kind| (*kind, ConversionStrategy::Builtin))
                .collect(),
        }
    }

    pub fn builder() -> DispatchTableBuilder {
        DispatchTableBuilder::default()
    }

    pub fn strategy(&self, kind: RecordKind) -> &ConversionStrategy {
        self.strategies.get(&kind).unwrap_or(&BUILTIN)
    }

    /// 使用覆写钩子的种类
    pub fn overridden_kinds(&self) -> Vec<RecordKind> {
        self.strategies
            .iter()
            .filter(|(_, strategy)| strategy.is_override())
            .map(|(kind, _)| *kind)
            .collect()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Default)]
pub struct DispatchTableBuilder {
    overrides: BTreeMap<RecordKind, OverrideHook>,
    global: Option<OverrideHook>,
}

impl DispatchTableBuilder {
    /// 为单个种类注册覆写钩子（同一种类后注册者生效）
    pub fn with_override(mut self, kind: RecordKind, hook: OverrideHook) -> Self {
        self.overrides.insert(kind, hook);
        self
    }

    /// 全局覆写: 所有种类都走该钩子
    pub fn with_global_override(mut self, hook: OverrideHook) -> Self {
        self.global = Some(hook);
        self
    }

    pub fn build(self) -> DispatchTable {
        let mut table = DispatchTable::builtin();

        for kind in RecordKind::ALL {
            let hook = match &self.global {
                Some(global) => Some(Arc::clone(global)),
                None => self.overrides.get(&kind).cloned(),
            };
            if let Some(hook) = hook {
                table
                    .strategies
                    .insert(kind, ConversionStrategy::Override(hook));
            }
        }

        table
    }
}

// ==========================================
// RecordConverter
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RecordConverter {
    table: DispatchTable,
}

impl RecordConverter {
    pub fn new(table: DispatchTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    /// 转换单条记录
    ///
    /// # 返回
    /// - Ok(Some(doc)): 转换成功
    /// - Ok(None): 记录级致命情况（诊断已写入上下文）
    /// - Err: 解析器或覆写钩子失败（该记录登记的标识与诊断已回滚）
    pub fn convert(
        &self,
        ctx: &mut ConversionContext,
        record: &SourceRecord,
    ) -> ConvertResult<Option<TargetDocument>> {
        let checkpoint = ctx.checkpoint();
        let result = self.dispatch(ctx, record);
        if result.is_err() {
            ctx.rollback(checkpoint);
        }
        result
    }

    fn dispatch(
        &self,
        ctx: &mut ConversionContext,
        record: &SourceRecord,
    ) -> ConvertResult<Option<TargetDocument>> {
        let kind = record.kind();

        if let ConversionStrategy::Override(hook) = self.table.strategy(kind) {
            debug!(kind = %kind, source_id = record.source_id(), "使用覆写钩子");
            return self.run_override(ctx, hook, record).map(Some);
        }

        let converted = match record {
            SourceRecord::Subject(r) => Some(convert_subject(ctx, r)?),
            SourceRecord::Name(r) => convert_name(ctx, r)?,
            SourceRecord::Repository(r) => Some(convert_repository(ctx, r)?),
            SourceRecord::Location(r) => Some(convert_location(ctx, r)?),
            SourceRecord::User(r) => Some(convert_user(ctx, r)?),
            SourceRecord::Accession(r) => convert_accession(ctx, r)?,
            SourceRecord::Resource(r) => Some(convert_resource(ctx, r)?),
            SourceRecord::ResourceComponent(r) => Some(convert_resource_component(ctx, r)?),
            SourceRecord::DigitalObject(r) => Some(convert_digital_object(ctx, r)?),
            SourceRecord::DigitalObjectComponent(r) => {
                Some(convert_digital_object_component(ctx, r)?)
            }
            SourceRecord::AnalogInstance(r) => Some(convert_analog_instance(ctx, r)?),
        };

        Ok(converted)
    }

    fn run_override(
        &self,
        ctx: &ConversionContext,
        hook: &OverrideHook,
        record: &SourceRecord,
    ) -> ConvertResult<TargetDocument> {
        let kind = record.kind();
        let mut doc = hook(record)?;

        if doc.kind() != kind {
            return Err(ConvertError::OverrideSchemaMismatch {
                kind,
                message: format!("钩子返回了 {} 文档", doc.kind()),
            });
        }

        if !doc.contains_key("external_ids") {
            doc.set_external_id(record.source_id(), &ctx.config().external_id_source);
        }

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::source::{Location, Subject};
    use serde_json::json;

    fn location_record() -> SourceRecord {
        SourceRecord::Location(Location {
            source_id: 8,
            building: "Main".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_builtin_table_routes_every_kind_to_builtin() {
        let table = DispatchTable::builtin();
        assert!(table.overridden_kinds().is_empty());
        for kind in RecordKind::ALL {
            assert!(!table.strategy(kind).is_override());
        }
    }

    #[test]
    fn test_override_output_is_stamped_with_external_id() {
        let hook = json_hook(|_record| Ok(json!({ "building": "Annex" })));
        let table = DispatchTable::builder()
            .with_override(RecordKind::Location, hook)
            .build();
        assert_eq!(table.overridden_kinds(), vec![RecordKind::Location]);

        let converter = RecordConverter::new(table);
        let mut ctx = ConversionContext::with_defaults();
        let doc = converter
            .convert(&mut ctx, &location_record())
            .unwrap()
            .unwrap();

        assert_eq!(doc.get_str("building"), Some("Annex"));
        assert_eq!(
            doc.external_id(),
            Some(("8", "Archivists Toolkit Database::LOCATION"))
        );
    }

    #[test]
    fn test_override_non_object_rejected() {
        let table = DispatchTable::builder()
            .with_override(RecordKind::Location, json_hook(|_| Ok(json!("text"))))
            .build();
        let converter = RecordConverter::new(table);
        let mut ctx = ConversionContext::with_defaults();

        let result = converter.convert(&mut ctx, &location_record());
        assert!(matches!(
            result,
            Err(ConvertError::OverrideSchemaMismatch { kind: RecordKind::Location, .. })
        ));
    }

    #[test]
    fn test_override_failure_propagates() {
        let hook: OverrideHook = Arc::new(|record: &SourceRecord| {
            Err(ConvertError::OverrideFailed {
                kind: record.kind(),
                message: "script error".to_string(),
            })
        });
        let table = DispatchTable::builder().with_global_override(hook).build();
        assert_eq!(table.overridden_kinds().len(), RecordKind::ALL.len());

        let converter = RecordConverter::new(table);
        let mut ctx = ConversionContext::with_defaults();
        let subject = SourceRecord::Subject(Subject {
            term: "Maps".to_string(),
            ..Default::default()
        });

        assert!(matches!(
            converter.convert(&mut ctx, &subject),
            Err(ConvertError::OverrideFailed { .. })
        ));
    }

    #[test]
    fn test_builtin_conversion_for_location() {
        let converter = RecordConverter::default();
        let mut ctx = ConversionContext::with_defaults();
        let doc = converter
            .convert(&mut ctx, &location_record())
            .unwrap()
            .unwrap();
        assert_eq!(doc.kind(), RecordKind::Location);
        assert_eq!(doc.get_str("building"), Some("Main"));
    }
}
