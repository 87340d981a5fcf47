// ==========================================
// 转换分发器 集成测试
// ==========================================
// 测试目标: 分发表选择、覆写钩子契约、致命记录跳过
// ==========================================


use archives_migration::converter::{ConversionContext, ConversionRun, ConversionStrategy};
use archives_migration::domain::source::Subject;
use archives_migration::domain::types::IdentifierClass;
use archives_migration::{
    json_hook, ConvertError, ConvertResult, DiagnosticKind, DispatchTable, EnumCategory,
    EnumResolver, MapperConfig, OverrideHook, RecordConverter, RecordKind, SourceRecord,
    StaticEnumResolver, TargetDocument,
};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use test_helpers::{default_context, default_run, name_with_type, person, AccessionBuilder};

fn subject(source_id: i64, term: &str) -> SourceRecord {
    SourceRecord::Subject(Subject {
        source_id,
        term: term.to_string(),
        term_type: "Topical".to_string(),
        ..Default::default()
    })
}

#[test]
fn test_unknown_name_type_skipped_with_one_diagnostic() {
    let mut run = default_run();
    let result = run
        .convert(&name_with_type(7, "Robot", "R2-D2"))
        .unwrap();
    assert!(result.is_none());

    let report = run.finish();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.converted, 0);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::RecordSkipped);
    assert_eq!(
        report.diagnostics[0].message,
        "R2-D2:: Unknown name type: Robot"
    );
}

#[test]
fn test_name_discriminant_is_case_insensitive() {
    let mut run = default_run();
    let doc = run
        .convert(&name_with_type(8, "corporate body", "Acme"))
        .unwrap()
        .unwrap();
    assert_eq!(doc.get_str("agent_type"), Some("agent_corporate_entity"));
}

#[test]
fn test_accession_without_date_is_skipped() {
    let mut run = default_run();
    let result = run
        .convert(&AccessionBuilder::new(3).number(["X", "", "", ""]).without_date().record())
        .unwrap();
    assert!(result.is_none());

    let report = run.finish();
    assert_eq!(report.skipped, 1);
    assert!(report.diagnostics[0].message.contains("Invalid Accession Date for X"));
}

#[test]
fn test_override_runs_only_for_registered_kind() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let hook = json_hook(move |record| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "terms": [], "source_id_seen": record.source_id() }))
    });

    let table = DispatchTable::builder()
        .with_override(RecordKind::Subject, hook)
        .build();
    assert!(table.strategy(RecordKind::Subject).is_override());
    assert!(matches!(
        table.strategy(RecordKind::Name),
        ConversionStrategy::Builtin
    ));

    let mut run = ConversionRun::new(default_context(), RecordConverter::new(table));
    let output = run.convert_all(&[subject(1, "Maps"), person(2, "Smith")]);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(output.len(), 2);
    assert_eq!(output[0].document.get("source_id_seen").unwrap(), 1);
    assert_eq!(
        output[0].document.external_id(),
        Some(("1", "Archivists Toolkit Database::SUBJECT"))
    );
    assert!(output[1].document.contains_key("names"));
}

#[test]
fn test_override_keeps_its_own_external_ids() {
    let hook = json_hook(|_| {
        Ok(json!({
            "external_ids": [{ "external_id": "custom", "source": "script" }],
        }))
    });
    let converter = RecordConverter::new(
        DispatchTable::builder()
            .with_override(RecordKind::Subject, hook)
            .build(),
    );

    let mut ctx = default_context();
    let doc = converter.convert(&mut ctx, &subject(5, "Maps")).unwrap().unwrap();
    assert_eq!(doc.external_id(), Some(("custom", "script")));
}

#[test]
fn test_global_override_wins_over_builtin() {
    let hook: OverrideHook = Arc::new(|record: &SourceRecord| {
        let mut doc = TargetDocument::from_value(record.kind(), json!({ "scripted": true }))
            .ok_or_else(|| ConvertError::OverrideFailed {
                kind: record.kind(),
                message: "not an object".to_string(),
            })?;
        doc.insert("kind_label", record.kind().label());
        Ok(doc)
    });
    let converter = RecordConverter::new(DispatchTable::builder().with_global_override(hook).build());

    let mut ctx = default_context();
    // 全局覆写下,未知名称类型也由钩子处理
    let doc = converter
        .convert(&mut ctx, &name_with_type(9, "Robot", "R2"))
        .unwrap()
        .unwrap();
    assert_eq!(doc.get("scripted").unwrap(), true);
    assert_eq!(doc.get_str("kind_label"), Some("name"));
    assert!(ctx.diagnostics().is_empty());
}

#[test]
fn test_override_returning_wrong_kind_rejected() {
    let hook: OverrideHook = Arc::new(|record: &SourceRecord| {
        Ok(TargetDocument::for_record(RecordKind::Location, record.source_id(), "x"))
    });
    let converter = RecordConverter::new(
        DispatchTable::builder()
            .with_override(RecordKind::Subject, hook)
            .build(),
    );

    let mut ctx = default_context();
    let result = converter.convert(&mut ctx, &subject(1, "Maps"));
    assert!(matches!(
        result,
        Err(ConvertError::OverrideSchemaMismatch {
            kind: RecordKind::Subject,
            ..
        })
    ));
}

/// 取得方式解析可切换为故障的解析器
struct FlakyResolver {
    inner: StaticEnumResolver,
    failing: Arc<AtomicBool>,
}

impl EnumResolver for FlakyResolver {
    fn resolve(&self, category: EnumCategory, value: &str) -> ConvertResult<String> {
        if category == EnumCategory::AcquisitionType && self.failing.load(Ordering::SeqCst) {
            return Err(ConvertError::ResolverError {
                category: category.to_string(),
                value: value.to_string(),
                message: "lookup service unavailable".to_string(),
            });
        }
        self.inner.resolve(category, value)
    }

    fn lookup_exact(&self, category: EnumCategory, value: &str) -> ConvertResult<Option<String>> {
        self.inner.lookup_exact(category, value)
    }

    fn register_dynamic_value(&mut self, list_name: &str, value: &str) -> ConvertResult<()> {
        self.inner.register_dynamic_value(list_name, value)
    }
}

#[test]
fn test_failed_record_leaves_no_identifier_or_diagnostics() {
    let failing = Arc::new(AtomicBool::new(true));
    let resolver = FlakyResolver {
        inner: StaticEnumResolver::with_default_tables(),
        failing: Arc::clone(&failing),
    };
    let context = ConversionContext::new(MapperConfig::default(), Box::new(resolver));
    let mut run = ConversionRun::new(context, RecordConverter::default());

    // 日期倒置会先写诊断,随后取得方式解析失败
    let record = AccessionBuilder::new(1)
        .number(["2001", "15", "", ""])
        .years(1990, Some(1980))
        .record();

    let result = run.convert(&record);
    assert!(matches!(result, Err(ConvertError::ResolverError { .. })));
    assert_eq!(
        run.context().registry().registered_count(IdentifierClass::Accession),
        0
    );
    assert!(run.context().diagnostics().is_empty());

    // 修复后重试: 标识不被当作重复
    failing.store(false, Ordering::SeqCst);
    let doc = run.convert(&record).unwrap().unwrap();
    assert_eq!(doc.get_str("id_0"), Some("2001"));
    assert_eq!(doc.get_str("id_1"), Some("15"));

    let report = run.finish();
    assert_eq!(report.failed(), 1);
    assert_eq!(report.converted, 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::DateRepaired);
}
