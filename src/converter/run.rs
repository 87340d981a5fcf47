// ==========================================
// 档案著录迁移 - 转换运行
// ==========================================
// 职责: 驱动一批源记录经分发器转换,统计成功/跳过/失败并收集诊断
// 生命周期: 一次运行 = 一个上下文（标识登记表从空开始）
// ==========================================

use crate::converter::context::ConversionContext;
use crate::converter::dispatcher::RecordConverter;
use crate::converter::error::ConvertResult;
use crate::domain::diagnostic::Diagnostic;
use crate::domain::source::SourceRecord;
use crate::domain::target::TargetDocument;
use crate::domain::types::RecordKind;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

/// 转换成功的记录
#[derive(Debug, Clone)]
pub struct ConvertedRecord {
    pub kind: RecordKind,
    pub source_id: i64,
    pub document: TargetDocument,
}

impl ConvertedRecord {
    /// 输出格式 {kind, source_id, document, events}
    pub fn to_json(&self) -> Value {
        json!({
            "kind": self.kind,
            "source_id": self.source_id,
            "document": self.document.to_value(),
            "events": self.document.events(),
        })
    }
}

/// 协作者失败而中止的记录
#[derive(Debug, Clone, Serialize)]
pub struct RecordFailure {
    pub kind: RecordKind,
    pub source_id: i64,
    pub message: String,
}

/// 运行汇总
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub converted: usize,
    pub skipped: usize,
    pub failures: Vec<RecordFailure>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

// ==========================================
// ConversionRun
// ==========================================
pub struct ConversionRun {
    context: ConversionContext,
    converter: RecordConverter,
    converted: usize,
    skipped: usize,
    failures: Vec<RecordFailure>,
}

impl ConversionRun {
    pub fn new(context: ConversionContext, converter: RecordConverter) -> Self {
        info!(
            overrides = ?converter.table().overridden_kinds(),
            "转换运行开始"
        );
        Self {
            context,
            converter,
            converted: 0,
            skipped: 0,
            failures: Vec::new(),
        }
    }

    pub fn context(&self) -> &ConversionContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ConversionContext {
        &mut self.context
    }

    /// 转换单条记录并计数
    ///
    /// # 返回
    /// - Ok(None): 记录被跳过（诊断已记录）
    /// - Err: 协作者失败,记录计入失败
    pub fn convert(&mut self, record: &SourceRecord) -> ConvertResult<Option<TargetDocument>> {
        let kind = record.kind();
        let source_id = record.source_id();

        match self.converter.convert(&mut self.context, record) {
            Ok(Some(doc)) => {
                self.converted += 1;
                debug!(kind = %kind, source_id = source_id, "记录转换成功");
                Ok(Some(doc))
            }
            Ok(None) => {
                self.skipped += 1;
                debug!(kind = %kind, source_id = source_id, "记录已跳过");
                Ok(None)
            }
            Err(e) => {
                error!(kind = %kind, source_id = source_id, error = %e, "记录转换失败");
                self.failures.push(RecordFailure {
                    kind,
                    source_id,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// 批量转换（失败记录不中断批次,在汇总中体现）
    pub fn convert_all(&mut self, records: &[SourceRecord]) -> Vec<ConvertedRecord> {
        let mut output = Vec::with_capacity(records.len());

        for record in records {
            if let Ok(Some(document)) = self.convert(record) {
                output.push(ConvertedRecord {
                    kind: record.kind(),
                    source_id: record.source_id(),
                    document,
                });
            }
        }

        output
    }

    /// 结束运行,取出汇总
    pub fn finish(mut self) -> RunReport {
        let report = RunReport {
            converted: self.converted,
            skipped: self.skipped,
            failures: self.failures,
            diagnostics: self.context.take_diagnostics(),
        };

        info!(
            converted = report.converted,
            skipped = report.skipped,
            failed = report.failed(),
            diagnostics = report.diagnostics.len(),
            "转换运行结束"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::error::ConvertError;
    use crate::converter::dispatcher::{DispatchTable, OverrideHook};
    use crate::domain::diagnostic::DiagnosticKind;
    use crate::domain::source::{Location, Name, User};
    use std::sync::Arc;

    #[test]
    fn test_run_tallies_converted_and_skipped() {
        let records = vec![
            SourceRecord::Location(Location {
                source_id: 1,
                ..Default::default()
            }),
            SourceRecord::Name(Name {
                source_id: 2,
                name_type: "Spaceship".to_string(),
                sort_name: "Enterprise".to_string(),
                ..Default::default()
            }),
        ];

        let mut run = ConversionRun::new(
            ConversionContext::with_defaults(),
            RecordConverter::default(),
        );
        let output = run.convert_all(&records);
        let report = run.finish();

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].kind, RecordKind::Location);
        assert_eq!(report.converted, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::RecordSkipped);
    }

    #[test]
    fn test_run_records_failures_and_continues() {
        let hook: OverrideHook = Arc::new(|record: &SourceRecord| {
            Err(ConvertError::OverrideFailed {
                kind: record.kind(),
                message: "boom".to_string(),
            })
        });
        let table = DispatchTable::builder()
            .with_override(RecordKind::User, hook)
            .build();

        let records = vec![
            SourceRecord::User(User {
                source_id: 3,
                ..Default::default()
            }),
            SourceRecord::Location(Location {
                source_id: 4,
                ..Default::default()
            }),
        ];

        let mut run = ConversionRun::new(ConversionContext::with_defaults(), RecordConverter::new(table));
        let output = run.convert_all(&records);
        let report = run.finish();

        assert_eq!(output.len(), 1);
        assert_eq!(report.converted, 1);
        assert_eq!(report.failures[0].source_id, 3);
        assert_eq!(report.failures[0].kind, RecordKind::User);
    }

    #[test]
    fn test_converted_record_output_shape() {
        let mut run = ConversionRun::new(
            ConversionContext::with_defaults(),
            RecordConverter::default(),
        );
        let output = run.convert_all(&[SourceRecord::Location(Location {
            source_id: 9,
            ..Default::default()
        })]);

        let value = output[0].to_json();
        assert_eq!(value["kind"], "location");
        assert_eq!(value["source_id"], 9);
        assert_eq!(value["document"]["building"], "Unknown Building");
        assert!(value["events"].as_array().unwrap().is_empty());
    }
}
