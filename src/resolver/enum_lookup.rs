// ==========================================
// 档案著录迁移 - 带诊断的受控词查找
// ==========================================
// 职责: 包装 EnumResolver,未映射值写入诊断
// 说明: 转换期间借用解析器与诊断输出,不持有所有权
// ==========================================

use crate::converter::error::ConvertResult;
use crate::domain::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticsSink};
use crate::resolver::enum_resolver_trait::{EnumCategory, EnumResolver, UNMAPPED};
use crate::engine::data_cleaner::non_blank;

pub struct EnumLookup<'a> {
    resolver: &'a dyn EnumResolver,
    sink: &'a mut dyn DiagnosticsSink,
}

impl<'a> EnumLookup<'a> {
    pub fn new(resolver: &'a dyn EnumResolver, sink: &'a mut dyn DiagnosticsSink) -> Self {
        Self { resolver, sink }
    }

    /// 翻译受控词（UNMAPPED 时追加诊断）
    pub fn resolve(&mut self, category: EnumCategory, value: &str) -> ConvertResult<String> {
        let resolved = self.resolver.resolve(category, value)?;
        if resolved == UNMAPPED {
            self.sink.report(Diagnostic::new(
                DiagnosticKind::UnmappedValue,
                format!("Unmapped {} value: '{}'", category, value.trim()),
            ));
        }
        Ok(resolved)
    }

    /// 源值非空白时才翻译
    pub fn resolve_present(
        &mut self,
        category: EnumCategory,
        value: &str,
    ) -> ConvertResult<Option<String>> {
        match non_blank(value) {
            Some(value) => self.resolve(category, value).map(Some),
            None => Ok(None),
        }
    }

    /// 静默探测（不写诊断,仅表内命中才返回）
    pub fn probe(&self, category: EnumCategory, value: &str) -> ConvertResult<Option<String>> {
        self.resolver.lookup_exact(category, value)
    }

    pub fn sink(&mut self) -> &mut dyn DiagnosticsSink {
        &mut *self.sink
    }
}
