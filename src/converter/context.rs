// ==========================================
// 档案著录迁移 - 转换上下文
// ==========================================
// 职责: 一次转换运行共享的状态（配置、解析器、标识登记表、诊断）
// 生命周期: 由 ConversionRun 持有,运行结束即丢弃
// 红线: 不使用全局状态；标识登记表只通过 &mut 访问
// ==========================================

use crate::config::MapperConfig;
use crate::converter::error::ConvertResult;
use crate::domain::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticsSink};
use crate::domain::target::TargetDocument;
use crate::domain::types::{IdentifierClass, RecordKind};
use crate::engine::identity_registry::{disambiguation_token, IdentifierKey, IdentityRegistry};
use crate::resolver::{EnumCategory, EnumLookup, EnumResolver, StaticEnumResolver};
use tracing::{debug, info};

/// 单条记录转换前的回滚点
#[derive(Debug, Clone)]
pub struct RecordCheckpoint {
    diagnostics: usize,
    current_resource_identifier: String,
}

pub struct ConversionContext {
    config: MapperConfig,
    resolver: Box<dyn EnumResolver>,
    registry: IdentityRegistry,
    diagnostics: DiagnosticLog,
    current_resource_identifier: String, // 组件诊断中引用的所属全宗
}

impl ConversionContext {
    /// 创建上下文
    ///
    /// # 参数
    /// - config: 转换配置
    /// - resolver: 受控词解析器（外部注入）
    pub fn new(config: MapperConfig, resolver: Box<dyn EnumResolver>) -> Self {
        let registry = IdentityRegistry::new(config.disambiguation_token_length);
        Self {
            config,
            resolver,
            registry,
            diagnostics: DiagnosticLog::new(),
            current_resource_identifier: String::new(),
        }
    }

    /// 默认配置 + 默认映射表
    pub fn with_defaults() -> Self {
        Self::new(
            MapperConfig::default(),
            Box::new(StaticEnumResolver::with_default_tables()),
        )
    }

    /// 按配置构建表驱动解析器（合并外部映射表）
    pub fn from_config(config: MapperConfig) -> ConvertResult<Self> {
        let mut resolver = StaticEnumResolver::with_default_tables();
        resolver.set_return_source_value(config.return_source_value);

        if let Some(path) = &config.enum_tables_path {
            let merged = resolver.merge_json_file(path)?;
            info!(path = %path.display(), merged = merged, "合并外部受控词映射表");
        }

        Ok(Self::new(config, Box::new(resolver)))
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// 取出已累积的诊断
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.drain()
    }

    pub fn resolver_mut(&mut self) -> &mut dyn EnumResolver {
        self.resolver.as_mut()
    }

    // ==========================================
    // 受控词
    // ==========================================

    /// 借用解析器与诊断输出
    pub fn lookup(&mut self) -> EnumLookup<'_> {
        EnumLookup::new(self.resolver.as_ref(), &mut self.diagnostics)
    }

    pub fn resolve(&mut self, category: EnumCategory, value: &str) -> ConvertResult<String> {
        self.lookup().resolve(category, value)
    }

    pub fn resolve_present(
        &mut self,
        category: EnumCategory,
        value: &str,
    ) -> ConvertResult<Option<String>> {
        self.lookup().resolve_present(category, value)
    }

    /// 静默探测（不写诊断,仅表内命中才返回）
    pub fn probe(&self, category: EnumCategory, value: &str) -> ConvertResult<Option<String>> {
        self.resolver.lookup_exact(category, value)
    }

    // ==========================================
    // 标识
    // ==========================================

    pub fn register_segments(&mut self, class: IdentifierClass, raw: &[&str]) -> IdentifierKey {
        self.registry
            .register_segments(class, raw, &mut self.diagnostics)
    }

    pub fn unique_ead_id(&mut self, id: &str) -> String {
        self.registry
            .ensure_unique_single(IdentifierClass::FindingAid, id, &mut self.diagnostics)
    }

    pub fn unique_digital_object_id(&mut self, id: &str) -> String {
        self.registry
            .unique_digital_object_id(id, &mut self.diagnostics)
    }

    /// 随机消歧标记（与登记表无关）
    pub fn token(&self) -> String {
        disambiguation_token(self.config.disambiguation_token_length)
    }

    pub fn set_current_resource(&mut self, identifier: impl Into<String>) {
        self.current_resource_identifier = identifier.into();
    }

    pub fn current_resource(&self) -> &str {
        &self.current_resource_identifier
    }

    // ==========================================
    // 诊断 / 文档
    // ==========================================

    pub fn report(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics.report(Diagnostic::new(kind, message));
    }

    pub fn sink(&mut self) -> &mut dyn DiagnosticsSink {
        &mut self.diagnostics
    }

    // ==========================================
    // 单条记录事务
    // ==========================================

    /// 开始一条记录（确认此前登记的标识）
    pub fn checkpoint(&mut self) -> RecordCheckpoint {
        self.registry.commit();
        RecordCheckpoint {
            diagnostics: self.diagnostics.len(),
            current_resource_identifier: self.current_resource_identifier.clone(),
        }
    }

    /// 记录转换失败: 撤销其登记的标识、诊断与所属全宗变更
    pub fn rollback(&mut self, checkpoint: RecordCheckpoint) {
        let identifiers = self.registry.rollback();
        let diagnostics = self.diagnostics.len().saturating_sub(checkpoint.diagnostics);
        self.diagnostics.truncate(checkpoint.diagnostics);
        self.current_resource_identifier = checkpoint.current_resource_identifier;
        debug!(identifiers = identifiers, diagnostics = diagnostics, "记录转换失败,已回滚");
    }

    /// 新目标文档（已带外部标识回引）
    pub fn new_document(&self, kind: RecordKind, source_id: i64) -> TargetDocument {
        TargetDocument::for_record(kind, source_id, &self.config.external_id_source)
    }
}
