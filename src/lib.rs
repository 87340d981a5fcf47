// ==========================================
// 档案著录迁移 - 核心库
// ==========================================
// 职责: 旧档案管理系统记录 → 新档案管理系统 JSON 文档
// 技术栈: Rust + serde_json
// 定位: 纯转换核心（不含上传、不含数据库访问）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 源记录 / 目标文档 / 诊断
pub mod domain;

// 引擎层 - 日期、附注、标识、清洗规则
pub mod engine;

// 受控词解析
pub mod resolver;

// 转换层 - 分发与种类转换器
pub mod converter;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::MapperConfig;
pub use converter::{
    json_hook, ConversionContext, ConversionRun, ConvertError, ConvertResult, ConvertedRecord,
    DispatchTable, OverrideHook, RecordConverter, RunReport,
};
pub use domain::{
    Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticsSink, RecordKind, SourceRecord,
    TargetDocument,
};
pub use engine::{fix_empty_string, fix_url, shift_and_repair, IdentityRegistry};
pub use resolver::{EnumCategory, EnumResolver, StaticEnumResolver, UNMAPPED};

// ==========================================
// 常量
// ==========================================

/// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 系统名称
pub const APP_NAME: &str = "档案著录迁移";
