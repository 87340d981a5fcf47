// ==========================================
// 档案著录迁移 - 转换层
// ==========================================
// 职责: 按记录种类把源记录转换为目标文档
// 流向: 分发器 → 种类转换器 → 引擎/解析器 → 目标文档
// 红线: 记录级致命情况返回 None + 诊断,协作者失败向上传播
// ==========================================

pub mod accession;
pub mod admin;
pub mod agent;
pub mod common;
pub mod context;
pub mod digital_object;
pub mod dispatcher;
pub mod error;
pub mod instance;
pub mod resource;
pub mod run;

// 重导出
pub use context::{ConversionContext, RecordCheckpoint};
pub use dispatcher::{
    json_hook, ConversionStrategy, DispatchTable, DispatchTableBuilder, OverrideHook,
    RecordConverter,
};
pub use error::{ConvertError, ConvertResult};
pub use run::{ConversionRun, ConvertedRecord, RecordFailure, RunReport};
