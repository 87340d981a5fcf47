// ==========================================
// 档案著录迁移 - 转换模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 记录级致命情况不是错误（返回 None + 诊断）,
//       这里只包含需要向调用方传播的失败
// ==========================================

use crate::domain::types::RecordKind;
use thiserror::Error;

/// 转换模块错误类型
#[derive(Error, Debug)]
pub enum ConvertError {
    // ===== 协作者错误 =====
    #[error("受控词解析失败 (类别 {category}, 值 {value}): {message}")]
    ResolverError {
        category: String,
        value: String,
        message: String,
    },

    #[error("覆写钩子执行失败 (记录种类 {kind}): {message}")]
    OverrideFailed { kind: RecordKind, message: String },

    #[error("覆写钩子输出不符合目标模式 (记录种类 {kind}): {message}")]
    OverrideSchemaMismatch { kind: RecordKind, message: String },

    // ===== 配置错误 =====
    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 序列化 / 文件 =====
    #[error("JSON 处理失败: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::FileReadError(err.to_string())
    }
}

/// Result 类型别名
pub type ConvertResult<T> = Result<T, ConvertError>;
