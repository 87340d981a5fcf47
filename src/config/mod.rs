// ==========================================
// 档案著录迁移 - 配置层
// ==========================================
// 职责: 转换运行参数（文件 + 环境变量覆写）
// ==========================================

pub mod mapper_config;

// 重导出
pub use mapper_config::{config_keys, MapperConfig};
