// ==========================================
// 档案著录迁移 - 受控词解析层
// ==========================================
// 职责: 源系统受控词 → 目标系统受控词
// 说明: 转换核心只依赖 EnumResolver Trait；
//       StaticEnumResolver 为表驱动的默认实现
// ==========================================

pub mod default_tables;
pub mod enum_lookup;
pub mod enum_resolver_trait;
pub mod static_resolver;

// 重导出
pub use enum_lookup::EnumLookup;
pub use enum_resolver_trait::{EnumCategory, EnumResolver, UNMAPPED};
pub use static_resolver::{DynamicEnum, LookupListItem, StaticEnumResolver};
