// ==========================================
// 档案著录迁移 - 表驱动受控词解析器
// ==========================================
// 职责: 按类别查表翻译受控词 + 用户可扩展动态列表
// 规则: 键 TRIM + 小写后匹配；未命中返回 UNMAPPED
//       （return_source_value 开启时返回源值本身）
// ==========================================

use crate::converter::error::{ConvertError, ConvertResult};
use crate::resolver::default_tables::default_tables;
use crate::resolver::enum_resolver_trait::{EnumCategory, EnumResolver, UNMAPPED};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// 源系统查找列表条目
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LookupListItem {
    pub list_item: String,
    pub code: String,
}

/// 动态枚举（供上传端同步到目标系统）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicEnum {
    pub name: String,
    pub values: Vec<String>,
}

// ==========================================
// StaticEnumResolver
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StaticEnumResolver {
    tables: HashMap<EnumCategory, HashMap<String, String>>,
    dynamic_lists: HashMap<String, Vec<String>>,
    return_source_value: bool,
}

fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

impl StaticEnumResolver {
    /// 空解析器（所有值均为 UNMAPPED）
    pub fn new() -> Self {
        Self::default()
    }

    /// 带默认映射表的解析器
    pub fn with_default_tables() -> Self {
        let mut resolver = Self::new();
        for (category, entries) in default_tables() {
            for (source, target) in entries {
                resolver.insert(category, source, target);
            }
        }
        resolver
    }

    /// 添加/覆盖一条映射
    pub fn insert(&mut self, category: EnumCategory, source: &str, target: &str) {
        self.tables
            .entry(category)
            .or_default()
            .insert(normalize_key(source), target.to_string());
    }

    /// 未映射时是否返回源值（代替 UNMAPPED）
    pub fn set_return_source_value(&mut self, value: bool) {
        self.return_source_value = value;
    }

    /// 从 JSON 字符串合并映射表
    ///
    /// # 格式
    /// `{"extent_type": {"Linear Feet": "linear_feet"}, ...}`
    pub fn merge_json_str(&mut self, raw: &str) -> ConvertResult<usize> {
        let parsed: HashMap<String, HashMap<String, String>> = serde_json::from_str(raw)?;
        let mut merged = 0;

        for (category_name, entries) in parsed {
            let category: EnumCategory =
                serde_json::from_value(Value::String(category_name.clone())).map_err(|e| {
                    ConvertError::ConfigValueError {
                        key: "enum_tables".to_string(),
                        value: category_name.clone(),
                        message: format!("未知受控词类别: {}", e),
                    }
                })?;

            for (source, target) in entries {
                self.insert(category, &source, &target);
                merged += 1;
            }
        }

        debug!(merged = merged, "受控词映射表合并完成");
        Ok(merged)
    }

    /// 从 JSON 文件合并映射表
    pub fn merge_json_file(&mut self, path: &Path) -> ConvertResult<usize> {
        let raw = std::fs::read_to_string(path)?;
        let merged = self.merge_json_str(&raw)?;
        info!(path = %path.display(), merged = merged, "加载受控词映射表");
        Ok(merged)
    }

    /// 源值或代码是否已映射到目标列表中的值
    pub fn maps_to_value(&self, category: EnumCategory, value: &str, code: &str) -> bool {
        let value_key = normalize_key(value);
        let code_key = normalize_key(code);

        let in_table = self.tables.get(&category).map_or(false, |table| {
            table.contains_key(&value_key) || (!code_key.is_empty() && table.contains_key(&code_key))
        });
        let in_dynamic = self
            .dynamic_lists
            .get(category.as_str())
            .map_or(false, |values| values.contains(&value_key));

        in_table || in_dynamic
    }

    /// 同步源系统查找列表到动态枚举
    ///
    /// # 返回
    /// - Some(DynamicEnum): 该列表对应的动态枚举（含新增的小写值）
    /// - None: 该查找列表在目标系统中不可扩展
    pub fn map_lookup_list(
        &mut self,
        list_name: &str,
        items: &[LookupListItem],
    ) -> ConvertResult<Option<DynamicEnum>> {
        let category = match EnumCategory::from_lookup_list(list_name) {
            Some(category) => category,
            None => return Ok(None),
        };

        for item in items {
            if !self.maps_to_value(category, &item.list_item, &item.code) {
                self.register_dynamic_value(category.as_str(), &item.list_item)?;
            }
        }

        Ok(Some(DynamicEnum {
            name: category.as_str().to_string(),
            values: self.dynamic_values(category.as_str()).to_vec(),
        }))
    }

    /// 动态列表当前值
    pub fn dynamic_values(&self, list_name: &str) -> &[String] {
        self.dynamic_lists
            .get(list_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl EnumResolver for StaticEnumResolver {
    fn resolve(&self, category: EnumCategory, value: &str) -> ConvertResult<String> {
        if let Some(target) = self.lookup_exact(category, value)? {
            return Ok(target);
        }

        if self.return_source_value && !value.trim().is_empty() {
            return Ok(value.trim().to_string());
        }

        Ok(UNMAPPED.to_string())
    }

    fn lookup_exact(&self, category: EnumCategory, value: &str) -> ConvertResult<Option<String>> {
        let key = normalize_key(value);

        if let Some(target) = self.tables.get(&category).and_then(|t| t.get(&key)) {
            return Ok(Some(target.clone()));
        }

        let in_dynamic = self
            .dynamic_lists
            .get(category.as_str())
            .map_or(false, |values| values.contains(&key));
        Ok(in_dynamic.then_some(key))
    }

    fn register_dynamic_value(&mut self, list_name: &str, value: &str) -> ConvertResult<()> {
        let category = EnumCategory::from_name(list_name)
            .filter(EnumCategory::is_dynamic)
            .ok_or_else(|| ConvertError::ResolverError {
                category: list_name.to_string(),
                value: value.to_string(),
                message: "目标系统中该列表不可扩展".to_string(),
            })?;

        let key = normalize_key(value);
        if key.is_empty() {
            return Ok(());
        }

        let values = self.dynamic_lists.entry(category.as_str().to_string()).or_default();
        if !values.contains(&key) {
            debug!(list = category.as_str(), value = %key, "注册动态枚举值");
            values.push(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let resolver = StaticEnumResolver::with_default_tables();
        assert_eq!(
            resolver.resolve(EnumCategory::ExtentType, "  linear FEET ").unwrap(),
            "linear_feet"
        );
        assert_eq!(
            resolver
                .resolve(EnumCategory::MultiPartNoteType, "Scope and Contents note")
                .unwrap(),
            "scopecontent"
        );
    }

    #[test]
    fn test_unmapped_sentinel_and_source_value_mode() {
        let mut resolver = StaticEnumResolver::with_default_tables();
        assert_eq!(
            resolver.resolve(EnumCategory::ExtentType, "Bushels").unwrap(),
            UNMAPPED
        );

        resolver.set_return_source_value(true);
        assert_eq!(
            resolver.resolve(EnumCategory::ExtentType, "Bushels").unwrap(),
            "Bushels"
        );
    }

    #[test]
    fn test_merge_json_tables() {
        let mut resolver = StaticEnumResolver::new();
        let merged = resolver
            .merge_json_str(r#"{"extent_type": {"Bushels": "bushels"}}"#)
            .unwrap();
        assert_eq!(merged, 1);
        assert_eq!(
            resolver.resolve(EnumCategory::ExtentType, "bushels").unwrap(),
            "bushels"
        );

        let err = resolver.merge_json_str(r#"{"no_such_list": {"a": "b"}}"#);
        assert!(matches!(err, Err(ConvertError::ConfigValueError { .. })));
    }

    #[test]
    fn test_exact_lookup_ignores_source_value_mode() {
        let mut resolver = StaticEnumResolver::with_default_tables();
        resolver.set_return_source_value(true);

        assert_eq!(
            resolver
                .lookup_exact(EnumCategory::SinglePartNoteType, "Biographical/Historical note")
                .unwrap(),
            None
        );
        assert_eq!(
            resolver.lookup_exact(EnumCategory::Salutation, "Dr.").unwrap(),
            None
        );
        assert_eq!(
            resolver
                .lookup_exact(EnumCategory::ExtentType, "Linear Feet")
                .unwrap()
                .as_deref(),
            Some("linear_feet")
        );
    }

    #[test]
    fn test_register_into_fixed_list_rejected() {
        let mut resolver = StaticEnumResolver::with_default_tables();

        let err = resolver.register_dynamic_value("resource_level", "shelf");
        assert!(matches!(err, Err(ConvertError::ResolverError { .. })));
        let err = resolver.register_dynamic_value("no_such_list", "x");
        assert!(matches!(err, Err(ConvertError::ResolverError { .. })));

        resolver.register_dynamic_value("container_type", "Crate").unwrap();
        assert_eq!(resolver.dynamic_values("container_type"), ["crate"]);
    }

    #[test]
    fn test_map_lookup_list_registers_unmapped_values() {
        let mut resolver = StaticEnumResolver::with_default_tables();
        let items = vec![
            LookupListItem {
                list_item: "Linear Feet".to_string(),
                code: String::new(),
            },
            LookupListItem {
                list_item: "Bushels".to_string(),
                code: String::new(),
            },
        ];

        let dynamic = resolver
            .map_lookup_list("Extent type", &items)
            .unwrap()
            .unwrap();
        assert_eq!(dynamic.name, "extent_type");
        assert_eq!(dynamic.values, vec!["bushels"]);

        // 注册后可直接解析
        assert_eq!(
            resolver.resolve(EnumCategory::ExtentType, "BUSHELS").unwrap(),
            "bushels"
        );

        assert!(resolver
            .map_lookup_list("Not a dynamic list", &items)
            .unwrap()
            .is_none());
    }
}
