// ==========================================
// 档案著录迁移 - 转换配置
// ==========================================
// 职责: 转换运行参数的加载、环境变量覆写、校验
// 来源优先级: 环境变量 > 配置文件 > 默认值
// 存储: <用户配置目录>/archives-migration/config.json
// ==========================================

use crate::converter::error::{ConvertError, ConvertResult};
use crate::engine::identity_registry::DEFAULT_TOKEN_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    pub const CONFIG_PATH: &str = "ARCHIVES_MIGRATION_CONFIG";
    pub const EXTERNAL_ID_SOURCE: &str = "ARCHIVES_MIGRATION_EXTERNAL_ID_SOURCE";
    pub const VOCABULARY_URI: &str = "ARCHIVES_MIGRATION_VOCABULARY_URI";
    pub const RETURN_SOURCE_VALUE: &str = "ARCHIVES_MIGRATION_RETURN_SOURCE_VALUE";
    pub const TOKEN_LENGTH: &str = "ARCHIVES_MIGRATION_TOKEN_LENGTH";
    pub const PLACEHOLDER_AGENT_URI: &str = "ARCHIVES_MIGRATION_PLACEHOLDER_AGENT_URI";
    pub const PLACEHOLDER_RECORD_URI: &str = "ARCHIVES_MIGRATION_PLACEHOLDER_RECORD_URI";
    pub const ENUM_TABLES_PATH: &str = "ARCHIVES_MIGRATION_ENUM_TABLES";
}

/// 配置目录名
pub const CONFIG_DIR_NAME: &str = "archives-migration";
/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// MapperConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub external_id_source: String,     // 外部标识来源标签前缀
    pub vocabulary_uri: String,         // 主题词表 URI
    pub return_source_value: bool,      // 受控词未映射时返回源值
    pub disambiguation_token_length: usize,
    pub placeholder_agent_uri: String,  // 登记事件的占位代理
    pub placeholder_record_uri: String, // 登记事件的占位关联记录
    pub enum_tables_path: Option<PathBuf>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            external_id_source: "Archivists Toolkit Database".to_string(),
            vocabulary_uri: "/vocabularies/1".to_string(),
            return_source_value: false,
            disambiguation_token_length: DEFAULT_TOKEN_LENGTH,
            placeholder_agent_uri: "/agents/people/1".to_string(),
            placeholder_record_uri: "/repositories/1/accessions/1".to_string(),
            enum_tables_path: None,
        }
    }
}

impl MapperConfig {
    /// 默认配置文件路径
    ///
    /// # 返回
    /// - Some: <用户配置目录>/archives-migration/config.json
    /// - None: 平台没有用户配置目录
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 从 JSON 文件加载（缺省字段取默认值）
    pub fn load(path: &Path) -> ConvertResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: MapperConfig =
            serde_json::from_str(&raw).map_err(|e| ConvertError::ConfigReadError {
                key: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;

        info!(path = %path.display(), "加载转换配置");
        Ok(config)
    }

    /// 解析配置: 显式路径 → 环境变量路径 → 默认路径（存在时）→ 默认值,
    /// 最后应用环境变量覆写
    pub fn resolve(explicit: Option<&Path>) -> ConvertResult<Self> {
        let env_path = std::env::var(config_keys::CONFIG_PATH)
            .ok()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let path = match (explicit, env_path) {
            (Some(path), _) => Some(path.to_path_buf()),
            (None, Some(path)) => Some(path),
            (None, None) => Self::default_path().filter(|p| p.exists()),
        };

        let mut config = match path {
            Some(path) => Self::load(&path)?,
            None => {
                debug!("未找到配置文件,使用默认配置");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// 应用覆写（键为环境变量名）
    ///
    /// # 参数
    /// - lookup: 键 → 值（测试中可注入）
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConvertResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(value) = get(config_keys::EXTERNAL_ID_SOURCE) {
            self.external_id_source = value;
        }
        if let Some(value) = get(config_keys::VOCABULARY_URI) {
            self.vocabulary_uri = value;
        }
        if let Some(value) = get(config_keys::RETURN_SOURCE_VALUE) {
            self.return_source_value = parse_bool(config_keys::RETURN_SOURCE_VALUE, &value)?;
        }
        if let Some(value) = get(config_keys::TOKEN_LENGTH) {
            self.disambiguation_token_length =
                value
                    .parse::<usize>()
                    .map_err(|e| ConvertError::ConfigValueError {
                        key: config_keys::TOKEN_LENGTH.to_string(),
                        value: value.clone(),
                        message: e.to_string(),
                    })?;
        }
        if let Some(value) = get(config_keys::PLACEHOLDER_AGENT_URI) {
            self.placeholder_agent_uri = value;
        }
        if let Some(value) = get(config_keys::PLACEHOLDER_RECORD_URI) {
            self.placeholder_record_uri = value;
        }
        if let Some(value) = get(config_keys::ENUM_TABLES_PATH) {
            self.enum_tables_path = Some(PathBuf::from(value));
        }

        self.validate()
    }

    /// 校验配置值
    pub fn validate(&self) -> ConvertResult<()> {
        if self.external_id_source.trim().is_empty() {
            return Err(ConvertError::ConfigValueError {
                key: "external_id_source".to_string(),
                value: self.external_id_source.clone(),
                message: "来源标签不能为空".to_string(),
            });
        }

        if !(1..=32).contains(&self.disambiguation_token_length) {
            return Err(ConvertError::ConfigValueError {
                key: "disambiguation_token_length".to_string(),
                value: self.disambiguation_token_length.to_string(),
                message: "消歧标记长度必须在 1..=32 之间".to_string(),
            });
        }

        for (key, uri) in [
            ("vocabulary_uri", &self.vocabulary_uri),
            ("placeholder_agent_uri", &self.placeholder_agent_uri),
            ("placeholder_record_uri", &self.placeholder_record_uri),
        ] {
            if !uri.starts_with('/') {
                return Err(ConvertError::ConfigValueError {
                    key: key.to_string(),
                    value: uri.clone(),
                    message: "URI 必须以 '/' 开头".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> ConvertResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConvertError::ConfigValueError {
            key: key.to_string(),
            value: value.to_string(),
            message: "期望布尔值".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = MapperConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.disambiguation_token_length, 6);
        assert_eq!(config.vocabulary_uri, "/vocabularies/1");
    }

    #[test]
    fn test_overrides_applied() {
        let env: HashMap<&str, &str> = [
            (config_keys::RETURN_SOURCE_VALUE, "yes"),
            (config_keys::TOKEN_LENGTH, " 8 "),
            (config_keys::VOCABULARY_URI, "/vocabularies/7"),
            (config_keys::EXTERNAL_ID_SOURCE, ""),
        ]
        .into_iter()
        .collect();

        let mut config = MapperConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert!(config.return_source_value);
        assert_eq!(config.disambiguation_token_length, 8);
        assert_eq!(config.vocabulary_uri, "/vocabularies/7");
        // 空值不覆写
        assert_eq!(config.external_id_source, "Archivists Toolkit Database");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut config = MapperConfig::default();
        let err = config.apply_overrides(|key| {
            (key == config_keys::TOKEN_LENGTH).then(|| "many".to_string())
        });
        assert!(matches!(err, Err(ConvertError::ConfigValueError { .. })));

        let mut config = MapperConfig::default();
        let err = config.apply_overrides(|key| {
            (key == config_keys::TOKEN_LENGTH).then(|| "64".to_string())
        });
        assert!(matches!(err, Err(ConvertError::ConfigValueError { .. })));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MapperConfig =
            serde_json::from_str(r#"{"return_source_value": true}"#).unwrap();
        assert!(config.return_source_value);
        assert_eq!(config.external_id_source, "Archivists Toolkit Database");
    }
}
