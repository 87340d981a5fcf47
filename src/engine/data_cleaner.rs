// ==========================================
// 档案著录迁移 - 字段清洗规则
// ==========================================
// 职责: 空值占位 / URL 修复 / 访问级别分组映射
// 红线: 目标模式必填字段不得为空白
// ==========================================

use serde_json::Value;
use std::collections::HashMap;

/// 空白必填字段的默认占位值
pub const UNSPECIFIED: &str = "unspecified";

/// URL 为空时的占位地址
pub const UNSPECIFIED_URL: &str = "http://url.unspecified";

/// 访问级别分组键中的分隔前缀
pub const ACCESS_CLASS_PREFIX: &str = "_AccessClass_";

/// 空白转占位
///
/// # 参数
/// - text: 原始文本
/// - fallback: 调用方指定的占位值（None 时为 "unspecified"）
///
/// # 返回
/// - 原文本（非空白时原样返回,不做 TRIM）
/// - 占位值（空或仅空白时）
pub fn fix_empty_string(text: &str, fallback: Option<&str>) -> String {
    if text.trim().is_empty() {
        fallback.unwrap_or(UNSPECIFIED).to_string()
    } else {
        text.to_string()
    }
}

/// 空白 → None,其余原样保留
pub fn non_blank(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// 修复 URL,避免目标系统拒收
///
/// # 规则
/// - 空白 → http://url.unspecified
/// - 已含 "://" → 原样
/// - 以 "/" 开头或含 ":\"（本地路径）→ 加 file:// 前缀
/// - 其他 → 加 http:// 前缀
pub fn fix_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return UNSPECIFIED_URL.to_string();
    }

    let lowercase = url.to_lowercase();
    if lowercase.contains("://") {
        url.to_string()
    } else if lowercase.starts_with('/') || lowercase.contains(":\\") {
        format!("file://{}", url)
    } else {
        format!("http://{}", url)
    }
}

/// 目标系统用户组 → 源系统访问级别
///
/// # 返回
/// - Some(0..=5): 对应访问级别
/// - None: 该组不参与映射
pub fn access_class_for_group(group_code: &str) -> Option<u8> {
    match group_code {
        "administrators" => Some(5),
        "repository-managers" => Some(4),
        "repository-archivists" => Some(3),
        "repository-advanced-data-entry" => Some(2),
        "repository-basic-data-entry" => Some(1),
        "repository-viewers" => Some(0),
        _ => None,
    }
}

/// 将用户组登记到 "<仓库 URI>_AccessClass_<级别>" 键下
///
/// # 返回
/// - Some(key): 已登记的键
/// - None: 缺少 group_code 或该组不参与映射
pub fn map_access_class(
    repository_groups: &mut HashMap<String, Value>,
    group: &Value,
    repository_uri: &str,
) -> Option<String> {
    let group_code = group.get("group_code")?.as_str()?;
    let access_class = access_class_for_group(group_code)?;

    let key = format!("{}{}{}", repository_uri, ACCESS_CLASS_PREFIX, access_class);
    repository_groups.insert(key.clone(), group.clone());
    Some(key)
}
