// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 默认: 本 crate 输出 info（含每条转换诊断的 warn）,依赖库只输出 warn
// 批量迁移可切换为 JSON 行输出,便于归档诊断
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 默认过滤规则
pub const DEFAULT_FILTER: &str = "warn,archives_migration=info";
/// 测试过滤规则（逐条记录的转换细节）
pub const TEST_FILTER: &str = "warn,archives_migration=debug";
/// 输出格式环境变量（"json" → JSON 行）
pub const FORMAT_ENV: &str = "ARCHIVES_MIGRATION_LOG_FORMAT";

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 覆盖默认过滤规则
///   例如: RUST_LOG=archives_migration::engine=debug 查看标识消歧与附注转换
/// - ARCHIVES_MIGRATION_LOG_FORMAT=json: 以 JSON 行输出
///
/// # 示例
/// ```no_run
/// use archives_migration::logging;
/// logging::init();
/// tracing::info!(records = 120, "开始迁移");
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var(FORMAT_ENV)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr); // stdout 留给转换结果

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// 初始化测试环境的日志系统（可重复调用）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(TEST_FILTER))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_parse() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        assert!(EnvFilter::try_new(TEST_FILTER).is_ok());
    }

    #[test]
    fn test_init_test_is_idempotent() {
        init_test();
        init_test();
        tracing::debug!("logging ready");
    }
}
