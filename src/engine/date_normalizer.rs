// ==========================================
// 档案著录迁移 - 日期规范化引擎
// ==========================================
// 职责: 由零散的起止年份/表达式构建日期条目,并修复倒置区间
// 输入: 摘要日期（年份整数）+ 结构化日期（ISO 字符串）
// 输出: Vec<DateRange>
// 红线: end >= begin；违反时 end := begin,并写入诊断
// ==========================================

use crate::converter::error::ConvertResult;
use crate::domain::date::DateRange;
use crate::domain::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticsSink};
use crate::domain::source::ArchDate;
use crate::domain::types::DateType;
use crate::engine::data_cleaner::{non_blank, UNSPECIFIED};
use crate::resolver::{EnumCategory, EnumLookup};

/// 默认纪元 / 历法
pub const DEFAULT_ERA: &str = "ce";
pub const DEFAULT_CALENDAR: &str = "gregorian";

// ==========================================
// SummaryDate - 摘要日期输入
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryDate<'a> {
    pub expression: &'a str,
    pub begin: Option<i32>,
    pub end: Option<i32>,
    pub bulk_begin: Option<i32>, // 仅登记/全宗
    pub bulk_end: Option<i32>,
}

// ==========================================
// DateNormalizer
// ==========================================
pub struct DateNormalizer;

impl DateNormalizer {
    /// 摘要日期 → 0..=2 个日期条目
    ///
    /// # 参数
    /// - label: 目标日期标签（other / digitized）
    /// - record_identifier: 诊断中引用的记录描述
    ///
    /// # 规则
    /// - 有 begin: inclusive,end 缺失时取 begin
    /// - 无 begin: 仅当表达式非空白时输出 single 条目
    /// - 有 bulk_begin: 另输出 bulk 条目（end 缺失时取 bulk_begin）
    pub fn summary_dates(
        input: &SummaryDate<'_>,
        label: &str,
        record_identifier: &str,
        sink: &mut dyn DiagnosticsSink,
    ) -> Vec<DateRange> {
        let mut dates = Vec::new();

        let mut main = DateRange::new(DateType::Single, label);
        main.expression = Some(input.expression.to_string());

        if let Some(begin) = input.begin {
            main.date_type = DateType::Inclusive;
            main.begin = Some(begin.to_string());
            let end = Self::repair_year_range(begin, input.end, "End", record_identifier, sink);
            main.end = Some(end.to_string());
        }

        if non_blank(input.expression).is_some() || input.begin.is_some() {
            dates.push(main);
        }

        if let Some(bulk_begin) = input.bulk_begin {
            let mut bulk = DateRange::new(DateType::Bulk, label);
            bulk.begin = Some(bulk_begin.to_string());
            let end = Self::repair_year_range(
                bulk_begin,
                input.bulk_end,
                "Bulk end",
                record_identifier,
                sink,
            );
            bulk.end = Some(end.to_string());
            dates.push(bulk);
        }

        dates
    }

    /// 结构化日期 → 日期条目（总是输出）
    ///
    /// # 规则
    /// - begin/end 为 "" 或 "0" 视为缺失
    /// - 无 begin 且表达式空白 → 表达式 "unspecified"
    /// - 标签/确定性/纪元/历法经受控词解析
    pub fn structured_date(
        date: &ArchDate,
        record_identifier: &str,
        lookup: &mut EnumLookup<'_>,
    ) -> ConvertResult<DateRange> {
        let begin = iso_part(&date.iso_date_begin);
        let end = iso_part(&date.iso_date_end);

        let date_type = if date.bulk {
            DateType::Bulk
        } else if begin.is_some() {
            DateType::Inclusive
        } else {
            DateType::Single
        };

        let label = match non_blank(&date.label) {
            Some(label) => lookup.resolve(EnumCategory::DateLabel, label)?,
            None => "other".to_string(),
        };

        let mut range = DateRange::new(date_type, label);
        range.expression = Some(date.expression.clone());

        match begin {
            Some(begin) => {
                range.begin = Some(begin.to_string());
                let end = match end {
                    Some(end) if iso_precedes(end, begin) => {
                        report_inversion(lookup.sink(), "End", end, begin, record_identifier);
                        begin
                    }
                    Some(end) => end,
                    None => begin,
                };
                range.end = Some(end.to_string());
            }
            None => {
                if non_blank(&date.expression).is_none() {
                    range.expression = Some(UNSPECIFIED.to_string());
                }
            }
        }

        range.certainty = lookup.resolve_present(EnumCategory::DateCertainty, &date.certainty)?;
        range.era = Some(match non_blank(&date.era) {
            Some(era) => lookup.resolve(EnumCategory::DateEra, era)?,
            None => DEFAULT_ERA.to_string(),
        });
        range.calendar = Some(match non_blank(&date.calendar) {
            Some(calendar) => lookup.resolve(EnumCategory::DateCalendar, calendar)?,
            None => DEFAULT_CALENDAR.to_string(),
        });

        Ok(range)
    }

    /// 摘要日期 + 全部结构化日期
    pub fn collect(
        summary: &SummaryDate<'_>,
        structured: &[ArchDate],
        label: &str,
        record_identifier: &str,
        lookup: &mut EnumLookup<'_>,
    ) -> ConvertResult<Vec<DateRange>> {
        let mut dates = Self::summary_dates(summary, label, record_identifier, lookup.sink());
        for date in structured {
            dates.push(Self::structured_date(date, record_identifier, lookup)?);
        }
        Ok(dates)
    }

    fn repair_year_range(
        begin: i32,
        end: Option<i32>,
        prefix: &str,
        record_identifier: &str,
        sink: &mut dyn DiagnosticsSink,
    ) -> i32 {
        match end {
            Some(end) if end < begin => {
                report_inversion(sink, prefix, end, begin, record_identifier);
                begin
            }
            Some(end) => end,
            None => begin,
        }
    }
}

fn iso_part(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value == "0" {
        None
    } else {
        Some(value)
    }
}

/// ISO 日期 → [年, 月, 日]（月日可缺省,年可带负号或不补零）
fn iso_components(value: &str) -> Option<Vec<i32>> {
    let (sign, rest) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value),
    };

    let mut parts = rest.split('-');
    let year: i32 = parts.next()?.trim().parse().ok()?;
    let mut components = vec![sign * year];
    for part in parts.take(2) {
        components.push(part.trim().parse().ok()?);
    }
    Some(components)
}

/// end 是否严格早于 begin（只比较两者共有的精度；无法解析时不判定为倒置）
fn iso_precedes(end: &str, begin: &str) -> bool {
    match (iso_components(end), iso_components(begin)) {
        (Some(end), Some(begin)) => {
            let shared = end.len().min(begin.len());
            end[..shared] < begin[..shared]
        }
        _ => false,
    }
}

fn report_inversion(
    sink: &mut dyn DiagnosticsSink,
    prefix: &str,
    end: impl std::fmt::Display,
    begin: impl std::fmt::Display,
    record_identifier: &str,
) {
    let begin_label = match prefix {
        "End" => "begin",
        _ => "bulk begin",
    };
    sink.report(Diagnostic::new(
        DiagnosticKind::DateRepaired,
        format!(
            "{} date: {} before {} date: {}, ignoring end date\n{}",
            prefix, end, begin_label, begin, record_identifier
        ),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostic::DiagnosticLog;
    use crate::resolver::StaticEnumResolver;

    #[test]
    fn test_inverted_range_repaired() {
        let mut log = DiagnosticLog::new();
        let input = SummaryDate {
            begin: Some(1990),
            end: Some(1980),
            ..Default::default()
        };

        let dates = DateNormalizer::summary_dates(&input, "other", "Accession: 1", &mut log);
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].date_type, DateType::Inclusive);
        assert_eq!(dates[0].begin.as_deref(), Some("1990"));
        assert_eq!(dates[0].end.as_deref(), Some("1990"));

        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].kind, DiagnosticKind::DateRepaired);
        assert!(log.entries()[0].message.contains("before begin date"));
    }

    #[test]
    fn test_no_begin_no_expression_emits_nothing() {
        let mut log = DiagnosticLog::new();
        let dates =
            DateNormalizer::summary_dates(&SummaryDate::default(), "other", "x", &mut log);
        assert!(dates.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_expression_only_is_single() {
        let mut log = DiagnosticLog::new();
        let input = SummaryDate {
            expression: "circa 1900",
            ..Default::default()
        };
        let dates = DateNormalizer::summary_dates(&input, "digitized", "x", &mut log);
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].date_type, DateType::Single);
        assert_eq!(dates[0].label, "digitized");
        assert_eq!(dates[0].expression.as_deref(), Some("circa 1900"));
        assert!(dates[0].begin.is_none());
    }

    #[test]
    fn test_bulk_entry_end_defaults_and_repairs() {
        let mut log = DiagnosticLog::new();
        let input = SummaryDate {
            expression: "1900-1950",
            begin: Some(1900),
            end: Some(1950),
            bulk_begin: Some(1920),
            bulk_end: None,
        };
        let dates = DateNormalizer::summary_dates(&input, "other", "Resource: MS.1", &mut log);
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[1].date_type, DateType::Bulk);
        assert_eq!(dates[1].end.as_deref(), Some("1920"));
        assert!(log.is_empty());

        let inverted = SummaryDate {
            bulk_begin: Some(1930),
            bulk_end: Some(1925),
            ..Default::default()
        };
        let dates = DateNormalizer::summary_dates(&inverted, "other", "Resource: MS.1", &mut log);
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].end.as_deref(), Some("1930"));
        assert!(log.entries()[0]
            .message
            .starts_with("Bulk end date: 1925 before bulk begin date: 1930"));
    }

    #[test]
    fn test_structured_date_zero_is_absent() {
        let resolver = StaticEnumResolver::with_default_tables();
        let mut log = DiagnosticLog::new();
        let mut lookup = EnumLookup::new(&resolver, &mut log);

        let date = ArchDate {
            iso_date_begin: "0".to_string(),
            iso_date_end: "".to_string(),
            label: "Creation".to_string(),
            ..Default::default()
        };
        let range = DateNormalizer::structured_date(&date, "x", &mut lookup).unwrap();
        assert_eq!(range.date_type, DateType::Single);
        assert_eq!(range.label, "creation");
        assert_eq!(range.expression.as_deref(), Some("unspecified"));
        assert!(range.begin.is_none());
        assert_eq!(range.era.as_deref(), Some("ce"));
        assert_eq!(range.calendar.as_deref(), Some("gregorian"));
    }

    #[test]
    fn test_iso_comparison_uses_shared_precision() {
        assert!(!iso_precedes("1990", "1990-05-01"));
        assert!(!iso_precedes("1000", "999"));
        assert!(!iso_precedes("1990-05", "1990-05-31"));
        assert!(iso_precedes("1989-12-31", "1990"));
        assert!(iso_precedes("1990-04-30", "1990-05-01"));
        assert!(iso_precedes("-50", "10"));
        assert!(!iso_precedes("circa", "1990"));
    }

    #[test]
    fn test_structured_mixed_precision_range_kept() {
        let resolver = StaticEnumResolver::with_default_tables();
        let mut log = DiagnosticLog::new();
        let mut lookup = EnumLookup::new(&resolver, &mut log);

        for (begin, end) in [("1990-05-01", "1990"), ("999", "1000")] {
            let date = ArchDate {
                iso_date_begin: begin.to_string(),
                iso_date_end: end.to_string(),
                ..Default::default()
            };
            let range = DateNormalizer::structured_date(&date, "x", &mut lookup).unwrap();
            assert_eq!(range.begin.as_deref(), Some(begin));
            assert_eq!(range.end.as_deref(), Some(end));
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_structured_date_end_defaults_to_begin() {
        let resolver = StaticEnumResolver::with_default_tables();
        let mut log = DiagnosticLog::new();
        let mut lookup = EnumLookup::new(&resolver, &mut log);

        let date = ArchDate {
            expression: "1901".to_string(),
            iso_date_begin: "1901-05-01".to_string(),
            certainty: "circa".to_string(),
            ..Default::default()
        };
        let range = DateNormalizer::structured_date(&date, "x", &mut lookup).unwrap();
        assert_eq!(range.date_type, DateType::Inclusive);
        assert_eq!(range.begin.as_deref(), Some("1901-05-01"));
        assert_eq!(range.end.as_deref(), Some("1901-05-01"));
        assert_eq!(range.certainty.as_deref(), Some("approximate"));

        let serialized = serde_json::to_value(&range).unwrap();
        assert_eq!(serialized["calendar"], "gregorian");
        assert_eq!(serialized["date_type"], "inclusive");
    }
}
