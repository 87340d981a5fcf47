// ==========================================
// 档案著录迁移 - 转换器公共部件
// ==========================================
// 职责: 多个记录种类共用的子文档（数量、外部文档、语言、
//       去登记、用户自定义字段、引用对象）
// ==========================================

use crate::converter::context::ConversionContext;
use crate::converter::error::ConvertResult;
use crate::domain::date::DateRange;
use crate::domain::note::NoteNode;
use crate::domain::source::{Deaccession, ExternalReference, PhysicalDescription, UserDefinedFields};
use crate::domain::target::TargetDocument;
use crate::engine::data_cleaner::{fix_empty_string, fix_url, non_blank, UNSPECIFIED};
use crate::resolver::EnumCategory;
use serde_json::{json, Map, Value};

/// 数量数值格式（整数保留一位小数: 5 → "5.0"）
pub fn format_extent_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 {
        format!("{:.1}", number)
    } else {
        number.to_string()
    }
}

/// 引用对象 {"ref": uri}
pub fn reference(uri: &str) -> Value {
    json!({ "ref": uri })
}

// ==========================================
// 数量 (Extents)
// ==========================================

/// 整体数量（数值缺失时为 "0"）
pub fn whole_extent(
    ctx: &mut ConversionContext,
    number: Option<f64>,
    extent_type: &str,
    container_summary: &str,
) -> ConvertResult<Value> {
    Ok(json!({
        "portion": "whole",
        "number": number.map(format_extent_number).unwrap_or_else(|| "0".to_string()),
        "extent_type": ctx.resolve(EnumCategory::ExtentType, extent_type)?,
        "container_summary": container_summary,
    }))
}

/// 物理描述 → 部分数量（数值缺失时为 "1.0"）
pub fn part_extents(
    ctx: &mut ConversionContext,
    descriptions: &[PhysicalDescription],
) -> ConvertResult<Vec<Value>> {
    let mut extents = Vec::with_capacity(descriptions.len());
    for description in descriptions {
        extents.push(json!({
            "portion": "part",
            "number": description
                .extent_number
                .map(format_extent_number)
                .unwrap_or_else(|| "1.0".to_string()),
            "extent_type": ctx.resolve(EnumCategory::ExtentType, &description.extent_type)?,
            "container_summary": description.container_summary,
            "physical_details": description.physical_detail,
            "dimensions": description.dimensions,
        }));
    }
    Ok(extents)
}

// ==========================================
// 其他子文档
// ==========================================

pub fn external_documents(references: &[ExternalReference]) -> Vec<Value> {
    references
        .iter()
        .map(|reference| {
            json!({
                "title": fix_empty_string(&reference.title, None),
                "location": fix_url(&reference.href),
            })
        })
        .collect()
}

/// 语言代码（源值非空时写入）
pub fn add_language(
    ctx: &mut ConversionContext,
    doc: &mut TargetDocument,
    language_code: &str,
) -> ConvertResult<()> {
    if let Some(language) = ctx.resolve_present(EnumCategory::LanguageCode, language_code)? {
        doc.insert("language", language);
    }
    Ok(())
}

/// 去登记记录
pub fn deaccessions(
    ctx: &mut ConversionContext,
    deaccessions: &[Deaccession],
) -> ConvertResult<Vec<Value>> {
    let mut converted = Vec::with_capacity(deaccessions.len());

    for deaccession in deaccessions {
        let mut date = json!({
            "date_type": "single",
            "label": "deaccession",
            "era": "ce",
            "calendar": "gregorian",
        });
        match deaccession.deaccession_date {
            Some(day) => {
                date["expression"] = json!(day.to_string());
                date["begin"] = json!(day.to_string());
            }
            None => date["expression"] = json!(UNSPECIFIED),
        }

        let mut value = json!({
            "scope": "part",
            "description": deaccession.description,
            "reason": deaccession.reason,
            "disposition": deaccession.disposition,
            "notification": deaccession.notification,
            "date": date,
        });

        if let Some(extent) = deaccession.extent {
            value["extents"] = json!([{
                "portion": "whole",
                "number": format_extent_number(extent),
                "extent_type": ctx.resolve(EnumCategory::ExtentType, &deaccession.extent_type)?,
                "container_summary": deaccession.description,
            }]);
        }

        converted.push(value);
    }

    Ok(converted)
}

/// 用户自定义字段子集
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDefinedScope {
    Accession,      // 全部字段
    Resource,       // string_1 / string_2
    AnalogInstance, // boolean_1/2 + string_1/2
}

pub fn user_defined(fields: &UserDefinedFields, scope: UserDefinedScope) -> Value {
    let mut map = Map::new();

    match scope {
        UserDefinedScope::Accession => {
            map.insert("boolean_1".into(), json!(fields.boolean_1));
            map.insert("boolean_2".into(), json!(fields.boolean_2));
            let numbers = [
                ("integer_1", fields.integer_1.map(|v| v.to_string())),
                ("integer_2", fields.integer_2.map(|v| v.to_string())),
                ("real_1", fields.real_1.map(|v| v.to_string())),
                ("real_2", fields.real_2.map(|v| v.to_string())),
                ("date_1", fields.date_1.map(|v| v.to_string())),
                ("date_2", fields.date_2.map(|v| v.to_string())),
            ];
            for (key, value) in numbers {
                if let Some(value) = value {
                    map.insert(key.into(), json!(value));
                }
            }
            for (key, value) in [
                ("string_1", &fields.string_1),
                ("string_2", &fields.string_2),
                ("string_3", &fields.string_3),
                ("text_1", &fields.text_1),
                ("text_2", &fields.text_2),
                ("text_3", &fields.text_3),
                ("text_4", &fields.text_4),
            ] {
                map.insert(key.into(), json!(value));
            }
        }
        UserDefinedScope::Resource => {
            map.insert("string_1".into(), json!(fields.string_1));
            map.insert("string_2".into(), json!(fields.string_2));
        }
        UserDefinedScope::AnalogInstance => {
            map.insert("boolean_1".into(), json!(fields.boolean_1));
            map.insert("boolean_2".into(), json!(fields.boolean_2));
            map.insert("string_1".into(), json!(fields.string_1));
            map.insert("string_2".into(), json!(fields.string_2));
        }
    }

    Value::Object(map)
}

/// 日期列表（非空时写入 "dates"）
pub fn insert_dates(doc: &mut TargetDocument, dates: &[DateRange]) -> ConvertResult<()> {
    if !dates.is_empty() {
        doc.insert_serialized("dates", &dates)?;
    }
    Ok(())
}

pub fn insert_notes(doc: &mut TargetDocument, notes: &[NoteNode]) -> ConvertResult<()> {
    doc.insert_serialized("notes", &notes)?;
    Ok(())
}

/// 可选文本 → JSON（空白时为 None）
pub fn present(text: &str) -> Option<String> {
    non_blank(text).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_extent_number_format() {
        assert_eq!(format_extent_number(5.0), "5.0");
        assert_eq!(format_extent_number(2.5), "2.5");
    }

    #[test]
    fn test_whole_and_part_extents() {
        let mut ctx = ConversionContext::with_defaults();
        let whole = whole_extent(&mut ctx, None, "Linear Feet", "3 boxes").unwrap();
        assert_eq!(whole["number"], "0");
        assert_eq!(whole["extent_type"], "linear_feet");

        let parts = part_extents(
            &mut ctx,
            &[PhysicalDescription {
                extent_type: "Items".to_string(),
                dimensions: "10 x 12 in.".to_string(),
                ..Default::default()
            }],
        )
        .unwrap();
        assert_eq!(parts[0]["portion"], "part");
        assert_eq!(parts[0]["number"], "1.0");
        assert_eq!(parts[0]["dimensions"], "10 x 12 in.");
    }

    #[test]
    fn test_deaccession_date_and_extent() {
        let mut ctx = ConversionContext::with_defaults();
        let converted = deaccessions(
            &mut ctx,
            &[
                Deaccession {
                    description: "Duplicates".to_string(),
                    deaccession_date: NaiveDate::from_ymd_opt(2010, 6, 1),
                    extent: Some(2.0),
                    extent_type: "Cubic Feet".to_string(),
                    ..Default::default()
                },
                Deaccession::default(),
            ],
        )
        .unwrap();

        assert_eq!(converted[0]["date"]["begin"], "2010-06-01");
        assert_eq!(converted[0]["extents"][0]["number"], "2.0");
        assert_eq!(converted[0]["extents"][0]["container_summary"], "Duplicates");
        assert_eq!(converted[1]["date"]["expression"], "unspecified");
        assert!(converted[1].get("extents").is_none());
    }

    #[test]
    fn test_external_documents_repaired() {
        let docs = external_documents(&[ExternalReference {
            title: String::new(),
            href: "example.org/guide".to_string(),
        }]);
        assert_eq!(docs[0]["title"], "unspecified");
        assert_eq!(docs[0]["location"], "http://example.org/guide");
    }

    #[test]
    fn test_user_defined_scopes() {
        let fields = UserDefinedFields {
            integer_1: Some(4),
            string_1: "a".to_string(),
            ..Default::default()
        };
        let accession = user_defined(&fields, UserDefinedScope::Accession);
        assert_eq!(accession["integer_1"], "4");
        assert!(accession.get("integer_2").is_none());
        assert_eq!(accession["text_4"], "");

        let resource = user_defined(&fields, UserDefinedScope::Resource);
        assert_eq!(resource.as_object().unwrap().len(), 2);
    }
}
