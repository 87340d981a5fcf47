// ==========================================
// 标识登记表 集成测试
// ==========================================
// 测试目标: 分段左移补齐、同类标识唯一、跨类别独立
// ==========================================


use archives_migration::domain::types::IdentifierClass;
use archives_migration::engine::identity_registry::DISAMBIGUATION_MARKER;
use archives_migration::{shift_and_repair, DiagnosticKind, DiagnosticLog, IdentityRegistry};
use std::collections::HashSet;
use test_helpers::{default_run, AccessionBuilder, ResourceBuilder};

#[test]
fn test_shift_and_repair_packs_segments() {
    let repaired = shift_and_repair(&["", "X", "", "Y"]);
    assert_eq!(repaired.segments, vec!["X", "Y"]);
    assert!(repaired.shifted);

    let untouched = shift_and_repair(&["A", "B", "C", "D"]);
    assert_eq!(untouched.segments, vec!["A", "B", "C", "D"]);
    assert!(!untouched.shifted);
}

#[test]
fn test_fourth_segment_lands_in_dense_slot() {
    let repaired = shift_and_repair(&["A", "", "", "D"]);
    assert_eq!(repaired.segments, vec!["A", "D"]);
}

#[test]
fn test_colliding_identifiers_all_distinct() {
    let mut registry = IdentityRegistry::default();
    let mut log = DiagnosticLog::new();

    let mut seen = HashSet::new();
    for _ in 0..25 {
        let key = registry.register_segments(IdentifierClass::Resource, &["MS", "100"], &mut log);
        assert!(seen.insert(key.full_id()));
    }

    assert_eq!(seen.len(), 25);
    assert_eq!(registry.registered_count(IdentifierClass::Resource), 25);
    assert_eq!(log.count_of(DiagnosticKind::IdentifierDuplicate), 24);
    for id in &seen {
        assert!(registry.is_registered(IdentifierClass::Resource, id));
    }
}

#[test]
fn test_classes_are_independent() {
    let mut registry = IdentityRegistry::default();
    let mut log = DiagnosticLog::new();

    let accession = registry.register_segments(IdentifierClass::Accession, &["2001", "1"], &mut log);
    let resource = registry.register_segments(IdentifierClass::Resource, &["2001", "1"], &mut log);

    assert_eq!(accession.full_id(), resource.full_id());
    assert!(log.is_empty());
}

#[test]
fn test_duplicate_accessions_differ_only_by_first_segment_suffix() {
    let mut run = default_run();
    let first = run
        .convert(&AccessionBuilder::new(1).number(["2001", "15", "", ""]).record())
        .unwrap()
        .unwrap();
    let second = run
        .convert(&AccessionBuilder::new(2).number(["2001", "15", "", ""]).record())
        .unwrap()
        .unwrap();

    let first_id = first.get_str("id_0").unwrap();
    let second_id = second.get_str("id_0").unwrap();
    assert_eq!(first_id, "2001");
    assert_ne!(first_id, second_id);
    assert!(second_id.starts_with(&format!("2001{}", DISAMBIGUATION_MARKER)));
    assert_eq!(first.get_str("id_1"), second.get_str("id_1"));

    let registry = run.context().registry();
    assert!(registry.is_registered(IdentifierClass::Accession, "2001.15"));
    assert_eq!(registry.registered_count(IdentifierClass::Accession), 2);

    let report = run.finish();
    let duplicates: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::IdentifierDuplicate)
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert!(duplicates[0].message.contains("2001.15"));
}

#[test]
fn test_each_run_starts_with_empty_registry() {
    for _ in 0..2 {
        let mut run = default_run();
        let doc = run
            .convert(&ResourceBuilder::new(1, "MS 9").record())
            .unwrap()
            .unwrap();
        assert_eq!(doc.get_str("id_0"), Some("MS 9"));
    }
}
