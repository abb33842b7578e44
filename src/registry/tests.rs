// src/registry/tests.rs

use crate::catalog::{Catalog, CatalogEntry, OpEntry};
use crate::error::GenError;
use crate::op::Precision;
use crate::registry::Registry;

fn op_entry(name: &str, display: &str, arity: u8) -> OpEntry {
    OpEntry {
        name: name.to_string(),
        display: display.to_string(),
        arity,
        has_float: true,
        needs_round: true,
        exact: None,
        native: None,
    }
}

fn catalog_of(entries: Vec<CatalogEntry>) -> Catalog {
    Catalog { entries }
}

#[test]
fn real_registration_expands_to_nine_ops() {
    let catalog = catalog_of(vec![CatalogEntry::Real(op_entry("sqrt", "square root", 1))]);
    let registry = Registry::from_catalog(&catalog).unwrap();

    assert_eq!(registry.ops().len(), 9);
    assert!(registry.ops().iter().all(|op| op.exact_func == "mpfr_sqrt"));
    assert!(registry.ops().iter().all(|op| !op.is_complex));

    let sources: Vec<&str> = registry
        .ops()
        .iter()
        .map(|op| op.source_name.as_str())
        .collect();
    assert_eq!(
        sources,
        vec![
            "sqrt",
            "__sqrt",
            "__sqrt_avx",
            "__sqrt_fma4",
            "__ieee754_sqrt",
            "__ieee754_sqrt_avx",
            "__ieee754_sqrt_sse2",
            "__ieee754_sqrt_fma4",
            "sqrtf",
        ]
    );
}

#[test]
fn float_variant_derives_suffixed_native() {
    let catalog = catalog_of(vec![CatalogEntry::Real(op_entry("sqrt", "square root", 1))]);
    let registry = Registry::from_catalog(&catalog).unwrap();

    let float_op = registry
        .ops()
        .iter()
        .find(|op| op.precision == Precision::Single)
        .unwrap();
    assert_eq!(float_op.source_name, "sqrtf");
    assert_eq!(float_op.native_func.as_deref(), Some("sqrtf"));
    assert_eq!(float_op.display_name, "square root (float)");
}

#[test]
fn aliased_registration_shares_overridden_refs() {
    let mut e = op_entry("__pow_finite", "power", 2);
    e.exact = Some("mpfr_pow".to_string());
    e.native = Some("pow".to_string());
    let catalog = catalog_of(vec![CatalogEntry::Real(e)]);
    let registry = Registry::from_catalog(&catalog).unwrap();

    assert!(registry.ops().iter().all(|op| op.exact_func == "mpfr_pow"));
    let double_natives: Vec<&str> = registry
        .ops()
        .iter()
        .filter(|op| op.precision == Precision::Double)
        .map(|op| op.native_func.as_deref().unwrap())
        .collect();
    assert!(double_natives.iter().all(|&n| n == "pow"));
    let float_op = registry
        .ops()
        .iter()
        .find(|op| op.precision == Precision::Single)
        .unwrap();
    assert_eq!(float_op.native_func.as_deref(), Some("powf"));
}

#[test]
fn complex_registration_yields_four_identities() {
    let catalog = catalog_of(vec![CatalogEntry::Complex(op_entry("pow", "pow", 2))]);
    let registry = Registry::from_catalog(&catalog).unwrap();

    assert_eq!(registry.ops().len(), 2);
    let tags: Vec<String> = registry
        .ops()
        .iter()
        .flat_map(|op| op.dispatch_tags())
        .collect();
    assert_eq!(tags, vec!["OP_CPOWR", "OP_CPOWI", "OP_CPOWFR", "OP_CPOWFI"]);
    assert!(registry.ops().iter().all(|op| op.exact_func == "mpc_pow"));
}

#[test]
fn complex_native_defaults_to_canonical_name() {
    let catalog = catalog_of(vec![CatalogEntry::Complex(op_entry("log", "log", 1))]);
    let registry = Registry::from_catalog(&catalog).unwrap();

    assert_eq!(registry.ops()[0].source_name, "clog");
    assert_eq!(registry.ops()[0].native_func.as_deref(), Some("log"));
    assert_eq!(registry.ops()[1].source_name, "clogf");
    assert_eq!(registry.ops()[1].native_func.as_deref(), Some("logf"));
}

#[test]
fn duplicate_registration_is_rejected() {
    let catalog = catalog_of(vec![
        CatalogEntry::Real(op_entry("sqrt", "square root", 1)),
        CatalogEntry::Real(op_entry("sqrt", "square root again", 1)),
    ]);
    match Registry::from_catalog(&catalog) {
        Err(GenError::DuplicateTag { tag, .. }) => assert_eq!(tag, "OP_SQRT"),
        other => panic!("expected duplicate-tag error, got {:?}", other),
    }
}

#[test]
fn colliding_encoded_tags_are_rejected() {
    // `_exp` and `zuexp` encode to the same uppercased tag.
    let mut a = op_entry("_exp", "underscore exp", 1);
    a.has_float = false;
    let mut b = op_entry("zuexp", "zu exp", 1);
    b.has_float = false;
    let catalog = catalog_of(vec![CatalogEntry::Real(a), CatalogEntry::Real(b)]);
    assert!(matches!(
        Registry::from_catalog(&catalog),
        Err(GenError::DuplicateTag { .. })
    ));
}

#[test]
fn extra_colliding_with_reserved_tag_is_rejected() {
    let catalog = catalog_of(vec![CatalogEntry::Extra {
        name: "invalid".to_string(),
    }]);
    match Registry::from_catalog(&catalog) {
        Err(GenError::DuplicateTag { tag, first, .. }) => {
            assert_eq!(tag, "OP_INVALID");
            assert_eq!(first, "<reserved>");
        }
        other => panic!("expected duplicate-tag error, got {:?}", other),
    }
}

#[test]
fn out_of_range_arity_is_rejected() {
    let catalog = catalog_of(vec![CatalogEntry::Real(op_entry("quux", "quux", 4))]);
    assert!(matches!(
        Registry::from_catalog(&catalog),
        Err(GenError::BadArity { arity: 4, .. })
    ));
}

#[test]
fn builtin_catalog_validates() {
    let registry = Registry::from_catalog(&Catalog::builtin()).unwrap();
    // 51 real entries at 9 ops each, 4 complex entries at 2 ops each.
    assert_eq!(registry.ops().len(), 51 * 9 + 4 * 2);
    assert_eq!(registry.extras().len(), 4);
}

#[test]
fn arity_partitions_are_complete_and_disjoint() {
    let registry = Registry::from_catalog(&Catalog::builtin()).unwrap();
    for arity in 1..=3 {
        let full = registry.arity_ops(arity);
        let round = registry.real_round_ops(arity);
        let noround = registry.real_noround_ops(arity);
        let complex = registry.complex_ops(arity);
        assert_eq!(full.len(), round.len() + noround.len() + complex.len());
        for op in &round {
            assert!(!noround.contains(op) && !complex.contains(op));
        }
        for op in &noround {
            assert!(!complex.contains(op));
        }
    }
}

#[test]
fn precision_partition_spans_all_ops() {
    let registry = Registry::from_catalog(&Catalog::builtin()).unwrap();
    let single = registry.precision_ops(Precision::Single);
    let double = registry.precision_ops(Precision::Double);
    assert_eq!(single.len() + double.len(), registry.ops().len());
    // One float variant per real entry plus one per complex entry.
    assert_eq!(single.len(), 51 + 4);
}
