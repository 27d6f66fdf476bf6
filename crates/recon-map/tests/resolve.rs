use recon_map::{SupplierResolver, normalize, resolve};
use recon_model::{AliasRecord, AliasTable, MatchOptions, SupplierIndex, SupplierResolution};

fn master(names: &[&str]) -> SupplierIndex {
    SupplierIndex::build(names, normalize)
}

fn aliases(pairs: &[(&str, &str)]) -> AliasTable {
    let records: Vec<AliasRecord> = pairs
        .iter()
        .map(|(alias, canonical)| AliasRecord::new(*alias, *canonical).unwrap())
        .collect();
    AliasTable::build(&records, normalize)
}

#[test]
fn legal_suffix_and_punctuation_are_ignored() {
    let suppliers = master(&["coca cola", "Alicorp"]);
    let no_aliases = AliasTable::default();
    assert_eq!(
        resolve("COCA-COLA S.A.C.", &suppliers, &no_aliases),
        Some("coca cola")
    );
}

#[test]
fn returns_raw_master_entry_not_normalized_key() {
    let suppliers = master(&["Distribuidora Lima S.R.L."]);
    let no_aliases = AliasTable::default();
    assert_eq!(
        resolve("distribuidora lima", &suppliers, &no_aliases),
        Some("Distribuidora Lima S.R.L.")
    );
}

#[test]
fn alias_rewrites_query_before_master_match() {
    let suppliers = master(&["Coca Cola S.A.C.", "Backus"]);
    let table = aliases(&[("cocacola", "coca cola sac")]);
    assert_eq!(
        resolve("cocacola", &suppliers, &table),
        Some("Coca Cola S.A.C.")
    );
}

#[test]
fn alias_makes_unrecognizable_name_resolvable() {
    let suppliers = master(&["Coca Cola S.A.C.", "Backus"]);
    let no_aliases = AliasTable::default();
    assert_eq!(resolve("distribuidora ccl", &suppliers, &no_aliases), None);

    let table = aliases(&[("Distribuidora CCL", "Coca Cola S.A.C.")]);
    assert_eq!(
        resolve("distribuidora ccl", &suppliers, &table),
        Some("Coca Cola S.A.C.")
    );
}

#[test]
fn alias_target_missing_from_master_is_unresolved() {
    let suppliers = master(&["Backus", "Alicorp"]);
    let table = aliases(&[("tienda x", "Proveedor Fantasma")]);
    assert_eq!(resolve("tienda x", &suppliers, &table), None);
}

#[test]
fn alias_target_missing_from_master_falls_through_to_fuzzy_match() {
    let suppliers = master(&["Gloria S.A.", "Backus"]);
    let table = aliases(&[("leche del valle", "Gloria Lacteos SA")]);
    assert_eq!(
        resolve("leche del valle", &suppliers, &table),
        Some("Gloria S.A.")
    );
}

#[test]
fn later_alias_registration_wins() {
    let suppliers = master(&["Backus", "Alicorp"]);
    let table = aliases(&[("mayorista norte", "Backus"), ("Mayorista Norte", "Alicorp")]);
    assert_eq!(resolve("mayorista norte", &suppliers, &table), Some("Alicorp"));
}

#[test]
fn supplier_threshold_is_configurable() {
    let suppliers = master(&["Backus"]);
    let no_aliases = AliasTable::default();
    let strict = MatchOptions::default().with_supplier_threshold(95.0);
    let resolver = SupplierResolver::new(&suppliers, &no_aliases, &strict);
    assert_eq!(resolver.resolve("bakus"), None);
    assert_eq!(resolve("bakus", &suppliers, &no_aliases), Some("Backus"));
}

#[test]
fn reconcile_reports_how_the_supplier_was_found() {
    let suppliers = master(&["Coca Cola S.A.C.", "Backus"]);
    let no_aliases = AliasTable::default();
    let resolver = SupplierResolver::new(&suppliers, &no_aliases, &MatchOptions::default());

    assert_eq!(
        resolver.reconcile(Some("Backus")),
        SupplierResolution::Exact("Backus".to_string())
    );
    assert_eq!(
        resolver.reconcile(Some("coca-cola")),
        SupplierResolution::Resolved("Coca Cola S.A.C.".to_string())
    );
    assert_eq!(
        resolver.reconcile(Some("qwerty")),
        SupplierResolution::Unresolved
    );
}
