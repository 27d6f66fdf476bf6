use recon_map::{CommentDecoder, EntityScanner, decode};
use recon_model::{Action, Catalog, MatchOptions};

fn brands() -> Catalog {
    Catalog::from_values(["Marca X", "Coca Cola", "Coca Cola Light", "Inca Kola", "GN"])
}

fn kinds() -> Catalog {
    Catalog::from_values(["Gaseosa", "Agua", "Cerveza"])
}

#[test]
fn week_number_is_not_the_quantity() {
    let result = decode(
        "Semana 5: descontar 100 unidades de Marca X por error",
        &brands(),
        &kinds(),
    );
    assert_eq!(result.quantity, Some(100));
    assert_eq!(result.action, Action::Restar);
    assert_eq!(result.brand.as_deref(), Some("Marca X"));
    assert_eq!(result.kind, None);
}

#[test]
fn later_tie_overrides_earlier_action() {
    let empty = Catalog::default();
    let result = decode("agregar 20 extra luego error 10", &empty, &empty);
    assert_eq!(result.action, Action::Restar);
    assert_eq!(result.quantity, Some(20));
}

#[test]
fn brand_then_type_on_residual() {
    let result = decode("Agregar 12 gaseosas Coca Cola Light", &brands(), &kinds());
    assert_eq!(result.brand.as_deref(), Some("Coca Cola Light"));
    assert_eq!(result.kind.as_deref(), Some("Gaseosa"));
    assert_eq!(result.quantity, Some(12));
    assert_eq!(result.action, Action::Sumar);
}

#[test]
fn brand_match_consumes_words_before_type_scan() {
    // The brand match has to leave "agua" for the type scan.
    let result = decode("devolver 6 agua inca kola", &brands(), &kinds());
    assert_eq!(result.brand.as_deref(), Some("Inca Kola"));
    assert_eq!(result.kind.as_deref(), Some("Agua"));
    assert_eq!(result.action, Action::Restar);
    assert_eq!(result.quantity, Some(6));
}

#[test]
fn short_brand_is_removed_before_quantity() {
    let result = decode("boni GN 24", &brands(), &kinds());
    assert_eq!(result.brand.as_deref(), Some("GN"));
    assert_eq!(result.quantity, Some(24));
    assert_eq!(result.action, Action::Sumar);
}

#[test]
fn brand_and_type_are_catalog_entries_verbatim() {
    let result = decode("quitar 3 CERVEZA", &brands(), &kinds());
    assert_eq!(result.kind.as_deref(), Some("Cerveza"));
}

#[test]
fn stricter_entity_threshold_changes_outcome() {
    let brands = brands();
    let kinds = kinds();
    let options = MatchOptions::default().with_entity_threshold(100.0);
    let decoder = CommentDecoder::new(&brands, &kinds, &options);
    let result = decoder.decode("sumar 2 incakola");
    assert_eq!(result.brand, None);

    let default = decode("sumar 2 incakola", &brands, &kinds);
    assert_eq!(default.brand.as_deref(), Some("Inca Kola"));
}

#[test]
fn scanner_residual_without_phrase() {
    let catalog = Catalog::from_values(["coca cola", "coca cola light"]);
    let options = MatchOptions::default();
    let outcome = EntityScanner::new(&catalog, &options).scan("pedido de coca cola light 5");
    assert_eq!(outcome.matched.as_deref(), Some("coca cola light"));
    assert!(!outcome.residual.contains("coca"));
    assert!(outcome.residual.contains('5'));
}

#[test]
fn decode_result_snapshot() {
    let result = decode(
        "Semana 5: descontar 100 unidades de Marca X por error",
        &brands(),
        &kinds(),
    );
    insta::assert_debug_snapshot!(result, @r#"
    DecodeResult {
        action: Restar,
        quantity: Some(
            100,
        ),
        brand: Some(
            "Marca X",
        ),
        kind: None,
    }
    "#);
}
