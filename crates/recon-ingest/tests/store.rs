use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use recon_ingest::{
    AliasSink, CsvReferenceSource, IngestError, MasterRecord, ReferenceColumns, ReferenceSource,
    ReferenceStore, Result,
};
use recon_model::{AliasRecord, MatchOptions, ModelError};
use tempfile::{TempDir, tempdir};

const MASTER: &str = "\
Proveedor,Marca,Tipo
Coca Cola S.A.C.,Coca Cola,Gaseosa
Coca Cola S.A.C.,Inca Kola,Gaseosa
Backus,Pilsen,Cerveza
Gloria S.A.,,
";

fn fixture() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().expect("temp dir");
    let master = dir.path().join("base.csv");
    fs::write(&master, MASTER).expect("write master");
    let aliases = dir.path().join("alias.csv");
    (dir, master, aliases)
}

fn csv_store(master: &Path, aliases: &Path) -> ReferenceStore<CsvReferenceSource> {
    ReferenceStore::new(CsvReferenceSource::new(master).with_aliases(aliases))
}

#[test]
fn loads_master_columns_and_missing_alias_file() {
    let (_dir, master, aliases) = fixture();
    let store = csv_store(&master, &aliases);
    assert!(!store.is_loaded());

    let snapshot = store.snapshot().expect("snapshot");
    assert!(store.is_loaded());
    assert_eq!(snapshot.suppliers.len(), 3);
    assert_eq!(snapshot.brands.entries(), ["Coca Cola", "Inca Kola", "Pilsen"]);
    assert_eq!(snapshot.kinds.entries(), ["Gaseosa", "Cerveza"]);
    assert!(snapshot.aliases.is_empty());
}

#[test]
fn headers_match_case_insensitively() {
    let dir = tempdir().unwrap();
    let master = dir.path().join("base.csv");
    fs::write(&master, "\u{feff}PROVEEDOR , marca,tipo\nBackus,Pilsen,Cerveza\n").unwrap();
    let source = CsvReferenceSource::new(&master);
    let records = source.load_master().unwrap();
    assert_eq!(records, vec![MasterRecord::new("Backus", "Pilsen", "Cerveza")]);
}

#[test]
fn custom_column_names() {
    let dir = tempdir().unwrap();
    let master = dir.path().join("base.csv");
    fs::write(&master, "Vendor,Brand,Kind\nBackus,Pilsen,Cerveza\n").unwrap();
    let columns = ReferenceColumns {
        supplier: "Vendor".to_string(),
        brand: "Brand".to_string(),
        kind: "Kind".to_string(),
    };
    let source = CsvReferenceSource::new(&master).with_columns(columns);
    assert_eq!(source.load_master().unwrap().len(), 1);
}

#[test]
fn missing_master_is_fatal() {
    let dir = tempdir().unwrap();
    let store = ReferenceStore::new(CsvReferenceSource::new(dir.path().join("nope.csv")));
    let err = store.snapshot().unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
    assert!(!store.is_loaded());
}

#[test]
fn missing_master_column_is_fatal() {
    let dir = tempdir().unwrap();
    let master = dir.path().join("base.csv");
    fs::write(&master, "Proveedor,Marca\nBackus,Pilsen\n").unwrap();
    let err = CsvReferenceSource::new(&master).load_master().unwrap_err();
    match err {
        IngestError::MissingColumn { column, .. } => assert_eq!(column, "Tipo"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn blank_alias_rows_are_skipped() {
    let (_dir, master, aliases) = fixture();
    fs::write(&aliases, "alias,nombre_real\n  ,Backus\ncervecera,Backus\nsolo alias,\n").unwrap();
    let records = CsvReferenceSource::new(&master)
        .with_aliases(&aliases)
        .load_aliases()
        .unwrap();
    assert_eq!(records, vec![AliasRecord::new("cervecera", "Backus").unwrap()]);
}

#[test]
fn registered_alias_is_seen_after_invalidation() {
    let (_dir, master, aliases) = fixture();
    let store = csv_store(&master, &aliases);
    let options = MatchOptions::default();

    let before = store.snapshot().unwrap();
    assert_eq!(before.resolver(&options).resolve("distribuidora ccl"), None);

    let record = store
        .register_alias(" Distribuidora CCL ", "Coca Cola S.A.C.")
        .unwrap();
    assert_eq!(record.alias, "Distribuidora CCL");
    assert!(!store.is_loaded());

    let after = store.snapshot().unwrap();
    assert_eq!(
        after.resolver(&options).resolve("distribuidora ccl"),
        Some("Coca Cola S.A.C.")
    );
    // Readers holding the old snapshot keep a consistent view.
    assert!(before.aliases.is_empty());
    assert_eq!(
        fs::read_to_string(&aliases).unwrap(),
        "alias,nombre_real\nDistribuidora CCL,Coca Cola S.A.C.\n"
    );
}

#[test]
fn empty_alias_is_rejected_without_writing() {
    let (_dir, master, aliases) = fixture();
    let store = csv_store(&master, &aliases);
    store.snapshot().unwrap();

    let err = store.register_alias("", "Coca Cola").unwrap_err();
    assert!(matches!(
        err,
        IngestError::Validation(ModelError::EmptyField { field: "alias" })
    ));
    assert!(!aliases.exists());
    assert!(store.is_loaded());
}

#[test]
fn duplicate_aliases_last_registration_wins() {
    let (_dir, master, aliases) = fixture();
    let store = csv_store(&master, &aliases);
    store.register_alias("mayorista", "Backus").unwrap();
    store.register_alias("Mayorista", "Gloria S.A.").unwrap();

    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.alias_records.len(), 2);
    assert_eq!(snapshot.aliases.target("mayorista"), Some("gloria"));
}

#[test]
fn reload_swaps_in_new_master() {
    let (_dir, master, aliases) = fixture();
    let store = csv_store(&master, &aliases);
    let first = store.snapshot().unwrap();

    fs::write(&master, "Proveedor,Marca,Tipo\nAlicorp,Don Vittorio,Fideo\n").unwrap();
    assert_eq!(store.snapshot().unwrap().suppliers.len(), 3);

    let second = store.reload().unwrap();
    assert_eq!(second.suppliers.len(), 1);
    assert_eq!(first.suppliers.len(), 3);
}

#[test]
fn failed_reload_keeps_previous_snapshot() {
    let (_dir, master, aliases) = fixture();
    let store = csv_store(&master, &aliases);
    store.snapshot().unwrap();

    fs::remove_file(&master).unwrap();
    assert!(store.reload().is_err());
    assert_eq!(store.snapshot().unwrap().suppliers.len(), 3);
}

/// In-memory source whose alias writes can be made to fail.
struct MemorySource {
    master: Vec<MasterRecord>,
    aliases: Mutex<Vec<AliasRecord>>,
    fail_writes: bool,
}

impl ReferenceSource for MemorySource {
    fn load_master(&self) -> Result<Vec<MasterRecord>> {
        Ok(self.master.clone())
    }

    fn load_aliases(&self) -> Result<Vec<AliasRecord>> {
        Ok(self.aliases.lock().unwrap().clone())
    }
}

impl AliasSink for MemorySource {
    fn append_alias(&self, record: &AliasRecord) -> Result<()> {
        if self.fail_writes {
            return Err(IngestError::Io {
                operation: "write",
                path: PathBuf::from("memory"),
                source: std::io::Error::other("disk full"),
            });
        }
        self.aliases.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[test]
fn failed_append_leaves_snapshot_untouched() {
    let source = MemorySource {
        master: vec![MasterRecord::new("Backus", "Pilsen", "Cerveza")],
        aliases: Mutex::new(Vec::new()),
        fail_writes: true,
    };
    let store = ReferenceStore::new(source);
    let before = store.snapshot().unwrap();

    let err = store.register_alias("cervecera", "Backus").unwrap_err();
    assert!(matches!(err, IngestError::Io { operation: "write", .. }));
    assert!(store.is_loaded());

    let after = store.snapshot().unwrap();
    assert!(std::sync::Arc::ptr_eq(&before, &after));
    assert!(store.source().aliases.lock().unwrap().is_empty());
}

#[test]
fn memory_source_registration_round_trip() {
    let source = MemorySource {
        master: vec![MasterRecord::new("Backus", "Pilsen", "Cerveza")],
        aliases: Mutex::new(Vec::new()),
        fail_writes: false,
    };
    let store = ReferenceStore::new(source);
    store.snapshot().unwrap();
    store.register_alias("cervecera del rimac", "Backus").unwrap();

    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.aliases.target("cervecera del rimac"), Some("backus"));
}
