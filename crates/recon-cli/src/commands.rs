use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail, ensure};
use recon_cli::pipeline::{BatchSummary, process_rows, sort_for_review, write_output_csv};
use recon_ingest::{
    CsvReferenceSource, InputColumns, ReferenceSnapshot, ReferenceStore, read_alias_records,
    read_input_rows,
};
use recon_model::{AliasRecord, DecodeResult, MatchOptions, SupplierResolution};
use tracing::{info, info_span, warn};

use crate::cli::{
    AliasAddArgs, AliasListArgs, DecodeArgs, ProcessArgs, ReferenceArgs, ResolveArgs,
    ThresholdArgs,
};
use crate::types::ProcessResult;

pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let span = info_span!("process", input = %args.input.display());
    let _guard = span.enter();

    let options = match_options(&args.thresholds)?;
    let store = reference_store(&args.reference);
    let snapshot = load_snapshot(&store)?;

    let input = read_input_rows(&args.input, &InputColumns::default())
        .with_context(|| format!("read input {}", args.input.display()))?;
    let mut outcomes = process_rows(&input, &snapshot, &options);
    if args.review_order {
        sort_for_review(&mut outcomes);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    write_output_csv(&output, input.headers(), &outcomes)
        .with_context(|| format!("write output {}", output.display()))?;

    let summary = BatchSummary::from_outcomes(&outcomes);
    if summary.unresolved > 0 {
        warn!(
            unresolved = summary.unresolved,
            distinct = summary.unresolved_suppliers.len(),
            "suppliers left unresolved"
        );
    }
    Ok(ProcessResult {
        input: args.input.clone(),
        output,
        summary,
    })
}

pub fn run_decode(args: &DecodeArgs) -> Result<DecodeResult> {
    let mut options = MatchOptions::default();
    if let Some(threshold) = args.entity_threshold {
        ensure_score("entity-threshold", threshold)?;
        options = options.with_entity_threshold(threshold);
    }
    let source = CsvReferenceSource::new(&args.master);
    let snapshot = ReferenceSnapshot::load(&source)
        .with_context(|| format!("load reference data from {}", args.master.display()))?;
    Ok(snapshot.decoder(&options).decode(&args.text))
}

pub fn run_resolve(args: &ResolveArgs) -> Result<SupplierResolution> {
    let options = match_options(&args.thresholds)?;
    let store = reference_store(&args.reference);
    let snapshot = load_snapshot(&store)?;
    Ok(snapshot.resolver(&options).reconcile(Some(args.supplier.as_str())))
}

pub fn run_alias_add(args: &AliasAddArgs) -> Result<AliasRecord> {
    let store = ReferenceStore::new(
        CsvReferenceSource::new(&args.master).with_aliases(&args.aliases),
    );
    if !args.allow_unknown {
        let snapshot = load_snapshot(&store)?;
        let canonical = args.canonical.trim();
        if !snapshot.suppliers.contains_exact(canonical) {
            let hint = snapshot
                .resolver(&MatchOptions::default())
                .resolve(canonical)
                .map(|name| format!(" (did you mean '{name}'?)"))
                .unwrap_or_default();
            bail!(
                "'{canonical}' is not a supplier in {}{hint}; pass --allow-unknown to register it anyway",
                args.master.display()
            );
        }
    }

    let record = store
        .register_alias(&args.alias, &args.canonical)
        .with_context(|| {
            let target = store.source().alias_path().unwrap_or(args.aliases.as_path());
            format!("register alias in {}", target.display())
        })?;
    info!(alias = %record.alias, canonical = %record.canonical, "alias added");
    Ok(record)
}

pub fn run_alias_list(args: &AliasListArgs) -> Result<Vec<AliasRecord>> {
    read_alias_records(&args.aliases)
        .with_context(|| format!("read aliases from {}", args.aliases.display()))
}

fn reference_store(reference: &ReferenceArgs) -> ReferenceStore<CsvReferenceSource> {
    let mut source = CsvReferenceSource::new(&reference.master);
    if let Some(aliases) = &reference.aliases {
        source = source.with_aliases(aliases);
    }
    ReferenceStore::new(source)
}

fn load_snapshot(store: &ReferenceStore<CsvReferenceSource>) -> Result<Arc<ReferenceSnapshot>> {
    store.snapshot().with_context(|| {
        format!(
            "load reference data from {}",
            store.source().master_path().display()
        )
    })
}

/// Defaults overridden by whichever thresholds were given.
fn match_options(thresholds: &ThresholdArgs) -> Result<MatchOptions> {
    let mut options = MatchOptions::default();
    if let Some(threshold) = thresholds.entity_threshold {
        ensure_score("entity-threshold", threshold)?;
        options = options.with_entity_threshold(threshold);
    }
    if let Some(threshold) = thresholds.supplier_threshold {
        ensure_score("supplier-threshold", threshold)?;
        options = options.with_supplier_threshold(threshold);
    }
    if let Some(threshold) = thresholds.alias_threshold {
        ensure_score("alias-threshold", threshold)?;
        options = options.with_alias_threshold(threshold);
    }
    Ok(options)
}

fn ensure_score(flag: &str, value: f64) -> Result<()> {
    ensure!(
        (0.0..=100.0).contains(&value),
        "--{flag} must be between 0 and 100, got {value}"
    );
    Ok(())
}

/// `<dir>/<stem>_procesado.csv` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "salida".to_string());
    input.with_file_name(format!("{stem}_procesado.csv"))
}
