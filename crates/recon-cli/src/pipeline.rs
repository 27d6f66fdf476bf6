//! Batch reconciliation: resolve every supplier and decode every comment of
//! an input table.

use std::collections::BTreeSet;
use std::path::Path;

use recon_ingest::{InputTable, ReferenceSnapshot, write_csv_table};
use recon_model::{Action, DecodeResult, MatchOptions, SupplierResolution};
use tracing::{debug, info, trace};

use crate::logging::redact_value;

/// Columns appended to the input columns in the output file.
pub const OUTPUT_COLUMNS: [&str; 5] = [
    "Proveedor_Final",
    "Accion_Sugerida",
    "Cant_Sugerida",
    "Marca_Sugerida",
    "Tipo_Sugerido",
];

/// Result for one input row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowOutcome {
    /// Zero-based position in the input file.
    pub row: usize,
    /// Input cells as read.
    pub cells: Vec<String>,
    /// Supplier cell as read.
    pub supplier: String,
    pub resolution: SupplierResolution,
    pub decoded: DecodeResult,
}

impl RowOutcome {
    /// Final supplier name: the master entry when resolved, otherwise the
    /// original value.
    pub fn supplier_final(&self) -> &str {
        self.resolution.final_name(&self.supplier)
    }

    /// Values for [`OUTPUT_COLUMNS`], in order.
    pub fn suggestion_cells(&self) -> [String; 5] {
        [
            self.supplier_final().to_string(),
            self.decoded.action.as_str().to_string(),
            self.decoded
                .quantity
                .map(|quantity| quantity.to_string())
                .unwrap_or_default(),
            self.decoded.brand.clone().unwrap_or_default(),
            self.decoded.kind.clone().unwrap_or_default(),
        ]
    }

    /// Input cells followed by the suggestion cells.
    pub fn output_cells(&self) -> Vec<String> {
        let mut cells = self.cells.clone();
        cells.extend(self.suggestion_cells());
        cells
    }
}

/// Reconcile the supplier and decode the comment of every row, in input
/// order.
pub fn process_rows(
    input: &InputTable,
    snapshot: &ReferenceSnapshot,
    options: &MatchOptions,
) -> Vec<RowOutcome> {
    let resolver = snapshot.resolver(options);
    let decoder = snapshot.decoder(options);

    let outcomes: Vec<RowOutcome> = input
        .rows()
        .enumerate()
        .map(|(row, input_row)| {
            trace!(
                row,
                supplier = redact_value(input_row.supplier),
                comment = redact_value(input_row.comment),
                "processing row"
            );
            let resolution = resolver.reconcile(Some(input_row.supplier));
            let decoded = decoder.decode(input_row.comment);
            debug!(row, resolution = resolution.label(), action = %decoded.action, "row processed");
            RowOutcome {
                row,
                cells: input_row.cells.to_vec(),
                supplier: input_row.supplier.to_string(),
                resolution,
                decoded,
            }
        })
        .collect();
    info!(rows = outcomes.len(), "batch processed");
    outcomes
}

/// Order rows for review: RESTAR first, then SUMAR, then NEUTRO; within an
/// action by original supplier. Rows that compare equal keep input order.
pub fn sort_for_review(outcomes: &mut [RowOutcome]) {
    outcomes.sort_by(|a, b| {
        a.decoded
            .action
            .review_priority()
            .cmp(&b.decoded.action.review_priority())
            .then_with(|| a.supplier.cmp(&b.supplier))
    });
}

/// Write input columns plus [`OUTPUT_COLUMNS`] to `path`.
pub fn write_output_csv(
    path: &Path,
    input_headers: &[String],
    outcomes: &[RowOutcome],
) -> recon_ingest::Result<()> {
    let headers: Vec<&str> = input_headers
        .iter()
        .map(String::as_str)
        .chain(OUTPUT_COLUMNS)
        .collect();
    write_csv_table(path, headers.as_slice(), outcomes.iter().map(RowOutcome::output_cells))?;
    info!(path = %path.display(), rows = outcomes.len(), "output written");
    Ok(())
}

/// Counts over a processed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub restar: usize,
    pub sumar: usize,
    pub neutro: usize,
    pub exact: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub with_quantity: usize,
    pub with_brand: usize,
    pub with_kind: usize,
    /// Distinct non-blank supplier values that could not be resolved; these
    /// are the candidates for new aliases.
    pub unresolved_suppliers: BTreeSet<String>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[RowOutcome]) -> Self {
        let mut summary = Self {
            rows: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome.decoded.action {
                Action::Restar => summary.restar += 1,
                Action::Sumar => summary.sumar += 1,
                Action::Neutro => summary.neutro += 1,
            }
            match &outcome.resolution {
                SupplierResolution::Exact(_) => summary.exact += 1,
                SupplierResolution::Resolved(_) => summary.resolved += 1,
                SupplierResolution::Unresolved => {
                    summary.unresolved += 1;
                    let supplier = outcome.supplier.trim();
                    if !supplier.is_empty() {
                        summary.unresolved_suppliers.insert(supplier.to_string());
                    }
                }
            }
            summary.with_quantity += usize::from(outcome.decoded.quantity.is_some());
            summary.with_brand += usize::from(outcome.decoded.brand.is_some());
            summary.with_kind += usize::from(outcome.decoded.kind.is_some());
        }
        summary
    }

    pub fn action_count(&self, action: Action) -> usize {
        match action {
            Action::Restar => self.restar,
            Action::Sumar => self.sumar,
            Action::Neutro => self.neutro,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(row: usize, supplier: &str, action: Action) -> RowOutcome {
        RowOutcome {
            row,
            cells: vec![supplier.to_string(), String::new()],
            supplier: supplier.to_string(),
            resolution: SupplierResolution::Unresolved,
            decoded: DecodeResult {
                action,
                ..DecodeResult::default()
            },
        }
    }

    #[test]
    fn review_order_groups_actions_then_suppliers() {
        let mut outcomes = vec![
            outcome(0, "Zeta", Action::Neutro),
            outcome(1, "Beta", Action::Sumar),
            outcome(2, "Alfa", Action::Sumar),
            outcome(3, "Zeta", Action::Restar),
            outcome(4, "Alfa", Action::Sumar),
        ];
        sort_for_review(&mut outcomes);
        let order: Vec<usize> = outcomes.iter().map(|o| o.row).collect();
        assert_eq!(order, vec![3, 2, 4, 1, 0]);
    }

    #[test]
    fn suggestion_cells_leave_missing_values_blank() {
        let row = outcome(0, "ACME", Action::Neutro);
        assert_eq!(row.suggestion_cells(), ["ACME", "NEUTRO", "", "", ""]);
        assert_eq!(row.output_cells().len(), 2 + OUTPUT_COLUMNS.len());
    }

    #[test]
    fn summary_collects_unresolved_names_once() {
        let outcomes = vec![
            outcome(0, "ACME", Action::Restar),
            outcome(1, "ACME", Action::Sumar),
            outcome(2, "  ", Action::Sumar),
        ];
        let summary = BatchSummary::from_outcomes(&outcomes);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.action_count(Action::Sumar), 2);
        assert_eq!(summary.unresolved, 3);
        assert_eq!(
            summary.unresolved_suppliers.into_iter().collect::<Vec<_>>(),
            vec!["ACME"]
        );
    }
}
