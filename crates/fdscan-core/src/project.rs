//! Projection of collected records into renderable rows.
//!
//! Runs single-threaded after the collection barrier; by then every record
//! is immutable. Row order is (process order, file discovery order).

use crate::classify;
use crate::collect::types::ProcRecord;
use crate::column::{Cell, ColumnId};
use crate::users::UserCache;
use tracing::debug;

/// One output row: one cell per selected column, in selection order.
pub type Row = Vec<Cell>;

/// Build one row per file of every process, resolving each cell through the
/// file's classification chain.
pub fn project(procs: &[ProcRecord], columns: &[ColumnId], users: &UserCache) -> Vec<Row> {
    let mut rows = Vec::new();
    for proc in procs {
        for file in &proc.files {
            let row = columns
                .iter()
                .map(|&column| classify::fill_column(proc, file, column, users))
                .collect();
            rows.push(row);
        }
    }
    debug!(rows = rows.len(), columns = columns.len(), "projected report");
    rows
}
