// src/io/reporting.rs

//! Reshapes simulation traces into plot-ready tables and writes them as CSV.

use crate::error::Result;
use crate::model::tables::PolicyTable;
use crate::simulation::engine::SimulationTrace;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Variable names in the long-form table, in output order.
pub const TRACE_VARIABLES: [&str; 4] = ["Action", "Stock", "Demand", "UD-Loss"];

/// One (time, variable, value) observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongFormRecord {
    pub time: usize,
    pub variable: &'static str,
    pub value: i64,
}

/// A long-form row tagged with the animation frame that shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub time: usize,
    pub variable: &'static str,
    pub value: i64,
    pub frame: usize,
}

/// Melts a trace into long form: every `Action` row, then `Stock`, `Demand` and `UD-Loss`.
///
/// `Stock` is the stock left after demand; `UD-Loss` is the signed unmet demand.
pub fn to_long_form(trace: &SimulationTrace) -> Vec<LongFormRecord> {
    let mut rows = Vec::with_capacity(trace.len() * TRACE_VARIABLES.len());

    for variable in TRACE_VARIABLES {
        for record in trace.iter() {
            let value = match variable {
                "Action" => record.action as i64,
                "Stock" => record.stock_after_demand as i64,
                "Demand" => record.demand as i64,
                _ => record.unmet_demand,
            };
            rows.push(LongFormRecord {
                time: record.period,
                variable,
                value,
            });
        }
    }

    rows
}

/// Builds cumulative animation frames: frame `f` holds every row with `time <= f`.
pub fn animation_frames(long_form: &[LongFormRecord], frames: usize) -> Vec<FrameRecord> {
    (0..frames)
        .flat_map(|frame| {
            long_form
                .iter()
                .filter(move |row| row.time <= frame)
                .map(move |row| FrameRecord {
                    time: row.time,
                    variable: row.variable,
                    value: row.value,
                    frame,
                })
        })
        .collect()
}

/// Realized cost of a trace under the model's per-period charge.
///
/// Each period costs the order quantity plus the squared unmet demand. Terminal cost
/// is not included.
pub fn realized_cost(trace: &SimulationTrace) -> f64 {
    trace
        .iter()
        .map(|r| {
            let gap = r.unmet_demand as f64;
            r.action as f64 + gap * gap
        })
        .sum()
}

/// Serializes `rows` as CSV with a header row.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `rows` to a CSV file at `file_path`.
pub fn write_csv_file<P: AsRef<Path>, T: Serialize>(file_path: P, rows: &[T]) -> Result<()> {
    let path = file_path.as_ref();
    write_csv(File::create(path)?, rows)?;
    info!(rows = rows.len(), path = %path.display(), "exported csv");
    Ok(())
}

/// Writes the policy as a grid: one row per period, one column per stock level.
pub fn write_policy_table<W: Write>(writer: W, policy: &PolicyTable) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["period".to_string()];
    header.extend((0..=policy.max_stock()).map(|s| format!("s{}", s)));
    wtr.write_record(&header)?;

    for (period, row) in policy.rows().iter().enumerate() {
        let mut fields = vec![period.to_string()];
        fields.extend(row.iter().map(u32::to_string));
        wtr.write_record(&fields)?;
    }

    wtr.flush()?;
    Ok(())
}
