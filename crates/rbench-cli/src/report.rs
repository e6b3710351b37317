//! Report rows and table rendering for benchmark results.
//!
//! Row construction is pure so the formatting contract can be tested
//! without running a benchmark; only the final table reaches stdout.

use rbench_benchmarks::TaskResult;

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Task name
    pub name: String,
    /// Mean duration, formatted in milliseconds
    pub mean: String,
    /// Ratio of this task's mean against the fastest task's mean
    pub compare: String,
}

/// Build one row per task: mean to four decimal places with a unit,
/// ratio against the fastest task to two decimal places.
/// Assumes at least one result.
pub fn build_rows(results: &[TaskResult]) -> Vec<ReportRow> {
    let min_mean = results
        .iter()
        .map(|result| result.mean.as_secs_f64())
        .fold(f64::INFINITY, f64::min);

    results
        .iter()
        .map(|result| {
            let mean = result.mean.as_secs_f64();
            ReportRow {
                name: result.name.clone(),
                mean: format!("{:.4}ms", mean * 1_000.0),
                compare: format!("{:.2}", mean / min_mean),
            }
        })
        .collect()
}

/// Render rows as an aligned three-column table with a header line
pub fn render_table(rows: &[ReportRow]) -> String {
    let name_width = column_width("name", rows.iter().map(|row| row.name.len()));
    let mean_width = column_width("mean", rows.iter().map(|row| row.mean.len()));

    let mut table = String::new();
    table.push_str(&format!(
        "{:<name_width$}  {:<mean_width$}  compare\n",
        "name", "mean"
    ));
    for row in rows {
        table.push_str(&format!(
            "{:<name_width$}  {:<mean_width$}  {}\n",
            row.name, row.mean, row.compare
        ));
    }
    table
}

fn column_width(header: &str, cells: impl Iterator<Item = usize>) -> usize {
    cells.chain(std::iter::once(header.len())).max().unwrap_or(0)
}
