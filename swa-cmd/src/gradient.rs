//! Gradient table command.

use log::info;
use std::fs;
use swa_charts::gradient_chart::GradientChart;
use swa_core::gradient::{self, GradientResult};
use swa_core::loader;

/// Compute the per-column time gradients of a measurement table and render
/// one chart per requested column.
///
/// With no explicit columns every column of the table is rendered. Unknown
/// requested columns fail the command before any file is written. Tables
/// without any valid time interval still produce charts; the series are
/// all-NaN and come out as empty frames after a logged warning.
pub fn run_gradient(
    table_csv: &str,
    columns: &[String],
    units: &str,
    out_dir: &str,
) -> anyhow::Result<()> {
    let table = loader::load_table(table_csv)?;
    let result = gradient::compute_gradients(&table);
    ensure_columns(&result, columns)?;

    fs::create_dir_all(out_dir)?;
    let mut sink = GradientChart::new(out_dir);
    if columns.is_empty() {
        gradient::plot_all_gradients(&result, units, &mut sink)?;
    } else {
        for column in columns {
            gradient::plot_gradient(&result, column, units, &mut sink)?;
        }
    }

    for path in sink.written() {
        info!("wrote {}", path.display());
    }
    println!(
        "Rendered {} gradient charts into {}",
        sink.written().len(),
        out_dir
    );
    Ok(())
}

/// Every requested column must resolve before the first chart is rendered,
/// so one bad name cannot leave a partial set of files behind.
fn ensure_columns(result: &GradientResult, columns: &[String]) -> swa_core::error::Result<()> {
    for column in columns {
        result.column(column)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::ensure_columns;
    use std::collections::BTreeMap;
    use swa_core::error::SwaError;
    use swa_core::gradient::compute_gradients;
    use swa_core::timeseries::TimeSeriesTable;

    #[test]
    fn test_requested_columns_are_checked_up_front() {
        let mut columns = BTreeMap::new();
        columns.insert("Bx".to_string(), vec![1.0, 2.0]);
        let table = TimeSeriesTable::new(vec![0, 1_000_000_000], columns).unwrap();
        let result = compute_gradients(&table);

        let requested = vec!["Bx".to_string(), "Bq".to_string()];
        let err = ensure_columns(&result, &requested).unwrap_err();
        assert!(matches!(err, SwaError::ColumnNotFound(name) if name == "Bq"));

        assert!(ensure_columns(&result, &requested[..1]).is_ok());
        assert!(ensure_columns(&result, &[]).is_ok());
    }
}
