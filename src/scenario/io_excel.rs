// Primitives for reading polls from Excel workbooks.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::{debug, info};
use scenario_projection::Observation;
use snafu::prelude::*;

use crate::scenario::{
    config_reader::PollSource,
    io_common::{get_col_index_mapping, simplify_file_name},
    io_csv::parse_share,
    *,
};

/// Reads polls in the long format from a worksheet. The first row holds the
/// names of the columns.
pub fn read_excel_polls(path: &str, source: &PollSource) -> ScenarioResult<Vec<Observation>> {
    let wrange = get_range(path, source)?;
    let rows: Vec<&[DataType]> = wrange.rows().collect();
    let res = parse_rows(&rows, source, path)?;
    info!(
        "read {} poll readings from {}",
        res.len(),
        simplify_file_name(path)
    );
    Ok(res)
}

pub(crate) fn parse_rows(
    rows: &[&[DataType]],
    source: &PollSource,
    path: &str,
) -> ScenarioResult<Vec<Observation>> {
    let (header, body) = rows.split_first().context(EmptyExcelSnafu {})?;
    debug!("read_excel_polls: header: {:?}", header);
    let remapped: Vec<Option<String>> = header
        .iter()
        .map(|dt| match dt {
            DataType::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect();
    let req_cols = [
        source.entity_column(),
        source.category_column(),
        source.share_column(),
    ];
    let cols = get_col_index_mapping(&req_cols, &remapped, path)?;

    let mut res: Vec<Observation> = Vec::new();
    for (idx, row) in body.iter().enumerate() {
        // The header is on the first line.
        let lineno = idx + 2;
        if row.iter().all(|c| matches!(c, DataType::Empty)) {
            debug!("read_excel_polls: skipping empty line {}", lineno);
            continue;
        }
        let entity = read_label(row, cols[0], lineno)?;
        let category = read_label(row, cols[1], lineno)?;
        let share = read_share(row, cols[2], lineno)?;
        res.push(Observation {
            entity,
            category,
            share,
        });
    }
    Ok(res)
}

fn get_cell(row: &[DataType], col: usize, lineno: usize) -> ScenarioResult<&DataType> {
    row.get(col).context(CsvLineTooShortSnafu { lineno })
}

fn read_label(row: &[DataType], col: usize, lineno: usize) -> ScenarioResult<String> {
    match get_cell(row, col, lineno)? {
        DataType::String(s) => Ok(s.trim().to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        // Dates are stored as a number of days, they are kept as such.
        DataType::DateTime(f) => Ok(f.to_string()),
        cell => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn read_share(row: &[DataType], col: usize, lineno: usize) -> ScenarioResult<f64> {
    match get_cell(row, col, lineno)? {
        DataType::Float(f) if f.is_finite() => Ok(*f),
        DataType::Int(i) => Ok(*i as f64),
        DataType::String(s) => parse_share(s, lineno),
        cell => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn get_range(path: &str, source: &PollSource) -> ScenarioResult<calamine::Range<DataType>> {
    debug!(
        "read_excel_polls: path: {:?} worksheet: {:?}",
        path, &source.excel_worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = &source.excel_worksheet_name {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu {}.fail(),
            [(worksheet_name, wrange)] => {
                debug!(
                    "read_excel_polls: path: {:?} worksheet: {:?}",
                    path, worksheet_name
                );
                Ok(wrange.clone())
            }
            _ => MissingWorksheetNameSnafu {
                path,
                count: all_worksheets.len(),
            }
            .fail(),
        }
    }
}
