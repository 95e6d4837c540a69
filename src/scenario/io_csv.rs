// Primitives for reading CSV files.

use std::io::Read;

use log::{debug, info};
use scenario_projection::{Baseline, Observation, RowShares};
use snafu::prelude::*;

use crate::scenario::{
    config_reader::PollSource,
    io_common::{get_col_index_mapping, simplify_file_name},
    *,
};

/// Reads polls in the long format: one line per (entity, category, share).
pub fn read_csv_polls(path: &str, source: &PollSource) -> ScenarioResult<Vec<Observation>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    parse_polls(rdr, source, path)
}

pub(crate) fn parse_polls<R: Read>(
    mut rdr: csv::Reader<R>,
    source: &PollSource,
    path: &str,
) -> ScenarioResult<Vec<Observation>> {
    let header: Vec<Option<String>> = rdr
        .headers()
        .context(CsvLineParseSnafu {})?
        .iter()
        .map(|s| Some(s.to_string()))
        .collect();
    let req_cols = [
        source.entity_column(),
        source.category_column(),
        source.share_column(),
    ];
    let cols = get_col_index_mapping(&req_cols, &header, path)?;
    let (entity_idx, category_idx, share_idx) = (cols[0], cols[1], cols[2]);

    let mut res: Vec<Observation> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("parse_polls: {:?} {:?}", lineno, line);
        let entity = line
            .get(entity_idx)
            .context(CsvLineTooShortSnafu { lineno })?;
        let category = line
            .get(category_idx)
            .context(CsvLineTooShortSnafu { lineno })?;
        let share = line
            .get(share_idx)
            .context(CsvLineTooShortSnafu { lineno })?;
        res.push(Observation {
            entity: entity.trim().to_string(),
            category: category.trim().to_string(),
            share: parse_share(share, lineno)?,
        });
    }
    info!(
        "read {} poll readings from {}",
        res.len(),
        simplify_file_name(path)
    );
    Ok(res)
}

/// Reads a share such as `42`, `4.5` or `4.5%`.
pub(crate) fn parse_share(content: &str, lineno: usize) -> ScenarioResult<f64> {
    content
        .trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .context(ParsingShareSnafu { lineno, content })
}

/// Reads the results of the electorates: one line per electorate, one column
/// per category. The column named after the join key holds the name of the
/// electorate (the first column if there is no such column).
pub fn read_csv_electorates(path: &str, join_key: &str) -> ScenarioResult<Vec<RowShares>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    parse_electorates(rdr, join_key, path)
}

pub(crate) fn parse_electorates<R: Read>(
    mut rdr: csv::Reader<R>,
    join_key: &str,
    path: &str,
) -> ScenarioResult<Vec<RowShares>> {
    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu {})?
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    ensure!(
        !header.is_empty(),
        MissingColumnSnafu {
            column: join_key,
            path
        }
    );
    let key_idx = match header.iter().position(|h| h == join_key) {
        Some(idx) => idx,
        None => {
            debug!(
                "parse_electorates: no column {:?}, using {:?} as the name of the electorates",
                join_key, header[0]
            );
            0
        }
    };
    let categories: Vec<(usize, &String)> = header
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != key_idx)
        .collect();
    debug!("parse_electorates: categories {:?}", categories);

    let mut res: Vec<RowShares> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {})?;
        let entity = line
            .get(key_idx)
            .context(CsvLineTooShortSnafu { lineno })?
            .trim()
            .to_string();
        let mut shares: Vec<(String, f64)> = Vec::new();
        for (col_idx, name) in categories.iter() {
            let cell = line
                .get(*col_idx)
                .context(CsvLineTooShortSnafu { lineno })?;
            // A party that did not stand in this electorate.
            let share = if cell.trim().is_empty() {
                0.0
            } else {
                parse_share(cell, lineno)?
            };
            shares.push((name.to_string(), share));
        }
        res.push(RowShares {
            entity,
            shares: Baseline { shares },
        });
    }
    info!(
        "read {} electorates from {}",
        res.len(),
        simplify_file_name(path)
    );
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> PollSource {
        PollSource {
            provider: "csv".to_string(),
            file_path: "polls.csv".to_string(),
            entity_column: None,
            category_column: None,
            share_column: None,
            excel_worksheet_name: None,
        }
    }

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes())
    }

    #[test]
    fn polls_default_columns() {
        let data = "date,party,percentage\n2017-06-05,Conservative,42\n2017-06-05, Labour ,35.5%\n";
        let res = parse_polls(reader(data), &source(), "polls.csv").unwrap();
        assert_eq!(
            res,
            vec![
                Observation {
                    entity: "2017-06-05".to_string(),
                    category: "Conservative".to_string(),
                    share: 42.0,
                },
                Observation {
                    entity: "2017-06-05".to_string(),
                    category: "Labour".to_string(),
                    share: 35.5,
                },
            ]
        );
    }

    #[test]
    fn polls_custom_columns() {
        let data = "pollster,share,when,who\nYouGov,44,d1,Conservative\n";
        let mut s = source();
        s.entity_column = Some("when".to_string());
        s.category_column = Some("who".to_string());
        s.share_column = Some("share".to_string());
        let res = parse_polls(reader(data), &s, "polls.csv").unwrap();
        assert_eq!(res[0].entity, "d1");
        assert_eq!(res[0].category, "Conservative");
        assert_eq!(res[0].share, 44.0);
    }

    #[test]
    fn polls_missing_share() {
        let data = "date,party,percentage\nd1,Conservative,42\nd1,Labour,\n";
        let res = parse_polls(reader(data), &source(), "polls.csv");
        assert!(matches!(
            res,
            Err(ScenarioError::ParsingShare { lineno: 3, .. })
        ));
    }

    #[test]
    fn polls_missing_column() {
        let data = "date,party,share\nd1,Conservative,42\n";
        let res = parse_polls(reader(data), &source(), "polls.csv");
        assert!(matches!(res, Err(ScenarioError::MissingColumn { .. })));
    }

    #[test]
    fn electorates() {
        let data = "Labour,electorate,Conservative,Green\n30,Bath,45.5,\n50,Bristol West,20,25\n";
        let res = parse_electorates(reader(data), "electorate", "e.csv").unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].entity, "Bath");
        assert_eq!(
            res[0].shares,
            Baseline::new(&[("Labour", 30.0), ("Conservative", 45.5), ("Green", 0.0)])
        );
        assert_eq!(res[1].entity, "Bristol West");
    }

    #[test]
    fn electorates_first_column_by_default() {
        let data = "seat,A,B\nNorth,1,2\n";
        let res = parse_electorates(reader(data), "electorate", "e.csv").unwrap();
        assert_eq!(res[0].entity, "North");
        assert_eq!(res[0].shares, Baseline::new(&[("A", 1.0), ("B", 2.0)]));
    }

    #[test]
    fn shares() {
        assert_eq!(parse_share(" 4.5 ", 1).unwrap(), 4.5);
        assert_eq!(parse_share("12%", 1).unwrap(), 12.0);
        assert!(parse_share("NaN", 1).is_err());
        assert!(parse_share("n/a", 1).is_err());
    }
}
