use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use log::debug;
use scenario_projection::{Observation, RowShares};
use serde_json::Value as JSValue;

use crate::scenario::{config_reader::PollSource, ScenarioResult};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Tables loaded during one run, so that a file referenced several times
/// is only read and parsed once.
///
/// The cache belongs to the caller of the projection. The engine only ever
/// sees the loaded values.
#[derive(Debug, Default)]
pub struct DatasetCache {
    observations: HashMap<(String, PollSource), Rc<Vec<Observation>>>,
    rows: HashMap<String, Rc<Vec<RowShares>>>,
    documents: HashMap<String, Rc<JSValue>>,
    hits: u32,
}

impl DatasetCache {
    pub fn new() -> DatasetCache {
        DatasetCache::default()
    }

    /// The number of loads that were answered from the cache.
    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn observations<F>(
        &mut self,
        path: &str,
        source: &PollSource,
        load: F,
    ) -> ScenarioResult<Rc<Vec<Observation>>>
    where
        F: FnOnce() -> ScenarioResult<Vec<Observation>>,
    {
        let key = (path.to_string(), source.clone());
        if let Some(x) = self.observations.get(&key) {
            debug!("DatasetCache: polls {:?} already loaded", path);
            self.hits += 1;
            return Ok(x.clone());
        }
        let x = Rc::new(load()?);
        self.observations.insert(key, x.clone());
        Ok(x)
    }

    pub fn rows<F>(&mut self, path: &str, load: F) -> ScenarioResult<Rc<Vec<RowShares>>>
    where
        F: FnOnce() -> ScenarioResult<Vec<RowShares>>,
    {
        if let Some(x) = self.rows.get(path) {
            debug!("DatasetCache: rows {:?} already loaded", path);
            self.hits += 1;
            return Ok(x.clone());
        }
        let x = Rc::new(load()?);
        self.rows.insert(path.to_string(), x.clone());
        Ok(x)
    }

    pub fn document<F>(&mut self, path: &str, load: F) -> ScenarioResult<Rc<JSValue>>
    where
        F: FnOnce() -> ScenarioResult<JSValue>,
    {
        if let Some(x) = self.documents.get(path) {
            debug!("DatasetCache: document {:?} already loaded", path);
            self.hits += 1;
            return Ok(x.clone());
        }
        let x = Rc::new(load()?);
        self.documents.insert(path.to_string(), x.clone());
        Ok(x)
    }
}

/// Given the header of a file (names of each of the columns), finds the
/// position of each of the requested columns.
pub fn get_col_index_mapping(
    req_col_names: &[String],
    header: &[Option<String>],
    path: &str,
) -> ScenarioResult<Vec<usize>> {
    use snafu::OptionExt;

    let col_names: HashMap<&str, usize> = header
        .iter()
        .enumerate()
        .filter_map(|(idx, x)| x.as_ref().map(|s| (s.trim(), idx)))
        .collect();

    debug!("get_col_index_mapping: col_names: {:?}", col_names);

    let mut col_indexes: Vec<usize> = Vec::new();
    for cname in req_col_names {
        let idx = col_names
            .get(cname.as_str())
            .context(crate::scenario::MissingColumnSnafu {
                column: cname,
                path,
            })?;
        col_indexes.push(*idx);
    }
    Ok(col_indexes)
}
