use log::{debug, info, warn};

use scenario_projection::*;
use snafu::{prelude::*, Snafu};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::scenario::config_reader::*;
use crate::scenario::io_common::DatasetCache;

pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod io_json;
pub mod sample;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ScenarioError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Expected a number or a string holding a number, got {content}"))]
    ParsingJsonNumber { content: String },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error serializing the output"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a line of a CSV file"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Cannot find column {column:?} in {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Line {lineno}: expected a share, got {content:?}"))]
    ParsingShare { lineno: usize, content: String },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file has no data"))]
    EmptyExcel {},
    #[snafu(display("Line {lineno}: unexpected cell content {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("The workbook {path} has {count} worksheets, the worksheet name must be provided"))]
    MissingWorksheetName { path: String, count: usize },
    #[snafu(display("{path} is not a GeoJSON feature collection"))]
    NotAFeatureCollection { path: String },
    #[snafu(display("Provider not implemented: {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("No polls and no electorates to process"))]
    MissingInput {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Adjustment {delta} for {category} is outside of [{min}, {max}]"))]
    AdjustmentOutOfRange {
        category: String,
        delta: f64,
        min: f64,
        max: f64,
    },
    #[snafu(display("Cannot understand adjustment {arg:?}, expected NAME=DELTA"))]
    InvalidAdjustmentArgument { arg: String },
    #[snafu(display("Projection error"))]
    Projection { source: ProjectionErrors },
    #[snafu(display("Difference detected between computed summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;

pub mod config_reader {
    use crate::scenario::*;

    #[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct OutputSettings {
        #[serde(rename = "scenarioName")]
        pub scenario_name: String,
        #[serde(rename = "outputDirectory")]
        pub output_directory: Option<String>,
        #[serde(rename = "mapFileName")]
        pub map_file_name: Option<String>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Deserialize)]
    pub struct PollSource {
        pub provider: String,
        #[serde(rename = "filePath", default)]
        pub file_path: String,
        #[serde(rename = "entityColumn")]
        pub entity_column: Option<String>,
        #[serde(rename = "categoryColumn")]
        pub category_column: Option<String>,
        #[serde(rename = "shareColumn")]
        pub share_column: Option<String>,
        #[serde(rename = "excelWorksheetName")]
        pub excel_worksheet_name: Option<String>,
    }

    impl PollSource {
        pub fn entity_column(&self) -> String {
            self.entity_column.clone().unwrap_or_else(|| "date".to_string())
        }

        pub fn category_column(&self) -> String {
            self.category_column
                .clone()
                .unwrap_or_else(|| "party".to_string())
        }

        pub fn share_column(&self) -> String {
            self.share_column
                .clone()
                .unwrap_or_else(|| "percentage".to_string())
        }
    }

    #[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct SimulationConfig {
        pub threshold: Option<JSValue>,
        #[serde(rename = "sampleSize")]
        pub sample_size: Option<JSValue>,
        #[serde(rename = "noiseScale")]
        pub noise_scale: Option<JSValue>,
        #[serde(rename = "randomSeed")]
        pub random_seed: Option<JSValue>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct GeographyConfig {
        #[serde(rename = "resultsFilePath")]
        pub results_file_path: String,
        #[serde(rename = "boundaryFilePath")]
        pub boundary_file_path: String,
        #[serde(rename = "joinKey")]
        pub join_key: Option<String>,
        #[serde(rename = "tiebreakMode")]
        pub tiebreak_mode: Option<String>,
    }

    impl GeographyConfig {
        pub fn join_key(&self) -> String {
            self.join_key
                .clone()
                .unwrap_or_else(|| "electorate".to_string())
        }
    }

    #[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct ScenarioConfig {
        #[serde(rename = "outputSettings")]
        pub output_settings: OutputSettings,
        #[serde(rename = "pollSources", default)]
        pub poll_sources: Vec<PollSource>,
        pub categories: Option<Vec<String>>,
        pub adjustments: Option<BTreeMap<String, f64>>,
        #[serde(rename = "adjustmentRange")]
        pub adjustment_range: Option<(f64, f64)>,
        pub simulation: Option<SimulationConfig>,
        pub geography: Option<GeographyConfig>,
        #[serde(rename = "categoryColors")]
        pub category_colors: Option<BTreeMap<String, String>>,
        #[serde(rename = "neutralColor")]
        pub neutral_color: Option<String>,
    }

    pub fn read_config(path: &str) -> ScenarioResult<ScenarioConfig> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })
    }

    pub fn read_summary(path: &str) -> ScenarioResult<JSValue> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
        debug!("read content: {:?}", contents);
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
    }

    pub(crate) fn read_js_f64(x: &JSValue) -> ScenarioResult<f64> {
        let res = match x {
            JSValue::Number(n) => n.as_f64(),
            JSValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        res.context(ParsingJsonNumberSnafu {
            content: x.to_string(),
        })
    }

    pub(crate) fn read_js_u64(x: &JSValue) -> ScenarioResult<u64> {
        let res = match x {
            JSValue::Number(n) => n.as_u64(),
            JSValue::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        res.context(ParsingJsonNumberSnafu {
            content: x.to_string(),
        })
    }
}

/// Values given on the command line that take precedence over the configuration.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Overrides {
    pub adjustments: Vec<(String, f64)>,
    pub seed: Option<u64>,
}

/// A configuration, after validation.
#[derive(PartialEq, Debug, Clone)]
struct Scenario {
    name: String,
    adjustments: Adjustments,
    simulation: SimulationSettings,
    categories: Vec<String>,
    tie_break: TieBreakMode,
    colors: ColorPolicy,
}

/// Everything computed for one scenario.
#[derive(PartialEq, Debug, Clone)]
pub struct ScenarioOutcome {
    pub projection: Option<ScenarioProjection>,
    pub predictions: Vec<RowPrediction>,
    /// The boundaries, with the winner and the color of each electorate.
    pub map: Option<JSValue>,
    pub summary: JSValue,
    pub settings: SimulationSettings,
}

pub const DEFAULT_ADJUSTMENT_RANGE: (f64, f64) = (-20.0, 20.0);
pub const DEFAULT_NEUTRAL_COLOR: &str = "#D3D3D3";
/// The largest sample size accepted in a configuration.
pub const MAX_SAMPLE_SIZE: u32 = 1_000_000;
/// Length of the bar of a 100% share.
const MAX_BAR_LENGTH: f64 = 100.0;

pub fn parse_adjustment_arg(arg: &str) -> ScenarioResult<(String, f64)> {
    let (name, delta) = arg
        .rsplit_once('=')
        .context(InvalidAdjustmentArgumentSnafu { arg })?;
    let delta = delta
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .context(InvalidAdjustmentArgumentSnafu { arg })?;
    let name = name.trim();
    ensure!(!name.is_empty(), InvalidAdjustmentArgumentSnafu { arg });
    Ok((name.to_string(), delta))
}

fn validate_adjustments(
    config: &ScenarioConfig,
    overrides: &[(String, f64)],
) -> ScenarioResult<Adjustments> {
    let (min, max) = config.adjustment_range.unwrap_or(DEFAULT_ADJUSTMENT_RANGE);
    if min > max {
        whatever!("Invalid adjustment range [{}, {}]", min, max)
    }
    let mut deltas: BTreeMap<String, f64> = config.adjustments.clone().unwrap_or_default();
    for (name, delta) in overrides.iter() {
        deltas.insert(name.clone(), *delta);
    }
    for (category, delta) in deltas.iter() {
        ensure!(
            *delta >= min && *delta <= max,
            AdjustmentOutOfRangeSnafu {
                category,
                delta: *delta,
                min,
                max
            }
        );
    }
    Ok(Adjustments {
        deltas: deltas.into_iter().collect(),
    })
}

fn validate_simulation(
    config: &Option<SimulationConfig>,
    seed_override: Option<u64>,
) -> ScenarioResult<SimulationSettings> {
    let mut res = SimulationSettings::DEFAULT_SETTINGS;
    if let Some(sc) = config {
        if let Some(x) = &sc.threshold {
            res.threshold = read_js_f64(x)?;
        }
        if let Some(x) = &sc.sample_size {
            let n = read_js_u64(x)?;
            res.sample_size = match u32::try_from(n) {
                Result::Ok(n) if n > 0 && n <= MAX_SAMPLE_SIZE => n,
                _ => whatever!(
                    "sampleSize must be between 1 and {}, got {}",
                    MAX_SAMPLE_SIZE,
                    n
                ),
            };
        }
        if let Some(x) = &sc.noise_scale {
            res.noise_scale = read_js_f64(x)?;
        }
        if let Some(x) = &sc.random_seed {
            res.seed = Some(read_js_u64(x)?);
        }
    }
    if seed_override.is_some() {
        res.seed = seed_override;
    }
    if res.sample_size < SimulationSettings::DEFAULT_SETTINGS.sample_size {
        warn!(
            "validate_simulation: only {} samples per party, the probabilities will be imprecise",
            res.sample_size
        );
    }
    Ok(res)
}

fn validate_tiebreak(mode: &Option<String>) -> ScenarioResult<TieBreakMode> {
    let res = match mode.as_deref() {
        None | Some("useCategoryOrder") => TieBreakMode::UseCategoryOrder,
        Some("lexicographic") => TieBreakMode::Lexicographic,
        Some(x) => {
            whatever!("Cannot use tiebreak mode {:?} (currently not implemented)", x)
        }
    };
    Ok(res)
}

fn validate_scenario(config: &ScenarioConfig, overrides: &Overrides) -> ScenarioResult<Scenario> {
    let tie_break = match &config.geography {
        Some(g) => validate_tiebreak(&g.tiebreak_mode)?,
        None => TieBreakMode::UseCategoryOrder,
    };
    Ok(Scenario {
        name: config.output_settings.scenario_name.clone(),
        adjustments: validate_adjustments(config, &overrides.adjustments)?,
        simulation: validate_simulation(&config.simulation, overrides.seed)?,
        categories: config.categories.clone().unwrap_or_default(),
        tie_break,
        colors: ColorPolicy {
            colors: config
                .category_colors
                .clone()
                .unwrap_or_default()
                .into_iter()
                .collect(),
            neutral: config
                .neutral_color
                .clone()
                .unwrap_or_else(|| DEFAULT_NEUTRAL_COLOR.to_string()),
        },
    })
}

fn resolve(root: &Path, file_path: &str) -> String {
    let p: PathBuf = [root, Path::new(file_path)].iter().collect();
    p.as_path().display().to_string()
}

fn read_polls(
    root: &Path,
    source: &PollSource,
    cache: &mut DatasetCache,
) -> ScenarioResult<Vec<Observation>> {
    let path = resolve(root, &source.file_path);
    info!("Attempting to read polls {:?} ({})", path, source.provider);
    let observations = cache.observations(&path, source, || match source.provider.as_str() {
        "sample" => sample::sample_observations(),
        "csv" => io_csv::read_csv_polls(&path, source),
        "xlsx" => io_excel::read_excel_polls(&path, source),
        "json" => io_json::read_json_polls(&path),
        x => UnknownProviderSnafu { provider: x }.fail(),
    })?;
    Ok(observations.to_vec())
}

/// Text rendition of a bar chart, one `#` per percentage point. Shares are not
/// normalized, the bars stop at 100.
pub fn render_bar_chart(shares: &Baseline) -> String {
    let width = shares
        .shares
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    let mut res = String::new();
    for (name, share) in shares.shares.iter() {
        let bar = "#".repeat(share.round().clamp(0.0, MAX_BAR_LENGTH) as usize);
        res.push_str(&format!("{:<width$} {:>6.2} {}\n", name, share, bar, width = width));
    }
    res
}

pub fn render_probabilities(probabilities: &[(String, f64)], threshold: f64) -> String {
    let mut res = String::new();
    for (name, p) in probabilities.iter() {
        res.push_str(&format!(
            "{}: {:.1}% chance of >{}% support\n",
            name,
            p * 100.0,
            threshold
        ));
    }
    res
}

fn shares_to_json(shares: &[(String, f64)], decimals: usize) -> JSMap<String, JSValue> {
    shares
        .iter()
        .map(|(name, x)| (name.clone(), json!(format!("{:.*}", decimals, x))))
        .collect()
}

fn build_summary_js(
    scenario: &Scenario,
    projection: &Option<ScenarioProjection>,
    predictions: &[RowPrediction],
) -> JSValue {
    let settings = &scenario.simulation;
    let mut js = JSMap::new();
    js.insert(
        "config".to_string(),
        json!({
            "scenario": scenario.name,
            "threshold": settings.threshold.to_string(),
            "sampleSize": settings.sample_size.to_string(),
            "noiseScale": settings.noise_scale.to_string(),
            "seed": settings.seed.map(|s| s.to_string()),
        }),
    );
    if let Some(p) = projection {
        js.insert(
            "adjustedShares".to_string(),
            JSValue::Object(shares_to_json(&p.adjusted.shares, 2)),
        );
        js.insert(
            "probabilities".to_string(),
            JSValue::Object(shares_to_json(&p.probabilities, 4)),
        );
    }
    if !predictions.is_empty() {
        let winners: Vec<JSValue> = predictions
            .iter()
            .map(|p| json!({"entity": p.entity, "winner": p.winner}))
            .collect();
        js.insert("winners".to_string(), JSValue::Array(winners));
    }
    JSValue::Object(js)
}

/// Loads the data of the scenario and runs the projections.
///
/// All the paths of the configuration are relative to `root`.
pub fn compute_scenario(
    config: &ScenarioConfig,
    root: &Path,
    overrides: &Overrides,
    cache: &mut DatasetCache,
) -> ScenarioResult<ScenarioOutcome> {
    let scenario = validate_scenario(config, overrides)?;
    info!("scenario: {:?}", scenario);

    ensure!(
        !config.poll_sources.is_empty() || config.geography.is_some(),
        MissingInputSnafu {}
    );

    let projection = if config.poll_sources.is_empty() {
        None
    } else {
        let mut data: Vec<Observation> = Vec::new();
        for source in config.poll_sources.iter() {
            let mut polls = read_polls(root, source, cache)?;
            data.append(&mut polls);
        }
        let data: Vec<Observation> = if scenario.categories.is_empty() {
            data
        } else {
            data.into_iter()
                .filter(|o| scenario.categories.contains(&o.category))
                .collect()
        };
        info!("Read {} poll readings", data.len());
        let p = project_scenario(&data, &scenario.adjustments, &scenario.simulation)
            .context(ProjectionSnafu {})?;
        Some(p)
    };

    let (predictions, map) = match &config.geography {
        None => (Vec::new(), None),
        Some(geo) => {
            let join_key = geo.join_key();
            let results_path = resolve(root, &geo.results_file_path);
            info!("Attempting to read electorate results {:?}", results_path);
            let rows = cache.rows(&results_path, || {
                io_csv::read_csv_electorates(&results_path, &join_key)
            })?;
            let predictions = predict_rows(
                &rows,
                &scenario.adjustments,
                &scenario.categories,
                scenario.tie_break,
            )
            .context(ProjectionSnafu {})?;

            let boundary_path = resolve(root, &geo.boundary_file_path);
            info!("Attempting to read boundaries {:?}", boundary_path);
            let boundaries =
                cache.document(&boundary_path, || io_json::read_geojson(&boundary_path))?;
            let features = io_json::features(&boundaries, &boundary_path)?;
            let joined = join_geography_with_predictions(features, &predictions, |f| {
                io_json::feature_key(f, &join_key)
            });
            let map = io_json::annotate(&boundaries, &joined, &scenario.colors);
            (predictions, Some(map))
        }
    };

    let summary = build_summary_js(&scenario, &projection, &predictions);
    Ok(ScenarioOutcome {
        projection,
        predictions,
        map,
        summary,
        settings: scenario.simulation,
    })
}

fn print_outcome(outcome: &ScenarioOutcome, threshold: f64) {
    if let Some(p) = &outcome.projection {
        println!("Adjusted polling averages");
        print!("{}", render_bar_chart(&p.adjusted));
        println!();
        println!("Estimated win probabilities (simplified)");
        print!("{}", render_probabilities(&p.probabilities, threshold));
    }
    if !outcome.predictions.is_empty() {
        println!();
        println!("Predicted winners");
        for p in outcome.predictions.iter() {
            println!("{}: {}", p.entity, p.winner);
        }
    }
}

fn write_output(path: &str, contents: &str) -> ScenarioResult<()> {
    if path == "stdout" {
        println!("{}", contents);
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(WritingOutputSnafu { path })?;
        }
    }
    info!("Writing {:?}", path);
    fs::write(path, contents).context(WritingOutputSnafu { path })
}

/// Runs a scenario end to end: computes, prints, writes the outputs and, if
/// requested, checks the summary against a reference.
pub fn run_scenario(
    config: &ScenarioConfig,
    root: &Path,
    overrides: &Overrides,
    out_path: Option<String>,
    check_summary_path: Option<String>,
) -> ScenarioResult<()> {
    let mut cache = DatasetCache::new();
    let outcome = compute_scenario(config, root, overrides, &mut cache)?;
    debug!("run_scenario: {} loads answered from the cache", cache.hits());
    print_outcome(&outcome, outcome.settings.threshold);

    let output_dir: Option<String> = config
        .output_settings
        .output_directory
        .as_ref()
        .map(|d| resolve(root, d));

    if let Some(map) = &outcome.map {
        match &output_dir {
            Some(dir) => {
                let name = config
                    .output_settings
                    .map_file_name
                    .clone()
                    .unwrap_or_else(|| "map.geojson".to_string());
                let map_js = serde_json::to_string_pretty(map).context(SerializingJsonSnafu {})?;
                write_output(&resolve(Path::new(dir), &name), &map_js)?;
            }
            None => info!("No output directory, the map is not written"),
        }
    }

    let pretty_js_stats =
        serde_json::to_string_pretty(&outcome.summary).context(SerializingJsonSnafu {})?;
    let summary_path: Option<String> = out_path.or_else(|| {
        output_dir.map(|dir| {
            resolve(
                Path::new(&dir),
                &format!("{}_summary.json", config.output_settings.scenario_name),
            )
        })
    });
    match summary_path {
        Some(p) => write_output(&p, &pretty_js_stats)?,
        None => debug!("summary: {}", pretty_js_stats),
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(&summary_p)?;
        info!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
    }

    Ok(())
}

fn config_from_args(args: &Args) -> ScenarioResult<ScenarioConfig> {
    let source = if args.sample {
        PollSource {
            provider: "sample".to_string(),
            file_path: "".to_string(),
            entity_column: None,
            category_column: None,
            share_column: None,
            excel_worksheet_name: None,
        }
    } else {
        let input = args.input.clone().context(MissingInputSnafu {})?;
        PollSource {
            provider: args.input_type.clone().unwrap_or_else(|| "csv".to_string()),
            file_path: input,
            entity_column: None,
            category_column: None,
            share_column: None,
            excel_worksheet_name: args.excel_worksheet_name.clone(),
        }
    };
    Ok(ScenarioConfig {
        output_settings: OutputSettings {
            scenario_name: "scenario".to_string(),
            output_directory: None,
            map_file_name: None,
        },
        poll_sources: vec![source],
        categories: None,
        adjustments: None,
        adjustment_range: None,
        simulation: None,
        geography: None,
        category_colors: None,
        neutral_color: None,
    })
}

pub fn run(args: &Args) -> ScenarioResult<()> {
    let mut adjustments: Vec<(String, f64)> = Vec::new();
    for a in args.adjust.iter() {
        adjustments.push(parse_adjustment_arg(a)?);
    }
    let overrides = Overrides {
        adjustments,
        seed: args.seed,
    };

    let (config, root): (ScenarioConfig, PathBuf) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, root)
        }
        None => (config_from_args(args)?, PathBuf::from("")),
    };

    run_scenario(
        &config,
        &root,
        &overrides,
        args.out.clone(),
        args.reference.clone(),
    )
}

#[cfg(test)]
fn run_scenario_test(test_name: &str, config_lpath: &str, summary_lpath: &str) {
    let test_dir = option_env!("SCENARIO_TEST_DIR")
        .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/tests"));
    info!("Running test {}", test_name);
    let config_path = format!("{}/{}/{}", test_dir, test_name, config_lpath);
    let config = read_config(&config_path).unwrap();
    let root = Path::new(&config_path).parent().unwrap().to_path_buf();
    let res = run_scenario(
        &config,
        &root,
        &Overrides::default(),
        None,
        Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
    );
    if let Err(e) = &res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
    }
    assert!(res.is_ok(), "{:?}", res);
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    run_scenario_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    )
}
