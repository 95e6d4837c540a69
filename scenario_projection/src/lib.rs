/*!
This crate computes "what if" projections over polling data.

Starting from baseline support figures per category (typically a political
party), it applies bounded adjustments and produces:
- the adjusted averages per category,
- the probability that each category is above a threshold, estimated by simulation,
- the winner of each geographic unit, which can be joined back onto map data.

```
use scenario_projection::builder::Builder;
use scenario_projection::*;

let observations = Builder::new()
    .add_row("2017-06-05", &[("Conservative", 42.0), ("Labour", 35.0)])
    .add_row("2017-06-06", &[("Conservative", 44.0), ("Labour", 36.0)])
    .build();

let adjustments = Adjustments::from_pairs(&[("Labour", 3.0)]);
let settings = SimulationSettings::DEFAULT_SETTINGS.with_seed(1);
let projection = project_scenario(&observations, &adjustments, &settings)?;
assert_eq!(projection.adjusted.get("Labour"), Some(38.5));
# Ok::<(), ProjectionErrors>(())
```

See the [manual] for the formats accepted by the `pollproj` command line tool.
*/

mod config;
use log::{debug, info, warn};

use std::collections::{BTreeMap, HashMap};

pub mod builder;
pub mod manual;
mod simulation;

pub use crate::config::*;
pub use crate::simulation::{
    simulate_exceedance_probability, simulate_exceedance_probability_with_rng,
};

/// Computes the mean share of each category over all the observations.
///
/// The categories are returned sorted by name. An empty collection gives an
/// empty baseline.
pub fn aggregate_baseline(observations: &[Observation]) -> Result<Baseline, ProjectionErrors> {
    // (sum, count) per category
    let mut sums: BTreeMap<String, (f64, u32)> = BTreeMap::new();
    for o in observations.iter() {
        if !o.share.is_finite() {
            return Err(ProjectionErrors::InvalidShare(o.category.clone()));
        }
        let e = sums.entry(o.category.clone()).or_insert((0.0, 0));
        e.0 += o.share;
        e.1 += 1;
    }
    let shares: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(name, (sum, count))| (name, sum / count as f64))
        .collect();
    debug!(
        "aggregate_baseline: {} observations -> {:?}",
        observations.len(),
        shares
    );
    Ok(Baseline { shares })
}

/// Adds the adjustments to the baseline. Shares never go below zero.
///
/// Adjustments for categories that are not in the baseline are ignored.
pub fn apply_adjustments(baseline: &Baseline, adjustments: &Adjustments) -> Baseline {
    for name in adjustments.deltas.keys() {
        if !baseline.contains(name) {
            debug!("apply_adjustments: ignoring unknown category {:?}", name);
        }
    }
    Baseline {
        shares: baseline
            .shares
            .iter()
            .map(|(name, share)| (name.clone(), f64::max(0.0, share + adjustments.delta(name))))
            .collect(),
    }
}

fn select_categories(
    row_shares: &Baseline,
    categories: &[String],
) -> Result<Baseline, ProjectionErrors> {
    if categories.is_empty() {
        return Ok(row_shares.clone());
    }
    let mut shares: Vec<(String, f64)> = Vec::new();
    for name in categories.iter() {
        let share = row_shares
            .get(name)
            .ok_or_else(|| ProjectionErrors::MissingCategory(name.clone()))?;
        shares.push((name.clone(), share));
    }
    Ok(Baseline { shares })
}

fn find_winner(adjusted: &Baseline, tie_break: TieBreakMode) -> Result<String, ProjectionErrors> {
    let mut best: Option<&(String, f64)> = None;
    for p in adjusted.shares.iter() {
        if !p.1.is_finite() {
            return Err(ProjectionErrors::InvalidShare(p.0.clone()));
        }
        best = match best {
            None => Some(p),
            Some(b) if p.1 > b.1 => Some(p),
            Some(b) if p.1 == b.1 && tie_break == TieBreakMode::Lexicographic && p.0 < b.0 => {
                Some(p)
            }
            Some(b) => Some(b),
        };
    }
    best.map(|(name, _)| name.clone())
        .ok_or(ProjectionErrors::EmptyRow)
}

/// Predicts the winner of a single row after adjustments.
///
/// Arguments:
/// * `row_shares` the shares of each category for this row
/// * `adjustments` the deltas, applied as in [apply_adjustments]
/// * `categories` the categories that compete. If empty, all the categories of the row compete.
/// * `tie_break` how to choose between categories with the same adjusted share
pub fn predict_winner(
    row_shares: &Baseline,
    adjustments: &Adjustments,
    categories: &[String],
    tie_break: TieBreakMode,
) -> Result<String, ProjectionErrors> {
    let competing = select_categories(row_shares, categories)?;
    let adjusted = apply_adjustments(&competing, adjustments);
    find_winner(&adjusted, tie_break)
}

/// Left join of geographic units with predictions.
///
/// `key_of` extracts the join key of each unit. Units without a key or
/// without a matching prediction are kept, with no winner.
pub fn join_geography_with_predictions<'a, G, F>(
    geo_units: &'a [G],
    predictions: &[RowPrediction],
    key_of: F,
) -> Vec<JoinedUnit<'a, G>>
where
    F: Fn(&G) -> Option<String>,
{
    let mut by_entity: HashMap<&str, &RowPrediction> = HashMap::new();
    for p in predictions.iter() {
        if by_entity.contains_key(p.entity.as_str()) {
            warn!(
                "join_geography_with_predictions: duplicate prediction for {:?}, keeping the first one",
                p.entity
            );
        } else {
            by_entity.insert(p.entity.as_str(), p);
        }
    }

    let mut unmatched: u32 = 0;
    let res: Vec<JoinedUnit<'a, G>> = geo_units
        .iter()
        .map(|unit| {
            let key = key_of(unit);
            let winner = key
                .as_deref()
                .and_then(|k| by_entity.get(k))
                .map(|p| p.winner.clone());
            if winner.is_none() {
                debug!("join_geography_with_predictions: no prediction for {:?}", key);
                unmatched += 1;
            }
            JoinedUnit { unit, key, winner }
        })
        .collect();
    info!(
        "join_geography_with_predictions: {} units, {} without prediction",
        res.len(),
        unmatched
    );
    res
}

/// The time-series scenario: averages the observations, applies the
/// adjustments and estimates the exceedance probabilities.
pub fn project_scenario(
    observations: &[Observation],
    adjustments: &Adjustments,
    settings: &SimulationSettings,
) -> Result<ScenarioProjection, ProjectionErrors> {
    info!(
        "Processing {:?} observations, adjustments: {:?}, settings: {:?}",
        observations.len(),
        adjustments,
        settings
    );
    let baseline = aggregate_baseline(observations)?;
    let adjusted = apply_adjustments(&baseline, adjustments);
    for (name, share) in adjusted.shares.iter() {
        info!(
            "{}: {:.2} -> {:.2}",
            name,
            baseline.get(name).unwrap_or(0.0),
            share
        );
    }
    let probabilities = simulate_exceedance_probability(&adjusted, settings)?;
    Ok(ScenarioProjection {
        adjusted,
        probabilities,
    })
}

/// The geographic scenario: the winner of every row after adjustments.
pub fn predict_rows(
    rows: &[RowShares],
    adjustments: &Adjustments,
    categories: &[String],
    tie_break: TieBreakMode,
) -> Result<Vec<RowPrediction>, ProjectionErrors> {
    info!("Processing {:?} rows, categories: {:?}", rows.len(), categories);
    let mut res: Vec<RowPrediction> = Vec::new();
    for row in rows.iter() {
        let competing = select_categories(&row.shares, categories)?;
        let adjusted = apply_adjustments(&competing, adjustments);
        let winner = find_winner(&adjusted, tie_break)?;
        debug!("predict_rows: {} -> {}", row.entity, winner);
        res.push(RowPrediction {
            entity: row.entity.clone(),
            adjusted,
            winner,
        });
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn names(cats: &[&str]) -> Vec<String> {
        cats.iter().map(|s| s.to_string()).collect()
    }

    fn sample_2017() -> Vec<Observation> {
        Builder::new()
            .add_row(
                "2017-06-05",
                &[
                    ("Conservative", 42.0),
                    ("Labour", 35.0),
                    ("Liberal Democrats", 10.0),
                    ("UKIP", 5.0),
                    ("Green", 2.0),
                ],
            )
            .add_row(
                "2017-06-06",
                &[
                    ("Conservative", 44.0),
                    ("Labour", 36.0),
                    ("Liberal Democrats", 7.0),
                    ("UKIP", 4.0),
                    ("Green", 2.0),
                ],
            )
            .add_row(
                "2017-06-07",
                &[
                    ("Conservative", 46.0),
                    ("Labour", 33.0),
                    ("Liberal Democrats", 8.0),
                    ("UKIP", 5.0),
                    ("Green", 3.0),
                ],
            )
            .add_row(
                "2017-06-08",
                &[
                    ("Conservative", 44.0),
                    ("Labour", 36.0),
                    ("Liberal Democrats", 7.0),
                    ("UKIP", 4.0),
                    ("Green", 2.0),
                ],
            )
            .build()
    }

    #[test]
    fn aggregate_empty() {
        init();
        let b = aggregate_baseline(&[]).unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn aggregate_single() {
        init();
        let obs = Builder::new().observation("d1", "A", 37.5).build();
        let b = aggregate_baseline(&obs).unwrap();
        assert_eq!(b, Baseline::new(&[("A", 37.5)]));
    }

    #[test]
    fn aggregate_sorted_by_name() {
        init();
        let obs = Builder::new()
            .add_row("d1", &[("Labour", 30.0), ("Conservative", 40.0)])
            .add_row("d2", &[("Labour", 32.0), ("Conservative", 42.0)])
            .build();
        let b = aggregate_baseline(&obs).unwrap();
        assert_eq!(b, Baseline::new(&[("Conservative", 41.0), ("Labour", 31.0)]));
    }

    #[test]
    fn aggregate_rejects_nan() {
        init();
        let obs = Builder::new()
            .observation("d1", "A", 1.0)
            .observation("d1", "B", f64::NAN)
            .build();
        assert_eq!(
            aggregate_baseline(&obs),
            Err(ProjectionErrors::InvalidShare("B".to_string()))
        );
    }

    #[test]
    fn aggregate_2017() {
        init();
        let b = aggregate_baseline(&sample_2017()).unwrap();
        assert_eq!(
            b,
            Baseline::new(&[
                ("Conservative", 44.0),
                ("Green", 2.25),
                ("Labour", 35.0),
                ("Liberal Democrats", 8.0),
                ("UKIP", 4.5),
            ])
        );
    }

    #[test]
    fn adjust_empty_is_identity() {
        init();
        let b = Baseline::new(&[("A", 10.0), ("B", 0.0), ("C", 55.5)]);
        assert_eq!(apply_adjustments(&b, &Adjustments::none()), b);
    }

    #[test]
    fn adjust_clamps_at_zero() {
        init();
        let b = Baseline::new(&[("A", 10.0), ("B", 20.0)]);
        let a = Adjustments::from_pairs(&[("A", -10.0), ("B", -25.0)]);
        assert_eq!(
            apply_adjustments(&b, &a),
            Baseline::new(&[("A", 0.0), ("B", 0.0)])
        );
    }

    #[test]
    fn adjust_ignores_unknown() {
        init();
        let b = Baseline::new(&[("A", 10.0)]);
        let a = Adjustments::from_pairs(&[("Z", 5.0), ("A", 1.0)]);
        assert_eq!(apply_adjustments(&b, &a), Baseline::new(&[("A", 11.0)]));
    }

    #[test]
    fn adjust_2017_conservative() {
        init();
        let b = aggregate_baseline(&sample_2017()).unwrap();
        let a = Adjustments::from_pairs(&[("Conservative", 5.0)]);
        let adjusted = apply_adjustments(&b, &a);
        assert_eq!(adjusted.get("Conservative"), Some(49.0));
        for name in ["Labour", "Liberal Democrats", "UKIP", "Green"] {
            assert_eq!(adjusted.get(name), b.get(name));
        }
    }

    #[test]
    fn winner_simple() {
        init();
        let row = Baseline::new(&[("A", 50.0), ("B", 30.0)]);
        let cats = names(&["A", "B"]);
        let w = predict_winner(&row, &Adjustments::none(), &cats, TieBreakMode::UseCategoryOrder);
        assert_eq!(w, Ok("A".to_string()));
        let a = Adjustments::from_pairs(&[("A", -30.0)]);
        let w = predict_winner(&row, &a, &cats, TieBreakMode::UseCategoryOrder);
        assert_eq!(w, Ok("B".to_string()));
    }

    #[test]
    fn winner_all_row_categories() {
        init();
        let row = Baseline::new(&[("A", 10.0), ("B", 30.0), ("C", 20.0)]);
        let w = predict_winner(&row, &Adjustments::none(), &[], TieBreakMode::UseCategoryOrder);
        assert_eq!(w, Ok("B".to_string()));
    }

    #[test]
    fn winner_restricted_categories() {
        init();
        let row = Baseline::new(&[("A", 10.0), ("B", 30.0), ("C", 20.0)]);
        let cats = names(&["A", "C"]);
        let w = predict_winner(&row, &Adjustments::none(), &cats, TieBreakMode::UseCategoryOrder);
        assert_eq!(w, Ok("C".to_string()));
    }

    #[test]
    fn winner_ties() {
        init();
        let row = Baseline::new(&[("B", 30.0), ("A", 30.0), ("C", 10.0)]);
        let w = predict_winner(&row, &Adjustments::none(), &[], TieBreakMode::UseCategoryOrder);
        assert_eq!(w, Ok("B".to_string()));
        let w = predict_winner(&row, &Adjustments::none(), &[], TieBreakMode::Lexicographic);
        assert_eq!(w, Ok("A".to_string()));
        // The order of the requested categories is the one that counts.
        let cats = names(&["C", "A", "B"]);
        let w = predict_winner(&row, &Adjustments::none(), &cats, TieBreakMode::UseCategoryOrder);
        assert_eq!(w, Ok("A".to_string()));
    }

    #[test]
    fn winner_all_clamped() {
        init();
        let row = Baseline::new(&[("A", 5.0), ("B", 3.0)]);
        let a = Adjustments::from_pairs(&[("A", -20.0), ("B", -20.0)]);
        let w = predict_winner(&row, &a, &[], TieBreakMode::UseCategoryOrder);
        assert_eq!(w, Ok("A".to_string()));
    }

    #[test]
    fn winner_empty_row() {
        init();
        let w = predict_winner(
            &Baseline::default(),
            &Adjustments::none(),
            &[],
            TieBreakMode::UseCategoryOrder,
        );
        assert_eq!(w, Err(ProjectionErrors::EmptyRow));
    }

    #[test]
    fn winner_missing_category() {
        init();
        let row = Baseline::new(&[("A", 5.0)]);
        let w = predict_winner(
            &row,
            &Adjustments::none(),
            &names(&["A", "B"]),
            TieBreakMode::UseCategoryOrder,
        );
        assert_eq!(w, Err(ProjectionErrors::MissingCategory("B".to_string())));
    }

    #[derive(Debug, PartialEq)]
    struct Unit {
        name: Option<&'static str>,
    }

    fn prediction(entity: &str, winner: &str) -> RowPrediction {
        RowPrediction {
            entity: entity.to_string(),
            adjusted: Baseline::default(),
            winner: winner.to_string(),
        }
    }

    #[test]
    fn join_left() {
        init();
        let units = vec![
            Unit { name: Some("North") },
            Unit { name: Some("Nowhere") },
            Unit { name: None },
        ];
        let preds = vec![prediction("North", "A"), prediction("South", "B")];
        let joined = join_geography_with_predictions(&units, &preds, |u| {
            u.name.map(|s| s.to_string())
        });
        assert_eq!(joined.len(), 3);
        assert_eq!(joined[0].winner, Some("A".to_string()));
        assert_eq!(joined[1].key, Some("Nowhere".to_string()));
        assert_eq!(joined[1].winner, None);
        assert_eq!(joined[2].key, None);
        assert_eq!(joined[2].winner, None);
        assert_eq!(joined[2].unit, &units[2]);
    }

    #[test]
    fn join_duplicate_keeps_first() {
        init();
        let units = vec![Unit { name: Some("North") }];
        let preds = vec![prediction("North", "A"), prediction("North", "B")];
        let joined = join_geography_with_predictions(&units, &preds, |u| {
            u.name.map(|s| s.to_string())
        });
        assert_eq!(joined[0].winner, Some("A".to_string()));
    }

    #[test]
    fn join_colors() {
        init();
        let policy = ColorPolicy {
            colors: [("A".to_string(), "#0000ff".to_string())].into_iter().collect(),
            neutral: "#cccccc".to_string(),
        };
        let units = vec![
            Unit { name: Some("North") },
            Unit { name: Some("South") },
            Unit { name: Some("East") },
        ];
        let preds = vec![prediction("North", "A"), prediction("South", "B")];
        let joined = join_geography_with_predictions(&units, &preds, |u| {
            u.name.map(|s| s.to_string())
        });
        let colors: Vec<String> = joined.iter().map(|j| j.color(&policy)).collect();
        assert_eq!(colors, vec!["#0000ff", "#cccccc", "#cccccc"]);
    }

    #[test]
    fn scenario_2017() {
        init();
        let a = Adjustments::from_pairs(&[("Conservative", 5.0), ("SNP", 10.0)]);
        let settings = SimulationSettings::DEFAULT_SETTINGS.with_seed(2017);
        let p = project_scenario(&sample_2017(), &a, &settings).unwrap();
        assert_eq!(p.adjusted.get("Conservative"), Some(49.0));
        assert_eq!(p.adjusted.get("Labour"), Some(35.0));
        assert!(!p.adjusted.contains("SNP"));
        let probs: HashMap<String, f64> = p.probabilities.iter().cloned().collect();
        // 49 is half a standard deviation under 50: about 0.31
        let con = probs["Conservative"];
        assert!(con > 0.27 && con < 0.35, "{:?}", probs);
        assert_eq!(probs["Labour"], 0.0);
        assert_eq!(probs["Green"], 0.0);
    }

    #[test]
    fn rows_predictions() {
        init();
        let rows = vec![
            RowShares {
                entity: "North".to_string(),
                shares: Baseline::new(&[("A", 40.0), ("B", 45.0)]),
            },
            RowShares {
                entity: "South".to_string(),
                shares: Baseline::new(&[("A", 50.0), ("B", 20.0)]),
            },
        ];
        let a = Adjustments::from_pairs(&[("A", 10.0)]);
        let res = predict_rows(&rows, &a, &names(&["A", "B"]), TieBreakMode::UseCategoryOrder)
            .unwrap();
        let winners: Vec<(&str, &str)> = res
            .iter()
            .map(|p| (p.entity.as_str(), p.winner.as_str()))
            .collect();
        assert_eq!(winners, vec![("North", "A"), ("South", "A")]);
        assert_eq!(res[0].adjusted, Baseline::new(&[("A", 50.0), ("B", 45.0)]));
    }
}
