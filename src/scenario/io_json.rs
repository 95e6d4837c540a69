// JSON polls and GeoJSON boundaries.

use std::fs;

use log::{debug, info};
use scenario_projection::{ColorPolicy, JoinedUnit, Observation};
use serde::Deserialize;
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::scenario::{io_common::simplify_file_name, *};

#[derive(PartialEq, Debug, Clone, Deserialize)]
struct JsonReading {
    entity: String,
    category: String,
    share: JSValue,
}

/// Reads polls written as an array of `{"entity", "category", "share"}` objects.
pub fn read_json_polls(path: &str) -> ScenarioResult<Vec<Observation>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let res = parse_json_polls(&contents, path)?;
    info!(
        "read {} poll readings from {}",
        res.len(),
        simplify_file_name(path)
    );
    Ok(res)
}

pub(crate) fn parse_json_polls(contents: &str, path: &str) -> ScenarioResult<Vec<Observation>> {
    let readings: Vec<JsonReading> =
        serde_json::from_str(contents).context(ParsingJsonSnafu { path })?;
    let mut res: Vec<Observation> = Vec::new();
    for r in readings.into_iter() {
        let share = config_reader::read_js_f64(&r.share)?;
        ensure!(
            share.is_finite(),
            ParsingJsonNumberSnafu {
                content: r.share.to_string()
            }
        );
        res.push(Observation {
            entity: r.entity,
            category: r.category,
            share,
        });
    }
    Ok(res)
}

pub fn read_geojson(path: &str) -> ScenarioResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    // Checked here so that the features can be accessed without failure later.
    features(&js, path)?;
    Ok(js)
}

/// The features of a GeoJSON feature collection.
pub fn features<'a>(doc: &'a JSValue, path: &str) -> ScenarioResult<&'a [JSValue]> {
    ensure!(
        doc["type"] == "FeatureCollection",
        NotAFeatureCollectionSnafu { path }
    );
    let res = doc["features"]
        .as_array()
        .context(NotAFeatureCollectionSnafu { path })?;
    Ok(res.as_slice())
}

/// The value of the join key in the properties of a feature. Numbers are
/// turned into strings.
pub fn feature_key(feature: &JSValue, join_key: &str) -> Option<String> {
    match &feature["properties"][join_key] {
        JSValue::String(s) => Some(s.trim().to_string()),
        JSValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A copy of the feature collection where every feature has a `winner` and a
/// `color` property. Features without a winner only get the color.
pub fn annotate(
    doc: &JSValue,
    joined: &[JoinedUnit<'_, JSValue>],
    colors: &ColorPolicy,
) -> JSValue {
    let annotated: Vec<JSValue> = joined
        .iter()
        .map(|j| {
            let mut feature = j.unit.clone();
            if !feature.is_object() {
                return feature;
            }
            if !feature["properties"].is_object() {
                feature["properties"] = JSValue::Object(serde_json::Map::new());
            }
            if let Some(props) = feature["properties"].as_object_mut() {
                if let Some(w) = &j.winner {
                    props.insert("winner".to_string(), JSValue::String(w.clone()));
                }
                props.insert("color".to_string(), JSValue::String(j.color(colors)));
            }
            debug!("annotate: {:?} -> {:?}", j.key, j.winner);
            feature
        })
        .collect();
    let mut res = doc.clone();
    res["features"] = JSValue::Array(annotated);
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenario_projection::{join_geography_with_predictions, Baseline, RowPrediction};
    use serde_json::json;

    fn collection() -> JSValue {
        json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "North", "code": 7}, "geometry": null},
                {"type": "Feature", "properties": {"name": "South"}, "geometry": null},
                {"type": "Feature", "geometry": null}
            ]
        })
    }

    #[test]
    fn polls() {
        let data = r#"[{"entity": "d1", "category": "A", "share": 42},
                       {"entity": "d1", "category": "B", "share": "4.5"}]"#;
        let res = parse_json_polls(data, "polls.json").unwrap();
        assert_eq!(res[0].share, 42.0);
        assert_eq!(res[1].category, "B");
        assert_eq!(res[1].share, 4.5);
    }

    #[test]
    fn polls_null_share() {
        let data = r#"[{"entity": "d1", "category": "A", "share": null}]"#;
        let res = parse_json_polls(data, "polls.json");
        assert!(matches!(res, Err(ScenarioError::ParsingJsonNumber { .. })));
    }

    #[test]
    fn keys() {
        let c = collection();
        let f = features(&c, "x.geojson").unwrap();
        assert_eq!(feature_key(&f[0], "name"), Some("North".to_string()));
        assert_eq!(feature_key(&f[0], "code"), Some("7".to_string()));
        assert_eq!(feature_key(&f[1], "code"), None);
        assert_eq!(feature_key(&f[2], "name"), None);
    }

    #[test]
    fn not_a_collection() {
        let js = json!({"type": "Feature"});
        assert!(matches!(
            features(&js, "x.geojson"),
            Err(ScenarioError::NotAFeatureCollection { .. })
        ));
    }

    #[test]
    fn annotated_copy() {
        let c = collection();
        let f = features(&c, "x.geojson").unwrap();
        let preds = vec![RowPrediction {
            entity: "North".to_string(),
            adjusted: Baseline::default(),
            winner: "A".to_string(),
        }];
        let joined = join_geography_with_predictions(f, &preds, |x| feature_key(x, "name"));
        let colors = ColorPolicy {
            colors: [("A".to_string(), "red".to_string())].into_iter().collect(),
            neutral: "grey".to_string(),
        };
        let res = annotate(&c, &joined, &colors);
        assert_eq!(res["type"], json!("FeatureCollection"));
        let props: Vec<JSValue> = res["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|x| x["properties"].clone())
            .collect();
        assert_eq!(
            props,
            vec![
                json!({"name": "North", "code": 7, "winner": "A", "color": "red"}),
                json!({"name": "South", "color": "grey"}),
                json!({"color": "grey"}),
            ]
        );
        // The input is left untouched.
        assert_eq!(c, collection());
    }
}
