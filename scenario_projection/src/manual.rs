/*!

This is the long-form manual for `scenario_projection` and `pollproj`.

## Modes

`pollproj` runs two kinds of scenarios, possibly in the same invocation:

* **polling averages**: the polls are averaged per party, the adjustments are added
  (a party never goes below 0%), and the chance that each party is above a threshold
  (50% by default) is estimated by drawing 10 000 samples from a normal distribution
  centered on the adjusted average (standard deviation 2 by default).
* **electorates**: the adjustments are added to the result of each electorate, the
  party with the highest share wins the electorate, and the winners are attached to
  the boundaries of the electorates to draw a map.

## Input formats

### Polls: `csv`

One reading per line. The names of the columns are configurable (see below), the
defaults are `date`, `party` and `percentage`:

```text
date,party,percentage
2017-06-05,Conservative,42
2017-06-05,Labour,35
2017-06-06,Conservative,44
```

### Polls: `xlsx`

The same layout as `csv`, in an Excel worksheet. The first row holds the column names.
When the workbook has more than one worksheet, its name must be given with
`excelWorksheetName`.

### Polls: `json`

An array of readings:

```text
[{"entity": "2017-06-05", "category": "Conservative", "share": 42}]
```

### Electorate results

A CSV file with one electorate per line. The first column is the name of the
electorate (the join key), every other column is a party:

```text
electorate,Conservative,Labour,Green
Bath,47.3,12.0,2.1
```

### Boundaries

A GeoJSON `FeatureCollection`. The property named by `joinKey` holds the name of the
electorate. The output map is the same collection with two more properties per feature:
`winner` (absent when no result matched) and `color`.

## Configuration

The configuration is a JSON file:

```text
{
  "outputSettings": { "scenarioName": "UK 2017", "outputDirectory": "out", "mapFileName": "map.geojson" },
  "pollSources": [ { "provider": "csv", "filePath": "polls.csv" } ],
  "categories": ["Conservative", "Labour"],
  "adjustments": { "Conservative": 5 },
  "adjustmentRange": [-20, 20],
  "simulation": { "threshold": 50, "sampleSize": 10000, "noiseScale": 2, "randomSeed": "42" },
  "geography": { "resultsFilePath": "electorates.csv", "boundaryFilePath": "electorates.geojson",
                 "joinKey": "electorate", "tiebreakMode": "useCategoryOrder" },
  "categoryColors": { "Conservative": "#0087DC" },
  "neutralColor": "#D3D3D3"
}
```

All the paths are relative to the directory of the configuration file.

Options for `pollSources`:
 - `provider` (string): one of `csv`, `xlsx`, `json`
 - `filePath` (string)
 - `entityColumn`, `categoryColumn`, `shareColumn` (string, optional): the column names
 for `csv` and `xlsx`
 - `excelWorksheetName` (string, optional)

Options for `simulation` (all optional):
 - `threshold` (number, default 50)
 - `sampleSize` (number, default 10000, at most 1000000)
 - `noiseScale` (number, default 2)
 - `randomSeed` (string or number): makes the probabilities reproducible. Without a
 seed, every run gives slightly different probabilities.

Options for `geography`:
 - `resultsFilePath`, `boundaryFilePath` (string)
 - `joinKey` (string, default `electorate`)
 - `tiebreakMode` (string, optional): `useCategoryOrder` (default) picks the first of the
 tied parties in the order of `categories` (or of the columns when `categories` is not
 given), `lexicographic` picks the tied party with the smallest name.

Adjustments outside of `adjustmentRange` are rejected, including the adjustments of
parties that are not in the data: the configuration is checked before any file is read.
Adjustments within the range for parties that are not in the data are ignored.

 */
