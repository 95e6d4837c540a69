// The polls of the last days of the 2017 UK general election campaign.

use scenario_projection::Observation;

use crate::scenario::{config_reader::PollSource, io_csv::parse_polls, ScenarioResult};

pub const SAMPLE_POLLS_CSV: &str = "date,party,percentage
2017-06-05,Conservative,42
2017-06-05,Labour,35
2017-06-05,Liberal Democrats,10
2017-06-05,UKIP,5
2017-06-05,Green,2
2017-06-06,Conservative,44
2017-06-06,Labour,36
2017-06-06,Liberal Democrats,7
2017-06-06,UKIP,4
2017-06-06,Green,2
2017-06-07,Conservative,46
2017-06-07,Labour,33
2017-06-07,Liberal Democrats,8
2017-06-07,UKIP,5
2017-06-07,Green,3
2017-06-08,Conservative,44
2017-06-08,Labour,36
2017-06-08,Liberal Democrats,7
2017-06-08,UKIP,4
2017-06-08,Green,2
";

pub fn sample_observations() -> ScenarioResult<Vec<Observation>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(SAMPLE_POLLS_CSV.as_bytes());
    let source = PollSource {
        provider: "sample".to_string(),
        file_path: "".to_string(),
        entity_column: None,
        category_column: None,
        share_column: None,
        excel_worksheet_name: None,
    };
    parse_polls(rdr, &source, "sample")
}
