use clap::Parser;

/// This is a program to explore "what if" scenarios over election polls.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file describing the scenario, in JSON format.
    /// For more information about the file format, read the manual of the scenario_projection crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the summary of a scenario in JSON format. If provided, pollproj will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the scenario will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) A file with polls. This is only used when no --config option is given.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv, xlsx or json. See the manual for all the input types.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: the only worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// Use the polls of the 2017 UK general election that come with the program.
    #[clap(long, takes_value = false)]
    pub sample: bool,

    /// (NAME=DELTA, may be repeated) Adds DELTA percentage points to the party NAME.
    /// It overrides the adjustments of the configuration file for this party.
    #[clap(short, long, value_parser)]
    pub adjust: Vec<String>,

    /// (integer) If specified, the simulation always gives the same probabilities.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
