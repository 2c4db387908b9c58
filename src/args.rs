use clap::Parser;

/// This is the scoring program for the TVTC institutional evaluation.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file describing the evaluation: output settings, school type,
    /// response sources and draft location, in JSON format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference summary in JSON format. If provided, tvtcscore will check that
    /// the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the evaluation will be written
    /// in JSON format to the given location. Setting this option overrides the output directory
    /// that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) A file of responses. Setting this option overrides the response
    /// sources of the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default json) The type of the input: json or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (section key) For xlsx inputs, the section that the worksheet fills, for example
    /// 'infrastructure'.
    #[clap(long, value_parser)]
    pub section: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (day or boarding) The type of the training centre. Overrides the configuration and the
    /// inputs.
    #[clap(long, value_parser)]
    pub school_type: Option<String>,

    /// (directory) Where the drafts are stored.
    #[clap(long, value_parser)]
    pub draft_dir: Option<String>,

    /// The identifier of the survey instance, used to load and save its draft.
    #[clap(long, value_parser)]
    pub instance_id: Option<String>,

    /// If passed as an argument, the survey is submitted: it must be complete.
    #[clap(long, takes_value = false)]
    pub submit: bool,

    /// If passed as an argument, prints the rubric in JSON format and exits.
    #[clap(long, takes_value = false)]
    pub print_rubric: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
