//! CLI driver for `campaign-fields`.
//!
//! Wires flags to the library pipeline: schema load, selection, dataset load,
//! projection, output. Data goes to stdout (or `--output`); skip diagnostics
//! and the run summary go to stderr.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use campaign_fields::error::ProjectResult;
use campaign_fields::loader::{self, InputFormat};
use campaign_fields::output::{CsvWriter, JsonWriter, RecordWriter};
use campaign_fields::pipeline::{self, RunSummary};
use campaign_fields::report::StdErrObserver;
use campaign_fields::schema::{self, campaign_schema};
use campaign_fields::select::SelectionPlan;
use campaign_fields::types::Record;

#[derive(Debug, Parser)]
#[command(
    name = "campaign-fields",
    version,
    about = "Project selected fields out of a tabular campaign dataset"
)]
struct Cli {
    /// Comma-separated field names to output, in order (e.g. date,campaign,clicks).
    #[arg(long, value_name = "LIST")]
    fields: String,

    /// Input dataset path; '-' reads from stdin.
    #[arg(long, value_name = "PATH")]
    input: PathBuf,

    /// Input format; inferred from the file extension when omitted.
    /// Required when reading from stdin.
    #[arg(long, value_enum, value_name = "FORMAT")]
    input_format: Option<InputFormatArg>,

    /// Output format.
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = OutputFormatArg::Json)]
    format: OutputFormatArg,

    /// Output path; stdout when omitted.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// JSON schema definition file overriding the built-in campaign schema.
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormatArg {
    Csv,
    Json,
}

impl From<InputFormatArg> for InputFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Csv => InputFormat::Csv,
            InputFormatArg::Json => InputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormatArg {
    Json,
    Csv,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match execute(cli) {
        // Per-record skips are reported but do not fail the invocation.
        Ok(_summary) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> ProjectResult<RunSummary> {
    // Schema, then selection: both fail before any dataset I/O begins.
    let schema = match &cli.schema {
        Some(path) => schema::schema_from_path(path)?,
        None => campaign_schema(),
    };
    schema::validate(&schema)?;

    let plan = SelectionPlan::parse(&cli.fields, &schema)?;

    let records = load_records(&cli)?;

    let sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer: Box<dyn RecordWriter> = match cli.format {
        OutputFormatArg::Json => Box::new(JsonWriter::new(sink)),
        OutputFormatArg::Csv => Box::new(CsvWriter::new(sink)),
    };

    pipeline::run(records, &plan, writer.as_mut(), Some(&StdErrObserver))
}

fn load_records(cli: &Cli) -> ProjectResult<Vec<Record>> {
    if cli.input.as_os_str() == "-" {
        let format = cli.input_format.ok_or_else(|| {
            campaign_fields::ProjectError::InvalidInput {
                message: "--input-format is required when reading from stdin".to_string(),
            }
        })?;
        return match InputFormat::from(format) {
            InputFormat::Csv => {
                let mut rdr = csv::ReaderBuilder::new()
                    .has_headers(true)
                    .from_reader(io::stdin().lock());
                loader::load_csv_from_reader(&mut rdr)
            }
            InputFormat::Json => {
                let mut text = String::new();
                io::stdin().lock().read_to_string(&mut text)?;
                loader::load_json_from_str(&text)
            }
        };
    }

    loader::load_from_path(&cli.input, cli.input_format.map(InputFormat::from))
}
