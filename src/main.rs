use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tabula::{Document, DriverConfig, OutputEngine, OutputError, OutputFormat};

/// Renders a JSON document to delimited text, JSON pages or an archive log.
#[derive(Parser, Debug)]
#[command(name = "tabula", version, about)]
struct Args {
    /// Input document (JSON).
    input: PathBuf,

    /// Output files; the format follows the extension unless --format is given.
    #[arg(short, long = "output", required = true)]
    outputs: Vec<PathBuf>,

    /// Output format for every output.
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Driver option as key=value; may be repeated.
    #[arg(short = 'O', long = "option")]
    options: Vec<String>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Format {
    Csv,
    Tsv,
    Pages,
    Archive,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Tsv => OutputFormat::Tsv,
            Format::Pages => OutputFormat::Pages,
            Format::Archive => OutputFormat::Archive,
        }
    }
}

fn main() -> Result<(), OutputError> {
    env_logger::init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.input)?;
    let document = Document::from_json(&text)?;
    let items = document.to_items()?;

    let configs = args
        .outputs
        .iter()
        .map(|path| DriverConfig::new(path, args.format.map(Into::into), &args.options))
        .collect::<Result<Vec<_>, _>>()?;
    let mut engine = OutputEngine::from_configs(&configs);
    if engine.driver_count() == 0 {
        return Err(OutputError::Config("no output could be opened".to_string()));
    }

    log::info!("writing {} items to {} outputs", items.len(), engine.driver_count());
    for item in items {
        engine.submit_shared(item);
    }
    engine.finish()
}
