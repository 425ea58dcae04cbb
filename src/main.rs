//! xlsxcolumn command-line front end
//!
//! Loads a spreadsheet, lists its columns, extracts one column and writes the
//! requested exports.
//!
//! ```text
//! xlsxcolumn people.xlsx --list-columns
//! xlsxcolumn people.xlsx --column Age --format txt --format pdf --output-dir out
//! ```

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use log::info;
use xlsxcolumn::{
    DateFormat, ErrorCategory, ExportFormat, ExtractorBuilder, PageLayout, Session,
    XlsxColumnError,
};

#[derive(Parser, Debug)]
#[command(name = "xlsxcolumn")]
#[command(version, about = "Extract one column from a spreadsheet as text or PDF")]
struct Cli {
    /// Spreadsheet to load (first sheet only)
    file: PathBuf,

    /// Header name of the column to extract
    #[arg(long, short = 'c')]
    column: Option<String>,

    /// Print the header row and exit
    #[arg(long)]
    list_columns: bool,

    /// Export format; repeat to write both
    #[arg(long, short = 'f', value_enum)]
    format: Vec<FormatArg>,

    /// Directory for extracted_data.txt / extracted_data.pdf
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// JSON file with PDF page layout overrides
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Date cells: "serial", "iso8601" or a strftime-style format
    #[arg(long, default_value = "serial")]
    date_format: String,

    /// Accepted file name suffix (case-sensitive)
    #[arg(long, default_value = ".xlsx")]
    extension: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FormatArg {
    Txt,
    Pdf,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => ExportFormat::Text,
            FormatArg::Pdf => ExportFormat::Pdf,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        handle_error(e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), XlsxColumnError> {
    let date_format = match cli.date_format.as_str() {
        "serial" => DateFormat::Serial,
        "iso8601" => DateFormat::Iso8601,
        custom => DateFormat::Custom(custom.to_string()),
    };

    let layout = match &cli.layout {
        Some(path) => PageLayout::from_json(&std::fs::read_to_string(path)?)?,
        None => PageLayout::default(),
    };

    let extractor = ExtractorBuilder::new()
        .with_date_format(date_format)
        .with_accepted_extension(cli.extension.as_str())
        .with_page_layout(layout)
        .build()?;

    let mut session = Session::new(extractor);
    session.load_path(&cli.file).await?;

    if cli.list_columns || cli.column.is_none() {
        for (index, header) in session.headers().iter().enumerate() {
            println!("{}\t{}", index, header);
        }
        return Ok(());
    }

    let column = cli.column.as_deref().unwrap_or_default();
    session.select_column(column);
    session.extract()?;

    for row in session.display_rows() {
        println!("{}", row);
    }

    for format in &cli.format {
        let artifact = session.export((*format).into())?;
        let path = write_artifact(&cli.output_dir, artifact.file_name, &artifact.bytes)?;
        info!("wrote {} ({} bytes)", path.display(), artifact.bytes.len());
        eprintln!("Saved {}", path.display());
    }

    Ok(())
}

fn write_artifact(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, XlsxColumnError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

fn handle_error(error: XlsxColumnError) {
    eprintln!("{}", error.user_message());

    match error.category() {
        ErrorCategory::InputValidation | ErrorCategory::EmptyResult => {
            eprintln!("  {}", error);
        }
        ErrorCategory::Format => {
            eprintln!("  {}", error);
            eprintln!("  The file may not be a valid spreadsheet or may be corrupted.");
        }
        ErrorCategory::Internal => {
            eprintln!("  {}", error);
            eprintln!("  Please check the --layout and --date-format options.");
        }
    }
}
