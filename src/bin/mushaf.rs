use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use env_logger::Builder;
use log::{error, LevelFilter};

use mushaf::address::parse_range;
use mushaf::config::MushafConfig;
use mushaf::{walk, Mushaf, Record, Result, Source, WalkOptions};

/// Retrieve Quranic text by index range.
#[derive(Debug, Parser)]
#[command(
    name = "mushaf",
    about = "Retrieve Quranic text",
    after_help = "Ya Kabikaj, protect this code from bugs!"
)]
#[command(group(ArgGroup::new("script").args(["no_lat", "no_ara"])))]
#[command(group(ArgGroup::new("layer").args(["no_graph", "no_arch"])))]
struct Cli {
    /// Quranic index range to retrieve [default: whole text].
    /// Format: ini_sura:ini_verse:ini_word:ini_block-end_sura:end_verse:end_word:end_block;
    /// both bounds are inclusive and all fields are optional.
    index: Option<String>,

    /// Quran encoding
    #[arg(short, long, value_parser = Source::from_str)]
    source: Option<Source>,

    /// Retrieve text as letterblocks instead of words
    #[arg(long)]
    blocks: bool,

    /// Omit Latin transliteration in output
    #[arg(long)]
    no_lat: bool,

    /// Omit Arabic script in output
    #[arg(long)]
    no_ara: bool,

    /// Omit graphemic representations in output
    #[arg(long)]
    no_graph: bool,

    /// Omit archigraphemic representations in output
    #[arg(long)]
    no_arch: bool,

    /// Field separator for text output
    #[arg(long)]
    sep: Option<String>,

    /// Print output in json instead of plain text
    #[arg(long)]
    json: bool,

    /// Write output to file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Configuration file with corpus paths and output defaults
    #[arg(long, default_value = "mushaf.ini")]
    config: PathBuf,
}

fn main() -> ExitCode {
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        // A closed pipe downstream is a normal way for a consumer to stop.
        Err(mushaf::Error::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("mushaf: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = if cli.config.exists() {
        MushafConfig::from_ini(&cli.config)?
    } else {
        MushafConfig::default()
    };

    let store = Mushaf::load(&config.files.simple_path, &config.files.uthmani_path)?;

    let (ini, end) = parse_range(cli.index.as_deref().unwrap_or(""))?;
    let options = WalkOptions {
        source: cli.source.unwrap_or(config.output.source),
        blocks: cli.blocks || config.output.blocks,
    };

    let records = walk(&store, &ini, &end, &options)?.collect::<Result<Vec<Record>>>()?;

    let mut out: BufWriter<Box<dyn Write>> = BufWriter::new(match &cli.out {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    });

    let sep = cli.sep.as_deref().unwrap_or(&config.output.separator);

    if cli.json {
        let data: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "tok": fields_of(r, cli),
                    "ind": r.index.to_string(),
                })
            })
            .collect();
        serde_json::to_writer(&mut out, &data)?;
        writeln!(out)?;
    } else {
        for record in &records {
            let mut line = fields_of(record, cli);
            line.push(record.index.to_string());
            writeln!(out, "{}", line.join(sep))?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Representation columns selected by the output flags, in the fixed
/// grapheme-before-archigrapheme, Arabic-before-Latin order.
fn fields_of(record: &Record, cli: &Cli) -> Vec<String> {
    let mut fields = Vec::with_capacity(4);
    if !cli.no_graph {
        if !cli.no_ara {
            fields.push(record.grapheme_ar.clone());
        }
        if !cli.no_lat {
            fields.push(record.grapheme_lt.clone());
        }
    }
    if !cli.no_arch {
        if !cli.no_ara {
            fields.push(record.archigrapheme_ar.clone());
        }
        if !cli.no_lat {
            fields.push(record.archigrapheme_lt.clone());
        }
    }
    fields
}
