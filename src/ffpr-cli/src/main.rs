mod commands;
mod file_io;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ffpr::SaveFormat;

#[derive(Parser)]
#[command(name = "ffpr")]
#[command(about = "Final Fantasy VI Pixel Remaster save editor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Steam save (base64 + cipher + deflate)
    Pc,
    /// Console export (plain JSON)
    Console,
}

impl From<FormatArg> for SaveFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Pc => SaveFormat::Pc,
            FormatArg::Console => SaveFormat::Console,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a save to plain JSON (uses stdin/stdout if paths not specified)
    Decode {
        /// Path to the save file (uses stdin if not specified)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Path to the output JSON file (uses stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save flavor to decode
        #[arg(short, long, value_enum, default_value = "pc")]
        format: FormatArg,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Encode plain JSON back into a save (uses stdin/stdout if paths not specified)
    Encode {
        /// Path to the JSON file (uses stdin if not specified)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Path to the output save file (uses stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save flavor to produce
        #[arg(short, long, value_enum, default_value = "pc")]
        format: FormatArg,
    },

    /// Show a summary of a save file
    Inspect {
        /// Path to the save file
        input: PathBuf,

        /// Save flavor to decode
        #[arg(short, long, value_enum, default_value = "pc")]
        format: FormatArg,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            input,
            output,
            format,
            pretty,
        } => commands::decode(input.as_deref(), output.as_deref(), format.into(), pretty),

        Commands::Encode {
            input,
            output,
            format,
        } => commands::encode(input.as_deref(), output.as_deref(), format.into()),

        Commands::Inspect { input, format } => commands::inspect(&input, format.into()),
    }
}
