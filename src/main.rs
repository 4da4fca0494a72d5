mod copy;
mod manifest;
mod metadata;
mod order;
mod ordering;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ordering::OrderMode;
use std::path::PathBuf;

const DEFAULT_ORDER_FILE: &str = "./trackcopy-order.csv";

#[derive(Parser)]
#[command(
    name = "trackcopy",
    version,
    about = "Copies media files in a configurable, hand-editable order (scan -> edit list -> copy)"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan directories and write an editable order file
    Order {
        /// One or more directories to process.
        #[arg(required = true)]
        dirs: Vec<PathBuf>,

        /// Ordering type.
        #[arg(long = "type", short = 't', value_enum, default_value_t = OrderMode::Track)]
        mode: OrderMode,

        /// Output order file.
        #[arg(long, short = 'o', default_value = DEFAULT_ORDER_FILE)]
        output: PathBuf,

        /// Include only files with an mp3 extension.
        #[arg(long, short = 'm', default_value_t = false)]
        mp3: bool,
    },

    /// Copy the files listed in an order file into a target directory
    Copy {
        /// Target destination directory.
        target: PathBuf,

        /// Input order file.
        #[arg(long, short = 'i', default_value = DEFAULT_ORDER_FILE)]
        input: PathBuf,

        /// Replace spaces in destination paths with underscores.
        #[arg(long, short = 'c', default_value_t = false)]
        clean_spaces: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Order {
            dirs,
            mode,
            output,
            mp3,
        } => {
            order::run(
                &dirs,
                &order::OrderConfig {
                    mode,
                    audio_only: mp3,
                    order_file: output,
                },
            )?;
        }

        Commands::Copy {
            target,
            input,
            clean_spaces,
        } => {
            copy::run(&input, &target, &copy::CopyOptions { clean_spaces })?;
        }
    }

    Ok(())
}
