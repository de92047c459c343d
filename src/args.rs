use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

#[derive(Parser)]
#[command(about = "Terminal meeting-room booking board", long_about = None)]
pub struct Cli {
    /// Day to open the board on (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Seed file, or a directory containing seed.json
    #[arg(short, long)]
    pub seed: Option<PathBuf>,

    /// Write logs to this file (the terminal itself belongs to the UI)
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,
}
