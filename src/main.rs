use clap::Parser;
use log::{debug, error, info};
use std::process::ExitCode;

use yolo2kitti::{convert_dataset, Args};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    debug!("{:?}", args);

    info!("Starting the conversion process...");

    match convert_dataset(&args) {
        Ok(stats) => {
            println!("{} files converted!", stats.successful_conversions);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Conversion aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
