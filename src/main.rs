use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use vistas2yolo::io::read_label_catalog;
use vistas2yolo::{process_dataset, Cli, Command, Config, ConvertError, Execution, ImageSizeReader};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ConvertError> {
    let config = Config::load(&cli.config)?;

    match cli.command.unwrap_or(Command::Convert) {
        Command::Convert => {
            let execution = if cli.parallel {
                Execution::Parallel
            } else {
                Execution::Sequential
            };

            info!("Starting the conversion process...");
            process_dataset(&config, &cli.manifest, &ImageSizeReader, execution)?;

            println!("Generated {} config.", cli.manifest.display());
            println!("--- DONE ---");
        }
        Command::ListLabels => {
            let labels = read_label_catalog(&config.label_catalog_path())?;
            println!("labels:");
            for (i, label) in labels.iter().enumerate() {
                println!("\t{}: {}", label.name, i);
            }
        }
    }

    Ok(())
}
