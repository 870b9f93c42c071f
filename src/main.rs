use clap::Parser;
use colored::Colorize;
use panorama_config_gen::cli::Cli;
use panorama_config_gen::logging::init_logging;
use panorama_config_gen::output::print_summary;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli.log_config, cli.verbose) {
        eprintln!("Error initializing log4rs: {e}");
    }
    //
    log::info!("#Start main()");

    let result =
        panorama_config_gen::run(&cli).and_then(|summary| print_summary(&summary, cli.json));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Generation failed: {e}");
            eprintln!("{} {e}", "ERROR".on_red());
            ExitCode::FAILURE
        }
    }
}
