use colored::Colorize;

use nwb_sanity_check::analysis::CommandPlotter;
use nwb_sanity_check::batch::run_batch;
use nwb_sanity_check::config::load_config;

fn report_error(err: &dyn std::error::Error) {
    eprintln!("{} {}", "error:".red().bold(), err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let config_path = args.get(1).map(String::as_str).unwrap_or("config.yml");

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            report_error(&err);
            std::process::exit(1);
        }
    };

    let plotter = CommandPlotter::new(config.analysis);
    match run_batch(&config.batch, &plotter) {
        Ok(report) => {
            println!(
                "{} {} processed, {} already complete",
                "done:".green().bold(),
                report.processed,
                report.skipped
            );
        }
        Err(err) => {
            report_error(&err);
            std::process::exit(1);
        }
    }
}
