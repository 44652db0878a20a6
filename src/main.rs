use clap::Parser;
use tracing_subscriber::EnvFilter;

use workbook_to_json::cli::{self, Args};
use workbook_to_json::console::Console;
use workbook_to_json::convert;

fn main() {
    init_tracing();
    let console = Console::detect();

    // Skipping the program's name (always the first argument)
    if std::env::args_os().len() <= 1 {
        println!("{}", cli::NOTHING_TO_PROCESS);
        return;
    }

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = cli::parse_error_exit_code(&e);
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if args.workbooks.is_empty() {
        println!("{}", cli::NOTHING_TO_PROCESS);
        println!("{}", cli::usage());
        return;
    }

    let config = args.to_config();
    match convert::run(&args.workbooks, &config, |event| console.progress(&event)) {
        Ok(summary) => {
            tracing::debug!(
                workbooks = summary.workbooks,
                worksheets = summary.worksheets,
                files = summary.files.len(),
                "run finished"
            );
            console.print_success("Completed all workbook to JSON conversions");
        }
        Err(e) => {
            console.print_error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
