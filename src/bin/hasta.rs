//! hasta CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use hasta::cli::args::*;
use hasta::cli::commands::*;
use hasta::error::HastaError;

#[tokio::main]
async fn main() {
    // Parse command line arguments using clap
    let args = HastaArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args).await {
        eprintln!("Error: {e}");
        process::exit(exit_code(&e));
    }
}

/// Invalid input exits with 2, engine and I/O failures with 1.
fn exit_code(error: &HastaError) -> i32 {
    if error.is_validation() { 2 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(&HastaError::invalid_row("row 0 has no columns")), 2);
        assert_eq!(exit_code(&HastaError::unknown_filter_kind("synonym")), 2);
        assert_eq!(exit_code(&HastaError::backend(503, "unavailable")), 1);
        assert_eq!(exit_code(&HastaError::config("no url")), 1);
    }
}
