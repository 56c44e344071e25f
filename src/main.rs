use clap::Parser;
use read_table::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    match commands::run(args) {
        Ok(stats) if stats.is_successful() => process::exit(0),
        Ok(_stats) => {
            // the terminal state has already been reported on stderr
            process::exit(1);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
