use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use log::error;

use pen::cli::run;
use pen::logger;
use pen::structs::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _handle = match logger::init(cli.loglevel, cli.logfile.as_deref()) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match run(&cli, &mut writer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
