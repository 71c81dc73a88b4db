use clap::Parser;
use colored::Colorize;

use cgen_cli::args::CliArgs;
use cgen_cli::driver;
use cgen_cli::tracing_config::init_tracing;

#[allow(clippy::print_stderr)]
fn main() {
    init_tracing();
    let args = CliArgs::parse();

    if let Err(err) = driver::run(&args) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
