use clap::Parser;
use klinebt::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
