mod app;
mod cli;
mod commands;
mod config;
mod controller;
mod deck;
mod input;
mod logging;
mod navigator;
mod theme;
mod toc;
mod view;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.verbose, cli.quiet, cli.no_color);

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", colored::Colorize::red("Error:"));
        std::process::exit(1);
    }
}
