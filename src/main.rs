use clap::{Arg, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::debug;

use reflow::output::Mode;
use reflow::{diagnostics, input, output};

fn main() {
    diagnostics::install();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("reflow")
        .version(diagnostics::VERSION)
        .propagate_version(true)
        .about("Reformat serialized tree dumps for human consumption.")
        .disable_help_subcommand(true)
        .subcommand(
            Command::new("wrap")
                .about("Reflow the given dump by breaking at whitespace")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the dump text to reflow, or - to read it from standard input."),
                ),
        )
        .subcommand(
            Command::new("pretty")
                .about("Reflow the given dump with indentation derived from its structure markers")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the dump text to reflow, or - to read it from standard input."),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("wrap", submatches)) => {
            run(submatches, Mode::Simple);
        }
        Some(("pretty", submatches)) => {
            run(submatches, Mode::Pretty);
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: reflow [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn run(submatches: &ArgMatches, mode: Mode) {
    let filename = submatches
        .get_one::<String>("filename")
        .expect("filename is a required argument");
    let filename = Path::new(filename);

    // Record what we are working on, for the crash report should one
    // be needed.
    diagnostics::set_request(
        &filename
            .display()
            .to_string(),
    );

    let content = match input::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!(
                "{}: {}: {}",
                "error".bright_red(),
                error
                    .filename
                    .display(),
                error
            );
            std::process::exit(1);
        }
    };
    debug!("Loaded {} characters", content.len());

    // A dump is a single flat line; a trailing line break from the file
    // is an artifact of saving it, not part of the dump.
    let dump = content.trim_end_matches('\n');

    output::write_console(dump, mode);
    diagnostics::clear_request();
}
