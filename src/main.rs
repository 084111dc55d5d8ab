extern crate clap;

use clap::{App, Arg, ErrorKind};

use std::fs;

mod ast_printer;
mod driver;
mod error_formatting;
mod expr;
mod input;
mod parser;
mod repl;
mod scanner;

static INPUT_STR: &str = "INPUT";
static SHOW_TOKENS_STR: &str = "tokens";

// sysexits.h
const EX_USAGE: i32 = 64;
const EX_DATAERR: i32 = 65;
const EX_NOINPUT: i32 = 66;

fn main() {
    let app = App::new("lox")
        .version(env!("CARGO_PKG_VERSION"))
        .about("lox language front end: scanner, parser and AST printer")
        .author(env!("CARGO_PKG_AUTHORS"))
        .arg(
            Arg::with_name(INPUT_STR)
                .help("script to run; starts an interactive prompt when omitted")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::with_name(SHOW_TOKENS_STR)
                .long("show-tokens")
                .takes_value(false)
                .help("print the token stream instead of the AST"),
        );

    let matches = match app.get_matches_safe() {
        Ok(matches) => matches,
        Err(err) => match err.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => err.exit(),
            _ => {
                eprintln!("{}", err.message);
                std::process::exit(EX_USAGE);
            }
        },
    };

    let mode = if matches.is_present(SHOW_TOKENS_STR) {
        driver::Mode::Tokens
    } else {
        driver::Mode::Ast
    };

    match matches.value_of(INPUT_STR) {
        Some(input_file) => run_file(input_file, mode),
        None => repl::run(mode),
    }
}

fn run_file(input_file: &str, mode: driver::Mode) {
    let content = match fs::read_to_string(input_file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading {}: {}", input_file, err);
            std::process::exit(EX_NOINPUT);
        }
    };

    let input = input::Input {
        source: input::Source::File(input_file.into()),
        content,
    };

    match driver::run(&input.content, mode) {
        Ok(output) => print!("{}", output),
        Err(err) => {
            error_formatting::format_error(&err, &input);
            std::process::exit(EX_DATAERR);
        }
    }
}
