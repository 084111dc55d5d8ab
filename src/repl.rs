use crate::driver;
use crate::error_formatting;
use crate::input;

use rustyline::error::ReadlineError;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const HISTORY_FILE: &str = ".lox-history.txt";
const PROMPT: &str = "> ";

/// Interactive prompt. Every line is scanned and parsed on its own, so an
/// error on one line never affects the next.
pub fn run(mode: driver::Mode) {
    println!(
        "==========================================\n\
         Welcome to lox {}! Ctrl-D exits.\n\
         ==========================================\n",
        VERSION
    );

    let mut rl = rustyline::Editor::<()>::new();
    rl.load_history(HISTORY_FILE).ok();

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(_) => break,
        };

        if line.trim().is_empty() {
            continue;
        }
        rl.add_history_entry(line.as_str());

        let input = input::Input {
            source: input::Source::Interactive,
            content: line,
        };

        match driver::run(&input.content, mode) {
            Ok(output) => print!("{}", output),
            Err(err) => error_formatting::format_error(&err, &input),
        }
    }

    rl.save_history(HISTORY_FILE).ok();
}
