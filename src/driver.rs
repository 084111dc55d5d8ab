use crate::ast_printer;
use crate::parser;
use crate::scanner;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    Tokens,
    Ast,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    Lexical(Vec<scanner::ScannerError>),
    Parse(Vec<parser::ParserError>),
}

/// Runs `source` through the front end and renders the result for `mode`.
///
/// Lexical errors are all reported and stop the pipeline before parsing.
pub fn run(source: &str, mode: Mode) -> Result<String, Error> {
    let scanned = scanner::scan_tokens(source);

    if !scanned.errors.is_empty() {
        return Err(Error::Lexical(scanned.errors));
    }

    match mode {
        Mode::Tokens => Ok(scanned
            .tokens
            .iter()
            .map(|tok| format!("{}\n", tok))
            .collect()),
        Mode::Ast => {
            let parsed = parser::parse(&scanned.tokens);

            match parsed.expr {
                Some(expr) if parsed.errors.is_empty() => Ok(ast_printer::print(&expr)),
                _ => Err(Error::Parse(parsed.errors)),
            }
        }
    }
}
