use crate::driver;
use crate::input;
use crate::parser;
use crate::scanner;

use colored::*;

fn format_input(input: &input::Input, line: usize) {
    eprintln!("in {}, at line {}:", input.name(), line);
    if let Some(source_line) = input.line(line) {
        eprintln!("{} {}", format!("{:>4} |", line).blue().bold(), source_line);
    }
}

pub fn format_lexical_error(err: &scanner::ScannerError, input: &input::Input) {
    eprintln!(
        "lox: {}: {}",
        "lexical error".red().bold(),
        err.to_string().white().bold(),
    );

    format_input(input, err.line);
}

pub fn format_parse_error(err: &parser::ParserError, input: &input::Input) {
    eprintln!(
        "lox: {}: {}",
        "parse error".red().bold(),
        err.to_string().white().bold(),
    );

    format_input(input, err.token.line);
}

pub fn format_error(err: &driver::Error, input: &input::Input) {
    match err {
        driver::Error::Lexical(errors) => {
            for err in errors {
                format_lexical_error(err, input)
            }
        }
        driver::Error::Parse(errors) => {
            for err in errors {
                format_parse_error(err, input)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser;
    use crate::scanner;

    fn first_parse_error(code: &str) -> parser::ParserError {
        let tokens = scanner::scan_tokens(code).tokens;
        match parser::parse(&tokens).errors.into_iter().next() {
            Some(err) => err,
            None => panic!("expected a parse error for {}", code),
        }
    }

    #[test]
    fn test_lexical_error_display() {
        let errors = scanner::scan_tokens("\n\n/* never closed").errors;

        assert_eq!(
            errors[0].to_string(),
            "[line 3] Error: Unclosed block comment"
        );
    }

    #[test]
    fn test_parse_error_display_at_token() {
        assert_eq!(
            first_parse_error("1 * )").to_string(),
            "[line 1] Error at ')': Expect expression"
        );
    }

    #[test]
    fn test_parse_error_display_at_end() {
        assert_eq!(
            first_parse_error("(1 + 2").to_string(),
            "[line 1] Error at end: Expect ')' after expression"
        );
    }
}
