pub mod ast;
pub mod environment;
pub mod interpreter;
pub mod parser;
pub mod report;
pub mod scanner;
pub mod token;
pub mod value;

use crate::interpreter::Interpreter;
use crate::report::{Output, Reporter};
use log::debug;

/// Exit code for bad command-line usage.
pub const EXIT_USAGE: i32 = 64;
/// Exit code for a script that could not be read.
pub const EXIT_NO_INPUT: i32 = 66;
/// Exit code for a script with syntax errors.
pub const EXIT_SYNTAX_ERROR: i32 = 65;
/// Exit code for a script that failed at runtime.
pub const EXIT_RUNTIME_ERROR: i32 = 70;

/// What went wrong during one call to `run`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatus {
    pub had_error: bool,
    pub had_runtime_error: bool,
}

impl RunStatus {
    pub fn exit_code(&self) -> Option<i32> {
        if self.had_error {
            Some(EXIT_SYNTAX_ERROR)
        } else if self.had_runtime_error {
            Some(EXIT_RUNTIME_ERROR)
        } else {
            None
        }
    }
}

/// Scans, parses and runs `source`. Every syntax error is reported; the
/// statements that did parse are still executed, up to the first runtime
/// error, which is reported as well.
pub fn run<O: Output>(
    source: &str,
    interpreter: &mut Interpreter<O>,
    reporter: &mut dyn Reporter,
) -> RunStatus {
    let mut status = RunStatus::default();

    let (tokens, scan_errors) = scanner::scan_tokens(source);
    for e in &scan_errors {
        reporter.report(e.line, "", &e.message);
    }
    let (statements, parse_errors) = parser::parse(&tokens);
    for e in &parse_errors {
        reporter.report(e.line, &e.location, &e.message);
    }
    status.had_error = !scan_errors.is_empty() || !parse_errors.is_empty();

    if let Err(e) = interpreter.interpret(&statements) {
        reporter.report(e.line(), &e.location(), &e.to_string());
        status.had_runtime_error = true;
    }
    debug!("run finished: {:?}", status);
    status
}
