use clap::{App, Arg, ArgMatches, ErrorKind};
use log::debug;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;
use treelox::ast::AstPrinter;
use treelox::interpreter::Interpreter;
use treelox::report::{StderrReporter, StdoutOutput};
use treelox::{parser, run, scanner, EXIT_NO_INPUT, EXIT_SYNTAX_ERROR, EXIT_USAGE};

fn main() {
    env_logger::init();

    let matches = parse_args(std::env::args()).unwrap_or_else(|e| match e.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
        _ => {
            eprintln!("{}", e.message);
            process::exit(EXIT_USAGE);
        }
    });

    let ast = matches.is_present("ast");
    match matches.value_of("script") {
        Some(file) => {
            if let Some(code) = run_file(file, ast) {
                process::exit(code);
            }
        }
        None => run_prompt(ast),
    }
}

fn parse_args<I>(args: I) -> Result<ArgMatches<'static>, clap::Error>
where
    I: IntoIterator<Item = String>,
{
    App::new("treelox")
        .about("Tree-walking interpreter for a small scripting language")
        .arg(
            Arg::with_name("ast")
                .long("ast")
                .help("Print the parsed program instead of running it"),
        )
        .arg(
            Arg::with_name("script")
                .help("Script to run; starts a prompt when omitted")
                .index(1),
        )
        .get_matches_from_safe(args)
}

// Returns the exit code the process should end with, if any.
fn run_file(file: &str, ast: bool) -> Option<i32> {
    let contents = match fs::read_to_string(file) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Could not read '{}': {}", file, e);
            return Some(EXIT_NO_INPUT);
        }
    };
    if ast {
        return if print_ast(&contents) {
            None
        } else {
            Some(EXIT_SYNTAX_ERROR)
        };
    }
    let mut interpreter = Interpreter::new(StdoutOutput);
    run(&contents, &mut interpreter, &mut StderrReporter).exit_code()
}

fn run_prompt(ast: bool) {
    let mut interpreter = Interpreter::new(StdoutOutput);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => return,
        };
        if ast {
            print_ast(&line);
        } else {
            let status = run(&line, &mut interpreter, &mut StderrReporter);
            debug!("prompt line finished: {:?}", status);
        }
    }
}

/// The parsed program in prefix form, one statement per line, followed by
/// any syntax errors.
fn render_ast(source: &str) -> (Vec<String>, Vec<String>) {
    let (tokens, scan_errors) = scanner::scan_tokens(source);
    let (statements, parse_errors) = parser::parse(&tokens);
    let printer = AstPrinter {};
    let lines = statements
        .iter()
        .map(|stmt| printer.print_statement(stmt))
        .collect();
    let errors = scan_errors
        .iter()
        .map(|e| e.to_string())
        .chain(parse_errors.iter().map(|e| e.to_string()))
        .collect();
    (lines, errors)
}

// Returns false when the source had syntax errors.
fn print_ast(source: &str) -> bool {
    let (lines, errors) = render_ast(source);
    for e in &errors {
        eprintln!("{}", e);
    }
    for line in &lines {
        println!("{}", line);
    }
    errors.is_empty()
}
