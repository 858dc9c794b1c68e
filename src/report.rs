/// Receives every syntax and runtime fault as it is found.
pub trait Reporter {
    fn report(&mut self, line: usize, location: &str, message: &str);
}

/// Receives the lines produced by `print`.
pub trait Output {
    fn emit(&mut self, line: &str);
}

pub fn format_report(line: usize, location: &str, message: &str) -> String {
    format!("[line {}] Error{}: {}", line, location, message)
}

pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn report(&mut self, line: usize, location: &str, message: &str) {
        eprintln!("{}", format_report(line, location, message));
    }
}

pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn emit(&mut self, line: &str) {
        println!("{}", line);
    }
}

impl Reporter for Vec<String> {
    fn report(&mut self, line: usize, location: &str, message: &str) {
        self.push(format_report(line, location, message));
    }
}

impl Output for Vec<String> {
    fn emit(&mut self, line: &str) {
        self.push(line.to_string());
    }
}
