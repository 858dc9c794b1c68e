use treelox::interpreter::Interpreter;
use treelox::RunStatus;

// run code using a fresh interpreter and return the printed lines, the
// reported errors and the final status
fn run(code: &str) -> (Vec<String>, Vec<String>, RunStatus) {
    let mut interpreter: Interpreter<Vec<String>> = Interpreter::new(Vec::new());
    let mut reports: Vec<String> = Vec::new();
    let status = treelox::run(code, &mut interpreter, &mut reports);
    (interpreter.into_output(), reports, status)
}

#[test]
fn precedence_and_associativity() {
    let (output, reports, status) = run("print 2 + 3 * 4;\nprint (2 + 3) * 4;\nprint 10 - 2 - 3;");
    assert_eq!(output, vec!["14", "20", "5"]);
    assert!(reports.is_empty());
    assert_eq!(status.exit_code(), None);
}

#[test]
fn variable_scoping() {
    let code = "\
        var a = \"global a\";\n\
        var b = \"global b\";\n\
        var c = \"global c\";\n\
        {\n\
            var a = \"outer a\";\n\
            var b = \"outer b\";\n\
            {\n\
                var a = \"inner a\";\n\
                print a;\n\
                print b;\n\
                print c;\n\
            }\n\
            print a;\n\
            print b;\n\
            print c;\n\
        }\n\
        print a;\n\
        print b;\n\
        print c;";

    let (output, reports, _) = run(code);

    let expected = vec![
        "inner a", "outer b", "global c", "outer a", "outer b", "global c", "global a",
        "global b", "global c",
    ];
    assert_eq!(output, expected);
    assert!(reports.is_empty());
}

#[test]
fn block_shadowing_and_write_through() {
    let (output, _, _) = run("var a = 1; { var a = 2; } print a;");
    assert_eq!(output, vec!["1"]);
    let (output, _, _) = run("var a = 1; { a = 2; } print a;");
    assert_eq!(output, vec!["2"]);
}

#[test]
fn undefined_variable() {
    let (output, reports, status) = run("print b;");
    assert!(output.is_empty());
    assert_eq!(
        reports,
        vec!["[line 1] Error at 'b': Undefined variable 'b'."]
    );
    assert!(status.had_runtime_error);
    assert!(!status.had_error);
    assert_eq!(status.exit_code(), Some(70));
}

#[test]
fn operand_type_errors() {
    let (_, reports, status) = run("\"a\" - 1;");
    assert_eq!(
        reports,
        vec!["[line 1] Error at '-': Operands must be numbers."]
    );
    assert!(status.had_runtime_error);

    let (_, reports, _) = run("\"a\" + 1;");
    assert_eq!(
        reports,
        vec!["[line 1] Error at '+': Operands must be two numbers or two strings."]
    );
}

#[test]
fn parse_error_does_not_block_later_statements() {
    let (output, reports, status) = run("print 1 +;\nprint \"still here\";");
    assert_eq!(reports, vec!["[line 1] Error at ';': Expect expression."]);
    assert_eq!(output, vec!["still here"]);
    assert!(status.had_error);
    assert!(!status.had_runtime_error);
    assert_eq!(status.exit_code(), Some(65));
}

#[test]
fn runtime_error_stops_the_run() {
    let (output, reports, _) = run("print \"before\";\nprint -true;\nprint \"after\";");
    assert_eq!(output, vec!["before"]);
    assert_eq!(
        reports,
        vec!["[line 2] Error at '-': Operand must be a number."]
    );
}

#[test]
fn prompt_session_keeps_state() {
    let mut interpreter: Interpreter<Vec<String>> = Interpreter::new(Vec::new());
    let mut reports: Vec<String> = Vec::new();
    let lines = ["var count = 1;", "print missing;", "count = count + 1;", "print count;"];
    let statuses: Vec<RunStatus> = lines
        .iter()
        .map(|line| treelox::run(line, &mut interpreter, &mut reports))
        .collect();
    assert!(statuses[1].had_runtime_error);
    assert!(!statuses[3].had_runtime_error);
    assert_eq!(interpreter.output(), &vec!["2".to_string()]);
    assert_eq!(reports.len(), 1);
}

#[test]
fn comments_and_multiline_strings() {
    let (output, reports, _) = run("// leading comment\nprint \"a\nb\"; // trailing\nprint nil;");
    assert_eq!(output, vec!["a\nb", "nil"]);
    assert!(reports.is_empty());
}

#[test]
fn unterminated_string_is_a_syntax_error() {
    let (output, reports, status) = run("print \"ok\";\nprint \"oops;");
    assert_eq!(output, vec!["ok"]);
    assert_eq!(
        reports,
        vec![
            "[line 2] Error: Unterminated string.",
            "[line 2] Error at end: Expect expression."
        ]
    );
    assert!(status.had_error);
}

#[test]
fn deep_nesting_is_reported_not_fatal() {
    let code = format!("print {}1;\nprint \"after\";", "-".repeat(200_000));
    let (output, reports, status) = run(&code);
    assert_eq!(output, vec!["after"]);
    assert_eq!(reports, vec!["[line 1] Error at '-': Too much nesting."]);
    assert_eq!(status.exit_code(), Some(65));
}

#[test]
fn nesting_within_the_limit_runs() {
    let code = format!(
        "var a = 1; {} a = a + 1; {} print {}a{};",
        "{".repeat(100),
        "}".repeat(100),
        "(".repeat(100),
        ")".repeat(100)
    );
    let (output, reports, _) = run(&code);
    assert!(reports.is_empty());
    assert_eq!(output, vec!["2"]);
}
