use super::drain;
use crate::{ConfigError, Lexer, Match, Mode, Rule};

#[test]
fn error_tokens_halt() -> anyhow::Result<()> {
    let lexer = Lexer::compile([
        Rule::regex("WS", r"\s+").discard(),
        Rule::regex("identifier", r"\w+"),
        Rule::catch_all("error"),
    ])?;

    let mut scanner = lexer.scan("hello there! more");
    assert!(!scanner.next_token()?.is_some_and(|t| t.is_error));
    assert!(!scanner.next_token()?.is_some_and(|t| t.is_error));
    assert!(scanner.next_token()?.is_some_and(|t| t.is_error));
    assert_eq!(scanner.next_token()?, None);
    assert!(scanner.is_done());

    Ok(())
}

#[test]
fn formatting_errors() -> anyhow::Result<()> {
    let lexer = Lexer::compile([
        Rule::regex("WS", r"\s+").discard(),
        Rule::regex("identifier", r"\w+").discard(),
        Rule::catch_all("error"),
    ])?;

    let mut scanner = lexer.scan("hello there!");
    let Some(err) = scanner.next_token()? else {
        anyhow::bail!("expected an error token");
    };

    assert!(err.is_error);
    assert_eq!(err.kind.as_ref(), "error");
    assert_eq!(err.text, "!");
    assert_eq!(
        scanner.format_error(&err),
        "Error: error at line 1 col 12:\n\nhello there!\n           ^"
    );

    Ok(())
}

#[test]
fn formatting_errors_on_later_lines() -> anyhow::Result<()> {
    let lexer = Lexer::compile([
        Rule::regex("WS", r"\s+").discard().count_line_breaks(),
        Rule::regex("identifier", r"\w+"),
        Rule::catch_all("unexpected"),
    ])?;

    let buffer = "first line\r\n  second ?? line\nthird";
    let tokens = drain(lexer.scan(buffer))?;
    let Some(err) = tokens.last() else {
        anyhow::bail!("expected tokens");
    };

    assert_eq!((err.text, err.line, err.col), ("?? ", 2, 10));
    assert_eq!(
        lexer.scan(buffer).format_error(err),
        "Error: unexpected at line 2 col 10:\n\n  second ?? line\n         ^"
    );

    Ok(())
}

#[test]
fn discarded_errors_end_the_stream() -> anyhow::Result<()> {
    let lexer = Lexer::compile([
        Rule::regex("word", r"\w+"),
        Rule::regex("junk", r"\W+").error().discard(),
    ])?;

    let tokens = drain(lexer.scan("ab!cd"))?;
    assert_eq!(tokens.iter().map(|t| t.text).collect::<Vec<_>>(), vec!["ab"]);

    Ok(())
}

#[test]
fn malformed_rules_are_rejected() {
    assert!(matches!(
        Lexer::compile([Rule::variants("nothing", Vec::<Match>::new())]),
        Err(ConfigError::MalformedRule { .. })
    ));

    assert!(matches!(
        Lexer::compile([Rule::new("nothing", Match::one_of(Vec::<Match>::new()))]),
        Err(ConfigError::MalformedRule { .. })
    ));

    assert!(matches!(
        Lexer::compile([Rule::regex("broken", "[a-")]),
        Err(ConfigError::InvalidPattern { .. })
    ));

    assert!(matches!(
        Lexer::compile(Vec::<Rule>::new()),
        Err(ConfigError::EmptyMode(_))
    ));
}

#[test]
fn unknown_modes_are_rejected() {
    let lexer = Lexer::compile_modes([Mode::new(
        "main",
        [Rule::literal("open", "(").push("parens")],
    )]);

    assert!(matches!(
        lexer,
        Err(ConfigError::UnknownMode { ref rule, ref mode }) if rule == "open" && mode == "parens"
    ));
}

#[test]
fn config_errors_read_well() {
    let Err(err) = Lexer::compile([Rule::literal("a", "a"), Rule::literal("a", "b")]) else {
        panic!("duplicate rules compiled");
    };

    assert_eq!(err.to_string(), "Rule `a` is declared twice in mode `main`");
}
