// Integration tests for the line recognizer

use rbflow::parser::lexer::LexError;
use rbflow::parser::parse::{Parser, SyntaxError};
use rbflow::parser::token::{SourceLocation, TokenKind, RESERVED_WORDS};
use rbflow::{check, parse, parse_tokens, tokenize, Diagnostic};

fn syntax_error(line: &str) -> SyntaxError {
    match parse(line).unwrap_err().pop() {
        Some(Diagnostic::Syntax(err)) => err,
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_keywords_never_lex_as_identifiers() {
    for (word, kind) in RESERVED_WORDS {
        let lexed = tokenize(word);
        assert_eq!(lexed.kinds(), vec![kind], "lexing {word}");

        match word {
            "puts" | "print" => assert_eq!(kind, TokenKind::Identifier),
            _ => assert_ne!(kind, TokenKind::Identifier),
        }
    }
}

#[test]
fn test_escaped_quote_in_string() {
    let lexed = tokenize(r#""a\"b""#);
    assert_eq!(lexed.kinds(), vec![TokenKind::String]);
    assert_eq!(lexed.tokens[0].lexeme, "a\"b");
}

#[test]
fn test_maximal_munch_boundary() {
    let lexed = tokenize("123abc");
    assert_eq!(lexed.kinds(), vec![TokenKind::Number, TokenKind::Identifier]);
    assert_eq!(lexed.tokens[0].lexeme, "123");
    assert_eq!(lexed.tokens[1].lexeme, "abc");
}

#[test]
fn test_if_accepts_and_missing_end_fails_at_eof() {
    assert_eq!(parse("if (1 > 2) { puts (3) } end"), Ok(()));

    assert!(syntax_error("if (1 > 2) { puts (3) }").at_eof());
}

#[test]
fn test_for_range_optional_do() {
    assert_eq!(parse("for i in range (25) do {puts (1)} end"), Ok(()));
    assert_eq!(parse("for i in range (25) {puts (1)} end"), Ok(()));
}

#[test]
fn test_while_and_begin_while() {
    assert!(parse("while (1 < 2) { puts(1) }").is_err());
    assert_eq!(parse("while (1 < 2) { puts(1) } end"), Ok(()));
    assert_eq!(parse("begin { puts(1) } end while (1<2)"), Ok(()));
}

#[test]
fn test_repeated_parses_agree() {
    let line = "for i in range (25) do {puts \"i less than 25\"} end";
    assert_eq!(parse(line), Ok(()));
    assert_eq!(parse(line), Ok(()));

    let mut parser = Parser::new(line);
    assert_eq!(parser.parse(), parser.parse());

    let rejected = "for i in range 25 {puts 1} end";
    assert_eq!(parse(rejected), parse(rejected));
}

#[test]
fn test_rejection_does_not_leak_into_next_line() {
    let _ = check("if (1 > { puts 1 } end");
    assert!(check("loop do { puts 1 } end").is_clean());
}

#[test]
fn test_illegal_character_is_reported_and_rest_is_recognized() {
    let report = check("while (x < 10) { puts @ x } end");

    assert_eq!(
        report.lex_errors,
        vec![LexError {
            character: '@',
            location: SourceLocation::new(1, 23, 22),
        }]
    );
    // With '@' skipped the remaining tokens form a valid loop
    assert!(report.is_accepted());
    assert!(!report.is_clean());
}

#[test]
fn test_illegal_character_can_leave_a_syntax_error() {
    let report = check("while (x @ 10) { puts x } end");

    assert_eq!(report.lex_errors.len(), 1);
    let diagnostics = report.diagnostics();
    match diagnostics.last() {
        // `x 10` still reads as a call, so the parser gives up at ')'
        Some(Diagnostic::Syntax(err)) => {
            assert_eq!(err.token.kind, TokenKind::RParen);
            assert_eq!(err.location().offset, 13);
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_multi_level_else_if_chain() {
    let line = "if (n == 1) { puts \"one\" } \
                else if (n == 2) { puts \"two\" } \
                else if (n == 3) { puts \"three\" } \
                else { puts \"many\" } end end end";
    assert_eq!(parse(line), Ok(()));
}

#[test]
fn test_if_whose_body_is_a_single_if() {
    assert_eq!(
        parse("if (a > 1) { if (b > 2) { puts b } else { puts a } end } end"),
        Ok(())
    );
}

#[test]
fn test_arithmetic_relations_and_bare_number_conditions() {
    assert_eq!(parse("while (count + 1) { puts count } end"), Ok(()));
    assert_eq!(parse("while (1) { puts 1 } end"), Ok(()));
    assert!(parse("while () { puts 1 } end").is_err());
}

#[test]
fn test_multi_line_input_reports_line_numbers() {
    let err = syntax_error("loop do {\n  puts 1\n  )\n} end");
    assert_eq!(err.token.kind, TokenKind::RParen);
    assert_eq!(err.location().line, 3);
    assert_eq!(err.location().column, 3);
}

#[test]
fn test_statements_in_a_body() {
    let line = "loop do { puts \"a\"; print 1, 2 \
                while (i < 3) do { puts i } end \
                for x in xs { puts x } end } end";
    assert_eq!(parse(line), Ok(()));
}

#[test]
fn test_parse_text_reports_lex_errors() {
    let line = "if (1 > 2) { puts (3) } @ end";
    let diagnostics = parse(line).unwrap_err();

    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0], Diagnostic::Lex(ref e) if e.character == '@'));

    // The tokens that survived still form an accepted line
    assert_eq!(parse_tokens(tokenize(line).tokens), Ok(()));
}

#[test]
fn test_parse_text_lists_lex_errors_before_syntax_error() {
    let diagnostics = parse("while (x @ 10) { puts x } end").unwrap_err();
    assert_eq!(diagnostics.len(), 2);
    assert!(matches!(diagnostics[0], Diagnostic::Lex(_)));
    assert!(matches!(diagnostics[1], Diagnostic::Syntax(_)));
}

#[test]
fn test_bare_name_is_not_a_zero_argument_call() {
    let err = syntax_error("loop do { puts a;; } end");
    assert_eq!(err.token.kind, TokenKind::Semicolon);
    assert_eq!(err.location().offset, 17);

    let err = syntax_error("if (f; > 1) { puts 1 } end");
    assert_eq!(err.token.kind, TokenKind::Semicolon);
    assert_eq!(err.location().offset, 5);
}
