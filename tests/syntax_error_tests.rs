#[track_caller]
fn test_1_error(pattern: &str, expected_err: &str) {
    let res = refa::Regex::new(pattern);
    assert!(res.is_err(), "Pattern should not have parsed: {}", pattern);

    let err = res.err().unwrap();
    assert!(
        err.text.contains(expected_err),
        "Error text '{}' did not contain '{}' for pattern '{}'",
        err.text,
        expected_err,
        pattern
    );
}

#[test]
fn test_syntax_errors() {
    test_1_error(r"*", "Expected alphanumeric");
    test_1_error(r"?", "Expected alphanumeric");
    test_1_error(r"a|+", "Expected alphanumeric");

    test_1_error(r"(a|b", "Unbalanced parenthesis");
    test_1_error(r"(", "Unbalanced parenthesis");
    test_1_error(r"a)", "Unexpected char");
    test_1_error(r"ab)c", "Unexpected char");
}

#[test]
fn test_error_positions() {
    // Positions are 0-based indexes into the preprocessed pattern, and the
    // offending character rides along; None means end of input.
    let err = refa::Regex::new("(a|b").err().unwrap();
    assert_eq!(err.found, None);
    assert_eq!(err.position, 4);

    let err = refa::Regex::new("a|[").err().unwrap();
    assert_eq!(err.found, Some('['));
    assert_eq!(err.position, 2);

    // "ab)c" preprocesses to "a.b)c"; the stray paren is at index 3.
    let err = refa::Regex::new("ab)c").err().unwrap();
    assert_eq!(err.found, Some(')'));
    assert_eq!(err.position, 3);
}

#[test]
fn test_errors_are_fatal_but_isolated() {
    // A failed compilation constructs no automaton and doesn't interfere
    // with later compilations.
    assert!(refa::Regex::new("(a|b").is_err());
    let re = refa::Regex::new("a|b").unwrap();
    assert!(re.test("a"));
}
