use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_round_trip_through_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!("e2002".parse::<ErrorCode>(), Ok(ErrorCode::E2002));
    assert_eq!("E9999".parse::<ErrorCode>(), Err(()));
}

#[test]
fn test_every_code_in_exactly_one_phase() {
    for code in ErrorCode::ALL {
        let phases = [
            code.is_lexer_error(),
            code.is_parser_error(),
            code.is_link_error(),
            code.is_walk_error(),
        ];
        assert_eq!(phases.iter().filter(|&&p| p).count(), 1, "{code}");
    }
}

#[test]
fn test_summary_contracts() {
    assert!(ErrorCode::E2001
        .summary()
        .contains("no matching go function declaration"));
    assert!(ErrorCode::E2002
        .summary()
        .contains("doesn't match signature of go function"));
    assert!(ErrorCode::E2004.summary().contains("not implemented"));
    assert!(ErrorCode::E2005.summary().contains("invalid expression"));
}
