//! Support for quickly finding potential match locations.

use crate::automata::dfa::Dfa;

/// A predicate over candidate start positions for substring search, derived
/// from the transitions out of the DFA's initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartPredicate {
    /// Any position may start a match.
    Arbitrary,

    /// A match can only start with this byte.
    Byte1(u8),

    /// A match can only start with one of these bytes.
    Byte2([u8; 2]),
    Byte3([u8; 3]),
}

/// Compute the start predicate for a DFA.
/// If the initial state is itself accepting, the empty match is possible at
/// every position and no predicate applies.
pub fn predicate_for_dfa(dfa: &Dfa) -> StartPredicate {
    if dfa.is_accepting(dfa.initial) {
        return StartPredicate::Arbitrary;
    }
    let mut bytes = Vec::new();
    for &symbol in dfa.inputs() {
        if dfa.transition(dfa.initial, symbol).is_some() {
            if !symbol.is_ascii() {
                return StartPredicate::Arbitrary;
            }
            bytes.push(symbol as u8);
        }
    }
    match bytes.as_slice() {
        &[a] => StartPredicate::Byte1(a),
        &[a, b] => StartPredicate::Byte2([a, b]),
        &[a, b, c] => StartPredicate::Byte3([a, b, c]),
        _ => StartPredicate::Arbitrary,
    }
}

impl StartPredicate {
    /// The next candidate start position at or after `pos`, as a byte index
    /// of `text`. The predicate only ever selects ASCII bytes, so returned
    /// positions are always char boundaries.
    pub fn next_candidate(&self, text: &str, pos: usize) -> Option<usize> {
        if pos > text.len() {
            return None;
        }
        let haystack = &text.as_bytes()[pos..];
        let found = match *self {
            StartPredicate::Arbitrary => Some(0),
            StartPredicate::Byte1(a) => memchr::memchr(a, haystack),
            StartPredicate::Byte2([a, b]) => memchr::memchr2(a, b, haystack),
            StartPredicate::Byte3([a, b, c]) => memchr::memchr3(a, b, c, haystack),
        };
        found.map(|i| pos + i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::dfa::Dfa;
    use crate::automata::nfa::Nfa;
    use crate::parse;

    fn compile(pattern: &str) -> Dfa {
        let tree = parse::try_parse(pattern).unwrap();
        Dfa::from_nfa(&Nfa::from_tree(&tree))
    }

    #[test]
    fn test_single_byte_predicate() {
        let pred = predicate_for_dfa(&compile("ab"));
        assert_eq!(pred, StartPredicate::Byte1(b'a'));
        assert_eq!(pred.next_candidate("xxab", 0), Some(2));
        assert_eq!(pred.next_candidate("xxab", 3), None);
    }

    #[test]
    fn test_alternation_predicate() {
        let pred = predicate_for_dfa(&compile("(ab)|(ba)"));
        assert_eq!(pred, StartPredicate::Byte2([b'a', b'b']));
        assert_eq!(pred.next_candidate("xxbx", 0), Some(2));
    }

    #[test]
    fn test_empty_match_is_arbitrary() {
        // a* accepts the empty string, so every position is a candidate.
        let pred = predicate_for_dfa(&compile("a*"));
        assert_eq!(pred, StartPredicate::Arbitrary);
        assert_eq!(pred.next_candidate("xyz", 1), Some(1));
        assert_eq!(pred.next_candidate("xyz", 4), None);
    }
}
