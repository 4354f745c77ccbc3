//! DFA execution backend.

use crate::automata::dfa::Dfa;
use crate::automata::nfa::StateHandle;

/// Walk `input` through the DFA, character by character.
/// Returns the state reached after consuming all of `input`, or None if a
/// transition is missing along the way.
fn run(dfa: &Dfa, input: &str) -> Option<StateHandle> {
    let mut state = dfa.initial;
    for c in input.chars() {
        // A missing transition is normal, immediate rejection; no failure
        // state is materialized.
        state = dfa.transition(state, c)?;
    }
    Some(state)
}

/// Whether the DFA accepts exactly `input` (full-match semantics).
/// Purely sequential, no backtracking.
pub fn matches(dfa: &Dfa, input: &str) -> bool {
    match run(dfa, input) {
        Some(state) => dfa.is_accepting(state),
        None => false,
    }
}

/// The longest prefix of `input` the DFA accepts, as a byte length.
/// Used by substring search; walks until the first missing transition and
/// remembers the last accepting position seen.
pub fn longest_accepting_prefix(dfa: &Dfa, input: &str) -> Option<usize> {
    let mut state = dfa.initial;
    let mut last_accept = if dfa.is_accepting(state) { Some(0) } else { None };
    for (pos, c) in input.char_indices() {
        match dfa.transition(state, c) {
            Some(next) => state = next,
            None => break,
        }
        if dfa.is_accepting(state) {
            last_accept = Some(pos + c.len_utf8());
        }
    }
    last_accept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::nfa::Nfa;
    use crate::parse;

    fn compile(pattern: &str) -> Dfa {
        let tree = parse::try_parse(pattern).unwrap();
        Dfa::from_nfa(&Nfa::from_tree(&tree))
    }

    #[test]
    fn test_full_match() {
        let dfa = compile("abc");
        assert!(matches(&dfa, "abc"));
        assert!(!matches(&dfa, "ab"));
        assert!(!matches(&dfa, "abcd"));
        assert!(!matches(&dfa, "def"));
    }

    #[test]
    fn test_missing_transition_rejects() {
        let dfa = compile("ab");
        // 'x' is not in the alphabet at all.
        assert!(!matches(&dfa, "xb"));
        // 'a' is in the alphabet but has no move from the second state.
        assert!(!matches(&dfa, "aa"));
    }

    #[test]
    fn test_longest_accepting_prefix() {
        let dfa = compile("a*");
        assert_eq!(longest_accepting_prefix(&dfa, "aaab"), Some(3));
        // The empty prefix is accepted when the initial state accepts.
        assert_eq!(longest_accepting_prefix(&dfa, "baa"), Some(0));

        let dfa = compile("ab");
        assert_eq!(longest_accepting_prefix(&dfa, "abab"), Some(2));
        assert_eq!(longest_accepting_prefix(&dfa, "ba"), None);
    }

    #[test]
    fn test_determinism() {
        let dfa = compile("(a|b)*abb");
        let input = "ababb";
        let first = matches(&dfa, input);
        for _ in 0..8 {
            assert_eq!(matches(&dfa, input), first);
        }
        assert!(first);
    }
}
