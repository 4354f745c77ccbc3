use crate::automata::dfa::Dfa;
use crate::automata::dfa_backend;
use crate::automata::nfa::Nfa;
use crate::parse;
use crate::startpredicate::{self, StartPredicate};

use core::str::FromStr;

pub use parse::Error;

/// Range is used to express the extent of a match, as byte indexes into the
/// subject string.
pub type Range = core::ops::Range<usize>;

/// A Regex is the compiled (determinized) version of a pattern.
#[derive(Debug)]
pub struct Regex {
    dfa: Dfa,
    start_pred: StartPredicate,
}

impl Regex {
    /// Construct a regex by parsing `pattern`.
    /// An Error may be returned if the syntax is invalid.
    /// Compilation runs the whole pipeline (parse, Thompson construction,
    /// subset construction); prefer to cache a Regex which is intended to be
    /// used more than once.
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        let tree = parse::try_parse(pattern)?;
        let nfa = Nfa::from_tree(&tree);
        let dfa = Dfa::from_nfa(&nfa);
        let start_pred = startpredicate::predicate_for_dfa(&dfa);
        Ok(Regex { dfa, start_pred })
    }

    /// Test whether the whole of `text` matches (full-match semantics).
    #[inline]
    pub fn test(&self, text: &str) -> bool {
        dfa_backend::matches(&self.dfa, text)
    }

    /// Search `text` for a matching substring, returning the leftmost match,
    /// extended to the longest accepting end from that start.
    pub fn find(&self, text: &str) -> Option<Range> {
        let mut start = 0;
        loop {
            start = self.start_pred.next_candidate(text, start)?;
            if let Some(len) = dfa_backend::longest_accepting_prefix(&self.dfa, &text[start..]) {
                return Some(start..start + len);
            }
            match text[start..].chars().next() {
                Some(c) => start += c.len_utf8(),
                None => return None,
            }
        }
    }
}

impl FromStr for Regex {
    type Err = Error;

    /// Attempts to parse a string into a regular expression
    #[inline]
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::new(s)
    }
}

// Access to the individual compilation stages, for tools and tests that want
// to inspect or dump the intermediate structures.
#[doc(hidden)]
pub mod pipeline {
    pub use crate::automata::dfa::Dfa;
    pub use crate::automata::nfa::Nfa;
    pub use crate::ir::Node;
    pub use crate::parse::{preprocess, try_parse};

    /// Build the Thompson NFA for a parse tree.
    pub fn build_nfa(tree: &Node) -> Nfa {
        Nfa::from_tree(tree)
    }

    /// Determinize an NFA by the subset construction.
    pub fn determinize(nfa: &Nfa) -> Dfa {
        Dfa::from_nfa(nfa)
    }
}
