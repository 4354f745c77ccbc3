//! Conversion of the parse tree to finite automata.

pub mod dfa;
pub mod dfa_backend;
pub mod nfa;
