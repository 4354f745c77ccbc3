/*!

# refa - REgular expressions via Finite Automata

This crate provides a small regular expression engine which compiles a
pattern into a deterministic finite automaton (DFA) and uses it to decide
whether an input string matches.

The supported syntax is deliberately minimal: alphanumeric literals,
concatenation by adjacency, alternation `|`, Kleene star `*`, optional `?`,
and grouping `()`. There are no anchors, character classes, backreferences
or counted repetition.

# Example: test if a string matches

Matching is full-match: the whole subject must be accepted.

```rust
use refa::Regex;
let re = Regex::new("(ba*b)|(bb)|(aa)").unwrap();
assert!(re.test("baaab"));
assert!(!re.test("baaaaaabbbaa"));
```

# Example: searching for a substring

`find` returns the leftmost matching substring, extended to the longest
accepting end from that start.

```rust
use refa::Regex;
let re = Regex::new("a*b").unwrap();
let m = re.find("xxaaabyy").unwrap();
assert_eq!(m, 2..6);
```

# Architecture

refa has a preprocessor which makes concatenation explicit, a
recursive-descent parser producing a parse tree, a Thompson-construction
builder producing a nondeterministic finite automaton (NFA) with epsilon
transitions, a subset-construction pass determinizing it into a DFA, and a
DFA simulator. Compilation runs each stage exactly once; matching is a pure
walk of the DFA with no backtracking.

Each compiled `Regex` is independent and immutable, so regexes may be
compiled and used freely across threads.

# Comparison to regex crate

refa is a teaching-sized engine: its value is the legibility of the
pipeline, not feature coverage or throughput. Use the regex crate for real
workloads.

*/

#![warn(clippy::all)]

pub use crate::api::*;

mod api;
mod automata;
mod ir;
mod parse;
mod startpredicate;
