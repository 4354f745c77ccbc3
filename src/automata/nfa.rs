//! Conversion of the parse tree to a non-deterministic finite automaton, by
//! Thompson construction.

use crate::ir::Node;
use core::fmt;
use log::trace;
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// A handle to a state in an automaton.
/// States are numbered densely: 0..size, with no gaps after construction.
pub type StateHandle = u32;

/// A symbol labeling an NFA transition.
/// The absence of a transition is not a symbol; it is the `None` of the
/// `Option<Symbol>` cells in the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Symbol {
    /// A transition consuming no input.
    Epsilon,

    /// A transition on a literal character.
    Char(char),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Epsilon => f.write_str("ε"),
            Symbol::Char(c) => write!(f, "{}", c),
        }
    }
}

/// An NFA with a single initial and a single accepting state.
///
/// Transitions form a dense table over ordered state pairs, holding at most
/// one symbol per (from, to) pair. The building rules never need a second
/// symbol between the same pair; `add_transition` relies on that and simply
/// overwrites.
#[derive(Debug)]
pub struct Nfa {
    size: usize,
    pub initial: StateHandle,
    pub accepting: StateHandle,

    // Input symbols this NFA responds to (epsilon excluded), sorted and
    // duplicate-free. Becomes the DFA's alphabet.
    inputs: SmallVec<[char; 8]>,

    // table[from][to] is the symbol between the pair, if any.
    table: Vec<Vec<Option<Symbol>>>,
}

impl Nfa {
    /// Create an NFA of `size` unconnected states.
    fn with_size(size: usize, initial: StateHandle, accepting: StateHandle) -> Self {
        let nfa = Nfa {
            size,
            initial,
            accepting,
            inputs: SmallVec::new(),
            table: vec![vec![None; size]; size],
        };
        nfa.assert_legal(initial);
        nfa.assert_legal(accepting);
        nfa
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The input alphabet (epsilon excluded), sorted ascending.
    pub fn inputs(&self) -> &[char] {
        &self.inputs
    }

    /// The symbol between a pair of states, if any.
    pub fn transition(&self, from: StateHandle, to: StateHandle) -> Option<Symbol> {
        self.assert_legal(from);
        self.assert_legal(to);
        self.table[from as usize][to as usize]
    }

    // A state index outside 0..size is a builder defect, never malformed
    // input, so fail loudly rather than continue with a bad index.
    fn assert_legal(&self, s: StateHandle) {
        assert!(
            (s as usize) < self.size,
            "state {} out of range 0..{}",
            s,
            self.size
        );
    }

    /// Add a transition between two states, replacing any previous one
    /// between the pair.
    pub fn add_transition(&mut self, from: StateHandle, to: StateHandle, symbol: Symbol) {
        self.assert_legal(from);
        self.assert_legal(to);
        self.table[from as usize][to as usize] = Some(symbol);
        if let Symbol::Char(c) = symbol {
            self.add_input(c);
        }
    }

    // Record an alphabet symbol, keeping `inputs` sorted and duplicate-free.
    fn add_input(&mut self, c: char) {
        let i = self.inputs.partition_point(|&x| x < c);
        if self.inputs.get(i) != Some(&c) {
            self.inputs.insert(i, c);
        }
    }

    /// Renumber every state: number += shift. Functionally this doesn't
    /// affect the NFA, it only makes it larger and renames its states,
    /// freeing the low numbers for new states.
    fn shift_states(&mut self, shift: usize) {
        if shift == 0 {
            return;
        }
        let new_size = self.size + shift;
        let mut table = vec![vec![None; new_size]; new_size];
        for from in 0..self.size {
            for to in 0..self.size {
                table[from + shift][to + shift] = self.table[from][to];
            }
        }
        self.size = new_size;
        self.initial += shift as StateHandle;
        self.accepting += shift as StateHandle;
        self.table = table;
    }

    /// Copy every occupied entry of `other` into this table at matching
    /// indices, leaving entries outside that range untouched.
    fn fill_states(&mut self, other: &Nfa) {
        assert!(
            other.size <= self.size,
            "cannot fill from a larger NFA ({} > {})",
            other.size,
            self.size
        );
        for from in 0..other.size {
            for to in 0..other.size {
                if let Some(symbol) = other.table[from][to] {
                    self.table[from][to] = Some(symbol);
                }
            }
        }
        for &c in &other.inputs {
            self.add_input(c);
        }
    }

    /// Append one new, unconnected state.
    fn append_empty_state(&mut self) {
        self.size += 1;
        for row in &mut self.table {
            row.push(None);
        }
        self.table.push(vec![None; self.size]);
    }

    /// The set of states reachable from some state in `states` by exactly
    /// one transition on `symbol`.
    pub fn move_set(&self, states: &BTreeSet<StateHandle>, symbol: char) -> BTreeSet<StateHandle> {
        let mut result = BTreeSet::new();
        for &from in states {
            self.assert_legal(from);
            for to in 0..self.size {
                if self.table[from as usize][to] == Some(Symbol::Char(symbol)) {
                    result.insert(to as StateHandle);
                }
            }
        }
        result
    }

    /// The smallest superset of `states` closed under epsilon transitions.
    /// Traversal order does not affect the result.
    pub fn epsilon_closure(&self, states: &BTreeSet<StateHandle>) -> BTreeSet<StateHandle> {
        let mut closure = states.clone();
        let mut work: SmallVec<[StateHandle; 8]> = states.iter().copied().collect();
        while let Some(from) = work.pop() {
            self.assert_legal(from);
            for to in 0..self.size {
                if self.table[from as usize][to] == Some(Symbol::Epsilon)
                    && closure.insert(to as StateHandle)
                {
                    work.push(to as StateHandle);
                }
            }
        }
        closure
    }

    /// The base case: two states joined by a single transition.
    fn basic(symbol: Symbol) -> Nfa {
        let mut nfa = Nfa::with_size(2, 0, 1);
        nfa.add_transition(0, 1, symbol);
        nfa
    }

    /// Build the NFA for a parse tree, bottom-up.
    pub fn from_tree(tree: &Node) -> Nfa {
        let nfa = match tree {
            Node::Empty => Nfa::basic(Symbol::Epsilon),
            Node::Char(c) => Nfa::basic(Symbol::Char(*c)),
            Node::Cat(left, right) => concat(Nfa::from_tree(left), Nfa::from_tree(right)),
            Node::Alt(left, right) => alternate(Nfa::from_tree(left), Nfa::from_tree(right)),
            Node::Star(child) => star(Nfa::from_tree(child)),
            // Zero-or-one is an alternation with epsilon; no bespoke rule.
            Node::Question(child) => alternate(Nfa::from_tree(child), Nfa::basic(Symbol::Epsilon)),
        };
        trace!(
            "built NFA: {} states, initial {}, accepting {}",
            nfa.size,
            nfa.initial,
            nfa.accepting
        );
        nfa
    }
}

// The building functions below consume their inputs: shifting resizes the
// tables and renumbers the states, so a composed NFA must not be reused.

/// Concatenation of two NFAs (left·right).
/// Right's states are shifted so its initial state coincides with left's
/// accepting state, then left is overlaid. The two machines fuse at that
/// shared state; no epsilon edge is needed.
fn concat(left: Nfa, right: Nfa) -> Nfa {
    let mut nfa = right;
    nfa.shift_states(left.size - 1);
    nfa.fill_states(&left);
    nfa.initial = left.initial;
    nfa
}

/// Alternation of two NFAs (left|right).
/// First comes a fresh initial state 0, then left's states, then right's,
/// then one appended accepting state.
fn alternate(mut left: Nfa, mut right: Nfa) -> Nfa {
    left.shift_states(1);
    right.shift_states(left.size);

    let right_initial = right.initial;
    let right_accepting = right.accepting;
    let mut nfa = right;
    nfa.fill_states(&left);

    nfa.add_transition(0, left.initial, Symbol::Epsilon);
    nfa.add_transition(0, right_initial, Symbol::Epsilon);
    nfa.initial = 0;

    nfa.append_empty_state();
    nfa.accepting = (nfa.size - 1) as StateHandle;
    nfa.add_transition(left.accepting, nfa.accepting, Symbol::Epsilon);
    nfa.add_transition(right_accepting, nfa.accepting, Symbol::Epsilon);
    nfa
}

/// Kleene star of an NFA (nfa*).
/// The direct edge from the new initial to the new accepting state permits
/// the empty match; the loop-back edge permits repetition.
fn star(mut nfa: Nfa) -> Nfa {
    nfa.shift_states(1);
    nfa.append_empty_state();

    let last = (nfa.size - 1) as StateHandle;
    nfa.add_transition(nfa.accepting, nfa.initial, Symbol::Epsilon);
    nfa.add_transition(0, nfa.initial, Symbol::Epsilon);
    nfa.add_transition(nfa.accepting, last, Symbol::Epsilon);
    nfa.add_transition(0, last, Symbol::Epsilon);

    nfa.initial = 0;
    nfa.accepting = last;
    nfa
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "NFA({} states)", self.size)?;
        for from in 0..self.size {
            let handle = from as StateHandle;
            let marker = match handle {
                h if h == self.initial => "S",
                h if h == self.accepting => "A",
                _ => " ",
            };
            write!(f, "[{}{}]", marker, handle)?;
            for to in 0..self.size {
                if let Some(symbol) = self.table[from][to] {
                    write!(f, " {}→{}", symbol, to)?;
                }
            }
            if from < self.size - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
