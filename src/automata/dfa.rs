//! Determinization of an NFA by the subset construction.

use crate::automata::nfa::{Nfa, StateHandle};
use core::fmt;
use log::trace;
use std::collections::{BTreeSet, HashMap};

/// A set of NFA states underlying one DFA state.
pub type StateSet = BTreeSet<StateHandle>;

/// A DFA built from an NFA.
///
/// Each DFA state is an epsilon-closed subset of NFA states, assigned a
/// stable id on first discovery and never revised. Subset identity, not
/// discovery order, determines equality: two paths reaching the same subset
/// collapse to the same id. Once built the DFA is immutable.
#[derive(Debug)]
pub struct Dfa {
    pub initial: StateHandle,

    // Ids of states whose subset contains the NFA's accepting state.
    accepting: BTreeSet<StateHandle>,

    // The underlying NFA subset for each state, indexed by id.
    states: Vec<StateSet>,

    // The alphabet, inherited from the NFA (sorted, duplicate-free).
    inputs: Vec<char>,

    // Transitions over discovered states and the alphabet. An absent entry
    // means "no move".
    transitions: HashMap<(StateHandle, char), StateHandle>,
}

impl Dfa {
    /// Determinize an NFA.
    /// Terminates because the universe of subsets of NFA states is finite
    /// and each subset is assigned an id at most once.
    pub fn from_nfa(nfa: &Nfa) -> Dfa {
        let mut dfa = Dfa {
            initial: 0,
            accepting: BTreeSet::new(),
            states: Vec::new(),
            inputs: nfa.inputs().to_vec(),
            transitions: HashMap::new(),
        };
        let mut ids: HashMap<StateSet, StateHandle> = HashMap::new();

        let mut start = StateSet::new();
        start.insert(nfa.initial);
        dfa.initial = dfa.intern(nfa.epsilon_closure(&start), nfa, &mut ids);

        let mut work = vec![dfa.initial];
        while let Some(id) = work.pop() {
            for i in 0..dfa.inputs.len() {
                let symbol = dfa.inputs[i];
                let subset = nfa.epsilon_closure(&nfa.move_set(&dfa.states[id as usize], symbol));
                if subset.is_empty() {
                    // No move on this symbol; rejection is implicit.
                    continue;
                }
                let discovered = !ids.contains_key(&subset);
                let target = dfa.intern(subset, nfa, &mut ids);
                if discovered {
                    work.push(target);
                }
                dfa.transitions.insert((id, symbol), target);
            }
        }
        trace!(
            "subset construction: {} DFA states from {} NFA states",
            dfa.states.len(),
            nfa.size()
        );
        dfa
    }

    // Assign (or reuse) the id for a subset, registering acceptance on first
    // discovery.
    fn intern(
        &mut self,
        subset: StateSet,
        nfa: &Nfa,
        ids: &mut HashMap<StateSet, StateHandle>,
    ) -> StateHandle {
        if let Some(&id) = ids.get(&subset) {
            return id;
        }
        let id = self.states.len() as StateHandle;
        if subset.contains(&nfa.accepting) {
            self.accepting.insert(id);
        }
        ids.insert(subset.clone(), id);
        self.states.push(subset);
        id
    }

    /// The number of discovered states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// The alphabet, sorted ascending.
    pub fn inputs(&self) -> &[char] {
        &self.inputs
    }

    /// Whether a state is accepting.
    pub fn is_accepting(&self, state: StateHandle) -> bool {
        self.accepting.contains(&state)
    }

    /// The accepting state ids.
    pub fn accepting(&self) -> &BTreeSet<StateHandle> {
        &self.accepting
    }

    /// The NFA subset underlying a DFA state.
    pub fn state_set(&self, state: StateHandle) -> &StateSet {
        &self.states[state as usize]
    }

    /// The target of a transition, or None for "no move".
    pub fn transition(&self, state: StateHandle, symbol: char) -> Option<StateHandle> {
        self.transitions.get(&(state, symbol)).copied()
    }

    /// Enumerate all transitions as (from, symbol, to), ordered by state and
    /// symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (StateHandle, char, StateHandle)> + '_ {
        (0..self.states.len() as StateHandle).flat_map(move |from| {
            self.inputs.iter().filter_map(move |&symbol| {
                self.transition(from, symbol).map(|to| (from, symbol, to))
            })
        })
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "DFA({} states)", self.states.len())?;
        for (idx, subset) in self.states.iter().enumerate() {
            let handle = idx as StateHandle;
            let initial = if handle == self.initial { "S" } else { " " };
            let accepting = if self.is_accepting(handle) { "*" } else { " " };
            write!(f, "[{}{}{}]", initial, accepting, handle)?;
            write!(f, " {:?}", subset)?;
            for &symbol in &self.inputs {
                if let Some(to) = self.transition(handle, symbol) {
                    write!(f, " {}→{}", symbol, to)?;
                }
            }
            if idx < self.states.len() - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
