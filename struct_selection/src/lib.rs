//! Works out which abstract data structure (stack, queue or max priority queue) could have
//! produced a recorded trace of inserts and removes. Normally used through the
//! `guess-structure` binary, but exposed as a library crate as well.

pub mod abstractops;
pub mod candidates;
pub mod cli;
pub mod input;
pub mod rustbackends;

pub use abstractops::*;
pub use candidates::*;
pub use rustbackends::*;

use std::fmt;

/// Why a label was ruled out: at `step` the trace claims `observed` came out, but the simulation
/// produced `expected` (`None` when it was empty).
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Elimination {
    pub label: StructureLabel,
    pub step: usize,
    pub expected: Option<Value>,
    pub observed: Value,
}

impl fmt::Display for Elimination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expected {
            Some(expected) => write!(
                f,
                "{} ruled out at step {}: removed {} but expected {}",
                self.label, self.step, self.observed, expected
            ),
            None => write!(
                f,
                "{} ruled out at step {}: removed {} from an empty container",
                self.label, self.step, self.observed
            ),
        }
    }
}

/// Replays one trace against all three simulations at once.
///
/// Each trace gets a fresh Eliminator; nothing carries over between traces.
#[derive(Debug, Default)]
pub struct Eliminator {
    stack: SimStack,
    queue: SimQueue,
    priority_queue: SimPriorityQueue,
    candidates: CandidateSet,
    eliminations: Vec<Elimination>,
    steps: usize,
}

impl Eliminator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one operation to every simulation.
    ///
    /// Removes pop from every simulation, even ones already ruled out, so a dead simulation may
    /// drift. Its state is never consulted again.
    pub fn observe(&mut self, op: AbstractOp) {
        self.steps += 1;
        match op {
            AbstractOp::Insert(value) => {
                self.stack.insert(value.clone());
                self.queue.insert(value.clone());
                self.priority_queue.insert(value);
            }
            AbstractOp::Remove(observed) => {
                let removed = [
                    (StructureLabel::Stack, self.stack.remove()),
                    (StructureLabel::Queue, self.queue.remove()),
                    (StructureLabel::PriorityQueue, self.priority_queue.remove()),
                ];
                for (label, expected) in removed {
                    if expected.as_ref() != Some(&observed) {
                        self.eliminate(label, expected, &observed);
                    }
                }
            }
        }
    }

    fn eliminate(&mut self, label: StructureLabel, expected: Option<Value>, observed: &Value) {
        if !self.candidates.eliminate(label) {
            return;
        }
        let elimination = Elimination {
            label,
            step: self.steps,
            expected,
            observed: observed.clone(),
        };
        log::debug!("{elimination}");
        self.eliminations.push(elimination);
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// First-time eliminations, in the order they happened
    pub fn eliminations(&self) -> &[Elimination] {
        &self.eliminations
    }

    /// Number of operations observed so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_candidates(&self.candidates)
    }
}

/// Classifies a complete trace.
pub fn classify(ops: impl IntoIterator<Item = AbstractOp>) -> Verdict {
    let mut eliminator = Eliminator::new();
    for op in ops {
        eliminator.observe(op);
    }
    eliminator.verdict()
}
