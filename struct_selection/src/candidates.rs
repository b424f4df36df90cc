use crate::rustbackends::StructureLabel;
use std::collections::BTreeSet;
use std::fmt;

/// Labels that have not yet been disproven for the current trace.
///
/// Starts with every label and only ever shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    remaining: BTreeSet<StructureLabel>,
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateSet {
    pub fn new() -> Self {
        Self {
            remaining: StructureLabel::ALL.into_iter().collect(),
        }
    }

    /// Removes `label`. Returns false if it was already gone.
    pub fn eliminate(&mut self, label: StructureLabel) -> bool {
        self.remaining.remove(&label)
    }

    pub fn contains(&self, label: StructureLabel) -> bool {
        self.remaining.contains(&label)
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = StructureLabel> + '_ {
        self.remaining.iter().copied()
    }
}

/// The one-line answer for a trace
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Verdict {
    Stack,
    Queue,
    PriorityQueue,
    NotSure,
    Impossible,
}

impl Verdict {
    pub fn from_candidates(candidates: &CandidateSet) -> Self {
        let mut remaining = candidates.iter();
        match (remaining.next(), remaining.next()) {
            (None, _) => Verdict::Impossible,
            (Some(label), None) => label.into(),
            (Some(_), Some(_)) => Verdict::NotSure,
        }
    }
}

impl From<StructureLabel> for Verdict {
    fn from(label: StructureLabel) -> Self {
        match label {
            StructureLabel::Stack => Verdict::Stack,
            StructureLabel::Queue => Verdict::Queue,
            StructureLabel::PriorityQueue => Verdict::PriorityQueue,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Stack => "stack",
            Verdict::Queue => "queue",
            Verdict::PriorityQueue => "priority queue",
            Verdict::NotSure => "not sure",
            Verdict::Impossible => "impossible",
        })
    }
}
