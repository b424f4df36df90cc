use crate::abstractops::Value;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;

/// The abstract data structures a trace can be attributed to
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum StructureLabel {
    Stack,
    Queue,
    PriorityQueue,
}

impl StructureLabel {
    pub const ALL: [StructureLabel; 3] = [
        StructureLabel::Stack,
        StructureLabel::Queue,
        StructureLabel::PriorityQueue,
    ];
}

impl fmt::Display for StructureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StructureLabel::Stack => "stack",
            StructureLabel::Queue => "queue",
            StructureLabel::PriorityQueue => "priority queue",
        })
    }
}

/// LIFO simulation backed by a Vec
#[derive(Debug, Default, Clone)]
pub struct SimStack {
    items: Vec<Value>,
}

impl SimStack {
    pub fn insert(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Takes the most recently inserted value, if any
    pub fn remove(&mut self) -> Option<Value> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&Value> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// FIFO simulation backed by a VecDeque
#[derive(Debug, Default, Clone)]
pub struct SimQueue {
    items: VecDeque<Value>,
}

impl SimQueue {
    pub fn insert(&mut self, value: Value) {
        self.items.push_back(value);
    }

    /// Takes the oldest value, if any
    pub fn remove(&mut self) -> Option<Value> {
        self.items.pop_front()
    }

    pub fn peek(&self) -> Option<&Value> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Max-first priority queue simulation backed by a BinaryHeap.
///
/// Equal maxima are interchangeable: values carry no identity, so which copy
/// comes out first cannot be observed.
#[derive(Debug, Default, Clone)]
pub struct SimPriorityQueue {
    items: BinaryHeap<Value>,
}

impl SimPriorityQueue {
    pub fn insert(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Takes the largest value, if any
    pub fn remove(&mut self) -> Option<Value> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&Value> {
        self.items.peek()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
