//! Linear-functions program representation.
//!
//! A program is an ordered sequence of functions; each function is an ordered
//! sequence of instructions plus an identifying tag. Instruction and tag types
//! are left to the caller since execution lives outside this crate.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Function<I, T> {
    tag: T,
    instructions: Vec<I>,
}

impl<I, T> Function<I, T> {
    pub fn new(tag: T, instructions: Vec<I>) -> Self {
        Self { tag, instructions }
    }

    pub fn tag(&self) -> &T {
        &self.tag
    }

    pub fn instructions(&self) -> &[I] {
        &self.instructions
    }

    pub fn instructions_mut(&mut self) -> &mut Vec<I> {
        &mut self.instructions
    }

    /// Replace the instruction content, keeping the tag.
    pub fn set_instructions(&mut self, instructions: Vec<I>) {
        self.instructions = instructions;
    }

    pub fn push(&mut self, instruction: I) {
        self.instructions.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Program<I, T> {
    functions: Vec<Function<I, T>>,
}

impl<I, T> Default for Program<I, T> {
    fn default() -> Self {
        Self {
            functions: Vec::new(),
        }
    }
}

impl<I, T> Program<I, T> {
    pub fn new(functions: Vec<Function<I, T>>) -> Self {
        Self { functions }
    }

    pub fn push_function(&mut self, function: Function<I, T>) {
        self.functions.push(function);
    }

    pub fn functions(&self) -> &[Function<I, T>] {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut [Function<I, T>] {
        &mut self.functions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Function<I, T>> {
        self.functions.iter()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Total instruction count across all functions.
    pub fn inst_count(&self) -> usize {
        self.functions.iter().map(Function::len).sum()
    }
}

impl<I, T> Index<usize> for Program<I, T> {
    type Output = Function<I, T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.functions[index]
    }
}

impl<I, T> IndexMut<usize> for Program<I, T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.functions[index]
    }
}

/// A program plus its age in generations.
///
/// Age does not take part in equality: two genomes with the same program are
/// the same genotype regardless of how long they have been around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genome<I, T> {
    pub program: Program<I, T>,
    age: usize,
}

impl<I, T> Genome<I, T> {
    pub fn new(program: Program<I, T>) -> Self {
        Self { program, age: 0 }
    }

    pub fn age(&self) -> usize {
        self.age
    }

    pub fn set_age(&mut self, age: usize) {
        self.age = age;
    }

    pub fn inc_age(&mut self, amount: usize) -> usize {
        self.age += amount;
        self.age
    }
}

impl<I: PartialEq, T: PartialEq> PartialEq for Genome<I, T> {
    fn eq(&self, other: &Self) -> bool {
        self.program == other.program
    }
}

impl<I: Eq, T: Eq> Eq for Genome<I, T> {}
