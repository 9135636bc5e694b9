// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

/// The kind of an open container scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// An object, opened by `{`.
    Object,
    /// An array, opened by `[`.
    Array,
}

impl ContainerKind {
    /// The character that opens this kind of container.
    pub fn opening(self) -> char {
        match self {
            ContainerKind::Object => '{',
            ContainerKind::Array => '[',
        }
    }

    /// The character that closes this kind of container.
    pub fn closing(self) -> char {
        match self {
            ContainerKind::Object => '}',
            ContainerKind::Array => ']',
        }
    }
}

/// Keeps track of the nesting of objects and arrays.
#[derive(Debug, Clone, Default)]
pub(crate) struct ContainerStack {
    stack: Vec<ContainerKind>,
}

impl ContainerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ContainerKind) {
        self.stack.push(kind);
    }

    /// Pops the innermost scope. Popping an empty stack is a no-op.
    pub fn pop(&mut self) -> Option<ContainerKind> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<ContainerKind> {
        self.stack.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_object(&self) -> bool {
        self.top() == Some(ContainerKind::Object)
    }
}
