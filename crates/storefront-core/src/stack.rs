//! # Stack Module
//!
//! A last-in-first-out container bounded only by memory.
//!
//! ```text
//!   push(3) ──►  ┌───┐  ◄── peek() / pop()
//!                │ 3 │  top
//!                ├───┤
//!                │ 2 │
//!                ├───┤
//!                │ 1 │  bottom
//!                └───┘
//! ```
//!
//! `pop` and `peek` on an empty stack return [`StackError::Empty`] and leave
//! the stack as it was. Single owner, no interior mutability.

use crate::error::StackError;

/// LIFO stack backed by a `Vec`.
///
/// ## Example
/// ```rust
/// use storefront_core::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(1);
/// stack.push(2);
///
/// assert_eq!(stack.pop(), Ok(2));
/// assert_eq!(stack.size(), 1);
/// assert_eq!(stack.peek(), Ok(&1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    /// Pushes an item onto the top. Always succeeds.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the top item.
    pub fn pop(&mut self) -> Result<T, StackError> {
        self.items.pop().ok_or(StackError::Empty)
    }

    /// Returns the top item without removing it.
    pub fn peek(&self) -> Result<&T, StackError> {
        self.items.last().ok_or(StackError::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items currently on the stack.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Removes every item. Calling it on an empty stack is a no-op.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Stack::new()
    }
}

/// Pushes items in iteration order, so the last item ends up on top.
impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Stack {
            items: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn stack() -> Stack<i32> {
        Stack::new()
    }

    #[rstest]
    fn test_push_adds_an_item(mut stack: Stack<i32>) {
        stack.push(1);

        assert_eq!(stack.size(), 1);
    }

    #[rstest]
    fn test_pop_returns_top_item(mut stack: Stack<i32>) {
        stack.push(1);
        stack.push(2);

        let popped = stack.pop();

        assert_eq!(popped, Ok(2));
        assert_eq!(stack.size(), 1);
    }

    #[rstest]
    fn test_pop_on_empty_stack_fails(mut stack: Stack<i32>) {
        let err = stack.pop().unwrap_err();

        assert_eq!(err, StackError::Empty);
        assert!(err.to_string().to_lowercase().contains("empty"));
        assert_eq!(stack.size(), 0);
    }

    #[rstest]
    fn test_peek_leaves_top_item_in_place(mut stack: Stack<i32>) {
        stack.push(1);
        stack.push(2);

        assert_eq!(stack.peek(), Ok(&2));
        assert_eq!(stack.size(), 2);
    }

    #[rstest]
    fn test_peek_on_empty_stack_fails(stack: Stack<i32>) {
        assert_eq!(stack.peek(), Err(StackError::Empty));
    }

    #[rstest]
    fn test_is_empty(mut stack: Stack<i32>) {
        assert!(stack.is_empty());

        stack.push(1);
        assert!(!stack.is_empty());
    }

    #[rstest]
    fn test_clear_removes_everything(mut stack: Stack<i32>) {
        stack.push(1);
        stack.push(2);

        stack.clear();
        assert_eq!(stack.size(), 0);

        // Idempotent
        stack.clear();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_size_tracks_pushes_minus_pops() {
        let mut stack = Stack::new();
        for i in 0..10 {
            stack.push(i);
        }
        for _ in 0..4 {
            stack.pop().unwrap();
        }
        // Failed pops on an empty stack never count
        let mut drained = Stack::<u8>::default();
        assert!(drained.pop().is_err());
        assert_eq!(drained.size(), 0);

        assert_eq!(stack.size(), 6);
        assert_eq!(stack.peek(), Ok(&5));
    }

    #[test]
    fn test_from_iterator_puts_last_item_on_top() {
        let mut stack: Stack<&str> = ["a", "b", "c"].into_iter().collect();

        assert_eq!(stack.pop(), Ok("c"));
        assert_eq!(stack.pop(), Ok("b"));
        assert_eq!(stack.pop(), Ok("a"));
        assert_eq!(stack.pop(), Err(StackError::Empty));
    }
}
