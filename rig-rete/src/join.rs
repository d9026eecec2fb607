//! Two-input positive join.

use crate::node::{ActivationResult, Edge};
use crate::token::{FactIdentity, Info, Tag, Token};
use crate::value::Context;

type Matcher = Box<dyn Fn(&Context, &Context) -> bool + Send + Sync>;

/// Joins two streams of tokens on a matcher over their contexts, emitting a
/// combined token for every pair that agrees.
///
/// The matcher always receives `(left_context, right_context)` regardless of
/// which side activated — a right-side activation swaps its own context into
/// the second argument before calling it.
pub struct OrdinaryMatchNode<F: FactIdentity> {
    matcher: Matcher,
    left_memory: Vec<Info<F>>,
    right_memory: Vec<Info<F>>,
    children: Vec<Edge>,
}

impl<F: FactIdentity> OrdinaryMatchNode<F> {
    pub fn new(matcher: impl Fn(&Context, &Context) -> bool + Send + Sync + 'static) -> Self {
        OrdinaryMatchNode {
            matcher: Box::new(matcher),
            left_memory: Vec::new(),
            right_memory: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, edge: Edge) {
        self.children.push(edge);
    }

    pub fn reset(&mut self) {
        self.left_memory.clear();
        self.right_memory.clear();
    }

    pub fn activate_left(&mut self, token: Token<F>) -> ActivationResult<F> {
        let info = token.to_info();
        if token.is_valid() {
            self.left_memory.push(info.clone());
        } else {
            crate::node::remove_first(&mut self.left_memory, &info);
        }

        let emitted = self
            .right_memory
            .iter()
            .filter(|right| (self.matcher)(&info.context, &right.context))
            .map(|right| combine(token.tag, &info, right))
            .collect();

        tracing::trace!(
            left_memory_len = self.left_memory.len(),
            right_memory_len = self.right_memory.len(),
            "ordinary match left activation"
        );

        ActivationResult::many(self.children.clone(), emitted)
    }

    pub fn activate_right(&mut self, token: Token<F>) -> ActivationResult<F> {
        let info = token.to_info();
        if token.is_valid() {
            self.right_memory.push(info.clone());
        } else {
            crate::node::remove_first(&mut self.right_memory, &info);
        }

        let emitted = self
            .left_memory
            .iter()
            .filter(|left| (self.matcher)(&left.context, &info.context))
            .map(|left| combine(token.tag, left, &info))
            .collect();

        tracing::trace!(
            left_memory_len = self.left_memory.len(),
            right_memory_len = self.right_memory.len(),
            "ordinary match right activation"
        );

        ActivationResult::many(self.children.clone(), emitted)
    }
}

fn combine<F: FactIdentity>(tag: Tag, left: &Info<F>, right: &Info<F>) -> Token<F> {
    let mut data = left.data.clone();
    data.extend(right.data.iter().cloned());
    let mut context = left.context.clone();
    context.extend(right.context.clone());
    Token { tag, data, context }
}
