//! Negation bookkeeping: a left token is forwarded only while nothing on the
//! right matches it.

use crate::node::{ActivationResult, Edge};
use crate::token::{FactIdentity, Info, Token};
use crate::value::Context;

type Matcher = Box<dyn Fn(&Context, &Context) -> bool + Send + Sync>;

/// Tracks, per left-side entry it has seen, how many right-side entries
/// currently match it. A left token is forwarded unchanged the moment that
/// count is zero, and only a crossing of the 0/1 boundary on the right side
/// re-emits it — not every right-side change.
pub struct NotNode<F: FactIdentity> {
    matcher: Matcher,
    left_memory: Vec<(Info<F>, isize)>,
    right_memory: Vec<Info<F>>,
    children: Vec<Edge>,
}

impl<F: FactIdentity> NotNode<F> {
    pub fn new(matcher: impl Fn(&Context, &Context) -> bool + Send + Sync + 'static) -> Self {
        NotNode {
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
        let count = self
            .right_memory
            .iter()
            .filter(|right| (self.matcher)(&info.context, &right.context))
            .count() as isize;

        if token.is_valid() {
            self.left_memory.push((info, count));
        }

        tracing::trace!(count, valid = token.is_valid(), "not node left activation");

        if count == 0 {
            ActivationResult::one(self.children.clone(), token)
        } else {
            ActivationResult::none(self.children.clone())
        }
    }

    pub fn activate_right(&mut self, token: Token<F>) -> ActivationResult<F> {
        let info = token.to_info();
        let inc: isize = if token.is_valid() {
            self.right_memory.push(info.clone());
            1
        } else {
            crate::node::remove_first(&mut self.right_memory, &info);
            -1
        };

        let mut emitted = Vec::new();
        for (left_info, count) in self.left_memory.iter_mut() {
            if !(self.matcher)(&left_info.context, &info.context) {
                continue;
            }
            let new_count = *count + inc;
            if new_count == 1 && inc == 1 {
                emitted.push(left_info.to_invalid_token());
            } else if new_count == 0 && inc == -1 {
                emitted.push(left_info.to_valid_token());
            }
            *count = new_count;
        }

        tracing::trace!(
            right_memory_len = self.right_memory.len(),
            emitted = emitted.len(),
            "not node right activation"
        );

        ActivationResult::many(self.children.clone(), emitted)
    }
}
