//! Per-rule sink: remembers every binding currently satisfying one rule.

use crate::token::{FactIdentity, Info, Token};
use crate::value::Context;
use std::fmt::Debug;

/// One live match of a rule: the facts and bindings that satisfy it right
/// now. Independent of the memory entry it was read from — mutating the
/// network afterwards does not change a previously returned `Activation`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activation<F: FactIdentity, R: Clone + Debug> {
    pub rule: R,
    pub facts: Vec<F>,
    pub bindings: Context,
}

/// The sink at the end of a rule's condition chain. `R` is an opaque,
/// caller-supplied reference to the rule this terminal belongs to — the
/// core only clones and compares it, never inspects it.
pub struct TerminalNode<F: FactIdentity, R: Clone + Debug> {
    rule: R,
    memory: Vec<Info<F>>,
}

impl<F: FactIdentity, R: Clone + Debug> TerminalNode<F, R> {
    pub fn new(rule: R) -> Self {
        TerminalNode {
            rule,
            memory: Vec::new(),
        }
    }

    pub fn activate(&mut self, token: Token<F>) {
        let info = token.to_info();
        if token.is_valid() {
            if !self.memory.contains(&info) {
                self.memory.push(info);
            }
        } else {
            crate::node::remove_first(&mut self.memory, &info);
        }

        tracing::debug!(
            rule = ?self.rule,
            active_matches = self.memory.len(),
            "rule match set changed"
        );
    }

    pub fn reset(&mut self) {
        self.memory.clear();
    }

    pub fn get_activations(&self) -> Vec<Activation<F, R>> {
        self.memory
            .iter()
            .map(|info| Activation {
                rule: self.rule.clone(),
                facts: info.data.iter().cloned().collect(),
                bindings: info.context.clone(),
            })
            .collect()
    }
}
