//! One-input filter and binding extractor.

use crate::error::WiringError;
use crate::node::{ActivationResult, Edge};
use crate::token::{FactIdentity, Token};
use crate::value::Context;

/// The result of testing a single fact.
///
/// `Bool(false)` and an empty `Bindings` map both fail the test; `Bool(true)`
/// and a non-empty `Bindings` map both pass, the latter additionally
/// extending the token's context.
pub enum MatchOutcome {
    Bool(bool),
    Bindings(Context),
}

impl MatchOutcome {
    fn is_pass(&self) -> bool {
        match self {
            MatchOutcome::Bool(b) => *b,
            MatchOutcome::Bindings(m) => !m.is_empty(),
        }
    }
}

type Matcher<F> = Box<dyn Fn(&F) -> MatchOutcome + Send + Sync>;

/// Represents both "the one-input node for testing constant features" and
/// "the one-input node for testing variable bindings" from the RETE
/// literature — the same activation logic serves both, distinguished only
/// by what the matcher returns.
pub struct FeatureTesterNode<F: FactIdentity> {
    matcher: Matcher<F>,
    children: Vec<Edge>,
}

impl<F: FactIdentity> FeatureTesterNode<F> {
    pub fn new(matcher: impl Fn(&F) -> MatchOutcome + Send + Sync + 'static) -> Self {
        FeatureTesterNode {
            matcher: Box::new(matcher),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, edge: Edge) {
        self.children.push(edge);
    }

    /// Test, bind, and forward a token, or reject it.
    pub fn activate(&self, token: Token<F>) -> Result<ActivationResult<F>, WiringError> {
        if token.data.len() != 1 {
            return Err(WiringError::FeatureTesterArity {
                expected: 1,
                found: token.data.len(),
            });
        }
        let fact = token.data.iter().next().expect("checked len == 1 above");
        let outcome = (self.matcher)(fact);

        tracing::trace!(?token.tag, pass = outcome.is_pass(), "feature tester matcher result");

        if !outcome.is_pass() {
            return Ok(ActivationResult::none(self.children.clone()));
        }

        let mut context = token.context.clone();
        if let MatchOutcome::Bindings(bindings) = outcome {
            for (key, value) in &bindings {
                if let Some(existing) = context.get(key) {
                    if existing != value {
                        return Ok(ActivationResult::none(self.children.clone()));
                    }
                }
            }
            context.extend(bindings);
        }

        let forwarded = Token {
            tag: token.tag,
            data: token.data,
            context,
        };
        Ok(ActivationResult::one(self.children.clone(), forwarded))
    }
}
