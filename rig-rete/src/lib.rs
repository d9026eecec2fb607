//! A RETE discrimination network for forward-chaining production rules.
//!
//! Defines the interfaces for facts, conditions, rules, working memory, and
//! conflict resolution, plus the discrimination network itself: feature
//! testers, ordinary match (join) nodes, negation nodes, and per-rule
//! terminals, wired together in [`network::Network`].
//!
//! Depends on [`rig_effects`] — rules fire actions that have effects.

#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use rig_effects::Effectful;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "derive")]
pub use rig_rete_derive::Fact;

mod error;
mod feature_tester;
mod join;
mod node;
mod not_node;
mod terminal;
mod token;
mod value;

pub mod network;

pub use error::WiringError;
pub use feature_tester::{FeatureTesterNode, MatchOutcome};
pub use join::OrdinaryMatchNode;
pub use network::{Network, NodeRef};
pub use node::{ActivationResult, Edge, NodeId, Port};
pub use not_node::NotNode;
pub use terminal::{Activation, TerminalNode};
pub use token::{FactIdentity, Info, Tag, Token};
pub use value::{Context, Value};

// ── Fact ─────────────────────────────────────────────────────────────────────

/// A fact in working memory. Represents a typed assertion about the world.
///
/// Facts are the atomic unit of belief in the BDI architecture. They are
/// immutable once asserted; updates are expressed as retract + re-assert.
///
/// # Required bounds
/// Implementors must also satisfy `Clone + Eq + Hash + Debug`.
pub trait Fact: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Unique identifier for this fact instance.
    /// Used as the key in working memory.
    type Id: Clone + Eq + Hash + Debug + Send + Sync;

    /// Return the unique identifier for this fact.
    fn id(&self) -> &Self::Id;

    /// Timestamp when this fact was asserted / last observed.
    fn timestamp(&self) -> DateTime<Utc>;
}

// ── Condition ─────────────────────────────────────────────────────────────────

/// A condition that can match against facts in working memory.
///
/// Conditions are the LHS atoms of production rules. Each condition tests a
/// single fact and, on success, produces variable bindings that flow through
/// to the rule's action generator.
pub trait Condition<F: Fact>: Send + Sync {
    /// Variable bindings produced by a successful match.
    type Bindings: Clone + Debug + Send + Sync;

    /// Test whether a fact satisfies this condition.
    ///
    /// Returns `Some(bindings)` on success, `None` on failure.
    fn matches(&self, fact: &F) -> Option<Self::Bindings>;

    /// Human-readable description for debugging and logging.
    fn description(&self) -> &str;
}

// ── Rule ─────────────────────────────────────────────────────────────────────

/// A production rule: a set of conditions (LHS) and actions to fire (RHS).
///
/// A rule is activated when **all** of its conditions are simultaneously
/// satisfied by facts in working memory. The activated conflict set is then
/// resolved by a [`ConflictStrategy`] before any rule fires.
pub trait Rule: Send + Sync {
    /// The fact type this rule operates on.
    type Fact: Fact;
    /// The action type produced when the rule fires.
    type Action: Effectful;
    /// The bindings type produced by condition matching.
    type Bindings: Clone + Debug + Send + Sync;

    /// Unique identifier for this rule (must be stable across restarts).
    fn id(&self) -> &str;

    /// The conditions that must all match for this rule to activate.
    ///
    /// An empty slice means the rule is unconditionally active (fires on every
    /// fact assertion). All conditions share the same `Bindings` type so they
    /// cooperate to build a unified binding environment.
    fn conditions(&self) -> &[Box<dyn Condition<Self::Fact, Bindings = Self::Bindings>>];

    /// The actions to execute when this rule fires, parameterised by bindings.
    fn actions(&self, bindings: &Self::Bindings) -> Vec<Self::Action>;

    /// Priority for conflict resolution. Higher value fires first when multiple
    /// rules are simultaneously activated.
    fn priority(&self) -> i32;

    /// Human-readable description of this rule's intent.
    fn description(&self) -> &str;
}

// ── RuleMatch ────────────────────────────────────────────────────────────────

/// A match result: a rule that is ready to fire with specific bindings.
///
/// Constructed by the RETE network when all conditions of a rule are satisfied.
/// Placed in the conflict set awaiting selection by a [`ConflictStrategy`].
#[derive(Debug)]
pub struct RuleMatch<R: Rule> {
    /// The activated rule.
    pub rule: R,
    /// Variable bindings produced by condition matching.
    pub bindings: R::Bindings,
    /// IDs of the facts that caused this match.
    pub matched_facts: Vec<<R::Fact as Fact>::Id>,
    /// Wall-clock time when this match was created.
    pub timestamp: DateTime<Utc>,
}

// ── WorkingMemory ─────────────────────────────────────────────────────────────

/// Working memory: the set of currently active facts.
///
/// This is the agent's belief set. It maps fact IDs to facts and provides
/// the interface through which the RETE network is notified of changes.
pub trait WorkingMemory<F: Fact>: Send + Sync {
    /// Assert a new fact into working memory.
    ///
    /// If a fact with the same ID already exists it is replaced.
    /// Returns `true` if the fact is **new** (was not already present),
    /// `false` if it replaced an existing fact.
    fn assert_fact(&mut self, fact: F) -> bool;

    /// Retract (remove) a fact from working memory by ID.
    ///
    /// Returns the removed fact if it existed, `None` otherwise.
    fn retract_fact(&mut self, id: &F::Id) -> Option<F>;

    /// Check whether a fact with the given ID is currently in memory.
    fn contains(&self, id: &F::Id) -> bool;

    /// Look up a fact by ID.
    fn get(&self, id: &F::Id) -> Option<&F>;

    /// Iterate over all facts currently in working memory.
    fn facts(&self) -> Box<dyn Iterator<Item = &F> + '_>;

    /// Number of facts currently in memory.
    fn len(&self) -> usize;

    /// Returns `true` if working memory contains no facts.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── ConflictStrategy ─────────────────────────────────────────────────────────

/// Conflict resolution strategy: when multiple rules match, pick which fires.
///
/// The strategy receives the full conflict set (all activated, unfired matches)
/// and selects at most one to fire. Returning `None` suspends firing this cycle
/// (quiescence / inhibition).
pub trait ConflictStrategy<R: Rule>: Send + Sync {
    /// Select the best match from the conflict set.
    ///
    /// Returns `None` if no rule should fire.
    fn select(&self, matches: &[RuleMatch<R>]) -> Option<&RuleMatch<R>>;
}

// ── ReteNetwork ───────────────────────────────────────────────────────────────

/// The RETE network interface.
///
/// Efficiently matches facts against rules using the RETE algorithm.
/// Maintains an internal set of activated rule matches updated incrementally
/// as facts are asserted and retracted.
///
/// The RETE algorithm itself is an implementation detail behind this trait —
/// naive linear scan, compiled networks, and parallel RETE are all valid.
pub trait ReteNetwork<F: Fact, R: Rule<Fact = F>>: Send + Sync {
    /// Add a rule to the network.
    ///
    /// The network takes ownership of the rule and begins matching it against
    /// subsequently asserted facts.
    fn add_rule(&mut self, rule: R);

    /// Remove a rule from the network by ID.
    ///
    /// Returns the removed rule if it existed, `None` otherwise. All matches
    /// derived from this rule are also removed from the activated set.
    fn remove_rule(&mut self, rule_id: &str) -> Option<R>;

    /// Notify the network that a fact was asserted into working memory.
    ///
    /// The network incrementally updates its internal state and returns any
    /// **newly** activated rule matches caused by this assertion.
    fn on_assert(&mut self, fact: &F) -> Vec<RuleMatch<R>>;

    /// Notify the network that a fact was retracted from working memory.
    ///
    /// Returns the rule matches that are **no longer valid** as a result of
    /// this retraction so callers can remove them from the conflict set.
    fn on_retract(&mut self, fact_id: &F::Id) -> Vec<RuleMatch<R>>;

    /// Get all currently activated (ready-to-fire) rule matches.
    ///
    /// This is the conflict set. Use a [`ConflictStrategy`] to select one.
    fn activated(&self) -> &[RuleMatch<R>];
}

// ── Tests ─────────────────────────────────────────────────────────────────────
