//! The discrimination network: owns every node in an arena and drives
//! propagation from fact assertion/retraction down to rule activations.

use crate::error::WiringError;
use crate::feature_tester::FeatureTesterNode;
use crate::join::OrdinaryMatchNode;
use crate::node::{Edge, NodeId, Port};
use crate::not_node::NotNode;
use crate::terminal::{Activation, TerminalNode};
use crate::token::{FactIdentity, Token};
use crate::value::Context;
use std::fmt::Debug;

/// Where a wire originates: the root that sees every asserted/retracted
/// fact, or a specific node already in the arena.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef {
    Bus,
    Node(NodeId),
}

enum NodeKind<F: FactIdentity, R: Clone + Debug> {
    FeatureTester(FeatureTesterNode<F>),
    OrdinaryMatch(OrdinaryMatchNode<F>),
    Not(NotNode<F>),
    Terminal(TerminalNode<F, R>),
}

/// A RETE discrimination network over facts of type `F` for rules
/// identified by an opaque `R`.
///
/// Nodes are addressed by [`NodeId`] and own no back-references to their
/// parents, which keeps the arena a DAG by construction: a cycle would
/// require a node to hold a [`NodeId`] of something not yet built.
pub struct Network<F: FactIdentity, R: Clone + Debug> {
    bus_children: Vec<Edge>,
    nodes: Vec<NodeKind<F, R>>,
}

impl<F: FactIdentity, R: Clone + Debug> Default for Network<F, R> {
    fn default() -> Self {
        Network {
            bus_children: Vec::new(),
            nodes: Vec::new(),
        }
    }
}

impl<F: FactIdentity, R: Clone + Debug> Network<F, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_feature_tester(
        &mut self,
        matcher: impl Fn(&F) -> crate::feature_tester::MatchOutcome + Send + Sync + 'static,
    ) -> NodeId {
        self.push(NodeKind::FeatureTester(FeatureTesterNode::new(matcher)))
    }

    pub fn add_ordinary_match(
        &mut self,
        matcher: impl Fn(&Context, &Context) -> bool + Send + Sync + 'static,
    ) -> NodeId {
        self.push(NodeKind::OrdinaryMatch(OrdinaryMatchNode::new(matcher)))
    }

    pub fn add_not(
        &mut self,
        matcher: impl Fn(&Context, &Context) -> bool + Send + Sync + 'static,
    ) -> NodeId {
        self.push(NodeKind::Not(NotNode::new(matcher)))
    }

    pub fn add_terminal(&mut self, rule: R) -> NodeId {
        self.push(NodeKind::Terminal(TerminalNode::new(rule)))
    }

    fn push(&mut self, kind: NodeKind<F, R>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(kind);
        id
    }

    /// Wires `child` as a successor of `parent`, delivered on `port`.
    ///
    /// Panics if `parent` names a terminal (terminals have no children) or
    /// an out-of-range id — both are wiring mistakes made at network
    /// construction time, not runtime data errors.
    pub fn add_child(&mut self, parent: NodeRef, child: NodeId, port: Port) {
        let edge = Edge {
            target: child,
            port,
        };
        match parent {
            NodeRef::Bus => self.bus_children.push(edge),
            NodeRef::Node(id) => match &mut self.nodes[id.0 as usize] {
                NodeKind::FeatureTester(n) => n.add_child(edge),
                NodeKind::OrdinaryMatch(n) => n.add_child(edge),
                NodeKind::Not(n) => n.add_child(edge),
                NodeKind::Terminal(_) => panic!("terminal node {:?} cannot have children", id),
            },
        }
    }

    /// Asserts a fact: builds a valid token and pushes it through the
    /// network from the root.
    pub fn add_fact(&mut self, fact: F) -> Result<(), WiringError> {
        self.dispatch_from_bus(Token::valid(fact))
    }

    /// Retracts a fact: builds an invalid token and pushes it through the
    /// network the same way assertion does. Retracting a fact the network
    /// never saw is a no-op, not an error.
    pub fn remove_fact(&mut self, fact: F) -> Result<(), WiringError> {
        self.dispatch_from_bus(Token::invalid(fact))
    }

    fn dispatch_from_bus(&mut self, token: Token<F>) -> Result<(), WiringError> {
        tracing::debug!(valid = token.is_valid(), "fact entering network");
        for edge in self.bus_children.clone() {
            self.propagate(edge.target, edge.port, token.clone())?;
        }
        Ok(())
    }

    /// Delivers `token` to `node` on `port`, then recursively delivers
    /// whatever that node emits to its own children. Every descendant of one
    /// emitted token is fully propagated before the next emitted token (or
    /// the next sibling child) is considered, matching the order a rule
    /// author would expect from reading the network top to bottom.
    fn propagate(&mut self, node: NodeId, port: Port, token: Token<F>) -> Result<(), WiringError> {
        let result = match &mut self.nodes[node.0 as usize] {
            NodeKind::FeatureTester(n) => n.activate(token)?,
            NodeKind::OrdinaryMatch(n) => match port {
                Port::Left => n.activate_left(token),
                Port::Right => n.activate_right(token),
                Port::Single => panic!("ordinary match node {:?} received a Single-port token", node),
            },
            NodeKind::Not(n) => match port {
                Port::Left => n.activate_left(token),
                Port::Right => n.activate_right(token),
                Port::Single => panic!("not node {:?} received a Single-port token", node),
            },
            NodeKind::Terminal(n) => {
                n.activate(token);
                return Ok(());
            }
        };

        for emitted in result.emitted {
            for edge in &result.children {
                self.propagate(edge.target, edge.port, emitted.clone())?;
            }
        }
        Ok(())
    }

    /// Clears every node's memory while leaving the wiring intact.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            match node {
                NodeKind::FeatureTester(_) => {}
                NodeKind::OrdinaryMatch(n) => n.reset(),
                NodeKind::Not(n) => n.reset(),
                NodeKind::Terminal(n) => n.reset(),
            }
        }
    }

    /// Reads the current set of rule matches held by a terminal.
    ///
    /// Panics if `terminal` does not name a terminal node.
    pub fn get_activations(&self, terminal: NodeId) -> Vec<Activation<F, R>> {
        match &self.nodes[terminal.0 as usize] {
            NodeKind::Terminal(n) => n.get_activations(),
            _ => panic!("node {:?} is not a terminal", terminal),
        }
    }
}
