//! The propagation unit flowing between nodes.

use crate::value::Context;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Facts flowing through the core only need to be identities: cloneable,
/// comparable, and orderable so their set of facts can be stored in a
/// `BTreeSet` and hashed deterministically.
pub trait FactIdentity: Clone + Eq + Ord + Hash + Debug {}
impl<T: Clone + Eq + Ord + Hash + Debug> FactIdentity for T {}

/// Assertion (`Valid`) or retraction (`Invalid`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Valid,
    Invalid,
}

impl Tag {
    pub fn is_valid(self) -> bool {
        matches!(self, Tag::Valid)
    }
}

/// The content-identity of a token: `(data, context)`, with the tag omitted.
/// Used as the memory key for every node that remembers tokens it has seen.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Info<F: FactIdentity> {
    pub data: BTreeSet<F>,
    pub context: Context,
}

impl<F: FactIdentity> Info<F> {
    pub fn to_valid_token(&self) -> Token<F> {
        Token {
            tag: Tag::Valid,
            data: self.data.clone(),
            context: self.context.clone(),
        }
    }

    pub fn to_invalid_token(&self) -> Token<F> {
        Token {
            tag: Tag::Invalid,
            data: self.data.clone(),
            context: self.context.clone(),
        }
    }
}

/// An immutable propagation packet.
#[derive(Clone, Debug)]
pub struct Token<F: FactIdentity> {
    pub tag: Tag,
    pub data: BTreeSet<F>,
    pub context: Context,
}

impl<F: FactIdentity> Token<F> {
    pub fn valid(fact: F) -> Self {
        Token {
            tag: Tag::Valid,
            data: BTreeSet::from([fact]),
            context: Context::new(),
        }
    }

    pub fn invalid(fact: F) -> Self {
        Token {
            tag: Tag::Invalid,
            data: BTreeSet::from([fact]),
            context: Context::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.tag.is_valid()
    }

    pub fn to_info(&self) -> Info<F> {
        Info {
            data: self.data.clone(),
            context: self.context.clone(),
        }
    }
}
