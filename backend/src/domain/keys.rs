//! Ledger key layout.
//!
//! Every entity lives under `"<prefix>:<id>"`. A per-kind scan covers the
//! half-open range from `"<prefix>:"` to `"<prefix>:\u{ffff}"`, so an id
//! containing `:` still belongs to its kind and never leaks into another.

use std::fmt;

/// Upper sentinel appended to a prefix to close a kind's key range.
const RANGE_SENTINEL: char = '\u{ffff}';

/// The five stored document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Policy,
    Organization,
    User,
    Case,
    Record,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Policy,
        Self::Organization,
        Self::User,
        Self::Case,
        Self::Record,
    ];

    /// Key prefix, without the `:` separator.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Organization => "org",
            Self::User => "user",
            Self::Case => "case",
            Self::Record => "record",
        }
    }

    /// Value of the `docType` discriminator stored in each document.
    pub const fn doc_type(self) -> &'static str {
        self.prefix()
    }

    /// Noun used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            other => other.prefix(),
        }
    }

    /// Key range holding every document of this kind.
    pub fn range(self) -> KeyRange {
        KeyRange::for_kind(self)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full ledger key for one entity.
///
/// # Examples
/// ```
/// use cdms::domain::{EntityKind, LedgerKey};
///
/// let key = LedgerKey::new(EntityKind::Organization, "OrgA");
/// assert_eq!(key.as_str(), "org:OrgA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedgerKey(String);

impl LedgerKey {
    /// Compose the key for `id` under `kind`'s prefix.
    pub fn new(kind: EntityKind, id: &str) -> Self {
        Self(format!("{}:{id}", kind.prefix()))
    }

    /// Borrow the raw key.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for LedgerKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Half-open key range `[start, end)` compared bytewise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    start: String,
    end: String,
}

impl KeyRange {
    /// Range covering every key of `kind`.
    pub fn for_kind(kind: EntityKind) -> Self {
        let prefix = kind.prefix();
        Self {
            start: format!("{prefix}:"),
            end: format!("{prefix}:{RANGE_SENTINEL}"),
        }
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Whether `key` falls inside the range.
    pub fn contains(&self, key: &str) -> bool {
        key >= self.start.as_str() && key < self.end.as_str()
    }
}
