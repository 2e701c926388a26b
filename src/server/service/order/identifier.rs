//! Collision-free order and coupon identifier generation.
//!
//! Identifiers are produced by rejection sampling: a random candidate is drawn and checked
//! against the persisted orders and against identifiers already handed out by the same
//! generator, repeating until a free one is found or the attempt bound is hit.

use std::{collections::HashSet, fmt};

use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::server::{
    data::order::OrderRepository,
    error::{order::OrderError, Error},
};

/// Characters identifiers draw their random suffix from.
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default bound on candidates drawn before giving up.
pub const MAX_GENERATION_ATTEMPTS: u32 = 1000;

/// Source of identifier candidates, replaceable to make collisions deterministic.
pub type CandidateSource = fn(IdentifierKind) -> String;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
    /// `NMCF` followed by 4 random characters
    OrderId,
    /// `CX` followed by 7 random characters
    CouponCode,
}

impl IdentifierKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::OrderId => "NMCF",
            Self::CouponCode => "CX",
        }
    }

    pub fn random_len(&self) -> usize {
        match self {
            Self::OrderId => 4,
            Self::CouponCode => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OrderId => "order ID",
            Self::CouponCode => "coupon code",
        }
    }

    /// Whether `value` has the shape of an identifier of this kind
    pub fn matches(&self, value: &str) -> bool {
        value.strip_prefix(self.prefix()).is_some_and(|suffix| {
            suffix.len() == self.random_len()
                && suffix.bytes().all(|b| CHARSET.contains(&b))
        })
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Draws a random identifier of the given kind without checking for collisions.
pub fn random_identifier(kind: IdentifierKind) -> String {
    let mut rng = rand::rng();

    let suffix: String = (0..kind.random_len())
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect();

    format!("{}{}", kind.prefix(), suffix)
}

/// Generates identifiers unique across persisted orders and everything this generator has
/// already returned.
///
/// A generator is meant to live for one batch so that two rows of the same upload can never
/// receive the same identifier, even before either is persisted.
pub struct IdentifierGenerator {
    claimed: HashSet<String>,
    candidate_source: CandidateSource,
    max_attempts: u32,
}

impl IdentifierGenerator {
    pub fn new() -> Self {
        Self {
            claimed: HashSet::new(),
            candidate_source: random_identifier,
            max_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }

    pub fn with_candidate_source(mut self, candidate_source: CandidateSource) -> Self {
        self.candidate_source = candidate_source;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Returns the first free candidate of `kind`, checked against the orders visible on `db`
    ///
    /// # Returns
    /// - `Ok(String)` - Identifier that is neither persisted nor previously claimed
    /// - `Err(Error::OrderError(OrderError::GenerationExhausted))` - No free candidate within
    ///   the attempt bound
    /// - `Err(Error::DbErr)` - Existence lookup failed
    pub async fn generate<C: ConnectionTrait>(
        &mut self,
        db: &C,
        kind: IdentifierKind,
    ) -> Result<String, Error> {
        let order_repo = OrderRepository::new(db);

        for _ in 0..self.max_attempts {
            let candidate = (self.candidate_source)(kind);
            if self.claimed.contains(&candidate) {
                continue;
            }

            let exists = match kind {
                IdentifierKind::OrderId => order_repo.order_id_exists(&candidate).await?,
                IdentifierKind::CouponCode => order_repo.coupon_code_exists(&candidate).await?,
            };

            if !exists {
                self.claimed.insert(candidate.clone());
                return Ok(candidate);
            }
        }

        Err(OrderError::GenerationExhausted {
            kind: kind.label(),
            attempts: self.max_attempts,
        }
        .into())
    }

    pub async fn generate_order_id<C: ConnectionTrait>(&mut self, db: &C) -> Result<String, Error> {
        self.generate(db, IdentifierKind::OrderId).await
    }

    pub async fn generate_coupon_code<C: ConnectionTrait>(
        &mut self,
        db: &C,
    ) -> Result<String, Error> {
        self.generate(db, IdentifierKind::CouponCode).await
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::new()
    }
}
