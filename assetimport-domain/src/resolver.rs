//! Identifier resolution: candidate key → run-local uniqueness → storage check.

use crate::aliases;
use crate::normalize::normalize_string;
use crate::ports::{AssetLookup, StoreError};
use crate::row::Row;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

/// Highest suffix tried when renumbering a generated id (`base_2` ..= `base_9999`).
pub const MAX_SUFFIX: u32 = 9999;

/// Identifiers claimed so far in one run, plus per-base row counters.
///
/// Build one per import run and pass it to every [`resolve_asset_id`] call
/// in input order.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    claimed: HashSet<String>,
    base_counts: HashMap<String, u32>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, asset_id: &str) -> bool {
        self.claimed.contains(asset_id)
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }

    /// `base` for the first row with this base, `base_N` for the Nth.
    fn next_from_base(&mut self, base: &str) -> String {
        let count = self.base_counts.entry(base.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base.to_string()
        } else {
            format!("{}_{}", base, count)
        }
    }

    /// Claim `candidate`, or `candidate_N` with the smallest free N ≥ 2.
    fn claim_unique(&mut self, candidate: String) -> String {
        let mut key = candidate.clone();
        let mut n: u64 = 2;
        while self.claimed.contains(&key) {
            key = format!("{}_{}", candidate, n);
            n += 1;
        }
        self.claimed.insert(key.clone());
        key
    }

    /// Claim `candidate`, or the smallest unclaimed `base_N` with N ≥ 2.
    fn claim_derived(&mut self, base: &str, candidate: String) -> String {
        let mut key = candidate;
        let mut n: u64 = 2;
        while self.claimed.contains(&key) {
            key = format!("{}_{}", base, n);
            n += 1;
        }
        self.claimed.insert(key.clone());
        key
    }
}

/// Where a candidate key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOrigin {
    /// Taken from an `asset_id` column.
    Explicit,
    /// Generated from the row's `permanent_id`.
    Derived { base: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateReason {
    /// An explicit id that already exists in storage.
    Exists,
    /// Every suffix up to [`MAX_SUFFIX`] is taken for this base.
    NoFreeSuffix { base: String },
}

/// Storage could not be read while resolving `asset_id`.
#[derive(Debug, Error)]
#[error("lookup failed for asset_id={asset_id}: {source}")]
pub struct ResolveError {
    /// Key being checked when the lookup failed.
    pub asset_id: String,
    #[source]
    pub source: StoreError,
}

/// Decision for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Import {
        asset_id: String,
        origin: KeyOrigin,
    },
    Duplicate {
        asset_id: String,
        reason: DuplicateReason,
    },
    /// No explicit id and no `permanent_id` to derive one from.
    MissingId,
}

/// Resolve the final `asset_id` for `row`.
///
/// `permanent_id` is the identifier base produced by the normalizer. Storage
/// is only read, never written; a read failure is returned as a
/// [`ResolveError`] naming the key being checked, and the caller decides how
/// to count it. Rows without any identifier return
/// [`Resolution::MissingId`] without touching storage.
pub async fn resolve_asset_id(
    state: &mut RunState,
    row: &Row,
    permanent_id: Option<&str>,
    lookup: &dyn AssetLookup,
) -> Result<Resolution, ResolveError> {
    let explicit = row
        .first_value(aliases::ASSET_ID)
        .and_then(normalize_string);

    let (candidate, origin) = match (explicit, permanent_id) {
        (Some(id), _) => (id, KeyOrigin::Explicit),
        (None, Some(base)) => (
            state.next_from_base(base),
            KeyOrigin::Derived {
                base: base.to_string(),
            },
        ),
        (None, None) => return Ok(Resolution::MissingId),
    };

    let asset_id = match &origin {
        KeyOrigin::Explicit => state.claim_unique(candidate),
        KeyOrigin::Derived { base } => state.claim_derived(base, candidate),
    };

    if !exists(lookup, &asset_id).await? {
        return Ok(Resolution::Import { asset_id, origin });
    }

    match origin {
        KeyOrigin::Explicit => Ok(Resolution::Duplicate {
            asset_id,
            reason: DuplicateReason::Exists,
        }),
        KeyOrigin::Derived { base } => match find_free_suffix(state, &base, lookup).await? {
            Some(renumbered) => {
                debug!(from = %asset_id, to = %renumbered, "renumbered generated asset_id");
                state.claimed.insert(renumbered.clone());
                Ok(Resolution::Import {
                    asset_id: renumbered,
                    origin: KeyOrigin::Derived { base },
                })
            }
            None => Ok(Resolution::Duplicate {
                asset_id,
                reason: DuplicateReason::NoFreeSuffix { base },
            }),
        },
    }
}

/// Smallest `base_N` (2 ≤ N ≤ [`MAX_SUFFIX`]) that is neither claimed in
/// this run nor present in storage.
async fn find_free_suffix(
    state: &RunState,
    base: &str,
    lookup: &dyn AssetLookup,
) -> Result<Option<String>, ResolveError> {
    for n in 2..=MAX_SUFFIX {
        let candidate = format!("{}_{}", base, n);
        if state.is_claimed(&candidate) {
            continue;
        }
        if !exists(lookup, &candidate).await? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

async fn exists(lookup: &dyn AssetLookup, asset_id: &str) -> Result<bool, ResolveError> {
    lookup
        .exists(asset_id)
        .await
        .map_err(|source| ResolveError {
            asset_id: asset_id.to_string(),
            source,
        })
}
