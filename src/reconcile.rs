//! Card reconciliation against the trick store.
//!
//! Each incoming card maps to at most one write: either a single difficulty
//! column update on an existing trick, or the insert of a new trick with one
//! column set. Stance prefixes ("Fakie ", "Switch ", "Nollie ") pick the
//! column and are stripped from the stored name.
//!
//! Board naming is inconsistent: some boards carry stance-prefixed names that
//! already exist verbatim in the store, others rely on us to strip the prefix.
//! So the store is probed with the raw name first and only classified when
//! that misses; an exact hit is written to the base column of that row.

use crate::db::Database;
use crate::error::SyncError;
use crate::types::{
    parse_difficulty, IncomingCard, StanceColumn, TrickRecord, WriteOutcome, WriteResult,
};
use anyhow::Result;
use tracing::debug;

/// Stance prefixes in match order.
const STANCE_PREFIXES: [(&str, StanceColumn); 3] = [
    ("fakie ", StanceColumn::Fakie),
    ("switch ", StanceColumn::Switch),
    ("nollie ", StanceColumn::Nollie),
];

/// Split a card name into its stance-free name and the column it rates.
///
/// Prefix matching is case-insensitive and the first match wins. Names
/// without a known prefix are returned unchanged with [`StanceColumn::Base`].
pub fn classify(card_name: &str) -> (&str, StanceColumn) {
    for (prefix, column) in STANCE_PREFIXES {
        let len = prefix.len();
        if card_name.len() >= len
            && card_name.is_char_boundary(len)
            && card_name[..len].eq_ignore_ascii_case(prefix)
        {
            return (&card_name[len..], column);
        }
    }
    (card_name, StanceColumn::Base)
}

/// Reconcile one card into the store under `category`.
///
/// The card's list identifier is parsed with the null-sentinel policy; a
/// sentinel writes `NULL` into the selected column.
pub fn reconcile(
    db: &Database,
    card: &IncomingCard,
    category: &str,
    null_sentinels: &[String],
) -> Result<WriteResult> {
    let rating = parse_difficulty(&card.list_identifier, null_sentinels)
        .map_err(|raw| SyncError::invalid_difficulty("list", &raw))?;

    // Probe 1: the raw name, before any prefix handling.
    let exact = db.find_trick(&card.name, category)?;

    let (name, column, existing) = match exact {
        Some(record) => (card.name.as_str(), StanceColumn::Base, Some(record)),
        None => {
            let (stripped, column) = classify(&card.name);
            // Probe 2: the stance-free name.
            let existing = db.find_trick(stripped, category)?;
            (stripped, column, existing)
        }
    };

    let outcome = match existing {
        Some(_) => {
            db.set_difficulty(name, category, column, rating)?;
            WriteOutcome::Updated
        }
        None => {
            let mut record = TrickRecord::new(name, category);
            record.set(column, rating);
            db.insert_trick(&record)?;
            WriteOutcome::Added
        }
    };

    debug!(
        card = %card.name,
        name = %name,
        category = %category,
        column = %column,
        rating = ?rating,
        outcome = ?outcome,
        "Card reconciled"
    );

    Ok(WriteResult {
        outcome,
        name: name.to_string(),
        category: category.to_string(),
        column,
    })
}
