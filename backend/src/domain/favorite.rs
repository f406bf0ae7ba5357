//! Favourite slots: the five ranked entries a user curates.
//!
//! Slot numbers double as display ranks, so slot 1 is the top pick.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Number of slots on a board.
pub const SLOT_COUNT: usize = 5;

/// Validation errors for favourite inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FavoriteValidationError {
    /// Slot number outside `1..=5`.
    #[error("slot must be between 1 and 5, got {value}")]
    SlotOutOfRange {
        /// Rejected value.
        value: i64,
    },
    /// Title blank after trimming.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Swap endpoints are not neighbours.
    #[error("slots {first} and {second} are not adjacent")]
    NotAdjacent {
        /// First slot.
        first: Slot,
        /// Second slot.
        second: Slot,
    },
}

/// Slot number in `1..=5`.
///
/// # Examples
/// ```
/// use my5::domain::Slot;
///
/// let slot = Slot::new(3).unwrap();
/// assert_eq!(slot.get(), 3);
/// assert!(Slot::new(6).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "i64", into = "u8")]
#[schema(value_type = u8)]
pub struct Slot(u8);

impl Slot {
    /// Every slot in rank order.
    pub const ALL: [Self; SLOT_COUNT] = [Self(1), Self(2), Self(3), Self(4), Self(5)];

    /// Validate a raw slot number.
    pub fn new(value: i64) -> Result<Self, FavoriteValidationError> {
        match u8::try_from(value) {
            Ok(slot @ 1..=5) => Ok(Self(slot)),
            _ => Err(FavoriteValidationError::SlotOutOfRange { value }),
        }
    }

    /// Slot number as stored and displayed.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based board index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Slot ranked immediately above, if any.
    #[must_use]
    pub const fn above(self) -> Option<Self> {
        if self.0 > 1 { Some(Self(self.0 - 1)) } else { None }
    }

    /// Slot ranked immediately below, if any.
    #[must_use]
    pub const fn below(self) -> Option<Self> {
        if self.0 < 5 { Some(Self(self.0 + 1)) } else { None }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Slot {
    type Error = FavoriteValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slot> for u8 {
    fn from(value: Slot) -> Self {
        value.0
    }
}

/// Two neighbouring slots whose contents are exchanged atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPair {
    upper: Slot,
    lower: Slot,
}

impl SlotPair {
    /// Accept `first` and `second` in either order as long as they differ by one.
    pub fn adjacent(first: Slot, second: Slot) -> Result<Self, FavoriteValidationError> {
        let (upper, lower) = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        if upper.below() == Some(lower) {
            Ok(Self { upper, lower })
        } else {
            Err(FavoriteValidationError::NotAdjacent { first, second })
        }
    }

    /// Higher-ranked slot (smaller number).
    #[must_use]
    pub const fn upper(self) -> Slot {
        self.upper
    }

    /// Lower-ranked slot (larger number).
    #[must_use]
    pub const fn lower(self) -> Slot {
        self.lower
    }
}

/// Validated content for a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteDraft {
    category: String,
    title: String,
    note: String,
}

impl FavoriteDraft {
    /// Build a draft. The title is trimmed and must be non-empty; category and
    /// note are stored as given.
    pub fn new(
        category: impl Into<String>,
        title: &str,
        note: impl Into<String>,
    ) -> Result<Self, FavoriteValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(FavoriteValidationError::EmptyTitle);
        }
        Ok(Self {
            category: category.into(),
            title: title.to_owned(),
            note: note.into(),
        })
    }

    /// Free-text category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text note.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }
}

/// Stored favourite keyed by `(user_id, slot)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Owning account.
    #[serde(skip)]
    pub user_id: UserId,
    /// Slot, which is also the displayed rank.
    pub slot: Slot,
    /// Free-text category; may be empty.
    pub category: String,
    /// Non-empty title.
    pub title: String,
    /// Free-text note; may be empty.
    pub note: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(5, true)]
    #[case(6, false)]
    #[case(-1, false)]
    #[case(300, false)]
    fn slot_range(#[case] raw: i64, #[case] accepted: bool) {
        assert_eq!(Slot::new(raw).is_ok(), accepted);
    }

    #[test]
    fn neighbours_stop_at_edges() {
        let first = Slot::new(1).expect("slot");
        let last = Slot::new(5).expect("slot");
        assert_eq!(first.above(), None);
        assert_eq!(last.below(), None);
        assert_eq!(first.below().map(Slot::get), Some(2));
    }

    #[rstest]
    #[case(1, 2, true)]
    #[case(3, 2, true)]
    #[case(1, 3, false)]
    #[case(4, 4, false)]
    fn slot_pair_requires_adjacency(#[case] a: i64, #[case] b: i64, #[case] ok: bool) {
        let pair = SlotPair::adjacent(Slot::new(a).expect("slot"), Slot::new(b).expect("slot"));
        assert_eq!(pair.is_ok(), ok);
        if let Ok(pair) = pair {
            assert!(pair.upper() < pair.lower());
        }
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn draft_rejects_blank_title(#[case] title: &str) {
        assert_eq!(
            FavoriteDraft::new("映画", title, ""),
            Err(FavoriteValidationError::EmptyTitle)
        );
    }

    #[test]
    fn draft_trims_only_the_title() {
        let draft = FavoriteDraft::new(" 音楽 ", "  Abbey Road ", " best ").expect("valid");
        assert_eq!(draft.title(), "Abbey Road");
        assert_eq!(draft.category(), " 音楽 ");
        assert_eq!(draft.note(), " best ");
    }
}
