//! Fixed five-slot projection of a user's favourites.

use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use super::favorite::SLOT_COUNT;
use super::{Favorite, Slot};

/// Five optional favourites indexed by `slot - 1`.
///
/// # Examples
/// ```
/// use my5::domain::{Slot, SlotBoard};
///
/// let board = SlotBoard::from_rows(Vec::new());
/// assert!(board.is_empty());
/// assert!(board.get(Slot::new(1).unwrap()).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotBoard {
    slots: [Option<Favorite>; SLOT_COUNT],
}

impl SlotBoard {
    /// Project rows into slots. A later row for an already-filled slot
    /// replaces the earlier one.
    #[must_use]
    pub fn from_rows(rows: Vec<Favorite>) -> Self {
        let mut board = Self::default();
        for favorite in rows {
            let slot = favorite.slot;
            if let Some(cell) = board.slots.get_mut(slot.index()) {
                if let Some(previous) = cell.replace(favorite) {
                    warn!(
                        slot = slot.get(),
                        replaced = %previous.title,
                        "duplicate favourite row for slot; keeping the later one"
                    );
                }
            }
        }
        board
    }

    /// Favourite in `slot`, if filled.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Favorite> {
        self.slots.get(slot.index()).and_then(Option::as_ref)
    }

    /// Filled slots in rank order.
    pub fn filled(&self) -> impl Iterator<Item = &Favorite> {
        self.slots.iter().flatten()
    }

    /// Number of filled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filled().count()
    }

    /// Whether every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// A filled slot can move up when the slot above is filled too.
    #[must_use]
    pub fn can_swap_up(&self, slot: Slot) -> bool {
        self.get(slot).is_some() && slot.above().is_some_and(|above| self.get(above).is_some())
    }

    /// A filled slot can move down when the slot below is filled too.
    #[must_use]
    pub fn can_swap_down(&self, slot: Slot) -> bool {
        self.get(slot).is_some() && slot.below().is_some_and(|below| self.get(below).is_some())
    }

    /// Per-slot view with swap affordances, in rank order.
    #[must_use]
    pub fn cells(&self) -> Vec<SlotCell> {
        Slot::ALL
            .into_iter()
            .map(|slot| SlotCell {
                slot,
                favorite: self.get(slot).cloned(),
                can_swap_up: self.can_swap_up(slot),
                can_swap_down: self.can_swap_down(slot),
            })
            .collect()
    }
}

/// One rendered slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotCell {
    /// Slot number.
    pub slot: Slot,
    /// Content, absent for empty slots.
    pub favorite: Option<Favorite>,
    /// Whether an "up" control is offered.
    pub can_swap_up: bool,
    /// Whether a "down" control is offered.
    pub can_swap_down: bool,
}
