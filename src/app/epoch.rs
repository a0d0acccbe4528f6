//! Request sequencing for list fetches.
//!
//! Every list request is stamped with the [`Epoch`] that was current when it was
//! issued. A query change starts a new epoch, and responses carrying an older
//! epoch are discarded on arrival. This gives "exactly one list result applied
//! per query epoch" without needing to abort requests that are already on the
//! wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation counter of the active search query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Epoch(u64);

impl Epoch {
    /// The epoch that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which in-flight slot a list request occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListKind {
    /// First page of a new epoch; replaces the list.
    Reset,
    /// Next page of the current epoch; appends to the list.
    Append,
}

/// Identity of an issued list request, echoed back with its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    pub epoch: Epoch,
    pub kind: ListKind,
}

impl RequestTicket {
    #[must_use]
    pub const fn reset(epoch: Epoch) -> Self {
        Self {
            epoch,
            kind: ListKind::Reset,
        }
    }

    #[must_use]
    pub const fn append(epoch: Epoch) -> Self {
        Self {
            epoch,
            kind: ListKind::Append,
        }
    }

    /// Returns `true` if the ticket was issued in `current`.
    #[must_use]
    pub fn is_current(&self, current: Epoch) -> bool {
        self.epoch == current
    }
}
