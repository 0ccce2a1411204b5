use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// FieldId
///
/// Stable identifier for a configured grid column or form field, used by
/// UI diffing. Never reused within a configuration lifetime.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct FieldId(u32);

///
/// IdArena
///
/// Monotonic allocator scoped to one configuration lifetime. Clearing a
/// field list does not reset the arena; only a full configuration reset
/// (entity change) does. That guarantees ids freed by `clear` are never
/// handed out again in the same session.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IdArena {
    next: u32,
}

impl IdArena {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    pub const fn alloc(&mut self) -> FieldId {
        let id = FieldId(self.next);
        self.next += 1;

        id
    }

    /// Restart allocation; valid only on full configuration reset.
    pub const fn reset(&mut self) {
        self.next = 0;
    }

    /// Move the watermark past `id`, for snapshot imports.
    pub const fn seed_past(&mut self, id: FieldId) {
        if id.0 >= self.next {
            self.next = id.0 + 1;
        }
    }
}
