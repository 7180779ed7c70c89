//! Enter/stay/exit bookkeeping for overlaps observed once per physics tick.

use crate::types::{ColliderId, ColliderKind, ColliderTag};
use std::collections::BTreeSet;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    Enter,
    Stay,
    Exit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContactEvent {
    pub collider: ColliderId,
    pub tag: ColliderTag,
    pub kind: ColliderKind,
    pub phase: ContactPhase,
}

/// Turns per-tick overlap sets into phase-tagged events.
#[derive(Clone, Debug, Default)]
pub struct ContactTracker {
    touching: BTreeSet<ColliderId>,
    tags: Vec<(ColliderId, ColliderTag, ColliderKind)>,
}

impl ContactTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this tick's overlaps and return events ordered by collider id,
    /// exits after enters and stays.
    pub fn update(
        &mut self,
        current: impl IntoIterator<Item = (ColliderId, ColliderTag, ColliderKind)>,
    ) -> Vec<ContactEvent> {
        let current: Vec<_> = current.into_iter().collect();
        let now: BTreeSet<ColliderId> = current.iter().map(|&(id, _, _)| id).collect();

        let mut events: Vec<ContactEvent> = current
            .iter()
            .map(|&(collider, tag, kind)| ContactEvent {
                collider,
                tag,
                kind,
                phase: if self.touching.contains(&collider) {
                    ContactPhase::Stay
                } else {
                    ContactPhase::Enter
                },
            })
            .collect();
        events.sort_by_key(|e| e.collider);

        for &(collider, tag, kind) in &self.tags {
            if !now.contains(&collider) {
                events.push(ContactEvent { collider, tag, kind, phase: ContactPhase::Exit });
            }
        }

        self.touching = now;
        self.tags = current;
        events
    }

    /// Forget every contact, e.g. after teleporting the body.
    pub fn clear(&mut self) {
        self.touching.clear();
        self.tags.clear();
    }

    #[must_use]
    pub fn is_touching(&self, collider: ColliderId) -> bool {
        self.touching.contains(&collider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL: (ColliderId, ColliderTag, ColliderKind) =
        (ColliderId(4), ColliderTag::Boundary, ColliderKind::Solid);

    #[test]
    fn enter_then_stay_then_exit() {
        let mut tracker = ContactTracker::new();
        let first = tracker.update([WALL]);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].phase, ContactPhase::Enter);

        let second = tracker.update([WALL]);
        assert_eq!(second[0].phase, ContactPhase::Stay);

        let third = tracker.update([]);
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].phase, ContactPhase::Exit);
        assert!(!tracker.is_touching(WALL.0));
    }

    #[test]
    fn clear_makes_next_contact_an_enter() {
        let mut tracker = ContactTracker::new();
        tracker.update([WALL]);
        tracker.clear();
        assert_eq!(tracker.update([WALL])[0].phase, ContactPhase::Enter);
    }
}
