//! Physics categories and their interaction tables
//!
//! A body is pushed by another body when its category lists the other in
//! [`PhysicsCategory::collides_with`]. A contact-begin event is reported for a
//! pair when either side lists the other in [`PhysicsCategory::contacts_with`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicsCategory {
    Skater,
    Brick,
    /// Reserved for collectibles, nothing spawns these yet
    Gem,
}

impl PhysicsCategory {
    /// Categories that physically push a body of this category
    pub fn collides_with(self) -> &'static [PhysicsCategory] {
        match self {
            PhysicsCategory::Skater => &[PhysicsCategory::Brick],
            PhysicsCategory::Brick => &[],
            PhysicsCategory::Gem => &[],
        }
    }

    /// Categories whose contact with this one should be reported
    pub fn contacts_with(self) -> &'static [PhysicsCategory] {
        match self {
            PhysicsCategory::Skater => &[PhysicsCategory::Brick, PhysicsCategory::Gem],
            PhysicsCategory::Brick => &[],
            PhysicsCategory::Gem => &[],
        }
    }

    /// Whether `self` is pushed out of `other` on overlap
    pub fn is_pushed_by(self, other: PhysicsCategory) -> bool {
        self.collides_with().contains(&other)
    }

    /// Whether touching `other` raises a contact event
    pub fn reports_contact(self, other: PhysicsCategory) -> bool {
        self.contacts_with().contains(&other) || other.contacts_with().contains(&self)
    }
}
