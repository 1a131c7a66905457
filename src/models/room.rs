//! Room model.

use serde::{Deserialize, Serialize};

/// Room identifier.
pub type RoomId = u32;

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Seats available. Must be at least 1.
    pub capacity: i32,
}

impl Room {
    /// Creates a new room.
    pub fn new(id: RoomId, name: impl Into<String>, capacity: i32) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
        }
    }

    /// Whether a class of `size` students fits.
    #[inline]
    pub fn fits(&self, size: i32) -> bool {
        self.capacity >= size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_fits() {
        let r = Room::new(1, "Room A", 30);
        assert!(r.fits(30));
        assert!(r.fits(1));
        assert!(!r.fits(31));
    }
}
