use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::{
    config::MAX_PIN_LENGTH,
    error::{EngineError, EngineResult},
    model::player::PlayerId,
    services::pairing::GeneratedGroup,
};

/// Random draws attempted before scanning for the lowest free PIN.
const RANDOM_ATTEMPTS: usize = 32;

/// Generated group ready for persistence, carrying its chaperone access PIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupAssignment {
    /// Sequential group number.
    pub group_number: u32,
    /// Members in placement order.
    pub members: Vec<PlayerId>,
    /// Numeric access PIN, zero padded.
    pub pin: String,
}

/// Hands out numeric PINs unique within a tournament's existing PIN set.
#[derive(Debug, Clone)]
pub struct PinAllocator {
    taken: HashSet<String>,
    length: u32,
}

impl PinAllocator {
    /// Create an allocator for `length`-digit PINs that avoids every PIN in `existing`.
    ///
    /// `length` is clamped to `1..=MAX_PIN_LENGTH`.
    pub fn new(existing: impl IntoIterator<Item = String>, length: u32) -> Self {
        let clamped = length.clamp(1, MAX_PIN_LENGTH);
        if clamped != length {
            debug!(requested = length, length = clamped, "PIN length out of range; clamped");
        }
        Self {
            taken: existing.into_iter().collect(),
            length: clamped,
        }
    }

    /// Digits per generated PIN.
    pub fn length(&self) -> u32 {
        self.length
    }

    fn space(&self) -> u64 {
        10u64.saturating_pow(self.length)
    }

    fn format(&self, value: u64) -> String {
        format!("{:0width$}", value, width = self.length as usize)
    }

    /// Draw a fresh PIN and reserve it.
    pub fn allocate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EngineResult<String> {
        let space = self.space();
        for _ in 0..RANDOM_ATTEMPTS {
            let pin = self.format(rng.random_range(0..space));
            if self.taken.insert(pin.clone()) {
                return Ok(pin);
            }
        }

        debug!(
            length = self.length,
            taken = self.taken.len(),
            "random PIN draws collided; scanning"
        );
        let pin = (0..space)
            .map(|value| self.format(value))
            .find(|pin| !self.taken.contains(pin))
            .ok_or(EngineError::PinSpaceExhausted(self.length))?;
        self.taken.insert(pin.clone());
        Ok(pin)
    }
}

/// Attach a unique PIN to every generated group.
pub fn assign_pins<R: Rng + ?Sized>(
    groups: Vec<GeneratedGroup>,
    allocator: &mut PinAllocator,
    rng: &mut R,
) -> EngineResult<Vec<GroupAssignment>> {
    groups
        .into_iter()
        .map(|group| {
            Ok(GroupAssignment {
                pin: allocator.allocate(rng)?,
                group_number: group.group_number,
                members: group.members,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn pins_are_padded_and_unique() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut allocator = PinAllocator::new(Vec::new(), 4);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let pin = allocator.allocate(&mut rng).unwrap();
            assert_eq!(pin.len(), 4);
            assert!(pin.chars().all(|c| c.is_ascii_digit()));
            assert!(seen.insert(pin));
        }
    }

    #[test]
    fn avoids_existing_pins_and_scans_when_crowded() {
        let mut rng = StdRng::seed_from_u64(1);
        let existing: Vec<String> = (0..9).map(|n| n.to_string()).collect();
        let mut allocator = PinAllocator::new(existing, 1);
        assert_eq!(allocator.allocate(&mut rng).unwrap(), "9");
        assert_eq!(
            allocator.allocate(&mut rng).unwrap_err(),
            EngineError::PinSpaceExhausted(1)
        );
    }

    #[test]
    fn length_is_clamped() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut short = PinAllocator::new(Vec::new(), 0);
        assert_eq!(short.length(), 1);
        assert_eq!(short.allocate(&mut rng).unwrap().len(), 1);

        let mut long = PinAllocator::new(Vec::new(), 12);
        assert_eq!(long.length(), MAX_PIN_LENGTH);
        assert_eq!(long.allocate(&mut rng).unwrap().len(), MAX_PIN_LENGTH as usize);
    }

    #[test]
    fn assigns_one_pin_per_group() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut allocator = PinAllocator::new(vec!["0042".to_owned()], 4);
        let groups = vec![
            GeneratedGroup {
                group_number: 1,
                members: vec![PlayerId::from_u128(1)],
            },
            GeneratedGroup {
                group_number: 2,
                members: vec![PlayerId::from_u128(2)],
            },
        ];
        let assigned = assign_pins(groups, &mut allocator, &mut rng).unwrap();
        assert_eq!(assigned.len(), 2);
        assert_ne!(assigned[0].pin, assigned[1].pin);
        assert!(assigned.iter().all(|g| g.pin != "0042"));
        assert_eq!(assigned[1].group_number, 2);
    }
}
