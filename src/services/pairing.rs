use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    error::{EngineError, EngineResult},
    model::player::PlayerId,
};

/// Directed "wants to play with" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairingPreference {
    /// Player making the request.
    pub player_id: PlayerId,
    /// Player they want in their group.
    pub preferred_player_id: PlayerId,
}

/// Group produced by a matcher, numbered from 1 in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedGroup {
    /// Sequential group number.
    pub group_number: u32,
    /// Members in placement order.
    pub members: Vec<PlayerId>,
}

/// Strategy partitioning a roster into groups.
pub trait GroupMatcher {
    /// Partition `roster` into groups of at most `target_size`, honoring `preferences`.
    ///
    /// Every roster player lands in exactly one group. Fails on an empty roster or a zero
    /// target size.
    fn generate_groups(
        &self,
        roster: &[PlayerId],
        preferences: &[PairingPreference],
        target_size: usize,
    ) -> EngineResult<Vec<GeneratedGroup>>;
}

/// First-fit matcher: mutual pairs seed groups, one-way requests ride along, the rest fill in.
///
/// Placement follows roster order, and each player's requests follow feed order, so the same
/// inputs in the same order always give the same partition. This is not an optimal matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyGroupMatcher;

/// Group `roster` with the greedy matcher.
pub fn auto_generate_groups(
    roster: &[PlayerId],
    preferences: &[PairingPreference],
    target_size: usize,
) -> EngineResult<Vec<GeneratedGroup>> {
    GreedyGroupMatcher.generate_groups(roster, preferences, target_size)
}

/// Directed preference graph restricted to roster members.
struct PreferenceMap {
    wants: IndexMap<PlayerId, IndexSet<PlayerId>>,
}

impl PreferenceMap {
    fn new(roster: &IndexSet<PlayerId>, preferences: &[PairingPreference]) -> Self {
        let mut wants: IndexMap<PlayerId, IndexSet<PlayerId>> = IndexMap::new();
        for pref in preferences {
            if pref.player_id == pref.preferred_player_id
                || !roster.contains(&pref.player_id)
                || !roster.contains(&pref.preferred_player_id)
            {
                continue;
            }
            wants
                .entry(pref.player_id)
                .or_default()
                .insert(pref.preferred_player_id);
        }
        Self { wants }
    }

    fn preferred_by(&self, player: &PlayerId) -> impl Iterator<Item = &PlayerId> {
        self.wants.get(player).into_iter().flatten()
    }

    fn wants(&self, player: &PlayerId, other: &PlayerId) -> bool {
        self.wants
            .get(player)
            .is_some_and(|preferred| preferred.contains(other))
    }

    /// Unordered mutual pairs, each listed once, in roster then request order.
    fn mutual_pairs(&self, roster: &IndexSet<PlayerId>) -> Vec<(PlayerId, PlayerId)> {
        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        for player in roster {
            for other in self.preferred_by(player) {
                if !self.wants(other, player) {
                    continue;
                }
                let key = if player < other {
                    (*player, *other)
                } else {
                    (*other, *player)
                };
                if seen.insert(key) {
                    pairs.push((*player, *other));
                }
            }
        }
        pairs
    }
}

impl GroupMatcher for GreedyGroupMatcher {
    fn generate_groups(
        &self,
        roster: &[PlayerId],
        preferences: &[PairingPreference],
        target_size: usize,
    ) -> EngineResult<Vec<GeneratedGroup>> {
        if target_size == 0 {
            return Err(EngineError::InvalidGroupSize(target_size));
        }
        let roster: IndexSet<PlayerId> = roster.iter().copied().collect();
        if roster.is_empty() {
            return Err(EngineError::EmptyRoster);
        }

        let prefs = PreferenceMap::new(&roster, preferences);
        let mut assigned: HashSet<PlayerId> = HashSet::with_capacity(roster.len());
        let mut groups: Vec<Vec<PlayerId>> = Vec::new();

        // Mutual pairs seed groups and pull in anyone either seed asked for.
        if target_size >= 2 {
            for (a, b) in prefs.mutual_pairs(&roster) {
                if assigned.contains(&a) || assigned.contains(&b) {
                    continue;
                }
                let mut group = vec![a, b];
                assigned.insert(a);
                assigned.insert(b);
                for candidate in prefs.preferred_by(&a).chain(prefs.preferred_by(&b)) {
                    if group.len() >= target_size {
                        break;
                    }
                    if assigned.insert(*candidate) {
                        group.push(*candidate);
                    }
                }
                trace!(
                    group = groups.len() + 1,
                    size = group.len(),
                    "seeded group from mutual pair"
                );
                groups.push(group);
            }
        }

        // One-way requests: first existing group with room holding someone they asked for.
        for player in &roster {
            if assigned.contains(player) {
                continue;
            }
            let target = groups.iter_mut().enumerate().find(|(_, group)| {
                group.len() < target_size && group.iter().any(|member| prefs.wants(player, member))
            });
            if let Some((index, group)) = target {
                trace!(group = index + 1, "placed player with a requested partner");
                group.push(*player);
                assigned.insert(*player);
            }
        }

        // Everyone else fills the first open slot.
        for player in &roster {
            if assigned.contains(player) {
                continue;
            }
            match groups.iter_mut().find(|group| group.len() < target_size) {
                Some(group) => group.push(*player),
                None => groups.push(vec![*player]),
            }
            assigned.insert(*player);
        }

        Ok(groups
            .into_iter()
            .zip(1..)
            .map(|(members, group_number)| GeneratedGroup {
                group_number,
                members,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use uuid::Uuid;

    use super::*;

    fn id(n: u128) -> PlayerId {
        Uuid::from_u128(n)
    }

    fn pref(from: u128, to: u128) -> PairingPreference {
        PairingPreference {
            player_id: id(from),
            preferred_player_id: id(to),
        }
    }

    fn members(groups: &[GeneratedGroup]) -> Vec<Vec<u128>> {
        groups
            .iter()
            .map(|g| g.members.iter().map(|m| m.as_u128()).collect())
            .collect()
    }

    const A: u128 = 1;
    const B: u128 = 2;
    const C: u128 = 3;
    const D: u128 = 4;
    const E: u128 = 5;
    const F: u128 = 6;

    #[test]
    fn mutual_pair_with_one_way_outsiders_fills_one_foursome() {
        let roster = [id(A), id(B), id(C), id(D)];
        let groups =
            auto_generate_groups(&roster, &[pref(A, B), pref(B, A), pref(C, D)], 4).unwrap();
        assert_eq!(members(&groups), vec![vec![A, B, C, D]]);
        assert_eq!(groups[0].group_number, 1);
    }

    #[test]
    fn one_way_target_outside_groups_does_not_merge() {
        let roster = [id(A), id(B), id(C), id(D)];
        let groups =
            auto_generate_groups(&roster, &[pref(A, B), pref(B, A), pref(C, D)], 2).unwrap();
        assert_eq!(members(&groups), vec![vec![A, B], vec![C, D]]);
    }

    #[test]
    fn one_way_admirer_rides_with_seed() {
        let roster = [id(A), id(B), id(C), id(D), id(E)];
        let groups =
            auto_generate_groups(&roster, &[pref(A, B), pref(B, A), pref(A, C)], 3).unwrap();
        assert_eq!(members(&groups), vec![vec![A, B, C], vec![D, E]]);
    }

    #[test]
    fn one_way_request_beats_fill_order() {
        let roster = [id(A), id(B), id(C), id(D), id(E), id(F)];
        let prefs = [pref(A, B), pref(B, A), pref(C, D), pref(D, C), pref(E, C)];
        let groups = auto_generate_groups(&roster, &prefs, 4).unwrap();
        assert_eq!(members(&groups), vec![vec![A, B, F], vec![C, D, E]]);
    }

    #[test]
    fn full_groups_push_requests_to_fill() {
        let roster = [id(A), id(B), id(C)];
        let prefs = [pref(A, B), pref(B, A), pref(C, A)];
        let groups = auto_generate_groups(&roster, &prefs, 2).unwrap();
        assert_eq!(members(&groups), vec![vec![A, B], vec![C]]);
    }

    #[test]
    fn ignores_self_and_unknown_preferences() {
        let roster = [id(A), id(B)];
        let prefs = [pref(A, A), pref(A, 99), pref(99, A)];
        let groups = auto_generate_groups(&roster, &prefs, 4).unwrap();
        assert_eq!(members(&groups), vec![vec![A, B]]);
    }

    #[test]
    fn size_one_makes_singletons() {
        let roster = [id(A), id(B), id(C)];
        let groups = auto_generate_groups(&roster, &[pref(A, B), pref(B, A)], 1).unwrap();
        assert_eq!(members(&groups), vec![vec![A], vec![B], vec![C]]);
    }

    #[test]
    fn rejects_empty_roster_and_zero_size() {
        assert_eq!(
            auto_generate_groups(&[], &[], 4).unwrap_err(),
            EngineError::EmptyRoster
        );
        assert_eq!(
            auto_generate_groups(&[id(A)], &[], 0).unwrap_err(),
            EngineError::InvalidGroupSize(0)
        );
    }

    #[test]
    fn same_input_same_partition() {
        let roster: Vec<PlayerId> = (1..=11).map(id).collect();
        let prefs = [pref(3, 7), pref(7, 3), pref(1, 7), pref(9, 2), pref(2, 9), pref(5, 9)];
        let first = auto_generate_groups(&roster, &prefs, 4).unwrap();
        let second = auto_generate_groups(&roster, &prefs, 4).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn every_player_grouped_exactly_once(
            players in 1u128..=30,
            edges in proptest::collection::vec((1u128..=30, 1u128..=30), 0..60),
            target_size in 1usize..=5,
        ) {
            let roster: Vec<PlayerId> = (1..=players).map(id).collect();
            let prefs: Vec<PairingPreference> =
                edges.iter().map(|&(from, to)| pref(from, to)).collect();
            let groups = auto_generate_groups(&roster, &prefs, target_size).unwrap();

            let mut seen = HashSet::new();
            for group in &groups {
                prop_assert!(!group.members.is_empty());
                prop_assert!(group.members.len() <= target_size);
                for member in &group.members {
                    prop_assert!(seen.insert(*member));
                }
            }
            prop_assert_eq!(seen.len(), roster.len());
        }
    }
}
