//! Team placement tests.
//!
//! Covers every insertion layout the shop and battle loops produce, plus
//! proptest checks that placement never reorders or loses pets.

use proptest::prelude::*;

use pet_targeting::core::{Pet, PetId, Team, TeamError, MAX_TEAM_SIZE};

const NEW: u32 = 100;

fn layout(slots: [Option<u32>; MAX_TEAM_SIZE]) -> Team {
    Team::new(slots.map(|s| s.map(|id| Pet::new(PetId(id), "pet", 1, 1)))).unwrap()
}

fn ids(team: &Team) -> Vec<Option<u32>> {
    team.iter().map(|s| s.map(|p| p.id.raw())).collect()
}

fn newcomer() -> Pet {
    Pet::new(PetId(NEW), "new", 1, 1)
}

/// Insert at every index of a team with one or two gaps.
#[test]
fn test_insert_layouts() {
    let n = Some(NEW);
    let cases: [([Option<u32>; 5], usize, [Option<u32>; 5]); 10] = [
        ([Some(1), Some(2), None, Some(3), Some(4)], 0, [n, Some(1), Some(2), Some(3), Some(4)]),
        ([Some(1), Some(2), None, Some(3), Some(4)], 1, [Some(1), n, Some(2), Some(3), Some(4)]),
        ([Some(1), Some(2), None, Some(3), Some(4)], 2, [Some(1), Some(2), n, Some(3), Some(4)]),
        ([Some(1), Some(2), None, Some(3), Some(4)], 3, [Some(1), Some(2), Some(3), n, Some(4)]),
        ([Some(1), Some(2), None, Some(3), Some(4)], 4, [Some(1), Some(2), Some(3), Some(4), n]),
        ([None, Some(1), Some(2), Some(3), None], 0, [n, Some(1), Some(2), Some(3), None]),
        ([None, Some(1), Some(2), Some(3), None], 2, [None, Some(1), n, Some(2), Some(3)]),
        ([None, Some(1), Some(2), Some(3), Some(4)], 2, [Some(1), Some(2), n, Some(3), Some(4)]),
        ([Some(1), None, None, Some(2), Some(3)], 4, [Some(1), None, Some(2), Some(3), n]),
        ([Some(1), None, None, Some(2), Some(3)], 1, [Some(1), n, None, Some(2), Some(3)]),
    ];

    for (before, index, after) in cases {
        let mut team = layout(before);
        assert!(team.insert_pet(newcomer(), index).unwrap(), "{:?} at {}", before, index);
        assert_eq!(ids(&team), after.to_vec(), "{:?} at {}", before, index);
    }
}

/// A full team refuses both insertion and summoning without changing.
#[test]
fn test_full_team_refuses_placement() {
    let mut team = layout([Some(1), Some(2), Some(3), Some(4), Some(5)]);
    let before = team.clone();
    assert!(!team.insert_pet(newcomer(), 2).unwrap());
    assert!(!team.summon_pet(newcomer(), 2).unwrap());
    assert_eq!(team, before);
}

/// Summoning lands one slot forward when the front has a gap.
#[test]
fn test_summon_layouts() {
    // Gap at the front: lands at 1, pushing the others into the back gap.
    let mut team = layout([None, Some(1), Some(2), Some(3), None]);
    assert!(team.summon_pet(newcomer(), 2).unwrap());
    assert_eq!(ids(&team), vec![None, Some(NEW), Some(1), Some(2), Some(3)]);

    let mut team = layout([None, Some(1), Some(2), Some(3), None]);
    assert!(team.summon_pet(newcomer(), 0).unwrap());
    assert_eq!(ids(&team), vec![Some(NEW), Some(1), Some(2), Some(3), None]);

    let mut team = layout([Some(1), Some(2), None, None, None]);
    assert!(team.summon_pet(newcomer(), 2).unwrap());
    assert_eq!(ids(&team), vec![Some(1), Some(2), Some(NEW), None, None]);
}

/// Placement errors leave the team unchanged.
#[test]
fn test_placement_errors() {
    let mut team = layout([Some(1), None, None, None, None]);
    let before = team.clone();
    assert_eq!(
        team.insert_pet(newcomer(), 5),
        Err(TeamError::IndexOutOfBounds { index: 5 })
    );
    assert_eq!(
        team.summon_pet(newcomer(), 9),
        Err(TeamError::IndexOutOfBounds { index: 9 })
    );
    assert_eq!(
        team.insert_pet(Pet::new(PetId(1), "again", 1, 1), 2),
        Err(TeamError::DuplicatePet(PetId(1)))
    );
    assert_eq!(team, before);
}

fn slots_strategy() -> impl Strategy<Value = [Option<u32>; MAX_TEAM_SIZE]> {
    prop::array::uniform5(any::<bool>()).prop_map(|occupied| {
        let mut next = 0;
        occupied.map(|o| {
            next += 1;
            o.then_some(next)
        })
    })
}

proptest! {
    /// Insertion keeps existing pets in order and places the new pet at `index`.
    #[test]
    fn prop_insert_preserves_order(slots in slots_strategy(), index in 0usize..MAX_TEAM_SIZE) {
        let mut team = layout(slots);
        let before: Vec<u32> = team.pets().map(|p| p.id.raw()).collect();
        let was_full = team.is_full();

        let placed = team.insert_pet(newcomer(), index).unwrap();
        prop_assert_eq!(placed, !was_full);
        prop_assert_eq!(team.iter().count(), MAX_TEAM_SIZE);

        let after: Vec<u32> = team
            .pets()
            .map(|p| p.id.raw())
            .filter(|&id| id != NEW)
            .collect();
        prop_assert_eq!(after, before.clone());

        if placed {
            prop_assert_eq!(team.position(PetId(NEW)), Some(index));
            prop_assert_eq!(team.len(), before.len() + 1);
        }
    }

    /// Summoning also keeps order and lands at `index` or one slot forward.
    #[test]
    fn prop_summon_lands_near_index(slots in slots_strategy(), index in 0usize..MAX_TEAM_SIZE) {
        let mut team = layout(slots);
        let before: Vec<u32> = team.pets().map(|p| p.id.raw()).collect();

        if team.summon_pet(newcomer(), index).unwrap() {
            let at = team.position(PetId(NEW)).unwrap();
            prop_assert!(at == index || at + 1 == index);
            let after: Vec<u32> = team.pets().map(|p| p.id.raw()).filter(|&id| id != NEW).collect();
            prop_assert_eq!(after, before);
        }
    }
}
