//! Fixed-capacity pet teams.
//!
//! A `Team` always has exactly [`MAX_TEAM_SIZE`] slots. Slot 0 is the front
//! of the team (the pet closest to the opponent). Occupants are only added
//! through [`Team::insert_pet`] and [`Team::summon_pet`]; the battle loop
//! empties slots with [`Team::take`] when pets faint.
//!
//! ## Insertion
//!
//! Inserting into an occupied slot shifts the existing pets to free a slot
//! while preserving their relative order:
//!
//! ```
//! use pet_targeting::core::{Pet, PetId, Team};
//!
//! let pet = |id| Some(Pet::new(PetId(id), "pet", 1, 1));
//! let mut team = Team::new([pet(1), pet(2), None, pet(3), pet(4)]).unwrap();
//!
//! assert!(team.insert_pet(Pet::new(PetId(100), "new", 1, 1), 0).unwrap());
//!
//! let ids: Vec<_> = team.pets().map(|p| p.id.raw()).collect();
//! assert_eq!(ids, vec![100, 1, 2, 3, 4]);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::MAX_TEAM_SIZE;
use super::pet::{Pet, PetId};

/// Errors raised by team construction and placement.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TeamError {
    /// Slot index outside `0..MAX_TEAM_SIZE`.
    #[error("slot index {index} is out of bounds for a team of {MAX_TEAM_SIZE}")]
    IndexOutOfBounds { index: usize },

    /// More initial slots than the team can hold.
    #[error("team was given {count} slots but holds at most {MAX_TEAM_SIZE}")]
    TooManySlots { count: usize },

    /// The pet already occupies a slot on this team.
    #[error("{0} is already on the team")]
    DuplicatePet(PetId),
}

/// An ordered team of up to five pets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    slots: [Option<Pet>; MAX_TEAM_SIZE],
}

impl Team {
    /// Create a team from up to five slots, padding the rest with empties.
    pub fn new(slots: impl IntoIterator<Item = Option<Pet>>) -> Result<Self, TeamError> {
        let mut team = Self::default();
        for (index, slot) in slots.into_iter().enumerate() {
            if index >= MAX_TEAM_SIZE {
                return Err(TeamError::TooManySlots { count: index + 1 });
            }
            if let Some(pet) = slot {
                if team.contains(pet.id) {
                    return Err(TeamError::DuplicatePet(pet.id));
                }
                team.slots[index] = Some(pet);
            }
        }
        Ok(team)
    }

    /// Create a team with the given pets packed into the front slots.
    pub fn from_pets(pets: impl IntoIterator<Item = Pet>) -> Result<Self, TeamError> {
        Self::new(pets.into_iter().map(Some))
    }

    fn validate_index(index: usize) -> Result<(), TeamError> {
        if index >= MAX_TEAM_SIZE {
            return Err(TeamError::IndexOutOfBounds { index });
        }
        Ok(())
    }

    /// Insert a pet at `index`, shifting occupants to make room.
    ///
    /// The first empty slot at or after `index` is consumed, pushing the pets
    /// in between one slot back. If there is none, the last empty slot before
    /// `index` is consumed instead, pulling the pets in between one slot
    /// forward. Returns `Ok(false)` and leaves the team untouched when it is
    /// already full.
    pub fn insert_pet(&mut self, pet: Pet, index: usize) -> Result<bool, TeamError> {
        Self::validate_index(index)?;
        if self.contains(pet.id) {
            return Err(TeamError::DuplicatePet(pet.id));
        }
        if self.is_full() {
            return Ok(false);
        }

        let after = (index..MAX_TEAM_SIZE).find(|&i| self.slots[i].is_none());
        match after {
            Some(empty) => self.slots[index..=empty].rotate_right(1),
            None => {
                // Not full and nothing free behind, so a free slot exists in front.
                let Some(empty) = (0..index).rev().find(|&i| self.slots[i].is_none()) else {
                    return Ok(false);
                };
                self.slots[empty..=index].rotate_left(1);
            }
        }
        self.slots[index] = Some(pet);
        Ok(true)
    }

    /// Summon a pet as close as possible to `index`.
    ///
    /// When any slot in front of `index` is empty the summon lands one slot
    /// further forward (`index - 1`, floored at 0) before delegating to
    /// [`Team::insert_pet`].
    pub fn summon_pet(&mut self, pet: Pet, index: usize) -> Result<bool, TeamError> {
        Self::validate_index(index)?;
        if self.is_full() {
            return Ok(false);
        }
        let target = if self.slots[..index].iter().any(Option::is_none) {
            index.saturating_sub(1)
        } else {
            index
        };
        self.insert_pet(pet, target)
    }

    /// Empty a slot, returning its previous occupant.
    pub fn take(&mut self, index: usize) -> Result<Option<Pet>, TeamError> {
        Self::validate_index(index)?;
        Ok(self.slots[index].take())
    }

    /// Get the occupant of a slot.
    pub fn get(&self, index: usize) -> Result<Option<&Pet>, TeamError> {
        Self::validate_index(index)?;
        Ok(self.slots[index].as_ref())
    }

    /// Iterate over all slots in order, including empty ones.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Option<&Pet>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }

    /// Iterate over occupied slots in order.
    pub fn pets(&self) -> impl DoubleEndedIterator<Item = &Pet> + '_ {
        self.slots.iter().flatten()
    }

    /// Look up a pet by id.
    #[must_use]
    pub fn pet(&self, id: PetId) -> Option<&Pet> {
        self.pets().find(|p| p.id == id)
    }

    /// Check if the pet occupies a slot on this team.
    #[must_use]
    pub fn contains(&self, id: PetId) -> bool {
        self.pets().any(|p| p.id == id)
    }

    /// Slot index of a pet.
    #[must_use]
    pub fn position(&self, id: PetId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|p| p.id == id))
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pets().count()
    }

    /// Check if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Check if every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

impl<'a> IntoIterator for &'a Team {
    type Item = Option<&'a Pet>;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Option<Pet>>, fn(&'a Option<Pet>) -> Option<&'a Pet>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots
            .iter()
            .map(Option::as_ref as fn(&'a Option<Pet>) -> Option<&'a Pet>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(id: u32) -> Pet {
        Pet::new(PetId(id), format!("pet{}", id), 1, 1)
    }

    fn team(slots: [Option<u32>; MAX_TEAM_SIZE]) -> Team {
        Team::new(slots.map(|s| s.map(pet))).unwrap()
    }

    fn ids(team: &Team) -> Vec<Option<u32>> {
        team.iter().map(|s| s.map(|p| p.id.raw())).collect()
    }

    #[test]
    fn test_new_pads_with_empty_slots() {
        let team = Team::new([Some(pet(1)), None]).unwrap();
        assert_eq!(ids(&team), vec![Some(1), None, None, None, None]);
        assert_eq!(team.len(), 1);
        assert_eq!(team.iter().count(), MAX_TEAM_SIZE);
    }

    #[test]
    fn test_new_rejects_six_slots() {
        let err = Team::new(vec![None; 6]).unwrap_err();
        assert_eq!(err, TeamError::TooManySlots { count: 6 });
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = Team::from_pets([pet(1), pet(1)]).unwrap_err();
        assert_eq!(err, TeamError::DuplicatePet(PetId(1)));
    }

    #[test]
    fn test_insert_shifts_backward_into_first_free_slot() {
        let mut t = team([Some(1), None, Some(2), Some(3), None]);
        assert!(t.insert_pet(pet(100), 2).unwrap());
        assert_eq!(ids(&t), vec![Some(1), None, Some(100), Some(2), Some(3)]);

        let mut t = team([Some(1), Some(2), Some(3), None, None]);
        assert!(t.insert_pet(pet(100), 2).unwrap());
        assert_eq!(ids(&t), vec![Some(1), Some(2), Some(100), Some(3), None]);
    }

    #[test]
    fn test_insert_shifts_forward_when_back_is_full() {
        let mut t = team([Some(1), Some(2), None, Some(3), Some(4)]);
        assert!(t.insert_pet(pet(100), 4).unwrap());
        assert_eq!(ids(&t), vec![Some(1), Some(2), Some(3), Some(4), Some(100)]);

        let mut t = team([None, Some(1), None, Some(2), Some(3)]);
        assert!(t.insert_pet(pet(100), 3).unwrap());
        assert_eq!(ids(&t), vec![None, Some(1), Some(2), Some(100), Some(3)]);
    }

    #[test]
    fn test_insert_into_empty_slot() {
        let mut t = team([None; MAX_TEAM_SIZE]);
        assert!(t.insert_pet(pet(100), 2).unwrap());
        assert_eq!(ids(&t), vec![None, None, Some(100), None, None]);
    }

    #[test]
    fn test_insert_full_team_is_unchanged() {
        let mut t = team([Some(1), Some(2), Some(3), Some(4), Some(5)]);
        let before = t.clone();
        assert!(!t.insert_pet(pet(100), 0).unwrap());
        assert_eq!(t, before);
    }

    #[test]
    fn test_insert_validates_index() {
        let mut t = team([None; MAX_TEAM_SIZE]);
        assert_eq!(
            t.insert_pet(pet(1), MAX_TEAM_SIZE),
            Err(TeamError::IndexOutOfBounds { index: MAX_TEAM_SIZE })
        );
        for i in 0..MAX_TEAM_SIZE {
            assert!(t.get(i).is_ok());
        }
    }

    #[test]
    fn test_summon_snaps_forward_when_front_has_room() {
        let mut t = team([Some(1), None, Some(2), Some(3), Some(4)]);
        assert!(t.summon_pet(pet(100), 3).unwrap());
        assert_eq!(ids(&t), vec![Some(1), Some(2), Some(100), Some(3), Some(4)]);
    }

    #[test]
    fn test_summon_keeps_index_when_front_is_packed() {
        let mut t = team([Some(1), Some(2), Some(3), None, None]);
        assert!(t.summon_pet(pet(100), 1).unwrap());
        assert_eq!(ids(&t), vec![Some(1), Some(100), Some(2), Some(3), None]);

        let mut t = team([None; MAX_TEAM_SIZE]);
        assert!(t.summon_pet(pet(100), 0).unwrap());
        assert_eq!(ids(&t), vec![Some(100), None, None, None, None]);
    }

    #[test]
    fn test_summon_full_team_fails() {
        let mut t = team([Some(1), Some(2), Some(3), Some(4), Some(5)]);
        assert!(!t.summon_pet(pet(100), 2).unwrap());
    }

    #[test]
    fn test_take_and_lookup() {
        let mut t = team([Some(1), Some(2), None, None, None]);
        assert_eq!(t.position(PetId(2)), Some(1));
        let taken = t.take(0).unwrap();
        assert_eq!(taken.map(|p| p.id), Some(PetId(1)));
        assert!(!t.contains(PetId(1)));
        assert_eq!(t.pet(PetId(2)).map(|p| p.id), Some(PetId(2)));
        assert_eq!(t.take(0).unwrap(), None);
    }

    #[test]
    fn test_into_iter_yields_all_slots() {
        let t = team([Some(1), None, Some(2), None, Some(3)]);
        assert_eq!((&t).into_iter().count(), MAX_TEAM_SIZE);
        assert_eq!(t.pets().count(), 3);
        assert!(!t.is_empty());
        assert!(!t.is_full());
    }
}
