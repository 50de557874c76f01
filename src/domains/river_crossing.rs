//! The farmer, wolf, goat and cabbage puzzle. The farmer rows across with at
//! most one passenger; the goat may never be left alone with the wolf or with
//! the cabbage.

use crate::search::Problem;
use std::fmt;
use strum_macros::{Display, EnumIs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Banks {
    pub farmer: Side,
    pub wolf: Side,
    pub goat: Side,
    pub cabbage: Side,
}

impl Banks {
    pub const fn all(side: Side) -> Self {
        Self {
            farmer: side,
            wolf: side,
            goat: side,
            cabbage: side,
        }
    }

    pub fn is_safe(&self) -> bool {
        let goat_alone = self.goat != self.farmer;
        !(goat_alone && (self.goat == self.wolf || self.goat == self.cabbage))
    }
}

impl fmt::Display for Banks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bank = |side: Side| {
            [
                ("F", self.farmer),
                ("W", self.wolf),
                ("G", self.goat),
                ("C", self.cabbage),
            ]
            .iter()
            .filter(|(_, s)| *s == side)
            .map(|(name, _)| *name)
            .collect::<String>()
        };
        write!(f, "{}|{}", bank(Side::Left), bank(Side::Right))
    }
}

/// Who is in the boat with the farmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Crossing {
    Farmer,
    FarmerWolf,
    FarmerGoat,
    FarmerCabbage,
}

#[derive(Debug, Clone)]
pub struct RiverCrossing {
    goal: Banks,
}

impl RiverCrossing {
    pub fn new() -> Self {
        Self {
            goal: Banks::all(Side::Right),
        }
    }

    fn cross(state: &Banks, crossing: Crossing) -> Banks {
        let mut next = *state;
        let side = state.farmer;
        next.farmer = side.opposite();
        match crossing {
            Crossing::Farmer => {}
            Crossing::FarmerWolf => next.wolf = side.opposite(),
            Crossing::FarmerGoat => next.goat = side.opposite(),
            Crossing::FarmerCabbage => next.cabbage = side.opposite(),
        }
        next
    }
}

impl Default for RiverCrossing {
    fn default() -> Self {
        Self::new()
    }
}

impl Problem for RiverCrossing {
    type State = Banks;
    type Action = Crossing;

    fn initial_state(&self) -> Banks {
        Banks::all(Side::Left)
    }

    fn actions(&self, state: &Banks) -> Vec<Crossing> {
        let side = state.farmer;
        [
            (Crossing::Farmer, side),
            (Crossing::FarmerWolf, state.wolf),
            (Crossing::FarmerGoat, state.goat),
            (Crossing::FarmerCabbage, state.cabbage),
        ]
        .into_iter()
        .filter(|&(crossing, passenger)| {
            passenger == side && Self::cross(state, crossing).is_safe()
        })
        .map(|(crossing, _)| crossing)
        .collect()
    }

    fn result(&self, state: &Banks, action: &Crossing) -> Banks {
        Self::cross(state, *action)
    }

    fn goal(&self) -> Option<&Banks> {
        Some(&self.goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_goat_can_go_first() {
        let problem = RiverCrossing::new();
        let start = problem.initial_state();
        assert_eq!(problem.actions(&start), vec![Crossing::FarmerGoat]);
        let next = problem.result(&start, &Crossing::FarmerGoat);
        assert_eq!(next.to_string(), "WC|FG");
    }

    #[test]
    fn unsafe_banks_are_detected() {
        let mut banks = Banks::all(Side::Left);
        banks.farmer = Side::Right;
        assert!(!banks.is_safe());
        banks.goat = Side::Right;
        assert!(banks.is_safe());
    }
}
