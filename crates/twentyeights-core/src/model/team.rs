use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::seat::Seat;

/// One of the two fixed partnerships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    NorthSouth,
    EastWest,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::NorthSouth, Team::EastWest];

    pub const fn index(self) -> usize {
        match self {
            Team::NorthSouth => 0,
            Team::EastWest => 1,
        }
    }

    pub const fn opponent(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }

    pub const fn seats(self) -> [Seat; 2] {
        match self {
            Team::NorthSouth => [Seat::North, Seat::South],
            Team::EastWest => [Seat::East, Seat::West],
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Team::NorthSouth => "North/South",
            Team::EastWest => "East/West",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teams_partition_the_table() {
        for team in Team::ALL {
            for seat in team.seats() {
                assert_eq!(seat.team(), team);
                assert_eq!(seat.partner().team(), team);
            }
        }
        assert_eq!(Team::NorthSouth.opponent(), Team::EastWest);
        assert_eq!(Team::EastWest.opponent(), Team::NorthSouth);
    }
}
