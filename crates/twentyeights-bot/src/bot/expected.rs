//! Expected honor points surrendered to a trick.

use std::ops::{Add, AddAssign, Mul};

use twentyeights_core::model::{Card, Suit, Team};

use crate::bot::analysis::{Following, SuitUnseen};
use crate::bot::prob::{combinations, hyper_geo_prob};

/// Honor points a side is expected to put on the trick, split by whether
/// that side ends up winning or losing it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpectedPoints {
    pub winning: f64,
    pub losing: f64,
}

impl Add for ExpectedPoints {
    type Output = ExpectedPoints;

    fn add(self, rhs: ExpectedPoints) -> ExpectedPoints {
        ExpectedPoints {
            winning: self.winning + rhs.winning,
            losing: self.losing + rhs.losing,
        }
    }
}

impl AddAssign for ExpectedPoints {
    fn add_assign(&mut self, rhs: ExpectedPoints) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for ExpectedPoints {
    type Output = ExpectedPoints;

    fn mul(self, rhs: f64) -> ExpectedPoints {
        ExpectedPoints {
            winning: self.winning * rhs,
            losing: self.losing * rhs,
        }
    }
}

/// Ways `n` cards can land across a pooled pair of hands, up to symmetry.
const PAIR_SPLITS: [&[(usize, usize)]; 5] = [
    &[(0, 0)],
    &[(1, 0)],
    &[(2, 0), (1, 1)],
    &[(3, 0), (2, 1)],
    &[(4, 0), (3, 1), (2, 2)],
];

/// Average point value of the card a hand plays to this trick, indexed by how
/// many of the suit's unseen honors the hand turns out to hold. A hand taking
/// the trick spends its honors from the top; a hand losing it gives up as
/// little as it can.
pub(crate) fn points_per_held_count(honor_cards: &[Card], winning: bool) -> Vec<f64> {
    if honor_cards.is_empty() {
        return vec![0.0];
    }
    let mut points: Vec<f64> = honor_cards.iter().map(|c| f64::from(c.points())).collect();
    if winning {
        points.sort_by(|a, b| b.total_cmp(a));
    } else {
        points.sort_by(f64::total_cmp);
    }
    let len = points.len();
    (0..=len)
        .map(|n| {
            if n == len {
                return points[0];
            }
            match n {
                0 => 0.0,
                1 => points.iter().sum::<f64>() / len as f64,
                2 => {
                    let weighted: f64 = points
                        .iter()
                        .enumerate()
                        .map(|(i, p)| (len - 1 - i) as f64 * p)
                        .sum();
                    weighted / combinations(len, 2)
                }
                // Three of four: the played card is the best of three.
                _ => ((len - 1) as f64 * points[0] + points[1]) / combinations(len, 3),
            }
        })
        .collect()
}

/// Expected honor points one team plays to the trick in `suit`, over the
/// possible deals of the suit's unseen honors into its following hands. When
/// both team seats follow with the same public knowledge the pair is pooled
/// into one distribution.
pub fn team_points_for_suit(
    unseen: &SuitUnseen,
    following: Following,
    team: Team,
    suit: Suit,
    hand_size: usize,
    population: usize,
) -> ExpectedPoints {
    let honors = &unseen.honor_cards;
    if honors.is_empty() || population == 0 {
        return ExpectedPoints::default();
    }
    let seats = following.of_team_not_empty(team, suit).len();
    if seats == 0 {
        return ExpectedPoints::default();
    }
    let winning = points_per_held_count(honors, true);
    let losing = points_per_held_count(honors, false);
    let sample = (hand_size * seats).min(population);
    let mut average = ExpectedPoints::default();
    for n in 0..honors.len() {
        let chance = hyper_geo_prob(n, honors.len(), sample, population);
        let (sum, weight) = if seats < 2 {
            (
                ExpectedPoints {
                    winning: winning[n],
                    losing: losing[n],
                },
                1.0,
            )
        } else {
            let splits = PAIR_SPLITS[n];
            let mut sum = ExpectedPoints::default();
            for &(a, b) in splits {
                sum.winning += winning[a] + winning[b];
                sum.losing += losing[a] + losing[b];
            }
            (sum, (splits.len() * seats) as f64)
        };
        average += sum * (chance / weight);
    }
    average
}
