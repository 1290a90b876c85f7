//! Random sources for dice.
//!
//! Every `rand::Rng` is a [`Roller`]. [`ScriptedRoller`] replays a fixed
//! sequence of faces, for tests and for re-displaying a recorded roll.

use std::collections::VecDeque;

use rand::Rng;

/// A source of die faces.
pub trait Roller {
    /// Roll a die with `sides` faces, returning a value in `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> u32;

    /// Roll a fudge die, returning -1, 0 or +1.
    fn roll_fudge(&mut self) -> i64;
}

impl<R: Rng> Roller for R {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }

    fn roll_fudge(&mut self) -> i64 {
        self.random_range(-1..=1)
    }
}

/// A roller that returns pre-recorded faces in order.
///
/// Values are clamped into the range of the die being rolled. Once the
/// script is exhausted every further roll yields the die's lowest face.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    faces: VecDeque<i64>,
}

impl ScriptedRoller {
    /// Create a roller that replays `faces`.
    pub fn new(faces: impl IntoIterator<Item = i64>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
        }
    }

    /// Number of scripted faces not yet consumed.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl Roller for ScriptedRoller {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let sides = sides.max(1);
        match self.faces.pop_front() {
            Some(face) => face.clamp(1, i64::from(sides)) as u32,
            None => 1,
        }
    }

    fn roll_fudge(&mut self) -> i64 {
        self.faces.pop_front().map_or(-1, |face| face.clamp(-1, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rng_rolls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!((1..=6).contains(&rng.roll_die(6)));
            assert!((-1..=1).contains(&rng.roll_fudge()));
        }
    }

    #[test]
    fn scripted_replays_in_order() {
        let mut roller = ScriptedRoller::new([4, 5, 1]);
        assert_eq!(roller.roll_die(6), 4);
        assert_eq!(roller.roll_die(6), 5);
        assert_eq!(roller.remaining(), 1);
        assert_eq!(roller.roll_fudge(), 1);
        assert_eq!(roller.remaining(), 0);
    }

    #[test]
    fn scripted_clamps_and_exhausts_to_minimum() {
        let mut roller = ScriptedRoller::new([9, -5]);
        assert_eq!(roller.roll_die(6), 6);
        assert_eq!(roller.roll_fudge(), -1);
        assert_eq!(roller.roll_die(20), 1);
        assert_eq!(roller.roll_fudge(), -1);
    }
}
