//! Luck-biased die.
//!
//! ## Policy
//!
//! - `luck > 0.8`: a six is forced with probability 0.25, otherwise fair
//! - `luck < 0.2`: a one is forced with probability 0.40, otherwise fair
//! - otherwise: fair
//!
//! Each roll takes one unit draw for the bias check and, unless the bias
//! fires, one face draw. With a [`SequenceSource`](crate::core::SequenceSource)
//! this makes exact sequences easy to script.

use crate::core::{GameRng, LuckFactor, RandomSource};

pub const HIGH_LUCK_THRESHOLD: f64 = 0.8;
pub const LOW_LUCK_THRESHOLD: f64 = 0.2;
pub const FORCED_SIX_CHANCE: f64 = 0.25;
pub const FORCED_ONE_CHANCE: f64 = 0.40;

/// Roll one die from `source` with the given luck.
pub fn biased_roll<R: RandomSource + ?Sized>(luck: LuckFactor, source: &mut R) -> u8 {
    let draw = source.next_unit();
    let luck = luck.value();
    if luck > HIGH_LUCK_THRESHOLD && draw < FORCED_SIX_CHANCE {
        return 6;
    }
    if luck < LOW_LUCK_THRESHOLD && draw < FORCED_ONE_CHANCE {
        return 1;
    }
    source.next_face()
}

/// Die owning its randomness source.
#[derive(Clone, Debug)]
pub struct DiceRoller<R: RandomSource = GameRng> {
    source: R,
}

impl DiceRoller<GameRng> {
    /// Roller backed by a seeded [`GameRng`].
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }
}

impl<R: RandomSource> DiceRoller<R> {
    #[must_use]
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Roll a value in `1..=6`.
    pub fn roll(&mut self, luck: LuckFactor) -> u8 {
        biased_roll(luck, &mut self.source)
    }
}
