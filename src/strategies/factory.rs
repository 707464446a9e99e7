//! Random strategy assignment for bricks

use rand::Rng;

use super::{CollisionStrategy, DoubleSlot, DoubleStrategy, PowerUp};
use crate::counter::Counter;

/// Builds one strategy per brick while a level is laid out
#[derive(Debug, Clone)]
pub struct StrategiesFactory {
    lives: Counter,
    paddles: Counter,
    /// Probability of a non-basic strategy
    special_chance: f64,
}

impl StrategiesFactory {
    pub fn new(lives: Counter, paddles: Counter, special_chance: f64) -> Self {
        let special_chance = if (0.0..=1.0).contains(&special_chance) {
            special_chance
        } else {
            log::warn!("special brick chance {special_chance} out of range, using 0.5");
            0.5
        };
        Self {
            lives,
            paddles,
            special_chance,
        }
    }

    /// Basic with probability `1 - special_chance`, otherwise a uniform pick
    /// among extra heart, extra paddle, extra ball, camera and double.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> CollisionStrategy {
        if !rng.random_bool(self.special_chance) {
            return CollisionStrategy::Basic;
        }
        match rng.random_range(0..5) {
            0 => CollisionStrategy::PowerUp(self.extra_heart()),
            1 => CollisionStrategy::PowerUp(self.extra_paddle()),
            2 => CollisionStrategy::PowerUp(PowerUp::ExtraBall),
            3 => CollisionStrategy::ChangeCamera,
            _ => CollisionStrategy::Double(self.double(rng)),
        }
    }

    /// Two picks from {heart, paddle, ball, nested double}; the nested double
    /// is drawn once per call from the three plain power-ups. Picks repeat
    /// while both land on the nested double.
    fn double<R: Rng + ?Sized>(&self, rng: &mut R) -> DoubleStrategy {
        let nested = DoubleSlot::Pair(self.power_up(rng), self.power_up(rng));
        let candidates = [
            DoubleSlot::Single(self.extra_heart()),
            DoubleSlot::Single(self.extra_paddle()),
            DoubleSlot::Single(PowerUp::ExtraBall),
            nested,
        ];
        loop {
            let first = candidates[rng.random_range(0..candidates.len())].clone();
            let second = candidates[rng.random_range(0..candidates.len())].clone();
            if let Some(double) = DoubleStrategy::new(first, second) {
                return double;
            }
        }
    }

    /// Uniform pick among the three plain power-ups
    fn power_up<R: Rng + ?Sized>(&self, rng: &mut R) -> PowerUp {
        match rng.random_range(0..3) {
            0 => self.extra_heart(),
            1 => self.extra_paddle(),
            _ => PowerUp::ExtraBall,
        }
    }

    fn extra_heart(&self) -> PowerUp {
        PowerUp::ExtraHeart {
            lives: self.lives.clone(),
        }
    }

    fn extra_paddle(&self) -> PowerUp {
        PowerUp::ExtraPaddle {
            paddles: self.paddles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::StrategyTag;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn factory(chance: f64) -> StrategiesFactory {
        StrategiesFactory::new(Counter::new(3), Counter::new(1), chance)
    }

    #[test]
    fn test_zero_chance_is_always_basic() {
        let factory = factory(0.0);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            assert_eq!(factory.build(&mut rng).tag(), StrategyTag::Basic);
        }
    }

    #[test]
    fn test_full_chance_reaches_every_special() {
        let factory = factory(1.0);
        let mut rng = Pcg32::seed_from_u64(2);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(factory.build(&mut rng).tag());
        }
        assert!(!seen.contains(&StrategyTag::Basic));
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_power_ups_share_game_counters() {
        let lives = Counter::new(3);
        let factory = StrategiesFactory::new(lives.clone(), Counter::new(1), 1.0);
        match factory.extra_heart() {
            PowerUp::ExtraHeart { lives: held } => assert!(held.shares_with(&lives)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_chance_falls_back() {
        let factory = factory(7.0);
        assert_eq!(factory.special_chance, 0.5);
    }

    proptest! {
        #[test]
        fn prop_double_never_holds_camera_or_two_doubles(seed in any::<u64>()) {
            let factory = factory(1.0);
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..32 {
                if let CollisionStrategy::Double(double) = factory.build(&mut rng) {
                    let slots = [double.first(), double.second()];
                    let nested = slots.iter().filter(|s| s.tag() == StrategyTag::Double).count();
                    prop_assert!(nested <= 1);
                    for slot in slots {
                        prop_assert_ne!(slot.tag(), StrategyTag::ChangeCamera);
                        for power_up in slot.power_ups() {
                            prop_assert_ne!(power_up.tag(), StrategyTag::ChangeCamera);
                            prop_assert_ne!(power_up.tag(), StrategyTag::Double);
                        }
                    }
                }
            }
        }
    }
}
