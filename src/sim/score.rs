//! Score and run lifecycle
//!
//! Score rises by a fixed increment for every tick survived and drops by a
//! fixed penalty per hit. The run dies on the `max_hits`-th hit or when the
//! score sinks to `game_over_score`, whichever comes first.

use super::state::Run;
use crate::tuning::Tuning;

/// Outcome of settling the score for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Dead,
}

/// Apply this tick's survival bonus and hit penalty
pub fn settle(run: &mut Run, hit: bool, tuning: &Tuning) -> Lifecycle {
    run.score += tuning.survival_increment;

    if hit {
        run.hits += 1;
        run.score -= tuning.hit_penalty;
    }

    if run.hits >= tuning.max_hits || run.score <= tuning.game_over_score {
        Lifecycle::Dead
    } else {
        Lifecycle::Alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survival_increment() {
        let tuning = Tuning::default();
        let mut run = Run::new(1, &tuning);
        assert_eq!(settle(&mut run, false, &tuning), Lifecycle::Alive);
        assert_eq!(run.score, tuning.initial_score + tuning.survival_increment);
        assert_eq!(run.hits, 0);
    }

    #[test]
    fn test_hit_applies_penalty() {
        let tuning = Tuning::default();
        let mut run = Run::new(1, &tuning);
        run.score = 500;
        assert_eq!(settle(&mut run, true, &tuning), Lifecycle::Alive);
        assert_eq!(run.hits, 1);
        assert_eq!(run.score, 500 + tuning.survival_increment - tuning.hit_penalty);
    }

    #[test]
    fn test_dies_on_max_hits() {
        let tuning = Tuning::default();
        let mut run = Run::new(1, &tuning);
        run.score = 10_000;
        for _ in 1..tuning.max_hits {
            assert_eq!(settle(&mut run, true, &tuning), Lifecycle::Alive);
        }
        assert_eq!(settle(&mut run, true, &tuning), Lifecycle::Dead);
    }

    #[test]
    fn test_dies_on_low_score() {
        let tuning = Tuning {
            max_hits: 100,
            ..Tuning::default()
        };
        let mut run = Run::new(1, &tuning);
        // -5 + 1 - 50 = -54, then -54 + 1 - 50 = -103
        assert_eq!(settle(&mut run, true, &tuning), Lifecycle::Alive);
        assert_eq!(settle(&mut run, true, &tuning), Lifecycle::Dead);
        assert!(run.score <= tuning.game_over_score);
    }
}
