//! Question sampling without replacement.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::model::Question;

/// Draw up to `count` distinct questions from `bank` in random order.
///
/// Indices are permuted with a Fisher–Yates shuffle and the first `count`
/// are taken, so every subset and ordering is equally likely. A `count`
/// larger than the bank yields the whole bank. The bank is not modified.
pub fn sample<R: Rng + ?Sized>(bank: &[Question], count: usize, rng: &mut R) -> Vec<Question> {
    let mut indices: Vec<usize> = (0..bank.len()).collect();
    indices.shuffle(rng);
    indices.truncate(count);
    indices.into_iter().map(|i| bank[i].clone()).collect()
}

/// Owns the random source a session draws its questions with.
///
/// Production code uses [`QuestionSampler::from_os_rng`]; tests inject a
/// seeded generator so draws are reproducible.
#[derive(Debug, Clone)]
pub struct QuestionSampler<R = StdRng> {
    rng: R,
}

impl QuestionSampler<StdRng> {
    /// Sampler seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic sampler for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuestionSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// See [`sample`].
    pub fn sample(&mut self, bank: &[Question], count: usize) -> Vec<Question> {
        sample(bank, count, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn bank(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("question {i}"),
                    vec!["yes".into(), "no".into()],
                    i % 2,
                    "",
                )
            })
            .collect()
    }

    #[test]
    fn sample_returns_distinct_members_of_bank() {
        let bank = bank(12);
        let mut rng = StdRng::seed_from_u64(42);
        for count in 0..=bank.len() {
            let drawn = sample(&bank, count, &mut rng);
            assert_eq!(drawn.len(), count);
            let texts: HashSet<&str> = drawn.iter().map(|q| q.text.as_str()).collect();
            assert_eq!(texts.len(), count, "duplicates in sample of {count}");
            assert!(drawn.iter().all(|q| bank.contains(q)));
        }
    }

    #[test]
    fn oversized_count_degrades_to_whole_bank() {
        let bank = bank(4);
        let drawn = sample(&bank, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(drawn.len(), 4);
    }

    #[test]
    fn empty_bank_yields_empty_sample() {
        let drawn = sample(&[], 10, &mut StdRng::seed_from_u64(1));
        assert!(drawn.is_empty());
    }

    #[test]
    fn bank_is_left_untouched() {
        let bank = bank(8);
        let before = bank.clone();
        let _ = sample(&bank, 5, &mut StdRng::seed_from_u64(9));
        assert_eq!(bank, before);
    }

    #[test]
    fn seeded_samplers_are_reproducible() {
        let bank = bank(20);
        let a = QuestionSampler::seeded(7).sample(&bank, 10);
        let b = QuestionSampler::seeded(7).sample(&bank, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn every_question_can_lead() {
        // With a uniform permutation each of the 5 questions should show up
        // first within a few hundred draws.
        let bank = bank(5);
        let mut sampler = QuestionSampler::seeded(3);
        let mut leaders = HashSet::new();
        for _ in 0..500 {
            leaders.insert(sampler.sample(&bank, 1)[0].text.clone());
        }
        assert_eq!(leaders.len(), 5);
    }
}
