//! Recommendation sampling strategies.
//!
//! Detail pages close with a short strip of other content. Two named
//! strategies cover every surface: [`RandomSampler`] for film pages,
//! [`CategoryMatchSampler`] for blog posts. Venue pages show a curated
//! list straight from the database and need no sampler.
//!
//! Excluding the entity being viewed is the caller's job (the pool
//! queries filter it out); the strategies only decide order and count.

use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform sampler: shuffle the candidate pool, keep the first `count`.
///
/// The RNG is caller-supplied so tests can seed it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSampler;

impl RandomSampler {
    pub fn sample<T, R: Rng>(&self, mut pool: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
        pool.shuffle(rng);
        pool.truncate(count);
        pool
    }
}

/// Category-match sampler: keep only candidates sharing the wanted
/// category, in their original order, truncated to `count`.
///
/// Deliberately deterministic; a pool sorted by recency yields the
/// most recent same-category items. Candidates from other categories
/// are dropped, not used as filler. With no wanted category the pool
/// order stands as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryMatchSampler;

impl CategoryMatchSampler {
    pub fn sample<T, F>(
        &self,
        pool: Vec<T>,
        category: Option<&str>,
        count: usize,
        category_of: F,
    ) -> Vec<T>
    where
        F: Fn(&T) -> Option<&str>,
    {
        let mut picked: Vec<T> = match category {
            Some(wanted) => pool
                .into_iter()
                .filter(|candidate| category_of(candidate) == Some(wanted))
                .collect(),
            None => pool,
        };
        picked.truncate(count);
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_sample_respects_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = RandomSampler.sample((0..10).collect(), 3, &mut rng);
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn random_sample_never_duplicates() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let mut picked = RandomSampler.sample((0..10).collect(), 4, &mut rng);
            picked.sort_unstable();
            picked.dedup();
            assert_eq!(picked.len(), 4);
        }
    }

    #[test]
    fn random_sample_short_pool_returns_all() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut picked = RandomSampler.sample(vec![1, 2], 5, &mut rng);
        picked.sort_unstable();
        assert_eq!(picked, vec![1, 2]);
    }

    #[test]
    fn random_sample_is_roughly_uniform() {
        // 1000 draws of 3 from a pool of 10: every item expects ~300
        // appearances. Wide bounds keep this robust to the seed.
        let mut rng = StdRng::seed_from_u64(42);
        let mut tally = [0usize; 10];
        for _ in 0..1000 {
            for item in RandomSampler.sample((0..10).collect::<Vec<usize>>(), 3, &mut rng) {
                tally[item] += 1;
            }
        }
        assert_eq!(tally.iter().sum::<usize>(), 3000);
        for (item, count) in tally.iter().enumerate() {
            assert!(
                (200..=400).contains(count),
                "item {item} drawn {count} times of 1000"
            );
        }
    }

    #[test]
    fn category_match_keeps_only_same_category_in_order() {
        let pool = vec![
            ("a", Some("planning")),
            ("b", Some("real-weddings")),
            ("c", Some("planning")),
            ("d", None),
        ];
        let picked =
            CategoryMatchSampler.sample(pool, Some("planning"), 3, |candidate| candidate.1);
        let names: Vec<&str> = picked.iter().map(|candidate| candidate.0).collect();
        assert_eq!(names, vec!["a", "c"], "other categories are not filler");
    }

    #[test]
    fn category_match_without_category_keeps_order() {
        let pool = vec![("a", Some("planning")), ("b", None), ("c", Some("tips"))];
        let picked = CategoryMatchSampler.sample(pool, None, 2, |candidate| candidate.1);
        let names: Vec<&str> = picked.iter().map(|candidate| candidate.0).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn category_match_respects_count() {
        let pool = vec![
            ("a", Some("tips")),
            ("b", Some("tips")),
            ("c", Some("tips")),
        ];
        let picked = CategoryMatchSampler.sample(pool, Some("tips"), 2, |candidate| candidate.1);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].0, "a");
    }
}
