//! Explicit (item, weight) distribution tables
//!
//! All randomness in the engine goes through a seedable `StdRng` shared
//! behind a mutex, so probability tests can fix the seed.

use std::sync::Arc;

use moodcast_core::{Error, Intensity, Result};
use parking_lot::Mutex;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random source shared by the engine components
pub type SharedRng = Arc<Mutex<StdRng>>;

/// Create a shared random source, seeded when a seed is given
pub fn shared_rng(seed: Option<u64>) -> SharedRng {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Arc::new(Mutex::new(rng))
}

/// Pick one element uniformly
pub fn choose<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

/// Items paired with relative weights
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    items: Vec<T>,
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl<T> WeightedTable<T> {
    /// Build from (item, weight) pairs.
    ///
    /// Fails when the table is empty, a weight is negative, or all weights
    /// are zero.
    pub fn new(entries: impl IntoIterator<Item = (T, f64)>) -> Result<Self> {
        let (items, weights): (Vec<T>, Vec<f64>) = entries.into_iter().unzip();
        let index = WeightedIndex::new(&weights)
            .map_err(|e| Error::Configuration(format!("invalid weight table: {}", e)))?;

        Ok(Self {
            items,
            weights,
            index,
        })
    }

    /// Draw one item
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.items[self.index.sample(rng)]
    }

    /// Normalized probability of the item at `position`
    pub fn probability(&self, position: usize) -> f64 {
        let total: f64 = self.weights.iter().sum();
        self.weights.get(position).map_or(0.0, |w| w / total)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fixed intensity distribution (0.35 / 0.40 / 0.20 / 0.05)
pub fn intensity_table() -> Result<WeightedTable<Intensity>> {
    WeightedTable::new(
        Intensity::all()
            .iter()
            .map(|i| (*i, i.draw_probability())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_tables() {
        assert!(WeightedTable::<&str>::new(Vec::new()).is_err());
        assert!(WeightedTable::new(vec![("a", 0.0), ("b", 0.0)]).is_err());
        assert!(WeightedTable::new(vec![("a", -1.0), ("b", 2.0)]).is_err());
    }

    #[test]
    fn test_zero_weight_never_drawn() {
        let table = WeightedTable::new(vec![("never", 0.0), ("always", 1.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1_000 {
            assert_eq!(*table.sample(&mut rng), "always");
        }
        assert_eq!(table.probability(0), 0.0);
        assert_eq!(table.probability(1), 1.0);
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let table = WeightedTable::new(vec![(1, 1.0), (2, 1.0), (3, 1.0)]).unwrap();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first: Vec<i32> = (0..50).map(|_| *table.sample(&mut a)).collect();
        let second: Vec<i32> = (0..50).map(|_| *table.sample(&mut b)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_intensity_table_probabilities() {
        let table = intensity_table().unwrap();
        assert_eq!(table.len(), 4);
        assert!((table.probability(0) - 0.35).abs() < 1e-9);
        assert!((table.probability(3) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_choose_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let empty: [u8; 0] = [];
        assert!(choose(&empty, &mut rng).is_none());
        assert_eq!(choose(&[7], &mut rng), Some(&7));
    }
}
