//! Synthetic item collections for benchmarks and demos.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use view_model::{Item, Tags};

/// Genres an item can be tagged with.
pub const TAGS: [&str; 10] = [
    "Action",
    "Comedy",
    "Drama",
    "Horror",
    "Sci-Fi",
    "Romance",
    "Thriller",
    "Documentary",
    "Animation",
    "Fantasy",
];

/// Base titles; they repeat with a numeric suffix after the first cycle.
pub const TITLES: [&str; 10] = [
    "The Adventure",
    "Dark Night",
    "Summer Love",
    "Space Journey",
    "Mystery Island",
    "City Lights",
    "Wild Chase",
    "Silent Echo",
    "Final Stand",
    "Ocean Deep",
];

/// Anything that can produce a collection of `count` items.
pub trait ItemSource {
    /// Returns exactly `count` items.
    fn generate(&mut self, count: usize) -> Vec<Item>;
}

/// Random catalogue in the shape the benchmark expects.
pub struct RandomItems {
    rng: StdRng,
}

impl RandomItems {
    /// Reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    fn tags(&mut self) -> Tags {
        let count = self.rng.gen_range(1..=3);
        TAGS.choose_multiple(&mut self.rng, count)
            .map(|tag| tag.to_string())
            .collect::<SmallVec<_>>()
    }

    fn rating(&mut self) -> f64 {
        let raw: f64 = self.rng.gen::<f64>() * 4.0 + 1.0;
        (raw * 10.0).round() / 10.0
    }
}

/// Title for position `index`: base title, plus ` {cycle}` from the second cycle.
pub fn title_for(index: usize) -> String {
    let base = TITLES[index % TITLES.len()];
    let cycle = index / TITLES.len() + 1;
    if cycle > 1 {
        format!("{base} {cycle}")
    } else {
        base.to_string()
    }
}

impl ItemSource for RandomItems {
    fn generate(&mut self, count: usize) -> Vec<Item> {
        debug!("generating {count} items");
        (0..count)
            .map(|i| Item {
                id: format!("item-{i}"),
                title: title_for(i),
                tags: self.tags(),
                rating: self.rating(),
                is_playable: self.rng.gen::<f64>() > 0.2,
            })
            .collect()
    }
}
