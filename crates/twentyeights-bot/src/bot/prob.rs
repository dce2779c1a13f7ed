//! Hypergeometric draws over the unseen cards.

use std::sync::OnceLock;

/// Factorials 0! through 32!, one entry per possible count of unseen cards.
/// 32! is around 2.6e35, well inside f64 range.
fn factorial(n: usize) -> f64 {
    static TABLE: OnceLock<[f64; 33]> = OnceLock::new();
    let table = TABLE.get_or_init(|| {
        let mut table = [1.0; 33];
        for i in 1..table.len() {
            table[i] = table[i - 1] * i as f64;
        }
        table
    });
    table[n]
}

pub(crate) fn combinations(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    factorial(n) / (factorial(k) * factorial(n - k))
}

/// Chance of drawing exactly `successes` of the `success_population` when a
/// `sample` is dealt from `population` cards without replacement.
///
/// Impossible requests return zero rather than panicking; the chance
/// calculations routinely probe states the deal has already ruled out.
pub fn hyper_geo_prob(
    successes: usize,
    success_population: usize,
    sample: usize,
    population: usize,
) -> f64 {
    let success_population = success_population.min(population);
    if successes > sample || successes > success_population || sample > population {
        return 0.0;
    }
    let failures = sample - successes;
    if failures > population - success_population {
        return 0.0;
    }
    let chance = combinations(success_population, successes)
        * combinations(population - success_population, failures)
        / combinations(population, sample);
    debug_assert!((0.0..=1.0).contains(&chance));
    chance
}
