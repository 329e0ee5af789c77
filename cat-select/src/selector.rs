use std::fmt;

use cat_env::{CatError, CatResult, RngSource};
use cat_kernel::{closest_index, fisher_information, ItemParams};

/// Which rule picks the next stimulus from a remaining pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Mfi,
    Closest,
    Random,
    Fixed,
    Middle,
}

impl Selector {
    /// Parse a selector name case-insensitively, per spec §4.5.
    pub fn parse_name(s: &str) -> CatResult<Self> {
        match s.to_lowercase().as_str() {
            "mfi" => Ok(Selector::Mfi),
            "closest" => Ok(Selector::Closest),
            "random" => Ok(Selector::Random),
            "fixed" => Ok(Selector::Fixed),
            "middle" => Ok(Selector::Middle),
            other => Err(CatError::invalid_config(format!(
                "unknown selector '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Selector::Mfi => "mfi",
            Selector::Closest => "closest",
            Selector::Random => "random",
            Selector::Fixed => "fixed",
            Selector::Middle => "middle",
        };
        f.write_str(name)
    }
}

/// Offset added to theta before finding the "closest" item, per spec §4.4.
const CLOSEST_OFFSET: f64 = 0.481;

/// Apply `selector` to `pool`, returning `(chosen, rest)`. Empty input
/// yields `(None, [])`, per spec §4.4. `zeta_of` projects a pool element
/// to its item parameters; `start_item_count` is only consulted by
/// `middle`'s jitter bound.
pub fn select<T: Clone>(
    selector: Selector,
    theta: f64,
    pool: &[T],
    zeta_of: impl Fn(&T) -> ItemParams,
    rng: &mut RngSource,
    start_item_count: usize,
) -> (Option<T>, Vec<T>) {
    if pool.is_empty() {
        return (None, Vec::new());
    }

    match selector {
        Selector::Mfi => select_mfi(theta, pool, zeta_of),
        Selector::Closest => select_closest(theta, pool, zeta_of),
        Selector::Random => select_random(pool, rng),
        Selector::Fixed => select_fixed(pool),
        Selector::Middle => select_middle(pool, rng, start_item_count),
    }
}

fn without_index<T: Clone>(pool: &[T], skip: usize) -> Vec<T> {
    pool.iter()
        .enumerate()
        .filter(|&(i, _)| i != skip)
        .map(|(_, item)| item.clone())
        .collect()
}

fn select_mfi<T: Clone>(theta: f64, pool: &[T], zeta_of: impl Fn(&T) -> ItemParams) -> (Option<T>, Vec<T>) {
    let best = (0..pool.len())
        .max_by(|&i, &j| {
            let ii = fisher_information(theta, zeta_of(&pool[i]));
            let ij = fisher_information(theta, zeta_of(&pool[j]));
            ii.partial_cmp(&ij).unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("pool is nonempty");

    let chosen = pool[best].clone();
    let mut rest: Vec<(usize, &T)> = pool
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != best)
        .collect();
    rest.sort_by(|&(_, a), &(_, b)| {
        zeta_of(a)
            .b
            .partial_cmp(&zeta_of(b).b)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    (Some(chosen), rest.into_iter().map(|(_, item)| item.clone()).collect())
}

fn select_closest<T: Clone>(theta: f64, pool: &[T], zeta_of: impl Fn(&T) -> ItemParams) -> (Option<T>, Vec<T>) {
    let mut order: Vec<usize> = (0..pool.len()).collect();
    order.sort_by(|&i, &j| {
        zeta_of(&pool[i])
            .b
            .partial_cmp(&zeta_of(&pool[j]).b)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let sorted_b: Vec<f64> = order.iter().map(|&i| zeta_of(&pool[i]).b).collect();
    let pos = closest_index(&sorted_b, theta + CLOSEST_OFFSET);
    let chosen_index = order[pos];
    let chosen = pool[chosen_index].clone();
    let rest = order
        .into_iter()
        .enumerate()
        .filter(|&(p, _)| p != pos)
        .map(|(_, i)| pool[i].clone())
        .collect();
    (Some(chosen), rest)
}

fn select_random<T: Clone>(pool: &[T], rng: &mut RngSource) -> (Option<T>, Vec<T>) {
    let idx = rng.index(pool.len());
    (Some(pool[idx].clone()), without_index(pool, idx))
}

fn select_fixed<T: Clone>(pool: &[T]) -> (Option<T>, Vec<T>) {
    (Some(pool[0].clone()), pool[1..].to_vec())
}

fn select_middle<T: Clone>(pool: &[T], rng: &mut RngSource, start_item_count: usize) -> (Option<T>, Vec<T>) {
    let n = pool.len();
    let base = n / 2;
    let delta = if n >= start_item_count {
        let half = (start_item_count / 2) as i64;
        rng.range_inclusive(-half, half)
    } else {
        0
    };
    let idx = (base as i64 + delta).clamp(0, n as i64 - 1) as usize;
    (Some(pool[idx].clone()), without_index(pool, idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeta(a: f64, b: f64, c: f64, d: f64) -> ItemParams {
        ItemParams { a, b, c, d }
    }

    #[test]
    fn empty_pool_yields_none_and_empty_rest() {
        let pool: Vec<ItemParams> = Vec::new();
        let mut rng = RngSource::new(1);
        let (chosen, rest) = select(Selector::Mfi, 0.0, &pool, |z| *z, &mut rng, 3);
        assert!(chosen.is_none());
        assert!(rest.is_empty());
    }

    #[test]
    fn mfi_picks_greatest_information_and_sorts_rest_by_difficulty() {
        let pool = vec![zeta(1.0, 2.0, 0.0, 1.0), zeta(1.0, 0.0, 0.0, 1.0), zeta(1.0, -1.0, 0.0, 1.0)];
        let mut rng = RngSource::new(1);
        // theta = 0 maximizes information at the item whose b is closest to 0.
        let (chosen, rest) = select(Selector::Mfi, 0.0, &pool, |z| *z, &mut rng, 3);
        assert_eq!(chosen.unwrap().b, 0.0);
        let rest_b: Vec<f64> = rest.iter().map(|z| z.b).collect();
        assert_eq!(rest_b, vec![-1.0, 2.0]);
    }

    #[test]
    fn closest_selector_scenario_five() {
        // spec.md §8 scenario 5
        let pool = vec![
            zeta(1.0, 0.5, 0.0, 1.0),
            zeta(1.0, 3.5, 0.0, 1.0),
            zeta(1.0, 2.0, 0.0, 1.0),
            zeta(1.0, -2.5, 0.0, 1.0),
            zeta(1.0, -1.8, 0.0, 1.0),
        ];
        let mut rng = RngSource::new(1);
        let (chosen, _rest) = select(Selector::Closest, -1.64, &pool, |z| *z, &mut rng, 3);
        assert_eq!(chosen.unwrap().b, -1.8);
    }

    #[test]
    fn fixed_always_picks_first_in_order() {
        let pool = vec![zeta(1.0, 5.0, 0.0, 1.0), zeta(1.0, -5.0, 0.0, 1.0)];
        let mut rng = RngSource::new(7);
        let (chosen, rest) = select(Selector::Fixed, 0.0, &pool, |z| *z, &mut rng, 3);
        assert_eq!(chosen.unwrap().b, 5.0);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].b, -5.0);
    }

    #[test]
    fn random_and_middle_partition_the_pool_exactly() {
        let pool: Vec<ItemParams> = (0..10).map(|i| zeta(1.0, i as f64, 0.0, 1.0)).collect();
        let mut rng = RngSource::new(42);
        let (chosen, rest) = select(Selector::Random, 0.0, &pool, |z| *z, &mut rng, 3);
        assert!(chosen.is_some());
        assert_eq!(rest.len(), pool.len() - 1);

        let (chosen, rest) = select(Selector::Middle, 0.0, &pool, |z| *z, &mut rng, 3);
        assert!(chosen.is_some());
        assert_eq!(rest.len(), pool.len() - 1);
    }

    #[test]
    fn middle_clamps_within_bounds_on_small_pools() {
        let pool = vec![zeta(1.0, 0.0, 0.0, 1.0), zeta(1.0, 1.0, 0.0, 1.0)];
        let mut rng = RngSource::new(3);
        for _ in 0..20 {
            let (chosen, rest) = select(Selector::Middle, 0.0, &pool, |z| *z, &mut rng, 5);
            assert!(chosen.is_some());
            assert_eq!(rest.len(), 1);
        }
    }

    #[test]
    fn parses_selector_names_case_insensitively() {
        assert_eq!(Selector::parse_name("MFI").unwrap(), Selector::Mfi);
        assert_eq!(Selector::parse_name("Closest").unwrap(), Selector::Closest);
        assert!(Selector::parse_name("nonsense").is_err());
    }
}
