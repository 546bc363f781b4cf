use serde::Serialize;
use std::collections::BTreeMap;

/// A value and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked<K> {
    pub value: K,
    pub count: usize,
}

impl<K> Ranked<K> {
    pub fn map<U>(self, f: impl FnOnce(K) -> U) -> Ranked<U> {
        Ranked {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// Counts each distinct value, most frequent first.
///
/// Equal counts are ordered by ascending key, so the result never depends on
/// row order.
pub fn value_counts<K, I>(values: I) -> Vec<Ranked<K>>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut ranked: Vec<Ranked<K>> = counts
        .into_iter()
        .map(|(value, count)| Ranked { value, count })
        .collect();
    // stable sort keeps the BTreeMap key order among ties
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// The most frequent value; the smallest key wins a tie. `None` for no values.
pub fn mode<K, I>(values: I) -> Option<Ranked<K>>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    value_counts(values).into_iter().next()
}

/// Arithmetic mean, `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_counts_orders_by_frequency() {
        let counts = value_counts(["Subscriber", "Subscriber", "Customer"]);
        assert_eq!(
            counts,
            vec![
                Ranked {
                    value: "Subscriber",
                    count: 2
                },
                Ranked {
                    value: "Customer",
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_ties_break_on_smallest_key() {
        let counts = value_counts([17, 8, 17, 8, 3]);
        assert_eq!(counts[0], Ranked { value: 8, count: 2 });
        assert_eq!(counts[1], Ranked { value: 17, count: 2 });
        assert_eq!(counts[2], Ranked { value: 3, count: 1 });

        assert_eq!(mode(["b", "a", "b", "a"]).unwrap().value, "a");
    }

    #[test]
    fn test_mode_of_nothing() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[60.0, 120.0, 180.0]), Some(120.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_ranked_map() {
        let ranked = Ranked {
            value: "x",
            count: 3,
        }
        .map(str::to_uppercase);
        assert_eq!(ranked.value, "X");
        assert_eq!(ranked.count, 3);
    }
}
