use rand::{Rng, distr::Open01};

/// Weighted reservoir sampling with a reservoir of one (Efraimidis and Spirakis, A-ExpJ).
///
/// Items stream in one at a time; after any prefix of the stream the held item was chosen with
/// probability proportional to its weight. Instead of drawing a key for every item, the sampler
/// draws how much weight to skip before the next replacement, so most offers are a subtraction.
#[derive(Clone, Debug)]
pub struct Reservoir<T> {
    /// The held item and its key `u^(1/w)`.
    held: Option<(T, f64)>,

    /// Weight still to be skipped before the held item is replaced.
    skip: f64,
}

impl<T> Default for Reservoir<T> {
    fn default() -> Self {
        Reservoir { held: None, skip: 0.0 }
    }
}

impl<T> Reservoir<T> {
    /// An empty reservoir.
    pub fn new() -> Reservoir<T> {
        Reservoir::default()
    }

    /// Consumes the reservoir, yielding the chosen item if anything was offered.
    pub fn into_result(self) -> Option<T> {
        self.held.map(|(item, _)| item)
    }

    /// Whether nothing with positive weight has been offered yet.
    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    /// Offers an item to the reservoir. Items without a positive, finite weight can never be chosen.
    pub fn offer<R: Rng + ?Sized>(&mut self, item: T, weight: f64, rng: &mut R) {
        if !(weight > 0.0 && weight.is_finite()) {
            return;
        }

        match self.held.as_ref().map(|(_, key)| *key) {
            None => {
                let key = open_unit(rng).powf(weight.recip());
                self.hold(item, key, rng);
            },
            Some(key) => {
                self.skip -= weight;
                if self.skip <= 0.0 {
                    // the replacement's key must beat the held key, so draw it from (key^w, 1)
                    let threshold = key.powf(weight);
                    let stretched = threshold + (1.0 - threshold) * open_unit(rng);
                    self.hold(item, stretched.powf(weight.recip()), rng);
                }
            }
        }
    }

    /// The currently chosen item, if anything was offered.
    pub fn result(&self) -> Option<&T> {
        self.held.as_ref().map(|(item, _)| item)
    }

    fn hold<R: Rng + ?Sized>(&mut self, item: T, key: f64, rng: &mut R) {
        let key = key.clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON);
        self.skip = open_unit(rng).ln() / key.ln();
        self.held = Some((item, key));
    }
}

/// Picks one item uniformly from a stream of unknown length in a single pass.
pub fn sample_uniform<I, R>(items: I, rng: &mut R) -> Option<I::Item>
where
    I: IntoIterator,
    R: Rng + ?Sized,
{
    let mut reservoir = Reservoir::new();
    for item in items {
        reservoir.offer(item, 1.0, rng);
    }
    reservoir.into_result()
}

/// A uniform draw from the open interval (0, 1); both logarithms above need it nonzero and below one.
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.sample(Open01)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::{Reservoir, sample_uniform};

    const TRIALS: usize = 60_000;

    #[test]
    fn nothing_offered_yields_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(sample_uniform(std::iter::empty::<usize>(), &mut rng), None);

        let reservoir = Reservoir::<usize>::new();
        assert!(reservoir.is_empty());
        assert_eq!(reservoir.result(), None);
    }

    #[test]
    fn a_single_item_is_always_chosen() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..100 {
            assert_eq!(sample_uniform([42], &mut rng), Some(42));
        }
    }

    #[test]
    fn unit_weights_choose_uniformly_in_any_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let n = 6;
        let mut forwards = vec![0usize; n];
        let mut backwards = vec![0usize; n];
        for _ in 0..TRIALS {
            forwards[sample_uniform(0..n, &mut rng).unwrap()] += 1;
            backwards[sample_uniform((0..n).rev(), &mut rng).unwrap()] += 1;
        }
        for counts in [forwards, backwards] {
            for (item, count) in counts.into_iter().enumerate() {
                let freq = count as f64 / TRIALS as f64;
                assert!((freq - 1.0 / n as f64).abs() < 0.01, "item {item} chosen with frequency {freq}");
            }
        }
    }

    #[test]
    fn weights_bias_the_choice_proportionally() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let weights = [1.0, 3.0, 0.0, 4.0];
        let mut counts = [0usize; 4];
        for _ in 0..TRIALS {
            let mut reservoir = Reservoir::new();
            for (item, weight) in weights.iter().enumerate() {
                reservoir.offer(item, *weight, &mut rng);
            }
            counts[reservoir.into_result().unwrap()] += 1;
        }
        assert_eq!(counts[2], 0);
        for (item, expected) in [(0, 0.125), (1, 0.375), (3, 0.5)] {
            let freq = counts[item] as f64 / TRIALS as f64;
            assert!((freq - expected).abs() < 0.015, "item {item} chosen with frequency {freq}");
        }
    }

    #[test]
    fn seeded_sources_are_reproducible() {
        let picks = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..20).map(|_| sample_uniform(0..1000, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(picks(9), picks(9));
    }
}
