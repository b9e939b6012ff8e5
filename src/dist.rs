//! Probability distributions over the outcomes of a single `Variable`.

use crate::util::{normalize, BayesError, Result};
use crate::variable::Outcome;

use indexmap::IndexMap;
use itertools::Itertools;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use std::fmt;


/// The weights a `ProbDist` is built from.
#[derive(Clone, Debug, PartialEq)]
pub enum WeightSpec {
    /// Shorthand for a boolean distribution: `Scalar(p)` is `{T: p, F: 1 - p}`
    Scalar(f64),

    /// Explicit (unnormalized) weights for each outcome
    Mapping(Vec<(Outcome, f64)>)
}

impl From<f64> for WeightSpec {
    fn from(p: f64) -> Self {
        WeightSpec::Scalar(p)
    }
}

impl<O: Into<Outcome>> From<Vec<(O, f64)>> for WeightSpec {
    fn from(pairs: Vec<(O, f64)>) -> Self {
        WeightSpec::Mapping(pairs.into_iter().map(|(o, w)| (o.into(), w)).collect())
    }
}


/// A Probability Distribution is an `{outcome: probability}` mapping whose values sum to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbDist {
    probs: IndexMap<Outcome, f64>
}

impl ProbDist {

    /// Build a distribution, normalizing the weights.
    ///
    /// # Errors
    /// * `BayesError::MalformedDistribution` if the weights cannot be normalized, or an outcome
    ///   is given twice
    pub fn new<W: Into<WeightSpec>>(spec: W) -> Result<Self> {
        let weights: IndexMap<Outcome, f64> = match spec.into() {
            WeightSpec::Scalar(p) => vec![(Outcome::True, p), (Outcome::False, 1.0 - p)].into_iter().collect(),
            WeightSpec::Mapping(pairs) => {
                let mut weights = IndexMap::with_capacity(pairs.len());
                for (outcome, w) in pairs {
                    if weights.contains_key(&outcome) {
                        return Err(BayesError::MalformedDistribution(format!("outcome {} is given twice", outcome)));
                    }
                    weights.insert(outcome, w);
                }
                weights
            }
        };

        ProbDist::from_weights(weights)
    }

    /// Build a distribution from unnormalized weights
    pub fn from_weights(weights: IndexMap<Outcome, f64>) -> Result<Self> {
        Ok(ProbDist { probs: normalize(weights)? })
    }

    /// The probability of `outcome`, or `None` if it is not part of the distribution
    pub fn get(&self, outcome: &Outcome) -> Option<f64> {
        self.probs.get(outcome).cloned()
    }

    pub fn outcomes(&self) -> indexmap::map::Keys<'_, Outcome, f64> {
        self.probs.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Outcome, f64> {
        self.probs.iter()
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Draw `n` outcomes, with replacement, according to the probabilities.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Outcome>> {
        let index = WeightedIndex::new(self.probs.values())
            .map_err(|e| BayesError::MalformedDistribution(e.to_string()))?;
        let outcomes: Vec<&Outcome> = self.probs.keys().collect();

        Ok((0..n).map(|_| outcomes[index.sample(rng)].clone()).collect())
    }
}

impl fmt::Display for ProbDist {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.probs.iter().map(|(o, p)| format!("{}: {:.4}", o, p)).join(", "))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scalar() {
        let d = ProbDist::new(0.75).unwrap();
        assert_eq!(2, d.len());
        assert_eq!(Some(0.75), d.get(&Outcome::True));
        assert_eq!(Some(0.25), d.get(&Outcome::False));
        assert_eq!(None, d.get(&Outcome::Level(0)));
    }

    #[test]
    fn mapping() {
        let d = ProbDist::new(vec![("lo", 1.0), ("mid", 2.0), ("hi", 1.0)]).unwrap();
        assert_eq!(Some(0.5), d.get(&Outcome::from("mid")));

        let sum: f64 = d.iter().map(|(_, p)| p).sum();
        assert_abs_diff_eq!(1.0, sum, epsilon = 1e-12);

        let order: Vec<String> = d.outcomes().map(|o| o.to_string()).collect();
        assert_eq!(vec!["lo", "mid", "hi"], order);
        assert_eq!("{lo: 0.2500, mid: 0.5000, hi: 0.2500}", d.to_string());
    }

    #[test]
    fn malformed() {
        assert!(ProbDist::new(vec![(true, 0.0), (false, 0.0)]).is_err());
        assert!(ProbDist::new(WeightSpec::Mapping(vec![])).is_err());
        // 1 - p is negative
        assert!(ProbDist::new(1.5).is_err());
    }

    #[test]
    fn repeated_outcome() {
        match ProbDist::new(vec![("a", 0.3), ("a", 0.5), ("b", 0.2)]) {
            Err(BayesError::MalformedDistribution(msg)) => assert!(msg.contains("a")),
            other => panic!("unexpected result: {:?}", other)
        };
    }

    #[test]
    fn sample() {
        let d = ProbDist::new(0.8).unwrap();
        let mut rng = StdRng::seed_from_u64(17);

        let draws = d.sample(10_000, &mut rng).unwrap();
        assert_eq!(10_000, draws.len());

        let trues = draws.iter().filter(|&o| *o == Outcome::True).count() as f64;
        assert_abs_diff_eq!(0.8, trues / 10_000., epsilon = 0.02);
    }

    #[test]
    fn sample_certain() {
        let d = ProbDist::new(vec![(1i64, 0.0), (2i64, 3.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        assert!(d.sample(50, &mut rng).unwrap().iter().all(|o| *o == Outcome::Level(2)));
        assert!(d.sample(0, &mut rng).unwrap().is_empty());
    }
}
