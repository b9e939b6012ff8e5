//! Defines the `Error` type for the bayes-ve library, along with the normalization routines
//! shared by distributions and inference.

use crate::variable::Outcome;

use indexmap::IndexMap;
use thiserror::Error;

use std::result;

pub type Result<T> = result::Result<T, BayesError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum BayesError {

    /// The weights of a distribution could not be normalized: the total was zero (or not
    /// finite), or a normalized value fell outside of `[0, 1]`.
    #[error("Malformed distribution: {0}")]
    MalformedDistribution(String),

    /// A conditional probability table did not fit the parents of its variable
    #[error("Malformed conditional probability table: {0}")]
    MalformedTable(String),

    /// A variable name was referenced that has not been added to the network
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// Represents a variable that was added to a network more than once
    #[error("Variable added twice: {0}")]
    DuplicateVariable(String),

    /// A lookup by event did not cover every variable it needed. The value holds the names of
    /// the uncovered variables.
    #[error("Missing assignments to the required variables: {0:?}")]
    IncompleteEvidenceLookup(Vec<String>),

    /// A lookup for a row that is not stored in the table
    #[error("No entry for row {0}")]
    MissingRow(String),

}


/// Scale `weights` so that they sum to 1.
///
/// # Errors
/// * `BayesError::MalformedDistribution` if the total weight is zero or not finite, or if any
///   normalized value lies outside `[0, 1]` (only possible with negative weights).
pub fn normalize(weights: IndexMap<Outcome, f64>) -> Result<IndexMap<Outcome, f64>> {
    let total: f64 = weights.values().sum();
    check_total(total)?;

    weights.into_iter()
           .map(|(outcome, w)| check_probability(w / total).map(|p| (outcome, p)))
           .collect()
}


/// Scale a bare list of weights so that they sum to 1. Same contract as `normalize`.
pub fn normalize_weights(weights: &[f64]) -> Result<Vec<f64>> {
    let total: f64 = weights.iter().sum();
    check_total(total)?;

    weights.iter().map(|&w| check_probability(w / total)).collect()
}


fn check_total(total: f64) -> Result<()> {
    if total == 0.0 || !total.is_finite() {
        return Err(BayesError::MalformedDistribution(format!("cannot normalize a total weight of {}", total)));
    }
    Ok(())
}


fn check_probability(p: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(BayesError::MalformedDistribution(format!("probability {} is outside of [0, 1]", p)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_map() {
        let mut weights = IndexMap::new();
        weights.insert(Outcome::True, 3.0);
        weights.insert(Outcome::False, 1.0);

        let dist = normalize(weights).unwrap();
        assert_eq!(dist[&Outcome::True], 0.75);
        assert_eq!(dist[&Outcome::False], 0.25);

        // order is kept
        let keys: Vec<&Outcome> = dist.keys().collect();
        assert_eq!(keys, vec![&Outcome::True, &Outcome::False]);
    }

    #[test]
    fn normalize_list() {
        let p = normalize_weights(&[1.0, 1.0, 2.0]).unwrap();
        assert_eq!(p, vec![0.25, 0.25, 0.5]);
    }

    #[test]
    fn normalize_zero_total() {
        let mut weights = IndexMap::new();
        weights.insert(Outcome::True, 0.0);
        weights.insert(Outcome::False, 0.0);

        match normalize(weights) {
            Err(BayesError::MalformedDistribution(_)) => (),
            other => panic!("unexpected result: {:?}", other)
        };

        assert!(normalize_weights(&[]).is_err());
    }

    #[test]
    fn normalize_negative() {
        // total is positive, but one of the entries ends up below zero
        match normalize_weights(&[2.0, -1.0]) {
            Err(BayesError::MalformedDistribution(_)) => (),
            other => panic!("unexpected result: {:?}", other)
        };
    }
}
