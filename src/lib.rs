//! Exact inference over discrete Bayesian networks by variable elimination.
//!
//! A `BayesNet` holds discrete `Variable`s, each with a conditional probability table over its
//! parents. Each `Variable` is converted into a `Factor`; factors are combined by
//! `Factor::pointwise_product` and variables are eliminated by `Factor::sum_out` until only the
//! query remains.

pub mod util;
pub mod variable;
pub mod dist;
pub mod cpt;
pub mod factor;
pub mod model;
pub mod inference;

pub use crate::cpt::{CPTable, CptSpec};
pub use crate::dist::{ProbDist, WeightSpec};
pub use crate::factor::{variable_to_factor, Factor, FactorKey};
pub use crate::inference::{
    elimination_ask, enumeration_ask, ConditionalInferenceEngine, EnumerationEngine,
    VariableEliminationEngine,
};
pub use crate::model::{BayesNet, BayesNetBuilder};
pub use crate::util::{normalize, normalize_weights, BayesError, Result};
pub use crate::variable::{
    all_consistent_events, consistent_events, filter_event_values, matches_evidence, Evidence,
    Outcome, Row, VarId, Variable,
};
