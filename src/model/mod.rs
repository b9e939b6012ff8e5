//! Defines the Bayesian network: the directed graphical model whose `Variable`s are converted
//! into `Factor`s for inference.

pub mod directed;

pub use self::directed::{BayesNet, BayesNetBuilder};
