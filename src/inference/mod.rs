//! Defines the interface to inference engines

use crate::dist::ProbDist;
use crate::factor::{Factor, FactorKey};
use crate::model::BayesNet;
use crate::util::Result;
use crate::variable::{Evidence, Variable};

use indexmap::IndexMap;

mod enumeration;
mod variable_elimination;

pub use self::enumeration::EnumerationEngine;
pub use self::variable_elimination::VariableEliminationEngine;


/// A `ConditionalInferenceEngine` is capable of answering Conditional Probability Queries of the form:
///     ```P(Y | E = e)```
pub trait ConditionalInferenceEngine {

    /// Infer the distribution ```P(query | evidence)``` over the domain of `query`
    fn infer(&self, query: &Variable, evidence: &Evidence) -> Result<ProbDist>;

}


/// Answer ```P(query | evidence)``` by variable elimination.
pub fn elimination_ask(query: &str, evidence: &Evidence, network: &BayesNet) -> Result<ProbDist> {
    let var = network.variable(query)?;
    VariableEliminationEngine::new(network).infer(var, evidence)
}


/// Answer ```P(query | evidence)``` by enumerating the joint distribution.
pub fn enumeration_ask(query: &str, evidence: &Evidence, network: &BayesNet) -> Result<ProbDist> {
    let var = network.variable(query)?;
    EnumerationEngine::new(network).infer(var, evidence)
}


/// Read the (unnormalized) distribution over `query` out of a `Factor` whose scope is `query` and
/// some of the evidence variables, then normalize it.
fn distribution_over(phi: &Factor, query: &Variable, evidence: &Evidence) -> Result<ProbDist> {
    let mut weights = IndexMap::new();

    for value in query.domain() {
        let p = match evidence.get(query) {
            // an observed query can take no other value
            Some(observed) if observed != value => 0.0,
            _ => phi.get(FactorKey::Event(&evidence.extended(query, value.clone())))?
        };
        weights.insert(value.clone(), p);
    }

    ProbDist::from_weights(weights)
}
