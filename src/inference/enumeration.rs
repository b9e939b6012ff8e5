//! Defines a `ConditionalInferenceEngine` that answers queries by enumerating the full joint
//! distribution.
//!
//! Every event consistent with the evidence is scored by the chain rule, so the cost is
//! exponential in the number of unobserved variables. It is mainly useful as a reference for
//! checking `VariableEliminationEngine` on small networks.

use crate::dist::ProbDist;
use crate::model::BayesNet;
use crate::util::Result;
use crate::variable::{consistent_events, Evidence, Variable};
use super::ConditionalInferenceEngine;

use indexmap::IndexMap;
use tracing::debug;


pub struct EnumerationEngine<'a> {

    /// the network to answer queries against
    network: &'a BayesNet

}


impl<'a> EnumerationEngine<'a> {

    pub fn new(network: &'a BayesNet) -> Self {
        EnumerationEngine { network }
    }

}


impl<'a> ConditionalInferenceEngine for EnumerationEngine<'a> {

    fn infer(&self, query: &Variable, evidence: &Evidence) -> Result<ProbDist> {
        let variables: Vec<&Variable> = self.network.variables().iter().collect();
        let mut weights = IndexMap::new();

        for value in query.domain() {
            if evidence.get(query).map_or(false, |observed| observed != value) {
                weights.insert(value.clone(), 0.0);
                continue;
            }

            let extended = evidence.extended(query, value.clone());
            let p = consistent_events(&variables, &extended)
                .map(|row| self.network.probability(&Evidence::from_event(&variables, &row)))
                .sum::<Result<f64>>()?;

            weights.insert(value.clone(), p);
        }

        debug!(query = %query, "enumeration complete");

        ProbDist::from_weights(weights)
    }

}
