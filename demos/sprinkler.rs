//! Provides an example of how to use bayes-ve to perform inference on a Bayesian Network.
//!
//! Run with `RUST_LOG=bayes_ve=debug` to watch the factors being multiplied and summed out.

use bayes_ve as bv;
use bv::ConditionalInferenceEngine;
use tracing_subscriber::EnvFilter;

fn main() -> bv::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    /////////////////////////////////////////////////////
    // Step 1: Build Model
    let model = build_model()?;

    /////////////////////////////////////////////////////
    // Step 2: Compile some evidence
    let evidence = model.evidence(vec![("Sprinkler", true), ("WetGrass", true)])?;

    /////////////////////////////////////////////////////
    // Step 3: Build an inference engine
    let engine = bv::VariableEliminationEngine::new(&model);

    // uncomment for enumeration of the full joint
    // let engine = bv::EnumerationEngine::new(&model);

    /////////////////////////////////////////////////////
    // Step 4: Run a Conditional Query
    let rain = model.variable("Rain")?;
    let p = engine.infer(rain, &evidence)?;

    for (value, prob) in p.iter() {
        println!("P(Rain = {} | Sprinkler = T, WetGrass = T) = {:.4}", value, prob);
    }

    /////////////////////////////////////////////////////
    // Step 5: The same, one factor at a time
    let cloudy = model.variable("Cloudy")?;
    let none = bv::Evidence::new();
    let joint = bv::variable_to_factor(&model, rain, &none)?
        .pointwise_product(&bv::variable_to_factor(&model, cloudy, &none)?, &none)?;
    let marginal = joint.sum_out(cloudy, &none)?;

    for (row, prob) in marginal.iter() {
        println!("P(Rain = {}) = {:.4}", row[0], prob);
    }

    Ok(())
}

fn build_model() -> bv::Result<bv::BayesNet> {
    bv::BayesNetBuilder::new()
        .add("Cloudy", &[], 0.5)
        .add("Sprinkler", &["Cloudy"], bv::CptSpec::keyed(vec![(true, 0.1), (false, 0.5)]))
        .add("Rain", &["Cloudy"], bv::CptSpec::keyed(vec![(true, 0.8), (false, 0.2)]))
        .add("WetGrass", &["Sprinkler", "Rain"], bv::CptSpec::rows(vec![
            (vec![true, true], 0.99),
            (vec![true, false], 0.90),
            (vec![false, true], 0.90),
            (vec![false, false], 0.00),
        ]))
        .build()
}
