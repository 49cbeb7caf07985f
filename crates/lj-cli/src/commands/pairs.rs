use crate::cli::PairsArgs;
use crate::error::Result;
use ljbaseline::core::forcefield::params::ParameterSet;
use ljbaseline::engine::config::EvaluatorConfigBuilder;
use ljbaseline::engine::evaluator::LennardJonesEvaluator;
use tracing::info;

pub fn run(args: PairsArgs) -> Result<()> {
    info!("Loading parameters from {:?}", &args.parameters);
    let parameters = ParameterSet::load(&args.parameters)?;
    let config = EvaluatorConfigBuilder::new()
        .cutoff(args.cutoff)
        .type_params(parameters.as_map().clone())
        .build()?;
    let evaluator = LennardJonesEvaluator::new(&config)?;

    for line in format_table(&evaluator) {
        println!("{line}");
    }
    Ok(())
}

fn format_table(evaluator: &LennardJonesEvaluator) -> Vec<String> {
    let mut lines = vec![format!(
        "{:>10} {:>10} {:>12} {:>14} {:>18}",
        "type_a", "type_b", "sigma", "epsilon", "energy_at_cutoff"
    )];
    for ((a, b), param) in evaluator.pair_parameters().iter() {
        lines.push(format!(
            "{:>10} {:>10} {:>12.6} {:>14.8} {:>18.10e}",
            a.to_string(),
            b.to_string(),
            param.sigma,
            param.epsilon,
            param.energy_at_cutoff
        ));
    }
    lines
}
