use poly_swarm::prelude::*;

fn main() -> anyhow::Result<()> {
    // time-varying weights, cubic fit, smoothed motion
    let config = SwarmConfig::new(200.0, 12, 10.0, 350.0, 10, 60)
        .with_coefficients(4)
        .with_particle_spread(1.5)
        .with_substeps(4);

    let history = CostHistory::new();
    let mut swarm = Swarm::seeded(config, 2024)?.with_observer(history.clone());

    println!("\n################## time-varying swarm ##################");
    while !swarm.advance()? {
        if swarm.substep() == 0 && swarm.step() % 10 == 0 {
            swarm.print_status();
        }
    }
    swarm.print_status();
    swarm.print_summary();
    println!("Cost history: {:?}", history.cost_history());

    // fixed weights, quadratic fit, shared draws
    println!("\n################## classic swarm ##################");
    let mut classic = Swarm::seeded(SwarmConfig::classic(40), 2024)?;
    let summary = classic.run_to_completion()?;
    classic.print_summary();

    if let Some(best) = summary.best {
        println!(
            "Classic fit after {} steps: {:.2} (target {:.2})",
            summary.steps, best.position, summary.target
        );
    }

    Ok(())
}
