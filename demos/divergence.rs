// Shows what a too-large learning rate looks like: the cost history explodes
// instead of shrinking. Run with `cargo run --example divergence`.
use linfit_gd::{GdError, LinearRegressionGD, SyntheticConfig};

fn main() -> Result<(), GdError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let data = SyntheticConfig::default().generate()?;

    for alpha in [0.02, 0.06, 0.5] {
        let mut model = LinearRegressionGD::builder()
            .learning_rate(alpha)
            .n_iterations(200)
            .log_every(0)
            .build()?;
        model.fit_dataset(&data.dataset)?;
        let h = model.cost_history();
        println!(
            "α = {:<5} first cost = {:>10.4}  last cost = {:>12.4e}  θ₁ = {:.4}",
            alpha,
            h[0],
            h[h.len() - 1],
            model.theta_1()
        );
    }

    // With the check enabled the first non-finite cost is an error.
    let mut strict = LinearRegressionGD::builder()
        .learning_rate(0.5)
        .n_iterations(5000)
        .check_divergence(true)
        .log_every(0)
        .build()?;
    match strict.fit_dataset(&data.dataset) {
        Err(e @ GdError::Divergence { .. }) => println!("{e}"),
        other => println!("unexpected: {other:?}"),
    }
    Ok(())
}
