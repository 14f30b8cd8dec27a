#[cfg(feature = "ndarray")]
fn main() {
    use linfit_gd::backend::NdarrayBackend;
    use linfit_gd::{LinearRegressionGDBuilder, SyntheticConfig};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let data = SyntheticConfig::default().generate().unwrap();
    let mut model = LinearRegressionGDBuilder::<NdarrayBackend>::new()
        .learning_rate(0.02)
        .n_iterations(2000)
        .build()
        .unwrap();
    model.fit_dataset(&data.dataset).unwrap();

    let pred = model.predict(&[4.0, 5.0]);
    println!("Prediction: {:?}", pred);
}

#[cfg(not(feature = "ndarray"))]
fn main() {
    eprintln!("This example requires the 'ndarray' feature: cargo run --example train_ndarray --features ndarray");
}
