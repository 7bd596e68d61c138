use std::thread;

use anyhow::{Context, Result, ensure};
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};

use linear_perceptron::config::DemoConfig;
use linear_perceptron::data;
use linear_perceptron::render::AsciiCanvas;
use linear_perceptron::{Perceptron, Trainer};

const N_FEATURES: usize = 2;

fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = DemoConfig::from_env().context("invalid configuration")?;
    info!("configuration: {config:?}");

    // the only random source of the process
    let mut rng = generate_rng(config.seed);

    data::generate_csv_file(&config.dataset_path, config.num_samples, &mut rng)
        .with_context(|| format!("failed to create {}", config.dataset_path.display()))?;
    let dataset = data::load_csv_file(&config.dataset_path, N_FEATURES, Some(config.num_samples))
        .with_context(|| format!("failed to load {}", config.dataset_path.display()))?;
    ensure!(
        !dataset.is_empty(),
        "no samples in {}, refusing to train",
        config.dataset_path.display()
    );

    let perceptron = Perceptron::random(N_FEATURES, &mut rng);
    info!(
        "initial weights={:?} bias={:.4}",
        perceptron.weights(),
        perceptron.bias()
    );

    let mut canvas = config
        .render
        .then(|| AsciiCanvas::new(config.canvas_width, config.canvas_height));

    let trainer = Trainer::new(config.learning_rate);
    let (perceptron, history) =
        trainer.train_with_observer(perceptron, &dataset, config.max_epochs, |p, stats| {
            match canvas.as_mut() {
                Some(canvas) => {
                    canvas.draw(&dataset, p);
                    print!("{}", canvas.terminal_frame(&stats.to_string()));
                    thread::sleep(config.frame_delay);
                }
                None => println!("{stats}"),
            }
        })?;

    println!("Training complete after {} epochs.", history.len());
    match history.first_perfect_epoch() {
        Some(epoch) => info!("no misclassifications from epoch {epoch} on"),
        None if history.is_empty() => warn!("max_epochs is 0, nothing was trained"),
        None => warn!("dataset was never classified perfectly"),
    }
    info!(
        "final weights={:?} bias={:.4}",
        perceptron.weights(),
        perceptron.bias()
    );
    Ok(())
}
