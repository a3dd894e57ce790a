use anyhow::Context;
use clap::Parser;
use psynth::config::ConfigManager;
use psynth::engines::evolution::{EvolutionEngine, LogProgressCallback, Phenotype, Problem};
use psynth::engines::recombination::{Function, Genome, Program};
use rand::Rng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "psynth", about = "Evolve linear-functions programs against a toy test suite")]
struct Cli {
    /// TOML configuration file (PSYNTH_* environment variables override it)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of test cases in the toy problem
    #[arg(long, default_value = "24")]
    tests: usize,
    /// Per-instruction mutation rate
    #[arg(long, default_value = "0.05")]
    mutation_rate: f64,
    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
    /// Print configuration manifests as JSON and exit
    #[arg(long)]
    describe_config: bool,
    /// Write the effective configuration to this file and exit
    #[arg(long)]
    save_config: Option<PathBuf>,
}

/// Test `t` passes when some function contains instruction value `t`.
struct CoverageProblem {
    num_tests: usize,
    alphabet: u32,
    mutation_rate: f64,
}

impl Problem<u32, u8> for CoverageProblem {
    fn num_tests(&self) -> usize {
        self.num_tests
    }

    fn evaluate(&self, program: &Program<u32, u8>) -> Phenotype {
        let mut passed = vec![false; self.num_tests];
        for function in program.iter() {
            for &inst in function.instructions() {
                if let Some(slot) = passed.get_mut(inst as usize) {
                    *slot = true;
                }
            }
        }
        Phenotype::from_pass_fail(&passed)
    }

    fn random_program<R: Rng + ?Sized>(&self, rng: &mut R) -> Program<u32, u8> {
        random_program(self.alphabet, rng)
    }

    fn mutate<R: Rng + ?Sized>(&self, program: &mut Program<u32, u8>, rng: &mut R) {
        for function in program.functions_mut() {
            for inst in function.instructions_mut().iter_mut() {
                if rng.gen_bool(self.mutation_rate) {
                    *inst = rng.gen_range(0..self.alphabet);
                }
            }
        }
    }
}

fn random_program<R: Rng + ?Sized>(alphabet: u32, rng: &mut R) -> Program<u32, u8> {
    let num_functions = rng.gen_range(1..=4);
    let functions = (0..num_functions)
        .map(|_| {
            let len = rng.gen_range(1..=8);
            Function::new(rng.gen(), (0..len).map(|_| rng.gen_range(0..alphabet)).collect())
        })
        .collect();
    Program::new(functions)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut manager = ConfigManager::new();
    match &cli.config {
        Some(path) => manager
            .load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => manager.load_from_env().context("loading config from environment")?,
    }

    if cli.describe_config {
        println!("{}", serde_json::to_string_pretty(&manager.get().manifests())?);
        return Ok(());
    }
    if let Some(path) = &cli.save_config {
        manager
            .save_to_file(path)
            .with_context(|| format!("saving config to {}", path.display()))?;
        return Ok(());
    }
    anyhow::ensure!(
        (0.0..=1.0).contains(&cli.mutation_rate),
        "mutation rate must be between 0 and 1"
    );

    let config = manager.get().clone();
    let population_size = config.run.population_size;
    let problem = CoverageProblem {
        num_tests: cli.tests,
        alphabet: (cli.tests as u32).saturating_mul(2).max(1),
        mutation_rate: cli.mutation_rate,
    };
    let alphabet = problem.alphabet;

    let mut engine = EvolutionEngine::new(config, problem)?;
    let population: Vec<Genome<u32, u8>> = (0..population_size)
        .map(|_| Genome::new(random_program(alphabet, engine.rng_mut())))
        .collect();
    let summary = engine.run(population, LogProgressCallback)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Ran {} generations ({} test evaluations); best organism passed {}/{} tests; solution {}",
            summary.generations_run,
            summary.evaluations,
            summary.best_passes,
            cli.tests,
            if summary.solution.is_some() { "found" } else { "not found" }
        );
    }
    Ok(())
}
