use super::grouping::Groupings;
use super::problem::{Phenotype, Problem};
use super::progress::ProgressCallback;
use crate::config::{AppConfig, SelectionMethod, StopMode};
use crate::engines::injection::{BitSignature, Injector};
use crate::engines::recombination::{Genome, Recombiner};
use crate::engines::selection::{
    Criterion, CriterionSet, LexicaseSelect, SelectedStatistics, Selector, TournamentSelect,
};
use crate::error::PsynthError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: usize,
    /// Test-case evaluations spent so far, this generation included.
    pub evaluations: usize,
    pub best_passes: usize,
    pub mean_passes: f64,
    pub num_selected: usize,
    pub num_injected: usize,
    pub selection: SelectedStatistics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary<I, T> {
    pub generations_run: usize,
    pub evaluations: usize,
    pub best_passes: usize,
    pub solution: Option<Genome<I, T>>,
    pub reports: Vec<GenerationReport>,
}

/// Generational loop: evaluate, select parents, reproduce, inject.
pub struct EvolutionEngine<P> {
    config: AppConfig,
    problem: P,
    injector: Injector,
    rng: StdRng,
    update: usize,
}

impl<P> EvolutionEngine<P> {
    pub fn new(config: AppConfig, problem: P) -> Result<Self, PsynthError> {
        config.validate()?;
        let recombiner = Recombiner::from_config(&config.recombination)?;
        let injector = Injector::new(config.injection.clone(), recombiner);
        let rng = match config.run.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            problem,
            injector,
            rng,
            update: 0,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Run until an organism passes every test or the configured budget
    /// (generations or test-case evaluations) is spent.
    pub fn run<I, T, C>(
        &mut self,
        mut population: Vec<Genome<I, T>>,
        mut callback: C,
    ) -> Result<RunSummary<I, T>, PsynthError>
    where
        I: Clone,
        T: Clone,
        P: Problem<I, T>,
        C: ProgressCallback,
    {
        if population.len() != self.config.run.population_size {
            return Err(PsynthError::Configuration(format!(
                "Initial population has {} organisms, expected {}",
                population.len(),
                self.config.run.population_size
            )));
        }

        let num_tests = self.problem.num_tests();
        let mut reports = Vec::new();
        let mut best_passes = 0;
        let mut solution = None;
        let mut evaluations = 0;
        let mut generation = 0;

        while !self.budget_spent(generation, evaluations) {
            callback.on_generation_start(generation);

            let groupings = Groupings::assign(
                &self.config.evaluation,
                population.len(),
                num_tests,
                &mut self.rng,
            );
            let mut phenotypes = Vec::with_capacity(population.len());
            for (org_id, genome) in population.iter().enumerate() {
                let test_ids = groupings.tests_for(org_id);
                evaluations += test_ids.len();
                phenotypes.push(self.problem.evaluate_tests(&genome.program, test_ids));
            }
            best_passes = best_passes.max(
                phenotypes
                    .iter()
                    .map(Phenotype::num_passes)
                    .max()
                    .unwrap_or(0),
            );

            if let Some(org_id) = self.find_solution(&population, &phenotypes, &groupings) {
                callback.on_solution_found(generation, org_id);
                best_passes = num_tests;
                solution = Some(population[org_id].clone());
                break;
            }

            let (next, report) =
                self.next_generation(generation, evaluations, &population, &phenotypes, &groupings)?;
            callback.on_generation_complete(&report);
            reports.push(report);
            population = next;
            self.update += 1;
            generation += 1;
        }

        Ok(RunSummary {
            generations_run: reports.len(),
            evaluations,
            best_passes,
            solution,
            reports,
        })
    }

    fn budget_spent(&self, generation: usize, evaluations: usize) -> bool {
        match self.config.run.stop_mode {
            StopMode::Generations => generation >= self.config.run.generations,
            StopMode::Evaluations => evaluations >= self.config.run.max_evaluations,
        }
    }

    /// First organism that passes all of its group's tests and, when the
    /// group does not hold every test, the full suite as well.
    fn find_solution<I, T>(
        &self,
        population: &[Genome<I, T>],
        phenotypes: &[Phenotype],
        groupings: &Groupings,
    ) -> Option<usize>
    where
        P: Problem<I, T>,
    {
        let num_tests = self.problem.num_tests();
        (0..population.len()).find(|&org_id| {
            let test_ids = groupings.tests_for(org_id);
            phenotypes[org_id].num_passes() == test_ids.len()
                && (test_ids.len() == num_tests
                    || self.problem.evaluate(&population[org_id].program).num_passes() == num_tests)
        })
    }

    fn next_generation<I, T>(
        &mut self,
        generation: usize,
        evaluations: usize,
        population: &[Genome<I, T>],
        phenotypes: &[Phenotype],
        groupings: &Groupings,
    ) -> Result<(Vec<Genome<I, T>>, GenerationReport), PsynthError>
    where
        I: Clone,
        T: Clone,
        P: Problem<I, T>,
    {
        let num_tests = self.problem.num_tests();
        let plan = self.injector.plan(self.update, population.len());

        let selected = {
            let mut selector = self.build_selector(population, phenotypes, num_tests)?;
            groupings.select(&mut selector, plan.num_select, &mut self.rng)
        };
        let selection = SelectedStatistics::calculate(
            &selected,
            num_tests,
            |org_id, test_id| phenotypes[org_id].passed(test_id),
            |org_id| population[org_id].age(),
        );

        let mut next = Vec::with_capacity(population.len());
        for &parent_id in &selected {
            let mut child = population[parent_id].clone();
            self.problem.mutate(&mut child.program, &mut self.rng);
            child.inc_age(1);
            next.push(child);
        }

        let signatures: Vec<BitSignature> = phenotypes.iter().map(|p| p.passes.clone()).collect();
        let problem = &self.problem;
        let injected = self.injector.inject(
            plan.num_inject,
            population,
            &signatures,
            |rng: &mut StdRng| problem.random_program(rng),
            &mut self.rng,
        );
        let num_injected = injected.len();
        next.extend(injected);

        let total_passes: usize = phenotypes.iter().map(Phenotype::num_passes).sum();
        let report = GenerationReport {
            generation,
            evaluations,
            best_passes: phenotypes.iter().map(Phenotype::num_passes).max().unwrap_or(0),
            mean_passes: total_passes as f64 / phenotypes.len() as f64,
            num_selected: selected.len(),
            num_injected,
            selection,
        };
        Ok((next, report))
    }

    fn build_selector<'a, I, T>(
        &self,
        genomes: &'a [Genome<I, T>],
        phenotypes: &'a [Phenotype],
        num_tests: usize,
    ) -> Result<Selector<'a>, PsynthError> {
        let selection = &self.config.selection;

        let selector: Selector<'a> = match selection.method {
            SelectionMethod::Lexicase => {
                let criteria = CriterionSet::primary_only(test_criteria(phenotypes, num_tests))?;
                LexicaseSelect::new(criteria).into()
            }
            SelectionMethod::AgeLexicase => {
                let age_criteria = genomes
                    .iter()
                    .map(|genome| vec![Box::new(move || -(genome.age() as f64)) as Criterion<'a>])
                    .collect();
                let criteria =
                    CriterionSet::new(test_criteria(phenotypes, num_tests), age_criteria)?;
                LexicaseSelect::with_order_limit(criteria, selection.age_order_limit)?.into()
            }
            SelectionMethod::Tournament => {
                let aggregate = phenotypes
                    .iter()
                    .map(|p| Box::new(move || p.aggregate_score()) as Criterion<'a>)
                    .collect();
                TournamentSelect::new(aggregate, selection.tournament_size)?.into()
            }
        };
        Ok(selector)
    }
}

/// One criterion per (organism, test), reading the organism's test score.
fn test_criteria(phenotypes: &[Phenotype], num_tests: usize) -> Vec<Vec<Criterion<'_>>> {
    phenotypes
        .iter()
        .map(|p| {
            (0..num_tests)
                .map(|test_id| Box::new(move || p.scores[test_id]) as Criterion)
                .collect()
        })
        .collect()
}
