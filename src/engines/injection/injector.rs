use super::pareto::{pareto_front, unique_union_pairs};
use super::signature::BitSignature;
use crate::config::{InjectionConfig, InjectionMode};
use crate::engines::recombination::{Genome, Program, Recombiner};
use crate::types::CandidateId;
use rand::Rng;

/// How the next generation is split between selected parents and injected
/// organisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionPlan {
    pub num_select: usize,
    pub num_inject: usize,
}

/// Builds recombined organisms to inject into the next generation.
#[derive(Debug, Clone)]
pub struct Injector {
    config: InjectionConfig,
    recombiner: Recombiner,
}

impl Injector {
    pub fn new(config: InjectionConfig, recombiner: Recombiner) -> Self {
        Self { config, recombiner }
    }

    pub fn mode(&self) -> InjectionMode {
        self.config.mode
    }

    /// Injection happens every `interval` updates, never at update 0.
    pub fn plan(&self, update: usize, population_size: usize) -> InjectionPlan {
        let no_injection = InjectionPlan {
            num_select: population_size,
            num_inject: 0,
        };
        if self.config.mode == InjectionMode::None || update == 0 {
            return no_injection;
        }
        if update % self.config.interval != 0 {
            return no_injection;
        }
        assert!(
            self.config.count < population_size,
            "cannot inject {} organisms into a population of {}",
            self.config.count,
            population_size
        );
        InjectionPlan {
            num_select: population_size - self.config.count,
            num_inject: self.config.count,
        }
    }

    /// Produce `num_inject` new genomes (age 0) from the current population.
    ///
    /// `signatures[i]` is the pass/fail pattern of `genomes[i]`. `generate`
    /// builds a fresh program and is only called in [`InjectionMode::Random`].
    pub fn inject<I, T, R, G>(
        &self,
        num_inject: usize,
        genomes: &[Genome<I, T>],
        signatures: &[BitSignature],
        generate: G,
        rng: &mut R,
    ) -> Vec<Genome<I, T>>
    where
        I: Clone,
        T: Clone,
        R: Rng + ?Sized,
        G: FnMut(&mut R) -> Program<I, T>,
    {
        if num_inject == 0 {
            return Vec::new();
        }
        match self.config.mode {
            InjectionMode::None => Vec::new(),
            InjectionMode::Random => inject_random(num_inject, generate, rng),
            InjectionMode::RecombineRandom => self.inject_recombine_random(num_inject, genomes, rng),
            InjectionMode::RecombineComplement => {
                self.inject_recombine_complement(num_inject, genomes, signatures, rng)
            }
        }
    }

    fn inject_recombine_random<I, T, R>(
        &self,
        num_inject: usize,
        genomes: &[Genome<I, T>],
        rng: &mut R,
    ) -> Vec<Genome<I, T>>
    where
        I: Clone,
        T: Clone,
        R: Rng + ?Sized,
    {
        let size = genomes.len();
        assert!(size >= 2, "recombination needs at least two organisms");

        let mut injected = Vec::with_capacity(num_inject);
        while injected.len() < num_inject {
            let org_1 = rng.gen_range(0..size - 1);
            let mut org_2 = rng.gen_range(0..size);
            if org_1 == org_2 {
                org_2 = size - 1;
            }
            self.push_offspring(&mut injected, num_inject, genomes, (org_1, org_2), rng);
        }
        injected
    }

    fn inject_recombine_complement<I, T, R>(
        &self,
        num_inject: usize,
        genomes: &[Genome<I, T>],
        signatures: &[BitSignature],
        rng: &mut R,
    ) -> Vec<Genome<I, T>>
    where
        I: Clone,
        T: Clone,
        R: Rng + ?Sized,
    {
        assert_eq!(
            genomes.len(),
            signatures.len(),
            "every organism needs a pass/fail signature"
        );
        assert!(genomes.len() >= 2, "recombination needs at least two organisms");

        let records = unique_union_pairs(signatures);
        let front = pareto_front(&records);
        log::debug!(
            "Complement injection: {} unique pair unions, {} on the front",
            records.len(),
            front.len()
        );

        let mut injected = Vec::with_capacity(num_inject);
        while injected.len() < num_inject {
            let record = &records[front[rng.gen_range(0..front.len())]];
            self.push_offspring(&mut injected, num_inject, genomes, record.org_ids, rng);
        }
        injected
    }

    /// Recombine copies of two parents and push one or both children.
    fn push_offspring<I, T, R>(
        &self,
        injected: &mut Vec<Genome<I, T>>,
        num_inject: usize,
        genomes: &[Genome<I, T>],
        (org_1, org_2): (CandidateId, CandidateId),
        rng: &mut R,
    ) where
        I: Clone,
        T: Clone,
        R: Rng + ?Sized,
    {
        let mut child_1 = genomes[org_1].clone();
        let mut child_2 = genomes[org_2].clone();
        self.recombiner
            .apply_two_point(&mut child_1.program, &mut child_2.program, rng);
        child_1.set_age(0);
        child_2.set_age(0);

        injected.push(child_1);
        if injected.len() < num_inject {
            injected.push(child_2);
        }
    }
}

fn inject_random<I, T, R, G>(num_inject: usize, mut generate: G, rng: &mut R) -> Vec<Genome<I, T>>
where
    R: Rng + ?Sized,
    G: FnMut(&mut R) -> Program<I, T>,
{
    log::debug!("Random injection: generating {} organisms", num_inject);
    (0..num_inject).map(|_| Genome::new(generate(rng))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::recombination::{Function, Program};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(mode: InjectionMode, interval: usize, count: usize) -> InjectionConfig {
        InjectionConfig {
            mode,
            interval,
            count,
        }
    }

    fn unused_generator(_rng: &mut StdRng) -> Program<u32, u8> {
        unreachable!("recombination modes never generate programs")
    }

    fn genome(marker: u32, age: usize) -> Genome<u32, u8> {
        let mut genome = Genome::new(Program::new(vec![
            Function::new(0, vec![marker; 4]),
            Function::new(1, vec![marker; 3]),
        ]));
        genome.set_age(age);
        genome
    }

    #[test]
    fn test_plan_respects_interval() {
        let injector = Injector::new(config(InjectionMode::RecombineRandom, 5, 3), Recombiner::new());

        assert_eq!(injector.plan(0, 20), InjectionPlan { num_select: 20, num_inject: 0 });
        assert_eq!(injector.plan(4, 20), InjectionPlan { num_select: 20, num_inject: 0 });
        assert_eq!(injector.plan(10, 20), InjectionPlan { num_select: 17, num_inject: 3 });
    }

    #[test]
    fn test_plan_none_never_injects() {
        let injector = Injector::new(config(InjectionMode::None, 1, 3), Recombiner::new());
        assert_eq!(injector.plan(7, 20).num_inject, 0);
    }

    #[test]
    fn test_random_injection_resets_age() {
        let injector = Injector::new(config(InjectionMode::RecombineRandom, 1, 5), Recombiner::new());
        let genomes: Vec<_> = (0..4).map(|i| genome(i, 10 + i as usize)).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let injected = injector.inject(5, &genomes, &[], unused_generator, &mut rng);

        assert_eq!(injected.len(), 5);
        assert!(injected.iter().all(|g| g.age() == 0));
        assert!(injected.iter().all(|g| g.program.len() == 2));
    }

    #[test]
    fn test_complement_injection_uses_front_pairs() {
        let injector =
            Injector::new(config(InjectionMode::RecombineComplement, 1, 6), Recombiner::new());
        let genomes: Vec<_> = (0..3).map(|i| genome(i, 3)).collect();
        // Only organisms 0 and 1 together cover every test
        let signatures = vec![
            BitSignature::from_bools(&[true, false, false]),
            BitSignature::from_bools(&[false, true, true]),
            BitSignature::from_bools(&[false, true, false]),
        ];
        let mut rng = StdRng::seed_from_u64(11);

        let injected = injector.inject(6, &genomes, &signatures, unused_generator, &mut rng);

        assert_eq!(injected.len(), 6);
        for child in &injected {
            let markers: Vec<u32> = child
                .program
                .iter()
                .flat_map(|f| f.instructions().iter().copied())
                .collect();
            assert!(markers.iter().all(|&m| m == 0 || m == 1), "{:?}", markers);
        }
    }

    #[test]
    fn test_random_injection_generates_fresh_genomes() {
        let injector = Injector::new(config(InjectionMode::Random, 3, 4), Recombiner::new());
        let genomes: Vec<_> = (0..6).map(|i| genome(i, 9)).collect();
        let mut rng = StdRng::seed_from_u64(13);

        let plan = injector.plan(6, genomes.len());
        assert_eq!(plan, InjectionPlan { num_select: 2, num_inject: 4 });
        assert_eq!(injector.plan(4, genomes.len()).num_inject, 0);

        let mut calls = 0;
        let injected = injector.inject(
            plan.num_inject,
            &genomes,
            &[],
            |rng: &mut StdRng| {
                calls += 1;
                Program::new(vec![Function::new(7, vec![rng.gen_range(100..200); 2])])
            },
            &mut rng,
        );

        assert_eq!(calls, 4);
        assert_eq!(injected.len(), 4);
        for child in &injected {
            assert_eq!(child.age(), 0);
            assert_eq!(*child.program[0].tag(), 7);
            assert!(child.program[0].instructions().iter().all(|&m| m >= 100));
        }
    }
}
