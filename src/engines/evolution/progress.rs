use super::engine::GenerationReport;
use std::sync::mpsc::Sender;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, report: &GenerationReport);
    fn on_solution_found(&mut self, _generation: usize, _org_id: usize) {}
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for &mut C {
    fn on_generation_start(&mut self, generation: usize) {
        (**self).on_generation_start(generation);
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        (**self).on_generation_complete(report);
    }

    fn on_solution_found(&mut self, generation: usize, org_id: usize) {
        (**self).on_solution_found(generation, org_id);
    }
}

/// Reports progress through the `log` facade.
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting", generation);
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        log::info!(
            "Generation {}: best passes {}, unique parents {}, parent coverage {}, injected {}, evaluations {}",
            report.generation,
            report.best_passes,
            report.selection.num_unique_cand_selected,
            report.selection.parents_num_tests_covered,
            report.num_injected,
            report.evaluations
        );
    }

    fn on_solution_found(&mut self, generation: usize, org_id: usize) {
        log::info!("Solution found at generation {} (organism {})", generation, org_id);
    }
}

pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete(GenerationReport),
    SolutionFound { generation: usize, org_id: usize },
}

/// Forwards progress to another thread over a channel.
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        let _ = self
            .sender
            .send(ProgressMessage::GenerationComplete(report.clone()));
    }

    fn on_solution_found(&mut self, generation: usize, org_id: usize) {
        let _ = self
            .sender
            .send(ProgressMessage::SolutionFound { generation, org_id });
    }
}
