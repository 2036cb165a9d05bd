use super::evolution_engine::ProgressCallback;
use super::fitness::FitnessVector;

/// Reports progress through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting...", generation);
    }

    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_fitness: Option<&FitnessVector>,
        hof_size: usize,
    ) {
        match best_fitness {
            Some(best) => log::info!(
                "Generation {} complete. Best fitness: {:?}, Hall of Fame size: {}",
                generation,
                best.values,
                hof_size
            ),
            None => log::info!("Generation {} complete. Hall of Fame empty", generation),
        }
    }

    fn on_individual_evaluated(&mut self, evaluated: usize, total: usize) {
        if evaluated % 10 == 0 || evaluated == total {
            log::debug!("  Evaluated {}/{} individuals", evaluated, total);
        }
    }
}

/// No-op callback for library callers that only want the outcome
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(
        &mut self,
        _generation: usize,
        _best_fitness: Option<&FitnessVector>,
        _hof_size: usize,
    ) {
    }

    fn on_individual_evaluated(&mut self, _evaluated: usize, _total: usize) {}
}

/// Forwards progress to another thread
#[derive(Clone)]
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete {
        generation: usize,
        best_fitness: Option<Vec<f64>>,
        hof_size: usize,
    },
    IndividualEvaluated {
        current: usize,
        total: usize,
    },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_fitness: Option<&FitnessVector>,
        hof_size: usize,
    ) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness: best_fitness.map(|f| f.values.clone()),
            hof_size,
        });
    }

    fn on_individual_evaluated(&mut self, evaluated: usize, total: usize) {
        let _ = self.sender.send(ProgressMessage::IndividualEvaluated {
            current: evaluated,
            total,
        });
    }
}
