//! Whole runs: graph generation, seeding, `simulation_days` recorded days.

use {
    std::sync::Arc,
    serde::{Serialize, Deserialize},
    rand::{Rng, SeedableRng},
    rand_pcg::Pcg64,
    tracing::{debug, info},
    super::*,
    crate::error::SimulationError,
};

#[derive(Clone)]
pub struct Simulation{
    param: SimulationParameters,
    graph: Arc<ContactGraph>,
    sir_rng: Pcg64,
    seed: u64,
}

/// The two logs of a run, index aligned by day
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutput{
    pub records: Vec<DailyRecord>,
    pub snapshots: Vec<DailyNetworkSnapshot>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary{
    /// M, largest number of simultaneously infected nodes
    pub peak_infected: usize,
    pub peak_day: usize,
    /// first day without infected nodes, if reached
    pub extinction_day: Option<usize>,
    /// C, nodes that were infected at some point
    pub ever_infected: usize,
    pub attack_rate: f64,
}

impl Simulation{
    /// Validates `param` and generates the contact network.
    /// The graph seed and the SIR seed are both derived from `random_seed`.
    pub fn new(param: SimulationParameters) -> Result<Self, SimulationError>
    {
        param.validate()?;
        let seed = match param.random_seed{
            Some(seed) => seed,
            None => {
                let seed = Pcg64::from_entropy().gen();
                info!(seed, "no random seed given, drew one from entropy");
                seed
            }
        };
        let mut seeder = Pcg64::seed_from_u64(seed);
        let graph_seed: u64 = seeder.gen();
        let sir_seed: u64 = seeder.gen();

        let graph = ContactGraph::generate(
            param.population_size,
            param.average_degree,
            param.rewiring_probability,
            graph_seed
        )?;
        let mut simulation = Self::with_graph(Arc::new(graph), param, sir_seed)?;
        simulation.seed = seed;
        Ok(simulation)
    }

    /// Reuse an existing contact network
    pub fn with_graph(
        graph: Arc<ContactGraph>,
        param: SimulationParameters,
        sir_seed: u64
    ) -> Result<Self, SimulationError>
    {
        param.validate()?;
        if graph.node_count() != param.population_size {
            return Err(
                SimulationError::invariant(
                    format!(
                        "network has {} nodes, parameters ask for {}",
                        graph.node_count(),
                        param.population_size
                    )
                )
            );
        }
        Ok(
            Self{
                param,
                graph,
                sir_rng: Pcg64::seed_from_u64(sir_seed),
                seed: sir_seed,
            }
        )
    }

    pub fn graph(&self) -> &Arc<ContactGraph>
    {
        &self.graph
    }

    pub fn param(&self) -> &SimulationParameters
    {
        &self.param
    }

    /// the seed this run was created from
    pub fn seed(&self) -> u64
    {
        self.seed
    }

    /// Seeds for independent runs on the same network, drawn from this run's source
    pub fn sample_seeds(&mut self, count: usize) -> Vec<u64>
    {
        (0..count).map(|_| self.sir_rng.gen()).collect()
    }

    /// Seed the patient zero set, then propagate until `simulation_days`
    /// days (day 0 included) are recorded.
    pub fn run(&mut self) -> Result<RunOutput, SimulationError>
    {
        let mut recorder = MetricsRecorder::with_capacity(self.param.simulation_days);
        self.run_with(|day, state| recorder.record(day, state).map(|_| ()))?;
        let (records, snapshots) = recorder.into_logs();
        let output = RunOutput{
            records,
            snapshots
        };
        let summary = output.summary(self.param.population_size);
        info!(
            days = self.param.simulation_days,
            peak_infected = summary.peak_infected,
            ever_infected = summary.ever_infected,
            extinction_day = ?summary.extinction_day,
            "finished run"
        );
        Ok(output)
    }

    /// Like [`Self::run`] but only the compartment counts are kept
    pub fn run_records(&mut self) -> Result<Vec<DailyRecord>, SimulationError>
    {
        let mut records = Vec::with_capacity(self.param.simulation_days);
        self.run_with(
            |day, state|
            {
                records.push(DailyRecord::tally(day, state)?);
                Ok(())
            }
        )?;
        Ok(records)
    }

    fn run_with<F>(&mut self, mut observe: F) -> Result<(), SimulationError>
    where F: FnMut(usize, &SimulationState) -> Result<(), SimulationError>
    {
        let init_seed: u64 = self.sir_rng.gen();
        let engine_seed: u64 = self.sir_rng.gen();
        let mut state = SimulationState::initialize(
            self.graph.clone(),
            self.param.initial_infected_count,
            init_seed
        )?;
        let mut engine = PropagationEngine::new(
            self.param.transmission_probability,
            self.param.recovery_period,
            engine_seed
        )?;

        observe(engine.day(), &state)?;
        while engine.day() + 1 < self.param.simulation_days{
            let (next, record) = engine.advance_one_day(&state)?;
            debug!(
                day = record.day,
                susceptible = record.susceptible,
                infected = record.infected,
                recovered = record.recovered,
                "day done"
            );
            state = next;
            observe(record.day, &state)?;
        }
        Ok(())
    }
}

impl RunOutput{
    pub fn len(&self) -> usize
    {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.records.is_empty()
    }

    pub fn summary(&self, population_size: usize) -> RunSummary
    {
        RunSummary::from_records(&self.records, population_size)
    }
}

impl RunSummary{
    pub fn from_records(records: &[DailyRecord], population_size: usize) -> Self
    {
        let mut peak_infected = 0;
        let mut peak_day = 0;
        for record in records{
            if record.infected > peak_infected {
                peak_infected = record.infected;
                peak_day = record.day;
            }
        }
        let extinction_day = records.iter()
            .find(|record| record.infected == 0)
            .map(|record| record.day);
        let ever_infected = records.last()
            .map_or(0, DailyRecord::ever_infected);
        let attack_rate = if population_size == 0 {
            0.0
        } else {
            ever_infected as f64 / population_size as f64
        };
        Self{
            peak_infected,
            peak_day,
            extinction_day,
            ever_infected,
            attack_rate
        }
    }
}
