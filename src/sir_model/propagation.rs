//! One synchronous SIR day.
//!
//! Every decision of a day is read from the committed start of day state. The
//! pending transitions are collected in a [`DayDelta`] and committed in one
//! step, so a node infected today can not infect anybody before tomorrow.

use {
    std::num::NonZeroU32,
    rand::{Rng, SeedableRng},
    rand_distr::{Bernoulli, Distribution},
    rand_pcg::Pcg64,
    rayon::prelude::*,
    tracing::debug,
    super::*,
    crate::error::{ConfigurationError, SimulationError},
};

#[derive(Clone, Debug)]
pub struct PropagationEngine{
    transmission: Bernoulli,
    recovery_period: NonZeroU32,
    // draws one stream state per day, every infected node gets its own stream
    day_rng: Pcg64,
    day: usize,
}

impl PropagationEngine{
    pub fn new(
        transmission_prob: f64,
        recovery_period: u32,
        sir_seed: u64
    ) -> Result<Self, ConfigurationError>
    {
        Self::from_rng(transmission_prob, recovery_period, Pcg64::seed_from_u64(sir_seed))
    }

    pub fn from_rng(
        transmission_prob: f64,
        recovery_period: u32,
        day_rng: Pcg64
    ) -> Result<Self, ConfigurationError>
    {
        ConfigurationError::check_probability("transmission_probability", transmission_prob)?;
        let recovery_period = NonZeroU32::new(recovery_period)
            .ok_or(ConfigurationError::ZeroRecoveryPeriod)?;
        let transmission = Bernoulli::new(transmission_prob)
            .map_err(
                |_| ConfigurationError::ProbabilityOutOfRange{
                    name: "transmission_probability",
                    value: transmission_prob
                }
            )?;
        Ok(
            Self{
                transmission,
                recovery_period,
                day_rng,
                day: 0
            }
        )
    }

    /// number of days advanced so far
    pub fn day(&self) -> usize
    {
        self.day
    }

    /// Pending transitions of the next day. Reads `current` only.
    pub fn compute_delta(&mut self, current: &SimulationState) -> DayDelta
    {
        let day_state: u128 = self.day_rng.gen();
        let infected_list = current.infected_nodes();
        let graph = current.graph();
        let transmission = &self.transmission;

        // one Bernoulli trial per (infected, susceptible neighbor) pair
        let newly_infected: Vec<usize> = infected_list
            .par_iter()
            .flat_map_iter(
                |&index|
                {
                    let mut node_rng = Pcg64::new(day_state, index as u128);
                    graph.neighbors(index)
                        .filter(|&n_index| current.compartment(n_index).sus_check())
                        .filter(|_| transmission.sample(&mut node_rng))
                        .collect::<Vec<_>>()
                }
            ).collect();

        let mut pending = vec![false; current.node_count()];
        let mut infections = Vec::new();
        for n_index in newly_infected{
            if !pending[n_index] {
                pending[n_index] = true;
                infections.push(n_index);
            }
        }

        let mut aged = Vec::with_capacity(infected_list.len());
        let mut recoveries = Vec::new();
        let period = self.recovery_period.get();
        for index in infected_list{
            let duration = current.infected_duration(index).unwrap_or(0) + 1;
            if duration >= period {
                recoveries.push(index);
            } else {
                aged.push(index);
            }
        }

        DayDelta{
            aged,
            infections,
            recoveries
        }
    }

    /// Advance the whole population by exactly one day
    pub fn advance_one_day(
        &mut self,
        current: &SimulationState
    ) -> Result<(SimulationState, DailyRecord), SimulationError>
    {
        let delta = self.compute_delta(current);
        debug!(
            day = self.day + 1,
            infections = delta.infections.len(),
            recoveries = delta.recoveries.len(),
            "computed transitions"
        );
        let next = current.commit(delta)?;
        self.day += 1;
        let record = DailyRecord::tally(self.day, &next)?;
        Ok((next, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn path_graph(n: usize) -> Arc<ContactGraph>
    {
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        Arc::new(ContactGraph::from_edges(n, &edges).unwrap())
    }

    #[test]
    fn no_cascades_within_a_day() {
        let state = SimulationState::from_patients(path_graph(3), &[0]).unwrap();
        let mut engine = PropagationEngine::new(1.0, 10, 1).unwrap();

        let (day1, record) = engine.advance_one_day(&state).unwrap();
        assert_eq!(day1.infected_nodes(), vec![0, 1]);
        assert_eq!(day1.compartment(2), InfectionState::Susceptible);
        assert_eq!(record.day, 1);
        assert_eq!(engine.day(), 1);
        assert_eq!(record.infected, 2);

        let (day2, _) = engine.advance_one_day(&day1).unwrap();
        assert_eq!(day2.infected_nodes(), vec![0, 1, 2]);
        assert_eq!(day2.infected_duration(0), Some(2));
        assert_eq!(day2.infected_duration(1), Some(1));
        assert_eq!(day2.infected_duration(2), Some(0));
    }

    #[test]
    fn zero_transmission_never_infects() {
        let graph = Arc::new(ContactGraph::generate(100, 6, 0.2, 5).unwrap());
        let mut state = SimulationState::initialize(graph, 10, 5).unwrap();
        let mut engine = PropagationEngine::new(0.0, 3, 5).unwrap();
        for _ in 0..10{
            let (next, record) = engine.advance_one_day(&state).unwrap();
            assert!(record.infected <= 10);
            assert_eq!(record.susceptible, 90);
            state = next;
        }
        assert_eq!(state.infected_count(), 0);
        assert_eq!(state.calculate_ever_infected(), 10);
    }

    #[test]
    fn recovery_after_exactly_the_recovery_period() {
        let graph = path_graph(2);
        let state = SimulationState::from_patients(graph, &[0]).unwrap();
        let mut engine = PropagationEngine::new(0.0, 4, 9).unwrap();
        let mut current = state;
        for day in 1..=4_u32{
            let (next, _) = engine.advance_one_day(&current).unwrap();
            current = next;
            if day < 4 {
                assert_eq!(current.infected_duration(0), Some(day));
            } else {
                assert_eq!(current.compartment(0), InfectionState::Recovered);
            }
        }
    }

    #[test]
    fn delta_is_computed_from_snapshot() {
        let state = SimulationState::from_patients(path_graph(4), &[1]).unwrap();
        let mut engine = PropagationEngine::new(1.0, 1, 3).unwrap();
        let delta = engine.compute_delta(&state);
        assert_eq!(delta.infections, vec![0, 2]);
        assert_eq!(delta.recoveries, vec![1]);
        assert!(delta.aged.is_empty());
        // computing a delta does not touch the state
        assert_eq!(state.infected_nodes(), vec![1]);
    }

    #[test]
    fn duplicate_exposures_are_one_infection() {
        // node 1 sits between two infected nodes
        let state = SimulationState::from_patients(path_graph(3), &[0, 2]).unwrap();
        let mut engine = PropagationEngine::new(1.0, 5, 3).unwrap();
        let delta = engine.compute_delta(&state);
        assert_eq!(delta.infections, vec![1]);
    }

    #[test]
    fn two_infected_neighbors_are_two_independent_trials() {
        // 1 - (1 - 0.5)^2 = 0.75, one trial per edge and not one per node
        let graph = path_graph(3);
        let state = SimulationState::from_patients(graph, &[0, 2]).unwrap();
        let engines = 4000;
        let infected = (0..engines)
            .filter(
                |&seed|
                {
                    let mut engine = PropagationEngine::new(0.5, 5, seed).unwrap();
                    let delta = engine.compute_delta(&state);
                    assert!(delta.infections.len() <= 1);
                    delta.infections == vec![1]
                }
            ).count();
        let rate = infected as f64 / engines as f64;
        assert!((rate - 0.75).abs() < 0.04, "infection rate {rate}");
    }

    #[test]
    fn thread_count_does_not_change_results() {
        let graph = Arc::new(ContactGraph::generate(400, 6, 0.1, 11).unwrap());
        let run = |threads: usize| {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap();
            pool.install(
                || {
                    let mut state = SimulationState::initialize(graph.clone(), 5, 11).unwrap();
                    let mut engine = PropagationEngine::new(0.3, 4, 12).unwrap();
                    let mut records = Vec::new();
                    for _ in 0..20{
                        let (next, record) = engine.advance_one_day(&state).unwrap();
                        records.push(record);
                        state = next;
                    }
                    (records, state.compartments().to_vec())
                }
            )
        };
        assert_eq!(run(1), run(4));
    }

    #[test]
    fn invalid_engine_parameters() {
        assert_eq!(
            PropagationEngine::new(0.5, 0, 1).unwrap_err(),
            ConfigurationError::ZeroRecoveryPeriod
        );
        assert!(PropagationEngine::new(1.01, 3, 1).is_err());
    }
}
