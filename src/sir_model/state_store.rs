//! Per node compartment and infection age.
//!
//! A [`SimulationState`] is a value: committing a day produces a new state and
//! leaves the old one untouched, so the read phase of a day can never observe
//! a partially applied update.

use {
    std::sync::Arc,
    rand::{Rng, SeedableRng, seq::index},
    rand_pcg::Pcg64,
    super::*,
    crate::error::{ConfigurationError, SimulationError},
};

#[derive(Clone)]
pub struct SimulationState{
    graph: Arc<ContactGraph>,
    compartments: Vec<InfectionState>,
    // days spent infected, only meaningful for infected nodes
    durations: Vec<u32>,
}

/// Transitions of one day, computed from the start of day snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DayDelta{
    /// infected nodes that stay infected and age by one day
    pub aged: Vec<usize>,
    /// susceptible nodes that become infected
    pub infections: Vec<usize>,
    /// infected nodes that recover
    pub recoveries: Vec<usize>,
}

impl DayDelta{
    pub fn is_empty(&self) -> bool
    {
        self.aged.is_empty() && self.infections.is_empty() && self.recoveries.is_empty()
    }
}

impl SimulationState{
    fn all_susceptible(graph: Arc<ContactGraph>) -> Self
    {
        let n = graph.node_count();
        Self{
            graph,
            compartments: vec![InfectionState::Susceptible; n],
            durations: vec![0; n],
        }
    }

    /// Everyone susceptible, then `initial_infected` distinct nodes drawn
    /// uniformly without replacement are infected.
    pub fn initialize(
        graph: Arc<ContactGraph>,
        initial_infected: usize,
        seed: u64
    ) -> Result<Self, SimulationError>
    {
        let mut rng = Pcg64::seed_from_u64(seed);
        Self::initialize_with_rng(graph, initial_infected, &mut rng)
    }

    pub fn initialize_with_rng<R: Rng>(
        graph: Arc<ContactGraph>,
        initial_infected: usize,
        rng: &mut R
    ) -> Result<Self, SimulationError>
    {
        let population_size = graph.node_count();
        if initial_infected == 0 || initial_infected > population_size {
            return Err(
                ConfigurationError::InitialInfectedOutOfRange{
                    count: initial_infected,
                    population_size
                }.into()
            );
        }
        let mut state = Self::all_susceptible(graph);
        for patient in index::sample(rng, population_size, initial_infected).into_iter(){
            state.infect_patient(patient);
        }
        Ok(state)
    }

    /// Explicit patient zero set
    pub fn from_patients(
        graph: Arc<ContactGraph>,
        patients: &[usize]
    ) -> Result<Self, SimulationError>
    {
        let population_size = graph.node_count();
        if patients.is_empty() {
            return Err(
                ConfigurationError::InitialInfectedOutOfRange{
                    count: 0,
                    population_size
                }.into()
            );
        }
        let mut state = Self::all_susceptible(graph);
        for &index in patients{
            if index >= population_size {
                return Err(ConfigurationError::PatientOutOfRange{index, population_size}.into());
            }
            if state.compartments[index].inf_check() {
                return Err(ConfigurationError::DuplicatePatient{index}.into());
            }
            state.infect_patient(index);
        }
        Ok(state)
    }

    fn infect_patient(&mut self, patient: usize)
    {
        self.compartments[patient] = InfectionState::Infected;
        self.durations[patient] = 0;
    }

    pub fn graph(&self) -> &Arc<ContactGraph>
    {
        &self.graph
    }

    pub fn node_count(&self) -> usize
    {
        self.compartments.len()
    }

    pub fn compartment(&self, index: usize) -> InfectionState
    {
        self.compartments[index]
    }

    pub fn compartments(&self) -> &[InfectionState]
    {
        &self.compartments
    }

    /// `None` unless the node is currently infected
    pub fn infected_duration(&self, index: usize) -> Option<u32>
    {
        self.compartments[index]
            .inf_check()
            .then(|| self.durations[index])
    }

    /// infected nodes in ascending order
    pub fn infected_nodes(&self) -> Vec<usize>
    {
        self.compartments
            .iter()
            .enumerate()
            .filter(|(_, state)| state.inf_check())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn infected_count(&self) -> usize
    {
        self.compartments.iter().filter(|s| s.inf_check()).count()
    }

    /// Called C
    pub fn calculate_ever_infected(&self) -> usize
    {
        self.compartments.iter()
            .filter(|&v| v.is_or_was_infected())
            .count()
    }

    /// Apply one day of transitions and return the resulting state.
    /// Order: ageing, infections, recoveries.
    pub fn commit(&self, delta: DayDelta) -> Result<SimulationState, SimulationError>
    {
        let mut next = self.clone();
        if delta.is_empty() {
            return Ok(next);
        }

        for index in delta.aged{
            self.expect_state(index, InfectionState::Infected, "age")?;
            next.durations[index] += 1;
        }
        for index in delta.infections{
            self.expect_state(index, InfectionState::Susceptible, "infect")?;
            // duplicate marks of the same node are one infection
            if next.compartments[index].inf_check() {
                continue;
            }
            next.infect_patient(index);
        }
        for index in delta.recoveries{
            self.expect_state(index, InfectionState::Infected, "recover")?;
            if !next.compartments[index].can_become(InfectionState::Recovered) {
                return Err(SimulationError::invariant(format!("node {index} recovered twice")));
            }
            next.compartments[index] = InfectionState::Recovered;
            next.durations[index] = 0;
        }
        Ok(next)
    }

    fn expect_state(
        &self,
        index: usize,
        expected: InfectionState,
        action: &str
    ) -> Result<(), SimulationError>
    {
        match self.compartments.get(index){
            Some(state) if *state == expected => Ok(()),
            Some(state) => Err(
                SimulationError::invariant(
                    format!("cannot {action} node {index}: it is {state}, expected {expected}")
                )
            ),
            None => Err(SimulationError::invariant(format!("node {index} does not exist")))
        }
    }
}
