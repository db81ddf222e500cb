use{
    serde::{Serialize, Deserialize},
    super::*,
    crate::error::ConfigurationError,
    crate::misc_types::*,
};

/// Parameters of a single run. Immutable once the run is created.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SimulationParameters{
    pub population_size: usize,
    pub average_degree: usize,
    pub rewiring_probability: f64,
    pub transmission_probability: f64,
    pub recovery_period: u32,
    pub initial_infected_count: usize,
    pub simulation_days: usize,
    /// if not given, the run is seeded from entropy
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// reserved, no transition reads it
    #[serde(default)]
    pub death_rate: f64,
}

impl SimulationParameters{
    pub fn validate(&self) -> Result<(), ConfigurationError>
    {
        ContactGraph::check_parameters(
            self.population_size,
            self.average_degree,
            self.rewiring_probability
        )?;
        ConfigurationError::check_probability("transmission_probability", self.transmission_probability)?;
        ConfigurationError::check_probability("death_rate", self.death_rate)?;
        if self.recovery_period == 0 {
            return Err(ConfigurationError::ZeroRecoveryPeriod);
        }
        if self.initial_infected_count == 0 || self.initial_infected_count > self.population_size {
            return Err(
                ConfigurationError::InitialInfectedOutOfRange{
                    count: self.initial_infected_count,
                    population_size: self.population_size
                }
            );
        }
        if self.simulation_days == 0 {
            return Err(ConfigurationError::ZeroSimulationDays);
        }
        Ok(())
    }

    pub fn quick_name(&self) -> String
    {
        let seed = match self.random_seed{
            None => "Entropy".to_owned(),
            Some(seed) => seed.to_string()
        };
        format!(
            "v{}SIR_N{}k{}p{}Trans{}Rec{}InInf{}Days{}Seed{}",
            crate::VERSION,
            self.population_size,
            self.average_degree,
            self.rewiring_probability,
            self.transmission_probability,
            self.recovery_period,
            self.initial_infected_count,
            self.simulation_days,
            seed
        )
    }
}

impl Default for SimulationParameters{
    fn default() -> Self{
        Self{
            population_size: DEFAULT_SYSTEM_SIZE,
            average_degree: DEFAULT_AVERAGE_DEGREE,
            rewiring_probability: DEFAULT_REWIRE_PROB,
            transmission_probability: DEFAULT_LAMBDA,
            recovery_period: DEFAULT_RECOVERY_PERIOD,
            initial_infected_count: DEFAULT_INITIAL_INFECTED,
            simulation_days: DEFAULT_SIMULATION_DAYS,
            random_seed: Some(DEFAULT_SIR_SEED),
            death_rate: 0.0,
        }
    }
}
