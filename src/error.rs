//! Error types of the simulation core and of the command line front end.

use thiserror::Error;

/// Invalid run parameters. Raised before any day is simulated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError{
    #[error("population size must be positive")]
    EmptyPopulation,

    #[error("average degree {degree} must be even")]
    OddDegree{degree: usize},

    #[error("average degree {degree} must satisfy 0 < k < {population_size}")]
    DegreeOutOfRange{
        degree: usize,
        population_size: usize
    },

    #[error("{name} = {value} is not a probability in [0, 1]")]
    ProbabilityOutOfRange{name: &'static str, value: f64},

    #[error("initial infected count {count} must satisfy 0 < count <= {population_size}")]
    InitialInfectedOutOfRange{
        count: usize,
        population_size: usize
    },

    #[error("patient {index} is not a node of a network with {population_size} nodes")]
    PatientOutOfRange{
        index: usize,
        population_size: usize
    },

    #[error("patient {index} was listed more than once")]
    DuplicatePatient{index: usize},

    #[error("recovery period must be at least one day")]
    ZeroRecoveryPeriod,

    #[error("at least one day has to be simulated")]
    ZeroSimulationDays,

    #[error("at least one sample is required")]
    ZeroSamples,
}

impl ConfigurationError{
    /// Check that `value` lies in `[0, 1]`. NaN is rejected.
    pub fn check_probability(name: &'static str, value: f64) -> Result<(), Self>
    {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(Self::ProbabilityOutOfRange{name, value})
        }
    }
}

#[derive(Debug, Error)]
pub enum SimulationError{
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Programmer error, e.g. compartment counts not adding up to the population.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl SimulationError{
    pub fn invariant<S: Into<String>>(msg: S) -> Self
    {
        Self::InvariantViolation(msg.into())
    }

    pub fn is_configuration(&self) -> bool
    {
        matches!(self, Self::Configuration(_))
    }
}

/// Errors of the command line front end
#[derive(Debug, Error)]
pub enum CliError{
    #[error("unable to read parameter file `{path}`: {source}")]
    ConfigRead{
        path: String,
        #[source]
        source: std::io::Error
    },

    #[error("invalid parameter file `{path}`: {source}")]
    ConfigParse{
        path: String,
        #[source]
        source: serde_json::Error
    },

    #[error("unable to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl From<ConfigurationError> for CliError{
    fn from(err: ConfigurationError) -> Self
    {
        Self::Simulation(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_bounds() {
        assert!(ConfigurationError::check_probability("beta", 0.0).is_ok());
        assert!(ConfigurationError::check_probability("beta", 1.0).is_ok());
        assert_eq!(
            ConfigurationError::check_probability("beta", 1.5),
            Err(ConfigurationError::ProbabilityOutOfRange{name: "beta", value: 1.5})
        );
        assert!(ConfigurationError::check_probability("beta", f64::NAN).is_err());
    }

    #[test]
    fn configuration_converts_into_simulation_error() {
        let err: SimulationError = ConfigurationError::ZeroRecoveryPeriod.into();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "recovery period must be at least one day");
    }
}
