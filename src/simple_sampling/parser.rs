use{
    structopt::StructOpt,
    serde::{Serialize, Deserialize},
    serde_json::Value,
    std::num::*,
    crate::misc_types::*,
    crate::json_parsing::*,
    crate::error::CliError,
    crate::sir_model::SimulationParameters,
};

#[derive(Debug, StructOpt, Clone)]
/// Do a simple sampling simulation on one network and get the statistics of M, C and
/// the extinction time
pub struct SimpleSampleScan
{
    /// Specify the json file with the options
    /// If not given, an example json will be printed
    #[structopt(long)]
    json: Option<String>,

    /// Number of threads to use
    #[structopt(long)]
    num_threads: Option<NonZeroUsize>
}

impl SimpleSampleScan {
    pub fn parse(&self) -> Result<Option<(SimpleSampleParam, Value)>, CliError>
    {
        parse(self.json.as_ref(), std::io::stdout())
    }

    pub fn execute(&self) -> Result<(), CliError>
    {
        match self.parse()?{
            None => Ok(()),
            Some((param, json)) => super::execute::execute_sir(param, json, self.num_threads)
                .map(|_| ())
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SimpleSampleParam
{
    /// parameters of every sampled run, `random_seed` fixes the network
    /// and the seeds of the samples
    pub simulation: SimulationParameters,
    pub samples: usize,
    /// report M and C as fractions of the population
    pub fraction: bool,
}

impl SimpleSampleParam
{
    pub fn quick_name(
        &self,
        num_threads: Option<NonZeroUsize>
    ) -> String
    {
        let j = match num_threads
        {
            None => "".to_owned(),
            Some(v) => format!("j{}", v)
        };
        format!(
            "{}_SimpleSampling_Sam{}Frac{}{j}.dat",
            self.simulation.quick_name(),
            self.samples,
            self.fraction
        )
    }
}

impl Default for SimpleSampleParam
{
    fn default() -> Self {
        Self{
            simulation: SimulationParameters::default(),
            samples: DEFAULT_SAMPLES_SIMPLE_SAMPLE,
            fraction: true
        }
    }
}
