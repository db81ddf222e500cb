use{
    structopt::StructOpt,
    serde_json::Value,
    std::{num::*, path::PathBuf},
    crate::json_parsing::*,
    crate::build_thread_pool,
    crate::error::CliError,
    crate::sir_model::SimulationParameters,
};

#[derive(Debug, StructOpt, Clone)]
/// Simulate one epidemic and write the time series and the daily network states as json
pub struct Simulate
{
    /// Specify the json file with the options
    /// If not given, an example json will be printed
    #[structopt(long)]
    json: Option<String>,

    /// Number of threads to use
    #[structopt(long)]
    num_threads: Option<NonZeroUsize>,

    /// Directory the output files are written to
    #[structopt(long, parse(from_os_str), default_value = ".")]
    out_dir: PathBuf,
}

impl Simulate {
    pub fn parse(&self) -> Result<Option<(SimulationParameters, Value)>, CliError>
    {
        parse(self.json.as_ref(), std::io::stdout())
    }

    pub fn execute(&self) -> Result<(), CliError>
    {
        match self.parse()?{
            None => Ok(()),
            Some((param, json)) => {
                build_thread_pool(self.num_threads)?;
                super::execute::run_simulation(param, json, &self.out_dir)
                    .map(|_| ())
            }
        }
    }
}
