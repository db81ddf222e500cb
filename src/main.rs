use{
    std::{
        process::ExitCode,
        time::Instant
    },
    structopt::StructOpt,
    tracing::{error, info},
    sir_network::{
        CliError,
        logging,
        simulate,
        simple_sampling
    },
};

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }
    let start_time = Instant::now();
    let opt = CmdOption::from_args();
    let result = match opt{
        CmdOption::Simulate(o) => o.execute(),
        CmdOption::SimpleSample(o) => o.execute(),
    };
    info!("Execution took {}", humantime::format_duration(start_time.elapsed()));
    report(result)
}

fn report(result: Result<(), CliError>) -> ExitCode
{
    match result{
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, StructOpt, Clone)]
#[structopt(about = "SIR epidemics on small world contact networks")]
pub enum CmdOption
{
    Simulate(simulate::Simulate),
    #[structopt(name = "sample")]
    SimpleSample(simple_sampling::SimpleSampleScan),
}
