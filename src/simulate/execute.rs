use {
    serde_json::Value,
    std::path::{Path, PathBuf},
    tracing::info,
    crate::error::CliError,
    crate::sir_model::*,
};

/// Runs one epidemic on the current rayon pool and writes both logs to `out_dir`.
/// Returns the paths of the written time series and network state files
pub fn run_simulation(
    param: SimulationParameters,
    json: Value,
    out_dir: &Path
) -> Result<[PathBuf; 2], CliError>
{
    info!(name = %param.quick_name(), parameters = %json, "starting simulation");

    let mut simulation = Simulation::new(param)?;
    info!(
        seed = simulation.seed(),
        edges = simulation.graph().edge_count(),
        connected = simulation.graph().is_connected(),
        "contact network ready"
    );
    let output = simulation.run()?;

    let summary = output.summary(simulation.param().population_size);
    info!(
        peak_infected = summary.peak_infected,
        peak_day = summary.peak_day,
        attack_rate = summary.attack_rate,
        extinction_day = ?summary.extinction_day,
        "summary"
    );

    std::fs::create_dir_all(out_dir)?;
    Ok(write_json_logs(out_dir, &output)?)
}
