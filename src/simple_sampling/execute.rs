use {
    super::parser::*,
    serde_json::Value,
    std::{num::*, io::Write, path::Path},
    crate::{build_thread_pool, indication_bar},
    crate::misc_types::{Measured, MeasureType},
    crate::error::{CliError, ConfigurationError, SimulationError},
    crate::sir_model::*,
    crate::stats_methods::MyVariance,
    indicatif::ParallelProgressIterator,
    rayon::prelude::*,
    tracing::info,
};

pub fn execute_sir(
    param: SimpleSampleParam,
    json: Value,
    num_threads: Option<NonZeroUsize>
) -> Result<Measured, CliError>
{
    build_thread_pool(num_threads)?;
    let measured = sample_measures(&param)?;

    let name = param.quick_name(num_threads);
    write_measured(Path::new(&name), &measured, param.samples, &json)?;
    info!(file = %name, "wrote sampling statistics");
    Ok(measured)
}

/// Samples `param.samples` independent runs on one contact network.
/// The sample seeds are drawn up front, so the result does not depend on
/// the number of threads.
pub fn sample_measures(param: &SimpleSampleParam) -> Result<Measured, SimulationError>
{
    if param.samples == 0 {
        return Err(ConfigurationError::ZeroSamples.into());
    }
    let mut base = Simulation::new(param.simulation.clone())?;
    let graph = base.graph().clone();
    let seeds = base.sample_seeds(param.samples);
    let n = param.simulation.population_size;
    info!(samples = param.samples, seed = base.seed(), "sampling runs");

    let bar = indication_bar(param.samples as u64);
    let summaries = seeds
        .par_iter()
        .progress_with(bar.clone())
        .map(
            |&sir_seed| -> Result<RunSummary, SimulationError>
            {
                let mut simulation = Simulation::with_graph(
                    graph.clone(),
                    param.simulation.clone(),
                    sir_seed
                )?;
                let records = simulation.run_records()?;
                Ok(RunSummary::from_records(&records, n))
            }
        ).collect::<Result<Vec<_>, SimulationError>>()?;
    bar.finish_with_message("Done");

    let frac = param.fraction.then(|| n as f64);
    let m: Vec<usize> = summaries.iter().map(|s| s.peak_infected).collect();
    let c: Vec<usize> = summaries.iter().map(|s| s.ever_infected).collect();
    let t: Vec<usize> = summaries.iter()
        .filter_map(|s| s.extinction_day)
        .collect();

    let var_m = MyVariance::from_slice(&m, frac)
        .ok_or(ConfigurationError::ZeroSamples)?;
    let var_c = MyVariance::from_slice(&c, frac)
        .ok_or(ConfigurationError::ZeroSamples)?;
    let measured = Measured{
        var_m,
        var_c,
        var_t: MyVariance::from_slice(&t, None),
        extinct_runs: t.len()
    };
    info!(
        mean_m = measured.var_m.mean(),
        mean_c = measured.var_c.mean(),
        extinct_runs = measured.extinct_runs,
        "sampling done"
    );
    Ok(measured)
}

pub fn write_measured(
    path: &Path,
    measured: &Measured,
    samples: usize,
    json: &Value
) -> std::io::Result<()>
{
    let mut buf = create_writer(path)?;
    write_jsons(std::slice::from_ref(json), &mut buf)?;
    writeln!(buf, "#Measure Mean Variance Mean_err Samples")?;
    let rows = [
        (MeasureType::M, Some(measured.var_m), samples),
        (MeasureType::C, Some(measured.var_c), samples),
        (MeasureType::T, measured.var_t, measured.extinct_runs),
    ];
    for (measure, var, count) in rows{
        match var{
            Some(var) => writeln!(
                buf,
                "{} {:e} {:e} {:e} {count}",
                measure.name(),
                var.mean(),
                var.variance(),
                var.mean_err(count)
            )?,
            None => writeln!(buf, "{} NaN NaN NaN 0", measure.name())?
        }
    }
    buf.flush()
}
