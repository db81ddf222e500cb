use serde_json::Value;
use serde::Serialize;

use{
    std::{
        fs::File,
        io::{Write, BufWriter},
        path::{Path, PathBuf}
    },
    tracing::info,
    super::*
};

pub const TIME_SERIES_FILE: &str = "simulation_data.json";
pub const SNAPSHOT_FILE: &str = "daily_network_states.json";

pub type CurveWriter = BufWriter<File>;

pub fn create_writer(path: &Path) -> std::io::Result<CurveWriter>
{
    File::create(path).map(BufWriter::new)
}

/// Writes the time series log and the snapshot log of a run into `dir`.
/// Returns the paths of both files.
pub fn write_json_logs(dir: &Path, output: &RunOutput) -> std::io::Result<[PathBuf; 2]>
{
    let time_series = dir.join(TIME_SERIES_FILE);
    write_json_file(&time_series, &output.records)?;
    info!(path = %time_series.display(), days = output.records.len(), "wrote time series");

    let snapshots = dir.join(SNAPSHOT_FILE);
    write_json_file(&snapshots, &output.snapshots)?;
    info!(path = %snapshots.display(), "wrote network states");

    Ok([time_series, snapshots])
}

pub fn write_json_file<T>(path: &Path, value: &T) -> std::io::Result<()>
where T: Serialize + ?Sized
{
    let mut writer = create_writer(path)?;
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()
}

/// `#` prefixed json lines, used as header of data files
pub fn write_jsons<W: Write>(jsons: &[Value], mut writer: W) -> std::io::Result<()>
{
    for j in jsons{
        write!(writer, "#")?;
        serde_json::to_writer(&mut writer, j)?;
        writeln!(writer)?;
    }
    Ok(())
}
