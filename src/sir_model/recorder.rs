use {
    std::collections::BTreeMap,
    serde::{Serialize, Deserialize},
    super::*,
    crate::error::SimulationError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct DailyRecord{
    pub day: usize,
    pub susceptible: usize,
    pub infected: usize,
    pub recovered: usize,
    pub dead: usize,
}

impl DailyRecord{
    /// Count every compartment by scanning all nodes
    pub fn tally(day: usize, state: &SimulationState) -> Result<Self, SimulationError>
    {
        let mut s = 0;
        let mut i = 0;
        let mut r = 0;
        let mut d = 0;
        state.compartments()
            .iter()
            .for_each(
                |contained|
                match contained{
                    InfectionState::Susceptible => s += 1,
                    InfectionState::Infected => i += 1,
                    InfectionState::Recovered => r += 1,
                    InfectionState::Dead => d += 1
                }
            );
        let record = Self{
            day,
            susceptible: s,
            infected: i,
            recovered: r,
            dead: d
        };
        if record.total() != state.graph().node_count() {
            return Err(
                SimulationError::invariant(
                    format!(
                        "day {day}: compartments add up to {} but the population is {}",
                        record.total(),
                        state.graph().node_count()
                    )
                )
            );
        }
        Ok(record)
    }

    pub fn total(&self) -> usize
    {
        self.susceptible + self.infected + self.recovered + self.dead
    }

    /// infected + recovered + dead
    pub fn ever_infected(&self) -> usize
    {
        self.infected + self.recovered + self.dead
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct DailyNetworkSnapshot{
    pub day: usize,
    pub node_states: BTreeMap<usize, InfectionState>,
}

impl DailyNetworkSnapshot{
    pub fn capture(day: usize, state: &SimulationState) -> Self
    {
        Self{
            day,
            node_states: state.compartments()
                .iter()
                .copied()
                .enumerate()
                .collect()
        }
    }
}

/// Append-only time series and snapshot logs of one run
#[derive(Clone, Debug, Default)]
pub struct MetricsRecorder{
    records: Vec<DailyRecord>,
    snapshots: Vec<DailyNetworkSnapshot>,
}

impl MetricsRecorder{
    pub fn with_capacity(days: usize) -> Self
    {
        Self{
            records: Vec::with_capacity(days),
            snapshots: Vec::with_capacity(days)
        }
    }

    /// Pure aggregation of `state`, nothing is stored
    pub fn observe(
        day: usize,
        state: &SimulationState
    ) -> Result<(DailyRecord, DailyNetworkSnapshot), SimulationError>
    {
        let record = DailyRecord::tally(day, state)?;
        let snapshot = DailyNetworkSnapshot::capture(day, state);
        Ok((record, snapshot))
    }

    /// Observe `state` and append it to the logs. Days have to be recorded
    /// in order, starting at 0.
    pub fn record(
        &mut self,
        day: usize,
        state: &SimulationState
    ) -> Result<&DailyRecord, SimulationError>
    {
        if day != self.records.len() {
            return Err(
                SimulationError::invariant(
                    format!("expected day {} but got day {day}", self.records.len())
                )
            );
        }
        let (record, snapshot) = Self::observe(day, state)?;
        self.snapshots.push(snapshot);
        self.records.push(record);
        Ok(&self.records[day])
    }

    pub fn records(&self) -> &[DailyRecord]
    {
        &self.records
    }

    pub fn snapshots(&self) -> &[DailyNetworkSnapshot]
    {
        &self.snapshots
    }

    pub fn days_recorded(&self) -> usize
    {
        self.records.len()
    }

    pub fn into_logs(self) -> (Vec<DailyRecord>, Vec<DailyNetworkSnapshot>)
    {
        (self.records, self.snapshots)
    }
}
