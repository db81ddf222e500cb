use{
    serde::{Serialize, Deserialize},
    crate::stats_methods::*,
};

pub const DEFAULT_SYSTEM_SIZE: usize = 500;
pub const DEFAULT_AVERAGE_DEGREE: usize = 4;
pub const DEFAULT_REWIRE_PROB: f64 = 0.1;
pub const DEFAULT_LAMBDA: f64 = 0.05;
pub const DEFAULT_RECOVERY_PERIOD: u32 = 14;
pub const DEFAULT_INITIAL_INFECTED: usize = 50;
pub const DEFAULT_SIMULATION_DAYS: usize = 50;
pub const DEFAULT_SIR_SEED: u64 = 1489264107025;
pub const DEFAULT_SAMPLES_SIMPLE_SAMPLE: usize = 1000;

#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq, Eq)]
pub enum MeasureType {
    // ever infected
    C,
    // max infected
    M,
    // first day without infected nodes
    T,
}

impl MeasureType{
    pub fn name(self) -> &'static str
    {
        match self{
            Self::C => "C",
            Self::M => "M",
            Self::T => "T",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Measured
{
    pub var_m: MyVariance,
    pub var_c: MyVariance,
    /// only runs that went extinct within the simulated days
    pub var_t: Option<MyVariance>,
    pub extinct_runs: usize,
}
