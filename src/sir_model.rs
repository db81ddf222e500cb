pub mod sir_states;
pub use sir_states::*;

pub mod contact_graph;
pub use contact_graph::*;

pub mod sir_options;
pub use sir_options::*;

pub mod state_store;
pub use state_store::*;

pub mod propagation;
pub use propagation::*;

pub mod recorder;
pub use recorder::*;

pub mod simulation;
pub use simulation::*;

pub mod sir_writer;
pub use sir_writer::*;
