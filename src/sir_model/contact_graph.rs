//! Watts-Strogatz contact network.
//!
//! The graph is built once per run and only read afterwards. The epidemic
//! state is kept outside of it, see [`SimulationState`](super::SimulationState).

use {
    serde::{Serialize, Deserialize},
    net_ensembles::{GenericGraph, Node, graph::NodeContainer},
    rand::{Rng, SeedableRng, distributions::{Uniform, Distribution}},
    rand_pcg::Pcg64,
    tracing::{info, warn},
    crate::error::{ConfigurationError, SimulationError},
};

/// Payload of a node in the contact network. Knows its own id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct Contact{
    pub id: usize
}

impl Node for Contact{
    fn new_from_index(index: usize) -> Self{
        Contact{id: index}
    }
}

pub type ContactNetwork = GenericGraph<Contact, NodeContainer<Contact>>;

#[derive(Clone)]
pub struct ContactGraph{
    network: ContactNetwork,
}

impl ContactGraph{
    /// Deterministic Watts-Strogatz graph for the given seed
    pub fn generate(
        population_size: usize,
        average_degree: usize,
        rewire_prob: f64,
        seed: u64
    ) -> Result<Self, SimulationError>
    {
        let mut rng = Pcg64::seed_from_u64(seed);
        Self::generate_with_rng(population_size, average_degree, rewire_prob, &mut rng)
    }

    pub fn check_parameters(
        population_size: usize,
        average_degree: usize,
        rewire_prob: f64
    ) -> Result<(), ConfigurationError>
    {
        if population_size == 0 {
            return Err(ConfigurationError::EmptyPopulation);
        }
        if average_degree % 2 != 0 {
            return Err(ConfigurationError::OddDegree{degree: average_degree});
        }
        if average_degree == 0 || average_degree >= population_size {
            return Err(
                ConfigurationError::DegreeOutOfRange{
                    degree: average_degree,
                    population_size
                }
            );
        }
        ConfigurationError::check_probability("rewiring_probability", rewire_prob)
    }

    /// 1. ring lattice, every node linked to its `k/2` nearest neighbors on each side
    /// 2. every lattice edge `(u, u+j)` is rewired with probability `rewire_prob`
    ///    to a uniformly drawn node which is neither `u` nor adjacent to `u`
    pub fn generate_with_rng<R: Rng>(
        population_size: usize,
        average_degree: usize,
        rewire_prob: f64,
        rng: &mut R
    ) -> Result<Self, SimulationError>
    {
        Self::check_parameters(population_size, average_degree, rewire_prob)?;
        let n = population_size;
        let half = average_degree / 2;

        let mut network = ContactNetwork::new(n);
        for j in 1..=half {
            for u in 0..n {
                add_edge(&mut network, u, (u + j) % n)?;
            }
        }

        let prob_dist = Uniform::new(0.0, 1.0);
        let node_dist = Uniform::new(0, n);
        let mut rewired = 0_usize;
        for j in 1..=half {
            for u in 0..n {
                if prob_dist.sample(rng) >= rewire_prob {
                    continue;
                }
                // u is already linked to everyone, nothing to rewire to
                if network.degree(u).unwrap_or(0) >= n - 1 {
                    continue;
                }
                let v = (u + j) % n;
                let w = loop {
                    let candidate = node_dist.sample(rng);
                    if candidate != u && !is_adjacent(&network, u, candidate) {
                        break candidate;
                    }
                };
                remove_edge(&mut network, u, v)?;
                add_edge(&mut network, u, w)?;
                rewired += 1;
            }
        }

        info!(
            nodes = n,
            edges = network.edge_count(),
            rewired,
            "generated small world contact network"
        );
        Ok(Self::from_network(network))
    }

    /// Build a graph from an explicit edge list. Self-loops and repeated
    /// edges are rejected.
    pub fn from_edges(
        population_size: usize,
        edges: &[(usize, usize)]
    ) -> Result<Self, SimulationError>
    {
        if population_size == 0 {
            return Err(ConfigurationError::EmptyPopulation.into());
        }
        let mut network = ContactNetwork::new(population_size);
        for &(a, b) in edges {
            if a >= population_size || b >= population_size || a == b {
                return Err(
                    SimulationError::invariant(
                        format!("edge ({a}, {b}) is not valid for {population_size} nodes")
                    )
                );
            }
            add_edge(&mut network, a, b)?;
        }
        Ok(Self::from_network(network))
    }

    fn from_network(network: ContactNetwork) -> Self
    {
        let graph = Self{network};
        if !graph.is_connected() {
            warn!(nodes = graph.node_count(), "contact network is not connected");
        }
        graph
    }

    pub fn node_count(&self) -> usize
    {
        self.network.vertex_count()
    }

    pub fn edge_count(&self) -> usize
    {
        self.network.edge_count()
    }

    pub fn degree(&self, index: usize) -> usize
    {
        self.network.degree(index).unwrap_or(0)
    }

    /// ids of the contacts adjacent to `index`
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_
    {
        self.network
            .contained_iter_neighbors(index)
            .map(|contact| contact.id)
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool
    {
        a < self.node_count() && self.neighbors(a).any(|n_index| n_index == b)
    }

    /// every edge once, as `[a, b]` with `a < b`, sorted
    pub fn edges(&self) -> Vec<[usize; 2]>
    {
        let mut vec = Vec::with_capacity(self.edge_count());
        for a in 0..self.node_count(){
            vec.extend(
                self.neighbors(a)
                    .filter(|&b| a < b)
                    .map(|b| [a, b])
            );
        }
        vec.sort_unstable();
        vec
    }

    pub fn is_connected(&self) -> bool
    {
        self.network.is_connected().unwrap_or(false)
    }

    pub fn average_degree(&self) -> f64
    {
        2.0 * self.edge_count() as f64 / self.node_count() as f64
    }
}

fn is_adjacent(network: &ContactNetwork, a: usize, b: usize) -> bool
{
    network
        .contained_iter_neighbors_with_index(a)
        .any(|(n_index, _)| n_index == b)
}

fn add_edge(network: &mut ContactNetwork, a: usize, b: usize) -> Result<(), SimulationError>
{
    network.add_edge(a, b)
        .map_err(|e| SimulationError::invariant(format!("unable to add edge ({a}, {b}): {e:?}")))
}

fn remove_edge(network: &mut ContactNetwork, a: usize, b: usize) -> Result<(), SimulationError>
{
    network.remove_edge(a, b)
        .map_err(|e| SimulationError::invariant(format!("unable to remove edge ({a}, {b}): {e:?}")))
}
