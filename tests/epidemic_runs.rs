use std::sync::Arc;

use proptest::prelude::*;
use sir_network::sir_model::*;

fn run_from_patient_zero(
    graph: Arc<ContactGraph>,
    lambda: f64,
    recovery_period: u32,
    days: usize
) -> MetricsRecorder
{
    let mut state = SimulationState::from_patients(graph, &[0]).unwrap();
    let mut engine = PropagationEngine::new(lambda, recovery_period, 42).unwrap();
    let mut recorder = MetricsRecorder::default();
    recorder.record(0, &state).unwrap();
    for day in 1..days{
        let (next, record) = engine.advance_one_day(&state).unwrap();
        assert_eq!(record.day, day);
        state = next;
        assert_eq!(recorder.record(day, &state).unwrap(), &record);
    }
    recorder
}

#[test]
fn ring_lattice_with_certain_transmission() {
    let graph = Arc::new(ContactGraph::generate(10, 4, 0.0, 42).unwrap());
    let recorder = run_from_patient_zero(graph, 1.0, 2, 5);

    let counts: Vec<_> = recorder.records()
        .iter()
        .map(|r| (r.susceptible, r.infected, r.recovered, r.dead))
        .collect();
    assert_eq!(
        counts,
        vec![(9, 1, 0, 0), (5, 5, 0, 0), (1, 8, 1, 0), (0, 5, 5, 0), (0, 1, 9, 0)]
    );

    let snapshots = recorder.snapshots();
    assert_eq!(snapshots[2].node_states[&0], InfectionState::Recovered);
    assert_eq!(snapshots[4].node_states[&5], InfectionState::Infected);
    // every node went through the infected compartment by day 4
    for node in 0..10{
        assert!(snapshots.iter().any(|s| s.node_states[&node] == InfectionState::Infected));
    }
}

#[test]
fn recovery_happens_exactly_after_the_recovery_period() {
    let graph = Arc::new(ContactGraph::generate(60, 4, 0.2, 3).unwrap());
    let period = 4;
    let recorder = run_from_patient_zero(graph, 0.4, period, 40);
    let snapshots = recorder.snapshots();
    for node in 0..60{
        let infected_on = snapshots.iter()
            .position(|s| s.node_states[&node] == InfectionState::Infected);
        let recovered_on = snapshots.iter()
            .position(|s| s.node_states[&node] == InfectionState::Recovered);
        if let (Some(start), Some(end)) = (infected_on, recovered_on){
            assert_eq!(end, start + period as usize, "node {node}");
        }
    }
}

#[test]
fn same_seed_same_logs() {
    let param = SimulationParameters{
        population_size: 300,
        average_degree: 6,
        rewiring_probability: 0.2,
        transmission_probability: 0.1,
        recovery_period: 7,
        initial_infected_count: 5,
        simulation_days: 50,
        random_seed: Some(99),
        death_rate: 0.0,
    };
    let a = Simulation::new(param.clone()).unwrap().run().unwrap();
    let b = Simulation::new(param.clone()).unwrap().run().unwrap();
    assert_eq!(a, b);

    let other = SimulationParameters{random_seed: Some(100), ..param};
    let c = Simulation::new(other).unwrap().run().unwrap();
    assert_ne!(a.snapshots, c.snapshots);
}

#[test]
fn long_recovery_means_nobody_recovers() {
    let param = SimulationParameters{
        population_size: 100,
        recovery_period: 31,
        simulation_days: 30,
        initial_infected_count: 3,
        ..SimulationParameters::default()
    };
    let output = Simulation::new(param).unwrap().run().unwrap();
    assert!(output.records.iter().all(|r| r.recovered == 0));
}

#[test]
fn everybody_infected_at_the_start() {
    let param = SimulationParameters{
        population_size: 40,
        initial_infected_count: 40,
        simulation_days: 3,
        ..SimulationParameters::default()
    };
    let output = Simulation::new(param).unwrap().run().unwrap();
    assert_eq!(output.records[0].infected, 40);
    assert_eq!(output.records[0].susceptible, 0);
}

#[test]
fn invalid_parameters_do_not_start() {
    let param = SimulationParameters{
        average_degree: 3,
        ..SimulationParameters::default()
    };
    let err = Simulation::new(param).err().unwrap();
    assert!(err.is_configuration());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]
    #[test]
    fn conservation_and_terminal_recovery(
        n in 10_usize..120,
        p in 0.0_f64..=1.0,
        lambda in 0.0_f64..=1.0,
        recovery_period in 1_u32..6,
        seed in any::<u64>()
    ) {
        let param = SimulationParameters{
            population_size: n,
            average_degree: 4,
            rewiring_probability: p,
            transmission_probability: lambda,
            recovery_period,
            initial_infected_count: 1 + n / 10,
            simulation_days: 25,
            random_seed: Some(seed),
            death_rate: 0.0,
        };
        let output = Simulation::new(param).unwrap().run().unwrap();
        prop_assert_eq!(output.len(), 25);
        for record in &output.records{
            prop_assert_eq!(record.total(), n);
            prop_assert_eq!(record.dead, 0);
        }
        for pair in output.snapshots.windows(2){
            for (node, state) in &pair[0].node_states{
                let next = pair[1].node_states[node];
                match state{
                    InfectionState::Recovered => prop_assert_eq!(next, InfectionState::Recovered),
                    InfectionState::Susceptible => prop_assert_ne!(next, InfectionState::Recovered),
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn zero_transmission_never_grows(
        seed in any::<u64>(),
        recovery_period in 1_u32..10
    ) {
        let param = SimulationParameters{
            population_size: 80,
            transmission_probability: 0.0,
            recovery_period,
            initial_infected_count: 8,
            simulation_days: 15,
            random_seed: Some(seed),
            ..SimulationParameters::default()
        };
        let output = Simulation::new(param).unwrap().run().unwrap();
        let day0 = output.records[0].infected;
        prop_assert_eq!(day0, 8);
        for record in &output.records{
            prop_assert!(record.infected <= day0);
            prop_assert_eq!(record.susceptible, 72);
        }
    }
}
