//! The simulated-annealing gate-assignment search.
//!
//! Each trajectory starts from a fresh random assignment and walks the
//! neighborhood of swap/substitute moves under a log-spaced cooling
//! schedule, followed by a zero-temperature quench. Trajectories are fully
//! independent (they share only the read-only netlist and library), so they
//! run in parallel; the best-of-trajectories reduction walks the results in
//! trajectory index order so ties go to the first-encountered maximum.

use crate::activity::{init_input_activities, simulate_activity};
use crate::assign::{
    assign_input_sensors, assign_output_reporters, propose_move, random_assignment,
};
use crate::error::TechMapError;
use crate::logic::simulate_logic;
use crate::roadblock::count_roadblocks;
use crate::score::score;
use crate::techmap::TechMap;
use crate::toxicity::{init_output_toxicity, min_growth, simulate_toxicity};
use helix_common::InternalError;
use helix_config::AnnealConfig;
use helix_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use helix_library::GateLibrary;
use helix_netlist::Netlist;
use rand::Rng;
use rayon::prelude::*;

/// The winning assignment and its figures of merit.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// The best-scoring assignment across all trajectories.
    pub techmap: TechMap,
    /// Its worst-case on/off ratio.
    pub score: f64,
    /// Its minimum relative growth across outputs and rows.
    pub min_growth: f64,
    /// Its roadblocked-node count.
    pub roadblocks: usize,
}

/// The log-spaced cooling schedule.
///
/// Temperature at step `j` is `10^(log10(max_temp) - j * log_inc)` where
/// `log_inc` divides the log-temperature range evenly over the annealing
/// steps; every step past them runs at exactly zero (the quench).
struct Schedule {
    log_max: f64,
    log_inc: f64,
    anneal_steps: usize,
    total_steps: usize,
}

impl Schedule {
    fn new(config: &AnnealConfig) -> Self {
        let log_max = config.max_temp.log10();
        let log_min = config.min_temp.log10();
        Self {
            log_max,
            log_inc: (log_max - log_min) / config.steps as f64,
            anneal_steps: config.steps,
            total_steps: config.steps + config.t0_steps,
        }
    }

    fn temperature(&self, step: usize) -> f64 {
        if step >= self.anneal_steps {
            0.0
        } else {
            10f64.powf(self.log_max - step as f64 * self.log_inc)
        }
    }
}

/// Runs the full search and returns the best assignment found.
///
/// The caller is expected to have validated `config`. Logic simulation, the
/// sensor/reporter assignments, and the input activities depend only on the
/// netlist and library, so they are computed once on a base map every
/// trajectory clones. Each trajectory reports its final score through the
/// sink as it finishes; completion order is nondeterministic under rayon,
/// so the notes carry the trajectory index.
pub fn optimize(
    netlist: &Netlist,
    library: &GateLibrary,
    config: &AnnealConfig,
    sink: &DiagnosticSink,
) -> Result<SearchOutcome, TechMapError> {
    let mut base = TechMap::new(netlist);
    simulate_logic(&mut base, netlist)?;
    assign_input_sensors(&mut base, netlist, library)?;
    assign_output_reporters(&mut base, netlist, library)?;
    init_input_activities(&mut base, netlist, library)?;
    init_output_toxicity(&mut base, netlist);

    let schedule = Schedule::new(config);
    let results: Vec<(TechMap, f64)> = (0..config.trajectories)
        .into_par_iter()
        .map(|index| {
            let result = run_trajectory(&base, netlist, library, config, &schedule)?;
            sink.emit(Diagnostic::note(
                DiagnosticCode::new(Category::Search, 3),
                format!(
                    "trajectory {} of {} complete: score {:.4}",
                    index + 1,
                    config.trajectories,
                    result.1
                ),
            ));
            Ok(result)
        })
        .collect::<Result<_, TechMapError>>()?;

    let mut best: Option<(TechMap, f64)> = None;
    for (techmap, trajectory_score) in results {
        if best.as_ref().map_or(true, |(_, b)| trajectory_score > *b) {
            best = Some((techmap, trajectory_score));
        }
    }
    let (techmap, best_score) =
        best.ok_or_else(|| InternalError::new("search produced no trajectory results"))?;

    let growth = min_growth(&techmap, netlist);
    let roadblocks = count_roadblocks(&techmap, netlist, library);
    Ok(SearchOutcome {
        techmap,
        score: best_score,
        min_growth: growth,
        roadblocks,
    })
}

fn run_trajectory(
    base: &TechMap,
    netlist: &Netlist,
    library: &GateLibrary,
    config: &AnnealConfig,
    schedule: &Schedule,
) -> Result<(TechMap, f64), TechMapError> {
    let mut rng = rand::thread_rng();
    let mut current = base.clone();
    random_assignment(&mut current, netlist, library, &mut rng)?;
    simulate_activity(&mut current, netlist, library)?;
    simulate_toxicity(&mut current, netlist, library)?;
    let mut current_score = score(&current, netlist);

    for step in 0..schedule.total_steps {
        anneal_step(
            &mut current,
            &mut current_score,
            schedule.temperature(step),
            netlist,
            library,
            config,
            &mut rng,
        )?;
    }
    Ok((current, current_score))
}

/// One propose/evaluate/decide step at the given temperature.
///
/// Roadblock gating compares counts first: a worse count rejects the
/// candidate, a better one is taken outright. Toxicity gating follows:
/// while the current circuit is unhealthy only strict growth improvements
/// pass, and a healthy circuit never accepts a candidate at or below the
/// threshold. A candidate reaching the score decision must also be
/// roadblock-free; the Metropolis criterion then covers improving and
/// worsening moves alike.
fn anneal_step(
    current: &mut TechMap,
    current_score: &mut f64,
    temperature: f64,
    netlist: &Netlist,
    library: &GateLibrary,
    config: &AnnealConfig,
    rng: &mut impl Rng,
) -> Result<(), TechMapError> {
    let mut candidate = current.clone();
    if !propose_move(&mut candidate, netlist, library, rng) {
        return Ok(());
    }
    // logic is assignment-independent, only activity and toxicity move
    simulate_activity(&mut candidate, netlist, library)?;
    simulate_toxicity(&mut candidate, netlist, library)?;
    let candidate_score = score(&candidate, netlist);

    let candidate_roadblocks = if config.check_roadblocks {
        let current_roadblocks = count_roadblocks(current, netlist, library);
        let candidate_roadblocks = count_roadblocks(&candidate, netlist, library);
        if candidate_roadblocks > current_roadblocks {
            return Ok(());
        }
        if candidate_roadblocks < current_roadblocks {
            *current = candidate;
            *current_score = candidate_score;
            return Ok(());
        }
        candidate_roadblocks
    } else {
        0
    };

    if config.check_toxicity {
        let current_growth = min_growth(current, netlist);
        let candidate_growth = min_growth(&candidate, netlist);
        if current_growth < config.toxicity_threshold {
            // unhealthy circuit: only strict growth improvements pass
            if candidate_growth > current_growth {
                *current = candidate;
                *current_score = candidate_score;
            }
            return Ok(());
        }
        if candidate_growth <= config.toxicity_threshold {
            return Ok(());
        }
    }

    let delta = candidate_score - *current_score;
    if candidate_roadblocks == 0 && metropolis(delta, temperature, rng) {
        *current = candidate;
        *current_score = candidate_score;
    }
    Ok(())
}

/// The Metropolis acceptance decision at a given temperature.
///
/// A better candidate is always accepted; a worse one with probability
/// `exp(delta / temperature)`, which is never at temperature zero.
fn metropolis(delta: f64, temperature: f64, rng: &mut impl Rng) -> bool {
    if delta > 0.0 {
        return true;
    }
    temperature > 0.0 && rng.gen::<f64>() < (delta / temperature).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use helix_library::{Curve, Gate, Part, PartKind, ToxicityTable};
    use helix_netlist::{NodeId, NodeKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn schedule_starts_at_max_and_quenches_to_zero() {
        let config = AnnealConfig {
            steps: 10,
            t0_steps: 3,
            max_temp: 100.0,
            min_temp: 0.001,
            ..Default::default()
        };
        let schedule = Schedule::new(&config);
        assert!((schedule.temperature(0) - 100.0).abs() < 1e-9);
        for step in 1..10 {
            assert!(schedule.temperature(step) < schedule.temperature(step - 1));
        }
        for step in 10..13 {
            assert_eq!(schedule.temperature(step), 0.0);
        }
    }

    #[test]
    fn schedule_reaches_min_temp_at_last_anneal_step() {
        let config = AnnealConfig {
            steps: 500,
            max_temp: 100.0,
            min_temp: 0.001,
            ..Default::default()
        };
        let schedule = Schedule::new(&config);
        // one log increment above min_temp at the final annealing step
        let last = schedule.temperature(499);
        assert!(last > 0.001 && last < 0.002);
    }

    #[test]
    fn metropolis_never_accepts_worse_at_zero_temperature() {
        let mut rng = rand::thread_rng();
        for i in 1..100 {
            assert!(!metropolis(-(i as f64) * 0.01, 0.0, &mut rng));
        }
    }

    #[test]
    fn metropolis_always_accepts_better() {
        let mut rng = rand::thread_rng();
        for i in 1..100 {
            assert!(metropolis(i as f64 * 0.01, 0.0, &mut rng));
            assert!(metropolis(i as f64 * 0.01, 50.0, &mut rng));
        }
    }

    fn hill(k: f64) -> Curve {
        Curve::Hill {
            ymax: 3.0,
            ymin: 0.02,
            k,
            n: 2.5,
        }
    }

    fn nand_netlist() -> Netlist {
        let mut nl = Netlist::new();
        nl.add_node("a", NodeKind::Input).unwrap();
        nl.add_node("b", NodeKind::Input).unwrap();
        nl.add_node("not_a", NodeKind::Not).unwrap();
        nl.add_node("not_b", NodeKind::Not).unwrap();
        nl.add_node("nor_0", NodeKind::Nor).unwrap();
        nl.add_node("out", NodeKind::Output).unwrap();
        nl.add_edge("e0", "a", "not_a").unwrap();
        nl.add_edge("e1", "b", "not_b").unwrap();
        nl.add_edge("e2", "not_a", "nor_0").unwrap();
        nl.add_edge("e3", "not_b", "nor_0").unwrap();
        nl.add_edge("e4", "nor_0", "out").unwrap();
        nl
    }

    fn library() -> GateLibrary {
        let mut lib = GateLibrary::new();
        lib.add_input_sensor("sen_a", 0.003, 2.8).unwrap();
        lib.add_input_sensor("sen_b", 0.001, 4.4).unwrap();
        lib.add_gate(Gate::output_reporter("yfp", 1.0)).unwrap();
        let toxicity =
            ToxicityTable::new(vec![(0.01, 1.0), (0.1, 0.95), (1.0, 0.9), (10.0, 0.85)]).unwrap();
        for (i, (group, k)) in [
            ("AmtR", 0.07),
            ("PhlF", 0.03),
            ("SrpR", 0.1),
            ("BetI", 0.4),
            ("HlyIIR", 0.2),
        ]
        .iter()
        .enumerate()
        {
            lib.add_gate(
                Gate::logic(format!("g{i}_{group}"), *group, hill(*k))
                    .with_toxicity(toxicity.clone()),
            )
            .unwrap();
        }
        lib
    }

    /// Builds a seeded, fully-assigned starting state the way a trajectory
    /// does, so individual step decisions can be tested deterministically.
    fn seeded_start(nl: &Netlist, lib: &GateLibrary, seed: u64) -> (TechMap, f64, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut map = TechMap::new(nl);
        simulate_logic(&mut map, nl).unwrap();
        assign_input_sensors(&mut map, nl, lib).unwrap();
        assign_output_reporters(&mut map, nl, lib).unwrap();
        init_input_activities(&mut map, nl, lib).unwrap();
        init_output_toxicity(&mut map, nl);
        random_assignment(&mut map, nl, lib, &mut rng).unwrap();
        simulate_activity(&mut map, nl, lib).unwrap();
        simulate_toxicity(&mut map, nl, lib).unwrap();
        let initial_score = score(&map, nl);
        (map, initial_score, rng)
    }

    fn logic_gates_of(map: &TechMap, nl: &Netlist) -> Vec<Option<helix_library::GateId>> {
        nl.logic_nodes()
            .into_iter()
            .map(|id: NodeId| map.gate_of(id))
            .collect()
    }

    #[test]
    fn search_terminates_with_full_assignment() {
        let nl = nand_netlist();
        let lib = library();
        let config = AnnealConfig {
            trajectories: 5,
            steps: 20,
            t0_steps: 5,
            ..Default::default()
        };
        let sink = DiagnosticSink::new();
        let outcome = optimize(&nl, &lib, &config, &sink).unwrap();
        assert!(outcome.techmap.is_fully_assigned());
        assert!(outcome.score.is_finite());
        assert!(outcome.score > 0.0);
        assert!(outcome.min_growth >= 0.01 && outcome.min_growth <= 1.0);
        let progress = sink
            .diagnostics()
            .iter()
            .filter(|d| d.message.starts_with("trajectory "))
            .count();
        assert_eq!(progress, 5);
    }

    #[test]
    fn insufficient_gates_fail_the_search() {
        let nl = nand_netlist();
        let mut lib = GateLibrary::new();
        lib.add_input_sensor("sen_a", 0.003, 2.8).unwrap();
        lib.add_input_sensor("sen_b", 0.001, 4.4).unwrap();
        lib.add_gate(Gate::output_reporter("yfp", 1.0)).unwrap();
        lib.add_gate(Gate::logic("g0", "AmtR", hill(0.1))).unwrap();
        lib.add_gate(Gate::logic("g1", "AmtR", hill(0.2))).unwrap();
        let config = AnnealConfig {
            trajectories: 2,
            steps: 5,
            t0_steps: 2,
            ..Default::default()
        };
        let err = optimize(&nl, &lib, &config, &DiagnosticSink::new()).unwrap_err();
        assert!(matches!(err, TechMapError::InsufficientGates { .. }));
    }

    #[test]
    fn equally_roadblocked_candidates_are_rejected() {
        let nl = nand_netlist();
        let mut lib = GateLibrary::new();
        lib.add_input_sensor("sen_a", 0.003, 2.8).unwrap();
        lib.add_input_sensor("sen_b", 0.001, 4.4).unwrap();
        lib.add_gate(Gate::output_reporter("yfp", 1.0)).unwrap();
        for (i, (group, k)) in [
            ("AmtR", 0.07),
            ("PhlF", 0.03),
            ("SrpR", 0.1),
            ("BetI", 0.4),
            ("HlyIIR", 0.2),
        ]
        .iter()
        .enumerate()
        {
            lib.add_gate(
                Gate::logic(format!("g{i}_{group}"), *group, hill(*k))
                    .with_promoter(Part::new(format!("p{group}"), PartKind::Promoter)),
            )
            .unwrap();
            lib.add_logic_roadblock(format!("p{group}"));
        }
        let config = AnnealConfig {
            check_toxicity: false,
            ..Default::default()
        };

        // Every logic promoter is roadblock-listed, so nor_0 (two logic
        // fan-ins) is roadblocked under every full assignment: all moves
        // keep the count at one, and none may be accepted on score.
        let (mut current, mut current_score, mut rng) = seeded_start(&nl, &lib, 7);
        assert_eq!(count_roadblocks(&current, &nl, &lib), 1);
        let initial = logic_gates_of(&current, &nl);
        for step in 0..200 {
            let temperature = if step % 2 == 0 { 25.0 } else { 0.0 };
            anneal_step(
                &mut current,
                &mut current_score,
                temperature,
                &nl,
                &lib,
                &config,
                &mut rng,
            )
            .unwrap();
        }
        assert_eq!(logic_gates_of(&current, &nl), initial);
    }

    #[test]
    fn growth_at_the_threshold_blocks_acceptance() {
        let mut nl = Netlist::new();
        nl.add_node("a", NodeKind::Input).unwrap();
        nl.add_node("not_a", NodeKind::Not).unwrap();
        nl.add_node("out", NodeKind::Output).unwrap();
        nl.add_edge("e0", "a", "not_a").unwrap();
        nl.add_edge("e1", "not_a", "out").unwrap();

        // Both gates sit exactly at the 0.75 growth threshold everywhere
        // (a one-row table interpolates to nothing but its own growth),
        // but the second has a far better response curve.
        let flat = ToxicityTable::new(vec![(1.0, 0.75)]).unwrap();
        let mut lib = GateLibrary::new();
        lib.add_input_sensor("sen_a", 0.003, 2.8).unwrap();
        lib.add_gate(Gate::output_reporter("yfp", 1.0)).unwrap();
        lib.add_gate(Gate::logic("g0", "AmtR", hill(5.0)).with_toxicity(flat.clone()))
            .unwrap();
        lib.add_gate(Gate::logic("g1", "PhlF", hill(0.05)).with_toxicity(flat))
            .unwrap();
        let config = AnnealConfig {
            check_roadblocks: false,
            ..Default::default()
        };

        let (mut current, mut current_score, mut rng) = seeded_start(&nl, &lib, 11);
        assert_eq!(min_growth(&current, &nl), config.toxicity_threshold);
        let initial = logic_gates_of(&current, &nl);
        for _ in 0..200 {
            anneal_step(
                &mut current,
                &mut current_score,
                50.0,
                &nl,
                &lib,
                &config,
                &mut rng,
            )
            .unwrap();
        }
        assert_eq!(logic_gates_of(&current, &nl), initial);
    }

    #[test]
    fn quench_accepts_only_improvements() {
        let nl = nand_netlist();
        let lib = library();
        let config = AnnealConfig {
            check_toxicity: false,
            check_roadblocks: false,
            ..Default::default()
        };

        let (mut current, mut current_score, mut rng) = seeded_start(&nl, &lib, 3);
        let mut scores = vec![current_score];
        for _ in 0..300 {
            anneal_step(
                &mut current,
                &mut current_score,
                0.0,
                &nl,
                &lib,
                &config,
                &mut rng,
            )
            .unwrap();
            scores.push(current_score);
        }
        for pair in scores.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_eq!(score(&current, &nl), current_score);
    }
}
