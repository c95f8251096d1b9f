//! Gate-assignment search engine for the Helix genetic circuit mapper.
//!
//! This crate takes a combinational logic [`Netlist`] (from an upstream
//! synthesis stage) and a [`GateLibrary`] of measured genetic gates, and
//! assigns one library gate to every node so that the circuit's worst-case
//! on/off activity ratio is approximately maximized, subject to gate
//! uniqueness and group exclusivity.
//!
//! # Pipeline
//!
//! 1. **Logic** — propagate truth-table columns to every node
//! 2. **Boundary assignment** — zip sensors onto inputs, reporters onto outputs
//! 3. **Search** — parallel simulated-annealing trajectories over random
//!    initial assignments, re-simulating activity and toxicity per move
//! 4. **Write-back** — annotate the netlist with the winning gate names and
//!    ordered part lists
//!
//! # Usage
//!
//! ```ignore
//! use helix_techmap::technology_map;
//!
//! let report = technology_map(&mut netlist, &library, &config, &sink)?;
//! assert!(netlist.is_fully_assigned());
//! println!("score {}", report.score);
//! ```

#![warn(missing_docs)]

pub mod activity;
pub mod anneal;
pub mod assign;
pub mod error;
pub mod logic;
pub mod roadblock;
pub mod score;
pub mod techmap;
pub mod toxicity;
pub mod writeback;

pub use anneal::{optimize, SearchOutcome};
pub use error::TechMapError;
pub use techmap::{NodeRole, TechMap, TechNode};
pub use writeback::write_back;

use helix_config::AnnealConfig;
use helix_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use helix_library::GateLibrary;
use helix_netlist::Netlist;

/// The outcome of a completed mapping run, for callers and logs.
#[derive(Clone, Debug)]
pub struct MapReport {
    /// The worst-case on/off activity ratio of the winning assignment.
    pub score: f64,
    /// The winning assignment's minimum relative growth.
    pub min_growth: f64,
    /// The winning assignment's roadblocked-node count.
    pub roadblocks: usize,
}

/// Runs the complete technology-mapping pipeline on a netlist.
///
/// Validates the configuration, runs the annealing search, writes the
/// winning assignment back onto the netlist, and reports the result through
/// the diagnostic sink: per-trajectory progress, a summary, and one note
/// per node carrying its gate, logic column, and simulated activity and
/// toxicity rows.
pub fn technology_map(
    netlist: &mut Netlist,
    library: &GateLibrary,
    config: &AnnealConfig,
    sink: &DiagnosticSink,
) -> Result<MapReport, TechMapError> {
    config.validate()?;

    let outcome = optimize(netlist, library, config, sink)?;
    write_back(&outcome.techmap, netlist, library);

    sink.emit(Diagnostic::note(
        DiagnosticCode::new(Category::Search, 1),
        format!(
            "search complete: score {:.4}, min growth {:.2}, {} roadblocked node(s) \
             over {} trajectories",
            outcome.score, outcome.min_growth, outcome.roadblocks, config.trajectories
        ),
    ));
    for node in &netlist.nodes {
        if let Some(gate) = &node.gate {
            let state = outcome.techmap.node(node.id);
            let mut diag = Diagnostic::note(
                DiagnosticCode::new(Category::Search, 2),
                format!("assigned gate '{gate}'"),
            )
            .with_node(node.name.clone())
            .with_note(format!("logic {}", format_logic(&state.logic)))
            .with_note(format!("activity {}", format_levels(&state.activity)));
            if !state.toxicity.is_empty() {
                diag = diag.with_note(format!("toxicity {}", format_levels(&state.toxicity)));
            }
            sink.emit(diag);
        }
    }

    Ok(MapReport {
        score: outcome.score,
        min_growth: outcome.min_growth,
        roadblocks: outcome.roadblocks,
    })
}

fn format_logic(column: &[bool]) -> String {
    let bits: String = column.iter().map(|&b| if b { '1' } else { '0' }).collect();
    format!("[{bits}]")
}

fn format_levels(levels: &[f64]) -> String {
    let cells: Vec<String> = levels.iter().map(|v| format!("{v:.4}")).collect();
    format!("[{}]", cells.join(", "))
}
