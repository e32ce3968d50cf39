//! End-to-end conversion run.

use std::collections::BTreeMap;
use std::fmt;

use log::{info, warn};

use mx_core::{AgentId, ConvertConfig, Summary};
use mx_network::{ResolveReport, RoadNetwork, load_network_file};
use mx_output::{FileOutput, OutputWriter};
use mx_remap::{
    NodeMapping, OffsetReport, RemapReport, derive_offset, load_remap, node_errors, place_drivers,
};
use mx_trips::{
    CompletionReport, DepartureReport, DriverTable, TrajectoryReport, first_position_summary,
    load_completions, load_departures, load_trajectory,
};

use crate::ConvertResult;

// ── Conversion ────────────────────────────────────────────────────────────────

/// Everything a run has read and validated, ready for emission.
#[derive(Debug)]
pub struct Conversion {
    pub network:         RoadNetwork,
    pub resolve:         ResolveReport,
    pub drivers:         DriverTable,
    pub departures:      DepartureReport,
    pub completions:     CompletionReport,
    pub mapping:         NodeMapping,
    pub remap:           RemapReport,
    pub trajectory:      TrajectoryReport,
    pub first_positions: BTreeMap<u64, Summary>,
    pub offset:          OffsetReport,
    /// Departure that became time zero.
    pub time_zero:       f64,
}

impl Conversion {
    pub fn summary(&self) -> RunSummary {
        let skipped_lines = self.departures.skipped.len()
            + self.completions.skipped.len()
            + self.remap.skipped.len()
            + self.trajectory.skipped.len();
        let unplaced = self
            .drivers
            .iter()
            .filter(|d| d.placement.is_none_or(|p| p.is_unresolved()))
            .count();

        RunSummary {
            nodes:           self.network.node_count(),
            segments:        self.network.segment_count(),
            links:           self.network.link_count(),
            drivers:         self.drivers.len(),
            id_range:        self.drivers.id_range(),
            completed:       self.completions.completed,
            never_started:   self.drivers.never_started(),
            unplaced,
            mapped_links:    self.mapping.mapped_link_count(&self.network),
            skipped_lines,
            mean_node_error: self.offset.summary.map(|s| s.mean),
        }
    }
}

// ── RunSummary ────────────────────────────────────────────────────────────────

/// Headline numbers of a finished run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub nodes:           usize,
    pub segments:        usize,
    pub links:           usize,
    pub drivers:         usize,
    pub id_range:        Option<(AgentId, AgentId)>,
    pub completed:       usize,
    pub never_started:   usize,
    /// Drivers written to the skipped section.
    pub unplaced:        usize,
    pub mapped_links:    usize,
    pub skipped_lines:   usize,
    pub mean_node_error: Option<f64>,
}

impl RunSummary {
    /// Share of drivers never seen in the trajectory, in percent.
    pub fn never_started_pct(&self) -> f64 {
        if self.drivers == 0 {
            return 0.0;
        }
        100.0 * self.never_started as f64 / self.drivers as f64
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min, max) = self.id_range.map_or((0, 0), |(lo, hi)| (lo.0, hi.0));
        writeln!(f, "{:<15} {:>7}", "Min agent id:", min)?;
        writeln!(f, "{:<15} {:>7}", "Max agent id:", max)?;
        writeln!(f, "{:<15} {:>7}", "Num agents:", self.drivers)?;
        writeln!(f, "{:<15} {:>7}", "Completed:", self.completed)?;
        writeln!(
            f,
            "{:<15} {:>7} ({:.2}%)",
            "Never started:",
            self.never_started,
            self.never_started_pct()
        )?;
        writeln!(f, "{:<15} {:>7}", "Skipped agents:", self.unplaced)?;
        writeln!(f, "{:<15} {:>7} / {}", "Mapped links:", self.mapped_links, self.links)?;
        write!(
            f,
            "{:<15} {:>7} nodes, {} segments",
            "Network:", self.nodes, self.segments
        )
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Runs the converter stages in order against one working directory.
///
/// ```text
/// network ─► departures ─► completions ─► remap ─► trajectory
///         ─► reconcile (offset, placement) ─► validate ─► emit
/// ```
///
/// Every stage reads its file completely before the next one starts.  The
/// first fatal error stops the run; output files are only created after
/// validation succeeded.
pub struct Pipeline {
    config: ConvertConfig,
}

impl Pipeline {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert and write all outputs.
    pub fn run(&self) -> ConvertResult<RunSummary> {
        let conversion = self.convert()?;
        let mut out = FileOutput::new(
            &self.config.work_dir,
            &self.config.outputs,
            self.config.coordinate_scale,
        )?;
        emit(&conversion, &mut out)?;

        let summary = conversion.summary();
        info!("conversion finished: {} drivers written", summary.drivers);
        Ok(summary)
    }

    /// Read, stitch, reconcile and validate, without writing anything.
    pub fn convert(&self) -> ConvertResult<Conversion> {
        let cfg = &self.config;
        let inputs = &cfg.inputs;

        let (network, resolve) = load_network_file(&cfg.resolve(&inputs.network), cfg)?;

        let mut drivers = DriverTable::new();
        let departures = load_departures(&cfg.resolve(&inputs.departures), &mut drivers)?;
        let completions = load_completions(&cfg.resolve(&inputs.completions), &mut drivers)?;

        let (mapping, remap) = load_remap(&cfg.resolve(&inputs.remap))?;

        let trajectory = load_trajectory(&cfg.resolve(&inputs.trajectory), &mut drivers, &network)?;
        let first_positions = first_position_summary(&drivers);

        // Reconcile.
        let offset = derive_offset(&network, &mapping, cfg.reference_node, cfg.coordinate_scale)?;
        let offset = node_errors(&network, &mapping, offset, cfg.coordinate_scale);

        let time_zero = match completions.min_departure {
            Some(t) => t,
            None => {
                warn!("no driver completed; using earliest departure as time zero");
                drivers.min_departure().unwrap_or(0.0)
            }
        };
        place_drivers(&mut drivers, &mapping, time_zero)?;

        // Validate.
        if let Some((min, max)) = drivers.id_range() {
            info!("agent ids {}..={} over {} drivers", min.0, max.0, drivers.len());
        }
        drivers.check_contiguous()?;

        let never_started = drivers.never_started();
        if never_started > 0 {
            info!(
                "a total of {never_started} drivers never started driving ({:.2}%)",
                100.0 * never_started as f64 / drivers.len() as f64
            );
        }
        info!(
            "{} of {} links have both end nodes mapped",
            mapping.mapped_link_count(&network),
            network.link_count()
        );

        Ok(Conversion {
            network,
            resolve,
            drivers,
            departures,
            completions,
            mapping,
            remap,
            trajectory,
            first_positions,
            offset,
            time_zero,
        })
    }
}

/// Write a finished conversion through `out`.
pub fn emit<W: OutputWriter>(conversion: &Conversion, out: &mut W) -> ConvertResult<()> {
    out.write_graph(&conversion.network, &conversion.mapping)?;
    out.write_drivers(&conversion.drivers)?;
    out.write_node_errors(&conversion.offset.errors)?;
    out.finish()?;
    Ok(())
}
