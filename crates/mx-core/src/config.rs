//! Run configuration.
//!
//! The converter reads five MITSIM exports with fixed names from one working
//! directory and writes its results next to them.  Everything that used to be
//! a magic constant (tolerances, the reference node, the 1:100 scale between
//! the two coordinate systems) lives here so callers and tests can override
//! it.

use std::path::{Path, PathBuf};

use log::LevelFilter;

use crate::NodeId;

// ── Files ─────────────────────────────────────────────────────────────────────

/// Names of the five input files, relative to the working directory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputFiles {
    /// Network geometry with the `[Links]` section.
    pub network:    PathBuf,
    /// `dep.out`: one departure record per driver.
    pub departures: PathBuf,
    /// `vehicle.out`: one record per driver that reached its destination.
    pub completions: PathBuf,
    /// MITSIM → Sim Mobility node id and coordinate table.
    pub remap:      PathBuf,
    /// Trimmed `trajectory.out`.
    pub trajectory: PathBuf,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            network:     PathBuf::from("network-BUGIS.dat"),
            departures:  PathBuf::from("dep.out"),
            completions: PathBuf::from("vehicle.out"),
            remap:       PathBuf::from("ms_sm_node_convert.txt"),
            trajectory:  PathBuf::from("traj_compact.txt"),
        }
    }
}

/// Names of the files produced by a successful run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputFiles {
    pub graph:       PathBuf,
    pub drivers:     PathBuf,
    pub node_errors: PathBuf,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            graph:       PathBuf::from("output_network.txt"),
            drivers:     PathBuf::from("agents.gen.xml"),
            node_errors: PathBuf::from("node_errors.csv"),
        }
    }
}

// ── Tolerances ────────────────────────────────────────────────────────────────

/// Distance thresholds used while validating geometry, in network units.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    /// Largest allowed gap between a segment's end and the next one's start.
    pub segment_gap: f64,
    /// Node position mismatches at or above this are logged as warnings.
    pub node_warn:   f64,
    /// Node position mismatches at or above this are logged as errors.
    pub node_loud:   f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { segment_gap: 1.0, node_warn: 1.0, node_loud: 10.0 }
    }
}

// ── ConvertConfig ─────────────────────────────────────────────────────────────

/// Top-level converter configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertConfig {
    /// Directory the input and output file names are resolved against.
    pub work_dir: PathBuf,

    pub inputs:  InputFiles,
    pub outputs: OutputFiles,

    pub tolerances: Tolerances,

    /// Highest synthetic sequence number a single link may use.  Clamped to
    /// [`NodeId::MAX_SEQUENCE`].
    pub max_synthetic_seq: u16,

    /// Node known in both id spaces, used to derive the diagnostic offset.
    pub reference_node: NodeId,

    /// Sim Mobility units per MITSIM unit.
    pub coordinate_scale: f64,

    /// Verbosity handed to the logger installed by the binary.
    pub log_level: LevelFilter,
}

impl ConvertConfig {
    /// Default configuration rooted at `work_dir`.
    pub fn in_dir(work_dir: impl Into<PathBuf>) -> Self {
        Self { work_dir: work_dir.into(), ..Self::default() }
    }

    /// Resolve a configured file name against [`work_dir`](Self::work_dir).
    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.work_dir.join(file)
    }

    /// Effective synthetic sequence cap.
    #[inline]
    pub fn sequence_cap(&self) -> u16 {
        self.max_synthetic_seq.min(NodeId::MAX_SEQUENCE)
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            work_dir:          PathBuf::from("."),
            inputs:            InputFiles::default(),
            outputs:           OutputFiles::default(),
            tolerances:        Tolerances::default(),
            max_synthetic_seq: NodeId::MAX_SEQUENCE,
            reference_node:    NodeId::Natural(122), // lower-left-most node of the Bugis network
            coordinate_scale:  100.0,
            log_level:         LevelFilter::Info,
        }
    }
}
