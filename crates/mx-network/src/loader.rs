//! Network file loader: stitches the stages together.

use std::path::Path;

use log::info;

use mx_core::ConvertConfig;

use crate::network::RoadNetwork;
use crate::resolver::{NodeResolver, ResolveReport};
use crate::{NetworkError, NetworkResult, extract_links_section, parse_links, strip_comments};

/// Read and resolve the network file at `path`.
///
/// The file is read completely and closed before parsing starts.
pub fn load_network_file(
    path: &Path,
    config: &ConvertConfig,
) -> NetworkResult<(RoadNetwork, ResolveReport)> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| NetworkError::Read { path: path.to_owned(), source })?;
    info!("read network file {path:?} ({} bytes)", text.len());
    load_network_str(&text, config)
}

/// Like [`load_network_file`] but parses an in-memory string.
pub fn load_network_str(
    text: &str,
    config: &ConvertConfig,
) -> NetworkResult<(RoadNetwork, ResolveReport)> {
    let blob = strip_comments(text.lines());
    let section = extract_links_section(&blob)?;
    let links = parse_links(&section, config.tolerances.segment_gap)?;
    info!("parsed {} links from [Links]", links.len());

    NodeResolver::new(config.tolerances, config.sequence_cap()).resolve(links)
}
