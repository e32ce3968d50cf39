//! Unit tests for mx-remap.

#[cfg(test)]
mod helpers {
    use mx_core::ConvertConfig;
    use mx_network::{RoadNetwork, load_network_str};
    use mx_trips::{DriverTable, load_completions_reader, load_departures_reader};

    /// Link 10: 122 (1,1) → 200 (2,1).  Link 11: 200 → 122.
    pub const NETWORK: &str = "\
[Links]
{
  {10 1 122 200 0
    {101 60 60 0 {1.0e+0 1.0e+0 0.00 1.5e+0 1.0e+0} {0 1} }
    {102 60 60 0 {1.5e+0 1.0e+0 0.00 2.0e+0 1.0e+0} {0 1} }
  }
  {11 1 200 122 0
    {111 60 60 0 {2.0e+0 1.0e+0 0.00 1.0e+0 1.0e+0} {0 1} }
  }
}
";

    /// 122 sits at (1100,1200) in target space, so the offset is (1000,1100).
    /// 200 is off by (5,0) from a pure offset fit.
    pub const REMAP: &str = "\
# MITSIM => Sim Mobility
122 => 60896
{200, 10:1, 10:2} => 60910

60896 = (1100,1200)
60910 = (1195,1200)
";

    pub fn network() -> RoadNetwork {
        load_network_str(NETWORK, &ConvertConfig::default()).unwrap().0
    }

    pub fn drivers() -> DriverTable {
        let mut t = DriverTable::new();
        load_departures_reader("100.5 1 122 200 1\n90.25 2 200 122 1\n".as_bytes(), &mut t)
            .unwrap();
        load_completions_reader("1 0 10 122 200 200 101 200 10 1.0 0\n".as_bytes(), &mut t)
            .unwrap();
        t
    }
}

// ── Line shapes ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod line {
    use mx_core::{LinkId, NodeId};

    use crate::{RemapLine, parse_line};

    #[test]
    fn single_source() {
        assert_eq!(
            parse_line("122 => 60896"),
            Some(RemapLine::Map { sources: vec![NodeId::Natural(122)], target: 60896 })
        );
        assert_eq!(
            parse_line("122=>60896"),
            Some(RemapLine::Map { sources: vec![NodeId::Natural(122)], target: 60896 })
        );
    }

    #[test]
    fn source_list_with_synthetic_ids() {
        let expected = vec![
            NodeId::Synthetic { link: LinkId(45), seq: 1 },
            NodeId::Synthetic { link: LinkId(45), seq: 2 },
            NodeId::Natural(57),
        ];
        assert_eq!(
            parse_line("{45:1, 45:2, 57} => 60910"),
            Some(RemapLine::Map { sources: expected.clone(), target: 60910 })
        );
        assert_eq!(
            parse_line("{45:1 45:2,57}=> 60910"),
            Some(RemapLine::Map { sources: expected, target: 60910 })
        );
    }

    #[test]
    fn coordinates() {
        assert_eq!(
            parse_line("60896 = (3714955,14324512)"),
            Some(RemapLine::Coordinates { target: 60896, x: 3714955, y: 14324512 })
        );
    }

    #[test]
    fn trailing_comment_is_ignored() {
        assert_eq!(
            parse_line("122 => 60896   # lower left"),
            Some(RemapLine::Map { sources: vec![NodeId::Natural(122)], target: 60896 })
        );
    }

    #[test]
    fn unrecognised_lines() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("# only a comment"), None);
        assert_eq!(parse_line("122 -> 60896"), None);
        assert_eq!(parse_line("{} => 60896"), None);
        assert_eq!(parse_line("{12:0} => 60896"), None);
        assert_eq!(parse_line("122 => 60896x"), None);
        assert_eq!(parse_line("60896 = 3714955,14324512"), None);
    }
}

// ── NodeMapping ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod mapping {
    use mx_core::{NodeId, TargetNode};

    use crate::{NodeMapping, RemapError};

    #[test]
    fn many_to_one_is_allowed() {
        let mut m = NodeMapping::new();
        m.map(NodeId::Natural(1), 10).unwrap();
        m.map(NodeId::Natural(2), 10).unwrap();
        assert_eq!(m.source_count(), 2);
        assert_eq!(m.target_count(), 1);
    }

    #[test]
    fn remapping_to_same_target_is_idempotent() {
        let mut m = NodeMapping::new();
        m.map(NodeId::Natural(5), 100).unwrap();
        m.map(NodeId::Natural(5), 100).unwrap();
        assert_eq!(m.source_count(), 1);
        assert_eq!(m.target_id(NodeId::Natural(5)), Some(100));
    }

    #[test]
    fn remapping_to_other_target_is_fatal() {
        let mut m = NodeMapping::new();
        m.map(NodeId::Natural(5), 100).unwrap();
        let err = m.map(NodeId::Natural(5), 101).unwrap_err();
        assert!(matches!(
            err,
            RemapError::Conflict { node: NodeId::Natural(5), existing: 100, requested: 101 }
        ));
    }

    #[test]
    fn coordinates_for_unknown_target_are_fatal() {
        let mut m = NodeMapping::new();
        assert!(matches!(m.set_coordinates(7, 1, 2), Err(RemapError::UnknownTarget(7))));
    }

    #[test]
    fn coordinates_are_shared_by_all_sources() {
        let mut m = NodeMapping::new();
        m.map(NodeId::Natural(1), 10).unwrap();
        m.map(NodeId::Natural(2), 10).unwrap();
        m.set_coordinates(10, 30, 40).unwrap();
        let expected = TargetNode { id: 10, x: 30, y: 40 };
        assert_eq!(m.target(NodeId::Natural(1)), Some(expected));
        assert_eq!(m.target(NodeId::Natural(2)), Some(expected));
        assert!(m.untranslated().is_empty());
    }

    #[test]
    fn untranslated_targets_are_listed() {
        let mut m = NodeMapping::new();
        m.map(NodeId::Natural(1), 10).unwrap();
        m.map(NodeId::Natural(2), 20).unwrap();
        m.set_coordinates(20, 1, 1).unwrap();
        assert_eq!(m.untranslated(), vec![10]);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use mx_core::{LinkId, NodeId, TargetNode};

    use super::helpers::*;
    use crate::{RemapError, load_remap, load_remap_str};

    #[test]
    fn loads_all_shapes() {
        let (m, report) = load_remap_str(REMAP).unwrap();
        assert_eq!(report.mapping_lines, 2);
        assert_eq!(report.coordinate_lines, 2);
        assert!(report.skipped.is_empty());
        assert!(report.untranslated.is_empty());
        assert_eq!(
            m.target(NodeId::Synthetic { link: LinkId(10), seq: 2 }),
            Some(TargetNode { id: 60910, x: 1195, y: 1200 })
        );
    }

    #[test]
    fn unknown_shapes_are_skipped_with_line_numbers() {
        let (_, report) = load_remap_str("1 => 10\nwhat is this\n\n10 = (1,2)\n").unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
        assert_eq!(report.skipped[0].text, "what is this");
    }

    #[test]
    fn conflicting_lines_are_fatal() {
        let err = load_remap_str("5 => 100\n{4, 5} => 101\n").unwrap_err();
        assert!(matches!(err, RemapError::Conflict { existing: 100, requested: 101, .. }));
    }

    #[test]
    fn coordinates_before_mapping_are_fatal() {
        let err = load_remap_str("10 = (1,2)\n1 => 10\n").unwrap_err();
        assert!(matches!(err, RemapError::UnknownTarget(10)));
    }

    #[test]
    fn reports_untranslated_targets() {
        let (_, report) = load_remap_str("1 => 10\n2 => 20\n20 = (5,5)\n").unwrap();
        assert_eq!(report.untranslated, vec![10]);
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ms_sm_node_convert.txt");
        std::fs::write(&path, REMAP).unwrap();
        let (m, _) = load_remap(&path).unwrap();
        assert_eq!(m.target_count(), 2);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_remap(std::path::Path::new("/no/such/remap.txt")).unwrap_err();
        assert!(matches!(err, RemapError::Read { .. }));
    }
}

// ── Offset diagnostics ────────────────────────────────────────────────────────

#[cfg(test)]
mod offset {
    use mx_core::{NodeId, Point};

    use super::helpers::*;
    use crate::{RemapError, derive_offset, load_remap_str, node_errors};

    #[test]
    fn offset_from_reference_node() {
        let net = network();
        let (m, _) = load_remap_str(REMAP).unwrap();
        let offset = derive_offset(&net, &m, NodeId::Natural(122), 100.0).unwrap();
        assert_eq!(offset, Point::new(1000.0, 1100.0));
    }

    #[test]
    fn per_node_errors() {
        let net = network();
        let (m, _) = load_remap_str(REMAP).unwrap();
        let offset = derive_offset(&net, &m, NodeId::Natural(122), 100.0).unwrap();
        let report = node_errors(&net, &m, offset, 100.0);

        // Natural endpoints only, each once: 122 then 200.
        let nodes: Vec<NodeId> = report.errors.iter().map(|e| e.node).collect();
        assert_eq!(nodes, vec![NodeId::Natural(122), NodeId::Natural(200)]);

        let e200 = &report.errors[1];
        assert_eq!(e200.target, 60910);
        assert_eq!(e200.expected, Point::new(1200.0, 1200.0));
        assert_eq!(e200.error, Point::new(5.0, 0.0));

        let s = report.summary.unwrap();
        assert_eq!(s.count, 2);
        assert!((s.mean - 2.5).abs() < 1e-9);
        assert!((s.std_dev - 2.5).abs() < 1e-9);
    }

    #[test]
    fn nodes_without_coordinates_are_not_measured() {
        let net = network();
        let (m, _) = load_remap_str("122 => 1\n200 => 2\n1 = (100,100)\n").unwrap();
        let report = node_errors(&net, &m, Point::ORIGIN, 100.0);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].error, Point::ORIGIN);
    }

    #[test]
    fn unmapped_reference_is_fatal() {
        let net = network();
        let (m, _) = load_remap_str("200 => 2\n").unwrap();
        let err = derive_offset(&net, &m, NodeId::Natural(122), 100.0).unwrap_err();
        assert!(matches!(err, RemapError::UnmappedReference(NodeId::Natural(122))));
    }

    #[test]
    fn reference_missing_from_network_is_fatal() {
        let net = network();
        let (m, _) = load_remap_str("999 => 2\n").unwrap();
        let err = derive_offset(&net, &m, NodeId::Natural(999), 100.0).unwrap_err();
        assert!(matches!(err, RemapError::ReferenceNotFound(NodeId::Natural(999))));
    }

    #[test]
    fn mapped_links_need_both_ends() {
        let net = network();
        let (m, _) = load_remap_str("122 => 1\n").unwrap();
        assert_eq!(m.mapped_link_count(&net), 0);
        let (m, _) = load_remap_str(REMAP).unwrap();
        assert_eq!(m.mapped_link_count(&net), 2);
    }
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod placement {
    use mx_core::{AgentId, TargetNode};

    use super::helpers::*;
    use crate::{RemapError, departure_ms, load_remap_str, place_drivers};

    #[test]
    fn departure_is_relative_and_truncated() {
        assert_eq!(departure_ms(100.5, 100.5), 0);
        assert_eq!(departure_ms(101.0, 100.5), 500);
        assert_eq!(departure_ms(100.0, 99.9995), 0);
        assert_eq!(departure_ms(90.25, 100.5), -10250);
    }

    #[test]
    fn places_every_driver() {
        let mut t = drivers();
        let (m, _) = load_remap_str(REMAP).unwrap();
        let unresolved = place_drivers(&mut t, &m, 100.5).unwrap();
        assert_eq!(unresolved, 0);

        let p1 = t.get(AgentId(1)).unwrap().placement.unwrap();
        assert_eq!(p1.origin, TargetNode { id: 60896, x: 1100, y: 1200 });
        assert_eq!(p1.destination.id, 60910);
        assert_eq!(p1.departure_ms, 0);

        // Never completed, still placed.
        let d2 = t.get(AgentId(2)).unwrap();
        assert!(!d2.completed);
        assert_eq!(d2.placement.unwrap().origin.id, 60910);
    }

    #[test]
    fn untranslated_endpoints_are_counted() {
        let mut t = drivers();
        let (m, _) = load_remap_str("122 => 1\n200 => 2\n1 = (5,5)\n").unwrap();
        assert_eq!(place_drivers(&mut t, &m, 0.0).unwrap(), 2);
    }

    #[test]
    fn unmapped_endpoint_is_fatal() {
        let mut t = drivers();
        let (m, _) = load_remap_str("122 => 1\n").unwrap();
        let err = place_drivers(&mut t, &m, 0.0).unwrap_err();
        assert!(matches!(
            err,
            RemapError::UnmappedEndpoint { agent: AgentId(1), node: 200, role: "destination" }
        ));
    }
}
