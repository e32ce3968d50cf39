//! Unit tests for mx-trips.

#[cfg(test)]
mod helpers {
    use mx_core::ConvertConfig;
    use mx_network::{RoadNetwork, load_network_str};

    use crate::{DriverTable, load_completions_reader, load_departures_reader};

    /// Link 10: 122 → 200 over segments 101, 102.  Link 11: 200 → 122 over 111.
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

    pub const DEPARTURES: &str = "\
25200.5 1 122 200 1
25201.0 2 200 122 3 {10 11}
25230.2 3 122 200 1
";

    pub const COMPLETIONS: &str = "\
1 0 1520 122 200 200 25201 25390 1520 8.04 0
3 1 1400 122 200 200 25230 25400 1400 7.50 0
";

    pub fn network() -> RoadNetwork {
        load_network_str(NETWORK, &ConvertConfig::default()).unwrap().0
    }

    pub fn departed() -> DriverTable {
        let mut table = DriverTable::new();
        load_departures_reader(DEPARTURES.as_bytes(), &mut table).unwrap();
        table
    }

    pub fn completed() -> DriverTable {
        let mut table = departed();
        load_completions_reader(COMPLETIONS.as_bytes(), &mut table).unwrap();
        table
    }
}

// ── DriverTable ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use mx_core::AgentId;

    use crate::{Driver, DriverTable, TripError};

    fn driver(id: u32, departure: f64) -> Driver {
        Driver::new(AgentId(id), departure, 122, 200, 1)
    }

    #[test]
    fn contiguous_ids_pass() {
        let mut t = DriverTable::new();
        for id in [2, 1, 3] {
            t.insert(driver(id, 0.0)).unwrap();
        }
        assert_eq!(t.id_range(), Some((AgentId(1), AgentId(3))));
        assert!(t.check_contiguous().is_ok());
    }

    #[test]
    fn ids_not_starting_at_one_fail() {
        let mut t = DriverTable::new();
        t.insert(driver(2, 0.0)).unwrap();
        t.insert(driver(3, 0.0)).unwrap();
        assert!(matches!(
            t.check_contiguous(),
            Err(TripError::IdRange { min: AgentId(2), max: AgentId(3), count: 2 })
        ));
    }

    #[test]
    fn gap_in_ids_fails() {
        let mut t = DriverTable::new();
        t.insert(driver(1, 0.0)).unwrap();
        t.insert(driver(3, 0.0)).unwrap();
        assert!(t.check_contiguous().is_err());
    }

    #[test]
    fn empty_table_passes() {
        let t = DriverTable::new();
        assert!(t.id_range().is_none());
        assert!(t.check_contiguous().is_ok());
        assert!(t.min_departure().is_none());
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut t = DriverTable::new();
        t.insert(driver(1, 0.0)).unwrap();
        assert!(matches!(t.insert(driver(1, 5.0)), Err(TripError::DuplicateAgent(AgentId(1)))));
        assert_eq!(t.get(AgentId(1)).unwrap().departure, 0.0);
    }

    #[test]
    fn unknown_agent_lookup_fails() {
        let mut t = DriverTable::new();
        assert!(matches!(t.get_mut(AgentId(9)), Err(TripError::UnknownAgent(AgentId(9)))));
    }

    #[test]
    fn iteration_is_ordered_by_id() {
        let mut t = DriverTable::new();
        for id in [3, 1, 2] {
            t.insert(driver(id, f64::from(id))).unwrap();
        }
        let ids: Vec<u32> = t.iter().map(|d| d.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(t.min_departure(), Some(1.0));
    }
}

// ── Departures ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod departure {
    use mx_core::AgentId;

    use super::helpers::*;
    use crate::{DriverTable, TripError, load_departures, load_departures_reader};

    #[test]
    fn creates_one_driver_per_line() {
        let t = departed();
        assert_eq!(t.len(), 3);
        let d = t.get(AgentId(2)).unwrap();
        assert_eq!(d.departure, 25201.0);
        assert_eq!((d.origin, d.destination, d.vehicle_type), (200, 122, 3));
        assert!(!d.completed);
        assert!(!d.started());
    }

    #[test]
    fn repeated_spaces_and_tabs_are_separators() {
        let mut t = DriverTable::new();
        let report = load_departures_reader("  7.5   1\t122  200 1\n".as_bytes(), &mut t).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(t.get(AgentId(1)).unwrap().departure, 7.5);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let mut t = DriverTable::new();
        let text = "1.0 1 122 200 1\nnot a departure\n2.0 2 122\n3.0 3 122 200 1\n";
        let report = load_departures_reader(text.as_bytes(), &mut t).unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line, 2);
        assert_eq!(report.skipped[1].line, 3);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn non_finite_and_negative_times_are_skipped() {
        let mut t = DriverTable::new();
        let text = "NaN 1 122 200 1\ninf 2 122 200 1\n-7 3 122 200 1\n4.5 4 122 200 1\n";
        let report = load_departures_reader(text.as_bytes(), &mut t).unwrap();
        assert_eq!(report.loaded, 1);
        let lines: Vec<u64> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.min_departure(), Some(4.5));
    }

    #[test]
    fn duplicate_agent_is_fatal() {
        let mut t = DriverTable::new();
        let text = "1.0 1 122 200 1\n2.0 1 200 122 1\n";
        let err = load_departures_reader(text.as_bytes(), &mut t).unwrap_err();
        assert!(matches!(err, TripError::DuplicateAgent(AgentId(1))));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dep.out");
        std::fs::write(&path, DEPARTURES).unwrap();
        let mut t = DriverTable::new();
        assert_eq!(load_departures(&path, &mut t).unwrap().loaded, 3);
    }

    #[test]
    fn missing_file_names_path() {
        let mut t = DriverTable::new();
        let err = load_departures(std::path::Path::new("/no/such/dep.out"), &mut t).unwrap_err();
        assert!(err.to_string().contains("dep.out"));
    }
}

// ── Completions ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod completion {
    use mx_core::AgentId;

    use super::helpers::*;
    use crate::{TripError, load_completions_reader};

    #[test]
    fn completes_matching_drivers() {
        let mut t = departed();
        let report = load_completions_reader(COMPLETIONS.as_bytes(), &mut t).unwrap();
        assert_eq!(report.completed, 2);
        assert_eq!(report.min_departure, Some(25200.5));

        let d = t.get(AgentId(1)).unwrap();
        assert!(d.completed);
        assert_eq!(d.arrival, 25390.0);
        assert!(d.departure <= d.arrival);
        let c = d.completion.as_ref().unwrap();
        assert!(!c.flag_a);
        assert_eq!(c.distance_a, 1520);
        assert_eq!(c.last_node, 200);
        assert_eq!(c.speed, 8.04);

        assert!(t.get(AgentId(3)).unwrap().completion.as_ref().unwrap().flag_a);
    }

    #[test]
    fn driver_without_completion_stays_incomplete() {
        let t = completed();
        let d = t.get(AgentId(2)).unwrap();
        assert!(!d.completed);
        assert!(d.completion.is_none());
        assert_eq!(d.arrival, 0.0);
    }

    #[test]
    fn unknown_agent_is_fatal() {
        let mut t = departed();
        let err = load_completions_reader(
            "9 0 1 122 200 200 25201 25390 1 1.0 0\n".as_bytes(),
            &mut t,
        )
        .unwrap_err();
        assert!(matches!(err, TripError::UnknownAgent(AgentId(9))));
    }

    #[test]
    fn second_completion_is_fatal() {
        let mut t = completed();
        let err = load_completions_reader(
            "1 0 1520 122 200 200 25201 25390 1520 8.04 0\n".as_bytes(),
            &mut t,
        )
        .unwrap_err();
        assert!(matches!(err, TripError::CompletedTwice(AgentId(1))));
    }

    #[test]
    fn origin_mismatch_is_fatal() {
        let mut t = departed();
        let err = load_completions_reader(
            "1 0 1520 200 200 200 25201 25390 1520 8.04 0\n".as_bytes(),
            &mut t,
        )
        .unwrap_err();
        assert!(matches!(err, TripError::OriginMismatch { expected: 122, found: 200, .. }));
    }

    #[test]
    fn destination_mismatch_is_fatal() {
        let mut t = departed();
        let err = load_completions_reader(
            "1 0 1520 122 122 200 25201 25390 1520 8.04 0\n".as_bytes(),
            &mut t,
        )
        .unwrap_err();
        assert!(matches!(err, TripError::DestinationMismatch { expected: 200, found: 122, .. }));
    }

    #[test]
    fn departure_compared_after_rounding() {
        // 25200.5 rounds to 25201; 25200 does not match.
        let mut t = departed();
        let err = load_completions_reader(
            "1 0 1520 122 200 200 25200 25390 1520 8.04 0\n".as_bytes(),
            &mut t,
        )
        .unwrap_err();
        assert!(matches!(err, TripError::DepartureMismatch { found: 25200, .. }));
    }

    #[test]
    fn arrival_before_departure_is_fatal() {
        let mut t = departed();
        let err = load_completions_reader(
            "1 0 1520 122 200 200 25201 25100 1520 8.04 0\n".as_bytes(),
            &mut t,
        )
        .unwrap_err();
        assert!(matches!(err, TripError::ArrivedBeforeDeparture { .. }));
    }

    #[test]
    fn non_boolean_flag_is_fatal() {
        let mut t = departed();
        let err = load_completions_reader(
            "1 2 1520 122 200 200 25201 25390 1520 8.04 0\n".as_bytes(),
            &mut t,
        )
        .unwrap_err();
        assert!(matches!(err, TripError::NotBoolean { field: "flag_a", value: 2, .. }));

        let mut t = departed();
        let err = load_completions_reader(
            "1 0 1520 122 200 200 25201 25390 1520 8.04 5\n".as_bytes(),
            &mut t,
        )
        .unwrap_err();
        assert!(matches!(err, TripError::NotBoolean { field: "flag_b", value: 5, .. }));
    }

    #[test]
    fn non_finite_speed_is_skipped() {
        let mut t = departed();
        let text = "1 0 1520 122 200 200 25201 25390 1520 NaN 0\n";
        let report = load_completions_reader(text.as_bytes(), &mut t).unwrap();
        assert_eq!(report.completed, 0);
        assert_eq!(report.skipped.len(), 1);
        assert!(!t.get(AgentId(1)).unwrap().completed);
    }

    #[test]
    fn short_line_is_skipped() {
        let mut t = departed();
        let report = load_completions_reader("1 0 1520 122 200\n".as_bytes(), &mut t).unwrap();
        assert_eq!(report.completed, 0);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.min_departure.is_none());
    }
}

// ── Trajectory ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trajectory {
    use mx_core::{AgentId, LinkId, NodeId, Point, SegmentId};
    use mx_network::{Link, RoadNetworkBuilder, Segment};

    use super::helpers::*;
    use crate::{TripError, first_position_summary, load_trajectory_reader};

    #[test]
    fn records_first_position_only() {
        let net = network();
        let mut t = completed();
        let text = "\
25201 1 101 1 12.5 0.0 0.0e+00 1
25202 1 102 1 40.0 3.0 1.0e-01 1
25230 3 101 2 7.5 0.0 0.0e+00 1
";
        let report = load_trajectory_reader(text.as_bytes(), &mut t, &net).unwrap();
        assert_eq!(report.samples, 3);
        assert!(report.unknown_up_nodes.is_empty());
        assert_eq!(t.get(AgentId(1)).unwrap().first_position, Some(12.5));
        assert_eq!(t.get(AgentId(3)).unwrap().first_position, Some(7.5));
        assert_eq!(t.never_started(), 1);
    }

    #[test]
    fn equal_times_are_allowed() {
        let net = network();
        let mut t = departed();
        let text = "10 1 101 1 1.0 0 0 1\n10 2 111 1 2.0 0 0 1\n";
        assert_eq!(load_trajectory_reader(text.as_bytes(), &mut t, &net).unwrap().samples, 2);
    }

    #[test]
    fn non_finite_and_negative_positions_are_skipped() {
        let net = network();
        let mut t = departed();
        let text = "10 1 101 1 NaN 0 0 1\n11 1 101 1 -3.0 0 0 1\n12 1 101 1 inf 0 0 1\n13 1 101 1 6.0 0 0 1\n";
        let report = load_trajectory_reader(text.as_bytes(), &mut t, &net).unwrap();
        assert_eq!(report.samples, 1);
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(t.get(AgentId(1)).unwrap().first_position, Some(6.0));
    }

    #[test]
    fn time_going_backwards_is_fatal() {
        let net = network();
        let mut t = departed();
        let text = "20 1 101 1 1.0 0 0 1\n19 2 111 1 2.0 0 0 1\n";
        let err = load_trajectory_reader(text.as_bytes(), &mut t, &net).unwrap_err();
        assert!(matches!(err, TripError::TimeWentBackwards { line: 2, previous: 20, time: 19 }));
    }

    #[test]
    fn unknown_agent_is_fatal() {
        let net = network();
        let mut t = departed();
        let err = load_trajectory_reader("20 8 101 1 1.0 0 0 1\n".as_bytes(), &mut t, &net)
            .unwrap_err();
        assert!(matches!(err, TripError::UnknownAgent(AgentId(8))));
    }

    #[test]
    fn unknown_segment_is_fatal() {
        let net = network();
        let mut t = departed();
        let err = load_trajectory_reader("20 1 555 1 1.0 0 0 1\n".as_bytes(), &mut t, &net)
            .unwrap_err();
        assert!(matches!(err, TripError::UnknownSegment(SegmentId(555))));
    }

    #[test]
    fn missing_up_nodes_are_collected_once() {
        let mut b = RoadNetworkBuilder::new();
        b.add_segment(Segment {
            id:    SegmentId(7),
            start: Point::new(0.0, 0.0),
            end:   Point::new(1.0, 0.0),
            up:    NodeId::Natural(999),
            down:  NodeId::Natural(1000),
            link:  LinkId(1),
        })
        .unwrap();
        b.add_link(Link {
            id:       LinkId(1),
            up:       NodeId::Natural(999),
            down:     NodeId::Natural(1000),
            segments: vec![SegmentId(7)],
        });
        let net = b.build();

        let mut t = departed();
        let text = "1 1 7 1 1.0 0 0 1\n2 2 7 1 2.0 0 0 1\n";
        let report = load_trajectory_reader(text.as_bytes(), &mut t, &net).unwrap();
        assert_eq!(report.unknown_up_nodes, vec![NodeId::Natural(999)]);
    }

    #[test]
    fn first_positions_grouped_by_origin() {
        let net = network();
        let mut t = departed();
        let text = "1 1 101 1 10.0 0 0 1\n2 3 101 1 20.0 0 0 1\n3 2 111 1 4.0 0 0 1\n";
        load_trajectory_reader(text.as_bytes(), &mut t, &net).unwrap();

        let by_origin = first_position_summary(&t);
        assert_eq!(by_origin.len(), 2);
        let from_122 = by_origin[&122];
        assert_eq!(from_122.count, 2);
        assert!((from_122.mean - 15.0).abs() < 1e-9);
        assert!((from_122.std_dev - 5.0).abs() < 1e-9);
        assert_eq!(by_origin[&200].count, 1);
    }

    #[test]
    fn never_started_drivers_are_left_out_of_summary() {
        let t = departed();
        assert!(first_position_summary(&t).is_empty());
        assert_eq!(t.never_started(), 3);
    }
}
