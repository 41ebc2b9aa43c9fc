//! Small built-in network used when no network file is given.

use super::network::{Connection, Network, NetworkMap, Platform, Station};
use crate::railway::line::{Direction, Line};
use crate::railway::train::Train;

/// Two stations joined by a single line `urmi`, with separate outbound
/// (`segment_0..2`) and inbound (`segment_5..3`) tracks.
pub fn demo_network() -> Network {
    let mut map = NetworkMap::new();
    for i in 0..6 {
        map.add_segment(&format!("segment_{}", i));
    }

    // outbound
    map.connections.push(Connection::one_to_one("segment_0", "segment_1"));
    map.connections.push(Connection::one_to_one("segment_1", "segment_2"));
    // inbound
    map.connections.push(Connection::one_to_one("segment_5", "segment_4"));
    map.connections.push(Connection::one_to_one("segment_4", "segment_3"));

    let stations = vec![
        Station {
            name: "station_0".to_string(),
            platforms: vec![platform("station_0_platform_0", "segment_0"),
                            platform("station_0_platform_1", "segment_3")],
        },
        Station {
            name: "station_1".to_string(),
            platforms: vec![platform("station_1_platform_0", "segment_2"),
                            platform("station_1_platform_1", "segment_5")],
        },
    ];

    let mut urmi = Line::new("urmi");
    urmi.station_names = route(&["station_0", "station_1"]);
    urmi.routes.insert(Direction::Outbound, route(&["segment_0", "segment_1", "segment_2"]));
    urmi.routes.insert(Direction::Inbound, route(&["segment_5", "segment_4", "segment_3"]));

    Network { map, stations, lines: vec![urmi] }
}

pub fn demo_fleet() -> Vec<Train> {
    vec![Train::new("train_0", "urmi", "segment_0", Direction::Outbound)]
}

fn platform(name: &str, segment: &str) -> Platform {
    Platform { name: name.to_string(), segment: segment.to_string() }
}

fn route(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
