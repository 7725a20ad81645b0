mod common;

use std::sync::Arc;

use aquatic_udp_protocol::AnnounceEvent;
use common::fixtures::{other_peer, sample_info_hash, sample_peer, sample_swarm_hash};
use roomtracker_configuration::Core;
use roomtracker_primitives::swarm_stats::SwarmStats;
use roomtracker_swarm_index::SwarmIndex;
use roomtracker_tracker_core::announce_handler::{AnnounceHandler, PeersWanted};
use roomtracker_tracker_core::scrape_handler::ScrapeHandler;

struct TestEnv {
    announce_handler: AnnounceHandler,
    scrape_handler: ScrapeHandler,
}

fn test_env() -> TestEnv {
    let swarm_index = Arc::new(SwarmIndex::new());

    TestEnv {
        announce_handler: AnnounceHandler::new(&Core::default(), &swarm_index),
        scrape_handler: ScrapeHandler::new(&swarm_index),
    }
}

#[test]
fn it_should_handle_the_announce_request() {
    let env = test_env();

    let announce_data = env.announce_handler.handle_announcement(
        &sample_swarm_hash(),
        &sample_peer(),
        AnnounceEvent::Started,
        false,
        &PeersWanted::default(),
    );

    assert!(announce_data.peers.is_empty());
    assert_eq!(announce_data.stats, SwarmStats::new(0, 1));
}

#[test]
fn it_should_return_the_other_peers_of_the_swarm() {
    let env = test_env();

    env.announce_handler.handle_announcement(
        &sample_swarm_hash(),
        &other_peer(),
        AnnounceEvent::None,
        true,
        &PeersWanted::default(),
    );

    let announce_data = env.announce_handler.handle_announcement(
        &sample_swarm_hash(),
        &sample_peer(),
        AnnounceEvent::Started,
        false,
        &PeersWanted::default(),
    );

    assert_eq!(announce_data.peers.len(), 1);
    assert_eq!(announce_data.stats, SwarmStats::new(1, 1));
}

#[test]
fn it_should_handle_the_scrape_request() {
    let env = test_env();

    env.announce_handler.handle_announcement(
        &sample_swarm_hash(),
        &sample_peer(),
        AnnounceEvent::None,
        true,
        &PeersWanted::default(),
    );

    let scrape_data = env.scrape_handler.handle_scrape(&sample_swarm_hash(), &sample_info_hash());

    assert_eq!(scrape_data.info_hash, sample_info_hash());
    assert_eq!(scrape_data.stats, SwarmStats::new(1, 0));
}

#[test]
fn a_stop_and_restart_of_the_client_should_leave_a_single_peer_entry() {
    let env = test_env();

    for event in [AnnounceEvent::Started, AnnounceEvent::Stopped, AnnounceEvent::Started] {
        env.announce_handler.handle_announcement(
            &sample_swarm_hash(),
            &sample_peer(),
            event,
            false,
            &PeersWanted::default(),
        );
    }

    let scrape_data = env.scrape_handler.handle_scrape(&sample_swarm_hash(), &sample_info_hash());

    assert_eq!(scrape_data.stats, SwarmStats::new(0, 1));
}
