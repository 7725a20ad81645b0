use std::sync::Arc;

use bittorrent_primitives::info_hash::InfoHash;
use percent_encoding::{percent_encode, NON_ALPHANUMERIC};
use roomtracker_configuration::Core;
use roomtracker_http_protocol::v1::services::peer_ip_resolver::TrustedProxies;
use roomtracker_http_server::server::{HttpServer, Launcher, RunningHttpServer};
use roomtracker_http_server::v1::routes::router;
use roomtracker_http_server::v1::services::announce::AnnounceService;
use roomtracker_http_server::v1::services::scrape::ScrapeService;
use roomtracker_swarm_index::SwarmIndex;
use roomtracker_tracker_core::announce_handler::AnnounceHandler;
use roomtracker_tracker_core::scrape_handler::ScrapeHandler;

struct TestEnv {
    running_server: RunningHttpServer,
}

impl TestEnv {
    async fn started() -> Self {
        let config = Core::default();

        let swarm_index = Arc::new(SwarmIndex::new());
        let announce_handler = Arc::new(AnnounceHandler::new(&config, &swarm_index));
        let scrape_handler = Arc::new(ScrapeHandler::new(&swarm_index));

        let trusted_proxies =
            TrustedProxies::from_strings(&config.net.trusted_proxies).expect("default trusted proxies should parse");

        let announce_service = Arc::new(AnnounceService::new(&announce_handler, trusted_proxies));
        let scrape_service = Arc::new(ScrapeService::new(&scrape_handler));

        let app = router(announce_service, scrape_service);

        let server = HttpServer::new(Launcher::new("127.0.0.1:0".parse().unwrap(), None));

        let running_server = server.start(app).await.expect("it should start the server");

        Self { running_server }
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.running_server.state.binding)
    }

    async fn stop(self) {
        self.running_server.stop().await.expect("it should stop the server");
    }
}

fn sample_info_hash() -> InfoHash {
    "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0"
        .parse::<InfoHash>()
        .expect("String should be a valid info hash")
}

fn encoded_info_hash(info_hash: &InfoHash) -> String {
    percent_encode(&info_hash.0, NON_ALPHANUMERIC).to_string()
}

#[tokio::test]
async fn it_should_answer_an_announce_with_a_bencoded_response() {
    let env = TestEnv::started().await;

    let url = format!(
        "{}/room/announce?info_hash={}&port=6881",
        env.base_url(),
        encoded_info_hash(&sample_info_hash())
    );

    let response = reqwest::get(url).await.unwrap();

    assert_eq!(response.status(), 200);

    let body = response.bytes().await.unwrap();

    // Without a `left` param the client counts as a seeder, and it never
    // sees itself in the peer lists.
    assert!(body.starts_with(b"d8:completei1e10:incompletei0e8:intervali"));
    assert!(body.ends_with(b"5:peers0:10:peers_ipv60:e"));

    env.stop().await;
}

#[tokio::test]
async fn it_should_return_the_other_peers_of_the_swarm_in_compact_form() {
    let env = TestEnv::started().await;

    let info_hash = encoded_info_hash(&sample_info_hash());

    // A first peer seeds.
    let url = format!("{}/room/announce?info_hash={info_hash}&port=6881&left=0", env.base_url());
    reqwest::get(url).await.unwrap().error_for_status().unwrap();

    // A second peer (same IP, different port) is still downloading.
    let url = format!("{}/room/announce?info_hash={info_hash}&port=6882&left=100", env.base_url());
    let body = reqwest::get(url).await.unwrap().bytes().await.unwrap();

    // 127.0.0.1:6881 in compact form.
    let compact_peer: &[u8] = &[0x7f, 0x00, 0x00, 0x01, 0x1a, 0xe1];

    assert!(body.starts_with(b"d8:completei1e10:incompletei1e8:intervali"));
    assert!(body.windows(compact_peer.len()).any(|window| window == compact_peer));

    env.stop().await;
}

#[tokio::test]
async fn it_should_not_leak_peers_across_rooms() {
    let env = TestEnv::started().await;

    let info_hash = encoded_info_hash(&sample_info_hash());

    // Same info-hash, different rooms.
    let url = format!("{}/roomA/announce?info_hash={info_hash}&port=6881&left=0", env.base_url());
    reqwest::get(url).await.unwrap().error_for_status().unwrap();

    let url = format!("{}/roomB/announce?info_hash={info_hash}&port=6882&left=100", env.base_url());
    let body = reqwest::get(url).await.unwrap().bytes().await.unwrap();

    // The other room's seeder is invisible here.
    assert!(body.starts_with(b"d8:completei0e10:incompletei1e8:intervali"));
    assert!(body.ends_with(b"5:peers0:10:peers_ipv60:e"));

    env.stop().await;
}

#[tokio::test]
async fn it_should_reject_an_announce_without_a_port() {
    let env = TestEnv::started().await;

    let url = format!(
        "{}/room/announce?info_hash={}",
        env.base_url(),
        encoded_info_hash(&sample_info_hash())
    );

    let response = reqwest::get(url).await.unwrap();

    assert_eq!(response.status(), 400);

    let body = response.text().await.unwrap();

    assert!(body.starts_with("d14:failure reason"));

    env.stop().await;
}

#[tokio::test]
async fn it_should_honor_the_forwarded_client_ip_from_the_loopback_proxy() {
    let env = TestEnv::started().await;

    let info_hash = encoded_info_hash(&sample_info_hash());

    // A seeder announced through a trusted (loopback) proxy.
    let client = reqwest::Client::new();
    client
        .get(format!("{}/room/announce?info_hash={info_hash}&port=6881&left=0", env.base_url()))
        .header("X-Forwarded-For", "126.0.0.7")
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap();

    // Another peer asks for the swarm.
    let body = client
        .get(format!("{}/room/announce?info_hash={info_hash}&port=6882&left=100", env.base_url()))
        .send()
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();

    // 126.0.0.7:6881 in compact form.
    let compact_peer: &[u8] = &[0x7e, 0x00, 0x00, 0x07, 0x1a, 0xe1];

    assert!(body.windows(compact_peer.len()).any(|window| window == compact_peer));

    env.stop().await;
}

#[tokio::test]
async fn it_should_answer_a_scrape_with_the_swarm_totals() {
    let env = TestEnv::started().await;

    let info_hash = encoded_info_hash(&sample_info_hash());

    let url = format!("{}/room/announce?info_hash={info_hash}&port=6881&left=0", env.base_url());
    reqwest::get(url).await.unwrap().error_for_status().unwrap();

    let url = format!("{}/room/scrape?info_hash={info_hash}", env.base_url());
    let body = reqwest::get(url).await.unwrap().bytes().await.unwrap();

    let mut expected = b"d5:filesd20:".to_vec();
    expected.extend_from_slice(&sample_info_hash().0);
    expected.extend_from_slice(b"d8:completei1e10:incompletei0eeee");

    assert_eq!(body.to_vec(), expected);

    env.stop().await;
}

#[tokio::test]
async fn it_should_answer_a_scrape_for_an_unknown_swarm_with_zeroed_totals() {
    let env = TestEnv::started().await;

    let info_hash = encoded_info_hash(&sample_info_hash());

    let url = format!("{}/room/scrape?info_hash={info_hash}", env.base_url());
    let body = reqwest::get(url).await.unwrap().bytes().await.unwrap();

    let mut expected = b"d5:filesd20:".to_vec();
    expected.extend_from_slice(&sample_info_hash().0);
    expected.extend_from_slice(b"d8:completei0e10:incompletei0eeee");

    assert_eq!(body.to_vec(), expected);

    env.stop().await;
}
