//! Relay policy tests: destination rules and credential verification as
//! the protocol engine consumes them.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use relay_gate::engine::RelayPolicy;
use relay_gate::lifecycle::Shutdown;
use relay_gate::Server;

mod common;

#[test]
fn destination_pattern_gates_relay_targets() {
    let mut config = common::test_config();
    config.allowed_dest_fqdn = "*.example.com".to_string();

    let policy = RelayPolicy::from_config(&config).unwrap();
    assert!(policy.destination_rule.permits("sub.example.com"));
    assert!(!policy.destination_rule.permits("example.org"));
}

#[test]
fn empty_pattern_is_unrestricted() {
    let policy = RelayPolicy::from_config(&common::test_config()).unwrap();
    assert!(policy.destination_rule.permits("example.org"));
}

#[tokio::test]
async fn engine_receives_the_configured_authenticator() {
    let mut config = common::test_config();
    config.require_auth = true;
    config.user = "admin".to_string();
    config.password = "secret".to_string();

    let policy = RelayPolicy::from_config(&config).unwrap();
    let server = Server::bind(&config, policy).await.unwrap();
    let addr = server.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(Arc::new(common::CredCheckEngine), shutdown.clone()));

    let mut good = TcpStream::connect(addr).await.unwrap();
    good.write_all(b"admin secret\n").await.unwrap();
    let mut reply = [0u8; 3];
    good.read_exact(&mut reply).await.unwrap();
    assert_eq!(&reply, b"OK\n");

    let mut bad = TcpStream::connect(addr).await.unwrap();
    bad.write_all(b"admin wrong\n").await.unwrap();
    let mut reply = [0u8; 5];
    bad.read_exact(&mut reply).await.unwrap();
    assert_eq!(&reply, b"DENY\n");

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("serving loop ignored shutdown")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn echo_traffic_flows_through_admitted_connections() {
    let config = common::test_config();
    let policy = RelayPolicy::from_config(&config).unwrap();
    let server = Server::bind(&config, policy).await.unwrap();
    let addr = server.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(Arc::new(common::EchoEngine), shutdown.clone()));

    let mut client = TcpStream::connect(addr).await.unwrap();
    client.write_all(b"round trip").await.unwrap();
    let mut buf = [0u8; 10];
    client.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"round trip");

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("serving loop ignored shutdown")
        .unwrap()
        .unwrap();
}
