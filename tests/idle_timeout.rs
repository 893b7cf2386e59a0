//! Idle-timeout integration tests over real sockets.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use relay_gate::net::AdmissionGate;

mod common;

#[tokio::test]
async fn idle_connection_fails_with_timeout() {
    let mut config = common::test_config();
    config.timeout_secs = 1;

    let gate = AdmissionGate::bind(&config).await.unwrap();
    let addr = gate.local_addr().unwrap();

    let _client = TcpStream::connect(addr).await.unwrap();
    let mut conn = gate.accept().await.unwrap();

    // The client sends nothing; the read must fail once the idle window
    // elapses, not hang.
    let mut buf = [0u8; 16];
    let err = tokio::time::timeout(Duration::from_secs(5), conn.read(&mut buf))
        .await
        .expect("read did not resolve after the idle window")
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::TimedOut);

    // The timed-out connection closes through the ordinary path.
    drop(conn);
    assert_eq!(gate.available_slots(), config.max_connections);
}

#[tokio::test]
async fn steady_traffic_keeps_the_connection_open() {
    let mut config = common::test_config();
    config.timeout_secs = 1;

    let gate = AdmissionGate::bind(&config).await.unwrap();
    let addr = gate.local_addr().unwrap();

    let mut client = TcpStream::connect(addr).await.unwrap();
    let mut conn = gate.accept().await.unwrap();

    // Send every timeout/2; the sliding deadline must never fire even
    // though total elapsed time exceeds the timeout severalfold.
    for _ in 0..6 {
        tokio::time::sleep(Duration::from_millis(500)).await;
        client.write_all(b"tick").await.unwrap();
        let mut buf = [0u8; 4];
        conn.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"tick");
    }
}
