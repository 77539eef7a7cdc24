use dnscope_domain::{DomainError, RecordData, RecordType};
use dnscope_infrastructure::dns::wire::{decode_message, encode_message};
use dnscope_infrastructure::dns::UpstreamExchanger;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

mod helpers;
use helpers::{a, answer, name, StubDnsServer, StubProtocol};

const LOCALHOST: Ipv4Addr = Ipv4Addr::LOCALHOST;

#[tokio::test]
async fn test_udp_round_trip() {
    let server = StubDnsServer::start(LOCALHOST, 0, |request, _| {
        Some(answer(
            request,
            vec![a("example.test", 300, Ipv4Addr::new(192, 0, 2, 10))],
        ))
    })
    .await
    .unwrap();

    let exchanger = UpstreamExchanger::new(Duration::from_secs(2), 0);
    let message = exchanger
        .query(server.addr(), &name("example.test"), RecordType::A, true)
        .await
        .unwrap();

    assert_eq!(message.header.rcode, 0);
    assert_eq!(
        message.answers[0].data,
        RecordData::A(Ipv4Addr::new(192, 0, 2, 10))
    );
}

#[tokio::test]
async fn test_truncated_udp_reply_is_repeated_over_tcp() {
    let tcp_queries = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&tcp_queries);

    let server = StubDnsServer::start(LOCALHOST, 0, move |request, protocol| match protocol {
        StubProtocol::Udp => {
            let mut truncated = answer(request, Vec::new());
            truncated.header.tc = true;
            Some(truncated)
        }
        StubProtocol::Tcp => {
            counter.fetch_add(1, Ordering::SeqCst);
            let records = (1..=40)
                .map(|i| a("big.example.test", 60, Ipv4Addr::new(198, 51, 100, i)))
                .collect();
            Some(answer(request, records))
        }
    })
    .await
    .unwrap();

    let exchanger = UpstreamExchanger::new(Duration::from_secs(2), 0);
    let message = exchanger
        .query(server.addr(), &name("big.example.test"), RecordType::A, true)
        .await
        .unwrap();

    assert!(!message.header.tc);
    assert_eq!(message.answers.len(), 40);
    assert_eq!(tcp_queries.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_udp_reply_cut_mid_record_goes_to_tcp() {
    let tcp_queries = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&tcp_queries);

    let server = StubDnsServer::start_raw(LOCALHOST, 0, move |bytes, protocol| {
        let request = decode_message(bytes).ok()?;
        let records = (1..=40)
            .map(|i| a("big.example.test", 60, Ipv4Addr::new(198, 51, 100, i)))
            .collect();
        let mut reply = answer(&request, records);
        match protocol {
            StubProtocol::Udp => {
                reply.header.tc = true;
                let mut wire = encode_message(&reply).ok()?;
                wire.truncate(512);
                Some(wire)
            }
            StubProtocol::Tcp => {
                counter.fetch_add(1, Ordering::SeqCst);
                encode_message(&reply).ok()
            }
        }
    })
    .await
    .unwrap();

    let exchanger = UpstreamExchanger::new(Duration::from_secs(2), 0);
    let message = exchanger
        .query(server.addr(), &name("big.example.test"), RecordType::A, true)
        .await
        .unwrap();

    assert!(!message.header.tc);
    assert_eq!(message.answers.len(), 40);
    assert_eq!(tcp_queries.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_mismatched_id_is_retried_then_reported() {
    let queries = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&queries);

    let server = StubDnsServer::start_raw(LOCALHOST, 0, move |bytes, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        let request = decode_message(bytes).ok()?;
        let mut reply = answer(&request, Vec::new());
        reply.header.id = request.header.id.wrapping_add(1);
        encode_message(&reply).ok()
    })
    .await
    .unwrap();

    let exchanger = UpstreamExchanger::new(Duration::from_secs(2), 1);
    let result = exchanger
        .query(server.addr(), &name("example.test"), RecordType::A, true)
        .await;

    assert!(matches!(result, Err(DomainError::MalformedPacket(_))));
    assert_eq!(queries.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_garbage_reply_is_malformed() {
    let server = StubDnsServer::start_raw(LOCALHOST, 0, |_, _| Some(vec![0xFF; 5]))
        .await
        .unwrap();

    let exchanger = UpstreamExchanger::new(Duration::from_secs(2), 0);
    let result = exchanger
        .query(server.addr(), &name("example.test"), RecordType::A, true)
        .await;

    assert!(matches!(result, Err(DomainError::MalformedPacket(_))));
}

#[tokio::test]
async fn test_silent_server_times_out_after_retries() {
    let queries = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&queries);

    let server = StubDnsServer::start_raw(LOCALHOST, 0, move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        None
    })
    .await
    .unwrap();

    let exchanger = UpstreamExchanger::new(Duration::from_millis(100), 2);
    let result = exchanger
        .query(server.addr(), &name("example.test"), RecordType::A, true)
        .await;

    assert!(matches!(result, Err(DomainError::Timeout { .. })));
    assert_eq!(queries.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_raw_exchange_returns_undecoded_bytes() {
    let server = StubDnsServer::start_raw(LOCALHOST, 0, |_, _| Some(vec![1, 2, 3]))
        .await
        .unwrap();

    let exchanger = UpstreamExchanger::new(Duration::from_secs(2), 0);
    let packet =
        dnscope_infrastructure::dns::wire::encode_query(&name("example.test"), RecordType::A, true)
            .unwrap();
    let reply = exchanger.exchange_raw(server.addr(), &packet).await.unwrap();

    assert_eq!(reply, vec![1, 2, 3]);
}
