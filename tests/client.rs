extern crate rstat;

use std::net::{SocketAddr, UdpSocket};
use std::thread;
use std::time::{Duration, UNIX_EPOCH};

use rand::{Rng, SeedableRng, XorShiftRng};

use rstat::rpc::port_mapping::{Protocol, UdpPortMapperClient};
use rstat::rstat::{RSTAT_PROG, RSTAT_VERS_TIME};
use rstat::xdr::{encode, Unpacker};
use rstat::{Client, Error, RpcError};

// Always hands out the same xid
struct FixedXid(u32);

impl Rng for FixedXid {
    fn next_u32(&mut self) -> u32 { self.0 }
}

struct Request {
    xid: u32,
    words: Vec<u32>,
}

// Serves `count` requests, answering each with the reply built from its xid, and hands back
// what it received
fn fake_daemon<F>(count: usize, reply: F) -> (SocketAddr, thread::JoinHandle<Vec<Request>>)
where
    F: Fn(u32) -> Vec<u32> + Send + 'static,
{
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    let addr = socket.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let mut seen = vec![];
        for _ in 0..count {
            let mut buff = [0u8; 1024];
            let (n, peer) = socket.recv_from(&mut buff).unwrap();
            assert_eq!(n % 4, 0);

            let mut unpacker = Unpacker::new(&buff[..n]);
            let mut words = vec![];
            while !unpacker.all_data_consumed() {
                words.push(unpacker.unpack_u32().unwrap());
            }

            socket.send_to(&encode(&reply(words[0])), peer).unwrap();
            seen.push(Request { xid: words[0], words });
        }
        seen
    });
    (addr, handle)
}

fn statstime_reply(xid: u32) -> Vec<u32> {
    let mut words = vec![xid, 1, 0];
    words.extend(&[0, 0, 0]);
    words.extend(&[100, 5, 40, 9000]);
    words.extend(&[1, 2, 3, 4]);
    words.extend(&[10, 20, 0, 0]);
    words.push(777);
    words.extend(&[1000, 2, 3, 0]);
    words.push(5555);
    words.extend(&[512, 384, 128]);
    words.extend(&[1700000000, 0, 1700000500, 123456]);
    words.push(2000);
    words
}

#[test]
fn portmapper_lookup_resolves_port() {
    let (addr, handle) = fake_daemon(1, |xid| vec![xid, 1, 0, 0, 0, 0, 0x00000259]);
    let pmap = UdpPortMapperClient::new(&addr.to_string());

    let port = pmap.resolve_port(&mut FixedXid(0x1234), RSTAT_PROG, RSTAT_VERS_TIME, Protocol::UDP).unwrap();
    assert_eq!(port, 601);

    let requests = handle.join().unwrap();
    assert_eq!(requests[0].words, vec![0x1234, 0, 2, 100000, 2, 3, 0, 0, 0, 0, 100001, 3, 17, 0]);
}

#[test]
fn portmapper_without_mapping() {
    let (addr, handle) = fake_daemon(1, |xid| vec![xid, 1, 0, 0, 0, 0, 0]);
    let pmap = UdpPortMapperClient::new(&addr.to_string());

    match pmap.resolve_port(&mut FixedXid(1), RSTAT_PROG, RSTAT_VERS_TIME, Protocol::UDP) {
        Err(RpcError::PortNotFound { program: 100001, version: 3 }) => {}
        other => panic!("unexpected result {:?}", other),
    }
    handle.join().unwrap();
}

#[test]
fn read_stats_through_portmapper() {
    let (daemon, daemon_handle) = fake_daemon(1, statstime_reply);
    let daemon_port = daemon.port() as u32;
    let (pmap, pmap_handle) = fake_daemon(1, move |xid| vec![xid, 1, 0, 0, 0, 0, daemon_port]);

    let client = Client::new("127.0.0.1").portmapper(&pmap.to_string()).timeout(Duration::from_secs(5));
    let mut rng = XorShiftRng::from_seed([11, 22, 33, 44]);
    let stats = client.read_stats_with_rng(&mut rng).unwrap();

    assert_eq!((stats.cpu_user, stats.cpu_nice, stats.cpu_sys, stats.cpu_idle), (100, 5, 40, 9000));
    assert_eq!(stats.disk_transfers, [1, 2, 3, 4]);
    assert_eq!(stats.interrupts, 777);
    assert_eq!((stats.net_in_packets, stats.net_in_errors, stats.net_out_errors, stats.net_collisions), (1000, 2, 3, 0));
    assert_eq!(stats.context_switches, 5555);
    assert_eq!(stats.load_average, [2, 1, 0]);
    assert_eq!(stats.boot_time, UNIX_EPOCH + Duration::from_secs(1700000000));
    assert_eq!(stats.curr_time, UNIX_EPOCH + Duration::new(1700000500, 123_456_000));
    assert_eq!(stats.net_out_packets, 2000);

    let pmap_requests = pmap_handle.join().unwrap();
    let daemon_requests = daemon_handle.join().unwrap();
    assert_eq!(&daemon_requests[0].words[1..], &[0, 2, 100001, 3, 1, 0, 0, 0, 0]);
    assert_ne!(pmap_requests[0].xid, daemon_requests[0].xid);
}

#[test]
fn configured_port_goes_straight_to_daemon() {
    let (daemon, handle) = fake_daemon(2, statstime_reply);
    let client = Client::new("127.0.0.1").port(daemon.port()).timeout(Duration::from_secs(5));
    let mut rng = XorShiftRng::from_seed([5, 6, 7, 8]);

    let first = client.read_stats_with_rng(&mut rng).unwrap();
    let second = client.read_stats_with_rng(&mut rng).unwrap();
    assert_eq!(first, second);

    let requests = handle.join().unwrap();
    assert_eq!(requests.len(), 2);
    assert_ne!(requests[0].xid, requests[1].xid);
}

#[test]
fn daemon_answering_with_wrong_xid() {
    let (daemon, handle) = fake_daemon(1, |xid| {
        let mut words = statstime_reply(xid);
        words[0] = xid ^ 0xffff_ffff;
        words
    });
    let client = Client::new("127.0.0.1").port(daemon.port());

    match client.read_stats_with_rng(&mut FixedXid(0x0f0f0f0f)) {
        Err(Error::Daemon(RpcError::TransactionMismatch { expected: 0x0f0f0f0f, actual: 0xf0f0f0f0 })) => {}
        other => panic!("unexpected result {:?}", other),
    }
    handle.join().unwrap();
}

#[test]
fn daemon_rejecting_the_call() {
    let (daemon, handle) = fake_daemon(1, |xid| vec![xid, 1, 1, 0, 2, 3]);
    let client = Client::new("127.0.0.1").port(daemon.port());

    let err = client.read_stats_with_rng(&mut FixedXid(9)).unwrap_err();
    match err {
        Error::Daemon(RpcError::RemoteProcedureFailure(1)) => {}
        ref other => panic!("unexpected error {:?}", other),
    }
    assert!(err.to_string().starts_with("rstat: daemon request failed"));
    handle.join().unwrap();
}

#[test]
fn truncated_stats_are_a_decode_error() {
    let (daemon, handle) = fake_daemon(1, |xid| {
        let mut words = statstime_reply(xid);
        words.truncate(20);
        words
    });
    let client = Client::new("127.0.0.1").port(daemon.port());

    match client.read_stats_with_rng(&mut FixedXid(3)) {
        Err(Error::Decode(RpcError::ShortResponse { expected: 116, actual: 68 })) => {}
        other => panic!("unexpected result {:?}", other),
    }
    handle.join().unwrap();
}
