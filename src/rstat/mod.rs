
// Remote statistics program
pub const RSTAT_PROG:u32       = 100001;	// 0x186a1
pub const RSTAT_VERS_TIME:u32  = 3;
pub const RSTATPROC_STATS:u32  = 1;

// Stand-in for an empty host
pub const ANY_HOST:&str = "0.0.0.0";

use std::time::Duration;

use rand::Rng;

use crate::error::{Error, Result};
use crate::rpc::port_mapping::{UdpPortMapperClient, Protocol, DEFAULT_PMAP_ADDR};
use crate::rpc::udp_clients::UdpClient;

pub mod xdr_unpack;

pub use self::xdr_unpack::Stats;

/// Where to find an rstat daemon.  Holds configuration only, every call opens and closes
/// its own sockets, so a single value can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// Hostname of the rstatd server.  Empty means `0.0.0.0`.
    pub host: String,
    /// Port the daemon listens on.  `None` asks the portmapper for it on every call.
    pub port: Option<u16>,
    /// How long to wait for each reply.  `None` blocks until one arrives.
    pub timeout: Option<Duration>,
    /// The portmapper that gets asked when `port` is `None`
    pub portmapper: String,
}

impl Default for Client {
    fn default() -> Self {
        Client { host: String::new(), port: None, timeout: None, portmapper: DEFAULT_PMAP_ADDR.to_owned() }
    }
}

impl Client {

    pub fn new(host:&str) -> Self {
        Client { host: host.to_owned(), ..Client::default() }
    }

    pub fn port(mut self, port:u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn timeout(mut self, timeout:Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn portmapper(mut self, addr:&str) -> Self {
        self.portmapper = addr.to_owned();
        self
    }

    fn host(&self) -> &str {
        if self.host.is_empty() { ANY_HOST } else { &self.host }
    }

    /// Port of the daemon, either configured or looked up
    pub fn daemon_port<R: Rng>(&self, rng:&mut R) -> Result<u16> {
        if let Some(port) = self.port {
            return Ok(port);
        }

        let pmap_client = UdpPortMapperClient { addr: self.portmapper.clone(), timeout: self.timeout };
        pmap_client.resolve_port(rng, RSTAT_PROG, RSTAT_VERS_TIME, Protocol::UDP).map_err(Error::Resolve)
    }

    /// Fetch the raw reply body of RSTATPROC_STATS, envelope already stripped
    pub fn fetch<R: Rng>(&self, rng:&mut R, port:u16) -> Result<Vec<u8>> {
        let client = UdpClient::connect((self.host(), port), RSTAT_PROG, RSTAT_VERS_TIME).map_err(Error::Daemon)?;
        client.set_timeout(self.timeout).map_err(Error::Daemon)?;
        client.call(rng, RSTATPROC_STATS, &[]).map_err(Error::Daemon)
    }

    /// Same as `read_stats` but transaction ids are drawn from `rng`
    pub fn read_stats_with_rng<R: Rng>(&self, rng:&mut R) -> Result<Stats> {
        let port = self.daemon_port(rng)?;
        log::debug!("reading stats from {}:{}", self.host(), port);

        let resp = self.fetch(rng, port)?;
        xdr_unpack::unpack_statstime(&resp).map_err(Error::Decode)
    }

    pub fn read_stats(&self) -> Result<Stats> {
        self.read_stats_with_rng(&mut rand::thread_rng())
    }

}

/// Stats from the daemon on this machine, with its port looked up through rpcbind
pub fn read_stats() -> Result<Stats> { Client::default().read_stats() }
