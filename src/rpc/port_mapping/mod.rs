
pub const PMAP_PROG:u32 = 100000;
pub const PMAP_VERS:u32 = 2;

pub const PMAPPROC_GETPORT:u32 = 3;     // (mapping) -> unsigned int

// Where rpcbind is assumed to be listening when nothing else is configured
pub const DEFAULT_PMAP_ADDR:&str = "0.0.0.0:111";

use std::time::Duration;

use rand::Rng;

use crate::error::RpcError;
use crate::xdr;

use super::{IPPROTO_TCP, IPPROTO_UDP};
use super::xdr_pack;
use super::udp_clients::UdpClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
	TCP,
	UDP,
}

impl Protocol {
	pub fn to_u32(&self) -> u32 { match self {
		Protocol::TCP => IPPROTO_TCP,
		Protocol::UDP => IPPROTO_UDP,
	}}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
	pub program: u32,
	pub version: u32,
	pub protocol: Protocol,
	pub port: u32,				// XDR encodes it as a u32 for alignment, GETPORT ignores it on the way in
}

/// Looks up ports through a portmapper, opening a fresh socket per lookup
#[derive(Debug, Clone)]
pub struct UdpPortMapperClient {
	pub addr: String,
	pub timeout: Option<Duration>,
}

impl Default for UdpPortMapperClient {
	fn default() -> Self { Self::new(DEFAULT_PMAP_ADDR) }
}

impl UdpPortMapperClient {

	pub fn new(addr:&str) -> Self {
		UdpPortMapperClient{ addr: addr.to_owned(), timeout: None }
	}

	pub fn get_port<R: Rng>(&self, rng:&mut R, m:&Mapping) -> Result<u16, RpcError> {
		let udp_client = UdpClient::connect(self.addr.as_str(), PMAP_PROG, PMAP_VERS)?;
		udp_client.set_timeout(self.timeout)?;

		let mut args = xdr::Packer::with_capacity(4);
		xdr_pack::pack_mapping(&mut args, m.program, m.version, m.protocol.to_u32(), m.port);

		let resp = udp_client.call(rng, PMAPPROC_GETPORT, args.get_buf())?;
		let port = unpack_port(&resp, m)?;
		log::debug!("portmapper at {} maps program {} version {} to port {}", self.addr, m.program, m.version, port);
		Ok(port)
	}

	/// Port for `program`/`version` over `protocol`, failing when nothing is registered
	pub fn resolve_port<R: Rng>(&self, rng:&mut R, program:u32, version:u32, protocol:Protocol) -> Result<u16, RpcError> {
		self.get_port(rng, &Mapping{ program, version, protocol, port: 0 })
	}
}

// The port is the last word of the reply body
fn unpack_port(resp:&[u8], m:&Mapping) -> Result<u16, RpcError> {
	let n = resp.len();
	if n < 4 {
		return Err(RpcError::ShortResponse{ expected: 4, actual: n });
	}

	let (port, _) = xdr::decode_next(&resp[n-4..])?;
	match port {
		0 => Err(RpcError::PortNotFound{ program: m.program, version: m.version }),
		p if p > u16::MAX as u32 => Err(RpcError::InvalidPort(p)),
		p => Ok(p as u16),
	}
}
