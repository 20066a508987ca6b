use std::io;
use std::net::{UdpSocket, ToSocketAddrs};
use std::time::Duration;

use rand::Rng;

use crate::error::RpcError;
use crate::xdr;
use super::{xdr_pack, xdr_unpack};

// Comfortably more than any reply from rpcbind or rstatd
const RECV_BUFF_LEN:usize = 8192;

/// A datagram socket connected to a single RPC program.  Each client is meant to carry one
/// transaction and then be dropped, which closes the socket.
pub struct UdpClient {
	pub socket: UdpSocket,
    pub prog: u32,
    pub vers: u32,
}

impl UdpClient {

	pub fn connect<A: ToSocketAddrs>(addr: A, prog: u32, vers: u32) -> Result<Self, RpcError> {
		let socket = UdpSocket::bind("0.0.0.0:0").map_err(RpcError::Connect)?;
		socket.connect(addr).map_err(RpcError::Connect)?;
		Ok(Self{ socket, prog, vers })
	}

	/// Bound how long `do_call` waits for a reply.  `None` or a zero duration blocks until one arrives.
	pub fn set_timeout(&self, timeout: Option<Duration>) -> Result<(), RpcError> {
		let timeout = timeout.filter(|d| *d != Duration::from_secs(0));
		self.socket.set_read_timeout(timeout).map_err(RpcError::Connect)
	}

	/// Build a call to procedure `prc` with a fresh xid from `rng`, followed by the already
	/// packed `args`, and run it.  Returns whatever the reply carries past its envelope.
	pub fn call<R: Rng>(&self, rng:&mut R, prc:u32, args:&[u8]) -> Result<Vec<u8>, RpcError> {
		let xid:u32 = rng.next_u32();

		let mut packer = xdr::Packer::with_capacity(10 + args.len() / 4);
		xdr_pack::pack_callheader_no_auth(&mut packer, xid, self.prog, self.vers, prc);
		packer.pack_opaque_words(args)?;

		self.do_call(packer.get_buf(), xid)
	}

	pub fn do_call(&self, call:&[u8], xid:u32) -> Result<Vec<u8>, RpcError> {
		log::debug!("rpc call prog={} vers={} xid={:#010x} to {:?}", self.prog, self.vers, xid, self.socket.peer_addr().ok());
		log::trace!("-> {:?}", call);

        let n = self.socket.send(call).map_err(RpcError::Send)?;
        if n != call.len() {
        	return Err(RpcError::Send(io::Error::new(io::ErrorKind::WriteZero,
        		format!("sent {} of {} bytes", n, call.len()))));
        }

    	let mut recv_buff = [0u8; RECV_BUFF_LEN];
    	let n = self.socket.recv(&mut recv_buff).map_err(RpcError::Receive)?;
		log::trace!("<- {:?}", &recv_buff[..n]);

    	let mut unpacker = xdr::Unpacker::new(&recv_buff[..n]);
    	xdr_unpack::unpack_replyheader(&mut unpacker, xid)?;

		log::debug!("rpc reply xid={:#010x} with {} payload bytes", xid, unpacker.remaining());
    	Ok(unpacker.get_remaining_bytes())
	}
}
