use std::fmt;
use std::io;

/// Something that went wrong while running a single RPC transaction or
/// while picking apart its reply
#[derive(Debug)]
pub enum RpcError {
	/// Socket couldn't be bound or connected, or the address didn't resolve
	Connect(io::Error),
	/// The request datagram couldn't be written in full
	Send(io::Error),
	/// Reading the reply datagram failed (this includes a configured timeout expiring)
	Receive(io::Error),
	/// Fewer bytes than the protocol needs at this stage
	ShortResponse { expected: usize, actual: usize },
	/// The reply echoed a different transaction id than the one we sent
	TransactionMismatch { expected: u32, actual: u32 },
	/// Message type wasn't REPLY
	InvalidReply(u32),
	/// The reply came back but the remote side didn't accept the call
	RemoteProcedureFailure(u32),
	/// The portmapper has nothing registered for this program and version
	PortNotFound { program: u32, version: u32 },
	/// Portmapper handed back something that can't be a UDP port
	InvalidPort(u32),
	/// Tried to read a word past the end of a buffer
	InsufficientData { needed: usize, remaining: usize },
	/// A byte count that isn't a whole number of words
	Misaligned { len: usize },
}

impl fmt::Display for RpcError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RpcError::Connect(e) => write!(f, "failed to connect: {}", e),
			RpcError::Send(e) => write!(f, "failed to write request: {}", e),
			RpcError::Receive(e) => write!(f, "failed to read response: {}", e),
			RpcError::ShortResponse { expected, actual } => {
				write!(f, "bad response length, expected at least {} bytes, got {}", expected, actual)
			}
			RpcError::TransactionMismatch { expected, actual } => {
				write!(f, "transaction id mismatch, sent {:#010x} but got {:#010x}", expected, actual)
			}
			RpcError::InvalidReply(mtype) => write!(f, "invalid message type {} in reply", mtype),
			RpcError::RemoteProcedureFailure(stat) => write!(f, "rpc request failed with status {}", stat),
			RpcError::PortNotFound { program, version } => {
				write!(f, "no port mapping found for program {} version {}", program, version)
			}
			RpcError::InvalidPort(port) => write!(f, "{} is not a valid port", port),
			RpcError::InsufficientData { needed, remaining } => {
				write!(f, "needed {} bytes but only {} remain", needed, remaining)
			}
			RpcError::Misaligned { len } => {
				write!(f, "{} bytes is not a multiple of four, word alignment would be lost", len)
			}
		}
	}
}

impl std::error::Error for RpcError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			RpcError::Connect(e) | RpcError::Send(e) | RpcError::Receive(e) => Some(e),
			_ => None,
		}
	}
}

/// Error returned by the client, tagged with the stage that failed
#[derive(Debug)]
pub enum Error {
	/// Asking the portmapper for the daemon's port
	Resolve(RpcError),
	/// The transaction with the stats daemon itself
	Daemon(RpcError),
	/// Turning the daemon's reply into a `Stats`
	Decode(RpcError),
}

impl Error {
	/// The underlying failure, regardless of which stage it happened in
	pub fn kind(&self) -> &RpcError {
		match self {
			Error::Resolve(e) | Error::Daemon(e) | Error::Decode(e) => e,
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::Resolve(e) => write!(f, "rstat: rpcbind request failed: {}", e),
			Error::Daemon(e) => write!(f, "rstat: daemon request failed: {}", e),
			Error::Decode(e) => write!(f, "rstat: bad response from daemon: {}", e),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		Some(self.kind())
	}
}

pub type Result<T> = std::result::Result<T, Error>;
