// External data representation, here just the big-endian words that RPC messages are made of
pub mod xdr;

// Remote procedure call over UDP, plus the portmapper that tells us which port a program is on
pub mod rpc;

// The rstat program, which reports kernel counters like CPU time, paging and network traffic
pub mod rstat;

pub mod error;

pub use crate::error::{Error, RpcError};
pub use crate::rstat::{read_stats, Client, Stats};
