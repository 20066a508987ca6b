pub const RPCVERSION:u32 = 2;

pub const CALL:u32  = 0;
pub const REPLY:u32 = 1;

pub const MSG_ACCEPTED:u32 = 0;
pub const MSG_DENIED:u32 = 1;

pub const AUTH_NONE:u32 = 0;

pub const IPPROTO_TCP:u32 = 6;
pub const IPPROTO_UDP:u32 = 17;

// Length of the part of every reply that udp_clients checks and strips: xid, message type, reply status
pub const REPLY_ENVELOPE_LEN:usize = 12;

pub mod xdr_unpack;
pub mod xdr_pack;

pub mod port_mapping;

pub mod udp_clients;
