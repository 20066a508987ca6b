use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::RpcError;
use crate::xdr::Unpacker;

// Verifier flavor, verifier length and accept status come ahead of the statstime body
const BODY_OFFSET:usize = 12;
const STATSTIME_WORDS:usize = 26;

/// Shortest reply body that still holds a whole statstime record
pub const MIN_STATS_LEN:usize = BODY_OFFSET + 4 * STATSTIME_WORDS;

// avenrun is scaled by FSCALE on the daemon side
pub const FSCALE:u32 = 256;

/// Kernel counters from one RSTATPROC_STATS call (the version 3 `statstime` record)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
	pub cpu_user: u32,
	pub cpu_nice: u32,
	pub cpu_sys: u32,
	pub cpu_idle: u32,

	pub disk_transfers: [u32; 4],

	pub pages_in: u32,
	pub pages_out: u32,

	pub page_swaps_in: u32,
	pub page_swaps_out: u32,

	pub interrupts: u32,
	pub context_switches: u32,

	pub net_in_packets: u32,
	pub net_in_errors: u32,
	pub net_out_packets: u32,
	pub net_out_errors: u32,
	pub net_collisions: u32,

	/// Run queue length over 1, 5 and 15 minutes, already divided by FSCALE
	pub load_average: [u32; 3],

	pub boot_time: SystemTime,
	pub curr_time: SystemTime,
}

fn unpack_timeval(unpacker:&mut Unpacker) -> Result<SystemTime, RpcError> {
	let sec:u32  = unpacker.unpack_u32()?;
	let usec:u32 = unpacker.unpack_u32()?;
	Ok(UNIX_EPOCH + Duration::from_secs(sec as u64) + Duration::from_micros(usec as u64))
}

/// Decode a statstime record from the bytes following the reply envelope.  The field order
/// follows the daemon's struct, which is why the output packet count comes last.
pub fn unpack_statstime(resp:&[u8]) -> Result<Stats, RpcError> {
	if resp.len() < MIN_STATS_LEN {
		return Err(RpcError::ShortResponse{ expected: MIN_STATS_LEN, actual: resp.len() });
	}

	let mut unpacker = Unpacker::new(resp);
	unpacker.skip(BODY_OFFSET)?;

	let cpu_user = unpacker.unpack_u32()?;
	let cpu_nice = unpacker.unpack_u32()?;
	let cpu_sys  = unpacker.unpack_u32()?;
	let cpu_idle = unpacker.unpack_u32()?;

	let mut disk_transfers = [0u32; 4];
	for d in disk_transfers.iter_mut() { *d = unpacker.unpack_u32()?; }

	let pages_in       = unpacker.unpack_u32()?;
	let pages_out      = unpacker.unpack_u32()?;
	let page_swaps_in  = unpacker.unpack_u32()?;
	let page_swaps_out = unpacker.unpack_u32()?;
	let interrupts     = unpacker.unpack_u32()?;

	let net_in_packets = unpacker.unpack_u32()?;
	let net_in_errors  = unpacker.unpack_u32()?;
	let net_out_errors = unpacker.unpack_u32()?;
	let net_collisions = unpacker.unpack_u32()?;

	let context_switches = unpacker.unpack_u32()?;

	let mut load_average = [0u32; 3];
	for l in load_average.iter_mut() { *l = unpacker.unpack_u32()? / FSCALE; }

	let boot_time = unpack_timeval(&mut unpacker)?;
	let curr_time = unpack_timeval(&mut unpacker)?;

	let net_out_packets = unpacker.unpack_u32()?;

	if !unpacker.all_data_consumed() {
		log::trace!("ignoring {} trailing bytes after statstime", unpacker.remaining());
	}

	Ok(Stats {
		cpu_user, cpu_nice, cpu_sys, cpu_idle,
		disk_transfers,
		pages_in, pages_out,
		page_swaps_in, page_swaps_out,
		interrupts, context_switches,
		net_in_packets, net_in_errors, net_out_packets, net_out_errors, net_collisions,
		load_average,
		boot_time, curr_time,
	})
}
