use crate::error::RpcError;
use crate::xdr::Unpacker;
use crate::rpc::{REPLY, MSG_ACCEPTED, REPLY_ENVELOPE_LEN};

/// Check the xid, message type and reply status at the front of a reply.  On success the
/// unpacker is left positioned just past them.
pub fn unpack_replyheader(unpacker:&mut Unpacker, xid:u32) -> Result<(), RpcError> {
	let n = unpacker.remaining();
	if n < REPLY_ENVELOPE_LEN {
		return Err(RpcError::ShortResponse{ expected: REPLY_ENVELOPE_LEN, actual: n });
	}

	let reply_xid:u32 = unpacker.unpack_u32()?;
	if reply_xid != xid {
		return Err(RpcError::TransactionMismatch{ expected: xid, actual: reply_xid });
	}

	let mtype:u32 = unpacker.unpack_u32()?;
	if mtype != REPLY { return Err(RpcError::InvalidReply(mtype)); }

	// MSG_DENIED and anything else unexpected all end up here
	let stat:u32 = unpacker.unpack_u32()?;
	if stat != MSG_ACCEPTED { return Err(RpcError::RemoteProcedureFailure(stat)); }

	Ok(())
}
