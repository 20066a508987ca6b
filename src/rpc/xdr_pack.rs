use crate::xdr::Packer;
use crate::rpc::{CALL, RPCVERSION, AUTH_NONE};

// Opaque auth bodies are always empty here, so only the flavor and a zero length go out
pub fn pack_auth_none(packer:&mut Packer) {
	packer.pack_u32(AUTH_NONE);
	packer.pack_u32(0);
}

pub fn pack_callheader_no_auth(packer:&mut Packer, xid:u32, prog:u32, vers:u32, prc:u32) {
	packer.pack_u32(xid);
	packer.pack_u32(CALL);
	packer.pack_u32(RPCVERSION);
	packer.pack_u32(prog);
	packer.pack_u32(vers);
	packer.pack_u32(prc);
	pack_auth_none(packer);	// credential
	pack_auth_none(packer);	// verifier
}

pub fn pack_mapping(packer:&mut Packer, prog:u32, vers:u32, prot:u32, port:u32) {
	packer.pack_u32(prog);
	packer.pack_u32(vers);
	packer.pack_u32(prot);
	packer.pack_u32(port);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::xdr::encode;

	#[test]
	fn callheader_layout() {
		let mut packer = Packer::new();
		pack_callheader_no_auth(&mut packer, 0xcafef00d, 0x186a1, 3, 1);
		assert_eq!(packer.get_buf(), &encode(&[0xcafef00d, 0, 2, 0x186a1, 3, 1, 0, 0, 0, 0])[..]);
	}

	#[test]
	fn getport_call_layout() {
		let mut packer = Packer::new();
		pack_callheader_no_auth(&mut packer, 7, 100000, 2, 3);
		pack_mapping(&mut packer, 100001, 3, 17, 0);
		let expected = encode(&[7, 0, 2, 0x186a0, 2, 3, 0, 0, 0, 0, 0x186a1, 3, 0x11, 0]);
		assert_eq!(packer.into_buf(), expected);
	}
}
