extern crate byteorder;

use std::io::Cursor;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

use crate::error::RpcError;

pub struct Packer{
	pub buff:Vec<u8>
}

pub struct Unpacker {
	buff: Cursor<Vec<u8>>,
}

/// Encode a sequence of words, each as four big-endian bytes.
pub fn encode(words:&[u32]) -> Vec<u8> {
	let mut packer = Packer::with_capacity(words.len());
	packer.pack_words(words);
	packer.into_buf()
}

/// Read one big-endian word off the front of `buff` and hand back the rest.
pub fn decode_next(buff:&[u8]) -> Result<(u32, &[u8]), RpcError> {
	if buff.len() < 4 {
		return Err(RpcError::InsufficientData{ needed: 4, remaining: buff.len() });
	}
	let (head, rest) = buff.split_at(4);
	Ok((BigEndian::read_u32(head), rest))
}

impl Packer {

	pub fn new() -> Self { Packer{buff: Vec::new()} }

	pub fn with_capacity(words:usize) -> Self { Packer{buff: Vec::with_capacity(words * 4)} }

	pub fn get_buf(&self) -> &[u8] { &self.buff }

	pub fn into_buf(self) -> Vec<u8> { self.buff }

	// Writing into a Vec can't fail, so these don't bother returning a Result
	pub fn pack_u32(&mut self, x:u32) {
		let mut word = [0u8; 4];
		BigEndian::write_u32(&mut word, x);
		self.buff.extend_from_slice(&word);
	}

	pub fn pack_words(&mut self, words:&[u32]) {
		for w in words { self.pack_u32(*w); }
	}

	// Bytes that were already packed elsewhere, so they have to be whole words already
	pub fn pack_opaque_words(&mut self, data:&[u8]) -> Result<(), RpcError> {
		if data.len() % 4 != 0 {
			return Err(RpcError::Misaligned{ len: data.len() });
		}
		self.buff.extend_from_slice(data);
		Ok(())
	}

}

impl Unpacker {

	pub fn new(data:&[u8]) -> Self { Unpacker{ buff: Cursor::new(data.to_vec()) } }

	pub fn remaining(&self) -> usize {
		let len = self.buff.get_ref().len();
		len - (self.buff.position() as usize).min(len)
	}

	pub fn all_data_consumed(&self) -> bool { self.remaining() == 0 }

	pub fn get_remaining_bytes(&self) -> Vec<u8> {
		let pos = self.buff.position() as usize;
		self.buff.get_ref()[pos..].to_vec()
	}

	/// Drop `n` bytes, which has to be a multiple of four to keep word alignment.
	pub fn skip(&mut self, n:usize) -> Result<(), RpcError> {
		if n % 4 != 0 {
			return Err(RpcError::Misaligned{ len: n });
		}
		if self.remaining() < n {
			return Err(RpcError::InsufficientData{ needed: n, remaining: self.remaining() });
		}
		let pos = self.buff.position();
		self.buff.set_position(pos + n as u64);
		Ok(())
	}

	pub fn unpack_u32(&mut self) -> Result<u32, RpcError> {
		let remaining = self.remaining();
		if remaining < 4 {
			return Err(RpcError::InsufficientData{ needed: 4, remaining });
		}
		self.buff.read_u32::<BigEndian>()
			.map_err(|_| RpcError::InsufficientData{ needed: 4, remaining })
	}

}
