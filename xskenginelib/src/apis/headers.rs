//! Views over the fixed-size wire headers the dispatcher understands
//!
//! Each view borrows exactly its header's bytes out of a `FrameBuf`, so a
//! view only exists if the whole header fits inside the frame. Multi-byte
//! fields are returned in host order. There is no variable-length parsing
//! here: an IPv4 header advertising options is surfaced through `ihl` and
//! rejected by the dispatcher instead of being skipped.

use std::convert::TryFrom;

use byteorder::{ByteOrder, NetworkEndian};

use super::frame::{FrameBuf, FrameError};

/// Ethernet II header
pub struct EthHdr<'a> {
	bytes: &'a [u8],
}

impl<'a> EthHdr<'a> {
	pub const SIZE: usize = 14;

	pub fn parse(frame: &mut FrameBuf<'a>) -> Result<Self, FrameError> {
		Ok(Self {
			bytes: frame.get_bytes(Self::SIZE)?,
		})
	}

	pub fn dst_mac(&self) -> [u8; 6] {
		let mut mac = [0u8; 6];
		mac.copy_from_slice(&self.bytes[0..6]);
		mac
	}

	pub fn src_mac(&self) -> [u8; 6] {
		let mut mac = [0u8; 6];
		mac.copy_from_slice(&self.bytes[6..12]);
		mac
	}

	pub fn ether_type(&self) -> u16 {
		NetworkEndian::read_u16(&self.bytes[12..14])
	}
}

/// The two EtherTypes the dispatcher accelerates; everything else is left
/// to the normal stack
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EthType {
	Ip4 = 0x0800,
	Arp = 0x0806,
}

impl TryFrom<u16> for EthType {
	type Error = ();

	fn try_from(x: u16) -> Result<Self, Self::Error> {
		use EthType::*;

		match x {
			x if x == Ip4 as u16 => Ok(Ip4),
			x if x == Arp as u16 => Ok(Arp),
			_ => Err(()),
		}
	}
}

/// IPv4 header, fixed 20 byte layout
pub struct Ip4Hdr<'a> {
	bytes: &'a [u8],
}

impl<'a> Ip4Hdr<'a> {
	pub const SIZE: usize = 20;
	/// Header length in 32-bit words when no options are present
	pub const MIN_IHL: u8 = 5;

	pub fn parse(frame: &mut FrameBuf<'a>) -> Result<Self, FrameError> {
		Ok(Self {
			bytes: frame.get_bytes(Self::SIZE)?,
		})
	}

	pub fn version(&self) -> u8 {
		self.bytes[0] >> 4
	}

	/// Header length in 32-bit words
	pub fn ihl(&self) -> u8 {
		self.bytes[0] & 0x0f
	}

	pub fn protocol(&self) -> u8 {
		self.bytes[9]
	}

	pub fn src_addr(&self) -> u32 {
		NetworkEndian::read_u32(&self.bytes[12..16])
	}

	pub fn dst_addr(&self) -> u32 {
		NetworkEndian::read_u32(&self.bytes[16..20])
	}
}

pub enum IpProto {
	Udp = 17,
}

/// UDP header
pub struct UdpHdr<'a> {
	bytes: &'a [u8],
}

impl<'a> UdpHdr<'a> {
	pub const SIZE: usize = 8;

	pub fn parse(frame: &mut FrameBuf<'a>) -> Result<Self, FrameError> {
		Ok(Self {
			bytes: frame.get_bytes(Self::SIZE)?,
		})
	}

	pub fn src_port(&self) -> u16 {
		NetworkEndian::read_u16(&self.bytes[0..2])
	}

	pub fn dst_port(&self) -> u16 {
		NetworkEndian::read_u16(&self.bytes[2..4])
	}

	pub fn length(&self) -> u16 {
		NetworkEndian::read_u16(&self.bytes[4..6])
	}
}
