//! The redirect table mapping socket slots to accelerated sockets
//!
//! The control plane installs one entry per accelerated socket at the slot
//! computed by `xsk_slot` for the socket's owning queue, and removes the
//! entry when the socket is torn down. The dispatcher only looks entries up.

use std::io;

use valmap::SlotMap;

/// Opaque handle to one accelerated socket, as registered by the control
/// plane
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SockHandle(i32);

impl SockHandle {
	pub fn new(fd: i32) -> Self {
		Self(fd)
	}

	/// The raw descriptor the hosting driver redirects into
	pub fn fd(&self) -> i32 {
		self.0
	}
}

/// Slot-indexed table of accelerated sockets
///
/// Slots are partitioned by receive queue: queue `q` owns the contiguous
/// range `q * socks_per_queue .. (q + 1) * socks_per_queue`
pub struct XskMap {
	slots: SlotMap<SockHandle>,
}

impl XskMap {
	/// Capacity of the redirect table
	pub const MAX_ENTRIES: usize = 1024;

	pub fn new() -> Self {
		Self {
			slots: SlotMap::new(Self::MAX_ENTRIES),
		}
	}

	/// Register an accelerated socket at `slot`
	pub fn insert(&self, slot: usize, sock: SockHandle) -> io::Result<()> {
		self.slots.insert(slot, sock)
	}

	/// Drop the registration at `slot` when its socket is torn down
	pub fn remove(&self, slot: usize) -> io::Result<()> {
		self.slots.remove(slot)
	}

	/// Socket registered at `slot`, if any
	///
	/// An empty slot is the normal case for queues with fewer sockets than
	/// their quota; callers fall back to the normal stack
	pub fn lookup(&self, slot: u32) -> Option<SockHandle> {
		self.slots.lookup(slot as usize)
	}
}

impl Default for XskMap {
	fn default() -> Self {
		Self::new()
	}
}
