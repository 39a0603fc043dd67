//! The per-frame dispatch decision
//!
//! Invoked once per received frame, on the queue that received it. The
//! routine is a straight-line classification chain with no back-edges:
//! parse the link header, filter IPv4/UDP traffic against the bound
//! address and port, pick the destination slot for the owning queue, then
//! look the slot up in the redirect table. Every frame gets exactly one
//! verdict; there is no state carried between frames.

use std::convert::TryFrom;

use super::{DispatchConfig, EthHdr, EthType, FrameBuf, Ip4Hdr, IpProto, SockHandle, UdpHdr, XskMap};

/// License string the hosting framework reads at load time before granting
/// access to the map lookup and redirect primitives
pub const PROG_LICENSE: &str = "GPL";

/// Outcome of dispatching one frame, handed back to the hosting driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
	/// Deliver the frame to the normal network stack
	Pass,
	/// Drop the frame as malformed
	Aborted,
	/// Hand the frame to the given accelerated socket
	Redirect(SockHandle),
}

/// Slot that receives traffic carrying `dispersal_key` on `rx_queue`
///
/// Queues own disjoint slot ranges, so two frames landing on different
/// queues can never collide on a slot; within a queue, one dispersal key
/// always maps to the same slot.
///
/// `socks_per_queue` must be non-zero; `dispatch` guards this before
/// calling.
pub fn xsk_slot(rx_queue: u32, socks_per_queue: u32, dispersal_key: u16) -> u32 {
	rx_queue * socks_per_queue + dispersal_key as u32 % socks_per_queue
}

/// Decide the fate of one received frame
pub fn dispatch(frame: &[u8], rx_queue: u32, cfg: &DispatchConfig, xsks: &XskMap) -> Verdict {
	let mut buf = FrameBuf::new(frame);

	let eth = match EthHdr::parse(&mut buf) {
		Ok(eth) => eth,
		Err(e) => {
			log::debug!("queue {}: dropping frame: {}", rx_queue, e);
			return Verdict::Aborted;
		}
	};

	match EthType::try_from(eth.ether_type()) {
		Ok(EthType::Ip4) => dispatch_ip4(&mut buf, rx_queue, cfg, xsks),
		// ARP carries no port to disperse on; all ARP traffic of a queue
		// lands on the queue's first slot
		Ok(EthType::Arp) => redirect_to_xsk(rx_queue, 0, cfg, xsks),
		Err(_) => Verdict::Pass,
	}
}

fn dispatch_ip4(
	buf: &mut FrameBuf,
	rx_queue: u32,
	cfg: &DispatchConfig,
	xsks: &XskMap,
) -> Verdict {
	let ip4 = match Ip4Hdr::parse(buf) {
		Ok(ip4) => ip4,
		Err(e) => {
			log::debug!("queue {}: dropping frame: {}", rx_queue, e);
			return Verdict::Aborted;
		}
	};

	// Only the fixed 20 byte layout is valid here; with options present
	// the transport header would sit at a different offset
	if ip4.ihl() != Ip4Hdr::MIN_IHL {
		log::debug!(
			"queue {}: dropping IPv4 frame with options (ihl {})",
			rx_queue,
			ip4.ihl()
		);
		return Verdict::Aborted;
	}

	let bind_addr = match cfg.bind_addr() {
		Some(addr) => addr,
		None => return Verdict::Pass,
	};
	if ip4.dst_addr() != bind_addr {
		return Verdict::Pass;
	}

	if ip4.protocol() != IpProto::Udp as u8 {
		return Verdict::Pass;
	}

	let udp = match UdpHdr::parse(buf) {
		Ok(udp) => udp,
		Err(e) => {
			log::debug!("queue {}: dropping frame: {}", rx_queue, e);
			return Verdict::Aborted;
		}
	};

	let bind_port = match cfg.bind_port() {
		Some(port) => port,
		None => return Verdict::Pass,
	};
	if udp.dst_port() != bind_port {
		return Verdict::Pass;
	}

	// Destination address and port are fixed by the match above; the
	// source port is the only client-distinguishing value left, so it
	// spreads distinct client flows across the queue's sockets
	redirect_to_xsk(rx_queue, udp.src_port(), cfg, xsks)
}

fn redirect_to_xsk(
	rx_queue: u32,
	dispersal_key: u16,
	cfg: &DispatchConfig,
	xsks: &XskMap,
) -> Verdict {
	let socks_per_queue = match cfg.socks_per_queue() {
		Some(n) => n,
		None => return Verdict::Pass,
	};

	// A zero quota means no sockets are provisioned; treat it as
	// acceleration disabled instead of dividing by zero
	if socks_per_queue == 0 {
		return Verdict::Pass;
	}

	let slot = xsk_slot(rx_queue, socks_per_queue, dispersal_key);
	match xsks.lookup(slot) {
		Some(sock) => {
			#[cfg(feature = "debug")]
			println!("queue {} key {} -> slot {}", rx_queue, dispersal_key, slot);
			Verdict::Redirect(sock)
		}
		None => Verdict::Pass,
	}
}
