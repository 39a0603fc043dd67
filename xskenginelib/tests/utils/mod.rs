//! Frame builders and table fixtures shared by the dispatch tests

use anyhow::Context;
use pnet::{
	datalink::MacAddr,
	packet::{
		arp::{ArpHardwareTypes, ArpOperations, MutableArpPacket},
		ethernet::{EtherTypes, MutableEthernetPacket},
		ip::IpNextHeaderProtocols,
		ipv4::{self, MutableIpv4Packet},
		udp::MutableUdpPacket,
		MutablePacket, Packet,
	},
};

use std::net::Ipv4Addr;

use xskenginelib::{DispatchConfig, EthHdr, Ip4Hdr, SockHandle, UdpHdr, XskMap};

pub const SRC_MAC: [u8; 6] = [0, 1, 2, 3, 4, 5];
pub const DST_MAC: [u8; 6] = [0x90, 0xe2, 0xba, 0xb2, 0x98, 0x48];

fn arr_to_macaddr(mac: [u8; 6]) -> MacAddr {
	MacAddr::new(mac[0], mac[1], mac[2], mac[3], mac[4], mac[5])
}

/// Build a well-formed Ethernet/IPv4/UDP frame
pub fn build_udp_frame(
	src_ip: Ipv4Addr,
	dst_ip: Ipv4Addr,
	src_port: u16,
	dst_port: u16,
	payload: &[u8],
) -> anyhow::Result<Vec<u8>> {
	let udp_len = UdpHdr::SIZE + payload.len();
	let mut udp_buf = vec![0u8; udp_len];
	let mut udp_pkt = MutableUdpPacket::new(&mut udp_buf).context("udp buffer")?;
	udp_pkt.set_source(src_port);
	udp_pkt.set_destination(dst_port);
	udp_pkt.set_length(udp_len as u16);
	udp_pkt.set_payload(payload);

	let ip_len = Ip4Hdr::SIZE + udp_len;
	let mut ip_buf = vec![0u8; ip_len];
	let mut ip_pkt = MutableIpv4Packet::new(&mut ip_buf).context("ip buffer")?;
	ip_pkt.set_version(4);
	ip_pkt.set_header_length(Ip4Hdr::MIN_IHL);
	ip_pkt.set_total_length(ip_len as u16);
	ip_pkt.set_ttl(64);
	ip_pkt.set_next_level_protocol(IpNextHeaderProtocols::Udp);
	ip_pkt.set_source(src_ip);
	ip_pkt.set_destination(dst_ip);
	ip_pkt.set_payload(udp_pkt.packet_mut());
	let checksum = ipv4::checksum(&ip_pkt.to_immutable());
	ip_pkt.set_checksum(checksum);

	let mut eth_buf = vec![0u8; EthHdr::SIZE + ip_len];
	let mut eth_pkt = MutableEthernetPacket::new(&mut eth_buf).context("eth buffer")?;
	eth_pkt.set_destination(arr_to_macaddr(DST_MAC));
	eth_pkt.set_source(arr_to_macaddr(SRC_MAC));
	eth_pkt.set_ethertype(EtherTypes::Ipv4);
	eth_pkt.set_payload(ip_pkt.packet());

	Ok(eth_buf)
}

/// Build a broadcast ARP request frame
pub fn build_arp_frame(sender_ip: Ipv4Addr, target_ip: Ipv4Addr) -> anyhow::Result<Vec<u8>> {
	let mut arp_buf = [0u8; 28];
	let mut arp_pkt = MutableArpPacket::new(&mut arp_buf).context("arp buffer")?;
	arp_pkt.set_hardware_type(ArpHardwareTypes::Ethernet);
	arp_pkt.set_protocol_type(EtherTypes::Ipv4);
	arp_pkt.set_hw_addr_len(6);
	arp_pkt.set_proto_addr_len(4);
	arp_pkt.set_operation(ArpOperations::Request);
	arp_pkt.set_sender_hw_addr(arr_to_macaddr(SRC_MAC));
	arp_pkt.set_sender_proto_addr(sender_ip);
	arp_pkt.set_target_hw_addr(MacAddr::zero());
	arp_pkt.set_target_proto_addr(target_ip);

	let mut eth_buf = vec![0u8; EthHdr::SIZE + 28];
	let mut eth_pkt = MutableEthernetPacket::new(&mut eth_buf).context("eth buffer")?;
	eth_pkt.set_destination(MacAddr::broadcast());
	eth_pkt.set_source(arr_to_macaddr(SRC_MAC));
	eth_pkt.set_ethertype(EtherTypes::Arp);
	eth_pkt.set_payload(arp_pkt.packet_mut());

	Ok(eth_buf)
}

/// A fully populated configuration
pub fn build_config(socks_per_queue: u32, addr: Ipv4Addr, port: u16) -> DispatchConfig {
	let cfg = DispatchConfig::new();
	cfg.set_socks_per_queue(socks_per_queue)
		.set_bind_address(addr)
		.set_bind_port(port);
	cfg
}

/// Install a distinct, recognizable socket handle in each of `slots`
pub fn populate_slots(xsks: &XskMap, slots: std::ops::Range<usize>) {
	for slot in slots {
		xsks.insert(slot, sock_at(slot)).unwrap();
	}
}

/// The handle `populate_slots` installs at `slot`
pub fn sock_at(slot: usize) -> SockHandle {
	SockHandle::new(100 + slot as i32)
}
