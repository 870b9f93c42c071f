//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing an IPv4 network with its prefix
//! length, along with the mask arithmetic the host sequencer relies on.

use serde::Serialize;
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

use super::HostSequencer;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use panorama_config_gen::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let bits = u32::from(addr) as u64;
        let new_bits = (bits >> right_len) << right_len;

        Ok(Ipv4Addr::from(new_bits as u32))
    }
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let mask = get_cidr_mask(len)?;
        let addr_bits = u32::from(addr);
        let network_bits = addr_bits & mask;
        let broadcast_bits = network_bits | (!mask);
        Ok(Ipv4Addr::from(broadcast_bits))
    }
}

/// Number of usable host addresses in a network of the given prefix length.
///
/// Network and broadcast addresses are excluded, except for /31 (both
/// addresses usable, point-to-point) and /32 (the single address).
pub fn num_hosts(len: u8) -> Result<u64, Box<dyn Error>> {
    match len {
        l if l > MAX_LENGTH => Err("Network length is too long".into()),
        32 => Ok(1),
        31 => Ok(2),
        l => Ok((1u64 << (MAX_LENGTH - l)) - 2),
    }
}

/// IPv4 network in CIDR notation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv4 {
    /// The network address (host bits cleared).
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.mask);
        serializer.serialize_str(&cidr)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// Host bits are accepted and cleared, so "10.1.2.3/8" becomes "10.0.0.0/8".
    pub fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(format!("Invalid address/mask '{addr_cidr}'").into());
        }
        let addr: Ipv4Addr = parts[0]
            .parse()
            .map_err(|_| format!("Invalid address {}", parts[0]))?;
        let mask: u8 = parts[1]
            .parse()
            .map_err(|_| format!("Invalid subnet mask {}", parts[1]))?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(Ipv4 {
            addr: cut_addr(addr, mask)?,
            mask,
        })
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        // mask is validated on construction
        cut_addr(self.addr, self.mask).unwrap_or(self.addr)
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.mask).unwrap_or(self.addr)
    }

    /// Number of usable host addresses.
    pub fn host_count(&self) -> u64 {
        num_hosts(self.mask).unwrap_or(0)
    }

    /// First and last usable host, as u32.
    pub(crate) fn host_bounds(&self) -> (u32, u32) {
        let (lo, hi) = (u32::from(self.lo()), u32::from(self.hi()));
        if self.mask >= 31 {
            (lo, hi)
        } else {
            (lo + 1, hi - 1)
        }
    }

    /// Start enumerating the usable hosts of this network.
    pub fn hosts(&self) -> HostSequencer {
        HostSequencer::new(*self)
    }
}

impl FromStr for Ipv4 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s).map_err(|e| format!("invalid network '{s}': {e}"))
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
