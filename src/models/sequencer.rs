//! Sequential host allocation from a CIDR block.

use super::Ipv4;
use crate::error::{GenError, Result};
use std::net::Ipv4Addr;

/// Advance-only cursor over the usable hosts of an [`Ipv4`] network.
///
/// Hosts come out in ascending numeric order. Once the range is used up every
/// further call fails with [`GenError::AddressSpaceExhausted`].
#[derive(Debug, Clone)]
pub struct HostSequencer {
    range: Ipv4,
    // u64 so the cursor can step past 255.255.255.255
    next: u64,
    last: u64,
    emitted: u64,
}

impl HostSequencer {
    pub fn new(range: Ipv4) -> HostSequencer {
        let (first, last) = range.host_bounds();
        HostSequencer {
            range,
            next: first as u64,
            last: last as u64,
            emitted: 0,
        }
    }

    /// Hand out the next host address.
    pub fn next_host(&mut self) -> Result<Ipv4Addr> {
        if self.next > self.last {
            return Err(GenError::AddressSpaceExhausted {
                range: self.range,
                emitted: self.emitted,
            });
        }
        let addr = Ipv4Addr::from(self.next as u32);
        self.next += 1;
        self.emitted += 1;
        Ok(addr)
    }

    pub fn range(&self) -> Ipv4 {
        self.range
    }

    /// Number of hosts handed out so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn remaining(&self) -> u64 {
        (self.last + 1).saturating_sub(self.next)
    }
}
