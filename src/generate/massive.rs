//! Count-driven generator for stress-testing address lookups.
//!
//! Every rule references address objects as source and destination members.
//! One round-robin cursor is shared by all member lists of all rules, shared
//! and device-group alike, so every object gets referenced repeatedly.

use super::{check_flush_every, check_name, close_output, elapsed_since, Summary, Variant};
use crate::emitter::{run_phase, Limit, Phase, SizedWriter};
use crate::error::{GenError, Result};
use crate::models::{Ipv4, RoundRobin};
use crate::output::skeleton::PanoramaExport;
use crate::output::xml::{address_entry, object_name, security_rule, Members};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Instant;

const RULE_FLUSH_EVERY: u64 = 500;

#[derive(Debug, Clone)]
pub struct MassiveOptions {
    pub out: PathBuf,
    pub base_network: Ipv4,
    pub addr_prefix: String,
    pub addr_count: u64,
    pub rules: u64,
    pub src_members: u64,
    pub dst_members: u64,
    pub shared_rule_prefix: String,
    pub include_dg: bool,
    pub dg: String,
    /// Device-group rules, 0 means a tenth of `rules`.
    pub dg_rules: u64,
    pub dg_rule_prefix: String,
    pub flush_every: u64,
    pub max_entries: u64,
}

impl MassiveOptions {
    pub fn validate(&self) -> Result<()> {
        if self.addr_count == 0 {
            return Err(GenError::Config("--addr-count must be > 0".to_string()));
        }
        check_flush_every(self.flush_every)?;
        check_name("--addr-prefix", &self.addr_prefix)?;
        check_name("--shared-rule-prefix", &self.shared_rule_prefix)?;
        if self.include_dg {
            check_name("--dg", &self.dg)?;
            check_name("--dg-rule-prefix", &self.dg_rule_prefix)?;
        }
        Ok(())
    }

    /// Device-group rule count actually generated.
    pub fn effective_dg_rules(&self) -> u64 {
        if self.dg_rules > 0 {
            self.dg_rules
        } else {
            self.rules / 10
        }
    }
}

fn take_members(cycle: &mut RoundRobin<'_, Ipv4Addr>, prefix: &str, n: u64) -> Members {
    Members::Named(
        cycle
            .by_ref()
            .take(n as usize)
            .map(|ip| object_name(prefix, *ip))
            .collect(),
    )
}

pub fn generate(opts: &MassiveOptions) -> Result<Summary> {
    opts.validate()?;
    let started = Instant::now();
    let skeleton = PanoramaExport { annotate: false };
    log::info!(
        "#Start massive: {} with {} addresses, {} rules (src {}, dst {}) from {}",
        opts.out.display(),
        opts.addr_count,
        opts.rules,
        opts.src_members,
        opts.dst_members,
        opts.base_network
    );

    let mut hosts = opts.base_network.hosts();
    let mut ips: Vec<Ipv4Addr> = Vec::new();
    let mut out = SizedWriter::create(&opts.out)?;
    out.write_str(&skeleton.header())?;

    let addr_phase = Phase::new(
        "address",
        Limit::Count(opts.addr_count),
        opts.flush_every,
        opts.max_entries,
    );
    let address_objects = run_phase(&mut out, &addr_phase, |_| {
        let ip = hosts.next_host()?;
        ips.push(ip);
        Ok(address_entry(&opts.addr_prefix, ip))
    })?;

    out.write_str(&skeleton.address_to_rules())?;

    let mut cycle = RoundRobin::new(&ips)
        .ok_or_else(|| GenError::Config("no address objects to reference".to_string()))?;

    let shared_phase = Phase::new(
        "shared rules",
        Limit::Count(opts.rules),
        RULE_FLUSH_EVERY,
        opts.max_entries,
    );
    let rules = run_phase(&mut out, &shared_phase, |i| {
        let name = format!("{} {}", opts.shared_rule_prefix, i + 1);
        let source = take_members(&mut cycle, &opts.addr_prefix, opts.src_members);
        let destination = take_members(&mut cycle, &opts.addr_prefix, opts.dst_members);
        Ok(security_rule(&name, 10, &source, &destination))
    })?;

    out.write_str(&skeleton.shared_close())?;

    let dg_rules = if opts.include_dg {
        out.write_str(&skeleton.device_group_open(&opts.dg))?;
        let dg_phase = Phase::new(
            "device-group rules",
            Limit::Count(opts.effective_dg_rules()),
            RULE_FLUSH_EVERY,
            opts.max_entries,
        );
        let prefix = format!("{}-{}", opts.dg_rule_prefix, opts.dg);
        let count = run_phase(&mut out, &dg_phase, |i| {
            let name = format!("{prefix} {}", i + 1);
            let source = take_members(&mut cycle, &opts.addr_prefix, opts.src_members);
            let destination = take_members(&mut cycle, &opts.addr_prefix, opts.dst_members);
            Ok(security_rule(&name, 16, &source, &destination))
        })?;
        out.write_str(skeleton.device_group_close())?;
        Some(count)
    } else {
        None
    };

    log::debug!("Handed out {} member references", cycle.position());
    out.write_str(skeleton.footer())?;
    let bytes = close_output(out, &opts.out)?;
    let (elapsed_secs, finished_at) = elapsed_since(started);

    Ok(Summary {
        variant: Variant::Massive,
        file: opts.out.clone(),
        bytes,
        target_bytes: None,
        base_network: opts.base_network,
        address_objects,
        rules,
        dg_rules,
        src_members: Some(opts.src_members),
        dst_members: Some(opts.dst_members),
        elapsed_secs,
        finished_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(out: PathBuf) -> MassiveOptions {
        MassiveOptions {
            out,
            base_network: Ipv4::new("10.0.0.0/8").unwrap(),
            addr_prefix: "test-addr_obj".to_string(),
            addr_count: 5,
            rules: 4,
            src_members: 2,
            dst_members: 3,
            shared_rule_prefix: "test rule shared".to_string(),
            include_dg: false,
            dg: "dg-test".to_string(),
            dg_rules: 0,
            dg_rule_prefix: "test rule dg".to_string(),
            flush_every: 2000,
            max_entries: 1_000_000,
        }
    }

    fn members(xml: &str) -> Vec<String> {
        xml.lines()
            .map(str::trim)
            .filter_map(|l| l.strip_prefix("<member>test-addr_obj-"))
            .filter_map(|l| l.strip_suffix("</member>"))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_effective_dg_rules() {
        let mut o = opts(PathBuf::from("unused.xml"));
        o.rules = 95;
        assert_eq!(o.effective_dg_rules(), 9);
        o.dg_rules = 3;
        assert_eq!(o.effective_dg_rules(), 3);
    }

    #[test]
    fn test_addr_count_zero_rejected() {
        let mut o = opts(PathBuf::from("unused.xml"));
        o.addr_count = 0;
        assert!(matches!(o.validate(), Err(GenError::Config(_))));
    }

    #[test]
    fn test_members_rotate_across_rules() {
        let dir = tempfile::tempdir().unwrap();
        let o = opts(dir.path().join("m.xml"));
        let summary = generate(&o).unwrap();
        assert_eq!(summary.address_objects, 5);
        assert_eq!(summary.rules, 4);
        assert_eq!(summary.dg_rules, None);

        let xml = std::fs::read_to_string(&o.out).unwrap();
        let got = members(&xml);
        assert_eq!(got.len(), 4 * (2 + 3));
        for (i, ip) in got.iter().enumerate() {
            assert_eq!(ip, &format!("10.0.0.{}", i % 5 + 1), "member #{i}");
        }
        assert!(xml.contains("<entry name=\"test rule shared 4\">"));
        assert!(!xml.contains("<entry name=\"test rule shared 5\">"));
    }

    #[test]
    fn test_device_group_continues_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let mut o = opts(dir.path().join("dg.xml"));
        o.rules = 20;
        o.include_dg = true;
        let summary = generate(&o).unwrap();
        assert_eq!(summary.dg_rules, Some(2));

        let xml = std::fs::read_to_string(&o.out).unwrap();
        let got = members(&xml);
        assert_eq!(got.len(), 22 * 5);
        assert!(got
            .iter()
            .enumerate()
            .all(|(i, ip)| ip == &format!("10.0.0.{}", i % 5 + 1)));
        assert!(xml.contains("<entry name=\"test rule dg-dg-test 2\">"));
    }

    #[test]
    fn test_zero_members_render_empty_lists() {
        let dir = tempfile::tempdir().unwrap();
        let mut o = opts(dir.path().join("empty.xml"));
        o.src_members = 0;
        o.dst_members = 0;
        generate(&o).unwrap();
        let xml = std::fs::read_to_string(&o.out).unwrap();
        assert!(members(&xml).is_empty());
        assert_eq!(xml.matches("<source>\n").count(), 4);
    }

    #[test]
    fn test_huge_addr_count_stops_at_max_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut o = opts(dir.path().join("huge.xml"));
        o.base_network = Ipv4::new("0.0.0.0/0").unwrap();
        o.addr_count = 4_000_000_000;
        o.max_entries = 10;
        match generate(&o).unwrap_err() {
            GenError::IterationLimit { phase, limit } => {
                assert_eq!(phase, "address");
                assert_eq!(limit, 10);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_addr_count_beyond_range_exhausts() {
        let dir = tempfile::tempdir().unwrap();
        let mut o = opts(dir.path().join("x.xml"));
        o.base_network = Ipv4::new("192.168.0.0/29").unwrap();
        o.addr_count = 7;
        match generate(&o).unwrap_err() {
            GenError::AddressSpaceExhausted { range, emitted } => {
                assert_eq!(range.to_string(), "192.168.0.0/29");
                assert_eq!(emitted, 6);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
