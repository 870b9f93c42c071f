//! Size-targeted generator with a minimal skeleton.
//!
//! Address objects fill `addr_fill_percent` of the target, then any/any allow
//! rules in a device-group post-rulebase fill the rest.

use super::{
    check_flush_every, check_name, check_size, close_output, elapsed_since, fill_threshold,
    Summary, Variant,
};
use crate::emitter::{run_phase, Limit, Phase, SizedWriter};
use crate::error::Result;
use crate::models::Ipv4;
use crate::output::skeleton::minimal;
use crate::output::xml::{address_entry, basic_rule};
use std::path::PathBuf;
use std::time::Instant;

const RULE_FLUSH_EVERY: u64 = 1000;

#[derive(Debug, Clone)]
pub struct NamedOptions {
    pub out: PathBuf,
    pub target_bytes: u64,
    pub addr_fill_percent: f64,
    pub base_network: Ipv4,
    pub dg: String,
    pub addr_prefix: String,
    pub rule_prefix: String,
    pub flush_every: u64,
    /// Cap on address objects, `None` for no cap.
    pub max_addrs: Option<u64>,
    pub max_entries: u64,
}

impl NamedOptions {
    pub fn validate(&self) -> Result<()> {
        check_size(self.target_bytes, self.addr_fill_percent)?;
        check_flush_every(self.flush_every)?;
        check_name("--dg", &self.dg)?;
        check_name("--addr-prefix", &self.addr_prefix)?;
        check_name("--rule-prefix", &self.rule_prefix)?;
        Ok(())
    }
}

pub fn rule_name(prefix: &str, index: u64) -> String {
    format!("{prefix}-{index:07}")
}

pub fn generate(opts: &NamedOptions) -> Result<Summary> {
    opts.validate()?;
    let started = Instant::now();
    let addr_target = fill_threshold(opts.target_bytes, opts.addr_fill_percent);
    log::info!(
        "#Start named: {} target {} bytes ({} for addresses) from {}",
        opts.out.display(),
        opts.target_bytes,
        addr_target,
        opts.base_network
    );

    let mut hosts = opts.base_network.hosts();
    let mut out = SizedWriter::create(&opts.out)?;
    out.write_str(minimal::HEADER)?;

    let addr_phase = Phase::new(
        "address",
        Limit::Bytes(addr_target),
        opts.flush_every,
        opts.max_entries,
    )
    .with_cap(opts.max_addrs);
    let address_objects = run_phase(&mut out, &addr_phase, |_| {
        Ok(address_entry(&opts.addr_prefix, hosts.next_host()?))
    })?;

    out.write_str(&minimal::address_to_rules(&opts.dg))?;

    let rule_phase = Phase::new(
        "rules",
        Limit::Bytes(opts.target_bytes),
        RULE_FLUSH_EVERY,
        opts.max_entries,
    );
    let rules = run_phase(&mut out, &rule_phase, |i| {
        Ok(basic_rule(&rule_name(&opts.rule_prefix, i)))
    })?;

    out.write_str(minimal::FOOTER)?;
    let bytes = close_output(out, &opts.out)?;
    let (elapsed_secs, finished_at) = elapsed_since(started);

    Ok(Summary {
        variant: Variant::Named,
        file: opts.out.clone(),
        bytes,
        target_bytes: Some(opts.target_bytes),
        base_network: opts.base_network,
        address_objects,
        rules,
        dg_rules: None,
        src_members: None,
        dst_members: None,
        elapsed_secs,
        finished_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;

    fn opts(out: PathBuf) -> NamedOptions {
        NamedOptions {
            out,
            target_bytes: 64 * 1024,
            addr_fill_percent: 70.0,
            base_network: Ipv4::new("10.0.0.0/8").unwrap(),
            dg: "DG_TEST".to_string(),
            addr_prefix: "test-addr_obj".to_string(),
            rule_prefix: "test-rule".to_string(),
            flush_every: 2000,
            max_addrs: None,
            max_entries: 1_000_000,
        }
    }

    #[test]
    fn test_rule_name_is_zero_padded() {
        assert_eq!(rule_name("test-rule", 0), "test-rule-0000000");
        assert_eq!(rule_name("test-rule", 1234), "test-rule-0001234");
    }

    #[test]
    fn test_reaches_target() {
        let dir = tempfile::tempdir().unwrap();
        let o = opts(dir.path().join("named.xml"));
        let summary = generate(&o).unwrap();
        assert!(summary.bytes >= o.target_bytes);
        assert!(summary.address_objects > 0);
        assert!(summary.rules > 0);

        let xml = std::fs::read_to_string(&o.out).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<config>\n"));
        assert!(xml.ends_with("</config>\n"));
        assert!(xml.contains(
            "<entry name=\"test-addr_obj-10.0.0.1\"><ip-netmask>10.0.0.1</ip-netmask></entry>"
        ));
        assert!(xml.contains("<entry name=\"test-rule-0000000\">"));
        assert_eq!(xml.matches("<ip-netmask>").count() as u64, summary.address_objects);
    }

    #[test]
    fn test_max_addrs_caps_address_phase() {
        let dir = tempfile::tempdir().unwrap();
        let mut o = opts(dir.path().join("capped.xml"));
        o.max_addrs = Some(10);
        let summary = generate(&o).unwrap();
        assert_eq!(summary.address_objects, 10);
        assert!(summary.bytes >= o.target_bytes);
    }

    #[test]
    fn test_small_network_exhausts() {
        let dir = tempfile::tempdir().unwrap();
        let mut o = opts(dir.path().join("tiny.xml"));
        o.base_network = Ipv4::new("10.0.0.0/30").unwrap();
        let err = generate(&o).unwrap_err();
        assert!(matches!(err, GenError::AddressSpaceExhausted { emitted: 2, .. }));
    }

    #[test]
    fn test_invalid_options_do_not_touch_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut o = opts(dir.path().join("never.xml"));
        o.flush_every = 0;
        assert!(matches!(generate(&o), Err(GenError::Config(_))));
        assert!(!o.out.exists());
    }
}
