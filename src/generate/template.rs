//! Size-targeted generator using the full export skeleton.
//!
//! When a device group is requested a fixed slice of the target is held back
//! for it. That reservation is best effort: device-group rules fill up to the
//! overall target, so a large skeleton or an already reached target simply
//! means fewer (possibly zero) device-group rules.

use super::{
    check_flush_every, check_name, check_size, close_output, elapsed_since, fill_threshold,
    Summary, Variant,
};
use crate::emitter::{run_phase, Limit, Phase, SizedWriter};
use crate::error::Result;
use crate::models::Ipv4;
use crate::output::skeleton::PanoramaExport;
use crate::output::xml::{address_entry, security_rule, Members};
use std::path::PathBuf;
use std::time::Instant;

/// Bytes held back for the device-group section.
pub const DEVICE_GROUP_RESERVE: u64 = 512 * 1024;
const RULE_FLUSH_EVERY: u64 = 1000;

#[derive(Debug, Clone)]
pub struct TemplateOptions {
    pub out: PathBuf,
    pub target_bytes: u64,
    pub addr_fill_percent: f64,
    pub base_network: Ipv4,
    pub addr_prefix: String,
    pub shared_rule_prefix: String,
    pub include_dg: bool,
    pub dg: String,
    pub dg_rule_prefix: String,
    pub flush_every: u64,
    pub max_entries: u64,
}

impl TemplateOptions {
    pub fn validate(&self) -> Result<()> {
        check_size(self.target_bytes, self.addr_fill_percent)?;
        check_flush_every(self.flush_every)?;
        check_name("--addr-prefix", &self.addr_prefix)?;
        check_name("--shared-rule-prefix", &self.shared_rule_prefix)?;
        if self.include_dg {
            check_name("--dg", &self.dg)?;
            check_name("--dg-rule-prefix", &self.dg_rule_prefix)?;
        }
        Ok(())
    }

    /// Byte threshold for the shared rules.
    pub fn shared_rules_target(&self) -> u64 {
        if self.include_dg {
            self.target_bytes.saturating_sub(DEVICE_GROUP_RESERVE)
        } else {
            self.target_bytes
        }
    }
}

pub fn generate(opts: &TemplateOptions) -> Result<Summary> {
    opts.validate()?;
    let started = Instant::now();
    let addr_target = fill_threshold(opts.target_bytes, opts.addr_fill_percent);
    let skeleton = PanoramaExport { annotate: true };
    log::info!(
        "#Start template: {} target {} bytes ({} for addresses, device group {})",
        opts.out.display(),
        opts.target_bytes,
        addr_target,
        if opts.include_dg { opts.dg.as_str() } else { "off" }
    );

    let mut hosts = opts.base_network.hosts();
    let mut out = SizedWriter::create(&opts.out)?;
    out.write_str(&skeleton.header())?;

    let addr_phase = Phase::new(
        "address",
        Limit::Bytes(addr_target),
        opts.flush_every,
        opts.max_entries,
    );
    let address_objects = run_phase(&mut out, &addr_phase, |_| {
        Ok(address_entry(&opts.addr_prefix, hosts.next_host()?))
    })?;

    out.write_str(&skeleton.address_to_rules())?;

    let shared_phase = Phase::new(
        "shared rules",
        Limit::Bytes(opts.shared_rules_target()),
        RULE_FLUSH_EVERY,
        opts.max_entries,
    );
    let rules = run_phase(&mut out, &shared_phase, |i| {
        let name = format!("{} {}", opts.shared_rule_prefix, i + 1);
        Ok(security_rule(&name, 10, &Members::Any, &Members::Any))
    })?;

    out.write_str(&skeleton.shared_close())?;

    let dg_rules = if opts.include_dg {
        out.write_str(&skeleton.device_group_open(&opts.dg))?;
        let dg_phase = Phase::new(
            "device-group rules",
            Limit::Bytes(opts.target_bytes),
            RULE_FLUSH_EVERY,
            opts.max_entries,
        );
        let prefix = format!("{}-{}", opts.dg_rule_prefix, opts.dg);
        let count = run_phase(&mut out, &dg_phase, |i| {
            let name = format!("{prefix} {}", i + 1);
            Ok(security_rule(&name, 16, &Members::Any, &Members::Any))
        })?;
        if count == 0 {
            log::warn!(
                "Device group '{}' got no rules, target already reached by shared content",
                opts.dg
            );
        }
        out.write_str(skeleton.device_group_close())?;
        Some(count)
    } else {
        None
    };

    out.write_str(skeleton.footer())?;
    let bytes = close_output(out, &opts.out)?;
    let (elapsed_secs, finished_at) = elapsed_since(started);

    Ok(Summary {
        variant: Variant::Template,
        file: opts.out.clone(),
        bytes,
        target_bytes: Some(opts.target_bytes),
        base_network: opts.base_network,
        address_objects,
        rules,
        dg_rules,
        src_members: None,
        dst_members: None,
        elapsed_secs,
        finished_at,
    })
}
