//! Command line interface.
//!
//! Every option can also come from a `PANGEN_*` environment variable; `main`
//! loads a `.env` file first so those can live next to the binary.

use crate::error::{GenError, Result};
use crate::generate::{MassiveOptions, NamedOptions, TemplateOptions, DEFAULT_MAX_ENTRIES};
use crate::models::Ipv4;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "panorama-config-gen", version)]
#[command(about = "Generate large Panorama-export-shaped XML configs for stress testing")]
pub struct Cli {
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// log4rs YAML config, used when the file exists
    #[arg(long, global = true, env = "PANGEN_LOG_CONFIG", default_value = "log4rs.yml")]
    pub log_config: PathBuf,

    /// Print the run summary as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Abort a phase that reaches this many entries without meeting its target.
    /// Also caps explicit counts: --addr-count, --rules and --dg-rules above it fail
    #[arg(
        long,
        global = true,
        env = "PANGEN_MAX_ENTRIES",
        default_value_t = DEFAULT_MAX_ENTRIES
    )]
    pub max_entries: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Size-targeted config with minimal skeleton and any/any rules
    Named(NamedArgs),
    /// Count-driven config whose rules reference many address objects
    Massive(MassiveArgs),
    /// Size-targeted config from a full Panorama export skeleton
    Template(TemplateArgs),
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output XML file
    #[arg(long, env = "PANGEN_OUT")]
    pub out: PathBuf,

    /// IPv4 network to allocate addresses from
    #[arg(long, env = "PANGEN_BASE_NETWORK", default_value = "10.0.0.0/8")]
    pub base_network: Ipv4,

    /// Address object name prefix (name includes the IP)
    #[arg(long, env = "PANGEN_ADDR_PREFIX", default_value = "test-addr_obj")]
    pub addr_prefix: String,

    /// Flush interval for address objects (entries)
    #[arg(long, env = "PANGEN_FLUSH_EVERY", default_value_t = 2000)]
    pub flush_every: u64,
}

#[derive(Args, Debug)]
pub struct SizeArgs {
    /// Target size in MB
    #[arg(long, env = "PANGEN_SIZE_MB", default_value_t = 25.0)]
    pub size_mb: f64,

    /// Percent of target size used for address objects before rules
    #[arg(long, env = "PANGEN_ADDR_FILL_PERCENT", default_value_t = 70.0)]
    pub addr_fill_percent: f64,
}

impl SizeArgs {
    pub fn target_bytes(&self) -> Result<u64> {
        if !self.size_mb.is_finite() || self.size_mb <= 0.0 {
            return Err(GenError::Config(format!(
                "--size-mb must be > 0, got {}",
                self.size_mb
            )));
        }
        Ok((self.size_mb * 1024.0 * 1024.0) as u64)
    }
}

#[derive(Args, Debug)]
pub struct NamedArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub size: SizeArgs,

    /// Device group name
    #[arg(long, env = "PANGEN_DG", default_value = "DG_TEST")]
    pub dg: String,

    /// Security rule name prefix
    #[arg(long, env = "PANGEN_RULE_PREFIX", default_value = "test-rule")]
    pub rule_prefix: String,

    /// Cap on address objects (0 = no cap)
    #[arg(long, env = "PANGEN_MAX_ADDRS", default_value_t = 0)]
    pub max_addrs: u64,
}

impl NamedArgs {
    pub fn options(&self, max_entries: u64) -> Result<NamedOptions> {
        Ok(NamedOptions {
            out: self.output.out.clone(),
            target_bytes: self.size.target_bytes()?,
            addr_fill_percent: self.size.addr_fill_percent,
            base_network: self.output.base_network,
            dg: self.dg.clone(),
            addr_prefix: self.output.addr_prefix.clone(),
            rule_prefix: self.rule_prefix.clone(),
            flush_every: self.output.flush_every,
            max_addrs: (self.max_addrs > 0).then_some(self.max_addrs),
            max_entries,
        })
    }
}

#[derive(Args, Debug)]
pub struct DeviceGroupArgs {
    /// Also generate device-group rules
    #[arg(long, env = "PANGEN_INCLUDE_DG")]
    pub include_dg: bool,

    /// Device group name if --include-dg
    #[arg(long, env = "PANGEN_DG", default_value = "dg-test")]
    pub dg: String,

    /// Device-group rule name prefix
    #[arg(long, env = "PANGEN_DG_RULE_PREFIX", default_value = "test rule dg")]
    pub dg_rule_prefix: String,
}

#[derive(Args, Debug)]
pub struct MassiveArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// How many address objects to generate
    #[arg(long, env = "PANGEN_ADDR_COUNT", default_value_t = 200_000)]
    pub addr_count: u64,

    /// How many shared rules to generate
    #[arg(long, env = "PANGEN_RULES", default_value_t = 100_000)]
    pub rules: u64,

    /// Source members per rule
    #[arg(long, env = "PANGEN_SRC_MEMBERS", default_value_t = 10)]
    pub src_members: u64,

    /// Destination members per rule
    #[arg(long, env = "PANGEN_DST_MEMBERS", default_value_t = 10)]
    pub dst_members: u64,

    /// Shared rule name prefix
    #[arg(long, env = "PANGEN_SHARED_RULE_PREFIX", default_value = "test rule shared")]
    pub shared_rule_prefix: String,

    #[command(flatten)]
    pub device_group: DeviceGroupArgs,

    /// Device-group rules (0 = a tenth of --rules)
    #[arg(long, env = "PANGEN_DG_RULES", default_value_t = 0)]
    pub dg_rules: u64,
}

impl MassiveArgs {
    pub fn options(&self, max_entries: u64) -> MassiveOptions {
        MassiveOptions {
            out: self.output.out.clone(),
            base_network: self.output.base_network,
            addr_prefix: self.output.addr_prefix.clone(),
            addr_count: self.addr_count,
            rules: self.rules,
            src_members: self.src_members,
            dst_members: self.dst_members,
            shared_rule_prefix: self.shared_rule_prefix.clone(),
            include_dg: self.device_group.include_dg,
            dg: self.device_group.dg.clone(),
            dg_rules: self.dg_rules,
            dg_rule_prefix: self.device_group.dg_rule_prefix.clone(),
            flush_every: self.output.flush_every,
            max_entries,
        }
    }
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub size: SizeArgs,

    /// Shared rule name prefix
    #[arg(long, env = "PANGEN_SHARED_RULE_PREFIX", default_value = "test rule shared")]
    pub shared_rule_prefix: String,

    #[command(flatten)]
    pub device_group: DeviceGroupArgs,
}

impl TemplateArgs {
    pub fn options(&self, max_entries: u64) -> Result<TemplateOptions> {
        Ok(TemplateOptions {
            out: self.output.out.clone(),
            target_bytes: self.size.target_bytes()?,
            addr_fill_percent: self.size.addr_fill_percent,
            base_network: self.output.base_network,
            addr_prefix: self.output.addr_prefix.clone(),
            shared_rule_prefix: self.shared_rule_prefix.clone(),
            include_dg: self.device_group.include_dg,
            dg: self.device_group.dg.clone(),
            dg_rule_prefix: self.device_group.dg_rule_prefix.clone(),
            flush_every: self.output.flush_every,
            max_entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_defaults() {
        let cli = Cli::try_parse_from(["panorama-config-gen", "named", "--out", "x.xml"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.json);
        let Command::Named(args) = cli.command else {
            panic!("expected named");
        };
        let opts = args.options(cli.max_entries).unwrap();
        assert_eq!(opts.target_bytes, 25 * 1024 * 1024);
        assert_eq!(opts.addr_fill_percent, 70.0);
        assert_eq!(opts.base_network.to_string(), "10.0.0.0/8");
        assert_eq!(opts.dg, "DG_TEST");
        assert_eq!(opts.rule_prefix, "test-rule");
        assert_eq!(opts.max_addrs, None);
        assert_eq!(opts.max_entries, DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn test_massive_flags() {
        let cli = Cli::try_parse_from([
            "panorama-config-gen",
            "-vv",
            "massive",
            "--out",
            "big.xml",
            "--addr-count",
            "500",
            "--src-members",
            "25",
            "--include-dg",
            "--dg",
            "dg-3",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        let Command::Massive(args) = cli.command else {
            panic!("expected massive");
        };
        let opts = args.options(7);
        assert_eq!(opts.addr_count, 500);
        assert_eq!(opts.src_members, 25);
        assert_eq!(opts.dst_members, 10);
        assert!(opts.include_dg);
        assert_eq!(opts.dg, "dg-3");
        assert_eq!(opts.dg_rule_prefix, "test rule dg");
        assert_eq!(opts.max_entries, 7);
    }

    #[test]
    fn test_max_entries_help_mentions_explicit_counts() {
        use clap::CommandFactory;
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("--max-entries"));
        assert!(help.contains("Also caps explicit counts"));
    }

    #[test]
    fn test_negative_counts_rejected_by_parser() {
        let res = Cli::try_parse_from([
            "panorama-config-gen",
            "massive",
            "--out",
            "x.xml",
            "--rules",
            "-1",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_bad_network_rejected_by_parser() {
        let res = Cli::try_parse_from([
            "panorama-config-gen",
            "template",
            "--out",
            "x.xml",
            "--base-network",
            "10.0.0.0/40",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_size_mb_must_be_positive() {
        let cli = Cli::try_parse_from([
            "panorama-config-gen",
            "template",
            "--out",
            "x.xml",
            "--size-mb",
            "0",
        ])
        .unwrap();
        let Command::Template(args) = cli.command else {
            panic!("expected template");
        };
        assert!(matches!(args.options(1), Err(GenError::Config(_))));
    }

    #[test]
    fn test_max_addrs_zero_means_no_cap() {
        let cli = Cli::try_parse_from([
            "panorama-config-gen",
            "named",
            "--out",
            "x.xml",
            "--max-addrs",
            "12",
        ])
        .unwrap();
        let Command::Named(args) = cli.command else {
            panic!("expected named");
        };
        assert_eq!(args.options(1).unwrap().max_addrs, Some(12));
    }
}
