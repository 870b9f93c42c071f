//! Fixed document segments surrounding the generated entries.
//!
//! Two shapes are produced: a full Panorama export (management config, shared
//! address/rulebase, device groups) and a minimal one holding only the shared
//! address list and a single device-group post-rulebase.

/// Full export skeleton, optionally annotated with `<!-- injected -->` markers.
#[derive(Debug, Clone, Copy)]
pub struct PanoramaExport {
    pub annotate: bool,
}

const EXPORT_HEADER: &str = r#"<?xml version="1.0"?>
<config version="11.2.0" urldb="paloaltonetworks" detail-version="11.2.10">
  <mgt-config>
    <devices/>
    <users>
      <entry name="admin">
        <permissions>
          <role-based>
            <superuser>yes</superuser>
          </role-based>
        </permissions>
      </entry>
    </users>
    <password-complexity>
      <enabled>yes</enabled>
      <minimum-length>8</minimum-length>
    </password-complexity>
  </mgt-config>

  <shared>
"#;

const SHARED_RULES_OPEN: &str = r#"    <pre-rulebase>
      <security>
        <rules>
"#;

const SHARED_RULES_CLOSE: &str = r#"        </rules>
      </security>
    </pre-rulebase>

"#;

const SHARED_PLACEHOLDERS: &str = r#"    <tag/>
    <address-group/>
    <service/>
    <post-rulebase/>
  </shared>
"#;

const DEVICE_GROUP_CLOSE: &str = r#"              </rules>
            </security>
          </pre-rulebase>
          <post-rulebase/>
          <address/>
          <address-group/>
        </entry>
      </device-group>
      <template/>
      <template-stack/>
      <log-collector/>
      <log-collector-group/>
    </entry>
  </devices>
"#;

const EXPORT_FOOTER: &str = "</config>\n";

impl PanoramaExport {
    /// Everything up to and including the shared `<address>` open tag.
    pub fn header(&self) -> String {
        let mut s = String::from(EXPORT_HEADER);
        if self.annotate {
            s.push_str("    <!-- injected: address objects -->\n");
        }
        s.push_str("    <address>\n");
        s
    }

    /// Closes the address list and opens the shared pre-rulebase rules.
    pub fn address_to_rules(&self) -> String {
        let mut s = String::from("    </address>\n\n");
        if self.annotate {
            s.push_str("    <!-- injected: shared pre-rulebase rules -->\n");
        }
        s.push_str(SHARED_RULES_OPEN);
        s
    }

    /// Closes the shared rules and the `<shared>` section.
    pub fn shared_close(&self) -> String {
        let mut s = String::from(SHARED_RULES_CLOSE);
        if self.annotate {
            s.push_str("    <!-- minimal placeholders seen in many exports -->\n");
        }
        s.push_str(SHARED_PLACEHOLDERS);
        s
    }

    /// Opens `<devices>` down to the pre-rulebase rules of device group `dg`.
    pub fn device_group_open(&self, dg: &str) -> String {
        format!(
            r#"
  <devices>
    <entry name="localhost.localdomain">
      <deviceconfig>
        <system>
          <hostname>synthetic-panorama</hostname>
          <timezone>US/Central</timezone>
        </system>
      </deviceconfig>
      <device-group>
        <entry name="{dg}">
          <devices/>
          <pre-rulebase>
            <security>
              <rules>
"#
        )
    }

    pub fn device_group_close(&self) -> &'static str {
        DEVICE_GROUP_CLOSE
    }

    pub fn footer(&self) -> &'static str {
        EXPORT_FOOTER
    }
}

/// Minimal skeleton: shared addresses plus one device-group post-rulebase.
pub mod minimal {
    pub const HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<config>
  <shared>
    <address>
"#;

    /// Closes the shared addresses and opens the rules of device group `dg`.
    pub fn address_to_rules(dg: &str) -> String {
        format!(
            r#"    </address>
  </shared>
  <devices>
    <entry name="localhost.localdomain">
      <device-group>
        <entry name="{dg}">
          <post-rulebase>
            <security>
              <rules>
"#
        )
    }

    pub const FOOTER: &str = r#"              </rules>
            </security>
          </post-rulebase>
        </entry>
      </device-group>
    </entry>
  </devices>
</config>
"#;
}
