//! Entry block formatting.
//!
//! Each function returns one complete block, newline terminated, so the
//! emitter can write it in a single call.

use std::net::Ipv4Addr;

/// Members of a traffic-selector field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Members {
    /// `<member>any</member>` on one line.
    Any,
    /// One `<member>` line per name. Empty renders an empty element.
    Named(Vec<String>),
}

/// Address object name, `<prefix>-<dotted quad>`.
pub fn object_name(prefix: &str, ip: Ipv4Addr) -> String {
    format!("{prefix}-{ip}")
}

fn line(buf: &mut String, indent: usize, text: &str) {
    buf.extend(std::iter::repeat(' ').take(indent));
    buf.push_str(text);
    buf.push('\n');
}

/// Shared address entry holding a single host.
pub fn address_entry(prefix: &str, ip: Ipv4Addr) -> String {
    format!(
        "      <entry name=\"{name}\"><ip-netmask>{ip}</ip-netmask></entry>\n",
        name = object_name(prefix, ip)
    )
}

/// Any/any allow rule used by the minimal skeleton.
pub fn basic_rule(name: &str) -> String {
    let mut s = String::with_capacity(512);
    line(&mut s, 16, &format!("<entry name=\"{name}\">"));
    for field in ["from", "to", "source", "destination", "application", "service"] {
        line(&mut s, 18, &format!("<{field}><member>any</member></{field}>"));
    }
    line(&mut s, 18, "<action>allow</action>");
    line(&mut s, 16, "</entry>");
    s
}

fn members(buf: &mut String, indent: usize, field: &str, members: &Members) {
    match members {
        Members::Any => line(buf, indent, &format!("<{field}><member>any</member></{field}>")),
        Members::Named(names) => {
            line(buf, indent, &format!("<{field}>"));
            for name in names {
                line(buf, indent + 2, &format!("<member>{name}</member>"));
            }
            line(buf, indent, &format!("</{field}>"));
        }
    }
}

/// Security pre-rule as found in full exports.
///
/// `indent` is the column of the `<entry>` tag: 10 for shared rules, 16 for
/// device-group rules.
pub fn security_rule(
    name: &str,
    indent: usize,
    source: &Members,
    destination: &Members,
) -> String {
    let body = indent + 2;
    let mut s = String::with_capacity(768);
    line(&mut s, indent, &format!("<entry name=\"{name}\">"));
    line(&mut s, body, "<target><negate>no</negate></target>");
    line(&mut s, body, "<to><member>any</member></to>");
    line(&mut s, body, "<from><member>any</member></from>");
    members(&mut s, body, "source", source);
    members(&mut s, body, "destination", destination);
    line(&mut s, body, "<source-user><member>any</member></source-user>");
    line(&mut s, body, "<category><member>any</member></category>");
    line(&mut s, body, "<application><member>any</member></application>");
    line(
        &mut s,
        body,
        "<service><member>application-default</member></service>",
    );
    line(&mut s, body, "<action>allow</action>");
    line(&mut s, body, "<log-start>no</log-start>");
    line(&mut s, body, "<log-end>yes</log-end>");
    line(&mut s, indent, "</entry>");
    s
}
