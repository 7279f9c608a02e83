// safelog-core/src/patterns.rs
//! Address detection and scrubbing for a single logical line.
//!
//! One compiled expression recognises every supported address shape together with
//! the bytes around it. The surrounding bytes are what keep look-alikes out: a
//! colon-separated fingerprint such as `33:B6:FA:...` contains an eight-group run
//! that would parse as IPv6, but that run is followed by another `:` and so never
//! satisfies the trailing boundary. A bare IPv6 run may not follow a `:` either;
//! IPv4 and bracketed literals may, since `remote:1.2.3.4` is still a leak.
//!
//! Matching runs on `regex::bytes`, so lines that are not valid UTF-8 are scanned
//! as-is and their non-address bytes pass through untouched.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use lazy_static::lazy_static;
use regex::bytes::{Captures, Regex};
use serde::Serialize;

/// The literal that replaces every scrubbed address.
pub const PLACEHOLDER: &str = "[scrubbed]";

const HEXTET: &str = "[0-9A-Fa-f]{1,4}";
/// A single IPv6 separator, plain or percent-encoded.
const SEPARATOR: &str = "(?::|%3[Aa])";
/// Decimal 0-255, with up to two redundant leading zeros (`010`, `001`).
const OCTET: &str = "0{0,2}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])";
const PORT: &str = ":[0-9]{1,5}";
/// Scope suffix of a link-local literal, `%eth0` or URL-encoded `%25eth0`.
const ZONE: &str = "%[0-9A-Za-z._~%-]+";

fn ipv4_pattern() -> String {
    format!("{o}\\.{o}\\.{o}\\.{o}", o = OCTET)
}

/// IPv6 alternatives in priority order. The embedded-IPv4 forms go first,
/// otherwise `::255.1.2.3` would stop at `::255` and leave the rest behind.
fn ipv6_pattern() -> String {
    let h = HEXTET;
    let s = SEPARATOR;
    let v4 = ipv4_pattern();
    let embedded_full = format!("(?:{h}{s}){{6}}{v4}");
    let embedded_compressed = format!("(?:{h}(?:{s}{h}){{0,4}})?{s}{s}(?:{h}{s}){{0,4}}{v4}");
    let full = format!("(?:{h}{s}){{7}}{h}");
    let compressed = format!("(?:{h}(?:{s}{h}){{0,6}})?{s}{s}(?:{h}(?:{s}{h}){{0,6}})?");
    format!("(?:{embedded_full}|{embedded_compressed}|{full}|{compressed})")
}

/// Builds the full scanning expression.
///
/// Branch order decides ties between matches that start on the same byte:
/// a bracketed literal beats a bare IPv6 run that would treat its `[` as the
/// boundary, and a bare IPv6 run beats an IPv4 branch that would treat the
/// second `:` of `::1.2.3.4` as the boundary. Only the bare IPv6 branch refuses
/// a leading `:`.
fn address_in_context_pattern() -> String {
    let v4 = ipv4_pattern();
    let v6 = ipv6_pattern();
    format!(
        concat!(
            r"(?-u)(?:",
            r"(?:^|[^\w])(?P<br>\[(?P<br_body>{v6})(?P<zone>{zone})?\])",
            r"|(?:^|[^\w:])(?P<v6>{v6})",
            r"|(?:^|[^\w])(?P<v4>{v4})",
            r")(?P<port>{port})?(?::\s|[^\w:]|$)",
        ),
        v4 = v4,
        v6 = v6,
        zone = ZONE,
        port = PORT,
    )
}

lazy_static! {
    static ref ADDRESS_IN_CONTEXT: Regex =
        Regex::new(&address_in_context_pattern()).expect("address pattern must compile");
}

/// The family of a detected address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    Ipv4,
    Ipv6,
    /// IPv4-mapped or IPv4-compatible IPv6 (`::ffff:1.2.3.4`).
    Ipv6EmbeddedIpv4,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AddressKind::Ipv4 => "ipv4",
            AddressKind::Ipv6 => "ipv6",
            AddressKind::Ipv6EmbeddedIpv4 => "ipv6_embedded_ipv4",
        };
        f.write_str(label)
    }
}

/// One address found in a line.
///
/// `range` covers exactly the bytes that get replaced: the brackets of a bracketed
/// literal and any `:port` suffix are inside it, boundary punctuation is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressMatch {
    pub range: Range<usize>,
    pub kind: AddressKind,
    pub bracketed: bool,
    pub has_port: bool,
    pub percent_encoded: bool,
}

impl AddressMatch {
    fn from_captures(line: &[u8], caps: &Captures<'_>) -> Option<Self> {
        let (start, body_end, kind_source) = if let Some(v4) = caps.name("v4") {
            (v4.start(), v4.end(), None)
        } else if let Some(br) = caps.name("br") {
            (br.start(), br.end(), Some(caps.name("br_body")?))
        } else {
            let v6 = caps.name("v6")?;
            (v6.start(), v6.end(), Some(v6))
        };
        let kind = match kind_source {
            None => AddressKind::Ipv4,
            Some(body) if body.as_bytes().contains(&b'.') => AddressKind::Ipv6EmbeddedIpv4,
            Some(_) => AddressKind::Ipv6,
        };
        let port = caps.name("port");
        let end = port.map_or(body_end, |p| p.end());
        let address = match caps.name("zone") {
            Some(zone) => [&line[start..zone.start()], &line[zone.end()..end]].concat(),
            None => line[start..end].to_vec(),
        };
        Some(Self {
            range: start..end,
            kind,
            bracketed: caps.name("br").is_some(),
            has_port: port.is_some(),
            percent_encoded: address.contains(&b'%'),
        })
    }
}

/// Finds every address in `line`, left to right, without overlaps.
///
/// After a match the scan resumes at the end of the address itself, so the byte
/// that closed one address may open the next (`1.2.3.4,5.6.7.8` yields two).
pub fn find_addresses(line: &[u8]) -> Vec<AddressMatch> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos < line.len() {
        let Some(caps) = ADDRESS_IN_CONTEXT.captures_at(line, pos) else {
            break;
        };
        let Some(m) = AddressMatch::from_captures(line, &caps) else {
            break;
        };
        pos = m.range.end;
        found.push(m);
    }
    found
}

/// Returns true if `line` holds at least one address.
pub fn contains_address(line: &[u8]) -> bool {
    ADDRESS_IN_CONTEXT.is_match(line)
}

/// Replaces every address in a byte line with [`PLACEHOLDER`].
pub fn scrub_bytes(line: &[u8]) -> Cow<'_, [u8]> {
    let matches = find_addresses(line);
    if matches.is_empty() {
        return Cow::Borrowed(line);
    }
    let mut out = Vec::with_capacity(line.len());
    let mut last_end = 0;
    for m in &matches {
        out.extend_from_slice(&line[last_end..m.range.start]);
        out.extend_from_slice(PLACEHOLDER.as_bytes());
        last_end = m.range.end;
    }
    out.extend_from_slice(&line[last_end..]);
    Cow::Owned(out)
}

/// Replaces every address in a text line with [`PLACEHOLDER`].
///
/// Match boundaries always sit next to ASCII bytes, so slicing the `str` at them
/// is safe.
pub fn scrub_line(line: &str) -> Cow<'_, str> {
    let matches = find_addresses(line.as_bytes());
    if matches.is_empty() {
        return Cow::Borrowed(line);
    }
    let mut out = String::with_capacity(line.len());
    let mut last_end = 0;
    for m in &matches {
        out.push_str(&line[last_end..m.range.start]);
        out.push_str(PLACEHOLDER);
        last_end = m.range.end;
    }
    out.push_str(&line[last_end..]);
    Cow::Owned(out)
}
