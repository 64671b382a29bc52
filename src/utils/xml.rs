//! XML text helpers for hand-built documents.
//!
//! The sitemap generator writes its document with plain string pushes, so
//! escaping lives here: entity escaping for text nodes, CDATA wrapping for
//! payloads that must survive embedded markup, and URL escaping for `<loc>`.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::borrow::Cow;

/// Escape special XML characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
pub fn escape(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

/// Wrap text in a CDATA section.
///
/// An embedded `]]>` would close the section early, so it is split across
/// two adjacent sections. No other escaping is applied.
pub fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}

/// Characters percent-encoded inside `<loc>` URLs.
///
/// Controls plus the characters that are unsafe in a URL embedded in XML;
/// `&` is left to entity escaping so query strings stay readable.
const LOC_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'\\')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'^');

/// Escape a URL for a `<loc>` element: percent-encode unsafe characters,
/// then entity-escape the remainder for XML.
pub fn escape_loc(url: &str) -> String {
    let encoded = utf8_percent_encode(url, LOC_UNSAFE).to_string();
    escape(&encoded).into_owned()
}
