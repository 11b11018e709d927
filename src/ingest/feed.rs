// src/ingest/feed.rs
//! RSS 2.0 decoding: `rss > channel > item*` into [`DealRecord`]s.

use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::error::FeedError;
use crate::ingest::types::DealRecord;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item")]
    item: Vec<Item>,
}

// Every field is a list so a repeated element doesn't fail the whole
// document; the first value wins.
#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: Vec<String>,
    #[serde(default)]
    link: Vec<String>,
    #[serde(default)]
    description: Vec<String>,
    #[serde(rename = "pubDate", default)]
    pub_date: Vec<String>,
    #[serde(default)]
    guid: Vec<Guid>,
}

#[derive(Debug, Deserialize)]
struct Guid {
    #[serde(rename = "$text", default)]
    value: Option<String>,
    #[serde(rename = "@isPermaLink", default)]
    is_perma_link: Option<String>,
}

/// Decode a feed document into records, in document order.
///
/// All-or-nothing: the first item missing a required element fails the
/// whole call and no records are returned.
pub fn decode_feed(xml: &str) -> Result<Vec<DealRecord>, FeedError> {
    let t0 = std::time::Instant::now();
    let xml_clean = scrub_html_entities_for_xml(xml);
    let rss: Rss = from_str(&xml_clean).inspect_err(|_| {
        counter!("deals_decode_errors_total").increment(1);
    })?;

    let mut out = Vec::with_capacity(rss.channel.item.len());
    for (index, it) in rss.channel.item.into_iter().enumerate() {
        let record = revive(index, it).inspect_err(|e| {
            tracing::debug!(error = %e, "rejecting feed");
            counter!("deals_decode_errors_total").increment(1);
        })?;
        out.push(record);
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("deals_decode_ms").record(ms);
    counter!("deals_items_total").increment(out.len() as u64);
    Ok(out)
}

fn revive(index: usize, it: Item) -> Result<DealRecord, FeedError> {
    let first = |values: Vec<String>, field: &'static str| {
        values
            .into_iter()
            .next()
            .ok_or(FeedError::MissingField { index, field })
    };

    let title = first(it.title, "title")?;
    let link = first(it.link, "link")?;
    let description = first(it.description, "description")?;
    let published_at = first(it.pub_date, "pubDate")?;

    let guid = it
        .guid
        .into_iter()
        .next()
        .ok_or(FeedError::MissingField { index, field: "guid" })?;
    let identity = guid
        .value
        .filter(|v| !v.is_empty())
        .ok_or(FeedError::MissingField { index, field: "guid" })?;
    let is_perma_link = guid.is_perma_link.ok_or(FeedError::MissingField {
        index,
        field: "guid@isPermaLink",
    })?;

    Ok(DealRecord {
        title,
        link,
        description,
        published_at,
        identity,
        identity_is_permanent_link: is_perma_link == "true",
    })
}

/// Forum feeds leak HTML entities that XML doesn't define.
///
/// CDATA sections are copied through untouched; their content is already
/// literal text.
fn scrub_html_entities_for_xml(s: &str) -> String {
    const CDATA_OPEN: &str = "<![CDATA[";
    const CDATA_CLOSE: &str = "]]>";

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find(CDATA_OPEN) {
        out.push_str(&scrub_entities(&rest[..start]));
        let section = &rest[start..];
        match section.find(CDATA_CLOSE) {
            Some(end) => {
                let end = end + CDATA_CLOSE.len();
                out.push_str(&section[..end]);
                rest = &section[end..];
            }
            // unterminated: leave it for the XML parser to reject
            None => {
                out.push_str(section);
                return out;
            }
        }
    }
    out.push_str(&scrub_entities(rest));
    out
}

fn scrub_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&hellip;", "...")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
