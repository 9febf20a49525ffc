//! RSS 2.0 serialization and atomic feed output.
//!
//! The feed document is rebuilt from scratch on every run and contains no
//! volatile fields, so two runs over identical input produce byte-identical
//! output.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

use crate::entry::ParsedEntry;

/// Channel title of the generated feed.
pub const FEED_TITLE: &str = "Project Updates";
/// Channel link (the project the feed describes).
pub const FEED_LINK: &str = "https://github.com/USER/REPO";
/// Channel description.
pub const FEED_DESCRIPTION: &str = "RSS feed ordered by priority then date";
/// Base URL each item link is built from; the original filename is appended.
pub const ITEM_LINK_BASE: &str = "https://github.com/USER/REPO/blob/main/";

/// Builds the display title for a feed item.
///
/// Format: priority prefix, ISO date, identifier, space-joined. An empty
/// identifier leaves a trailing space after the date.
pub fn item_title(entry: &ParsedEntry) -> String {
    let prefix = if entry.is_alert { "[ALERT]" } else { "[POST]" };
    format!(
        "{} {} {}",
        prefix,
        entry.date.format("%Y-%m-%d"),
        entry.identifier
    )
}

/// Formats an entry date as an RFC 2822 publication timestamp.
///
/// Filenames carry no time-of-day or zone, so the date is pinned to
/// midnight UTC to keep output identical across machines.
fn pub_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN).and_utc().to_rfc2822()
}

/// Serializes the sorted entries as a complete RSS 2.0 document.
///
/// Each entry becomes an `<item>` with its original filename as a
/// non-permalink `<guid>`, a title from [`item_title`], a link built from
/// [`ITEM_LINK_BASE`], and a `<pubDate>`. Text content is XML-escaped by
/// the writer.
pub fn render_feed(entries: &[ParsedEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .context("Failed to write XML declaration")?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    writer
        .write_event(Event::Start(rss))
        .context("Failed to write rss element")?;
    writer
        .write_event(Event::Start(BytesStart::new("channel")))
        .context("Failed to write channel element")?;

    write_text_element(&mut writer, "title", FEED_TITLE)?;
    write_text_element(&mut writer, "link", FEED_LINK)?;
    write_text_element(&mut writer, "description", FEED_DESCRIPTION)?;

    for entry in entries {
        writer
            .write_event(Event::Start(BytesStart::new("item")))
            .context("Failed to write item element")?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "false"));
        writer
            .write_event(Event::Start(guid))
            .context("Failed to write guid element")?;
        writer
            .write_event(Event::Text(BytesText::new(&entry.original_name)))
            .context("Failed to write guid text")?;
        writer
            .write_event(Event::End(BytesEnd::new("guid")))
            .context("Failed to write guid end")?;

        write_text_element(&mut writer, "title", &item_title(entry))?;
        write_text_element(
            &mut writer,
            "link",
            &format!("{}{}", ITEM_LINK_BASE, entry.original_name),
        )?;
        write_text_element(&mut writer, "pubDate", &pub_date(entry.date))?;

        writer
            .write_event(Event::End(BytesEnd::new("item")))
            .context("Failed to write item end")?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("channel")))
        .context("Failed to write channel end")?;
    writer
        .write_event(Event::End(BytesEnd::new("rss")))
        .context("Failed to write rss end")?;

    let result = writer.into_inner().into_inner();
    String::from_utf8(result).context("Generated feed contains invalid UTF-8")
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .with_context(|| format!("Failed to write {} element", tag))?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .with_context(|| format!("Failed to write {} text", tag))?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .with_context(|| format!("Failed to write {} end", tag))?;
    Ok(())
}

/// Writes the feed document to `path` atomically.
///
/// Serializes the entries, writes to a temporary file in the same
/// directory, syncs to disk, then renames over the destination. The
/// destination is either the previous feed or the new one, never a partial
/// write. Any existing file is replaced wholesale.
pub fn write_feed(entries: &[ParsedEntry], path: &Path) -> Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let content = render_feed(entries)?;

    // Randomized temp filename to prevent TOCTOU race conditions
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = path.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions",
                temp_path.display()
            )
        })?;

    std::io::Write::write_all(&mut file, content.as_bytes()).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to write feed to temporary file '{}'",
            temp_path.display()
        )
    })?;

    file.sync_all().with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to sync temporary file '{}' to disk",
            temp_path.display()
        )
    })?;

    drop(file);

    // On Windows, rename fails if the destination exists
    #[cfg(windows)]
    if path.exists() {
        std::fs::remove_file(path).with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!(
                "Failed to remove existing '{}' before atomic replace",
                path.display()
            )
        })?;
    }

    std::fs::rename(&temp_path, path).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}'",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}
