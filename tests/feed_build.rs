//! End-to-end tests for the scan → sort → serialize pipeline.
//!
//! Each test works against its own scratch directory under the system temp
//! dir, populated with filename-tagged files, and inspects the generated
//! RSS document.

use std::path::PathBuf;

use feedbuild::{feed, scan};

fn scratch_dir(label: &str) -> PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!("feedbuild_it_{}_{:016x}", label, nanos));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn populate(dir: &PathBuf, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), b"content").unwrap();
    }
}

/// Returns the guid values in document order.
fn guids(xml: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = xml;
    while let Some(start) = rest.find("<guid isPermaLink=\"false\">") {
        let after = &rest[start + "<guid isPermaLink=\"false\">".len()..];
        let end = after.find("</guid>").expect("unterminated guid");
        out.push(after[..end].to_string());
        rest = &after[end..];
    }
    out
}

#[test]
fn feed_orders_alerts_first_then_posts_by_date() {
    let dir = scratch_dir("order");
    populate(
        &dir,
        &[
            "alert09082025emergency.txt",
            "post01012025.txt",
            "post01022025.md",
        ],
    );

    let entries = scan::collect_entries(&dir).unwrap();
    let output = dir.join(scan::OUTPUT_FILENAME);
    feed::write_feed(&entries, &output).unwrap();

    let xml = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        guids(&xml),
        vec![
            "alert09082025emergency.txt",
            "post01022025.md",
            "post01012025.txt",
        ]
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unmatched_and_invalid_date_files_are_excluded() {
    let dir = scratch_dir("excluded");
    populate(
        &dir,
        &["random.txt", "alert13322025.txt", "post01012025ok.txt"],
    );

    let entries = scan::collect_entries(&dir).unwrap();
    let xml = feed::render_feed(&entries).unwrap();

    assert!(!xml.contains("random.txt"));
    assert!(!xml.contains("alert13322025.txt"));
    assert!(xml.contains("post01012025ok.txt"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn rerun_over_unchanged_input_is_byte_identical() {
    let dir = scratch_dir("idempotent");
    populate(
        &dir,
        &["alert09082025emergency.txt", "post01012025.txt"],
    );
    let output = dir.join(scan::OUTPUT_FILENAME);

    let entries = scan::collect_entries(&dir).unwrap();
    feed::write_feed(&entries, &output).unwrap();
    let first = std::fs::read(&output).unwrap();

    // Second run also proves the generated feed itself is excluded from
    // the scan rather than becoming a feed item.
    let entries = scan::collect_entries(&dir).unwrap();
    feed::write_feed(&entries, &output).unwrap();
    let second = std::fs::read(&output).unwrap();

    assert_eq!(first, second);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn empty_directory_yields_feed_with_no_items() {
    let dir = scratch_dir("no_items");

    let entries = scan::collect_entries(&dir).unwrap();
    let output = dir.join(scan::OUTPUT_FILENAME);
    feed::write_feed(&entries, &output).unwrap();

    let xml = std::fs::read_to_string(&output).unwrap();
    assert!(xml.contains("<channel>"));
    assert!(!xml.contains("<item>"));

    std::fs::remove_dir_all(&dir).unwrap();
}
