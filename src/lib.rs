//! feedbuild — turns a directory of filename-tagged files into an RSS feed.
//!
//! Files named `<alert|post><MMDDYYYY><optional text>` become feed items;
//! everything else is ignored. Alerts sort before posts, newest first
//! within each group, and the result is written to `rss.xml`.
//!
//! The pipeline is a single pass: directory listing → parsed records →
//! stable sort → serialized feed.
//!
//! - [`entry`] - Filename parsing into structured records
//! - [`scan`] - Directory scan, exclusion filtering, and sort policy
//! - [`feed`] - RSS 2.0 serialization and atomic file output

pub mod entry;
pub mod feed;
pub mod scan;
