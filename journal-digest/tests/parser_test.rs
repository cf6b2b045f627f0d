mod common;

use common::init_tracing;
use journal_digest::formatter::normalize_date;
use journal_digest::parser::FeedParser;
use journal_digest::{DigestError, EntryFields, RawEntry, TextField};

const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Genome Letters</title>
    <link>https://journal.example.org</link>
    <description>Latest articles</description>
    <item>
      <title>Tumour genome atlas</title>
      <link>https://journal.example.org/articles/1?rss=1</link>
      <description>Short abstract of the atlas</description>
      <content:encoded>Full body of the atlas article</content:encoded>
      <pubDate>Mon, 06 Sep 2021 16:45:00 +0000</pubDate>
    </item>
    <item>
      <title>Sequencing methods review</title>
      <link>https://journal.example.org/articles/2</link>
      <content:encoded>Only a full body here</content:encoded>
    </item>
  </channel>
</rss>"#;

#[test]
fn test_rss_document_maps_to_raw_entries() {
    init_tracing();

    let parsed = FeedParser::parse_feed(SAMPLE_RSS).unwrap();
    assert_eq!(parsed.title.as_deref(), Some("Genome Letters"));
    assert_eq!(parsed.entries.len(), 2);

    let first = &parsed.entries[0];
    assert_eq!(first.title.as_deref(), Some("Tumour genome atlas"));
    // The summary element wins over the full content.
    assert_eq!(first.summary.as_deref(), Some("Short abstract of the atlas"));
    assert_eq!(
        first.link.as_deref(),
        Some("https://journal.example.org/articles/1?rss=1")
    );
    let published = first.published.as_deref().unwrap();
    assert_eq!(normalize_date(published).unwrap(), "September 06, 2021");

    let second = &parsed.entries[1];
    assert_eq!(second.summary.as_deref(), Some("Only a full body here"));
    assert_eq!(second.published, None);
    assert_eq!(second.identifier(), Some("https://journal.example.org/articles/2"));
}

#[test]
fn test_unparseable_document_is_parse_error() {
    let err = FeedParser::parse_feed("this is not a feed").unwrap_err();
    assert!(matches!(err, DigestError::Parse(_)));
}

#[test]
fn test_detail_value_wins_over_plain() {
    let fields = EntryFields {
        title: TextField {
            detail: Some("Detailed title".to_string()),
            plain: Some("Plain title".to_string()),
        },
        summary: TextField {
            detail: Some("<p>Detailed summary</p>".to_string()),
            plain: Some("Plain summary".to_string()),
        },
        link: Some("https://journal.example.org/a".to_string()),
        published: None,
    };

    let entry = RawEntry::from(fields);
    assert_eq!(entry.title.as_deref(), Some("Detailed title"));
    assert_eq!(entry.summary.as_deref(), Some("<p>Detailed summary</p>"));
}

#[test]
fn test_plain_value_used_when_detail_missing() {
    let fields = EntryFields {
        title: TextField::plain("Plain title"),
        summary: TextField::plain("Plain summary"),
        ..Default::default()
    };

    let entry = RawEntry::from(fields);
    assert_eq!(entry.title.as_deref(), Some("Plain title"));
    assert_eq!(entry.summary.as_deref(), Some("Plain summary"));
    assert_eq!(entry.link, None);
}

#[test]
fn test_blank_fields_are_treated_as_absent() {
    let fields = EntryFields {
        title: TextField::detail("  "),
        summary: TextField::default(),
        link: Some("".to_string()),
        published: Some(" ".to_string()),
    };

    let entry = RawEntry::from(fields);
    assert_eq!(entry.title, None);
    assert_eq!(entry.link, None);
    assert_eq!(entry.published, None);
    assert_eq!(entry.identifier(), None);
}
