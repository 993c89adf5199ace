//! Response bodies served by the mock news endpoint

use serde_json::json;

/// One article in the JSON wire format
pub fn json_article(id: &str, title: &str, published_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "summary": format!("Summary of {}", title),
        "link": format!("https://medium.com/droidkaigi/{}", id),
        "media": "BLOG",
        "published_at": published_at,
        "localized_contents": {
            "ja": { "title": title, "link": format!("https://medium.com/droidkaigi/{}", id) }
        }
    })
}

/// JSON response body wrapping `articles`
pub fn json_body(articles: Vec<serde_json::Value>) -> String {
    json!({ "articles": articles }).to_string()
}

/// Two articles, a2 newer than a1
pub fn two_article_body() -> String {
    json_body(vec![
        json_article("a1", "Call for speakers", "2021-07-01T10:00:00Z"),
        json_article("a2", "Timetable published", "2021-07-02T10:00:00Z"),
    ])
}

/// RSS 2.0 feed with two items, the second one carrying an image enclosure
pub const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>DroidKaigi Blog</title>
    <link>https://medium.com/droidkaigi</link>
    <description>Conference news</description>
    <item>
      <title>Call for speakers</title>
      <link>https://medium.com/droidkaigi/cfp</link>
      <guid>cfp-2021</guid>
      <description>Submit your talk</description>
      <pubDate>Thu, 01 Jul 2021 10:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Timetable published</title>
      <link>https://medium.com/droidkaigi/timetable</link>
      <guid>timetable-2021</guid>
      <description>See the sessions</description>
      <pubDate>Fri, 02 Jul 2021 10:00:00 GMT</pubDate>
      <enclosure url="https://example.com/timetable.png" length="1024" type="image/png"/>
    </item>
  </channel>
</rss>"#;
