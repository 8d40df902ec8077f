//! DOM helpers shared by the source extractors.
//!
//! `scraper` has no way to delete nodes, so "remove the ads, then read the
//! text" is expressed as reading text while skipping anything under an
//! element matched by a `skip` selector.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::collections::HashSet;
use url::Url;

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| css("p"));
static BACKGROUND_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url\(\s*['"]?([^'")]+?)['"]?\s*\)"#).unwrap());

/// Parse a selector literal. Only called on static strings.
pub fn css(selector: &str) -> Selector {
    Selector::parse(selector).unwrap()
}

/// Text of an element with each fragment trimmed and joined by single spaces.
pub fn clean_text(el: ElementRef) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Attribute value, trimmed, `None` when missing or blank.
pub fn attr(el: ElementRef, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Resolve a possibly relative link against the page it was found on.
pub fn resolve(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(String::from)
}

/// First URL of a `srcset` attribute.
pub fn first_srcset(srcset: &str) -> Option<String> {
    srcset
        .split(',')
        .next()
        .and_then(|entry| entry.split_whitespace().next())
        .map(str::to_string)
}

/// URL inside a `background-image: url(...)` style.
pub fn background_image(style: &str) -> Option<String> {
    BACKGROUND_URL
        .captures(style)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn pruner<'a>(root: ElementRef<'a>, skip: Option<&Selector>) -> impl Fn(ElementRef<'a>) -> bool {
    let ids: HashSet<_> = skip
        .map(|s| root.select(s).map(|e| e.id()).collect())
        .unwrap_or_default();
    move |el: ElementRef<'a>| ids.contains(&el.id()) || el.ancestors().any(|a| ids.contains(&a.id()))
}

/// Non-empty `<p>` texts under `root`, ignoring anything inside `skip` matches.
pub fn paragraphs(root: ElementRef, skip: Option<&Selector>) -> Vec<String> {
    let pruned = pruner(root, skip);
    root.select(&PARAGRAPH)
        .filter(|p| !pruned(*p))
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Every non-empty text fragment under `root` as its own line, ignoring
/// anything inside `skip` matches.
pub fn text_lines(root: ElementRef, skip: Option<&Selector>) -> Vec<String> {
    let pruned = pruner(root, skip);
    root.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent().and_then(ElementRef::wrap)?;
            if pruned(parent) {
                return None;
            }
            let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
            (!line.is_empty()).then_some(line)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn root(doc: &Html) -> ElementRef<'_> {
        doc.select(&css("div.body")).next().unwrap()
    }

    #[test]
    fn test_paragraphs_skip_ads() {
        let doc = Html::parse_fragment(
            r#"<div class="body"><p> First  line </p><div class="ad"><p>Buy now</p></div><p></p><p>Second</p></div>"#,
        );
        let skip = css("div.ad");
        assert_eq!(paragraphs(root(&doc), Some(&skip)), vec!["First line", "Second"]);
    }

    #[test]
    fn test_text_lines_split_on_tags() {
        let doc = Html::parse_fragment(
            r#"<div class="body">One<br>Two <script>var x;</script><span>Three</span></div>"#,
        );
        let skip = css("script");
        assert_eq!(text_lines(root(&doc), Some(&skip)), vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_background_image() {
        assert_eq!(
            background_image("background-image: url('https://cdn.test/a.jpg');").as_deref(),
            Some("https://cdn.test/a.jpg")
        );
        assert_eq!(
            background_image(r#"background-image:url("/img/b.png")"#).as_deref(),
            Some("/img/b.png")
        );
        assert_eq!(background_image("color: red"), None);
    }

    #[test]
    fn test_resolve_and_srcset() {
        let base = Url::parse("https://www.example.com/").unwrap();
        assert_eq!(resolve(&base, "/news/1").as_deref(), Some("https://www.example.com/news/1"));
        assert_eq!(resolve(&base, "https://other.test/x").as_deref(), Some("https://other.test/x"));
        assert_eq!(resolve(&base, "  "), None);
        assert_eq!(first_srcset("/a.jpg 320w, /b.jpg 640w").as_deref(), Some("/a.jpg"));
    }
}
