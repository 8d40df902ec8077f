//! [Al-Joumhouria](https://www.aljoumhouria.com/ar): the single "big news" block.

use super::html::{attr, clean_text, css, paragraphs, resolve};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.aljoumhouria.com/ar";

static BIG_NEWS_LINK: Lazy<Selector> = Lazy::new(|| css("div.big-block-news a[href]"));
static IMAGE: Lazy<Selector> = Lazy::new(|| css("img.big-news-img"));
static HEADLINE: Lazy<Selector> = Lazy::new(|| css("div.description"));
static CONTENT: Lazy<Selector> = Lazy::new(|| css("div.description.direction-rtl"));

#[derive(Debug, Clone, Copy)]
pub struct AlJoumhouria;

impl Extractor for AlJoumhouria {
    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>> {
        let base = Url::parse(LISTING_URL)?;
        let document = Html::parse_document(listing_html);

        let candidate = document.select(&BIG_NEWS_LINK).next().and_then(|link| {
            let url = resolve(&base, &attr(link, "href")?)?;
            let headline = clean_text(link.select(&HEADLINE).next()?);
            let image_url = link
                .select(&IMAGE)
                .next()
                .and_then(|img| attr(img, "src"))
                .and_then(|src| resolve(&base, &src));
            Some(Candidate::new(headline, url, image_url))
        });
        Ok(candidate.into_iter().collect())
    }

    fn detail(&self, detail_html: &str) -> Result<DetailPage> {
        let document = Html::parse_document(detail_html);
        Ok(DetailPage::text(
            document
                .select(&CONTENT)
                .next()
                .map(|content| paragraphs(content, None).join("\n")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates() {
        let html = r#"<div class="big-block-news">
            <a href="/ar/news/123"><img class="big-news-img" src="https://cdn.test/big.jpg"><div class="description">الخبر الأبرز</div></a>
        </div>"#;
        let c = AlJoumhouria.candidates(html).unwrap();
        assert_eq!(
            c,
            vec![Candidate::new(
                "الخبر الأبرز",
                "https://www.aljoumhouria.com/ar/news/123",
                Some("https://cdn.test/big.jpg".to_string())
            )]
        );
    }

    #[test]
    fn test_missing_block_yields_nothing() {
        assert!(AlJoumhouria.candidates("<html><body></body></html>").unwrap().is_empty());
    }

    #[test]
    fn test_detail() {
        let html = r#"<div class="description direction-rtl"><p>نص</p></div>"#;
        assert_eq!(AlJoumhouria.detail(html).unwrap().article_text(), "نص");
    }
}
