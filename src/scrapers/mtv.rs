//! [MTV Lebanon](https://www.mtv.com.lb) news swiper.
//!
//! The front page carries no usable pictures, so the image comes from the
//! article header on the detail page.

use super::html::{attr, css, resolve, text_lines};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.mtv.com.lb";

static SLIDES: Lazy<Selector> =
    Lazy::new(|| css("div.swiper-wrapper.news-wrapper > a.swiper-slide.news-item"));
static TITLE: Lazy<Selector> = Lazy::new(|| css("div.news-title"));
static TIME: Lazy<Selector> = Lazy::new(|| css("span.news-time"));
static HEADER_IMAGE: Lazy<Selector> = Lazy::new(|| css("div.articles-header-image img"));
static REPORT: Lazy<Selector> = Lazy::new(|| css("div.articles-report"));
static ADS: Lazy<Selector> = Lazy::new(|| {
    css("div[id*='gpt'], iframe, .article-ad, div[id*='google_ads']")
});

#[derive(Debug, Clone, Copy)]
pub struct Mtv;

impl Extractor for Mtv {
    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>> {
        let base = Url::parse(LISTING_URL)?;
        let document = Html::parse_document(listing_html);

        Ok(document
            .select(&SLIDES)
            .filter_map(|slide| {
                let url = resolve(&base, &attr(slide, "href")?)?;
                let title = slide.select(&TITLE).next()?;
                let headline = text_lines(title, Some(&TIME)).join(" ");
                Some(Candidate::new(headline, url, None))
            })
            .collect())
    }

    fn detail(&self, detail_html: &str) -> Result<DetailPage> {
        let base = Url::parse(LISTING_URL)?;
        let document = Html::parse_document(detail_html);

        let image_url = document
            .select(&HEADER_IMAGE)
            .next()
            .and_then(|img| attr(img, "src"))
            .and_then(|src| resolve(&base, &src));
        let text = document
            .select(&REPORT)
            .next()
            .map(|report| text_lines(report, Some(&ADS)).join("\n"));
        Ok(DetailPage { text, image_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_strip_time() {
        let html = r#"<div class="swiper-wrapper news-wrapper">
            <a class="swiper-slide news-item" href="/news/local/1500">
              <div class="news-title"><span class="news-time">10:45</span> Parliament session postponed</div>
            </a>
        </div>"#;
        let c = Mtv.candidates(html).unwrap();
        assert_eq!(
            c,
            vec![Candidate::new(
                "Parliament session postponed",
                "https://www.mtv.com.lb/news/local/1500",
                None
            )]
        );
    }

    #[test]
    fn test_detail_image_and_text() {
        let html = r#"
            <div class="articles-header-image"><img src="/Library/Assets/1500.jpg"></div>
            <div class="articles-report">First line.<br>Second line.<div id="google_ads_iframe_1">Ad</div></div>"#;
        let page = Mtv.detail(html).unwrap();
        assert_eq!(page.image_url.as_deref(), Some("https://www.mtv.com.lb/Library/Assets/1500.jpg"));
        assert_eq!(page.article_text(), "First line.\nSecond line.");
    }
}
