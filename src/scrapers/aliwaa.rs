//! [Aliwaa](https://aliwaa.com.lb) news carousel.
//!
//! Article bodies are not paragraphs: each block of text is a direct `<div>`
//! child of `div.content-container`, interleaved with ad slots.

use super::html::{attr, clean_text, css, resolve, text_lines};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://aliwaa.com.lb";

static ITEMS: Lazy<Selector> = Lazy::new(|| css("div.news-carousel-item"));
static LINK: Lazy<Selector> = Lazy::new(|| css("a[href]"));
static HEADLINE: Lazy<Selector> = Lazy::new(|| css("span.title > span:last-child"));
static IMAGE: Lazy<Selector> = Lazy::new(|| css("img"));
static CONTENT: Lazy<Selector> = Lazy::new(|| css("div.content-container"));
static ADS: Lazy<Selector> = Lazy::new(|| css("div[id*='gpt'], iframe, .advertisement"));

/// Blocks shorter than this are captions or share labels.
const MIN_BLOCK_CHARS: usize = 10;

fn image_source(img: ElementRef) -> Option<String> {
    let src = attr(img, "src");
    let lazy = attr(img, "data-src");
    match src {
        Some(s) if !s.contains("placeholder") => Some(s),
        _ => lazy,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Aliwaa;

impl Extractor for Aliwaa {
    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>> {
        let base = Url::parse(LISTING_URL)?;
        let document = Html::parse_document(listing_html);

        Ok(document
            .select(&ITEMS)
            .filter_map(|item| {
                let url = resolve(&base, &attr(item.select(&LINK).next()?, "href")?)?;
                let headline = clean_text(item.select(&HEADLINE).next()?);
                let image_url = item
                    .select(&IMAGE)
                    .next()
                    .and_then(image_source)
                    .and_then(|src| resolve(&base, &src));
                Some(Candidate::new(headline, url, image_url))
            })
            .collect())
    }

    fn detail(&self, detail_html: &str) -> Result<DetailPage> {
        let document = Html::parse_document(detail_html);
        let Some(content) = document.select(&CONTENT).next() else {
            return Ok(DetailPage::default());
        };

        let blocks: Vec<String> = content
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "div" && !ADS.matches(child))
            .map(|child| text_lines(child, Some(&ADS)).join(" "))
            .filter(|text| text.chars().count() > MIN_BLOCK_CHARS)
            .collect();
        Ok(DetailPage::text(Some(blocks.join("\n"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_skip_placeholder_image() {
        let html = r#"<div class="news-carousel-item">
            <a href="/news/politics/5"><img src="/images/placeholder.png" data-src="/uploads/5.jpg">
            <span class="title"><span>سياسة</span><span>عنوان الخبر</span></span></a>
        </div>"#;
        let c = Aliwaa.candidates(html).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].headline, "عنوان الخبر");
        assert_eq!(c[0].image_url.as_deref(), Some("https://aliwaa.com.lb/uploads/5.jpg"));
    }

    #[test]
    fn test_detail_reads_direct_div_blocks() {
        let html = r#"<div class="content-container">
            <div>الكتلة الأولى من النص الطويل</div>
            <div id="div-gpt-ad-1">إعلان تجاري طويل جداً</div>
            <div>قصير</div>
            <section><div>ليست ابناً مباشراً للحاوية</div></section>
            <div>الكتلة الثانية <iframe></iframe>من النص</div>
        </div>"#;
        assert_eq!(
            Aliwaa.detail(html).unwrap().article_text(),
            "الكتلة الأولى من النص الطويل\nالكتلة الثانية من النص"
        );
    }

    #[test]
    fn test_detail_without_container() {
        assert_eq!(Aliwaa.detail("<p>nothing</p>").unwrap().text, None);
    }
}
