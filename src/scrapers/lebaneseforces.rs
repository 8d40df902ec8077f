//! [Lebanese Forces](https://www.lebanese-forces.com) homepage carousel.

use super::html::{attr, clean_text, css, paragraphs, resolve, text_lines};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.lebanese-forces.com";

static ITEMS: Lazy<Selector> = Lazy::new(|| css("div.item"));
static LINK: Lazy<Selector> = Lazy::new(|| css("a[href]"));
static IMAGE: Lazy<Selector> = Lazy::new(|| css("div.slide-img img"));
static HEADLINE: Lazy<Selector> = Lazy::new(|| css("div.post-content h1"));
static CONTENT: Lazy<Selector> = Lazy::new(|| css("div.entry-content"));
static NOISE: Lazy<Selector> = Lazy::new(|| {
    css("div[id*='gpt'], div[id*='div-gpt'], script, .advertisement, .addthis_sharing_toolbox")
});

#[derive(Debug, Clone, Copy)]
pub struct LebaneseForces;

impl Extractor for LebaneseForces {
    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn default_article_cap(&self) -> usize {
        3
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
                    .and_then(|img| attr(img, "src"))
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

        // Older posts put the body straight into the container without <p>.
        let mut lines = paragraphs(content, Some(&NOISE));
        if lines.is_empty() {
            lines = text_lines(content, Some(&NOISE));
        }
        Ok(DetailPage::text(Some(lines.join("\n"))))
    }
}
