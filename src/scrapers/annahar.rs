//! [Annahar](https://www.annahar.com) featured listing items.

use super::html::{attr, clean_text, css, paragraphs, resolve};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.annahar.com/";

static ITEMS: Lazy<Selector> = Lazy::new(|| css("div.listingItemDIV.featured"));
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| css("div.listingTitle a[href]"));
static IMAGE: Lazy<Selector> = Lazy::new(|| css("div.listingImage img"));
static CONTENT: Lazy<Selector> = Lazy::new(|| css("div.bodyContentMainParent"));

#[derive(Debug, Clone, Copy)]
pub struct Annahar;

impl Extractor for Annahar {
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
                let link = item.select(&TITLE_LINK).next()?;
                let url = resolve(&base, &attr(link, "href")?)?;
                // Images are lazy-loaded; the real source sits in data-src.
                let image_url = item
                    .select(&IMAGE)
                    .next()
                    .and_then(|img| attr(img, "data-src").or_else(|| attr(img, "src")))
                    .and_then(|src| resolve(&base, &src));
                Some(Candidate::new(clean_text(link), url, image_url))
            })
            .collect())
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
