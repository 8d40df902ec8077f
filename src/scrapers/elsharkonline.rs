//! [ElShark Online](https://www.elsharkonline.com) first-column articles.

use super::html::{attr, background_image, clean_text, css, paragraphs, resolve};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.elsharkonline.com";

static ARTICLES: Lazy<Selector> = Lazy::new(|| css("div.column-1 > article"));
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| css("h2.title > a[href]"));
static FEATURED: Lazy<Selector> = Lazy::new(|| css("div.featured a[style]"));
static CONTENT: Lazy<Selector> =
    Lazy::new(|| css("div.entry-content.clearfix.single-post-content"));
static NOISE: Lazy<Selector> =
    Lazy::new(|| css("div.post-share, div[id*='gpt'], iframe, .advertisement"));

#[derive(Debug, Clone, Copy)]
pub struct ElSharkOnline;

impl Extractor for ElSharkOnline {
    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>> {
        let base = Url::parse(LISTING_URL)?;
        let document = Html::parse_document(listing_html);

        Ok(document
            .select(&ARTICLES)
            .filter_map(|article| {
                let link = article.select(&TITLE_LINK).next()?;
                let url = resolve(&base, &attr(link, "href")?)?;
                let image_url = article
                    .select(&FEATURED)
                    .next()
                    .and_then(|a| attr(a, "style"))
                    .and_then(|style| background_image(&style))
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
                .map(|content| paragraphs(content, Some(&NOISE)).join("\n")),
        ))
    }
}
