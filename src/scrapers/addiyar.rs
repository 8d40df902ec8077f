//! [Addiyar](https://www.addiyar.com): featured articles block on the homepage.
//!
//! Each `<article>` in `div.featured-articles` has the headline in `<h2>`,
//! the link on its first anchor and the picture as an inline
//! `background-image` on `<figure>`.

use super::html::{attr, background_image, clean_text, css, paragraphs, resolve};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.addiyar.com/";

static ARTICLES: Lazy<Selector> = Lazy::new(|| css("div.featured-articles article"));
static HEADLINE: Lazy<Selector> = Lazy::new(|| css("h2"));
static FIGURE: Lazy<Selector> = Lazy::new(|| css("figure"));
static LINK: Lazy<Selector> = Lazy::new(|| css("a[href]"));
static CONTENT: Lazy<Selector> = Lazy::new(|| css("div.article-content"));

#[derive(Debug, Clone, Copy)]
pub struct Addiyar;

impl Extractor for Addiyar {
    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn default_article_cap(&self) -> usize {
        3
    }

    fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>> {
        let base = Url::parse(LISTING_URL)?;
        let document = Html::parse_document(listing_html);
        let mut out = Vec::new();

        for article in document.select(&ARTICLES) {
            let (Some(header), Some(link)) = (
                article.select(&HEADLINE).next(),
                article.select(&LINK).next(),
            ) else {
                continue;
            };
            let Some(url) = attr(link, "href").and_then(|h| resolve(&base, &h)) else {
                continue;
            };
            let image_url = article
                .select(&FIGURE)
                .next()
                .and_then(|f| attr(f, "style"))
                .and_then(|style| background_image(&style))
                .and_then(|src| resolve(&base, &src));
            out.push(Candidate::new(clean_text(header), url, image_url));
        }
        Ok(out)
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
