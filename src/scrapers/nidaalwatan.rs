//! [Nidaa Al-Watan](https://www.nidaalwatan.com) featured carousel.

use super::html::{attr, background_image, clean_text, css, paragraphs, resolve};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.nidaalwatan.com";

static SLIDES: Lazy<Selector> =
    Lazy::new(|| css("div.featured_articles div.carousel-component > a[href]"));
static HEADLINE: Lazy<Selector> = Lazy::new(|| css("div.info > p"));
static FIGURE: Lazy<Selector> = Lazy::new(|| css("figure[style]"));
static CONTENT: Lazy<Selector> = Lazy::new(|| css("div.article-content"));
static NOISE: Lazy<Selector> = Lazy::new(|| css("div.relatedArticles, ul.keywords, div.mpu"));

#[derive(Debug, Clone, Copy)]
pub struct NidaaAlWatan;

impl Extractor for NidaaAlWatan {
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
                let headline = clean_text(slide.select(&HEADLINE).next()?);
                // Slides without a cover picture are promo tiles, not articles.
                let image = slide
                    .select(&FIGURE)
                    .next()
                    .and_then(|f| attr(f, "style"))
                    .and_then(|style| background_image(&style))
                    .and_then(|src| resolve(&base, &src))?;
                Some(Candidate::new(headline, url, Some(image)))
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
