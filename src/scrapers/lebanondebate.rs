//! [Lebanon Debate](https://www.lebanondebate.com) featured articles.
//!
//! Article pages split the story into a bold summary and the body proper.
//! Both are kept, separated by a blank line.

use super::html::{attr, clean_text, css, paragraphs, resolve};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.lebanondebate.com";

static FEATURED: Lazy<Selector> = Lazy::new(|| css("a.featured-article[href]"));
static IMAGE: Lazy<Selector> = Lazy::new(|| css("img.article-image"));
static HEADLINE: Lazy<Selector> = Lazy::new(|| css("div.article-details h3"));
static SUMMARY: Lazy<Selector> = Lazy::new(|| css("div.summary-text.text"));
static BODY: Lazy<Selector> = Lazy::new(|| css("div.article-texts.text"));
static ADS: Lazy<Selector> =
    Lazy::new(|| css("div[id*='gpt'], div.advertisement, iframe, script"));

#[derive(Debug, Clone, Copy)]
pub struct LebanonDebate;

impl Extractor for LebanonDebate {
    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>> {
        let base = Url::parse(LISTING_URL)?;
        let document = Html::parse_document(listing_html);

        Ok(document
            .select(&FEATURED)
            .filter_map(|link| {
                let url = resolve(&base, &attr(link, "href")?)?;
                let headline = clean_text(link.select(&HEADLINE).next()?);
                let image_url = link
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

        let summary = document
            .select(&SUMMARY)
            .next()
            .map(|s| paragraphs(s, None).join("\n"))
            .filter(|s| !s.is_empty());
        let body = document
            .select(&BODY)
            .next()
            .map(|b| paragraphs(b, Some(&ADS)).join("\n"));

        let text = match (summary, body) {
            (Some(summary), Some(body)) if !body.is_empty() => Some(format!("{summary}\n\n{body}")),
            (Some(summary), _) => Some(summary),
            (None, body) => body,
        };
        Ok(DetailPage::text(text))
    }
}
