//! [LBCI](https://www.lbcgroup.tv): the highlighted story, then the latest news strip.
//!
//! Highlighted stories come first so the default cap of one picks the lead
//! story. Latest-news entries have no picture.

use super::html::{attr, clean_text, css, resolve, text_lines};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.lbcgroup.tv";

/// Only the top of the latest-news strip is front-page material.
const LATEST_NEWS_LIMIT: usize = 4;

static HIGHLIGHTED: Lazy<Selector> = Lazy::new(|| css("div.highlighted-history-container"));
static LATEST: Lazy<Selector> = Lazy::new(|| css("div.latestnews_article"));
static LINK: Lazy<Selector> = Lazy::new(|| css("a.u-imgLink[href]"));
static TITLE: Lazy<Selector> = Lazy::new(|| css("div.card-module-title h2 a"));
static IMAGE: Lazy<Selector> = Lazy::new(|| css("img.highlighted-history-image"));
static BODIES: Lazy<[Selector; 2]> =
    Lazy::new(|| [css("div.LongDesc"), css("div.article_details_body")]);
static NOISE: Lazy<Selector> = Lazy::new(|| {
    css("bannerinjection, controlinjection, script, style, div[id*='gpt'], iframe, .article-ad")
});

fn card(base: &Url, block: ElementRef, with_image: bool) -> Option<Candidate> {
    let url = resolve(base, &attr(block.select(&LINK).next()?, "href")?)?;
    let headline = clean_text(block.select(&TITLE).next()?);
    let image_url = with_image
        .then(|| block.select(&IMAGE).next())
        .flatten()
        .and_then(|img| attr(img, "src"))
        .and_then(|src| resolve(base, &src));
    Some(Candidate::new(headline, url, image_url))
}

#[derive(Debug, Clone, Copy)]
pub struct LbcGroup;

impl Extractor for LbcGroup {
    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>> {
        let base = Url::parse(LISTING_URL)?;
        let document = Html::parse_document(listing_html);

        let highlighted = document
            .select(&HIGHLIGHTED)
            .filter_map(|block| card(&base, block, true));
        let latest = document
            .select(&LATEST)
            .take(LATEST_NEWS_LIMIT)
            .filter_map(|block| card(&base, block, false));
        Ok(highlighted.chain(latest).collect())
    }

    fn detail(&self, detail_html: &str) -> Result<DetailPage> {
        let document = Html::parse_document(detail_html);
        let body = BODIES
            .iter()
            .find_map(|selector| document.select(selector).next());
        Ok(DetailPage::text(
            body.map(|b| text_lines(b, Some(&NOISE)).join("\n")),
        ))
    }
}
