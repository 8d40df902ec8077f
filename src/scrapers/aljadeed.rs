//! [Al Jadeed](https://www.aljadeed.tv) presentation slider.
//!
//! Pictures and titles live in two sibling swipers that advance together,
//! so the n-th image slide belongs to the n-th info slide.

use super::html::{attr, clean_text, css, resolve, text_lines};
use super::{Candidate, DetailPage, Extractor};
use crate::error::{Result, ScrapeError};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.aljadeed.tv";

static IMAGE_SLIDES: Lazy<Selector> =
    Lazy::new(|| css("div.swiper-wrapper > div.swiper-slide.pres-swiper-slide"));
static INFO_SLIDES: Lazy<Selector> =
    Lazy::new(|| css("div.swiper-info-container div.swiper-wrapper > div.swiper-slide"));
static LINK: Lazy<Selector> = Lazy::new(|| css("a[href]"));
static IMAGE: Lazy<Selector> = Lazy::new(|| css("img.slider-presentation-img"));
static TITLE: Lazy<Selector> = Lazy::new(|| css("div.slider-presentation-title h2 a span"));
static BODY: Lazy<Selector> = Lazy::new(|| css("div.LongDesc.text-title-9"));
static INJECTED: Lazy<Selector> = Lazy::new(|| css("controlinjection"));

#[derive(Debug, Clone, Copy)]
pub struct AlJadeed;

impl Extractor for AlJadeed {
    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>> {
        let base = Url::parse(LISTING_URL)?;
        let document = Html::parse_document(listing_html);

        let pictures: Vec<_> = document.select(&IMAGE_SLIDES).collect();
        let infos: Vec<_> = document.select(&INFO_SLIDES).collect();
        // Misaligned swipers would pair headlines with the wrong links.
        if pictures.len() != infos.len() {
            return Err(ScrapeError::Parse(format!(
                "slider out of sync: {} pictures, {} titles",
                pictures.len(),
                infos.len()
            )));
        }

        Ok(pictures
            .into_iter()
            .zip(infos)
            .filter_map(|(picture, info)| {
                let url = resolve(&base, &attr(picture.select(&LINK).next()?, "href")?)?;
                let headline = clean_text(info.select(&TITLE).next()?);
                let image_url = picture
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
        Ok(DetailPage::text(
            document
                .select(&BODY)
                .next()
                .map(|body| text_lines(body, Some(&INJECTED)).join(" ")),
        ))
    }
}
