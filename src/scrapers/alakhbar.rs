//! [Al-Akhbar](https://www.al-akhbar.com) main article grid.
//!
//! Article pages are mostly reached through the fallback service, whose
//! rendered output wraps the story in `main.container` alongside navigation
//! and category labels. Body paragraphs are therefore filtered: they must be
//! long, Arabic, more than a few words, and not a bare category label.

use super::html::{attr, clean_text, css, first_srcset, paragraphs, resolve};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.al-akhbar.com/";

static GRID_ITEMS: Lazy<Selector> = Lazy::new(|| css(r"div.grid.md\:grid-cols-2 > div.group"));
static LINK: Lazy<Selector> = Lazy::new(|| css("a[href]"));
static HEADLINE: Lazy<Selector> = Lazy::new(|| css("h3"));
static IMAGE: Lazy<Selector> = Lazy::new(|| css("img"));
static CONTAINERS: Lazy<[Selector; 3]> =
    Lazy::new(|| [css("main.container"), css("main"), css(r"div.gap-4.sm\:flex")]);

const MASTHEAD: &str = "الأخبار";
const CATEGORY_LABELS: [&str; 4] = ["لبنان|سياسة", "فلسطين", "سوريا", "عرب وعالم"];

fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

fn is_body_paragraph(text: &str) -> bool {
    let chars = text.chars().count();
    chars > 20
        && text.chars().any(is_arabic)
        && !text.contains(MASTHEAD)
        && text.split_whitespace().count() > 3
        && !(chars < 50 && CATEGORY_LABELS.iter().any(|label| text.contains(label)))
}

#[derive(Debug, Clone, Copy)]
pub struct AlAkhbar;

impl Extractor for AlAkhbar {
    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>> {
        let base = Url::parse(LISTING_URL)?;
        let document = Html::parse_document(listing_html);

        Ok(document
            .select(&GRID_ITEMS)
            .filter_map(|item| {
                let url = resolve(&base, &attr(item.select(&LINK).next()?, "href")?)?;
                let headline = clean_text(item.select(&HEADLINE).next()?);
                let image_url = item
                    .select(&IMAGE)
                    .next()
                    .and_then(|img| {
                        attr(img, "src").or_else(|| attr(img, "srcset").and_then(|s| first_srcset(&s)))
                    })
                    .and_then(|src| resolve(&base, &src));
                Some(Candidate::new(headline, url, image_url))
            })
            .collect())
    }

    fn detail(&self, detail_html: &str) -> Result<DetailPage> {
        let document = Html::parse_document(detail_html);
        let container = CONTAINERS
            .iter()
            .find_map(|selector| document.select(selector).next());

        Ok(DetailPage::text(container.map(|content| {
            paragraphs(content, None)
                .into_iter()
                .filter(|p| is_body_paragraph(p))
                .collect::<Vec<_>>()
                .join("\n")
        })))
    }
}
