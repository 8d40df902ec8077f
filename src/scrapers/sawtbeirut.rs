//! [Sawt Beirut](https://www.sawtbeirut.com) headline cards.

use super::html::{attr, clean_text, css, paragraphs, resolve};
use super::{Candidate, DetailPage, Extractor};
use crate::error::Result;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const LISTING_URL: &str = "https://www.sawtbeirut.com";

static CARDS: Lazy<Selector> = Lazy::new(|| {
    css("section#headlines div.card.headlines-primary, section#headlines div.card.card-secondary")
});
static HEADLINE: Lazy<Selector> = Lazy::new(|| css("h5.card-title"));
static IMAGE: Lazy<Selector> = Lazy::new(|| css("img[src]"));
static CONTENT: Lazy<Selector> = Lazy::new(|| css("div.single-description"));
static NOISE: Lazy<Selector> = Lazy::new(|| {
    css("div.heateor_sss_sharing_container, div[class*='code-block'], script, .ai-viewports")
});

/// Cards are wrapped by the anchor rather than containing one.
fn enclosing_link(card: ElementRef) -> Option<ElementRef> {
    card.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
}

#[derive(Debug, Clone, Copy)]
pub struct SawtBeirut;

impl Extractor for SawtBeirut {
    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>> {
        let base = Url::parse(LISTING_URL)?;
        let document = Html::parse_document(listing_html);

        Ok(document
            .select(&CARDS)
            .filter_map(|card| {
                let url = resolve(&base, &attr(enclosing_link(card)?, "href")?)?;
                let headline = clean_text(card.select(&HEADLINE).next()?);
                let image_url = card
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
                .select(&CONTENT)
                .next()
                .map(|content| paragraphs(content, Some(&NOISE)).join("\n")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_use_enclosing_anchor() {
        let html = r#"<section id="headlines">
            <a href="/lebanon/primary"><div class="card headlines-primary"><img src="/p.jpg"><h5 class="card-title">رئيسي</h5></div></a>
            <a href="/lebanon/second"><div class="card card-secondary"><h5 class="card-title">ثانوي</h5></div></a>
            <div class="card card-secondary"><h5 class="card-title">بلا رابط</h5></div>
        </section>"#;
        let c = SawtBeirut.candidates(html).unwrap();
        let urls: Vec<_> = c.iter().map(|c| c.article_url.as_str()).collect();
        assert_eq!(
            urls,
            ["https://www.sawtbeirut.com/lebanon/primary", "https://www.sawtbeirut.com/lebanon/second"]
        );
        assert_eq!(c[0].image_url.as_deref(), Some("https://www.sawtbeirut.com/p.jpg"));
        assert_eq!(c[1].image_url, None);
    }

    #[test]
    fn test_detail_skips_code_blocks() {
        let html = r#"<div class="single-description">
            <p>أولاً</p><div class="code-block code-block-3"><p>إعلان</p></div><p>ثانياً</p>
        </div>"#;
        assert_eq!(SawtBeirut.detail(html).unwrap().article_text(), "أولاً\nثانياً");
    }
}
