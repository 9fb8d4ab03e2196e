use scraper::{ElementRef, Html, Selector};

use super::{ListingParser, clean_text, parse_price_text};
use crate::model::CandidateProduct;
use crate::provider::error::{ProviderError, ProviderResult};

/// CSS selectors locating listing fields on a search results page.
///
/// Field selectors are evaluated inside each `item` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSelectors {
    pub item: String,
    pub name: String,
    pub price: String,
    pub pack_size: String,
    pub formula: String,
    pub manufacturer: String,
    pub link: String,
}

impl Default for MarkupSelectors {
    fn default() -> Self {
        Self {
            item: ".product-card".to_string(),
            name: ".product-name".to_string(),
            price: ".product-price".to_string(),
            pack_size: ".pack-size".to_string(),
            formula: ".composition".to_string(),
            manufacturer: ".manufacturer".to_string(),
            link: "a[href]".to_string(),
        }
    }
}

#[derive(Debug)]
struct Compiled {
    item: Selector,
    name: Selector,
    price: Selector,
    pack_size: Selector,
    formula: Selector,
    manufacturer: Selector,
    link: Selector,
}

/// Scrapes HTML listing pages.
#[derive(Debug)]
pub struct MarkupListingParser {
    selectors: Compiled,
}

fn compile(selector: &str) -> ProviderResult<Selector> {
    Selector::parse(selector).map_err(|_| ProviderError::InvalidSelector {
        selector: selector.to_string(),
    })
}

fn first_text(scope: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| clean_text(el.text().collect::<String>()))
}

impl MarkupListingParser {
    pub fn new(selectors: &MarkupSelectors) -> ProviderResult<Self> {
        Ok(Self {
            selectors: Compiled {
                item: compile(&selectors.item)?,
                name: compile(&selectors.name)?,
                price: compile(&selectors.price)?,
                pack_size: compile(&selectors.pack_size)?,
                formula: compile(&selectors.formula)?,
                manufacturer: compile(&selectors.manufacturer)?,
                link: compile(&selectors.link)?,
            },
        })
    }

    fn candidate_from(&self, source_id: &str, item: &ElementRef<'_>) -> Option<CandidateProduct> {
        let s = &self.selectors;
        let name = first_text(item, &s.name)?;
        let price = first_text(item, &s.price).and_then(|p| parse_price_text(&p))?;

        let mut candidate = CandidateProduct::new(source_id, name, price);
        if let Some(pack) = first_text(item, &s.pack_size) {
            candidate = candidate.with_pack_size(pack);
        }
        if let Some(formula) = first_text(item, &s.formula) {
            candidate = candidate.with_formula(formula);
        }
        if let Some(manufacturer) = first_text(item, &s.manufacturer) {
            candidate = candidate.with_manufacturer(manufacturer);
        }
        if let Some(href) = item
            .select(&s.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(clean_text)
        {
            candidate = candidate.with_origin_url(href);
        }
        candidate.is_well_formed().then_some(candidate)
    }
}

impl ListingParser for MarkupListingParser {
    fn parse(&self, source_id: &str, body: &str) -> Option<CandidateProduct> {
        let document = Html::parse_document(body);
        document
            .select(&self.selectors.item)
            .find_map(|item| self.candidate_from(source_id, &item))
    }
}
