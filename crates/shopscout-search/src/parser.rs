//! Field extraction from a rendered search listing.
//!
//! Every product field falls back to a fixed placeholder, so each field
//! sequence of a [`SearchResult`] holds a defined string per product.

use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use shopscout_core::{check_max_results, SiteConfig};

/// Placeholder for a product without a title element.
pub const NO_NAME: &str = "No Name";
/// Placeholder for a product without a brand element.
pub const NO_BRAND: &str = "No Brand";
/// Placeholder for a product without a price element.
pub const NO_PRICE: &str = "N/A";
/// Placeholder for a product without a usable link.
pub const NO_LINK: &str = "No Link";
/// Placeholder for a product without a usable image.
pub const NO_IMAGE: &str = "No Image";

/// One product from the search listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product title
    pub name: String,
    /// Raw price text, currency symbol included
    pub price: String,
    /// Absolute product page URL
    pub link: String,
    /// Image URL as found in the listing
    pub image_url: String,
    /// Brand line
    pub brand: String,
}

/// Products extracted from one search, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    products: Vec<Product>,
}

impl SearchResult {
    /// Wrap extracted products.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Products in listing order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether no product was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Split into the five parallel field sequences.
    #[must_use]
    pub fn columns(&self) -> FieldColumns {
        let mut columns = FieldColumns::default();
        for product in &self.products {
            columns.names.push(product.name.clone());
            columns.prices.push(product.price.clone());
            columns.links.push(product.link.clone());
            columns.images.push(product.image_url.clone());
            columns.brands.push(product.brand.clone());
        }
        columns
    }
}

/// The five parallel field sequences of a search result.
///
/// All sequences have the same length; index `i` of each describes product `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldColumns {
    #[allow(missing_docs)]
    pub names: Vec<String>,
    #[allow(missing_docs)]
    pub prices: Vec<String>,
    #[allow(missing_docs)]
    pub links: Vec<String>,
    #[allow(missing_docs)]
    pub images: Vec<String>,
    #[allow(missing_docs)]
    pub brands: Vec<String>,
}

#[derive(Debug)]
struct CompiledSelectors {
    result_item: Selector,
    name: Selector,
    brand: Selector,
    price: Selector,
    link: Selector,
    image: Selector,
}

/// Parses search listing snapshots into products.
#[derive(Debug)]
pub struct ResultParser {
    selectors: CompiledSelectors,
    base_url: String,
    max_results: usize,
}

impl ResultParser {
    /// Compile the site's selectors.
    ///
    /// # Errors
    /// Returns [`ScrapeError::Config`] if `max_results` is outside
    /// `1..=MAX_RESULTS`, and [`ScrapeError::ParseFailure`] if any configured
    /// selector is invalid.
    pub fn new(site: &SiteConfig, max_results: usize) -> Result<Self> {
        check_max_results(max_results)?;

        let sel = &site.selectors;
        Ok(Self {
            selectors: CompiledSelectors {
                result_item: compile("result_item", &sel.result_item)?,
                name: compile("name", &sel.name)?,
                brand: compile("brand", &sel.brand)?,
                price: compile("price", &sel.price)?,
                link: compile("link", &sel.link)?,
                image: compile("image", &sel.image)?,
            },
            base_url: site.base_url.trim_end_matches('/').to_string(),
            max_results,
        })
    }

    /// Parse a page snapshot and extract the first `max_results` products.
    ///
    /// A page without result items yields an empty [`SearchResult`].
    pub fn parse(&self, html: &str) -> Result<SearchResult> {
        let document = Html::parse_document(html);
        let containers = document
            .select(&self.selectors.result_item)
            .take(self.max_results);

        Ok(SearchResult::new(self.extract_products(containers)?))
    }

    /// Extract one product per result container.
    ///
    /// Any failure aborts the whole extraction; partial results are discarded.
    pub fn extract_products<'a, I>(&self, containers: I) -> Result<Vec<Product>>
    where
        I: IntoIterator<Item = ElementRef<'a>>,
    {
        containers
            .into_iter()
            .map(|container| self.extract_product(&container))
            .collect()
    }

    fn extract_product(&self, container: &ElementRef) -> Result<Product> {
        let name = text_or(container, &self.selectors.name, NO_NAME);
        let brand = text_or(container, &self.selectors.brand, NO_BRAND);
        let price = text_or(container, &self.selectors.price, NO_PRICE);

        let link = container
            .select(&self.selectors.link)
            .next()
            .and_then(|anchor| non_empty_attr(&anchor, "href"))
            .map_or_else(|| NO_LINK.to_string(), |href| self.absolute_link(href));

        let image_url = image_url(container.select(&self.selectors.image).next())?;

        Ok(Product {
            name,
            price,
            link,
            image_url,
            brand,
        })
    }

    fn absolute_link(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", self.base_url, href)
        }
    }
}

fn compile(field: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::parse(format!("invalid {field} selector '{selector}': {e}")))
}

fn text_or(container: &ElementRef, selector: &Selector, placeholder: &str) -> String {
    container.select(selector).next().map_or_else(
        || placeholder.to_string(),
        |el| el.text().collect::<String>().trim().to_string(),
    )
}

fn non_empty_attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name).filter(|value| !value.is_empty())
}

/// Pick the image URL: `data-src`, then the last `srcset` candidate, then `src`.
fn image_url(img: Option<ElementRef>) -> Result<String> {
    let Some(img) = img else {
        return Ok(NO_IMAGE.to_string());
    };

    if let Some(deferred) = non_empty_attr(&img, "data-src") {
        return Ok(deferred.to_string());
    }

    if let Some(srcset) = non_empty_attr(&img, "srcset") {
        return last_srcset_candidate(srcset);
    }

    Ok(non_empty_attr(&img, "src").map_or_else(|| NO_IMAGE.to_string(), str::to_string))
}

fn last_srcset_candidate(srcset: &str) -> Result<String> {
    srcset
        .rsplit(',')
        .next()
        .and_then(|candidate| candidate.split_whitespace().next())
        .map(str::to_string)
        .ok_or_else(|| ScrapeError::parse(format!("malformed srcset '{srcset}'")))
}
