//! Rendering of search results for the terminal.

use shopscout_search::{SearchOutcome, SearchResult};
use std::fmt::Write;

/// Plain-text listing, one block per product.
pub fn render_table(query: &str, outcome: &SearchOutcome) -> String {
    let result = match outcome {
        SearchOutcome::Found(result) => result,
        SearchOutcome::NoResults => return format!("No products found for '{query}'\n"),
    };

    let mut out = format!("{} product(s) for '{query}'\n", result.len());
    for (i, product) in result.products().iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {} ({})", i + 1, product.name, product.brand);
        let _ = writeln!(out, "   price: {}", product.price);
        let _ = writeln!(out, "   link:  {}", product.link);
        let _ = writeln!(out, "   image: {}", product.image_url);
    }
    out
}

/// Column-oriented JSON with one array per field.
pub fn render_json(result: &SearchResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&result.columns())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopscout_search::Product;

    fn result() -> SearchResult {
        SearchResult::new(vec![Product {
            name: "Linen Shirt".to_string(),
            price: "₹1,999".to_string(),
            link: "https://www.westside.com/products/linen-shirt".to_string(),
            image_url: "https://cdn.example/linen.jpg".to_string(),
            brand: "Ascot".to_string(),
        }])
    }

    #[test]
    fn test_table_lists_products() {
        let table = render_table("shirt", &SearchOutcome::Found(result()));
        assert!(table.starts_with("1 product(s) for 'shirt'"));
        assert!(table.contains("1. Linen Shirt (Ascot)"));
        assert!(table.contains("price: ₹1,999"));
    }

    #[test]
    fn test_table_no_results() {
        let table = render_table("zzz", &SearchOutcome::NoResults);
        assert_eq!(table, "No products found for 'zzz'\n");
    }

    #[test]
    fn test_json_is_columnar() {
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&result()).unwrap()).unwrap();
        assert_eq!(json["names"][0], "Linen Shirt");
        assert_eq!(json["brands"][0], "Ascot");
        assert_eq!(json["images"].as_array().map(Vec::len), Some(1));
    }
}
