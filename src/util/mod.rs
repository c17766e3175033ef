//! Small presentation helpers.

/// Format a price for display, e.g. `$25`.
pub fn format_price(price: f64) -> String {
    format!("${price}")
}

/// Format a rental price range, optionally with the original retail price.
pub fn format_price_range(from: f64, original_retail: Option<f64>) -> String {
    match original_retail {
        Some(retail) => format!(
            "Rent from {} • Retail {}",
            format_price(from),
            format_price(retail)
        ),
        None => format!("Rent from {}", format_price(from)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(25.0), "$25");
        assert_eq!(format_price(19.5), "$19.5");
    }

    #[test]
    fn test_format_price_range() {
        assert_eq!(format_price_range(25.0, None), "Rent from $25");
        assert_eq!(
            format_price_range(25.0, Some(120.0)),
            "Rent from $25 • Retail $120"
        );
    }
}
