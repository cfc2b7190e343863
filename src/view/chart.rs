//! Symbol chart overlay

const WIDGET_URL: &str = "https://s.tradingview.com/widgetembed/";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOverlay {
    pub symbol: String,
    pub title: String,
    pub src: String,
}

/// Overlay for an NSE symbol
pub fn chart_overlay(symbol: &str) -> ChartOverlay {
    let symbol = symbol.trim().to_uppercase();
    ChartOverlay {
        title: format!("📊 NSE:{} Chart", symbol),
        src: format!(
            "{}?symbol=NSE:{}&interval=15&theme=dark&style=1",
            WIDGET_URL,
            urlencoding::encode(&symbol)
        ),
        symbol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_overlay() {
        let overlay = chart_overlay("sbin");
        assert_eq!(overlay.title, "📊 NSE:SBIN Chart");
        assert_eq!(
            overlay.src,
            "https://s.tradingview.com/widgetembed/?symbol=NSE:SBIN&interval=15&theme=dark&style=1"
        );
    }

    #[test]
    fn test_chart_symbol_is_encoded() {
        assert!(chart_overlay("M&M").src.contains("NSE:M%26M&interval"));
    }
}
