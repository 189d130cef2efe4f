/// Parameters for one quote request: an ordered set of symbols and an
/// optional list of fields to restrict the response to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteQuery {
    symbols: Vec<String>,
    fields: Vec<String>,
}

impl QuoteQuery {
    /// Builds a query from `symbols`, dropping blanks and repeats.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        symbols
            .into_iter()
            .fold(Self::default(), |query, symbol| query.with_symbol(symbol.as_ref()))
    }

    /// Adds a symbol. Repeats keep their first position.
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        let symbol = symbol.trim();
        if !symbol.is_empty() && !self.symbols.iter().any(|s| s == symbol) {
            self.symbols.push(symbol.to_string());
        }
        self
    }

    /// Restricts the response to `field` (e.g. `regularMarketPrice`).
    pub fn with_field(mut self, field: &str) -> Self {
        let field = field.trim();
        if !field.is_empty() && !self.fields.iter().any(|f| f == field) {
            self.fields.push(field.to_string());
        }
        self
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Query parameters in the order they are sent: `symbols`, then `fields`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("symbols", self.symbols.join(","))];
        if !self.fields.is_empty() {
            params.push(("fields", self.fields.join(",")));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_dedupes_and_keeps_order() {
        let query = QuoteQuery::new(["MSFT", "AAPL", "MSFT", " ", "GOOG"]);
        assert_eq!(query.symbols(), ["MSFT", "AAPL", "GOOG"]);
    }

    #[test]
    fn params_without_fields() {
        let query = QuoteQuery::new(["AAPL", "MSFT"]);
        assert_eq!(query.to_params(), vec![("symbols", "AAPL,MSFT".to_string())]);
    }

    #[test]
    fn params_with_fields() {
        let query = QuoteQuery::new(["AAPL"])
            .with_field("regularMarketPrice")
            .with_field("currency")
            .with_field("currency");
        assert_eq!(
            query.to_params(),
            vec![
                ("symbols", "AAPL".to_string()),
                ("fields", "regularMarketPrice,currency".to_string()),
            ]
        );
    }

    #[test]
    fn empty_query() {
        assert!(QuoteQuery::default().is_empty());
        assert!(QuoteQuery::new(Vec::<String>::new()).is_empty());
        assert!(!QuoteQuery::new(["AAPL"]).is_empty());
    }
}
