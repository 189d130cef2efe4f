use crate::error::QuotesError;

pub const MAX_SYMBOL_LENGTH: usize = 32;
pub const MAX_SYMBOLS_PER_REQUEST: usize = 200;

/// Validate a ticker symbol: trim, uppercase, and allow only `A-Z`, `0-9`
/// and the separators the quote service uses (`.`, `-`, `^`, `=`).
///
/// Examples of valid symbols: `AAPL`, `BRK-B`, `SHOP.TO`, `^GSPC`, `EURUSD=X`.
pub fn validate_symbol(input: &str) -> Result<String, QuotesError> {
    let symbol = input.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(QuotesError::InvalidInput("symbol is empty".to_string()));
    }
    if symbol.len() > MAX_SYMBOL_LENGTH {
        return Err(QuotesError::InvalidInput(format!(
            "symbol '{}' exceeds maximum length of {} characters",
            input.trim(),
            MAX_SYMBOL_LENGTH
        )));
    }
    if let Some(bad) = symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
    {
        return Err(QuotesError::InvalidInput(format!(
            "symbol '{}' contains invalid character '{}'",
            input.trim(),
            bad
        )));
    }
    Ok(symbol)
}

/// Validate a list of symbols: each must pass [`validate_symbol`], repeats are
/// dropped (first occurrence wins), and the list must be non-empty.
pub fn validate_symbols<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<String>, QuotesError> {
    let mut symbols: Vec<String> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let symbol = validate_symbol(input.as_ref())?;
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    if symbols.is_empty() {
        return Err(QuotesError::InvalidInput(
            "at least one symbol is required".to_string(),
        ));
    }
    if symbols.len() > MAX_SYMBOLS_PER_REQUEST {
        return Err(QuotesError::InvalidInput(format!(
            "too many symbols ({}); at most {} per request",
            symbols.len(),
            MAX_SYMBOLS_PER_REQUEST
        )));
    }
    Ok(symbols)
}

/// Build the quote symbol for a currency pair, e.g. `EUR` + `USD` -> `EURUSD=X`.
pub fn fx_pair_symbol(from: &str, to: &str) -> Result<String, QuotesError> {
    let from = validate_currency(from)?;
    let to = validate_currency(to)?;
    Ok(format!("{}{}=X", from, to))
}

/// Parse a currency pair written as `EURUSD`, `EUR/USD`, `eur-usd` or already
/// as `EURUSD=X`, returning the quote symbol.
pub fn parse_fx_pair(input: &str) -> Result<String, QuotesError> {
    let trimmed = input.trim();
    let bare = trimmed
        .strip_suffix("=X")
        .or_else(|| trimmed.strip_suffix("=x"))
        .unwrap_or(trimmed);
    let letters: String = bare.chars().filter(|c| !matches!(c, '/' | '-' | ' ')).collect();
    if letters.len() != 6 || !letters.is_ascii() {
        return Err(QuotesError::InvalidInput(format!(
            "currency pair '{}' must be two 3-letter codes, e.g. EURUSD or EUR/USD",
            input
        )));
    }
    fx_pair_symbol(&letters[..3], &letters[3..])
}

fn validate_currency(input: &str) -> Result<String, QuotesError> {
    let code = input.trim().to_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(QuotesError::InvalidInput(format!(
            "unknown currency code '{}'. Expected a 3-letter ISO code such as USD",
            input
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_trimmed_and_uppercased() {
        assert_eq!(validate_symbol("  aapl ").unwrap(), "AAPL");
        assert_eq!(validate_symbol("brk-b").unwrap(), "BRK-B");
        assert_eq!(validate_symbol("shop.to").unwrap(), "SHOP.TO");
        assert_eq!(validate_symbol("^gspc").unwrap(), "^GSPC");
        assert_eq!(validate_symbol("eurusd=x").unwrap(), "EURUSD=X");
    }

    #[test]
    fn symbol_rejects_bad_input() {
        assert!(validate_symbol("").is_err());
        assert!(validate_symbol("   ").is_err());
        assert!(validate_symbol("AAPL,MSFT").is_err());
        assert!(validate_symbol("AA PL").is_err());
        assert!(validate_symbol("AAPL&crumb=x").is_err());
        assert!(validate_symbol(&"A".repeat(33)).is_err());
    }

    #[test]
    fn symbols_dedupe_in_order() {
        let symbols = validate_symbols(&["msft", "AAPL", "MSFT"]).unwrap();
        assert_eq!(symbols, vec!["MSFT", "AAPL"]);
    }

    #[test]
    fn symbols_require_at_least_one() {
        let empty: [&str; 0] = [];
        assert!(validate_symbols(&empty).is_err());
    }

    #[test]
    fn symbols_fail_on_first_invalid() {
        let err = validate_symbols(&["AAPL", "BAD SYMBOL"]).unwrap_err();
        assert!(err.to_string().contains("BAD SYMBOL"));
    }

    #[test]
    fn symbols_enforce_request_limit() {
        let many: Vec<String> = (0..201).map(|i| format!("S{}", i)).collect();
        assert!(validate_symbols(&many).is_err());
        assert_eq!(validate_symbols(&many[..200]).unwrap().len(), 200);
    }

    #[test]
    fn fx_pair_from_codes() {
        assert_eq!(fx_pair_symbol("eur", "usd").unwrap(), "EURUSD=X");
        assert!(fx_pair_symbol("EURO", "USD").is_err());
        assert!(fx_pair_symbol("E1R", "USD").is_err());
    }

    #[test]
    fn fx_pair_parsing() {
        assert_eq!(parse_fx_pair("EURUSD").unwrap(), "EURUSD=X");
        assert_eq!(parse_fx_pair("gbp/jpy").unwrap(), "GBPJPY=X");
        assert_eq!(parse_fx_pair("usd-chf").unwrap(), "USDCHF=X");
        assert_eq!(parse_fx_pair("EURUSD=X").unwrap(), "EURUSD=X");
        assert!(parse_fx_pair("EUR").is_err());
        assert!(parse_fx_pair("EUR/US").is_err());
    }
}
