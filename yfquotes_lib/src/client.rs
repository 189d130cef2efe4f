//! Caching wrapper around the crumb-authenticated quote fetchers.

use std::collections::HashMap;
use std::sync::Arc;

use yfquotes_api::types::{FxQuote, Quote, StockQuote};
use yfquotes_api::{
    CredentialCache, ElementParser, FxQuoteParser, QuoteFetcher, QuoteQuery, StockQuoteParser,
    Transport,
};

use crate::cache::QuoteCache;
use crate::config::Settings;
use crate::error::QuotesError;
use crate::validation;

/// Quote client that adds per-symbol caching and input validation.
///
/// Stock and currency fetchers share one [`CredentialCache`], so a crumb
/// refreshed by one is immediately used by the other. Cached symbols bypass
/// the network; only the missing ones are requested, in a single call.
pub struct QuoteClient {
    credentials: Arc<CredentialCache>,
    stocks: QuoteFetcher<StockQuoteParser>,
    fx: QuoteFetcher<FxQuoteParser>,
    stock_cache: QuoteCache<StockQuote>,
    fx_cache: QuoteCache<FxQuote>,
}

impl QuoteClient {
    /// Creates a client from settings, seeding the crumb when one is configured.
    pub fn new(settings: &Settings) -> Result<Self, QuotesError> {
        let transport = Transport::new(&settings.transport)?;
        let mut credentials = CredentialCache::new(transport.clone(), settings.endpoints.crumb_url.clone());
        if let Some(crumb) = &settings.crumb {
            credentials = credentials.with_credential(crumb.clone(), settings.cookie.clone())?;
        }
        let credentials = Arc::new(credentials);

        Ok(Self {
            stocks: QuoteFetcher::new(
                transport.clone(),
                Arc::clone(&credentials),
                settings.endpoints.quotes_url.clone(),
                StockQuoteParser,
            ),
            fx: QuoteFetcher::new(
                transport,
                Arc::clone(&credentials),
                settings.endpoints.quotes_url.clone(),
                FxQuoteParser,
            ),
            credentials,
            stock_cache: QuoteCache::new(settings.cache_ttl),
            fx_cache: QuoteCache::new(settings.cache_ttl),
        })
    }

    /// Fetches stock quotes, returning cached results when available.
    ///
    /// Results follow the order of `symbols`; symbols the service does not
    /// know are left out.
    pub async fn get_quotes<S: AsRef<str>>(
        &self,
        symbols: &[S],
        fields: &[String],
    ) -> Result<Vec<StockQuote>, QuotesError> {
        let symbols = validation::validate_symbols(symbols)?;
        if fields.is_empty() {
            return cached_fetch(&self.stocks, &self.stock_cache, symbols).await;
        }

        // A field-restricted quote is incomplete, so it bypasses the cache.
        let query = fields
            .iter()
            .fold(QuoteQuery::new(&symbols), |q, f| q.with_field(f));
        Ok(self.stocks.fetch(&query).await?)
    }

    /// Fetches a single stock quote.
    pub async fn get_quote(&self, symbol: &str) -> Result<Option<StockQuote>, QuotesError> {
        let quotes = self.get_quotes(&[symbol], &[]).await?;
        Ok(quotes.into_iter().next())
    }

    /// Fetches currency pair quotes. Pairs may be written as `EURUSD`,
    /// `EUR/USD` or `EURUSD=X`.
    pub async fn get_fx_quotes<S: AsRef<str>>(&self, pairs: &[S]) -> Result<Vec<FxQuote>, QuotesError> {
        let symbols = pairs
            .iter()
            .map(|p| validation::parse_fx_pair(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let symbols = validation::validate_symbols(&symbols)?;
        cached_fetch(&self.fx, &self.fx_cache, symbols).await
    }

    /// The credential cache shared by both fetchers.
    pub fn credentials(&self) -> &Arc<CredentialCache> {
        &self.credentials
    }

    /// Removes all cached quotes. The crumb is kept.
    pub fn clear_cache(&self) {
        self.stock_cache.clear();
        self.fx_cache.clear();
    }
}

async fn cached_fetch<P>(
    fetcher: &QuoteFetcher<P>,
    cache: &QuoteCache<P::Output>,
    symbols: Vec<String>,
) -> Result<Vec<P::Output>, QuotesError>
where
    P: ElementParser,
    P::Output: Quote + Clone,
{
    let mut found: HashMap<String, P::Output> = HashMap::new();
    let mut missing = Vec::new();
    for symbol in &symbols {
        match cache.get(symbol) {
            Some(quote) => {
                found.insert(symbol.clone(), quote);
            }
            None => missing.push(symbol.clone()),
        }
    }

    if !missing.is_empty() {
        tracing::debug!(
            "{} of {} symbols not cached, fetching",
            missing.len(),
            symbols.len()
        );
        for quote in fetcher.fetch(&QuoteQuery::new(&missing)).await? {
            let symbol = quote.symbol().to_string();
            cache.insert(symbol.clone(), quote.clone());
            found.insert(symbol, quote);
        }
    }

    Ok(symbols
        .iter()
        .filter_map(|symbol| {
            let quote = found.remove(symbol);
            if quote.is_none() {
                tracing::warn!("No quote returned for {}", symbol);
            }
            quote
        })
        .collect())
}
