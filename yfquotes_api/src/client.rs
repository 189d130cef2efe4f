//! Crumb-authenticated quote fetching with a single refresh-and-retry.

use std::sync::Arc;

use reqwest::StatusCode;
use url::Url;

use crate::{
    parser::{parse_elements, ElementParser},
    query::{encode_params, QuoteQuery},
    types::QuoteEnvelope,
    Credential, CredentialCache, Error, Transport,
};

const QUOTES_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";
const CRUMB_URL: &str = "https://finance.yahoo.com/quote/%5EGSPC/options";

/// URLs of the quote endpoint and the crumb endpoint.
#[derive(Clone, Debug)]
pub struct Endpoints {
    pub quotes_url: Url,
    pub crumb_url: Url,
}

impl Endpoints {
    /// Production endpoints.
    pub fn new() -> Self {
        Self {
            quotes_url: Url::parse(QUOTES_URL).expect("static quotes URL is valid"),
            crumb_url: Url::parse(CRUMB_URL).expect("static crumb URL is valid"),
        }
    }

    /// Endpoints under a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            quotes_url: parse_url(&format!("{}/v7/finance/quote", base_url))?,
            crumb_url: parse_url(&format!("{}/v1/test/getcrumb", base_url))?,
        })
    }

    /// Endpoints from explicit URLs.
    pub fn from_urls(quotes_url: &str, crumb_url: &str) -> Result<Self, Error> {
        Ok(Self {
            quotes_url: parse_url(quotes_url)?,
            crumb_url: parse_url(crumb_url)?,
        })
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| {
        tracing::error!("Invalid URL {}: {}", url, e);
        Error::InvalidRequest(format!("invalid URL '{}': {}", url, e))
    })
}

/// What one authenticated request produced, before envelope parsing.
enum Attempt {
    Accepted(String),
    Unauthorized,
}

/// Fetches quotes with a crumb from a shared [`CredentialCache`].
///
/// A 401 answered to a cached crumb triggers exactly one forced refresh and
/// one more attempt; a 401 answered to a freshly minted crumb is final. So a
/// fetch makes at most two quote requests.
pub struct QuoteFetcher<P> {
    transport: Transport,
    credentials: Arc<CredentialCache>,
    quotes_url: Url,
    parser: P,
}

impl<P: ElementParser> QuoteFetcher<P> {
    pub fn new(
        transport: Transport,
        credentials: Arc<CredentialCache>,
        quotes_url: Url,
        parser: P,
    ) -> Self {
        Self {
            transport,
            credentials,
            quotes_url,
            parser,
        }
    }

    /// The credential cache this fetcher draws crumbs from.
    pub fn credentials(&self) -> &Arc<CredentialCache> {
        &self.credentials
    }

    /// Fetches and parses quotes for every symbol in `query`.
    ///
    /// Results come back in the order the service lists them. Elements that
    /// fail to parse are logged and left out.
    pub async fn fetch(&self, query: &QuoteQuery) -> Result<Vec<P::Output>, Error> {
        if query.is_empty() {
            return Err(Error::InvalidRequest("no symbols requested".to_string()));
        }

        let mut force_refresh = false;
        loop {
            let credential = self.credentials.get_credential(force_refresh).await?;
            match self.attempt(query, &credential).await? {
                Attempt::Accepted(body) => return self.parse_body(&body),
                Attempt::Unauthorized if credential.is_fresh() => {
                    tracing::error!("Quote request unauthorized with a fresh crumb");
                    return Err(Error::Auth {
                        status: StatusCode::UNAUTHORIZED.as_u16(),
                    });
                }
                Attempt::Unauthorized => {
                    tracing::warn!("Cached crumb rejected, refreshing and retrying");
                    force_refresh = true;
                }
            }
        }
    }

    /// Fetches a single symbol, returning its quote if the service knows it.
    pub async fn fetch_one(&self, symbol: &str) -> Result<Option<P::Output>, Error> {
        let quotes = self.fetch(&QuoteQuery::new([symbol])).await?;
        Ok(quotes.into_iter().next())
    }

    fn request_url(&self, query: &QuoteQuery, credential: &Credential) -> Url {
        let mut params = query.to_params();
        params.push(("crumb", credential.value().to_string()));
        let mut url = self.quotes_url.clone();
        url.set_query(Some(&encode_params(&params)));
        url
    }

    async fn attempt(&self, query: &QuoteQuery, credential: &Credential) -> Result<Attempt, Error> {
        let url = self.request_url(query, credential);
        tracing::debug!("Sending request: {}", url);

        let resp = self.transport.get(url, credential.cookie()).await?;
        tracing::debug!("Response code: {}", resp.status);

        if resp.status == StatusCode::UNAUTHORIZED {
            return Ok(Attempt::Unauthorized);
        }
        if !resp.status.is_success() {
            let snippet = truncate_body(&resp.body);
            tracing::error!("Request failed with status {}: {}", resp.status, snippet);
            return Err(Error::HttpStatus {
                status: resp.status.as_u16(),
                body: snippet,
            });
        }
        Ok(Attempt::Accepted(resp.body))
    }

    fn parse_body(&self, body: &str) -> Result<Vec<P::Output>, Error> {
        let envelope = serde_json::from_str::<QuoteEnvelope>(body).map_err(|e| {
            let snippet = truncate_body(body);
            tracing::error!("Invalid response: {} | body: {}", e, snippet);
            Error::Protocol(format!("missing quoteResponse.result: {}", e))
        })?;

        if let Some(err) = &envelope.quote_response.error {
            tracing::warn!("Quote response carried an error: {}", err);
        }
        Ok(parse_elements(&self.parser, &envelope.quote_response.result))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
