mod client;
mod credential;
mod errors;
mod parser;
mod query;
mod transport;
pub mod types;
mod user_agent;
pub use self::client::{Endpoints, QuoteFetcher};
pub use self::credential::{Credential, CredentialCache};
pub use self::errors::Error;
pub use self::parser::{ElementError, ElementParser, FxQuoteParser, StockQuoteParser};
pub use self::query::{encode_params, QuoteQuery};
pub use self::transport::{RawResponse, Transport, TransportConfig};
