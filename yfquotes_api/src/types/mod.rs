mod envelope;
pub use self::envelope::{QuoteEnvelope, QuoteResponse};

mod quote;
pub use self::quote::{FxQuote, Quote, StockQuote};
