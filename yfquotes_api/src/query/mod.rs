mod common;
pub use self::common::encode_params;

mod quote;
pub use self::quote::QuoteQuery;
