pub mod quotes;
pub mod rates;

pub use quotes::QuoteStore;
pub use rates::RateStore;
