pub mod static_funds;

pub use static_funds::StaticFundProvider;
