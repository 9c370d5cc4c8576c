mod loading_modal;
mod price_chart;
mod spinner;
mod status_banner;
mod token_balance;
mod token_info;

pub use loading_modal::LoadingModal;
pub use price_chart::PriceChart;
pub use spinner::Spinner;
pub use status_banner::StatusBanner;
pub use token_balance::TokenBalance;
pub use token_info::TokenInfo;
