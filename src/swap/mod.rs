mod swap_details;
mod swap_panel;
mod swap_settings;
mod widget;

pub use swap_details::SwapDetails;
pub use swap_panel::SwapPanel;
pub use swap_settings::SwapSettings;
pub use widget::SwapWidget;
