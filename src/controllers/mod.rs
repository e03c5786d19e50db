pub mod api_error;
pub mod home_controller;
pub mod stocks_controller;
pub mod trading_controller;
