pub mod account;
pub mod order;
pub mod portfolio;
pub mod position;
pub mod trade;
pub mod user;

pub use account::Account;
pub use order::{normalize_symbol, Order, OrderSide};
pub use portfolio::{PortfolioReport, PositionValuation};
pub use position::Position;
pub use trade::Trade;
pub use user::CurrentUser;
