pub mod account_store;
pub mod alpha_vantage;
pub mod db_init;
pub mod ledger;
pub mod ledger_engine;
pub mod mongo_store;
pub mod order_executor;
pub mod price_source;
pub mod seed;
pub mod valuation_service;
