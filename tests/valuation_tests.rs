mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{memory_ledger, FakePrices};
use demotrader::services::{account_store::AccountStore, seed::seed_demo_accounts};

#[tokio::test]
async fn portfolio_reflects_latest_prices() {
    let prices = FakePrices::with(&[("AAPL", dec!(100)), ("MSFT", dec!(200))]);
    let ledger = memory_ledger(prices.clone());

    ledger.buy("v1", "AAPL", 10).await.unwrap();
    ledger.buy("v1", "MSFT", 5).await.unwrap();

    prices.set("AAPL", dec!(120));
    prices.set("MSFT", dec!(180));

    let report = ledger.get_portfolio("v1").await.unwrap();
    assert!(!report.partial);
    assert_eq!(report.balance, dec!(98000));
    assert_eq!(report.holdings_value, dec!(2100));
    assert_eq!(report.cost_basis, dec!(2000));
    assert_eq!(report.profit_loss, dec!(100));
    assert_eq!(report.profit_loss_percent, dec!(5));
    assert_eq!(report.total_value, dec!(100100));

    let aapl = &report.positions[0];
    assert_eq!(aapl.symbol, "AAPL");
    assert_eq!(aapl.profit_loss, Some(dec!(200)));
    assert_eq!(aapl.profit_loss_percent, Some(dec!(20)));

    let msft = &report.positions[1];
    assert_eq!(msft.profit_loss, Some(dec!(-100)));
    assert_eq!(msft.profit_loss_percent, Some(dec!(-10)));
}

#[tokio::test]
async fn failed_lookup_marks_report_partial() {
    let prices = FakePrices::with(&[("AAPL", dec!(100)), ("TSLA", dec!(250))]);
    let ledger = memory_ledger(prices.clone());

    ledger.buy("v2", "AAPL", 1).await.unwrap();
    ledger.buy("v2", "TSLA", 2).await.unwrap();
    prices.fail("TSLA");

    let report = ledger.get_portfolio("v2").await.unwrap();
    assert!(report.partial);
    assert_eq!(report.holdings_value, dec!(100));

    let tsla = report.positions.iter().find(|p| p.symbol == "TSLA").unwrap();
    assert!(tsla.current_price.is_none());
    assert!(tsla.error.is_some());
    assert_eq!(tsla.quantity, 2);
}

#[tokio::test]
async fn new_account_valuates_to_starting_cash() {
    let ledger = memory_ledger(FakePrices::with(&[]));
    let report = ledger.get_portfolio("fresh").await.unwrap();
    assert_eq!(report.total_value, dec!(100000));
    assert_eq!(report.profit_loss, Decimal::ZERO);
}

#[tokio::test]
async fn demo_accounts_seed_once() {
    let prices = FakePrices::with(&[("AAPL", dec!(175.50)), ("GOOGL", dec!(2750.25))]);
    let ledger = memory_ledger(prices);

    assert_eq!(seed_demo_accounts(ledger.store().as_ref()).await.unwrap(), 2);

    let demo = ledger.store().get("demo-user-1").await.unwrap().unwrap();
    assert_eq!(demo.balance, dec!(100000));
    assert_eq!(demo.positions["GOOGL"].quantity, 5);
    assert_eq!(demo.trades.len(), 2);
    assert_eq!(demo.trades[1].total, dec!(13751.25));

    // flat prices: the seeded positions are at break-even
    let report = ledger.get_portfolio("demo-user-1").await.unwrap();
    assert_eq!(report.profit_loss, Decimal::ZERO);

    assert_eq!(seed_demo_accounts(ledger.store().as_ref()).await.unwrap(), 0);
}
