pub mod market_date;
