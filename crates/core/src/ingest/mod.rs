pub mod gmp;
pub mod ipo;
pub mod types;
