//! Domain types shared by the inflate and load stages.

mod record;
mod symbol;

pub use record::{parse_trading_date, EodFile, EodRecord};
pub use symbol::Symbol;
