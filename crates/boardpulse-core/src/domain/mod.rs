//! Domain types shared across the engine.

pub mod models;
pub mod session;
pub mod symbol;

pub use models::{DayBar, RawSealEvent, SealEvent, SealEventKind, TradingDaySnapshot};
pub use session::{SessionDate, SessionTime};
pub use symbol::SymbolCode;
