pub mod ledger;
pub mod order;
pub mod product;

pub use ledger::*;
pub use order::*;
pub use product::*;
