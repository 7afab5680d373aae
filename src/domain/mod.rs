mod balance;
mod calendar;
mod entry;
mod money;

pub use balance::*;
pub use calendar::*;
pub use entry::*;
pub use money::*;
