pub mod day;
pub mod milestone;
pub mod objective;
pub mod settings;
pub mod stats;
pub mod task;

use prosperity_core::{Result, Store};

/// Open the store and run the day rollover before handling any command,
/// so operations never act on a stale day's task set.
pub fn open_store() -> Result<Store> {
    let mut store = Store::open()?;
    store.initialize_day()?;
    Ok(store)
}
