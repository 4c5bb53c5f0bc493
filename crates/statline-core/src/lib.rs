// Library root: game-stat records, the loader, and the
// filter/aggregate/sort/format pipeline behind the stats table.

pub mod aggregate;
pub mod config;
pub mod filter;
pub mod format;
pub mod loader;
pub mod page;
pub mod pipeline;
pub mod record;
pub mod sort;
