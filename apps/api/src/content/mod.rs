// Content engine: the entity collections behind the portfolio, the
// snapshot codec for backup/restore, the built-in seed data, and the
// HTTP handlers over all of it.

pub mod defaults;
pub mod handlers;
pub mod snapshot;
pub mod store;
