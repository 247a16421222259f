// View-state stores. Each holds its state behind a `watch` channel and
// exposes snapshot + subscribe accessors alongside its action methods.

pub mod auth;
pub mod issues;
