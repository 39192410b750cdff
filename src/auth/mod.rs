//! Caller authentication
//!
//! Every inbound request presents a token that must belong to the set of
//! valid tokens. The set is loaded from a JSON file holding an array of
//! token strings and may be reloaded while the server runs; many requests
//! read it concurrently while reloads take the write lock.

mod store;

pub use store::TokenStore;
