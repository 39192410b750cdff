//! Response assembly
//!
//! Re-encodes an adapter [`Response`](crate::framework::Response) into the
//! wire format, using the [`EntityReverseMapping`](crate::request::EntityReverseMapping)
//! built when the request was validated.
//!
//! Invalid objects are handled in two tiers. Encoding a single object fails
//! as a whole on the first bad key; encoding a list of objects logs each
//! failed object and drops it, so the rest of the page is still served.

mod assemble;

pub use assemble::{build_get_page_response, build_object, build_object_list};

#[cfg(test)]
mod tests;
