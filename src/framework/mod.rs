//! Adapter-facing model
//!
//! The types an adapter author works with. Internal identifiers never reach
//! this layer: entities and attributes are addressed by external identifier
//! only, and objects are open maps from external identifier to [`Value`].

mod types;
mod value;

pub use types::{
    AdapterError, AttributeConfig, ConnectorInfo, DatasourceAuthCredentials, EntityConfig, Page,
    Request, Response,
};
pub use value::{Object, Value};
