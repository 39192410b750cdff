//! Attribute value coercion
//!
//! Turns a dynamically-typed adapter [`Value`](crate::framework::Value) into
//! the wire [`AttributeValue`](crate::wire::AttributeValue)s of a declared
//! attribute type.
//!
//! # Legal runtime types
//!
//! | Declared type | Scalar       | Nullable             |
//! |---------------|--------------|----------------------|
//! | `BOOL`        | `Bool`       | `Optional(Bool)`     |
//! | `DATE_TIME`   | `DateTime`   | `Optional(DateTime)` |
//! | `DOUBLE`      | `Double`     | `Optional(Double)`   |
//! | `DURATION`    | `Duration`   | `Optional(Duration)` |
//! | `INT64`       | `Int64`      | `Optional(Int64)`    |
//! | `STRING`      | `String`     | `Optional(String)`   |
//!
//! A list attribute takes a `List` of any of these, and every element is
//! checked on its own. A non-list attribute never takes a `List`.

mod coerce;

pub use coerce::attribute_values;
