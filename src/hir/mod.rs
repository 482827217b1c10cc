//! The resolved schema graph.
//!
//! Built once by the parser, file by file, and then only read by the
//! code generator:
//!
//! ```text
//! Registry ─┬─ Namespace "a.b" ─┬─ StructHolder (file 0): enums, records, packets
//!           │                   └─ StructHolder (file 3): ...
//!           └─ Namespace "c"   ── ...
//! ```

mod decl;
mod namespace;
mod types;

pub use decl::{Enum, Field, PACKET_ID_FIELD, Packet, Record};
pub use namespace::{Namespace, Registry, StructHolder};
pub use types::{Literal, Primitive, Type};
