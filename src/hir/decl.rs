//! Declarations: enums, records, packets and their fields.

use std::ops::Deref;

use smol_str::SmolStr;

use super::types::{Literal, Type};

/// Name of the field that carries a packet's wire discriminator.
pub const PACKET_ID_FIELD: &str = "packetID";

/// An enum: a name and its distinct value names in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enum {
    pub name: SmolStr,
    pub values: Vec<SmolStr>,
}

impl Enum {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn has_value(&self, name: &str) -> bool {
        self.values.iter().any(|v| v == name)
    }
}

/// A typed field with an optional literal default.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: SmolStr,
    pub ty: Type,
    pub value: Option<Literal>,
}

impl Field {
    pub fn new(name: impl Into<SmolStr>, ty: Type, value: Option<Literal>) -> Self {
        Self {
            name: name.into(),
            ty,
            value,
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// A named group of fields plus the metatags attached to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub name: SmolStr,
    pub fields: Vec<Field>,
    pub metatags: Vec<SmolStr>,
}

impl Record {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            metatags: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_metatag(&self, tag: &str) -> bool {
        self.metatags.iter().any(|t| t == tag)
    }
}

/// A record identified on the wire by a literal `packetID` field.
///
/// Only constructible from a record that has such a field, see
/// [`Packet::from_record`].
#[derive(Clone, Debug, PartialEq)]
pub struct Packet {
    record: Record,
}

impl Packet {
    /// Wrap a record, handing it back if it has no valued `packetID`.
    pub fn from_record(record: Record) -> Result<Packet, Record> {
        let valued = record
            .field(PACKET_ID_FIELD)
            .is_some_and(Field::has_value);
        if valued {
            Ok(Packet { record })
        } else {
            Err(record)
        }
    }

    pub fn has_packet_id(&self) -> bool {
        self.packet_id().is_some()
    }

    /// The literal value of the `packetID` field.
    pub fn packet_id(&self) -> Option<&Literal> {
        self.record
            .field(PACKET_ID_FIELD)
            .and_then(|f| f.value.as_ref())
    }
}

impl Deref for Packet {
    type Target = Record;

    fn deref(&self) -> &Record {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::Primitive;

    fn packet_id_field(value: Option<Literal>) -> Field {
        Field::new(PACKET_ID_FIELD, Type::Primitive(Primitive::Int), value)
    }

    #[test]
    fn test_packet_requires_valued_id() {
        let mut record = Record::new("Ping");
        record.fields.push(packet_id_field(None));
        let record = Packet::from_record(record).unwrap_err();

        let mut valued = record.clone();
        valued.fields[0].value = Some(Literal::Int(5));
        let packet = Packet::from_record(valued).unwrap();

        assert!(packet.has_packet_id());
        assert_eq!(packet.packet_id(), Some(&Literal::Int(5)));
        assert_eq!(packet.name, "Ping");
    }

    #[test]
    fn test_enum_values() {
        let mut e = Enum::new("Color");
        e.values.push("Red".into());

        assert!(e.has_value("Red"));
        assert!(!e.has_value("Green"));
    }
}
