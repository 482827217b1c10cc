//! Field types and literal values.

use std::fmt;

use smol_str::SmolStr;

/// Built-in scalar types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    VarInt,
    VarLong,
    Int,
    Bool,
    String,
    Char,
    Double,
    Float,
    Short,
}

impl Primitive {
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::VarInt => "VarInt",
            Primitive::VarLong => "VarLong",
            Primitive::Int => "int",
            Primitive::Bool => "bool",
            Primitive::String => "String",
            Primitive::Char => "char",
            Primitive::Double => "double",
            Primitive::Float => "float",
            Primitive::Short => "short",
        }
    }

    /// Whether a field of this type may carry a literal default.
    pub fn accepts_default(self) -> bool {
        matches!(
            self,
            Primitive::String
                | Primitive::Int
                | Primitive::Short
                | Primitive::Double
                | Primitive::VarInt
                | Primitive::VarLong
        )
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of a field.
///
/// References are kept as the dotted path written in the source; nothing
/// checks that the path names an existing record or enum.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(Primitive),
    Reference(SmolStr),
    List(Box<Type>),
}

impl Type {
    pub fn list(inner: Type) -> Self {
        Type::List(Box::new(inner))
    }

    /// Type name as written: the primitive name, the dotted path, or
    /// `"List"` for every list regardless of its element type.
    pub fn name(&self) -> &str {
        match self {
            Type::Primitive(p) => p.as_str(),
            Type::Reference(path) => path,
            Type::List(_) => "List",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Type::List(_))
    }

    /// Element type of a list.
    pub fn sub_type(&self) -> Option<&Type> {
        match self {
            Type::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// The element type after unwrapping every list layer.
    pub fn innermost(&self) -> &Type {
        let mut ty = self;
        while let Type::List(inner) = ty {
            ty = inner;
        }
        ty
    }

    /// Number of nested list layers.
    pub fn list_depth(&self) -> usize {
        let mut depth = 0;
        let mut ty = self;
        while let Type::List(inner) = ty {
            depth += 1;
            ty = inner;
        }
        depth
    }

    /// A list counts as primitive when its innermost element is.
    pub fn is_primitive(&self) -> bool {
        matches!(self.innermost(), Type::Primitive(_))
    }
}

impl From<Primitive> for Type {
    fn from(p: Primitive) -> Self {
        Type::Primitive(p)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.list_depth();
        for _ in 0..depth {
            f.write_str("List<")?;
        }
        f.write_str(self.innermost().name())?;
        for _ in 0..depth {
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// A literal default value.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(SmolStr),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Float(v) => write!(f, "{}", v),
            Literal::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_list_shape() {
        let ty = Type::list(Type::list(Type::Primitive(Primitive::Int)));

        assert!(ty.is_list());
        assert_eq!(ty.name(), "List");
        assert_eq!(ty.list_depth(), 2);
        assert_eq!(ty.innermost(), &Type::Primitive(Primitive::Int));
        assert!(ty.is_primitive());
        assert_eq!(ty.to_string(), "List<List<int>>");
    }

    #[test]
    fn test_reference_is_not_primitive() {
        let ty = Type::list(Type::Reference("net.types.Vec3".into()));

        assert!(!ty.is_primitive());
        assert_eq!(ty.sub_type().map(Type::name), Some("net.types.Vec3"));
    }

    #[test]
    fn test_defaults_allowed_only_on_some_scalars() {
        assert!(Primitive::VarLong.accepts_default());
        assert!(Primitive::String.accepts_default());
        assert!(!Primitive::Bool.accepts_default());
        assert!(!Primitive::Float.accepts_default());
        assert!(!Primitive::Char.accepts_default());
    }
}
