//! Model types for parsed branch definitions.

use std::fmt;

/// Scalar types a branch can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Immutable C string reference
    String,
    /// Signed 8-bit integer
    Int8,
    /// Unsigned 8-bit integer
    UInt8,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 16-bit integer
    UInt16,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    UInt32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 64-bit integer
    UInt64,
    /// Single precision float
    Float32,
    /// Double precision float
    Float64,
    /// Boolean
    Bool,
}

/// Type code, variant and storage type name, one row per scalar type.
const TYPE_TABLE: [(char, ScalarType, &str); 12] = [
    ('C', ScalarType::String, "Text_t const*"),
    ('B', ScalarType::Int8, "Char_t"),
    ('b', ScalarType::UInt8, "UChar_t"),
    ('S', ScalarType::Int16, "Short_t"),
    ('s', ScalarType::UInt16, "UShort_t"),
    ('I', ScalarType::Int32, "Int_t"),
    ('i', ScalarType::UInt32, "UInt_t"),
    ('L', ScalarType::Int64, "Long64_t"),
    ('l', ScalarType::UInt64, "ULong64_t"),
    ('F', ScalarType::Float32, "Float_t"),
    ('D', ScalarType::Float64, "Double_t"),
    ('O', ScalarType::Bool, "Bool_t"),
];

impl ScalarType {
    /// Look up a type code. The code must be exactly one table entry.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        TYPE_TABLE
            .iter()
            .find(|(c, _, _)| *c == ch)
            .map(|(_, ty, _)| *ty)
    }

    fn row(self) -> &'static (char, ScalarType, &'static str) {
        // every variant has exactly one row
        TYPE_TABLE
            .iter()
            .find(|(_, ty, _)| *ty == self)
            .unwrap_or(&TYPE_TABLE[0])
    }

    /// The one-letter type code used in definitions and booking.
    pub fn code(self) -> char {
        self.row().0
    }

    /// The storage type name in generated code.
    pub fn type_name(self) -> &'static str {
        self.row().2
    }

    /// Whether this is a floating point type.
    pub fn is_floating(self) -> bool {
        matches!(self, ScalarType::Float32 | ScalarType::Float64)
    }

    /// Literal used when a branch has no explicit initializer.
    pub fn zero_literal(self) -> &'static str {
        match self {
            ScalarType::Bool => "false",
            ty if ty.is_floating() => "0.",
            _ => "0",
        }
    }

    /// Type to cast to before printing, for types a stream would render as characters.
    pub fn print_widened(self) -> Option<ScalarType> {
        match self {
            ScalarType::Int8 => Some(ScalarType::Int32),
            ScalarType::UInt8 => Some(ScalarType::UInt32),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// One array dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dimension {
    /// Integer literal extent, keeping its spelling for the generated code
    Literal { text: String, value: u64 },
    /// Symbolic constant expression, resolved by the compiler of the generated code
    Symbol(String),
}

impl Dimension {
    /// Classify a dimension token.
    pub fn from_token(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(value) = token.parse() {
                return Dimension::Literal {
                    text: token.to_string(),
                    value,
                };
            }
        }
        Dimension::Symbol(token.to_string())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Literal { text, .. } | Dimension::Symbol(text) => f.write_str(text),
        }
    }
}

/// Fixed array shape of a branch, outermost dimension first.
///
/// An empty shape is a scalar branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayShape(Vec<Dimension>);

impl ArrayShape {
    /// Build a shape from dimension tokens.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        Self(tokens.into_iter().map(Dimension::from_token).collect())
    }

    /// Whether the shape has no dimensions.
    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Iterate the dimensions, outermost first.
    pub fn iter(&self) -> std::slice::Iter<'_, Dimension> {
        self.0.iter()
    }

    /// Wrap an element type in one `std::array` per dimension, innermost first.
    pub fn wrap(&self, element: &str) -> String {
        self.0.iter().rev().fold(element.to_string(), |inner, dim| {
            format!("std::array<{}, {}>", inner, dim)
        })
    }

    /// Product expression of all dimensions, e.g. `4 * nMax`.
    pub fn element_count(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" * ")
    }
}

/// Bracketed text of the shape, e.g. `[4][nMax]`.
impl fmt::Display for ArrayShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dim in &self.0 {
            write!(f, "[{}]", dim)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ArrayShape {
    type Item = &'a Dimension;
    type IntoIter = std::slice::Iter<'a, Dimension>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Modifier flags of a branch. Letters may appear in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// `!`: excluded from persistence operations
    pub transient: bool,
    /// `m`: declared `mutable` in record roles
    pub mutable: bool,
}

impl Modifiers {
    /// Modifier letter for [`Modifiers::transient`].
    pub const TRANSIENT: char = '!';
    /// Modifier letter for [`Modifiers::mutable`].
    pub const MUTABLE: char = 'm';
}

/// A single branch definition.
///
/// Built once per definition line by [`Branch::parse`] and immutable
/// afterwards. Absent optional parts are stored as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub(crate) name: String,
    pub(crate) scalar: ScalarType,
    pub(crate) shape: ArrayShape,
    pub(crate) modifiers: Modifiers,
    pub(crate) initializer: String,
    pub(crate) comment: String,
    pub(crate) default_value: String,
    pub(crate) init_statement: String,
}

impl Branch {
    /// Branch name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scalar element type.
    pub fn scalar_type(&self) -> ScalarType {
        self.scalar
    }

    /// Array shape (empty for scalars).
    pub fn shape(&self) -> &ArrayShape {
        &self.shape
    }

    /// Modifier flags.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether the branch has at least one dimension.
    pub fn is_array(&self) -> bool {
        !self.shape.is_scalar()
    }

    /// Whether the branch is kept away from the persistence runtime.
    pub fn is_transient(&self) -> bool {
        self.modifiers.transient
    }

    /// Whether record roles declare the branch `mutable`.
    pub fn is_mutable(&self) -> bool {
        self.modifiers.mutable
    }

    /// Explicit initializer literal, empty when none was given.
    pub fn initializer(&self) -> &str {
        &self.initializer
    }

    /// Trailing comment with its leading space, empty when none was given.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Value every element starts from: the explicit literal or the type's zero.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Statement resetting the branch to its default value.
    pub fn init_statement(&self) -> &str {
        &self.init_statement
    }

    /// Storage type name of one element.
    pub fn type_name(&self) -> &'static str {
        self.scalar.type_name()
    }

    /// Full value type including the array wrappers.
    pub fn value_type(&self) -> String {
        self.shape.wrap(self.scalar.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_table_round_trip() {
        for (code, ty, name) in TYPE_TABLE {
            assert_eq!(ScalarType::from_code(&code.to_string()), Some(ty));
            assert_eq!(ty.code(), code);
            assert_eq!(ty.type_name(), name);
        }
    }

    #[test]
    fn test_from_code_rejects() {
        assert_eq!(ScalarType::from_code("Q"), None);
        assert_eq!(ScalarType::from_code("II"), None);
        assert_eq!(ScalarType::from_code(""), None);
    }

    #[test]
    fn test_zero_literals() {
        assert_eq!(ScalarType::Bool.zero_literal(), "false");
        assert_eq!(ScalarType::Float32.zero_literal(), "0.");
        assert_eq!(ScalarType::Float64.zero_literal(), "0.");
        assert_eq!(ScalarType::UInt16.zero_literal(), "0");
        assert_eq!(ScalarType::String.zero_literal(), "0");
    }

    #[test]
    fn test_shape_wrap_innermost_first() {
        let shape = ArrayShape::from_tokens(["4", "nMax"]);
        assert_eq!(shape.wrap("Int_t"), "std::array<std::array<Int_t, nMax>, 4>");
        assert_eq!(shape.to_string(), "[4][nMax]");
        assert_eq!(shape.element_count(), "4 * nMax");
        assert_eq!(
            shape.iter().cloned().collect::<Vec<_>>(),
            vec![
                Dimension::Literal {
                    text: "4".to_string(),
                    value: 4
                },
                Dimension::Symbol("nMax".to_string())
            ]
        );
    }

    #[test]
    fn test_literal_keeps_spelling() {
        // a leading zero is octal in C++, so the text must survive unchanged
        let shape = ArrayShape::from_tokens(["010", "2"]);
        assert_eq!(shape.wrap("Int_t"), "std::array<std::array<Int_t, 2>, 010>");
        assert_eq!(shape.element_count(), "010 * 2");
        assert_eq!(shape.to_string(), "[010][2]");
        assert_eq!(
            shape.iter().next(),
            Some(&Dimension::Literal {
                text: "010".to_string(),
                value: 10
            })
        );
    }

    #[test]
    fn test_scalar_shape() {
        let shape = ArrayShape::default();
        assert!(shape.is_scalar());
        assert_eq!(shape.wrap("Float_t"), "Float_t");
        assert_eq!(shape.to_string(), "");
    }
}
