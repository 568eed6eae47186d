//! Semantic token categories and positioned tokens.
//!
//! Backends classify lexical tokens ("function", "parameter", ...). The
//! bridge repurposes them to infer precise symbol ranges, so only the
//! categories that refinement consumes are modeled; everything else a
//! backend emits is dropped at the boundary.

use crate::geometry::Range;

/// Semantic token category, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Method,
    Function,
    Class,
    Struct,
    Interface,
    Variable,
    Parameter,
    /// Operators and punctuation; carries brace tokens for body scanning.
    Operator,
}

impl TokenCategory {
    /// Categories consulted when locating a declaration token.
    pub const DECLARATION: [TokenCategory; 7] = [
        Self::Method,
        Self::Function,
        Self::Class,
        Self::Struct,
        Self::Interface,
        Self::Variable,
        Self::Parameter,
    ];

    /// Categories consulted when scanning for a balanced body.
    pub const BODY_SCAN: [TokenCategory; 1] = [Self::Operator];

    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Function => "function",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Variable => "variable",
            Self::Parameter => "parameter",
            Self::Operator => "operator",
        }
    }

    /// Parse a wire token type. Unknown types return `None` and are
    /// skipped at the boundary.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "method" => Some(Self::Method),
            "function" => Some(Self::Function),
            "class" => Some(Self::Class),
            "struct" => Some(Self::Struct),
            "interface" => Some(Self::Interface),
            "variable" => Some(Self::Variable),
            "parameter" => Some(Self::Parameter),
            "operator" => Some(Self::Operator),
            _ => None,
        }
    }
}

/// One classified token with its document position and source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPosition {
    pub range: Range,
    pub text: String,
    pub category: TokenCategory,
}

impl TokenPosition {
    #[must_use]
    pub fn new(range: Range, text: impl Into<String>, category: TokenCategory) -> Self {
        Self {
            range,
            text: text.into(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for category in TokenCategory::DECLARATION
            .iter()
            .chain(TokenCategory::BODY_SCAN.iter())
        {
            assert_eq!(TokenCategory::from_wire(category.as_wire()), Some(*category));
        }
    }

    #[test]
    fn test_unknown_wire_name_is_none() {
        assert_eq!(TokenCategory::from_wire("decorator"), None);
        assert_eq!(TokenCategory::from_wire(""), None);
    }

    #[test]
    fn test_declaration_set_excludes_operator() {
        assert!(!TokenCategory::DECLARATION.contains(&TokenCategory::Operator));
        assert!(TokenCategory::BODY_SCAN.contains(&TokenCategory::Operator));
    }
}
