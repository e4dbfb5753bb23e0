//! Type descriptors.
//!
//! Every value in Чпп is one machine word, so the parser only ever
//! produces [`TypeInfo::Int`] and the array/function shapes around it;
//! the richer variants exist for the semantic stage to refine. The type
//! tree is owned: `Clone` is a deep copy and `Drop` releases children
//! first. Cycles cannot be constructed.

use std::fmt;

/// Recursive type descriptor.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeInfo {
    Void,
    Bool,
    Char,
    /// The machine-word integer — the only declarable type in source.
    Int,
    /// Array of `elem`; `size: None` means "unspecified" (array parameter).
    Array {
        elem: Box<TypeInfo>,
        size: Option<i64>,
    },
    /// Function signature: return type plus ordered parameter types.
    Function {
        ret: Box<TypeInfo>,
        params: Vec<TypeInfo>,
    },
}

impl TypeInfo {
    /// Array of `elem` with a known size.
    pub fn array(elem: TypeInfo, size: i64) -> Self {
        TypeInfo::Array {
            elem: Box::new(elem),
            size: Some(size),
        }
    }

    /// Array of `elem` with unspecified size (the `name::` parameter form).
    pub fn array_unsized(elem: TypeInfo) -> Self {
        TypeInfo::Array {
            elem: Box::new(elem),
            size: None,
        }
    }

    /// Function type.
    pub fn function(ret: TypeInfo, params: Vec<TypeInfo>) -> Self {
        TypeInfo::Function {
            ret: Box::new(ret),
            params,
        }
    }

    /// True for the scalar word-sized variants.
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            TypeInfo::Bool | TypeInfo::Char | TypeInfo::Int
        )
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeInfo::Void => f.write_str("void"),
            TypeInfo::Bool => f.write_str("bool"),
            TypeInfo::Char => f.write_str("char"),
            TypeInfo::Int => f.write_str("word"),
            TypeInfo::Array { elem, size } => match size {
                Some(n) => write!(f, "{elem}[{n}]"),
                None => write!(f, "{elem}[]"),
            },
            TypeInfo::Function { ret, params } => {
                f.write_str("fn(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {ret}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_scalars() {
        assert_eq!(TypeInfo::Int.to_string(), "word");
        assert_eq!(TypeInfo::Void.to_string(), "void");
        assert_eq!(TypeInfo::Bool.to_string(), "bool");
    }

    #[test]
    fn display_arrays() {
        assert_eq!(TypeInfo::array(TypeInfo::Int, 4).to_string(), "word[4]");
        assert_eq!(TypeInfo::array_unsized(TypeInfo::Int).to_string(), "word[]");
    }

    #[test]
    fn display_function() {
        let sig = TypeInfo::function(TypeInfo::Int, vec![TypeInfo::Int, TypeInfo::Int]);
        assert_eq!(sig.to_string(), "fn(word, word) -> word");
        let nullary = TypeInfo::function(TypeInfo::Void, vec![]);
        assert_eq!(nullary.to_string(), "fn() -> void");
    }

    #[test]
    fn clone_is_deep_and_independent() {
        let original = TypeInfo::function(
            TypeInfo::array(TypeInfo::Int, 8),
            vec![TypeInfo::Int, TypeInfo::array_unsized(TypeInfo::Char)],
        );
        let mut copy = original.clone();
        assert_eq!(original, copy);

        // Mutating the copy must not affect the original.
        if let TypeInfo::Function { params, .. } = &mut copy {
            params.push(TypeInfo::Bool);
        }
        assert_ne!(original, copy);
    }

    #[test]
    fn scalar_predicate() {
        assert!(TypeInfo::Int.is_scalar());
        assert!(TypeInfo::Char.is_scalar());
        assert!(!TypeInfo::Void.is_scalar());
        assert!(!TypeInfo::array(TypeInfo::Int, 1).is_scalar());
    }
}
