use std::collections::BTreeMap;

/// A wire-format item: attribute name to typed attribute value.
pub type WireItem = BTreeMap<String, AttributeValue>;

/// A typed attribute value in the store's wire representation.
///
/// Numbers travel as decimal strings, exactly as the store transmits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    S(String),
    N(String),
    B(Vec<u8>),
    Bool(bool),
    Null(bool),
    M(WireItem),
    L(Vec<AttributeValue>),
    Ss(Vec<String>),
    Ns(Vec<String>),
    Bs(Vec<Vec<u8>>),
}

impl AttributeValue {
    /// The store's type descriptor for this value (`S`, `N`, `M`, ...).
    pub fn type_descriptor(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::B(_) => "B",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::Null(_) => "NULL",
            AttributeValue::M(_) => "M",
            AttributeValue::L(_) => "L",
            AttributeValue::Ss(_) => "SS",
            AttributeValue::Ns(_) => "NS",
            AttributeValue::Bs(_) => "BS",
        }
    }

    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_n(&self) -> Option<&str> {
        match self {
            AttributeValue::N(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_m(&self) -> Option<&WireItem> {
        match self {
            AttributeValue::M(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_l(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::L(l) => Some(l),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_descriptors() {
        assert_eq!(AttributeValue::S("x".into()).type_descriptor(), "S");
        assert_eq!(AttributeValue::N("1".into()).type_descriptor(), "N");
        assert_eq!(AttributeValue::Bool(true).type_descriptor(), "BOOL");
        assert_eq!(AttributeValue::Null(true).type_descriptor(), "NULL");
        assert_eq!(AttributeValue::L(vec![]).type_descriptor(), "L");
        assert_eq!(AttributeValue::Ns(vec![]).type_descriptor(), "NS");
    }

    #[test]
    fn test_accessors_reject_other_types() {
        let value = AttributeValue::N("42".into());
        assert_eq!(value.as_n(), Some("42"));
        assert!(value.as_s().is_none());
        assert!(value.as_m().is_none());
        assert!(value.as_l().is_none());
    }
}
