use std::fmt;

/// One step of a document path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathElement {
    Attribute(String),
    Index(usize),
}

/// A document path such as `info.actors[0]`.
///
/// A path always starts with a top-level attribute name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributePath {
    elements: Vec<PathElement>,
}

impl AttributePath {
    /// Path to a top-level attribute.
    pub fn attr(name: impl Into<String>) -> Self {
        Self {
            elements: vec![PathElement::Attribute(name.into())],
        }
    }

    /// Descend into a map attribute.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.elements.push(PathElement::Attribute(name.into()));
        self
    }

    /// Descend into a list element.
    pub fn index(mut self, index: usize) -> Self {
        self.elements.push(PathElement::Index(index));
        self
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// The top-level attribute name.
    pub fn root(&self) -> &str {
        match self.elements.first() {
            Some(PathElement::Attribute(name)) => name,
            _ => "",
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.elements.len() == 1
    }

    /// The enclosing path, or `None` for a top-level attribute.
    pub fn parent(&self) -> Option<AttributePath> {
        if self.is_top_level() {
            return None;
        }
        Some(Self {
            elements: self.elements[..self.elements.len() - 1].to_vec(),
        })
    }

    /// Whether the last step addresses a list element.
    pub fn ends_with_index(&self) -> bool {
        matches!(self.elements.last(), Some(PathElement::Index(_)))
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            match element {
                PathElement::Attribute(name) if i == 0 => write!(f, "{name}")?,
                PathElement::Attribute(name) => write!(f, ".{name}")?,
                PathElement::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested_path() {
        let path = AttributePath::attr("info").field("actors").index(0);
        assert_eq!(path.to_string(), "info.actors[0]");
        assert_eq!(path.root(), "info");
        assert!(path.ends_with_index());
    }

    #[test]
    fn test_parent() {
        let path = AttributePath::attr("info").field("rating");
        assert_eq!(path.parent(), Some(AttributePath::attr("info")));
        assert_eq!(AttributePath::attr("year").parent(), None);
    }

    #[test]
    fn test_descending_sort_puts_higher_indices_first() {
        let mut paths = vec![
            AttributePath::attr("a").index(0),
            AttributePath::attr("a").index(2),
        ];
        paths.sort_by(|a, b| b.cmp(a));
        assert_eq!(paths[0].to_string(), "a[2]");
    }
}
