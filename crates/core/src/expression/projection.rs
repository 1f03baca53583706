use super::AttributePath;

/// The attributes to return from a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    paths: Vec<AttributePath>,
}

impl Projection {
    pub fn new(paths: Vec<AttributePath>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[AttributePath] {
        &self.paths
    }
}
