//! Conversion from the dataframe engine's columnar layout
//!
//! The engine hands us one array per physical quantity for each object
//! category, aligned by index. We zip them into an ObjectCollection once,
//! checking that every column has the same length.

use crate::{
    numeric::Float,
    object::{AuxFlag, AuxValue, ObjectCollection, PhysicsObject},
    Result,
};

use eyre::ensure;

/// Auxiliary column waiting to be zipped with the kinematics
enum AuxColumn<'data> {
    Float(&'data [Float]),
    Int(&'data [i32]),
}
//
impl AuxColumn<'_> {
    fn len(&self) -> usize {
        match self {
            Self::Float(column) => column.len(),
            Self::Int(column) => column.len(),
        }
    }

    fn value(&self, index: usize) -> AuxValue {
        match self {
            Self::Float(column) => AuxValue::Float(column[index]),
            Self::Int(column) => AuxValue::Int(column[index]),
        }
    }
}

/// Builder of an ObjectCollection from aligned columns
pub struct CollectionBuilder<'data> {
    pt: &'data [Float],
    eta: &'data [Float],
    phi: &'data [Float],
    mass: &'data [Float],
    aux: Vec<(AuxFlag, AuxColumn<'data>)>,
}
//
impl<'data> CollectionBuilder<'data> {
    /// Start from the kinematic columns
    pub fn new(
        pt: &'data [Float],
        eta: &'data [Float],
        phi: &'data [Float],
        mass: &'data [Float],
    ) -> Self {
        Self {
            pt,
            eta,
            phi,
            mass,
            aux: Vec::new(),
        }
    }

    /// Add a floating-point auxiliary column
    pub fn with_float(mut self, flag: AuxFlag, column: &'data [Float]) -> Self {
        self.aux.push((flag, AuxColumn::Float(column)));
        self
    }

    /// Add an integer auxiliary column
    pub fn with_int(mut self, flag: AuxFlag, column: &'data [i32]) -> Self {
        self.aux.push((flag, AuxColumn::Int(column)));
        self
    }

    /// Zip the columns into objects
    pub fn build(self) -> Result<ObjectCollection> {
        let len = self.pt.len();
        for (name, column_len) in [
            ("eta", self.eta.len()),
            ("phi", self.phi.len()),
            ("mass", self.mass.len()),
        ] {
            ensure!(
                column_len == len,
                "Column {name} has {column_len} entries, expected {len} like pt"
            );
        }
        for (flag, column) in &self.aux {
            let column_len = column.len();
            ensure!(
                column_len == len,
                "Column {flag:?} has {column_len} entries, expected {len} like pt"
            );
        }

        Ok((0..len)
            .map(|i| {
                self.aux.iter().fold(
                    PhysicsObject::new(self.pt[i], self.eta[i], self.phi[i], self.mass[i]),
                    |obj, (flag, column)| obj.with_aux(*flag, column.value(i)),
                )
            })
            .collect())
    }
}
