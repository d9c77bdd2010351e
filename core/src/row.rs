//! Rows and hydration.

use std::sync::Arc;

use crate::error::{ProwlError, Result};
use crate::value::{FromValue, Value};

/// One result row: column names shared across the result set plus values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn index_of(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| ProwlError::Mapping(format!("no column named `{column}`")))
    }

    pub fn value(&self, column: &str) -> Option<&Value> {
        self.index_of(column).ok().map(|i| &self.values[i])
    }

    pub fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        let idx = self.index_of(column)?;
        self.get_at(idx)
    }

    pub fn get_at<T: FromValue>(&self, idx: usize) -> Result<T> {
        let value = self
            .values
            .get(idx)
            .ok_or_else(|| ProwlError::Mapping(format!("column index {idx} out of range")))?;
        T::from_value(value.clone())
            .map_err(|e| ProwlError::Mapping(format!("column {idx}: {e}")))
    }

    /// Moves a value out, leaving `Null` behind.
    pub fn take<T: FromValue>(&mut self, column: &str) -> Result<T> {
        let idx = self.index_of(column)?;
        self.take_at(idx)
            .map_err(|e| ProwlError::Mapping(format!("`{column}`: {e}")))
    }

    pub fn take_at<T: FromValue>(&mut self, idx: usize) -> Result<T> {
        let slot = self
            .values
            .get_mut(idx)
            .ok_or_else(|| ProwlError::Mapping(format!("column index {idx} out of range")))?;
        T::from_value(std::mem::take(slot))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Builds a value from a whole row. `#[derive(FromRow)]` implements this
/// by column name.
pub trait FromRow: Sized {
    fn from_row(row: Row) -> Result<Self>;
}

impl FromRow for Row {
    fn from_row(row: Row) -> Result<Self> {
        Ok(row)
    }
}

/// Values mode: the row's values in projection order.
impl FromRow for Vec<Value> {
    fn from_row(row: Row) -> Result<Self> {
        Ok(row.into_values())
    }
}

/// Scalars read the first column.
impl<T: FromValue> FromRow for T {
    fn from_row(row: Row) -> Result<Self> {
        let value = row
            .into_values()
            .into_iter()
            .next()
            .ok_or_else(|| ProwlError::Mapping("empty row".into()))?;
        T::from_value(value)
    }
}

macro_rules! impl_from_row_tuple {
    ($($idx:tt $ty:ident),+) => {
        impl<$($ty: FromValue),+> FromRow for ($($ty,)+) {
            fn from_row(mut row: Row) -> Result<Self> {
                Ok(($(row.take_at::<$ty>($idx)?,)+))
            }
        }
    };
}

impl_from_row_tuple!(0 A);
impl_from_row_tuple!(0 A, 1 B);
impl_from_row_tuple!(0 A, 1 B, 2 C);
impl_from_row_tuple!(0 A, 1 B, 2 C, 3 D);
impl_from_row_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_from_row_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
