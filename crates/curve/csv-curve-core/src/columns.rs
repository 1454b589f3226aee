//! Column tables: explicit registration of (column index, member, default).
//!
//! A [`ColumnSet`] is built once per record type and is immutable afterwards.
//! Each registered column owns a setter that converts a raw field with the
//! member type's [`FromField`] converter and assigns it. A failed conversion
//! assigns the declared default instead and is reported to the caller as a
//! [`ConvertFailed`]; it never aborts the row.
//!
//! Rows are split on a single delimiter with no escaping, so a field that
//! contains the delimiter shifts every later column.

use std::fmt;

use hashbrown::HashMap;

use crate::convert::{ConvertError, FromField};

/// Record types that declare their own column table.
pub trait CsvRecord: Default + Sized + 'static {
    fn columns() -> ColumnSet<Self>;
}

/// One field that fell back to its column default.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertFailed {
    /// 1-based line number in the source resource.
    pub row: usize,
    pub column: usize,
    pub member: &'static str,
    pub failed_value: String,
    /// Debug rendering of the default that was assigned.
    pub replacement: String,
    pub reason: String,
}

impl fmt::Display for ConvertFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} column {} ('{}'): {:?} replaced by {} ({})",
            self.row, self.column, self.member, self.failed_value, self.replacement, self.reason
        )
    }
}

struct FieldFailure {
    replacement: String,
    error: ConvertError,
}

type Setter<T> = Box<dyn Fn(&mut T, &str) -> Result<(), FieldFailure> + Send + Sync>;

struct Column<T> {
    member: &'static str,
    setter: Setter<T>,
}

/// Column index -> convert-and-assign table for `T`.
pub struct ColumnSet<T> {
    columns: HashMap<usize, Column<T>>,
}

impl<T: 'static> ColumnSet<T> {
    pub fn builder() -> ColumnSetBuilder<T> {
        ColumnSetBuilder {
            columns: HashMap::new(),
        }
    }
}

impl<T> ColumnSet<T> {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Member bound to `index`, if any.
    pub fn member(&self, index: usize) -> Option<&'static str> {
        self.columns.get(&index).map(|c| c.member)
    }

    pub fn max_index(&self) -> Option<usize> {
        self.columns.keys().copied().max()
    }
}

impl<T: Default> ColumnSet<T> {
    /// Build one record from `line`.
    ///
    /// Fields without a registered column are ignored; registered columns past
    /// the end of the row keep `T::default()`. `on_failure` is called once per
    /// field that fell back to its default.
    pub fn map_row<F>(&self, line: &str, delimiter: char, row: usize, mut on_failure: F) -> T
    where
        F: FnMut(ConvertFailed),
    {
        let mut record = T::default();
        for (index, field) in line.split(delimiter).enumerate() {
            let Some(column) = self.columns.get(&index) else {
                continue;
            };
            if let Err(failure) = (column.setter)(&mut record, field) {
                on_failure(ConvertFailed {
                    row,
                    column: index,
                    member: column.member,
                    failed_value: field.to_string(),
                    replacement: failure.replacement,
                    reason: failure.error.reason,
                });
            }
        }
        record
    }
}

impl<T> fmt::Debug for ColumnSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(usize, &'static str)> =
            self.columns.iter().map(|(i, c)| (*i, c.member)).collect();
        entries.sort_unstable_by_key(|(i, _)| *i);
        f.debug_struct("ColumnSet").field("columns", &entries).finish()
    }
}

/// Registration front-end for [`ColumnSet`].
pub struct ColumnSetBuilder<T> {
    columns: HashMap<usize, Column<T>>,
}

impl<T: 'static> ColumnSetBuilder<T> {
    /// Bind column `index` to `member`.
    ///
    /// `assign` writes the converted value (or `default` on failure) into the
    /// record. Registering the same index twice keeps the later registration.
    pub fn column<V, F>(mut self, index: usize, member: &'static str, default: V, assign: F) -> Self
    where
        V: FromField + Clone + fmt::Debug + Send + Sync + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let setter = move |target: &mut T, raw: &str| match V::from_field(raw) {
            Ok(value) => {
                assign(target, value);
                Ok(())
            }
            Err(error) => {
                let replacement = format!("{default:?}");
                assign(target, default.clone());
                Err(FieldFailure { replacement, error })
            }
        };
        let previous = self.columns.insert(
            index,
            Column {
                member,
                setter: Box::new(setter),
            },
        );
        if let Some(prev) = previous {
            log::debug!(
                "column {index} rebound from '{}' to '{member}'",
                prev.member
            );
        }
        self
    }

    pub fn build(self) -> ColumnSet<T> {
        ColumnSet {
            columns: self.columns,
        }
    }
}
