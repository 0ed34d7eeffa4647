//! Projection of selection state into value matrices.
//!
//! Every builder reads cells through [`DataProjection::value`], which maps a
//! (column, filtered row) coordinate to the row's value for that column's
//! field. Coordinates are data-relative: header rows are already removed.
//! Out-of-range coordinates read as `Value::Null`. Nothing is cached.

use serde_json::Value;

use super::projection::DataProjection;
use super::selection::SelectionRect;

/// A matrix of cell values, outer index first.
pub type Matrix = Vec<Vec<Value>>;

/// Cell values keyed by field name, each an array of values.
pub type FieldValues = serde_json::Map<String, Value>;

/// One row per requested row, one entry per column:
/// `rows.len()` × `column_count`.
pub fn row_selection_matrix<P>(projection: &P, rows: &[usize]) -> Matrix
where
    P: DataProjection + ?Sized,
{
    let columns = projection.column_count();
    rows.iter()
        .map(|&y| (0..columns).map(|x| projection.value(x, y).clone()).collect())
        .collect()
}

/// One entry per requested column, each holding every filtered row:
/// `columns.len()` × `row_count`.
pub fn column_selection_matrix<P>(projection: &P, columns: &[usize]) -> Matrix
where
    P: DataProjection + ?Sized,
{
    let rows = projection.row_count();
    columns
        .iter()
        .map(|&x| (0..rows).map(|y| projection.value(x, y).clone()).collect())
        .collect()
}

/// One matrix per rectangle, column-major: `width` × `height`.
pub fn selection_matrix<P>(projection: &P, rects: &[SelectionRect]) -> Vec<Matrix>
where
    P: DataProjection + ?Sized,
{
    rects
        .iter()
        .map(|rect| {
            (rect.left..=rect.right)
                .map(|x| column_values(projection, x, rect.top..=rect.bottom))
                .collect()
        })
        .collect()
}

/// The requested rows' values for every field.
pub fn row_selection<P>(projection: &P, rows: &[usize]) -> FieldValues
where
    P: DataProjection + ?Sized,
{
    projection
        .fields()
        .iter()
        .enumerate()
        .map(|(x, field)| {
            let values = rows.iter().map(|&y| projection.value(x, y).clone()).collect();
            (field.clone(), Value::Array(values))
        })
        .collect()
}

/// Every filtered row's values for the requested columns.
///
/// Columns without a field are skipped.
pub fn column_selection<P>(projection: &P, columns: &[usize]) -> FieldValues
where
    P: DataProjection + ?Sized,
{
    let rows = projection.row_count();
    columns
        .iter()
        .filter_map(|&x| {
            let field = projection.fields().get(x)?;
            let values = column_values(projection, x, 0..=rows.checked_sub(1)?);
            Some((field.clone(), Value::Array(values)))
        })
        .collect()
}

/// Per rectangle, the covered values keyed by field.
pub fn selection<P>(projection: &P, rects: &[SelectionRect]) -> Vec<FieldValues>
where
    P: DataProjection + ?Sized,
{
    rects
        .iter()
        .map(|rect| {
            (rect.left..=rect.right)
                .filter_map(|x| {
                    let field = projection.fields().get(x)?;
                    let values = column_values(projection, x, rect.top..=rect.bottom);
                    Some((field.clone(), Value::Array(values)))
                })
                .collect()
        })
        .collect()
}

fn column_values<P>(projection: &P, x: usize, rows: std::ops::RangeInclusive<usize>) -> Vec<Value>
where
    P: DataProjection + ?Sized,
{
    rows.map(|y| projection.value(x, y).clone()).collect()
}
