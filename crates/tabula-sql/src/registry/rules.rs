//! Rendering rules for the built-in column kinds.

use super::Registry;
use crate::{
    foreign_key,
    render::{ColumnCx, ColumnFragment},
    stmt::{ColumnDef, IntegerSize, Type},
};

use tabula_core::{
    schema::{Column, TypeTag},
    Error, Result,
};

/// Width of a `YYYY-MM-DD HH:ii:ss` timestamp.
const CREATED_AT_WIDTH: u64 = 19;

/// Integer width used when a column does not declare one.
const DEFAULT_INT_BYTES: u8 = 4;

pub(super) fn register(registry: &mut Registry) {
    registry
        .register(TypeTag::INT, int)
        .register(TypeTag::AUTO_INC, auto_inc)
        .register(TypeTag::BOOL, boolean)
        .register(TypeTag::FLOAT, float)
        .register(TypeTag::DECIMAL, decimal)
        .register(TypeTag::STRING, string)
        .register(TypeTag::CHAR, character)
        .register(TypeTag::TEXT, text)
        .register(TypeTag::ENUM, enumeration)
        .register(TypeTag::CREATED_AT, created_at)
        .register(TypeTag::DATE, date)
        .register(TypeTag::TIME, time)
        .register(TypeTag::TIMESTAMP, timestamp)
        .register(TypeTag::DATETIME, datetime)
        .register(TypeTag::OBJECT, foreign_key::synthesize)
        .register_unstored(TypeTag::FILES, files);
}

/// A column of storage type `ty` carrying the column's nullability and
/// default.
fn plain(column: &Column, ty: Type) -> Result<Option<ColumnFragment>> {
    let def = ColumnDef::new(&column.name, ty)
        .not_null(column.not_null)
        .default_value(column.default.clone());

    Ok(Some(ColumnFragment::new(def)))
}

fn int(cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    let bytes = column.size.unwrap_or(DEFAULT_INT_BYTES);
    let size = IntegerSize::from_bytes(bytes)
        .ok_or_else(|| Error::invalid_size_spec(cx.table_name(), &column.name, bytes))?;

    plain(
        column,
        Type::Integer {
            size,
            unsigned: column.unsigned,
        },
    )
}

fn auto_inc(_cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    let def = ColumnDef::new(&column.name, Type::RowId)
        .primary_key(true)
        .auto_increment(true)
        .not_null(true);

    Ok(Some(ColumnFragment::new(def)))
}

fn boolean(_cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    plain(
        column,
        Type::Integer {
            size: IntegerSize::Tiny,
            unsigned: true,
        },
    )
}

fn float(_cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    plain(
        column,
        Type::Float {
            unsigned: column.unsigned,
        },
    )
}

fn decimal(_cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    let digits = column.digits.map(|digits| {
        let after = u32::from(digits.after);
        (u32::from(digits.before) + after, after)
    });

    plain(column, Type::Numeric(digits))
}

fn string(_cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    textual(column, Type::VarChar)
}

fn character(_cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    textual(column, Type::Char)
}

fn text(_cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    textual(column, Type::Text)
}

fn textual(column: &Column, ty: fn(Option<u64>) -> Type) -> Result<Option<ColumnFragment>> {
    let ty = if column.binary {
        Type::Blob(column.max_length)
    } else {
        ty(column.max_length)
    };

    plain(column, ty)
}

/// Enumerations are stored as strings as wide as the longest value.
fn enumeration(cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    let Some(width) = column
        .enum_values
        .iter()
        .map(|value| value.chars().count() as u64)
        .max()
    else {
        return Err(Error::invalid_schema(format!(
            "enumeration column `{}.{}` declares no values",
            cx.table_name(),
            column.name
        )));
    };

    string(cx, &column.clone().max_length(width))
}

fn created_at(cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    let width = match column.millis {
        Some(millis) if millis > 0 => CREATED_AT_WIDTH + 1 + u64::from(millis),
        _ => CREATED_AT_WIDTH,
    };

    character(cx, &column.clone().max_length(width))
}

fn date(_cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    plain(column, Type::Date)
}

fn time(_cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    plain(column, Type::Time)
}

fn timestamp(_cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    plain(column, Type::Timestamp(column.millis.unwrap_or(0)))
}

fn datetime(_cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
    plain(column, Type::DateTime(column.millis.unwrap_or(0)))
}

/// Attachments live outside the table.
fn files(_cx: &ColumnCx<'_>, _column: &Column) -> Result<Option<ColumnFragment>> {
    Ok(None)
}
