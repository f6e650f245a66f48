//! Property sorting over the JSON form of entities.
//!
//! Values of different kinds order as
//! `null < bool < number < string < array < object`; a missing property
//! counts as `null`. Nested properties are addressed with dots
//! (`address.city`).

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use crudhub_domain::paging::{Direction, Sort};

/// Sort `entities` by `sort`, keeping the input order between equal entities.
pub(crate) fn sort_entities<T: Serialize>(
    entities: Vec<T>,
    sort: &Sort,
) -> Result<Vec<T>, serde_json::Error> {
    if sort.is_unsorted() {
        return Ok(entities);
    }
    let mut keyed = entities
        .into_iter()
        .map(|entity| serde_json::to_value(&entity).map(|value| (value, entity)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by(|(left, _), (right, _)| compare_by(left, right, sort));
    Ok(keyed.into_iter().map(|(_, entity)| entity).collect())
}

fn compare_by(left: &Value, right: &Value, sort: &Sort) -> Ordering {
    for order in sort.orders() {
        let ordering = compare_values(
            property(left, &order.property),
            property(right, &order.property),
        );
        let ordering = match order.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn property<'a>(value: &'a Value, path: &str) -> &'a Value {
    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
        .unwrap_or(&Value::Null)
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
        (Value::Number(l), Value::Number(r)) => {
            if let (Some(l), Some(r)) = (l.as_i64(), r.as_i64()) {
                l.cmp(&r)
            } else if let (Some(l), Some(r)) = (l.as_u64(), r.as_u64()) {
                l.cmp(&r)
            } else {
                let l = l.as_f64().unwrap_or(f64::NAN);
                let r = r.as_f64().unwrap_or(f64::NAN);
                l.total_cmp(&r)
            }
        }
        (Value::String(l), Value::String(r)) => l.cmp(r),
        (Value::Array(l), Value::Array(r)) => l
            .iter()
            .zip(r.iter())
            .map(|(l, r)| compare_values(l, r))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or_else(|| l.len().cmp(&r.len())),
        _ => rank(left).cmp(&rank(right)),
    }
}
