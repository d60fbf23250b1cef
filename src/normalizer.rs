use crate::config::FieldValue;

/// Flattens a field value into a sequence. Missing values become empty.
pub fn normalize(value: Option<&FieldValue>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(FieldValue::Scalar(s)) => vec![s.clone()],
        Some(FieldValue::Sequence(items)) => items.to_vec(),
    }
}
