//! Three-way optional field for partial updates.

use serde::{Deserialize, Deserializer};

/// A partial-update field that distinguishes "not sent" from "explicitly
/// cleared" from "set to a value".
///
/// A plain `Option<T>` in a JSON patch body conflates a field that was
/// omitted with one that was sent as `null`. Voicedesk's update semantics
/// need all three states: an omitted field is left untouched, `null`
/// removes the stored field, and a value overwrites it.
///
/// Use with `#[serde(default)]` so that an absent field deserializes to
/// [`Patch::Keep`]:
///
/// ```
/// use serde::Deserialize;
/// use voicedesk_core::Patch;
///
/// #[derive(Deserialize)]
/// struct Body {
///     #[serde(default)]
///     public_key: Patch<String>,
/// }
///
/// let absent: Body = serde_json::from_str("{}").unwrap();
/// assert!(matches!(absent.public_key, Patch::Keep));
///
/// let cleared: Body = serde_json::from_str(r#"{"public_key": null}"#).unwrap();
/// assert!(matches!(cleared.public_key, Patch::Clear));
///
/// let set: Body = serde_json::from_str(r#"{"public_key": "pub_1"}"#).unwrap();
/// assert!(matches!(set.public_key, Patch::Set(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field was not sent; leave the stored value unchanged.
    Keep,
    /// Field was explicitly `null`; remove the stored value.
    Clear,
    /// Field was sent with a value; overwrite the stored value.
    Set(T),
}

impl<T> Patch<T> {
    /// Returns `true` if the field was not sent.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Convert the carried value, preserving the patch state.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Self::Keep => Patch::Keep,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(f(value)),
        }
    }

    /// Convert the carried value with a fallible function, preserving the
    /// patch state.
    ///
    /// # Errors
    ///
    /// Returns `Err` only when the field carries a value and `f` fails.
    pub fn try_map<U, E, F: FnOnce(T) -> Result<U, E>>(self, f: F) -> Result<Patch<U>, E> {
        Ok(match self {
            Self::Keep => Patch::Keep,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(f(value)?),
        })
    }
}

// Manual impl: a derived Default would demand `T: Default` even though the
// default variant carries no value.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only reached when the field is present; absence is handled by
        // #[serde(default)] on the containing struct.
        Option::<T>::deserialize(deserializer).map(|opt| match opt {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        field: Patch<String>,
    }

    #[test]
    fn absent_field_keeps() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.field, Patch::Keep);
    }

    #[test]
    fn null_field_clears() {
        let body: Body = serde_json::from_str(r#"{"field": null}"#).unwrap();
        assert_eq!(body.field, Patch::Clear);
    }

    #[test]
    fn value_field_sets() {
        let body: Body = serde_json::from_str(r#"{"field": "pub_1"}"#).unwrap();
        assert_eq!(body.field, Patch::Set("pub_1".to_owned()));
    }

    #[test]
    fn try_map_propagates_errors_only_for_set() {
        let fail = |_: String| -> Result<String, &'static str> { Err("nope") };
        assert!(Patch::<String>::Keep.try_map(fail).is_ok());
        assert!(Patch::<String>::Clear.try_map(fail).is_ok());
        assert!(Patch::Set("x".to_owned()).try_map(fail).is_err());
    }
}
