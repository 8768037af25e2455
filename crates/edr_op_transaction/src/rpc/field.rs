use super::ConversionError;

/// A JSON object field that distinguishes between being absent, being
/// explicitly `null`, and holding a value.
///
/// Use with `#[serde(default, skip_serializing_if = "JsonField::is_absent")]`
/// so missing fields deserialize as [`JsonField::Absent`] and absent fields
/// are omitted on serialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum JsonField<T> {
    /// The field does not occur in the object.
    #[default]
    Absent,
    /// The field occurs with a `null` value.
    Null,
    /// The field occurs with a value.
    Present(T),
}

impl<T> JsonField<T> {
    /// Constructs a field from an optional value, mapping `None` to
    /// [`JsonField::Absent`].
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(JsonField::Absent, JsonField::Present)
    }

    /// Returns whether the field does not occur in the object.
    pub fn is_absent(&self) -> bool {
        matches!(self, JsonField::Absent)
    }

    /// Returns whether the field holds a (non-null) value.
    pub fn is_present(&self) -> bool {
        matches!(self, JsonField::Present(_))
    }

    /// Returns a reference to the value, if any.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            JsonField::Present(value) => Some(value),
            JsonField::Absent | JsonField::Null => None,
        }
    }

    /// Converts into the value, if any. Absent and `null` fields both yield
    /// `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            JsonField::Present(value) => Some(value),
            JsonField::Absent | JsonField::Null => None,
        }
    }

    /// Converts into the value of a required field.
    ///
    /// A required field is only satisfied if it is present and not `null`.
    pub fn required(self, name: &'static str) -> Result<T, ConversionError> {
        self.into_option()
            .ok_or(ConversionError::MissingField(name))
    }
}

impl<T: serde::Serialize> serde::Serialize for JsonField<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            JsonField::Absent | JsonField::Null => serializer.serialize_none(),
            JsonField::Present(value) => value.serialize(serializer),
        }
    }
}

impl<'deserializer, T: serde::Deserialize<'deserializer>> serde::Deserialize<'deserializer>
    for JsonField<T>
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'deserializer>,
    {
        // Only invoked for fields that occur in the object; absent fields are
        // handled by `#[serde(default)]`.
        let value = Option::<T>::deserialize(deserializer)?;
        Ok(value.map_or(JsonField::Null, JsonField::Present))
    }
}
