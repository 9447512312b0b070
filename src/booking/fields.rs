use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Trip form fields in declared order.
///
/// The derived ordering follows declaration, so any ordered collection keyed
/// by `TripField` iterates in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TripField {
    FullName,
    Phone,
    Email,
    StartLocation,
    EndLocation,
    EventDate,
    PickupTime,
    Hours,
}

impl TripField {
    pub const ALL: [TripField; 8] = [
        TripField::FullName,
        TripField::Phone,
        TripField::Email,
        TripField::StartLocation,
        TripField::EndLocation,
        TripField::EventDate,
        TripField::PickupTime,
        TripField::Hours,
    ];

    /// Form field name as exposed to the presentation layer.
    pub fn key(self) -> &'static str {
        match self {
            TripField::FullName => "fullName",
            TripField::Phone => "phone",
            TripField::Email => "email",
            TripField::StartLocation => "startLocation",
            TripField::EndLocation => "endLocation",
            TripField::EventDate => "eventDate",
            TripField::PickupTime => "pickupTime",
            TripField::Hours => "hours",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TripField::FullName => "Full name",
            TripField::Phone => "Phone",
            TripField::Email => "Email",
            TripField::StartLocation => "Trip start location",
            TripField::EndLocation => "Trip end location",
            TripField::EventDate => "Event date (YYYY-MM-DD)",
            TripField::PickupTime => "Pickup time (HH:MM)",
            TripField::Hours => "Hours required",
        }
    }
}

impl fmt::Display for TripField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown trip field `{}`", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for TripField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        TripField::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownField(needle.to_string()))
    }
}

/// Untrusted text submitted with the trip form. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTripInput {
    values: BTreeMap<TripField, String>,
}

impl RawTripInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds input from `(field name, value)` pairs. Unrecognised names are
    /// ignored, mirroring a form that only reads the fields it declares.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut input = Self::new();
        for (key, value) in pairs {
            if let Ok(field) = key.as_ref().parse::<TripField>() {
                input.set(field, value);
            }
        }
        input
    }

    /// Parses a `name=value` assignment, as typed on the command line.
    pub fn set_assignment(&mut self, assignment: &str) -> Result<TripField, UnknownField> {
        let (key, value) = assignment.split_once('=').unwrap_or((assignment, ""));
        let field = key.parse::<TripField>()?;
        self.set(field, value);
        Ok(field)
    }

    pub fn set(&mut self, field: TripField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Raw value or the empty string when the field was not submitted.
    pub fn get(&self, field: TripField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Field name to message mapping emitted by each validation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrorSet {
    errors: BTreeMap<TripField, String>,
}

impl FieldErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field`, replacing an earlier message.
    pub fn insert(&mut self, field: TripField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn remove(&mut self, field: TripField) -> Option<String> {
        self.errors.remove(&field)
    }

    pub fn get(&self, field: TripField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: TripField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First field, in declared form order, that carries an error.
    pub fn first_invalid(&self) -> Option<TripField> {
        self.errors.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TripField, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}
