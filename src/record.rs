//! Persisting an [`Availability`] as a flat, string-keyed record.
//!
//! # Schema
//! | Key               | Value                                   | Present for                      |
//! |-------------------|-----------------------------------------|----------------------------------|
//! | `type`            | variant name (e.g., `"Reserved"`)       | all                              |
//! | `version`         | [`SCHEMA_VERSION`]                      | all                              |
//! | `holdsPosition`   | decimal string, at least `"1"`          | Reserved                         |
//! | `holdsTotal`      | decimal string or `"unknown"`           | Unavailable, Reserved            |
//! | `copiesAvailable` | decimal string or `"unknown"`           | Unavailable, Limited, Reserved   |
//! | `copiesTotal`     | decimal string or `"unknown"`           | Unavailable, Limited, Reserved   |
//! | `since`, `until`  | ISO 8601 date-time, omitted when absent | Limited, Reserved, Ready         |
//!
//! Records without `version` predate the field and are read as version `1`;
//! any other version below `1` is invalid.
//! Counts stored as JSON numbers are accepted as well.

use crate::availability::{
    Availability, AvailabilityKind, Copies, Limited, Ready, Reserved, Unavailable,
};
use crate::datetime::DateTime;
use crate::errors::{RecordError, RecordResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A persisted [`Availability`].
pub type Record = Map<String, Value>;

/// The record layout written by [`Availability::to_record`].
pub const SCHEMA_VERSION: u64 = 1;

/// Record key names.
///
/// These are read back from existing persisted records and must not change.
pub mod keys {
    pub const TYPE: &str = "type";
    pub const VERSION: &str = "version";
    pub const HOLDS_POSITION: &str = "holdsPosition";
    pub const HOLDS_TOTAL: &str = "holdsTotal";
    pub const COPIES_AVAILABLE: &str = "copiesAvailable";
    pub const COPIES_TOTAL: &str = "copiesTotal";
    pub const SINCE: &str = "since";
    pub const UNTIL: &str = "until";
}

impl Availability {
    /// Encodes this availability as a [`Record`].
    ///
    /// Optional fields that are absent are omitted.
    ///
    /// # Examples
    /// ```
    /// # use opds_availability::{Availability, Copies, Limited};
    /// let limited = Availability::from(Limited::new(Copies::new(0), Copies::new(5), None, None));
    /// let record = limited.to_record();
    ///
    /// assert_eq!(Some("Limited"), record["type"].as_str());
    /// assert_eq!(Some("0"), record["copiesAvailable"].as_str());
    /// assert_eq!(Some("5"), record["copiesTotal"].as_str());
    /// assert!(!record.contains_key("since"));
    /// assert_eq!(Some(limited), Availability::from_record(&record));
    /// ```
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(keys::TYPE.into(), self.kind().as_str().into());
        record.insert(keys::VERSION.into(), SCHEMA_VERSION.into());

        match self {
            Self::Unavailable(unavailable) => {
                put_copies(&mut record, keys::HOLDS_TOTAL, unavailable.holds_total());
                put_copies(&mut record, keys::COPIES_AVAILABLE, unavailable.copies_available());
                put_copies(&mut record, keys::COPIES_TOTAL, unavailable.copies_total());
            }
            Self::Limited(limited) => {
                put_copies(&mut record, keys::COPIES_AVAILABLE, limited.copies_available());
                put_copies(&mut record, keys::COPIES_TOTAL, limited.copies_total());
            }
            Self::Unlimited => {}
            Self::Reserved(reserved) => {
                record.insert(
                    keys::HOLDS_POSITION.into(),
                    reserved.holds_position().to_string().into(),
                );
                put_copies(&mut record, keys::HOLDS_TOTAL, reserved.holds_total());
                put_copies(&mut record, keys::COPIES_AVAILABLE, reserved.copies_available());
                put_copies(&mut record, keys::COPIES_TOTAL, reserved.copies_total());
            }
            Self::Ready(_) => {}
        }

        put_date(&mut record, keys::SINCE, self.since());
        put_date(&mut record, keys::UNTIL, self.until());
        record
    }

    /// Decodes a [`Record`] written by [`Self::to_record`].
    ///
    /// Returns [`None`] if the record has no recognizable discriminator,
    /// lacks a field its variant requires, or holds an unreadable value.
    /// A record is never coerced into another variant.
    ///
    /// # See Also
    /// - [`Self::try_from_record`] to learn why a record was rejected.
    pub fn from_record(record: &Record) -> Option<Self> {
        Self::try_from_record(record)
            .inspect_err(|error| tracing::debug!(%error, "rejecting availability record"))
            .ok()
    }

    /// Decodes a [`Record`] written by [`Self::to_record`],
    /// reporting the reason on failure.
    ///
    /// # Examples
    /// ```
    /// # use opds_availability::Availability;
    /// # use opds_availability::errors::RecordError;
    /// # use opds_availability::record::Record;
    /// let record: Record = serde_json::from_str(r#"{
    ///     "type": "Reserved",
    ///     "holdsTotal": "10",
    ///     "copiesAvailable": "unknown",
    ///     "copiesTotal": "10"
    /// }"#).unwrap();
    ///
    /// assert!(matches!(
    ///     Availability::try_from_record(&record),
    ///     Err(RecordError::MissingField { key: "holdsPosition", .. }),
    /// ));
    /// ```
    pub fn try_from_record(record: &Record) -> RecordResult<Self> {
        let reader = RecordReader(record);
        let kind = reader.kind()?;
        reader.check_version()?;

        let availability: Self = match kind {
            AvailabilityKind::Unavailable => Unavailable::new(
                reader.copies(kind, keys::HOLDS_TOTAL)?,
                reader.copies(kind, keys::COPIES_AVAILABLE)?,
                reader.copies(kind, keys::COPIES_TOTAL)?,
            )
            .into(),
            AvailabilityKind::Limited => Limited::new(
                reader.copies(kind, keys::COPIES_AVAILABLE)?,
                reader.copies(kind, keys::COPIES_TOTAL)?,
                reader.date(keys::SINCE)?,
                reader.date(keys::UNTIL)?,
            )
            .into(),
            AvailabilityKind::Unlimited => Self::Unlimited,
            AvailabilityKind::Reserved => Reserved::new(
                reader.position(kind)?,
                reader.copies(kind, keys::HOLDS_TOTAL)?,
                reader.copies(kind, keys::COPIES_AVAILABLE)?,
                reader.copies(kind, keys::COPIES_TOTAL)?,
                reader.date(keys::SINCE)?,
                reader.date(keys::UNTIL)?,
            )?
            .into(),
            AvailabilityKind::Ready => {
                Ready::new(reader.date(keys::SINCE)?, reader.date(keys::UNTIL)?).into()
            }
        };
        Ok(availability)
    }
}

impl Serialize for Availability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = Record::deserialize(deserializer)?;
        Self::try_from_record(&record).map_err(serde::de::Error::custom)
    }
}

fn put_copies(record: &mut Record, key: &str, copies: Copies) {
    record.insert(key.into(), copies.to_string().into());
}

fn put_date(record: &mut Record, key: &str, date: Option<DateTime>) {
    if let Some(date) = date {
        record.insert(key.into(), date.to_string().into());
    }
}

struct RecordReader<'a>(&'a Record);

impl RecordReader<'_> {
    /// `null` is treated the same as an absent key.
    fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    fn kind(&self) -> RecordResult<AvailabilityKind> {
        let value = self.get(keys::TYPE).ok_or(RecordError::MissingDiscriminator)?;
        let name = value.as_str().ok_or_else(|| invalid(keys::TYPE, value))?;

        AvailabilityKind::from_name(name)
            .ok_or_else(|| RecordError::UnknownVariant(name.to_owned()))
    }

    fn check_version(&self) -> RecordResult<()> {
        let Some(value) = self.get(keys::VERSION) else {
            return Ok(());
        };
        match value.as_u64() {
            Some(version) if version > SCHEMA_VERSION => Err(RecordError::UnsupportedVersion(version)),
            Some(1..) => Ok(()),
            _ => Err(invalid(keys::VERSION, value)),
        }
    }

    fn required(&self, kind: AvailabilityKind, key: &'static str) -> RecordResult<&Value> {
        self.get(key).ok_or(RecordError::MissingField { kind, key })
    }

    fn copies(&self, kind: AvailabilityKind, key: &'static str) -> RecordResult<Copies> {
        let value = self.required(kind, key)?;
        let copies = match value {
            Value::String(raw) => Copies::parse(raw),
            Value::Number(number) => number.as_u64().map(Copies::new),
            _ => None,
        };
        copies.ok_or_else(|| invalid(key, value))
    }

    fn position(&self, kind: AvailabilityKind) -> RecordResult<u64> {
        let key = keys::HOLDS_POSITION;
        let value = self.required(kind, key)?;
        let position = match value {
            Value::String(raw) => raw.trim().parse().ok(),
            Value::Number(number) => number.as_u64(),
            _ => None,
        };
        position.ok_or_else(|| invalid(key, value))
    }

    fn date(&self, key: &'static str) -> RecordResult<Option<DateTime>> {
        self.get(key)
            .map(|value| {
                value
                    .as_str()
                    .and_then(DateTime::parse)
                    .ok_or_else(|| invalid(key, value))
            })
            .transpose()
    }
}

fn invalid(key: &'static str, value: &Value) -> RecordError {
    RecordError::InvalidField {
        key,
        value: value.to_string(),
    }
}
