// Wire model for the device's settings document.
//
// The firmware exposes hundreds of named fields; modeling each one as a
// struct member would chase firmware drift forever. Instead the document
// is a keyed mapping from field name to `Setting`, with the function-key
// table pulled out as the one typed collection the tooling manipulates.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// The `Type` value marking a function-key slot as unused.
pub const NO_KEY_TYPE: &str = "-1";

/// One settings field: a value plus optional validation metadata.
///
/// On the wire a field arrives either as `{"value": "..."}` (with optional
/// `options`/`min`/`max`) or as a bare scalar; both decode into this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Setting {
    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl Setting {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// A blank setting carries no value. Blank fields are skipped on
    /// serialization because the device merges uploads field-by-field and
    /// treats a present-but-empty field as "no change" anyway.
    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<&str> for Setting {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Deserialize)]
struct FullSetting {
    #[serde(default)]
    value: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    min: Option<i64>,
    #[serde(default)]
    max: Option<i64>,
}

impl<'de> Deserialize<'de> for Setting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Try the object form first, then fall back to a bare scalar;
        // anything else propagates the failure.
        let raw = serde_json::Value::deserialize(deserializer)?;
        match raw {
            serde_json::Value::Object(_) => {
                let full: FullSetting = serde_json::from_value(raw).map_err(D::Error::custom)?;
                Ok(Self {
                    value: full.value,
                    options: full.options,
                    min: full.min,
                    max: full.max,
                })
            }
            serde_json::Value::String(s) => Ok(Self::new(s)),
            serde_json::Value::Number(n) => Ok(Self::new(n.to_string())),
            serde_json::Value::Bool(b) => Ok(Self::new(b.to_string())),
            serde_json::Value::Null => Ok(Self::default()),
            serde_json::Value::Array(_) => {
                Err(D::Error::custom("expected a setting object or a scalar"))
            }
        }
    }
}

/// A programmable button definition on the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionKey {
    #[serde(rename = "Type", default, skip_serializing_if = "Setting::is_blank")]
    pub key_type: Setting,

    #[serde(rename = "DisplayName", default, skip_serializing_if = "Setting::is_blank")]
    pub display_name: Setting,

    #[serde(rename = "PhoneNumber", default, skip_serializing_if = "Setting::is_blank")]
    pub phone_number: Setting,

    #[serde(rename = "CallPickupCode", default, skip_serializing_if = "Setting::is_blank")]
    pub pickup_code: Setting,
}

impl FunctionKey {
    /// A slot is empty when its `Type` equals the `"-1"` sentinel.
    pub fn is_empty(&self) -> bool {
        self.key_type.value == NO_KEY_TYPE
    }

    /// A key carrying only a display name; every other field blank.
    pub fn named(display_name: &str) -> Self {
        Self {
            display_name: Setting::new(display_name),
            ..Self::default()
        }
    }
}

/// The full (or partial) settings document.
///
/// Uploads may be partial: the device merges non-blank fields into its
/// stored settings per key index, which is what makes the blank-except-one
/// function-key rewrite work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(rename = "FunctionKeys", default, skip_serializing_if = "Vec::is_empty")]
    pub function_keys: Vec<FunctionKey>,

    #[serde(flatten)]
    pub fields: IndexMap<String, Setting>,
}

impl Parameters {
    /// A partial document carrying only a function-key table.
    pub fn from_function_keys(function_keys: Vec<FunctionKey>) -> Self {
        Self {
            function_keys,
            fields: IndexMap::new(),
        }
    }
}
