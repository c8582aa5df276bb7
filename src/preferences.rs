//! Viewer preferences persisted in `localStorage`.
//!
//! Stored as camelCase JSON under [`STORAGE_KEY`]. Other pages keep their own
//! fields in the same blob, so loading ignores unknown keys and saving merges
//! into whatever object is already there.

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use web_sys::Storage;

use crate::components::particle_field::{FieldConfig, ThemeMode};

/// `localStorage` key holding the preferences blob.
pub const STORAGE_KEY: &str = "userPreferences";

/// Largest count the settings slider offers.
pub const MAX_PARTICLE_COUNT: usize = 200;

/// Persisted viewer choices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
	#[serde(deserialize_with = "count_or_default")]
	pub particle_count: usize,
	pub theme: ThemeMode,
}

impl Default for Preferences {
	fn default() -> Self {
		Self {
			particle_count: FieldConfig::default().particle_count,
			theme: ThemeMode::default(),
		}
	}
}

/// Other pages store the count straight from `parseInt`, so it may be `null`
/// or some other non-count value. Fall back instead of rejecting the blob.
fn count_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
	let value = Value::deserialize(deserializer)?;
	Ok(value
		.as_u64()
		.and_then(|n| usize::try_from(n).ok())
		.unwrap_or_else(|| Preferences::default().particle_count))
}

fn storage() -> Option<Storage> {
	web_sys::window()?.local_storage().ok()?
}

impl Preferences {
	/// Preferences matching what `config` currently shows.
	pub fn from_config(config: &FieldConfig, theme: ThemeMode) -> Self {
		Self {
			particle_count: config.particle_count,
			theme,
		}
	}

	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Write these preferences into `existing` (a previously stored blob),
	/// keeping any fields that belong to someone else.
	pub fn merge_into(&self, existing: Option<&str>) -> Result<String, serde_json::Error> {
		let mut object = match existing.map(serde_json::from_str::<Value>) {
			Some(Ok(Value::Object(map))) => map,
			_ => Map::new(),
		};
		if let Value::Object(ours) = serde_json::to_value(self)? {
			object.extend(ours);
		}
		serde_json::to_string(&Value::Object(object))
	}

	/// Apply the stored count and theme colors to `config`.
	pub fn apply(&self, config: &mut FieldConfig) {
		config.particle_count = self.particle_count.min(MAX_PARTICLE_COUNT);
		self.theme.theme().apply(config);
	}

	/// Read stored preferences. `None` when storage is unavailable, empty or
	/// unreadable.
	pub fn load() -> Option<Self> {
		let text = storage()?.get_item(STORAGE_KEY).ok()??;
		match Self::from_json(&text) {
			Ok(prefs) => {
				debug!("preferences: loaded {:?}", prefs);
				Some(prefs)
			}
			Err(e) => {
				warn!("preferences: ignoring malformed {}: {}", STORAGE_KEY, e);
				None
			}
		}
	}

	pub fn save(&self) {
		let Some(storage) = storage() else {
			return;
		};
		let existing = storage.get_item(STORAGE_KEY).ok().flatten();
		let text = match self.merge_into(existing.as_deref()) {
			Ok(text) => text,
			Err(e) => {
				warn!("preferences: cannot serialize: {}", e);
				return;
			}
		};
		if let Err(e) = storage.set_item(STORAGE_KEY, &text) {
			warn!("preferences: save failed: {:?}", e);
		}
	}

	/// Forget stored preferences.
	pub fn reset() {
		if let Some(storage) = storage() {
			if let Err(e) = storage.remove_item(STORAGE_KEY) {
				warn!("preferences: reset failed: {:?}", e);
			}
		}
	}
}
