//! particle-field: animated particle/connection background for a web page.
//!
//! This crate provides a WASM canvas component that renders drifting particles
//! joined by fading lines, pushed around by the pointer, with a small settings
//! overlay whose choices persist in `localStorage`.

use getrandom as _;
#[cfg(test)]
use wasm_bindgen_test as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, MouseEvent, Window};

pub mod components;
pub mod preferences;

pub use components::particle_field::{
	Color, FieldConfig, FieldParams, ParticleField, ParticleFieldCanvas, Theme, ThemeMode,
};
use preferences::{MAX_PARTICLE_COUNT, Preferences};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Parse a field configuration document.
pub fn parse_field_config(json_text: &str) -> Result<FieldConfig, serde_json::Error> {
	serde_json::from_str(json_text)
}

/// Load the field configuration from a script element with id="particle-config".
/// Expected format: JSON with { particleCount, particleColor, lineColor }
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_field_config(&json_text) {
		Ok(config) => {
			info!(
				"particle-field: loaded config with {} particles",
				config.particle_count
			);
			Some(config)
		}
		Err(e) => {
			warn!("particle-field: failed to parse config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads configuration and stored preferences, then renders the animated
/// background with its settings overlay.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let defaults = load_field_config().unwrap_or_default();
	let stored = Preferences::load();

	let mut initial = defaults.clone();
	if let Some(ref prefs) = stored {
		prefs.apply(&mut initial);
	}
	let theme_mode = RwSignal::new(stored.map(|p| p.theme).unwrap_or_default());
	let config = RwSignal::new(initial);

	let save = move || {
		Preferences::from_config(&config.get_untracked(), theme_mode.get_untracked()).save();
	};

	let on_count = move |ev: leptos::ev::Event| {
		let Ok(count) = event_target_value(&ev).parse::<usize>() else {
			return;
		};
		config.update(|c| c.particle_count = count.min(MAX_PARTICLE_COUNT));
		save();
	};

	let on_toggle_theme = move |_: MouseEvent| {
		let mode = theme_mode.get_untracked().toggle();
		theme_mode.set(mode);
		config.update(|c| mode.theme().apply(c));
		save();
	};

	let on_reset = move |_: MouseEvent| {
		Preferences::reset();
		theme_mode.set(ThemeMode::default());
		config.set(defaults.clone());
	};

	let page_style = move || {
		format!(
			"min-height: 100vh; background: {};",
			theme_mode.get().theme().background.to_css()
		)
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Particle Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="particle-page" style=page_style>
			<ParticleFieldCanvas config=config fullscreen=true />
			<div class="field-controls">
				<label for="particle-count">
					"Particles: " {move || config.get().particle_count}
				</label>
				<input
					id="particle-count"
					type="range"
					min="0"
					max=MAX_PARTICLE_COUNT.to_string()
					prop:value=move || config.get().particle_count.to_string()
					on:input=on_count
				/>
				<button on:click=on_toggle_theme>
					{move || format!("Switch to {}", theme_mode.get().toggle().theme().name)}
				</button>
				<button on:click=on_reset>"Reset"</button>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_embedded_config() {
		let config = parse_field_config(
			r#"{"particleCount": 80, "particleColor": "rgba(255, 255, 255, 0.8)", "lineColor": "rgba(255, 255, 255, 0.4)"}"#,
		)
		.unwrap();
		assert_eq!(config, FieldConfig::default());
	}

	#[test]
	fn rejects_wrong_types() {
		assert!(parse_field_config(r#"{"particleCount": "many"}"#).is_err());
		assert!(parse_field_config(r#"{"particleCount": -1}"#).is_err());
	}
}
