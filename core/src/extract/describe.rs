//! Description synthesizer: natural-language sentences for tool invocations

use crate::error::{Error, Result};
use crate::extract::types::TypedArgument;
use handlebars::Handlebars;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;

/// Per-tool rendering configuration beyond the template string itself
#[derive(Debug, Clone, Default)]
struct TemplateSpec {
    /// Fallback text per template variable when the call did not supply it
    defaults: Vec<(String, String)>,

    /// Key aliases: if the call supplied `from` but not `to`, the value of
    /// `from` is rendered under `to`
    aliases: Vec<(String, String)>,
}

/// Registry of per-tool description templates with a generic fallback
///
/// Templates are handlebars strings over the invocation's arguments, e.g.
/// `"I'll book hotel ID {{hotel_id}} for you."`. `Default` registers the
/// travel-support templates.
pub struct DescriptionTemplates {
    registry: Handlebars<'static>,
    specs: HashMap<String, TemplateSpec>,
}

impl DescriptionTemplates {
    /// Create an empty registry; every tool falls back to the generic form
    pub fn empty() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        Self {
            registry,
            specs: HashMap::new(),
        }
    }

    /// Register a template for a tool
    pub fn register(&mut self, tool_name: &str, template: &str) -> Result<()> {
        self.register_with(tool_name, template, &[], &[])
    }

    /// Register a template with per-variable fallback text and key aliases
    pub fn register_with(
        &mut self,
        tool_name: &str,
        template: &str,
        defaults: &[(&str, &str)],
        aliases: &[(&str, &str)],
    ) -> Result<()> {
        self.registry
            .register_template_string(tool_name, template)
            .map_err(|e| {
                Error::Generic(format!(
                    "invalid description template for '{}': {}",
                    tool_name, e
                ))
            })?;

        self.specs.insert(
            tool_name.to_string(),
            TemplateSpec {
                defaults: defaults
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                aliases: aliases
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            },
        );
        Ok(())
    }

    /// Whether a template is registered for this tool
    pub fn has_template(&self, tool_name: &str) -> bool {
        self.specs.contains_key(tool_name)
    }

    /// Render a description for the invocation. Never fails: unregistered
    /// tools and render errors fall back to the generic form.
    pub fn describe(&self, tool_name: &str, arguments: &[TypedArgument]) -> String {
        if let Some(spec) = self.specs.get(tool_name) {
            let data = self.render_data(spec, arguments);
            match self.registry.render(tool_name, &data) {
                Ok(text) => return text,
                Err(e) => {
                    warn!(tool = tool_name, error = %e, "template render failed, using generic description");
                }
            }
        }
        generic_description(tool_name, arguments)
    }

    /// Build the render data: defaults, then supplied arguments (last
    /// occurrence wins), then alias resolution.
    fn render_data(&self, spec: &TemplateSpec, arguments: &[TypedArgument]) -> Value {
        let mut data = Map::new();
        for (key, fallback) in &spec.defaults {
            data.insert(key.clone(), Value::String(fallback.clone()));
        }

        let mut supplied = Map::new();
        for arg in arguments {
            supplied.insert(arg.key.clone(), Value::String(arg.value.to_string()));
        }

        for (from, to) in &spec.aliases {
            if !supplied.contains_key(to) {
                if let Some(value) = supplied.get(from) {
                    data.insert(to.clone(), value.clone());
                }
            }
        }

        for (key, value) in supplied {
            data.insert(key, value);
        }
        Value::Object(data)
    }
}

impl Default for DescriptionTemplates {
    /// The travel-support templates
    fn default() -> Self {
        let mut templates = Self::empty();

        // Registration of literal templates cannot fail
        let _ = templates.register_with(
            "search_flights",
            "I'll search for flights from {{departure_airport}} to {{arrival_airport}} for you.",
            &[
                ("departure_airport", "your departure city"),
                ("arrival_airport", "your destination"),
            ],
            &[],
        );
        let _ = templates.register_with(
            "search_hotels",
            "Let me search for hotels in {{location}}.",
            &[("location", "your destination")],
            &[("city", "location")],
        );
        let _ = templates.register_with(
            "book_hotel",
            "I'll book hotel ID {{hotel_id}} for you.",
            &[("hotel_id", "the selected hotel")],
            &[],
        );
        let _ = templates.register_with(
            "book_car_rental",
            "I'll book car rental ID {{rental_id}} for you.",
            &[("rental_id", "the selected car")],
            &[],
        );
        let _ = templates.register_with(
            "cancel_booking",
            "I'll cancel your {{booking_type}} {{booking_id}} for you.",
            &[("booking_type", "booking"), ("booking_id", "")],
            &[],
        );
        let _ = templates.register(
            "lookup_policy",
            "Let me look up our company policies for you.",
        );
        let _ = templates.register(
            "fetch_user_flight_information",
            "Let me check your current flight bookings.",
        );
        let _ = templates.register_with(
            "web_search_tool",
            "I'll search the web for information about {{query}}.",
            &[("query", "your request")],
            &[],
        );

        templates
    }
}

/// `"{tool} will be called with {key: value, ...}"`
fn generic_description(tool_name: &str, arguments: &[TypedArgument]) -> String {
    if arguments.is_empty() {
        return format!("{} will be called with no arguments", tool_name);
    }

    let rendered: Vec<String> = arguments
        .iter()
        .map(|a| format!("{}: {}", a.key, a.value))
        .collect();
    format!("{} will be called with {{{}}}", tool_name, rendered.join(", "))
}
