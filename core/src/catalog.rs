//! Tool catalog describing the external capabilities the model may call
//!
//! The catalog is metadata only: names, descriptions for the system prompt,
//! and optionally the argument names a tool accepts. Execution of the tools
//! themselves lives outside this crate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single tool the model is allowed to call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCatalogEntry {
    /// Name the model uses to call the tool
    pub name: String,

    /// Short description, rendered into the system prompt tool list
    pub description: Option<String>,

    /// Argument names the tool accepts; `None` means accept any
    pub accepted_args: Option<BTreeSet<String>>,
}

impl ToolCatalogEntry {
    /// Create an entry that accepts any arguments
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            description: None,
            accepted_args: None,
        }
    }

    /// Set the description
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict the accepted argument names
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the tool accepts an argument with this key
    pub fn accepts(&self, key: &str) -> bool {
        match &self.accepted_args {
            Some(args) => args.contains(key),
            None => true,
        }
    }
}

/// An ordered collection of tool entries with name lookup
///
/// An empty catalog means "no filtering": every identifier-shaped call in
/// model output is treated as a candidate invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCatalog {
    entries: Vec<ToolCatalogEntry>,
}

impl ToolCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a tool, replacing any previous entry with the same name
    pub fn register(&mut self, entry: ToolCatalogEntry) {
        self.entries.retain(|e| e.name != entry.name);
        self.entries.push(entry);
    }

    /// Builder-style registration
    pub fn with_tool(mut self, entry: ToolCatalogEntry) -> Self {
        self.register(entry);
        self
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<&ToolCatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Whether a tool with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over the entries in registration order
    pub fn entries(&self) -> impl Iterator<Item = &ToolCatalogEntry> {
        self.entries.iter()
    }

    /// Registered tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// The travel-support tool set
    pub fn travel_support() -> Self {
        Self::new()
            .with_tool(
                ToolCatalogEntry::new("search_flights")
                    .with_description("Search for available flights between two airports")
                    .with_args(["departure_airport", "arrival_airport", "date"]),
            )
            .with_tool(
                ToolCatalogEntry::new("search_hotels")
                    .with_description("Search for hotels in a location")
                    .with_args(["location", "city", "check_in", "check_out"]),
            )
            .with_tool(
                ToolCatalogEntry::new("book_hotel")
                    .with_description("Book a hotel by its ID")
                    .with_args(["hotel_id"]),
            )
            .with_tool(
                ToolCatalogEntry::new("book_car_rental")
                    .with_description("Book a rental car by its ID")
                    .with_args(["rental_id"]),
            )
            .with_tool(
                ToolCatalogEntry::new("cancel_booking")
                    .with_description("Cancel an existing booking")
                    .with_args(["booking_type", "booking_id"]),
            )
            .with_tool(
                ToolCatalogEntry::new("lookup_policy")
                    .with_description("Look up company travel policies"),
            )
            .with_tool(
                ToolCatalogEntry::new("fetch_user_flight_information")
                    .with_description("Fetch the user's current flight bookings"),
            )
            .with_tool(
                ToolCatalogEntry::new("web_search_tool")
                    .with_description("Search the web for information")
                    .with_args(["query"]),
            )
    }
}
