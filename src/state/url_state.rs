//! URL state encoding/decoding for shareable URLs.
//!
//! The selected location is kept in the query string (`?loc=B1`) so reloading
//! restores it and links can be shared. An API key may also be supplied as
//! `?key=...` for demos without a baked-in key.

/// Parsed URL parameters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UrlParams {
    pub api_key: Option<String>,
    pub location: Option<String>,
}

impl UrlParams {
    /// Parses a query string with or without the leading `?`.
    pub fn from_query(search: &str) -> Self {
        let mut params = UrlParams::default();

        let query = search.trim_start_matches('?');
        if query.is_empty() {
            return params;
        }

        for pair in query.split('&') {
            let mut kv = pair.splitn(2, '=');
            let key = kv.next().unwrap_or("");
            let value = kv.next().unwrap_or("").trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "key" => params.api_key = Some(value.to_string()),
                "loc" => params.location = Some(value.to_string()),
                _ => {}
            }
        }

        params
    }

    /// Encodes the parameters back into a query string.
    pub fn to_query(&self) -> String {
        let pairs: Vec<String> = [("loc", &self.location), ("key", &self.api_key)]
            .into_iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| format!("{}={}", name, v)))
            .collect();
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

/// Query string selecting `location_id`, used for share links.
pub fn selection_query(location_id: &str) -> String {
    format!("?loc={}", location_id)
}

/// Query string for the current page after selecting `location_id`. A `key`
/// already in the URL is kept so a reload can still load the map.
pub fn reload_query(current: &UrlParams, location_id: &str) -> String {
    UrlParams {
        api_key: current.api_key.clone(),
        location: Some(location_id.to_string()),
    }
    .to_query()
}

/// Parse URL query parameters from the current browser URL.
#[cfg(target_arch = "wasm32")]
pub fn parse_from_url() -> UrlParams {
    let Some(window) = web_sys::window() else {
        return UrlParams::default();
    };
    match window.location().search() {
        Ok(search) => UrlParams::from_query(&search),
        Err(_) => UrlParams::default(),
    }
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn parse_from_url() -> UrlParams {
    UrlParams::default()
}

/// Push the selected location to the URL query string using `replaceState`.
///
/// Share links are built separately and never carry the `key` parameter.
#[cfg(target_arch = "wasm32")]
pub fn push_selection(location_id: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    let current = window
        .location()
        .search()
        .map(|search| UrlParams::from_query(&search))
        .unwrap_or_default();
    let _ = history.replace_state_with_url(
        &wasm_bindgen::JsValue::NULL,
        "",
        Some(&reload_query(&current, location_id)),
    );
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn push_selection(_location_id: &str) {}
