//! Compiles a validated request into flat corpus query parameters.
//!
//! The output map is the complete query contract: `dictionary`, `bedeutung`,
//! `case` and `exact` are always present, and the scope contributes `orte`
//! and/or `landkreise`. A `BTreeMap` keeps the parameter order stable for
//! output and tests.

use std::collections::BTreeMap;

use crate::request::SearchRequest;
use crate::scope::SearchScope;

/// Corpus identifier for the Franconian dictionary.
pub const DICTIONARY: &str = "wbf";

/// Builds the full parameter map for a request.
///
/// A free-text town on the request replaces the `orte` constraint but never
/// touches `landkreise`, so an area scope with a town override still limits
/// the search to the area's district.
pub fn compile(request: &SearchRequest) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert("dictionary".to_string(), DICTIONARY.to_string());
    params.insert("bedeutung".to_string(), request.word.clone());
    params.insert("case".to_string(), "no".to_string());
    params.insert(
        "exact".to_string(),
        if request.exact { "yes" } else { "no" }.to_string(),
    );

    match request.scope {
        SearchScope::Region(region) => {
            params.insert(
                "landkreise".to_string(),
                region.district_codes().join(","),
            );
        }
        SearchScope::City(city) => {
            params.insert("orte".to_string(), city.name().to_string());
        }
        SearchScope::District(district) => {
            params.insert("landkreise".to_string(), district.code().to_string());
        }
        SearchScope::Area(area) => {
            params.insert("orte".to_string(), area.city_name().to_string());
            params.insert("landkreise".to_string(), area.district_code().to_string());
        }
        SearchScope::CustomTown => {
            // Request validation guarantees a town for this scope; the
            // override below fills in `orte`.
        }
    }

    if let Some(town) = &request.town {
        params.insert("orte".to_string(), town.clone());
    }

    params
}
