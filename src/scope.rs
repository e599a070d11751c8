//! Geographic search scopes for the Franconian dictionary corpus.
//!
//! A scope is one of five families: a whole region, an independent city, a
//! district (Landkreis) with an official short code, an area (a city paired
//! with its surrounding district), or an ad-hoc custom town. The tagged
//! union makes it impossible for a scope to belong to zero or multiple
//! families. String tokens (`"landkreis_ansbach"`, `"city_fuerth"`, ...)
//! round-trip for CLI and tool-server input.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The three Franconian administrative regions (Regierungsbezirke).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Oberfranken,
    Mittelfranken,
    Unterfranken,
}

impl Region {
    /// Official short codes of every district in the region.
    ///
    /// Order is fixed; the comma-joined `landkreise` parameter depends on it.
    pub fn district_codes(&self) -> &'static [&'static str] {
        match self {
            Region::Oberfranken => {
                &["BA", "BT", "CO", "FO", "HO", "KC", "KU", "LIF", "WUN"]
            }
            Region::Mittelfranken => &["AN", "ERH", "FÜ", "NEA", "LAU", "RH", "WUG"],
            Region::Unterfranken => {
                &["AB", "KG", "HAS", "KT", "MSP", "MIL", "NES", "SW", "WÜ"]
            }
        }
    }
}

/// Independent cities (kreisfreie Städte) with no surrounding district of
/// their own. Schwabach is the only city without an area counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    // Oberfranken
    Bamberg,
    Bayreuth,
    Coburg,
    Hof,
    // Mittelfranken
    Ansbach,
    Erlangen,
    Fuerth,
    Nuernberg,
    Schwabach,
    // Unterfranken
    Aschaffenburg,
    Schweinfurt,
    Wuerzburg,
}

impl City {
    /// Official place name as it appears in the corpus.
    pub fn name(&self) -> &'static str {
        match self {
            City::Bamberg => "Bamberg",
            City::Bayreuth => "Bayreuth",
            City::Coburg => "Coburg",
            City::Hof => "Hof",
            City::Ansbach => "Ansbach",
            City::Erlangen => "Erlangen",
            City::Fuerth => "Fürth",
            City::Nuernberg => "Nürnberg",
            City::Schwabach => "Schwabach",
            City::Aschaffenburg => "Aschaffenburg",
            City::Schweinfurt => "Schweinfurt",
            City::Wuerzburg => "Würzburg",
        }
    }
}

/// Districts (Landkreise), each identified by its official short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum District {
    // Oberfranken
    Bamberg,
    Bayreuth,
    Coburg,
    Forchheim,
    Hof,
    Kronach,
    Kulmbach,
    Lichtenfels,
    Wunsiedel,
    // Mittelfranken
    Ansbach,
    ErlangenHoechstadt,
    Fuerth,
    NeustadtAischBadWindsheim,
    NuernbergerLand,
    Roth,
    WeissenburgGunzenhausen,
    // Unterfranken
    Aschaffenburg,
    BadKissingen,
    Hassberge,
    Kitzingen,
    MainSpessart,
    Miltenberg,
    RhoenGrabfeld,
    Schweinfurt,
    Wuerzburg,
}

impl District {
    /// Official district short code (Kfz-Kennzeichen style).
    pub fn code(&self) -> &'static str {
        match self {
            District::Bamberg => "BA",
            District::Bayreuth => "BT",
            District::Coburg => "CO",
            District::Forchheim => "FO",
            District::Hof => "HO",
            District::Kronach => "KC",
            District::Kulmbach => "KU",
            District::Lichtenfels => "LIF",
            District::Wunsiedel => "WUN",
            District::Ansbach => "AN",
            District::ErlangenHoechstadt => "ERH",
            District::Fuerth => "FÜ",
            District::NeustadtAischBadWindsheim => "NEA",
            District::NuernbergerLand => "LAU",
            District::Roth => "RH",
            District::WeissenburgGunzenhausen => "WUG",
            District::Aschaffenburg => "AB",
            District::BadKissingen => "KG",
            District::Hassberge => "HAS",
            District::Kitzingen => "KT",
            District::MainSpessart => "MSP",
            District::Miltenberg => "MIL",
            District::RhoenGrabfeld => "NES",
            District::Schweinfurt => "SW",
            District::Wuerzburg => "WÜ",
        }
    }
}

/// An independent city paired with its encompassing district, searched
/// jointly. Nürnberg pairs with the Nürnberger Land district.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    // Oberfranken
    Bamberg,
    Bayreuth,
    Coburg,
    Hof,
    // Mittelfranken
    Ansbach,
    Erlangen,
    Fuerth,
    Nuernberg,
    // Unterfranken
    Aschaffenburg,
    Schweinfurt,
    Wuerzburg,
}

impl Area {
    /// The area's city name.
    pub fn city_name(&self) -> &'static str {
        match self {
            Area::Bamberg => "Bamberg",
            Area::Bayreuth => "Bayreuth",
            Area::Coburg => "Coburg",
            Area::Hof => "Hof",
            Area::Ansbach => "Ansbach",
            Area::Erlangen => "Erlangen",
            Area::Fuerth => "Fürth",
            Area::Nuernberg => "Nürnberg",
            Area::Aschaffenburg => "Aschaffenburg",
            Area::Schweinfurt => "Schweinfurt",
            Area::Wuerzburg => "Würzburg",
        }
    }

    /// The encompassing district's short code.
    pub fn district_code(&self) -> &'static str {
        match self {
            Area::Bamberg => "BA",
            Area::Bayreuth => "BT",
            Area::Coburg => "CO",
            Area::Hof => "HO",
            Area::Ansbach => "AN",
            Area::Erlangen => "ERH",
            Area::Fuerth => "FÜ",
            Area::Nuernberg => "LAU",
            Area::Aschaffenburg => "AB",
            Area::Schweinfurt => "SW",
            Area::Wuerzburg => "WÜ",
        }
    }
}

/// A named geographic search constraint.
///
/// `CustomTown` is the only family that requires a companion free-text town
/// value on the request; that invariant is enforced by request validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Region(Region),
    City(City),
    District(District),
    Area(Area),
    CustomTown,
}

/// Every scope value, in catalog order (regions, cities, districts, areas,
/// custom town).
pub const ALL_SCOPES: &[SearchScope] = &[
    SearchScope::Region(Region::Oberfranken),
    SearchScope::Region(Region::Mittelfranken),
    SearchScope::Region(Region::Unterfranken),
    SearchScope::City(City::Bamberg),
    SearchScope::City(City::Bayreuth),
    SearchScope::City(City::Coburg),
    SearchScope::City(City::Hof),
    SearchScope::City(City::Ansbach),
    SearchScope::City(City::Erlangen),
    SearchScope::City(City::Fuerth),
    SearchScope::City(City::Nuernberg),
    SearchScope::City(City::Schwabach),
    SearchScope::City(City::Aschaffenburg),
    SearchScope::City(City::Schweinfurt),
    SearchScope::City(City::Wuerzburg),
    SearchScope::District(District::Bamberg),
    SearchScope::District(District::Bayreuth),
    SearchScope::District(District::Coburg),
    SearchScope::District(District::Forchheim),
    SearchScope::District(District::Hof),
    SearchScope::District(District::Kronach),
    SearchScope::District(District::Kulmbach),
    SearchScope::District(District::Lichtenfels),
    SearchScope::District(District::Wunsiedel),
    SearchScope::District(District::Ansbach),
    SearchScope::District(District::ErlangenHoechstadt),
    SearchScope::District(District::Fuerth),
    SearchScope::District(District::NeustadtAischBadWindsheim),
    SearchScope::District(District::NuernbergerLand),
    SearchScope::District(District::Roth),
    SearchScope::District(District::WeissenburgGunzenhausen),
    SearchScope::District(District::Aschaffenburg),
    SearchScope::District(District::BadKissingen),
    SearchScope::District(District::Hassberge),
    SearchScope::District(District::Kitzingen),
    SearchScope::District(District::MainSpessart),
    SearchScope::District(District::Miltenberg),
    SearchScope::District(District::RhoenGrabfeld),
    SearchScope::District(District::Schweinfurt),
    SearchScope::District(District::Wuerzburg),
    SearchScope::Area(Area::Bamberg),
    SearchScope::Area(Area::Bayreuth),
    SearchScope::Area(Area::Coburg),
    SearchScope::Area(Area::Hof),
    SearchScope::Area(Area::Ansbach),
    SearchScope::Area(Area::Erlangen),
    SearchScope::Area(Area::Fuerth),
    SearchScope::Area(Area::Nuernberg),
    SearchScope::Area(Area::Aschaffenburg),
    SearchScope::Area(Area::Schweinfurt),
    SearchScope::Area(Area::Wuerzburg),
    SearchScope::CustomTown,
];

impl SearchScope {
    /// The stable string token for this scope (CLI and tool-server input).
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchScope::Region(Region::Oberfranken) => "oberfranken",
            SearchScope::Region(Region::Mittelfranken) => "mittelfranken",
            SearchScope::Region(Region::Unterfranken) => "unterfranken",
            SearchScope::City(City::Bamberg) => "city_bamberg",
            SearchScope::City(City::Bayreuth) => "city_bayreuth",
            SearchScope::City(City::Coburg) => "city_coburg",
            SearchScope::City(City::Hof) => "city_hof",
            SearchScope::City(City::Ansbach) => "city_ansbach",
            SearchScope::City(City::Erlangen) => "city_erlangen",
            SearchScope::City(City::Fuerth) => "city_fuerth",
            SearchScope::City(City::Nuernberg) => "city_nuernberg",
            SearchScope::City(City::Schwabach) => "city_schwabach",
            SearchScope::City(City::Aschaffenburg) => "city_aschaffenburg",
            SearchScope::City(City::Schweinfurt) => "city_schweinfurt",
            SearchScope::City(City::Wuerzburg) => "city_wuerzburg",
            SearchScope::District(District::Bamberg) => "landkreis_bamberg",
            SearchScope::District(District::Bayreuth) => "landkreis_bayreuth",
            SearchScope::District(District::Coburg) => "landkreis_coburg",
            SearchScope::District(District::Forchheim) => "landkreis_forchheim",
            SearchScope::District(District::Hof) => "landkreis_hof",
            SearchScope::District(District::Kronach) => "landkreis_kronach",
            SearchScope::District(District::Kulmbach) => "landkreis_kulmbach",
            SearchScope::District(District::Lichtenfels) => "landkreis_lichtenfels",
            SearchScope::District(District::Wunsiedel) => "landkreis_wunsiedel",
            SearchScope::District(District::Ansbach) => "landkreis_ansbach",
            SearchScope::District(District::ErlangenHoechstadt) => {
                "landkreis_erlangen_hoechstadt"
            }
            SearchScope::District(District::Fuerth) => "landkreis_fuerth",
            SearchScope::District(District::NeustadtAischBadWindsheim) => {
                "landkreis_neustadt_aisch_bad_windsheim"
            }
            SearchScope::District(District::NuernbergerLand) => "landkreis_nuernberger_land",
            SearchScope::District(District::Roth) => "landkreis_roth",
            SearchScope::District(District::WeissenburgGunzenhausen) => {
                "landkreis_weissenburg_gunzenhausen"
            }
            SearchScope::District(District::Aschaffenburg) => "landkreis_aschaffenburg",
            SearchScope::District(District::BadKissingen) => "landkreis_bad_kissingen",
            SearchScope::District(District::Hassberge) => "landkreis_hassberge",
            SearchScope::District(District::Kitzingen) => "landkreis_kitzingen",
            SearchScope::District(District::MainSpessart) => "landkreis_main_spessart",
            SearchScope::District(District::Miltenberg) => "landkreis_miltenberg",
            SearchScope::District(District::RhoenGrabfeld) => "landkreis_rhoen_grabfeld",
            SearchScope::District(District::Schweinfurt) => "landkreis_schweinfurt",
            SearchScope::District(District::Wuerzburg) => "landkreis_wuerzburg",
            SearchScope::Area(Area::Bamberg) => "area_bamberg",
            SearchScope::Area(Area::Bayreuth) => "area_bayreuth",
            SearchScope::Area(Area::Coburg) => "area_coburg",
            SearchScope::Area(Area::Hof) => "area_hof",
            SearchScope::Area(Area::Ansbach) => "area_ansbach",
            SearchScope::Area(Area::Erlangen) => "area_erlangen",
            SearchScope::Area(Area::Fuerth) => "area_fuerth",
            SearchScope::Area(Area::Nuernberg) => "area_nuernberg",
            SearchScope::Area(Area::Aschaffenburg) => "area_aschaffenburg",
            SearchScope::Area(Area::Schweinfurt) => "area_schweinfurt",
            SearchScope::Area(Area::Wuerzburg) => "area_wuerzburg",
            SearchScope::CustomTown => "custom_town",
        }
    }

    /// Family name for catalog output.
    pub fn family(&self) -> &'static str {
        match self {
            SearchScope::Region(_) => "region",
            SearchScope::City(_) => "city",
            SearchScope::District(_) => "district",
            SearchScope::Area(_) => "area",
            SearchScope::CustomTown => "custom_town",
        }
    }
}

impl Default for SearchScope {
    /// Requests without an explicit scope search the Ansbach district.
    fn default() -> Self {
        SearchScope::District(District::Ansbach)
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchScope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_SCOPES
            .iter()
            .find(|scope| scope.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownScope(s.to_string()))
    }
}

/// Error for scope tokens that match no known scope.
#[derive(Debug)]
pub struct UnknownScope(pub String);

impl fmt::Display for UnknownScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown search scope: {}", self.0)
    }
}

impl std::error::Error for UnknownScope {}

/// One catalog row describing a scope and the geography it resolves to.
#[derive(Debug, Clone, Serialize)]
pub struct ScopeInfo {
    pub token: String,
    pub family: String,
    /// Place-name constraint, when the scope carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orte: Option<String>,
    /// District-code constraint, when the scope carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landkreise: Option<String>,
}

/// Full scope catalog, for `mundart scopes` and the `list_scopes` tool.
pub fn catalog() -> Vec<ScopeInfo> {
    ALL_SCOPES
        .iter()
        .map(|scope| {
            let (orte, landkreise) = match scope {
                SearchScope::Region(region) => {
                    (None, Some(region.district_codes().join(",")))
                }
                SearchScope::City(city) => (Some(city.name().to_string()), None),
                SearchScope::District(district) => (None, Some(district.code().to_string())),
                SearchScope::Area(area) => (
                    Some(area.city_name().to_string()),
                    Some(area.district_code().to_string()),
                ),
                SearchScope::CustomTown => (None, None),
            };
            ScopeInfo {
                token: scope.as_str().to_string(),
                family: scope.family().to_string(),
                orte,
                landkreise,
            }
        })
        .collect()
}
