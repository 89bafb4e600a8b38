//! Raw TenUp wire model
//!
//! The TenUp API serves tournament records in two shapes depending on which
//! backend answered (mobile API vs web AJAX): dates arrive either wrapped in
//! a `{date}` object or as a bare string, level and nature codes arrive
//! either as a bare string or as a `{code, label}` object, and boolean flags
//! arrive as `true` or `"true"`. Every field here is optional so a record
//! missing parts of its shape still deserializes and gets defaults downstream.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use super::geo::Coordinates;
use super::records::{DateRange, Tournament, TournamentEvent, Venue};

/// A tournament identifier, numeric or textual on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    /// Identity-key segment. Missing ids compose to an empty segment upstream.
    #[must_use]
    pub fn as_key_segment(&self) -> String {
        match self {
            RawId::Text(s) => s.trim().to_string(),
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// A value that is either a bare string or a `{code, label}` structure
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CodeOrLabel {
    Text(String),
    Coded {
        #[serde(default)]
        code: Option<String>,
        #[serde(default, alias = "libelle")]
        label: Option<String>,
    },
}

impl CodeOrLabel {
    /// Resolve to a single trimmed string: code wins, label is the fallback.
    #[must_use]
    pub fn normalized(&self) -> Option<String> {
        let picked = match self {
            CodeOrLabel::Text(s) => Some(s.as_str()),
            CodeOrLabel::Coded { code, label } => code
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .or(label.as_deref()),
        };
        picked
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// A truthy flag, boolean or string `"true"` on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(s) => s.trim().eq_ignore_ascii_case("true"),
        }
    }
}

/// A calendar date, either `{date: "..."}` or a bare string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Wrapped {
        date: String,
    },
    Plain(String),
}

impl RawDate {
    /// Parse to a calendar day. Unresolvable dates degrade to `None`.
    #[must_use]
    pub fn as_naive_date(&self) -> Option<NaiveDate> {
        let text = match self {
            RawDate::Wrapped { date } => date,
            RawDate::Plain(s) => s,
        };
        parse_calendar_day(text)
    }
}

/// A number that may arrive as a JSON number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(n) => Some(*n),
            LooseNumber::Text(s) => s.trim().replace(',', ".").parse().ok(),
        }
    }
}

/// One épreuve (event) inside a tournament listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default, alias = "libelle")]
    pub label: Option<String>,
    #[serde(default, alias = "categorie", alias = "niveau")]
    pub level: Option<CodeOrLabel>,
    #[serde(default)]
    pub nature: Option<CodeOrLabel>,
    #[serde(default, alias = "categorieAge")]
    pub age_category: Option<String>,
    #[serde(default, alias = "classementMin")]
    pub rank_low: Option<String>,
    #[serde(default, alias = "classementMax")]
    pub rank_high: Option<String>,
    #[serde(default, alias = "tarifAdulte")]
    pub adult_fee: Option<LooseNumber>,
    #[serde(default, alias = "tarifJeune")]
    pub junior_fee: Option<LooseNumber>,
}

/// One tournament record as served by the TenUp search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTournament {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default, rename = "originalId")]
    pub original_id: Option<RawId>,
    #[serde(default)]
    pub code: Option<RawId>,
    #[serde(default, alias = "libelle", alias = "nom")]
    pub title: Option<String>,
    #[serde(default, alias = "club", alias = "nomClub")]
    pub club_name: Option<String>,
    // Both spellings can coexist on one record; "dateDebut" wins when they
    // do, matching the source's own normalization.
    #[serde(default, rename = "dateDebut")]
    pub date_debut: Option<RawDate>,
    #[serde(default, rename = "startDate")]
    pub start_date: Option<RawDate>,
    #[serde(default, rename = "dateFin")]
    pub date_fin: Option<RawDate>,
    #[serde(default, rename = "endDate")]
    pub end_date: Option<RawDate>,
    #[serde(default, alias = "adresse1")]
    pub address1: Option<String>,
    #[serde(default, alias = "adresse2")]
    pub address2: Option<String>,
    #[serde(default, alias = "ville")]
    pub city: Option<String>,
    #[serde(default, alias = "codePostal")]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub lat: Option<LooseNumber>,
    #[serde(default)]
    pub lng: Option<LooseNumber>,
    #[serde(default, alias = "telephone")]
    pub phone: Option<String>,
    #[serde(default, alias = "epreuves")]
    pub events: Vec<RawEvent>,
    /// Pre-computed distance string from the source, e.g. "12 km"
    #[serde(default)]
    pub distance: Option<LooseNumber>,
    #[serde(default, alias = "inscriptionEnLigne")]
    pub online_registration: Option<Flag>,
    #[serde(default, alias = "paiementEnLigne")]
    pub online_payment: Option<Flag>,
}

impl RawTournament {
    /// Start day of the tournament, whichever spelling the wire used
    #[must_use]
    pub fn start_day(&self) -> Option<NaiveDate> {
        self.date_debut
            .as_ref()
            .or(self.start_date.as_ref())
            .and_then(RawDate::as_naive_date)
    }

    /// End day of the tournament, whichever spelling the wire used
    #[must_use]
    pub fn end_day(&self) -> Option<NaiveDate> {
        self.date_fin
            .as_ref()
            .or(self.end_date.as_ref())
            .and_then(RawDate::as_naive_date)
    }

    /// Composite identity key: `(originalId or id, else empty) + "|" + (code, else empty)`.
    #[must_use]
    pub fn identity_key(&self) -> String {
        let id = self
            .original_id
            .as_ref()
            .or(self.id.as_ref())
            .map(RawId::as_key_segment)
            .unwrap_or_default();
        let code = self
            .code
            .as_ref()
            .map(RawId::as_key_segment)
            .unwrap_or_default();
        format!("{id}|{code}")
    }

    /// Deserialize one wire item, degrading to an all-defaults record when
    /// its shape is beyond repair. One malformed record never rejects the
    /// batch it travels in.
    #[must_use]
    pub fn from_loose_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Malformed tournament record, keeping defaults: {e}");
            Self::default()
        })
    }

    /// Convert to the canonical record. Infallible: absent or malformed
    /// fields become "no value" instead of rejecting the record.
    #[must_use]
    pub fn into_tournament(self) -> Tournament {
        let identity = self.identity_key();
        let dates = DateRange {
            start: self.start_day(),
            end: self.end_day(),
        };

        let coordinates = match (
            self.lat.as_ref().and_then(LooseNumber::as_f64),
            self.lng.as_ref().and_then(LooseNumber::as_f64),
        ) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        };

        let address_lines: Vec<String> = [self.address1, self.address2]
            .into_iter()
            .flatten()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        let has_venue = !address_lines.is_empty()
            || self.city.is_some()
            || self.postal_code.is_some()
            || coordinates.is_some()
            || self.phone.is_some();

        let venue = has_venue.then(|| Venue {
            address_lines,
            city: self.city,
            postal_code: self.postal_code,
            coordinates,
            phone: self.phone,
        });

        let events = self
            .events
            .into_iter()
            .map(|raw| TournamentEvent {
                label: raw.label,
                level_code: raw.level.as_ref().and_then(CodeOrLabel::normalized),
                nature_code: raw.nature.as_ref().and_then(CodeOrLabel::normalized),
                age_category: raw.age_category,
                rank_low: raw.rank_low,
                rank_high: raw.rank_high,
                adult_fee: raw.adult_fee.as_ref().and_then(LooseNumber::as_f64),
                junior_fee: raw.junior_fee.as_ref().and_then(LooseNumber::as_f64),
            })
            .collect();

        Tournament {
            identity,
            title: self.title,
            club_name: self.club_name,
            dates,
            venue,
            events,
            distance_hint_km: self.distance.as_ref().and_then(parse_distance_hint),
            online_registration: self.online_registration.is_some_and(|f| f.is_set()),
            online_payment: self.online_payment.is_some_and(|f| f.is_set()),
        }
    }
}

/// Parse a calendar day from the formats TenUp emits: ISO `YYYY-MM-DD`
/// (optionally with a time suffix) or French `DD/MM/YYYY`.
#[must_use]
pub fn parse_calendar_day(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let head = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(head, "%d/%m/%Y"))
        .ok()
}

/// Parse a distance hint such as `"12 km"`, `"12,5 km"` or a bare number.
fn parse_distance_hint(value: &LooseNumber) -> Option<f64> {
    match value {
        LooseNumber::Number(n) => Some(*n),
        LooseNumber::Text(s) => {
            let trimmed = s.trim();
            let trimmed = trimmed
                .strip_suffix("km")
                .or_else(|| trimmed.strip_suffix("KM"))
                .unwrap_or(trimmed);
            trimmed.trim().replace(',', ".").parse().ok()
        }
    }
}
