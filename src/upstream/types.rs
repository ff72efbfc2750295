//! Upstream data model.
//!
//! Structural mirrors of the esports API's JSON. Fields pass through
//! untouched; `null` decodes to the empty value so the outward JSON always
//! carries every field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub acronym: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}

/// Upstream wraps each team in a match's opponent list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub opponent: Team,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Scheduled time as upstream formats it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub scheduled_at: String,
    /// Parsed begin timestamp; upstream leaves it `null` until confirmed.
    #[serde(default)]
    pub begin_at: Option<DateTime<Utc>>,
    /// Upstream order, not guaranteed stable.
    #[serde(default, deserialize_with = "null_as_default")]
    pub opponents: Vec<OpponentEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub league: League,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decode_match() {
        let raw = r#"{
            "id": 1043, "name": "T1 vs GEN",
            "scheduled_at": "2025-05-01T08:00:00Z",
            "begin_at": "2025-05-01T08:00:00Z",
            "status": "not_started",
            "opponents": [
                {"type": "Team", "opponent": {"id": 126061, "name": "T1", "location": "KR", "acronym": "T1", "image_url": "https://cdn/t1.png", "slug": "t1"}},
                {"type": "Team", "opponent": {"id": 2882, "name": "Gen.G", "location": "KR", "acronym": "GEN", "image_url": null}}
            ],
            "league": {"id": 293, "name": "LCK", "image_url": "https://cdn/lck.png", "slug": "lck"}
        }"#;

        let m: Match = serde_json::from_str(raw).unwrap();
        assert_eq!(m.id, 1043);
        assert_eq!(m.scheduled_at, "2025-05-01T08:00:00Z");
        assert_eq!(m.begin_at, Some(Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap()));
        assert_eq!(m.opponents.len(), 2);
        assert_eq!(m.opponents[0].opponent.name, "T1");
        assert_eq!(m.opponents[1].opponent.image_url, "");
        assert_eq!(m.league.name, "LCK");
    }

    #[test]
    fn test_nulls_become_empty_values() {
        let raw = r#"{"id": 7, "name": "TBD vs TBD", "scheduled_at": null, "begin_at": null, "opponents": null, "league": null}"#;
        let m: Match = serde_json::from_str(raw).unwrap();
        assert_eq!(m.scheduled_at, "");
        assert_eq!(m.begin_at, None);
        assert!(m.opponents.is_empty());
        assert_eq!(m.league, League::default());

        let out = serde_json::to_value(&m).unwrap();
        assert_eq!(out["opponents"], serde_json::json!([]));
        assert_eq!(out["league"]["name"], "");
    }

    #[test]
    fn test_team_passthrough() {
        let raw = r#"{"id": 1, "name": "Fnatic", "location": null, "acronym": "FNC", "image_url": "x", "players": []}"#;
        let team: Team = serde_json::from_str(raw).unwrap();
        assert_eq!(
            serde_json::to_value(&team).unwrap(),
            serde_json::json!({"id": 1, "name": "Fnatic", "location": "", "acronym": "FNC", "image_url": "x"})
        );
    }
}
