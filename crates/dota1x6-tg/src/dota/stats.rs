use serde::Deserialize;
use serde_json::{Number, Value};
use serde_with::{serde_as, DefaultOnError};
use std::fmt;

/// Summary of the player's games. Any field that is missing or has an
/// unexpected type is absent.
#[serde_as]
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerStats {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) match_count: Option<Number>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) avg_place: Option<f64>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) first_places: Option<Number>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub(crate) rating: Option<Number>,
}

impl PlayerStats {
    /// The API returns an empty `data` (`null`, `{}` or `[]`) for unknown players
    pub(crate) fn from_data(data: Value) -> Option<Self> {
        let is_empty = match &data {
            Value::Null => true,
            Value::Bool(value) => !value,
            Value::Object(object) => object.is_empty(),
            Value::Array(array) => array.is_empty(),
            Value::String(string) => string.is_empty(),
            Value::Number(_) => false,
        };

        if is_empty {
            return None;
        }

        // A non-object payload still means the player exists, we just
        // don't know anything about them
        Some(serde_json::from_value(data).unwrap_or_default())
    }

    /// Plain text (not escaped) summary for the chat
    pub(crate) fn display(&self, player_id: &str) -> String {
        let avg_place = self.avg_place.map(|avg_place| format!("{avg_place:.2}"));

        format!(
            "📊 Статистика для ID: {player_id}\n\n\
            Всего игр: {}\n\
            Среднее место: {}\n\
            🏆 Первых мест: {}\n\
            Рейтинг: {}",
            OrUnknown(self.match_count.as_ref()),
            OrUnknown(avg_place.as_ref()),
            OrUnknown(self.first_places.as_ref()),
            OrUnknown(self.rating.as_ref()),
        )
    }
}

struct OrUnknown<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for OrUnknown<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("н/д"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use serde_json::json;

    #[test]
    fn empty_data_means_not_found() {
        assert_eq!(PlayerStats::from_data(json!(null)), None);
        assert_eq!(PlayerStats::from_data(json!({})), None);
        assert_eq!(PlayerStats::from_data(json!([])), None);
    }

    #[test]
    fn full_stats() {
        let stats = PlayerStats::from_data(json!({
            "matchCount": 120,
            "avgPlace": 3.14159,
            "firstPlaces": 17,
            "rating": 2450,
            "unknownField": "ignored",
        }))
        .unwrap();

        expect![[r#"
            📊 Статистика для ID: 741409144

            Всего игр: 120
            Среднее место: 3.14
            🏆 Первых мест: 17
            Рейтинг: 2450"#]]
        .assert_eq(&stats.display("741409144"));
    }

    #[test]
    fn malformed_fields_are_unknown() {
        let stats = PlayerStats::from_data(json!({
            "matchCount": "many",
            "avgPlace": null,
            "rating": 1800.5,
        }))
        .unwrap();

        expect![[r#"
            📊 Статистика для ID: 42

            Всего игр: н/д
            Среднее место: н/д
            🏆 Первых мест: н/д
            Рейтинг: 1800.5"#]]
        .assert_eq(&stats.display("42"));
    }
}
