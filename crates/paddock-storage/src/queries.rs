//! Query registry: the canonical SQL templates for each entity domain.
//!
//! Each domain gets its own `QueryTemplates` value, handed to the repository
//! at construction. Templates select columns in the order the row mapper
//! reads them.

/// Lookup key for the list-all template.
pub const LIST_KEY: &str = "list";
/// Lookup key for the get-by-id template.
pub const BY_ID_KEY: &str = "tuple";

const RACES_LIST: &str = "
    SELECT
        id,
        meeting_id,
        name,
        number,
        visible,
        advertised_start_time
    FROM races
";

const RACE_BY_ID: &str = "
    SELECT
        id,
        meeting_id,
        name,
        number,
        visible,
        advertised_start_time
    FROM races
    WHERE id = ?
";

const SPORTS_LIST: &str = "
    SELECT
        id,
        meeting_id,
        name,
        number,
        visible,
        home_team,
        away_team,
        advertised_start_time,
        betting_closed_time
    FROM sports
";

const SPORT_BY_ID: &str = "
    SELECT
        id,
        meeting_id,
        name,
        number,
        visible,
        home_team,
        away_team,
        advertised_start_time,
        betting_closed_time
    FROM sports
    WHERE id = ?
";

/// The list and get-by-id templates for one entity domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplates {
    list: String,
    by_id: String,
}

impl QueryTemplates {
    /// Custom templates. `by_id` must take the id as its only placeholder.
    pub fn new(list: impl Into<String>, by_id: impl Into<String>) -> Self {
        Self {
            list: list.into(),
            by_id: by_id.into(),
        }
    }

    pub fn races() -> Self {
        Self::new(RACES_LIST, RACE_BY_ID)
    }

    pub fn sports() -> Self {
        Self::new(SPORTS_LIST, SPORT_BY_ID)
    }

    pub fn list(&self) -> &str {
        &self.list
    }

    pub fn by_id(&self) -> &str {
        &self.by_id
    }

    /// Look a template up by its key (`"list"` or `"tuple"`).
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            LIST_KEY => Some(&self.list),
            BY_ID_KEY => Some(&self.by_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_key() {
        let templates = QueryTemplates::races();
        assert_eq!(templates.get(LIST_KEY), Some(templates.list()));
        assert_eq!(templates.get(BY_ID_KEY), Some(templates.by_id()));
        assert_eq!(templates.get("delete"), None);
    }

    #[test]
    fn test_domains_do_not_collide() {
        let races = QueryTemplates::races();
        let sports = QueryTemplates::sports();
        assert!(races.list().contains("FROM races"));
        assert!(sports.list().contains("FROM sports"));
        assert_ne!(races, sports);
    }

    #[test]
    fn test_templates_differ_only_in_where_clause() {
        for templates in [QueryTemplates::races(), QueryTemplates::sports()] {
            assert!(!templates.list().contains("WHERE"));
            assert!(templates.by_id().contains("WHERE id = ?"));
            assert!(templates.by_id().starts_with(templates.list().trim_end()));
        }
    }

    #[test]
    fn test_sports_selects_domain_columns() {
        let sports = QueryTemplates::sports();
        for column in ["home_team", "away_team", "betting_closed_time"] {
            assert!(sports.list().contains(column));
            assert!(sports.by_id().contains(column));
        }
    }
}
