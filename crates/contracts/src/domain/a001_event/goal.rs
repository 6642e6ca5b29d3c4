use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the OSPO wants out of attending an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Speaking,
    Sponsoring,
    Attending,
    Exhibiting,
    Networking,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::Speaking,
        Goal::Sponsoring,
        Goal::Attending,
        Goal::Exhibiting,
        Goal::Networking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Speaking => "speaking",
            Goal::Sponsoring => "sponsoring",
            Goal::Attending => "attending",
            Goal::Exhibiting => "exhibiting",
            Goal::Networking => "networking",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Goal::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == needle)
            .ok_or_else(|| format!("unknown goal '{}'", s.trim()))
    }
}

/// Parses goals from any textual form seen at the boundary:
/// a JSON array (`["speaking","attending"]`) or comma-separated text
/// (`speaking, attending`). Duplicates are dropped, order is kept.
pub fn parse_goals(input: &str) -> Result<Vec<Goal>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let raw: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<String>>(trimmed)
            .map_err(|e| format!("invalid goals list: {}", e))?
    } else {
        trimmed.split(',').map(|s| s.to_string()).collect()
    };

    let mut goals = Vec::new();
    for item in raw.iter().filter(|s| !s.trim().is_empty()) {
        let goal: Goal = item.parse()?;
        if !goals.contains(&goal) {
            goals.push(goal);
        }
    }
    Ok(goals)
}

/// Serialises goals for storage in a single text column
pub fn goals_to_json(goals: &[Goal]) -> String {
    serde_json::to_string(goals).unwrap_or_else(|_| "[]".to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GoalsRepr {
    List(Vec<String>),
    Text(String),
}

/// serde helper for DTOs: accepts either an array or a string
pub fn deserialize_goals<'de, D>(deserializer: D) -> Result<Vec<Goal>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<GoalsRepr>::deserialize(deserializer)?;
    match repr {
        None => Ok(Vec::new()),
        Some(GoalsRepr::Text(text)) => parse_goals(&text).map_err(serde::de::Error::custom),
        Some(GoalsRepr::List(items)) => {
            let mut goals = Vec::new();
            for item in items {
                let goal: Goal = item.parse().map_err(serde::de::Error::custom)?;
                if !goals.contains(&goal) {
                    goals.push(goal);
                }
            }
            Ok(goals)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated() {
        let goals = parse_goals("Speaking, attending,networking").unwrap();
        assert_eq!(
            goals,
            vec![Goal::Speaking, Goal::Attending, Goal::Networking]
        );
    }

    #[test]
    fn test_parse_json_array_and_dedup() {
        let goals = parse_goals(r#"["sponsoring","sponsoring","exhibiting"]"#).unwrap();
        assert_eq!(goals, vec![Goal::Sponsoring, Goal::Exhibiting]);
    }

    #[test]
    fn test_parse_unknown_goal() {
        let err = parse_goals("speaking, dancing").unwrap_err();
        assert!(err.contains("dancing"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_goals("  ").unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_both_forms() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "deserialize_goals")]
            goals: Vec<Goal>,
        }

        let from_text: Holder = serde_json::from_str(r#"{"goals":"speaking,attending"}"#).unwrap();
        assert_eq!(from_text.goals, vec![Goal::Speaking, Goal::Attending]);

        let from_list: Holder = serde_json::from_str(r#"{"goals":["Networking"]}"#).unwrap();
        assert_eq!(from_list.goals, vec![Goal::Networking]);

        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert!(missing.goals.is_empty());
    }
}
