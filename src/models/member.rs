//! Member model matching the client's User record.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Location;
use crate::errors::AppError;

/// Ordinal proficiency tag attached to a hobby.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Pro,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Pro => "Pro",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Beginner" => Some(SkillLevel::Beginner),
            "Intermediate" => Some(SkillLevel::Intermediate),
            "Pro" => Some(SkillLevel::Pro),
            _ => None,
        }
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hobby declared by a member together with their skill level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HobbyConfig {
    pub hobby_id: String,
    pub level: SkillLevel,
}

impl HobbyConfig {
    pub fn new(hobby_id: impl Into<String>, level: SkillLevel) -> Self {
        Self {
            hobby_id: hobby_id.into(),
            level,
        }
    }
}

/// What a member can teach and what they want to learn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkillSwap {
    pub offered: String,
    pub needed: String,
    pub description: String,
}

/// A registered participant of the network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub bio: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub hobbies: Vec<HobbyConfig>,
    pub skill_points: u64,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_swap: Option<SkillSwap>,
}

impl Member {
    /// Identity every newly onboarded member starts from.
    ///
    /// Hobbies and location are replaced when onboarding completes.
    pub fn template() -> Self {
        Self {
            id: "u1".to_string(),
            name: "Alex Rivera".to_string(),
            handle: "@arivera".to_string(),
            bio: "Passionate about building cool stuff and capturing urban landscapes.".to_string(),
            avatar: "https://i.pravatar.cc/150?u=alex".to_string(),
            banner: Some(
                "https://images.unsplash.com/photo-1557683316-973673baf926?auto=format&fit=crop&w=1200&q=80"
                    .to_string(),
            ),
            hobbies: Vec::new(),
            skill_points: 1250,
            badges: vec![
                "Early Adopter".to_string(),
                "Bug Squasher".to_string(),
                "Pixel Perfect".to_string(),
            ],
            state: None,
            city: None,
            skill_swap: Some(SkillSwap {
                offered: "React & Tailwind".to_string(),
                needed: "Basic Photography".to_string(),
                description:
                    "Willing to build you a portfolio site in exchange for learning how to use a DSLR!"
                        .to_string(),
            }),
        }
    }

    /// The member's location, if both parts are known.
    pub fn location(&self) -> Option<Location> {
        match (&self.state, &self.city) {
            (Some(state), Some(city)) => Some(Location {
                state: state.clone(),
                city: city.clone(),
            }),
            _ => None,
        }
    }

    pub fn has_hobby(&self, hobby_id: &str) -> bool {
        self.hobbies.iter().any(|h| h.hobby_id == hobby_id)
    }

    /// Whether the two members declare at least one hobby id in common.
    pub fn shares_hobby_with(&self, other: &Member) -> bool {
        self.hobbies.iter().any(|h| other.has_hobby(&h.hobby_id))
    }
}

/// Check the hobby list handed to onboarding: non-empty, unique hobby ids.
pub fn validate_hobby_selections(selections: &[HobbyConfig]) -> Result<(), AppError> {
    if selections.is_empty() {
        return Err(AppError::InvalidArgument(
            "At least one hobby must be selected".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for selection in selections {
        if selection.hobby_id.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "Hobby id must not be empty".to_string(),
            ));
        }
        if !seen.insert(selection.hobby_id.as_str()) {
            return Err(AppError::InvalidArgument(format!(
                "Hobby {} selected more than once",
                selection.hobby_id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_level_parse() {
        assert_eq!(SkillLevel::parse("Pro"), Some(SkillLevel::Pro));
        assert_eq!(SkillLevel::parse("pro"), None);
        assert_eq!(SkillLevel::Intermediate.to_string(), "Intermediate");
    }

    #[test]
    fn test_member_json_omits_absent_optionals() {
        let mut member = Member::template();
        member.banner = None;
        member.skill_swap = None;

        let json = serde_json::to_value(&member).unwrap();
        assert!(json.get("banner").is_none());
        assert!(json.get("skillSwap").is_none());
        assert!(json.get("state").is_none());
        assert_eq!(json["skillPoints"], 1250);
    }

    #[test]
    fn test_empty_banner_is_distinct_from_absent() {
        let mut member = Member::template();
        member.banner = Some(String::new());

        let json = serde_json::to_string(&member).unwrap();
        let back: Member = serde_json::from_str(&json).unwrap();
        assert_eq!(back.banner, Some(String::new()));
    }

    #[test]
    fn test_hobby_config_wire_format() {
        let config = HobbyConfig::new("coding", SkillLevel::Beginner);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json, serde_json::json!({"hobbyId": "coding", "level": "Beginner"}));
    }

    #[test]
    fn test_validate_hobby_selections() {
        assert!(validate_hobby_selections(&[]).is_err());
        assert!(validate_hobby_selections(&[
            HobbyConfig::new("coding", SkillLevel::Pro),
            HobbyConfig::new("coding", SkillLevel::Beginner),
        ])
        .is_err());
        assert!(validate_hobby_selections(&[
            HobbyConfig::new("coding", SkillLevel::Pro),
            HobbyConfig::new("music", SkillLevel::Beginner),
        ])
        .is_ok());
    }

    #[test]
    fn test_shares_hobby_with() {
        let mut a = Member::template();
        a.hobbies = vec![HobbyConfig::new("coding", SkillLevel::Pro)];
        let mut b = Member::template();
        b.hobbies = vec![
            HobbyConfig::new("music", SkillLevel::Pro),
            HobbyConfig::new("coding", SkillLevel::Beginner),
        ];
        assert!(a.shares_hobby_with(&b));

        b.hobbies.truncate(1);
        assert!(!a.shares_hobby_with(&b));
    }
}
