//! Profile edits applied to an active member.

use serde::Deserialize;

use super::{Member, SkillSwap};
use crate::errors::AppError;

/// Fields that identify the member or are owned by other flows.
const IMMUTABLE_FIELDS: &[&str] = &[
    "id",
    "handle",
    "hobbies",
    "skillPoints",
    "badges",
    "state",
    "city",
];

/// Partial update of the editable profile fields.
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfilePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub skill_swap_offered: Option<String>,
    #[serde(default)]
    pub skill_swap_needed: Option<String>,
    #[serde(default)]
    pub skill_swap_description: Option<String>,
}

impl ProfilePatch {
    /// Parse a patch from its JSON form, rejecting immutable or unknown fields.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| AppError::InvalidArgument(format!("Malformed profile patch: {}", e)))?;

        let object = value.as_object().ok_or_else(|| {
            AppError::InvalidArgument("Profile patch must be a JSON object".to_string())
        })?;

        if let Some(field) = IMMUTABLE_FIELDS.iter().find(|f| object.contains_key(**f)) {
            return Err(AppError::InvalidArgument(format!(
                "Field {} cannot be changed through a profile update",
                field
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::InvalidArgument(format!("Invalid profile patch: {}", e)))
    }

    fn touches_skill_swap(&self) -> bool {
        self.skill_swap_offered.is_some()
            || self.skill_swap_needed.is_some()
            || self.skill_swap_description.is_some()
    }

    /// Produce the member with this patch applied.
    pub fn apply(&self, member: &Member) -> Member {
        let mut updated = member.clone();

        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(bio) = &self.bio {
            updated.bio = bio.clone();
        }
        if let Some(avatar) = &self.avatar {
            updated.avatar = avatar.clone();
        }
        if let Some(banner) = &self.banner {
            updated.banner = Some(banner.clone());
        }

        if self.touches_skill_swap() {
            let current = member.skill_swap.as_ref();
            let pick = |patched: &Option<String>, existing: Option<&String>| {
                patched
                    .clone()
                    .or_else(|| existing.cloned())
                    .unwrap_or_default()
            };

            let offered = pick(&self.skill_swap_offered, current.map(|s| &s.offered));
            let needed = pick(&self.skill_swap_needed, current.map(|s| &s.needed));
            let description = pick(
                &self.skill_swap_description,
                current.map(|s| &s.description),
            );

            // Swap with nothing offered and nothing needed is no swap at all
            updated.skill_swap = if offered.is_empty() && needed.is_empty() {
                None
            } else {
                Some(SkillSwap {
                    offered,
                    needed,
                    description,
                })
            };
        }

        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_rejects_immutable_fields() {
        for raw in [
            r#"{"id": "u2"}"#,
            r#"{"name": "x", "hobbies": []}"#,
            r#"{"skillPoints": 10}"#,
            r#"{"badges": []}"#,
        ] {
            let err = ProfilePatch::from_json(raw).unwrap_err();
            assert!(matches!(err, AppError::InvalidArgument(_)), "{}", raw);
        }
    }

    #[test]
    fn test_from_json_rejects_unknown_fields_and_non_objects() {
        assert!(ProfilePatch::from_json(r#"{"nickname": "x"}"#).is_err());
        assert!(ProfilePatch::from_json(r#"["name"]"#).is_err());
        assert!(ProfilePatch::from_json("not json").is_err());
    }

    #[test]
    fn test_from_json_accepts_editable_fields() {
        let patch =
            ProfilePatch::from_json(r#"{"name": "Sam", "skillSwapOffered": "Guitar"}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Sam"));
        assert_eq!(patch.skill_swap_offered.as_deref(), Some("Guitar"));
        assert!(patch.bio.is_none());
    }

    #[test]
    fn test_apply_overwrites_only_given_fields() {
        let member = Member::template();
        let patch = ProfilePatch {
            bio: Some("New bio".to_string()),
            ..Default::default()
        };

        let updated = patch.apply(&member);
        assert_eq!(updated.bio, "New bio");
        assert_eq!(updated.name, member.name);
        assert_eq!(updated.skill_swap, member.skill_swap);
    }

    #[test]
    fn test_apply_clears_skill_swap_when_offered_and_needed_empty() {
        let member = Member::template();
        assert!(member.skill_swap.is_some());

        let patch = ProfilePatch {
            skill_swap_offered: Some(String::new()),
            skill_swap_needed: Some(String::new()),
            ..Default::default()
        };

        assert!(patch.apply(&member).skill_swap.is_none());
    }

    #[test]
    fn test_apply_sets_skill_swap_wholesale() {
        let mut member = Member::template();
        member.skill_swap = None;

        let patch = ProfilePatch {
            skill_swap_offered: Some("Sourdough".to_string()),
            skill_swap_needed: Some(String::new()),
            skill_swap_description: Some("Bread for lessons".to_string()),
            ..Default::default()
        };

        assert_eq!(
            patch.apply(&member).skill_swap,
            Some(SkillSwap {
                offered: "Sourdough".to_string(),
                needed: String::new(),
                description: "Bread for lessons".to_string(),
            })
        );
    }
}
