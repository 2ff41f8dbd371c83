//! Member directory used across tests.

use crate::models::{HobbyConfig, Member, SkillLevel};

pub(crate) fn member_with(
    id: &str,
    name: &str,
    handle: &str,
    hobbies: &[(&str, SkillLevel)],
) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        handle: handle.to_string(),
        bio: String::new(),
        avatar: format!("https://i.pravatar.cc/150?u={}", id),
        banner: None,
        hobbies: hobbies
            .iter()
            .map(|(hobby_id, level)| HobbyConfig::new(*hobby_id, *level))
            .collect(),
        skill_points: 0,
        badges: Vec::new(),
        state: None,
        city: None,
        skill_swap: None,
    }
}

pub(crate) fn bot_directory() -> Vec<Member> {
    let mut aarav = member_with(
        "bot1",
        "Aarav Sharma",
        "@aarav_codes",
        &[("coding", SkillLevel::Pro)],
    );
    aarav.bio = "Full-stack developer from Bangalore.".to_string();
    aarav.skill_points = 5200;
    aarav.state = Some("Karnataka".to_string());
    aarav.city = Some("Bangalore".to_string());

    let mut ishani = member_with(
        "bot2",
        "Ishani Patel",
        "@ishani_lens",
        &[("photography", SkillLevel::Pro)],
    );
    ishani.skill_points = 3800;

    let mut ananya = member_with(
        "bot3",
        "Ananya Iyer",
        "@ananya_bakes",
        &[("cooking", SkillLevel::Intermediate)],
    );
    ananya.skill_points = 2400;

    let mut rohan = member_with(
        "bot4",
        "Rohan Gupta",
        "@rohan_fits",
        &[("fitness", SkillLevel::Pro)],
    );
    rohan.skill_points = 4600;

    vec![aarav, ishani, ananya, rohan]
}
