//! Profession and elite specialization display data.
//!
//! Profession codes follow the game API ordering (1 = Guardian through
//! 9 = Revenant); elite specialization codes are the API specialization
//! ids. Icon URLs are the wiki assets the rotation renderer embeds.

pub fn profession_name(profession: u32) -> &'static str {
    match profession {
        1 => "Guardian",
        2 => "Warrior",
        3 => "Engineer",
        4 => "Ranger",
        5 => "Thief",
        6 => "Elementalist",
        7 => "Mesmer",
        8 => "Necromancer",
        9 => "Revenant",
        _ => "Unknown",
    }
}

pub fn elite_spec_name(elite_spec: u32) -> Option<&'static str> {
    Some(match elite_spec {
        5 => "Druid",
        7 => "Daredevil",
        18 => "Berserker",
        27 => "Dragonhunter",
        34 => "Reaper",
        40 => "Chronomancer",
        43 => "Scrapper",
        48 => "Tempest",
        52 => "Herald",
        55 => "Soulbeast",
        56 => "Weaver",
        57 => "Holosmith",
        58 => "Deadeye",
        59 => "Mirage",
        60 => "Scourge",
        61 => "Spellbreaker",
        62 => "Firebrand",
        63 => "Renegade",
        _ => return None,
    })
}

/// Tiny profession icon for rotation group headers. Elite spec icons
/// take precedence over the base profession icon when one is known.
pub fn profession_icon_url(profession: u32, elite_spec: u32) -> &'static str {
    if let Some(url) = elite_spec_icon_url(elite_spec) {
        return url;
    }
    match profession {
        1 => "https://wiki.guildwars2.com/images/8/8c/Guardian_tango_icon_20px.png",
        2 => "https://wiki.guildwars2.com/images/4/43/Warrior_tango_icon_20px.png",
        3 => "https://wiki.guildwars2.com/images/2/27/Engineer_tango_icon_20px.png",
        4 => "https://wiki.guildwars2.com/images/4/43/Ranger_tango_icon_20px.png",
        5 => "https://wiki.guildwars2.com/images/7/7a/Thief_tango_icon_20px.png",
        6 => "https://wiki.guildwars2.com/images/a/aa/Elementalist_tango_icon_20px.png",
        7 => "https://wiki.guildwars2.com/images/6/60/Mesmer_tango_icon_20px.png",
        8 => "https://wiki.guildwars2.com/images/4/43/Necromancer_tango_icon_20px.png",
        9 => "https://wiki.guildwars2.com/images/b/b5/Revenant_tango_icon_20px.png",
        _ => "https://wiki.guildwars2.com/images/7/74/Skill.png",
    }
}

fn elite_spec_icon_url(elite_spec: u32) -> Option<&'static str> {
    Some(match elite_spec {
        5 => "https://wiki.guildwars2.com/images/d/d2/Druid_tango_icon_20px.png",
        7 => "https://wiki.guildwars2.com/images/e/e1/Daredevil_tango_icon_20px.png",
        18 => "https://wiki.guildwars2.com/images/d/da/Berserker_tango_icon_20px.png",
        27 => "https://wiki.guildwars2.com/images/c/c9/Dragonhunter_tango_icon_20px.png",
        34 => "https://wiki.guildwars2.com/images/1/11/Reaper_tango_icon_20px.png",
        40 => "https://wiki.guildwars2.com/images/f/f4/Chronomancer_tango_icon_20px.png",
        43 => "https://wiki.guildwars2.com/images/b/be/Scrapper_tango_icon_20px.png",
        48 => "https://wiki.guildwars2.com/images/4/4a/Tempest_tango_icon_20px.png",
        52 => "https://wiki.guildwars2.com/images/6/67/Herald_tango_icon_20px.png",
        55 => "https://wiki.guildwars2.com/images/7/7c/Soulbeast_tango_icon_20px.png",
        56 => "https://wiki.guildwars2.com/images/f/fc/Weaver_tango_icon_20px.png",
        57 => "https://wiki.guildwars2.com/images/2/28/Holosmith_tango_icon_20px.png",
        58 => "https://wiki.guildwars2.com/images/c/c9/Deadeye_tango_icon_20px.png",
        59 => "https://wiki.guildwars2.com/images/d/df/Mirage_tango_icon_20px.png",
        60 => "https://wiki.guildwars2.com/images/0/06/Scourge_tango_icon_20px.png",
        61 => "https://wiki.guildwars2.com/images/e/ed/Spellbreaker_tango_icon_20px.png",
        62 => "https://wiki.guildwars2.com/images/0/02/Firebrand_tango_icon_20px.png",
        63 => "https://wiki.guildwars2.com/images/7/7c/Renegade_tango_icon_20px.png",
        _ => return None,
    })
}
