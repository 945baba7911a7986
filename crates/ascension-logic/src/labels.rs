//! Display labels for material keys and bucket titles.

/// Known keys with fixed labels. Everything else is title-cased.
const KNOWN_LABELS: &[(&str, &str)] = &[
    ("sliver", "Sliver"),
    ("fragment", "Fragment"),
    ("chunk", "Chunk"),
    ("gemstone", "Gemstone"),
    ("heros_wit", "Hero's Wit"),
    ("adventurers_experience", "Adventurer's Experience"),
    ("wanderers_advice", "Wanderer's Advice"),
    ("mora", "Mora"),
    ("mora_ascension", "Mora"),
    ("mora_talents", "Mora"),
    ("mora_experience", "Mora"),
    ("crown_of_insight", "Crown of Insight"),
    ("boss_material", "Boss material"),
    ("local_specialty", "Local specialty"),
    ("weekly_boss", "Weekly boss material"),
];

/// Human-readable label for a progress key.
///
/// Talent-tagged keys (`<key>_talents`) get the base key's label.
pub fn format_material_name(key: &str) -> String {
    let base = key
        .strip_suffix(crate::constants::TALENT_SUFFIX)
        .unwrap_or(key);
    if let Some((_, label)) = KNOWN_LABELS.iter().find(|(k, _)| *k == base) {
        return (*label).to_string();
    }

    base.split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(format_material_name("heros_wit"), "Hero's Wit");
        assert_eq!(format_material_name("mora_talents"), "Mora");
    }

    #[test]
    fn test_fallback_title_case() {
        assert_eq!(format_material_name("meshing_gear"), "Meshing Gear");
        assert_eq!(
            format_material_name("teachings_of_freedom"),
            "Teachings Of Freedom"
        );
    }

    #[test]
    fn test_talent_suffix_stripped() {
        assert_eq!(format_material_name("meshing_gear_talents"), "Meshing Gear");
    }
}
