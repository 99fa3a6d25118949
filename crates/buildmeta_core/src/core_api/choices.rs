use crate::filters::{is_denylisted_sub_stat, is_elemental_stat, is_hidden_stat};
use crate::options::{Slot, fixed_main_stats};

use super::config::SubStatFilter;
use super::error::{MetaError, MetaErrorCode};
use super::reference::ReferenceData;
use super::types::{Character, Choice, RelicSet};

pub fn character_choices(data: &ReferenceData) -> Vec<Choice> {
    data.characters
        .iter()
        .map(|(id, character)| Choice::new(character.name.clone(), id.clone()))
        .collect()
}

/// Weapons sharing the character's weapon type, highest rarity first. Ties
/// keep table order.
pub fn weapon_choices(
    data: &ReferenceData,
    character: &Character,
) -> Result<Vec<Choice>, MetaError> {
    let mut matching: Vec<_> = data
        .weapons
        .iter()
        .filter(|(_, weapon)| weapon.weapon_type == character.weapon_type)
        .collect();

    if matching.is_empty() {
        return Err(MetaError::new(
            MetaErrorCode::NoMatchingWeapons,
            format!(
                "No weapons found for character weapon type: {}",
                character.weapon_type
            ),
        ));
    }

    matching.sort_by(|(_, a), (_, b)| b.rarity.cmp(&a.rarity));

    Ok(matching
        .into_iter()
        .map(|(id, weapon)| {
            Choice::new(
                format!("★{} - {} ({id})", weapon.rarity, weapon.display_name()),
                id.clone(),
            )
        })
        .collect())
}

pub fn sub_stat_choices(data: &ReferenceData, filter: SubStatFilter) -> Vec<Choice> {
    data.stats
        .keys()
        .filter(|key| !is_hidden_stat(key))
        .filter(|key| match filter {
            SubStatFilter::Denylist => !is_denylisted_sub_stat(key),
            SubStatFilter::Unfiltered => true,
        })
        .map(|key| Choice::new(key.clone(), key.clone()))
        .collect()
}

pub fn relic_choices(data: &ReferenceData) -> Vec<Choice> {
    relic_set_choices(data, false)
}

pub fn ornament_choices(data: &ReferenceData) -> Vec<Choice> {
    relic_set_choices(data, true)
}

pub fn elemental_stat_choices(data: &ReferenceData) -> Vec<Choice> {
    data.stats
        .iter()
        .filter(|(key, _)| !is_hidden_stat(key))
        .filter(|(key, definition)| is_elemental_stat(key, definition))
        .map(|(key, definition)| {
            let label = match definition.name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => key.clone(),
            };
            Choice::new(label, key.clone())
        })
        .collect()
}

pub fn main_stat_choices(data: &ReferenceData, slot: Slot) -> Vec<Choice> {
    match fixed_main_stats(slot) {
        Some(table) => table
            .iter()
            .map(|stat| Choice::new(stat.label, stat.value))
            .collect(),
        None => elemental_stat_choices(data),
    }
}

fn relic_set_choices(data: &ReferenceData, ornament: bool) -> Vec<Choice> {
    data.relic_sets
        .iter()
        .filter(|(_, set)| set.ornament == ornament)
        .map(|(id, set)| Choice::new(relic_label(id, set), id.clone()))
        .collect()
}

fn relic_label(id: &str, set: &RelicSet) -> String {
    let effects: Vec<String> = [("2pc", &set.two_piece), ("4pc", &set.four_piece)]
        .into_iter()
        .filter_map(|(pieces, effect)| {
            effect
                .as_ref()
                .map(|effect| format!("{pieces}: {}", effect.effect))
        })
        .collect();
    format!("{} ({}) - {id}", set.name, effects.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_api::PieceEffect;

    #[test]
    fn relic_label_omits_missing_piece_effects() {
        let set = RelicSet {
            name: "Sprightly Vonwacq".to_string(),
            ornament: true,
            two_piece: Some(PieceEffect {
                effect: "Energy Regeneration Rate +5%".to_string(),
            }),
            four_piece: None,
        };
        assert_eq!(
            relic_label("314", &set),
            "Sprightly Vonwacq (2pc: Energy Regeneration Rate +5%) - 314"
        );
    }

    #[test]
    fn relic_label_joins_both_effects() {
        let set = RelicSet {
            name: "Musketeer".to_string(),
            ornament: false,
            two_piece: Some(PieceEffect {
                effect: "ATK +12%".to_string(),
            }),
            four_piece: Some(PieceEffect {
                effect: "SPD +6%".to_string(),
            }),
        };
        assert_eq!(
            relic_label("104", &set),
            "Musketeer (2pc: ATK +12% | 4pc: SPD +6%) - 104"
        );
    }
}
