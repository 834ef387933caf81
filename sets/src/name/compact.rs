//! Compact display of several set names

/// Collapse set names sharing a pokemon and ability into one label.
///
/// `["Vaporeon-4", "Vaporeon-2", "Latios-8-Levitate"]` becomes
/// `"Vaporeon-2/4, Latios-8-Levitate"`. Groups keep first-seen order and set
/// numbers are sorted numerically within a group.
pub fn compact_set_names<S: AsRef<str>>(names: &[S]) -> String {
    let mut groups: Vec<CompactGroup<'_>> = Vec::new();

    for name in names {
        let name = name.as_ref();
        let mut parts = name.splitn(3, '-');
        let pokemon = parts.next().unwrap_or(name);
        let number = parts.next().unwrap_or("");
        let ability = parts.next().filter(|a| !a.is_empty());

        match groups
            .iter_mut()
            .find(|g| g.pokemon == pokemon && g.ability == ability)
        {
            Some(group) => group.numbers.push(number),
            None => groups.push(CompactGroup {
                pokemon,
                ability,
                numbers: vec![number],
            }),
        }
    }

    groups
        .iter_mut()
        .map(|group| {
            // Non-numeric set numbers sort after numeric ones
            group
                .numbers
                .sort_by_key(|n| n.parse::<u64>().map_or((1, 0), |v| (0, v)));
            let numbers = group.numbers.join("/");
            match group.ability {
                Some(ability) => format!("{}-{}-{}", group.pokemon, numbers, ability),
                None => format!("{}-{}", group.pokemon, numbers),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

struct CompactGroup<'a> {
    pokemon: &'a str,
    ability: Option<&'a str>,
    numbers: Vec<&'a str>,
}
