use super::SetId;

/// Parse a quick team string such as `"Vaporeon4/Latios8/Scizor-4"`.
///
/// Entries are separated by `/` or `,`. Entries that are not a recognizable
/// set identifier are skipped.
pub fn parse_team_string(team: &str) -> Vec<SetId> {
    team.split(['/', ','])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(SetId::parse)
        .collect()
}
