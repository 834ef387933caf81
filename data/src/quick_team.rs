use factory_engine::{SetRecord, SetTable};
use factory_sets::parse_team_string;

/// Resolve a pasted team string such as `"Vaporeon4/Gengar-2, Latios8"`.
///
/// Returns one entry per parsed id, at most `limit`. Each id resolves to the
/// set of that exact name or, failing that, its first ability variant.
pub fn resolve_quick_team<'a>(
    team_string: &str,
    table: &'a SetTable,
    limit: usize,
) -> Vec<Option<&'a SetRecord>> {
    parse_team_string(team_string)
        .iter()
        .take(limit)
        .map(|id| table.resolve(id))
        .collect()
}
