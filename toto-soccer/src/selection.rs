//! Choosing the teams of a fixture from the names observed in the dataset.

pub const DEFAULT_HOME_TEAM: &str = "Ajax";
pub const DEFAULT_AWAY_TEAM: &str = "Feyenoord";

/// Resolves user input to one of `teams`, either by its 1-based position in the list or by its
/// name, compared case-insensitively.
pub fn resolve<'a>(input: &str, teams: &'a [String]) -> Option<&'a str> {
    let input = input.trim();
    if let Ok(index) = input.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|index| teams.get(index))
            .map(String::as_str);
    }
    let input = input.to_lowercase();
    teams
        .iter()
        .find(|team| team.to_lowercase() == input)
        .map(String::as_str)
}

/// The fixture offered before the user has chosen one. `None` if there are no teams.
pub fn default_pair(teams: &[String]) -> Option<(&str, &str)> {
    let first = teams.first()?;
    let home = find_exact(teams, DEFAULT_HOME_TEAM).unwrap_or(first);
    let away = find_exact(teams, DEFAULT_AWAY_TEAM)
        .or_else(|| teams.get(1))
        .unwrap_or(first);
    Some((home.as_str(), away.as_str()))
}

fn find_exact<'a>(teams: &'a [String], name: &str) -> Option<&'a String> {
    teams.iter().find(|team| *team == name)
}
