//! Folder name generator.

/// Generate the series root folder name.
///
/// Format: `${seriesName} (${year})`, or just `${seriesName}` without a year.
pub fn series_folder(series_name: &str, year: Option<u16>) -> String {
    let name = sanitize_folder_name(series_name);
    match year {
        Some(year) => format!("{} ({})", name, year),
        None => name,
    }
}

/// Generate season folder name.
///
/// Format: `Season ${seasonNr2}`
pub fn season_folder(season_number: u16) -> String {
    format!("Season {:02}", season_number)
}

/// Replace path separators so a name always stays one path component.
fn sanitize_folder_name(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_folder() {
        assert_eq!(series_folder("Show", Some(2020)), "Show (2020)");
        assert_eq!(series_folder("Show", None), "Show");
        assert_eq!(
            series_folder("Fate/Zero", Some(2011)),
            "Fate_Zero (2011)"
        );
    }

    #[test]
    fn test_season_folder() {
        assert_eq!(season_folder(0), "Season 00");
        assert_eq!(season_folder(1), "Season 01");
        assert_eq!(season_folder(12), "Season 12");
        assert_eq!(season_folder(99), "Season 99");
    }
}
