//! Ranking page extraction
//!
//! The ranking page is a slideshow: every slide carries a title such as
//! `"1. Denver, Colorado"` and a paragraph describing the city.

use crate::scrape::{City, ScrapeError, ScrapeResult};
use scraper::{ElementRef, Html, Selector};

/// Marker class of one ranking slide
const SLIDE_SELECTOR: &str = ".slide-layout.clearfix";

/// Heading holding `"<rank>. <name>, <state>"`
const TITLE_SELECTOR: &str = "h2.slide-title-text";

const DESCRIPTION_SELECTOR: &str = "p";

/// Parses the ranking page into city records, in page order
///
/// # Errors
///
/// * `ScrapeError::NoRankings` - no slide markers were found at all
/// * `ScrapeError::MissingElement` - a slide lacks its title or description
/// * `ScrapeError::InvalidTitle` / `ScrapeError::InvalidRank` - a title does not
///   follow the `"<rank>. <name>, <state>"` shape
///
/// # Example
///
/// ```
/// use tastemap::scrape::parse_city_rankings;
///
/// let html = r#"<div class="slide-layout clearfix">
///     <h2 class="slide-title-text">1. Denver, Colorado</h2>
///     <p>Mile-high city.</p>
/// </div>"#;
/// let cities = parse_city_rankings(html).unwrap();
/// assert_eq!(cities[0].name, "Denver");
/// assert_eq!(cities[0].state, "Colorado");
/// ```
pub fn parse_city_rankings(html: &str) -> ScrapeResult<Vec<City>> {
    let document = Html::parse_document(html);
    let slide_selector = selector(SLIDE_SELECTOR)?;
    let title_selector = selector(TITLE_SELECTOR)?;
    let description_selector = selector(DESCRIPTION_SELECTOR)?;

    let mut cities = Vec::new();
    for (index, slide) in document.select(&slide_selector).enumerate() {
        let title = first_text(&slide, &title_selector)
            .filter(|text| !text.is_empty())
            .ok_or(ScrapeError::MissingElement {
                index,
                element: TITLE_SELECTOR,
            })?;
        // An empty paragraph is still a description
        let description =
            first_text(&slide, &description_selector).ok_or(ScrapeError::MissingElement {
                index,
                element: DESCRIPTION_SELECTOR,
            })?;

        let (rank, name, state) = split_title(&title)?;
        cities.push(City {
            rank,
            name,
            state,
            description,
        });
    }

    if cities.is_empty() {
        return Err(ScrapeError::NoRankings);
    }

    tracing::debug!("Extracted {} ranked cities", cities.len());
    Ok(cities)
}

/// Splits `"12. Ann Arbor, Michigan"` into `(12, "Ann Arbor", "Michigan")`
///
/// The rank ends at the first `.`; the rest splits on `,` with the first part
/// as the name and the last part as the state.
pub fn split_title(title: &str) -> ScrapeResult<(u32, String, String)> {
    let (rank, rest) = title
        .split_once('.')
        .ok_or_else(|| ScrapeError::InvalidTitle(title.to_string()))?;

    let rank = rank
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|rank| *rank > 0)
        .ok_or_else(|| ScrapeError::InvalidRank(title.to_string()))?;

    let parts: Vec<&str> = rest.split(',').map(str::trim).collect();
    let name = parts.first().copied().unwrap_or_default();
    let state = parts.last().copied().unwrap_or_default();

    if name.is_empty() || state.is_empty() || parts.len() < 2 {
        return Err(ScrapeError::InvalidTitle(title.to_string()));
    }

    Ok((rank, name.to_string(), state.to_string()))
}

fn selector(css: &'static str) -> ScrapeResult<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css,
        message: e.to_string(),
    })
}

/// Trimmed text of the first descendant matching `selector`, `None` if absent
fn first_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|found| found.text().collect::<String>().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(title: &str, description: &str) -> String {
        format!(
            r#"<div class="slide-layout clearfix">
                <h2 class="slide-title-text">{}</h2>
                <div class="slide-module"><p>{}</p><p>Photo credit</p></div>
            </div>"#,
            title, description
        )
    }

    #[test]
    fn test_parse_rankings_in_page_order() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            slide("1. Denver, Colorado", "Denver has it all."),
            slide("2. Austin, Texas", "Live music capital.")
        );

        let cities = parse_city_rankings(&html).unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(
            cities[0],
            City {
                rank: 1,
                name: "Denver".to_string(),
                state: "Colorado".to_string(),
                description: "Denver has it all.".to_string(),
            }
        );
        assert_eq!(cities[1].rank, 2);
        assert_eq!(cities[1].name, "Austin");
    }

    #[test]
    fn test_missing_markers_fail_loudly() {
        let html = "<html><body><h2>1. Denver, Colorado</h2></body></html>";
        assert!(matches!(
            parse_city_rankings(html),
            Err(ScrapeError::NoRankings)
        ));
    }

    #[test]
    fn test_slide_without_title() {
        let html = r#"<div class="slide-layout clearfix"><p>Orphan text</p></div>"#;
        assert!(matches!(
            parse_city_rankings(html),
            Err(ScrapeError::MissingElement { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_description_is_kept() {
        let html = r#"<div class="slide-layout clearfix"><h2 class="slide-title-text">1. Denver, Colorado</h2><p></p></div>"#;
        let cities = parse_city_rankings(html).unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Denver");
        assert_eq!(cities[0].description, "");
    }

    #[test]
    fn test_empty_title_is_missing() {
        let html = r#"<div class="slide-layout clearfix"><h2 class="slide-title-text">  </h2><p>Text</p></div>"#;
        assert!(matches!(
            parse_city_rankings(html),
            Err(ScrapeError::MissingElement { index: 0, element: "h2.slide-title-text" })
        ));
    }

    #[test]
    fn test_slide_without_description() {
        let html = r#"<div class="slide-layout clearfix">
            <h2 class="slide-title-text">3. Boulder, Colorado</h2>
        </div>"#;
        assert!(matches!(
            parse_city_rankings(html),
            Err(ScrapeError::MissingElement { element: "p", .. })
        ));
    }

    #[test]
    fn test_split_title_keeps_dotted_names() {
        let (rank, name, state) = split_title("14. St. Paul, Minnesota").unwrap();
        assert_eq!(rank, 14);
        assert_eq!(name, "St. Paul");
        assert_eq!(state, "Minnesota");
    }

    #[test]
    fn test_split_title_uses_last_comma_part_as_state() {
        let (_, name, state) = split_title("7. Raleigh, Durham, North Carolina").unwrap();
        assert_eq!(name, "Raleigh");
        assert_eq!(state, "North Carolina");
    }

    #[test]
    fn test_split_title_rejects_bad_rank() {
        assert!(matches!(
            split_title("First. Denver, Colorado"),
            Err(ScrapeError::InvalidRank(_))
        ));
        assert!(matches!(
            split_title("0. Denver, Colorado"),
            Err(ScrapeError::InvalidRank(_))
        ));
    }

    #[test]
    fn test_split_title_rejects_missing_state() {
        assert!(matches!(
            split_title("5. Denver"),
            Err(ScrapeError::InvalidTitle(_))
        ));
        assert!(matches!(
            split_title("Denver, Colorado"),
            Err(ScrapeError::InvalidTitle(_))
        ));
    }
}
