//! Menu parsing and rendering
//!
//! Every menu accepts an option by number or by (case-insensitive) name, plus
//! the navigation words `back` and `exit`.

use crate::scrape::City;
use crate::search::Category;
use std::fmt;

/// What the user typed at a menu prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuInput {
    /// Zero-based index of the chosen option
    Choice(usize),
    Back,
    Exit,
    Invalid(String),
}

/// Display operations offered once a city and category are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    TopRated,
    AverageRating,
    RatingDistribution,
    PriceChart,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::TopRated,
        Operation::AverageRating,
        Operation::RatingDistribution,
        Operation::PriceChart,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::TopRated => "top 3",
            Self::AverageRating => "average",
            Self::RatingDistribution => "distribution",
            Self::PriceChart => "prices",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::TopRated => "Top 3 restaurants by rating",
            Self::AverageRating => "Average rating",
            Self::RatingDistribution => "Rating distribution chart",
            Self::PriceChart => "Price level chart",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Parses a menu answer against `options`
///
/// Numbers are 1-based. `back` is only accepted when `allow_back` is set.
pub fn parse_choice(input: &str, options: &[&str], allow_back: bool) -> MenuInput {
    let input = input.trim();

    if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
        return MenuInput::Exit;
    }
    if allow_back && input.eq_ignore_ascii_case("back") {
        return MenuInput::Back;
    }

    if let Ok(number) = input.parse::<usize>() {
        if (1..=options.len()).contains(&number) {
            return MenuInput::Choice(number - 1);
        }
        return MenuInput::Invalid(format!(
            "Please enter a number between 1 and {}",
            options.len()
        ));
    }

    if let Some(index) = options
        .iter()
        .position(|option| option.eq_ignore_ascii_case(input))
    {
        return MenuInput::Choice(index);
    }

    MenuInput::Invalid(format!("Unknown option '{}'", input))
}

pub fn parse_city(input: &str, cities: &[City]) -> MenuInput {
    let names: Vec<&str> = cities.iter().map(|city| city.name.as_str()).collect();
    parse_choice(input, &names, false)
}

pub fn parse_category(input: &str) -> MenuInput {
    let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
    parse_choice(input, &names, true)
}

pub fn parse_operation(input: &str) -> MenuInput {
    let labels: Vec<&str> = Operation::ALL.iter().map(Operation::label).collect();
    parse_choice(input, &labels, true)
}

pub fn render_city_menu(cities: &[City]) -> String {
    let mut out = String::from("\nBest places to live:\n");
    for (i, city) in cities.iter().enumerate() {
        out.push_str(&format!("  [{}] {}, {}\n", i + 1, city.name, city.state));
    }
    out.push_str("Choose a city by number or name, or 'exit'.\n");
    out
}

pub fn render_category_menu(city: &City) -> String {
    let mut out = format!(
        "\n{}, {} (#{})\n  {}\n\nCategories:\n",
        city.name, city.state, city.rank, city.description
    );
    for (i, category) in Category::ALL.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", i + 1, category));
    }
    out.push_str("Choose a category, 'back' or 'exit'.\n");
    out
}

pub fn render_operation_menu(city: &str, category: Category, count: usize) -> String {
    let mut out = format!("\n{} restaurants in {} ({} stored):\n", category, city, count);
    for (i, operation) in Operation::ALL.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", i + 1, operation));
    }
    out.push_str("Choose an operation, 'back' or 'exit'.\n");
    out
}
