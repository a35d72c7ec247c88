//! Interactive shell
//!
//! A nested text menu: choose a city, then a category, then a display
//! operation. Invalid answers re-prompt; only `exit` (or end of input) leaves
//! the shell. Failures while searching are reported and the menu is shown
//! again.

mod context;
mod menu;

pub use context::AppContext;
pub use menu::{
    parse_category, parse_choice, parse_city, parse_operation, render_category_menu,
    render_city_menu, render_operation_menu, MenuInput, Operation,
};

use crate::analysis::{
    average_rating, price_breakdown, rating_distribution, top_rated, RatingHistogram, TOP_N,
};
use crate::output::{render_histogram, render_location_table, render_price_chart};
use crate::scrape::City;
use crate::search::{Category, Location};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;
use std::io::Write;

/// Source of user input lines
pub trait LineSource {
    /// Reads one line, `Ok(None)` at end of input
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// Terminal input with line editing and history
pub struct ReadlineSource {
    editor: DefaultEditor,
}

impl ReadlineSource {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.as_str());
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    eprintln!("  (Ctrl+C) Type 'exit' to quit.");
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Pre-recorded input, used to drive the shell without a terminal
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> anyhow::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Where a submenu hands control back to
enum Flow {
    Back,
    Exit,
}

/// Runs the menu loop until the user exits or input ends
pub async fn run_shell<I: LineSource, W: Write>(
    ctx: &mut AppContext,
    cities: &[City],
    input: &mut I,
    out: &mut W,
) -> anyhow::Result<()> {
    if cities.is_empty() {
        writeln!(out, "No ranked cities available.")?;
        return Ok(());
    }

    loop {
        write!(out, "{}", render_city_menu(cities))?;
        let Some(line) = input.read_line("city> ")? else {
            break;
        };

        match parse_city(&line, cities) {
            MenuInput::Choice(index) => {
                if let Flow::Exit = category_menu(ctx, &cities[index], input, out).await? {
                    break;
                }
            }
            MenuInput::Exit => break,
            MenuInput::Back => writeln!(out, "  Already at the top menu")?,
            MenuInput::Invalid(message) => writeln!(out, "  {}", message)?,
        }
    }

    writeln!(out, "Bye!")?;
    Ok(())
}

async fn category_menu<I: LineSource, W: Write>(
    ctx: &mut AppContext,
    city: &City,
    input: &mut I,
    out: &mut W,
) -> anyhow::Result<Flow> {
    loop {
        write!(out, "{}", render_category_menu(city))?;
        let Some(line) = input.read_line("category> ")? else {
            return Ok(Flow::Exit);
        };

        match parse_category(&line) {
            MenuInput::Choice(index) => {
                let category = Category::ALL[index];
                match ctx.ensure_locations(&city.name, category).await {
                    Ok(locations) => {
                        if let Flow::Exit =
                            operation_menu(&city.name, category, &locations, input, out)?
                        {
                            return Ok(Flow::Exit);
                        }
                    }
                    Err(e) => {
                        tracing::error!("Loading {} locations for {} failed: {}", category, city.name, e);
                        writeln!(
                            out,
                            "  Could not load {} restaurants for {}: {}",
                            category, city.name, e
                        )?;
                    }
                }
            }
            MenuInput::Back => return Ok(Flow::Back),
            MenuInput::Exit => return Ok(Flow::Exit),
            MenuInput::Invalid(message) => writeln!(out, "  {}", message)?,
        }
    }
}

fn operation_menu<I: LineSource, W: Write>(
    city: &str,
    category: Category,
    locations: &[Location],
    input: &mut I,
    out: &mut W,
) -> anyhow::Result<Flow> {
    loop {
        write!(out, "{}", render_operation_menu(city, category, locations.len()))?;
        let Some(line) = input.read_line("operation> ")? else {
            return Ok(Flow::Exit);
        };

        match parse_operation(&line) {
            MenuInput::Choice(index) => {
                let operation = Operation::ALL[index];
                write!(out, "{}", run_operation(operation, city, category, locations))?;
            }
            MenuInput::Back => return Ok(Flow::Back),
            MenuInput::Exit => return Ok(Flow::Exit),
            MenuInput::Invalid(message) => writeln!(out, "  {}", message)?,
        }
    }
}

/// Renders the result of one display operation
pub fn run_operation(
    operation: Operation,
    city: &str,
    category: Category,
    locations: &[Location],
) -> String {
    let no_data = format!("\n  No rated {} restaurants stored for {}.\n", category, city);

    match operation {
        Operation::TopRated => {
            if locations.is_empty() {
                return format!("\n  No {} restaurants stored for {}.\n", category, city);
            }
            format!(
                "\nTop {} {} restaurants in {}:\n{}",
                TOP_N,
                category,
                city,
                render_location_table(&top_rated(locations, TOP_N))
            )
        }
        Operation::AverageRating => match average_rating(locations) {
            Some(average) => format!(
                "\n  Average rating of {} rated {} restaurants in {}: {:.2}\n",
                rating_distribution(locations).len(),
                category,
                city,
                average
            ),
            None => no_data,
        },
        Operation::RatingDistribution => {
            let ratings = rating_distribution(locations);
            if ratings.is_empty() {
                return no_data;
            }
            format!(
                "\nRating distribution of {} restaurants in {}:\n{}",
                category,
                city,
                render_histogram(&RatingHistogram::from_ratings(&ratings))
            )
        }
        Operation::PriceChart => {
            if locations.is_empty() {
                return format!("\n  No {} restaurants stored for {}.\n", category, city);
            }
            format!(
                "\nPrice levels of {} restaurants in {}:\n{}",
                category,
                city,
                render_price_chart(&price_breakdown(locations))
            )
        }
    }
}
