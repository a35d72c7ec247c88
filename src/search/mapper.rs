//! Maps business search responses to location records

use crate::search::{Category, Location, SearchError, SearchResult};
use serde_json::Value;

/// Converts a decoded search response into one location per business
///
/// Optional fields (rating, price, phone, address) that are absent, null or
/// empty become `None`; a business without a name, or a response without a
/// `businesses` array, is an error.
pub fn map_businesses(response: &Value, city: &str, category: Category) -> SearchResult<Vec<Location>> {
    let businesses = match response.get("businesses").and_then(Value::as_array) {
        Some(businesses) => businesses,
        None => {
            if let Some(description) = response
                .pointer("/error/description")
                .and_then(Value::as_str)
            {
                return Err(SearchError::Api(description.to_string()));
            }
            return Err(SearchError::MissingBusinesses);
        }
    };

    businesses
        .iter()
        .enumerate()
        .map(|(index, business)| map_business(index, business, city, category))
        .collect()
}

fn map_business(index: usize, business: &Value, city: &str, category: Category) -> SearchResult<Location> {
    let name = non_empty_str(business.get("name")).ok_or_else(|| SearchError::MalformedBusiness {
        index,
        reason: "missing name".to_string(),
    })?;

    Ok(Location {
        name,
        city: city.to_string(),
        address: address(business),
        categories: category.as_str().to_string(),
        rating: rating(business.get("rating")),
        price: non_empty_str(business.get("price")),
        phone: non_empty_str(business.get("display_phone"))
            .or_else(|| non_empty_str(business.get("phone"))),
    })
}

/// Numeric rating, accepting numbers and numeric strings
fn rating(value: Option<&Value>) -> Option<f64> {
    let rating = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    rating.filter(|rating| rating.is_finite())
}

/// `location.display_address` joined with ", ", falling back to `location.address1`
fn address(business: &Value) -> Option<String> {
    let location = business.get("location")?;

    let display = location
        .get("display_address")
        .and_then(Value::as_array)
        .map(|lines| {
            lines
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|joined| !joined.is_empty());

    display.or_else(|| non_empty_str(location.get("address1")))
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
