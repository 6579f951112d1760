//! Markup fragments the controller writes into the page, and the one place
//! it reads markup back: the favorite details used by the comparison table.

use crate::models::{Favorite, Location, Place};
use scraper::{Html, Selector};

pub const LOCATION_PLACEHOLDER: &str =
    "<option value='' disabled selected>Choose a Location</option>";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn paragraph(text: &str) -> String {
    format!("<p>{}</p>", escape(text))
}

pub fn location_option(location: &Location) -> String {
    let name = escape(location.as_str());
    format!("<option value=\"{name}\">{name}</option>")
}

/// Formats like an en-US `toLocaleString`: thousands separators and at most
/// three fraction digits, trailing zeros dropped.
pub fn format_grouped(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d);
    }

    let sign = if value < 0.0 && (grouped != "0" || !frac.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

pub fn estimated_price(price: f64) -> String {
    format!("<h2>Estimated Price: ₹{} Lakh</h2>", format_grouped(price))
}

pub fn error_heading(message: &str) -> String {
    format!("<h2 style='color:red;'>{}</h2>", escape(message))
}

pub fn location_popup(location: &Location) -> String {
    format!("<b>{}</b>", escape(location.as_str()))
}

pub fn place_popup(place: &Place) -> String {
    format!(
        "<strong>{}</strong><br>({}, {})",
        escape(&place.name),
        place.lat,
        place.lon
    )
}

/// One favorites entry; the comparison table later reads `data-details` back.
pub fn favorite_item(fav: &Favorite) -> String {
    let location = escape(fav.location.as_str());
    let details = escape(&format!(
        "{}|{}|{}|{}|{}",
        fav.location, fav.sqft, fav.bhk, fav.bath, fav.price
    ));
    format!(
        "<div class=\"favorite-item\" data-id=\"{id}\" data-details=\"{details}\">\
         <input type=\"checkbox\" value=\"{id}\">\
         <strong>{location}</strong> - {sqft} sqft, {bhk} BHK, {bath} Bath, {age} years old - ₹{price}L \
         <button class=\"remove-fav\" data-id=\"{id}\">❌ Remove</button>\
         </div>",
        id = fav.id,
        sqft = fav.sqft,
        bhk = fav.bhk,
        bath = fav.bath,
        age = fav.property_age,
        price = fav.price,
    )
}

/// Detail rows of the favorite items whose checkbox value is in `checked`,
/// in document order.
pub fn selected_details(markup: &str, checked: &[String]) -> Vec<Vec<String>> {
    let (Ok(items), Ok(checkbox)) = (
        Selector::parse("div.favorite-item"),
        Selector::parse("input[type=\"checkbox\"]"),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_fragment(markup);
    document
        .select(&items)
        .filter(|item| {
            item.select(&checkbox)
                .filter_map(|input| input.value().attr("value"))
                .any(|value| checked.iter().any(|c| c == value))
        })
        .filter_map(|item| item.value().attr("data-details"))
        .map(|details| details.split('|').map(str::to_string).collect())
        .collect()
}

pub fn comparison_table(rows: &[Vec<String>]) -> String {
    let mut table = String::from(
        "<table border='1'><tr><th>Location</th><th>Sqft</th><th>BHK</th><th>Bath</th><th>Price</th></tr>",
    );
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| escape(cell)).collect();
        table.push_str("<tr><td>");
        table.push_str(&cells.join("</td><td>"));
        table.push_str("</td></tr>");
    }
    table.push_str("</table>");
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorite(id: i64, location: &str, price: f64) -> Favorite {
        Favorite {
            id,
            location: Location::new(location),
            sqft: 1200.0,
            bhk: 2,
            bath: 2,
            property_age: 4,
            price,
        }
    }

    #[test]
    fn grouped_formatting_matches_locale_style() {
        assert_eq!(format_grouped(42.5), "42.5");
        assert_eq!(format_grouped(1234.5), "1,234.5");
        assert_eq!(format_grouped(1_000_000.0), "1,000,000");
        assert_eq!(format_grouped(0.12345), "0.123");
        assert_eq!(format_grouped(999.0), "999");
    }

    #[test]
    fn estimated_price_heading() {
        assert_eq!(
            estimated_price(42.5),
            "<h2>Estimated Price: ₹42.5 Lakh</h2>"
        );
    }

    #[test]
    fn location_names_are_escaped() {
        assert_eq!(
            location_option(&Location::new("A & B")),
            "<option value=\"A &amp; B\">A &amp; B</option>"
        );
    }

    #[test]
    fn selected_details_reads_checked_items_only() {
        let markup = [
            favorite(1, "Whitefield", 90.0),
            favorite(2, "HSR Layout", 120.5),
            favorite(3, "Bellandur", 75.0),
        ]
        .iter()
        .map(favorite_item)
        .collect::<String>();

        let rows = selected_details(&markup, &["1".to_string(), "3".to_string()]);
        assert_eq!(
            rows,
            vec![
                vec!["Whitefield", "1200", "2", "2", "90"],
                vec!["Bellandur", "1200", "2", "2", "75"],
            ]
        );
    }

    #[test]
    fn selected_details_round_trips_escaped_names() {
        let markup = favorite_item(&favorite(7, "Koramangala <5th Block>", 150.0));
        let rows = selected_details(&markup, &["7".to_string()]);
        assert_eq!(rows[0][0], "Koramangala <5th Block>");
    }

    #[test]
    fn comparison_table_has_one_row_per_selection() {
        let table = comparison_table(&[
            vec!["A".into(), "1".into(), "2".into(), "3".into(), "4".into()],
            vec!["B".into(), "5".into(), "6".into(), "7".into(), "8".into()],
        ]);
        assert!(table.starts_with("<table border='1'>"));
        assert!(table.contains("<tr><td>A</td><td>1</td><td>2</td><td>3</td><td>4</td></tr>"));
        assert_eq!(table.matches("<tr><td>").count(), 2);
    }
}
