//! HTML card markup for the recommendation list.

use data_loader::PlaceRecord;
use pipeline::RankedPlace;
use url::form_urlencoded;

pub const DEFAULT_IMAGE: &str = "default.jpg";
pub const HIGHLIGHT_CLASS: &str = "lottery-highlight";
pub const EMPTY_LIST_MESSAGE: &str = "No restaurants match the current filters.";
const NOT_AVAILABLE: &str = "n/a";
const NAVIGATION_BASE: &str = "https://uri.amap.com/marker";

/// `"{m}m"` below one kilometer, `"{km:.1}km"` from there on
pub fn format_distance(distance_m: f64) -> String {
    if distance_m < 1000.0 {
        format!("{}m", distance_m.round() as i64)
    } else {
        format!("{:.1}km", distance_m / 1000.0)
    }
}

/// Link that opens the place in the map provider's marker page
pub fn navigation_url(place: &PlaceRecord) -> String {
    let name: String = form_urlencoded::byte_serialize(place.name.as_bytes()).collect();
    format!(
        "{}?position={},{}&name={}",
        NAVIGATION_BASE, place.coordinate.lng, place.coordinate.lat, name
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Card element id for a place
pub fn card_id(place: &PlaceRecord) -> String {
    format!("rest-{}", place.id)
}

/// Markup for one card
pub fn render_card(ranked: &RankedPlace, highlighted: bool) -> String {
    let place = &ranked.place;
    let image = place.photos.first().map(String::as_str).unwrap_or(DEFAULT_IMAGE);
    let price = place
        .avg_price
        .map(|p| format!("¥{p}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let rating = place
        .rating
        .map(|r| r.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let phone = place.phone.as_deref().unwrap_or(NOT_AVAILABLE);
    let class = if highlighted {
        format!("restaurant-card {HIGHLIGHT_CLASS}")
    } else {
        "restaurant-card".to_string()
    };
    let name = escape_html(&place.name);

    format!(
        r#"<div class="{class}" id="{id}">
    <img src="{image}" alt="{name}" />
    <h3>{name}</h3>
    <div class="info">
        <span>Avg: {price}</span>
        <span>Rating: {rating}</span>
        <span>Distance: {distance}</span>
    </div>
    <div class="extra">
        <span>Phone: {phone}</span>
        <a href="{link}" target="_blank">Map details / navigation</a>
    </div>
</div>"#,
        id = escape_html(&card_id(place)),
        image = escape_html(image),
        price = escape_html(&price),
        distance = format_distance(ranked.distance_m),
        phone = escape_html(phone),
        link = escape_html(&navigation_url(place)),
    )
}

/// Markup for the whole list; `highlighted` marks the lottery pick
pub fn render_recommend_list(places: &[RankedPlace], highlighted: Option<&str>) -> String {
    if places.is_empty() {
        return format!("<p>{EMPTY_LIST_MESSAGE}</p>");
    }
    places
        .iter()
        .map(|ranked| render_card(ranked, highlighted == Some(ranked.place.id.as_str())))
        .collect::<Vec<_>>()
        .join("\n")
}
