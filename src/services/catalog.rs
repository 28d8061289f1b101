//! Static lookup tables: activity → place categories, category code → display
//! label, budget → allowed price levels, price level → display band.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::{ActivityType, BudgetBand};

/// Categories searched when the activity type is not one we know
pub const DEFAULT_CATEGORIES: &[&str] = &["restaurant", "park", "tourist_attraction", "museum", "bar"];

/// Display text for a place without a known price level
pub const PRICE_NOT_AVAILABLE: &str = "Preço não informado";

/// Level assumed by budget filtering when the display band cannot be mapped back
pub const DEFAULT_PRICE_LEVEL: u8 = 2;

/// Category code marking merchandise retail, never a valid outing
pub const STORE_CATEGORY: &str = "store";

const PRICE_BANDS: [&str; 5] = [
    "R$0",
    "R$10 – R$50",
    "R$50 – R$100",
    "R$100 – R$200",
    "R$200 ou mais",
];

static CATEGORY_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("amusement_park", "Parque de Diversões"),
        ("aquarium", "Aquário"),
        ("art_gallery", "Galeria de Arte"),
        ("bar", "Bar"),
        ("beauty_salon", "Salão de Beleza"),
        ("bowling_alley", "Boliche"),
        ("campground", "Camping"),
        ("cultural_center", "Centro Cultural"),
        ("establishment", "Estabelecimento"),
        ("garden", "Jardim"),
        ("gym", "Academia"),
        ("karaoke", "Karaokê"),
        ("library", "Biblioteca"),
        ("movie_theater", "Cinema"),
        ("museum", "Museu"),
        ("natural_feature", "Atração Natural"),
        ("night_club", "Vida Noturna"),
        ("park", "Parque"),
        ("place_of_worship", "Local de Culto"),
        ("point_of_interest", "Ponto de Interesse"),
        ("restaurant", "Restaurante"),
        ("spa", "Spa"),
        ("sports_complex", "Complexo Esportivo"),
        ("stadium", "Estádio"),
        ("store", "Loja"),
        ("theater", "Teatro"),
        ("tourist_attraction", "Ponto Turístico"),
        ("zoo", "Zoológico"),
        ("arcade", "Arcade"),
        ("mountain", "Montanha"),
    ])
});

/// Ordered categories searched for an activity; order is search priority only
pub fn categories_for(activity: ActivityType) -> &'static [&'static str] {
    match activity {
        ActivityType::Familia => &[
            "park",
            "museum",
            "aquarium",
            "zoo",
            "amusement_park",
            "restaurant",
            "movie_theater",
            "library",
        ],
        ActivityType::Casal => &[
            "restaurant",
            "movie_theater",
            "art_gallery",
            "park",
            "bar",
            "spa",
            "tourist_attraction",
        ],
        ActivityType::Fitness => &["park", "gym", "sports_complex", "stadium"],
        ActivityType::Amigos => &[
            "bar",
            "night_club",
            "restaurant",
            "bowling_alley",
            "amusement_park",
            "movie_theater",
            "karaoke",
            "arcade",
        ],
        ActivityType::Cultura => &[
            "museum",
            "art_gallery",
            "theater",
            "library",
            "tourist_attraction",
            "cultural_center",
        ],
        ActivityType::Aventura => &[
            "park",
            "tourist_attraction",
            "amusement_park",
            "aquarium",
            "zoo",
            "campground",
            "natural_feature",
            "mountain",
        ],
        ActivityType::Relaxamento => &[
            "spa",
            "park",
            "beauty_salon",
            "restaurant",
            "bar",
            "library",
            "art_gallery",
            "garden",
        ],
        ActivityType::Outro => DEFAULT_CATEGORIES,
    }
}

/// Price levels a budget allows; each band's set contains every cheaper band's set
pub fn price_levels_for(budget: BudgetBand) -> &'static [u8] {
    match budget {
        BudgetBand::Free => &[0],
        BudgetBand::UpTo50 => &[0, 1],
        BudgetBand::From50To100 => &[0, 1, 2],
        BudgetBand::From100To200 => &[0, 1, 2, 3],
        BudgetBand::From200To500 | BudgetBand::Above500 => &[0, 1, 2, 3, 4],
    }
}

/// Canonical band text for a provider price level
pub fn display_price(level: Option<u8>) -> &'static str {
    level
        .and_then(|l| PRICE_BANDS.get(usize::from(l)))
        .copied()
        .unwrap_or(PRICE_NOT_AVAILABLE)
}

/// Inverse of [`display_price`] over the five canonical bands
pub fn price_level_from_display(text: &str) -> Option<u8> {
    PRICE_BANDS
        .iter()
        .position(|band| *band == text)
        .and_then(|index| u8::try_from(index).ok())
}

/// Display label for a provider category code; unknown codes pass through
pub fn translate_category(code: &str) -> &str {
    CATEGORY_LABELS.get(code).copied().unwrap_or(code)
}

/// True when the codes mark the place as a store (raw code or its display label)
pub fn is_store(category_codes: &[String]) -> bool {
    let store_label = translate_category(STORE_CATEGORY);
    category_codes
        .iter()
        .any(|code| code == STORE_CATEGORY || code == store_label)
}
