//! Prompt synthesis and the design vocabulary.
//!
//! The generation model takes a single natural-language prompt. When the
//! caller supplies a custom prompt it is used verbatim; otherwise the
//! prompt is synthesized from the requested action kind, the room (or
//! surface) type, the style, and optionally the chosen color palette,
//! always terminated by a fixed quality suffix.

// ---------------------------------------------------------------------------
// Action kinds
// ---------------------------------------------------------------------------

/// The kind of redesign requested. Drives the prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesignAction {
    /// Redesign an interior room. Default when no action is given.
    #[default]
    Interior,
    /// Redesign a building exterior (facade, porch, deck, ...).
    Exterior,
    /// Redesign a garden or outdoor area.
    Garden,
    /// Repaint a room or surface.
    Paint,
    /// Replace a class of objects (furniture, flooring, lighting, ...).
    Replace,
    /// Redo a floor plan for a space.
    Floor,
}

impl DesignAction {
    /// Parse an action identifier. Unknown or empty values fall back to
    /// [`DesignAction::Interior`], matching the template default.
    pub fn parse(s: &str) -> Self {
        match s {
            "exterior" => Self::Exterior,
            "garden" => Self::Garden,
            "paint" => Self::Paint,
            "replace" => Self::Replace,
            "floor" => Self::Floor,
            _ => Self::Interior,
        }
    }

    /// Stable identifier, as stored in design records.
    pub fn id(self) -> &'static str {
        match self {
            Self::Interior => "interior",
            Self::Exterior => "exterior",
            Self::Garden => "garden",
            Self::Paint => "paint",
            Self::Replace => "replace",
            Self::Floor => "floor",
        }
    }
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// `(id, display name)` pairs shared by clients and prompt synthesis.
pub type VocabEntry = (&'static str, &'static str);

/// Available design styles.
pub const DESIGN_STYLES: &[VocabEntry] = &[
    ("custom", "Custom"),
    ("modern", "Modern"),
    ("minimalist", "Minimalist"),
    ("bohemian", "Bohemian"),
    ("rustic", "Rustic"),
    ("vintage", "Vintage"),
    ("tropical", "Tropical"),
    ("industrial", "Industrial"),
    ("scandinavian", "Scandinavian"),
    ("baroque", "Baroque"),
    ("christmas", "Christmas"),
    ("contemporary", "Contemporary"),
];

/// Available color palettes. The `surprise` palette means "no palette
/// constraint" and is never mentioned in a synthesized prompt.
pub const COLOR_PALETTES: &[VocabEntry] = &[
    ("surprise", "Surprise Me"),
    ("millennial-gray", "Millennial Gray"),
    ("terracotta", "Terracotta Mirage"),
    ("neon-sunset", "Neon Sunset"),
    ("forest-hues", "Forest Hues"),
    ("peach-orchard", "Peach Orchard"),
    ("fuschia-blossom", "Fuschia Blossom"),
    ("emerald-gem", "Emerald Gem"),
    ("pastel-breeze", "Pastel Breeze"),
];

/// Interior room types.
pub const ROOM_TYPES: &[VocabEntry] = &[
    ("kitchen", "Kitchen"),
    ("living-room", "Living Room"),
    ("bedroom", "Bedroom"),
    ("bathroom", "Bathroom"),
    ("home-office", "Home Office"),
    ("dining-room", "Dining Room"),
    ("study", "Study Room"),
    ("gaming-room", "Gaming Room"),
    ("kids-room", "Kids' Room"),
    ("laundry", "Laundry Room"),
    ("garage", "Garage"),
    ("basement", "Basement"),
];

/// Exterior surface types.
pub const EXTERIOR_TYPES: &[VocabEntry] = &[
    ("front-facade", "Front Facade"),
    ("back-patio", "Back Patio"),
    ("entrance", "Entrance"),
    ("porch", "Porch"),
    ("deck", "Deck"),
    ("driveway", "Driveway"),
];

/// Garden area types.
pub const GARDEN_TYPES: &[VocabEntry] = &[
    ("front-garden", "Front Garden"),
    ("backyard", "Backyard"),
    ("vegetable-garden", "Vegetable Garden"),
    ("patio-garden", "Patio Garden"),
    ("landscape", "Landscape"),
    ("pool-area", "Pool Area"),
];

/// Paintable room/surface types.
pub const PAINT_TYPES: &[VocabEntry] = &[
    ("living-room", "Living Room"),
    ("bedroom", "Bedroom"),
    ("kitchen", "Kitchen"),
    ("bathroom", "Bathroom"),
    ("hallway", "Hallway"),
    ("office", "Office"),
];

/// Object classes for the replace action.
pub const REPLACE_TYPES: &[VocabEntry] = &[
    ("furniture", "Furniture"),
    ("flooring", "Flooring"),
    ("lighting", "Lighting"),
    ("fixtures", "Fixtures"),
    ("decorations", "Decorations"),
    ("hardware", "Hardware"),
];

/// Space categories for the floor-plan action.
pub const FLOOR_TYPES: &[VocabEntry] = &[
    ("residential", "Residential"),
    ("office", "Office"),
    ("apartment", "Apartment"),
    ("commercial", "Commercial"),
    ("studio", "Studio"),
    ("warehouse", "Warehouse"),
];

/// Look up a palette's display name by its id.
pub fn palette_name(palette_id: &str) -> Option<&'static str> {
    COLOR_PALETTES
        .iter()
        .find(|(id, _)| *id == palette_id)
        .map(|(_, name)| *name)
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

/// Fixed suffix appended to every synthesized prompt.
const QUALITY_SUFFIX: &str = ". High quality, realistic, professional photo.";

/// Default negative prompt sent with every generation request unless the
/// caller supplies its own.
pub const DEFAULT_NEGATIVE_PROMPT: &str = "blurry, distorted, ugly, low quality, artifacts";

/// Synthesize the generation prompt.
///
/// A non-empty `custom_prompt` is returned verbatim. Otherwise the prompt
/// is built from the action template, the room/surface type and style ids,
/// and (unless it is `surprise` or unknown) the palette's display name in
/// lowercase.
pub fn build_prompt(
    action: DesignAction,
    room_type: &str,
    style: &str,
    palette: Option<&str>,
    custom_prompt: Option<&str>,
) -> String {
    if let Some(custom) = custom_prompt {
        if !custom.trim().is_empty() {
            return custom.to_string();
        }
    }

    let mut prompt = match action {
        DesignAction::Interior => format!("Interior design of a {room_type} in {style} style"),
        DesignAction::Exterior => format!("Exterior design of a {room_type} in {style} style"),
        DesignAction::Garden => format!("Garden design of a {room_type} in {style} style"),
        DesignAction::Paint => format!("Paint design for a {room_type} in {style} style"),
        DesignAction::Replace => format!("Replace {room_type} with {style} style design"),
        DesignAction::Floor => {
            format!("Floor plan redesign of a {room_type} space in {style} style")
        }
    };

    if let Some(palette_id) = palette {
        if palette_id != "surprise" {
            if let Some(name) = palette_name(palette_id) {
                prompt.push_str(&format!(" with {} color palette", name.to_lowercase()));
            }
        }
    }

    prompt.push_str(QUALITY_SUFFIX);
    prompt
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
