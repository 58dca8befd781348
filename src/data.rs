//! Literature emission factors (ecoinvent 3.9, EPA WARM, Carbon Footprint Ltd).
//!
//! Units are kg CO2e per kg of material, cradle-to-gate, unless noted.

/// Material coefficients. Negative values are biogenic carbon storage.
pub const MATERIAL_FACTORS: &[(&str, f64)] = &[
    // Plastics
    ("hdpe", 2.6),
    ("ldpe", 2.9),
    ("pp", 1.95),
    ("pet", 3.12),
    ("pvc", 3.1),
    ("abs", 3.55),
    ("polycarbonate", 5.5),
    ("polystyrene", 3.4),
    ("nylon", 9.0),
    ("acrylic", 5.2),
    ("polyurethane", 4.2),
    ("silicone", 6.0),
    ("epoxy", 5.8),
    ("eva", 2.8),
    ("tpu", 4.0),
    // Metals
    ("steel", 2.0),
    ("recycled_steel", 0.7),
    ("aluminum", 14.8),
    ("recycled_aluminum", 1.7),
    ("copper", 4.0),
    ("zinc", 3.1),
    ("tin", 16.0),
    ("brass", 3.5),
    ("stainless_steel", 6.15),
    ("titanium", 35.0),
    ("nickel", 12.0),
    // Natural and organic
    ("cotton", 6.5),
    ("wool", 17.0),
    ("leather", 17.0),
    ("silk", 30.0),
    ("softwood", -1.5),
    ("hardwood", -1.2),
    ("bamboo", -1.0),
    ("natural_rubber", 3.0),
    ("cork", -1.5),
    ("jute", 0.5),
    // Minerals and ceramics
    ("glass", 1.25),
    ("concrete", 0.13),
    ("ceramic", 0.7),
    ("clay", 0.3),
    ("stone", 0.7),
    // Paper and packaging
    ("cardboard", 1.3),
    ("paper", 1.1),
    ("recycled_paper", 0.7),
    // Composites and other
    ("carbon_fiber", 30.0),
    ("fiberglass", 8.0),
    ("polyester_fabric", 5.5),
    ("acetal", 3.8),
    ("ptfe", 10.0),
    ("lithium_ion_battery", 12.5),
];

/// Median fallback for materials missing from the table.
pub const DEFAULT_MATERIAL_FACTOR: f64 = 3.0;

/// Common extractor spellings mapped onto canonical material keys.
pub const MATERIAL_ALIASES: &[(&str, &str)] = &[
    ("plastic", "abs"),
    ("plastics", "abs"),
    ("metal", "steel"),
    ("iron", "steel"),
    ("stainless", "stainless_steel"),
    ("aluminium", "aluminum"),
    ("alu", "aluminum"),
    ("wood", "softwood"),
    ("timber", "softwood"),
    ("lumber", "softwood"),
    ("oak", "hardwood"),
    ("walnut", "hardwood"),
    ("maple", "hardwood"),
    ("teak", "hardwood"),
    ("pine", "softwood"),
    ("cedar", "softwood"),
    ("rubber", "natural_rubber"),
    ("synthetic_rubber", "tpu"),
    ("foam", "polyurethane"),
    ("pu_foam", "polyurethane"),
    ("memory_foam", "polyurethane"),
    ("polyethylene", "hdpe"),
    ("pe", "hdpe"),
    ("polypropylene", "pp"),
    ("polyester", "polyester_fabric"),
    ("neoprene", "natural_rubber"),
    ("spandex", "nylon"),
    ("elastane", "nylon"),
    ("lycra", "nylon"),
    ("teflon", "ptfe"),
    ("delrin", "acetal"),
    ("pom", "acetal"),
    ("pc", "polycarbonate"),
    ("ps", "polystyrene"),
    ("eps", "polystyrene"),
    ("styrofoam", "polystyrene"),
    ("kraft", "cardboard"),
    ("paperboard", "cardboard"),
    ("corrugated", "cardboard"),
    ("fabric", "cotton"),
    ("textile", "cotton"),
    ("cloth", "cotton"),
    ("denim", "cotton"),
    ("canvas", "cotton"),
    ("linen", "jute"),
    ("hemp", "jute"),
    ("granite", "stone"),
    ("marble", "stone"),
    ("slate", "stone"),
    ("chrome", "stainless_steel"),
    ("chromium", "stainless_steel"),
    ("bronze", "brass"),
    ("gold", "copper"),
    ("silver", "copper"),
    ("platinum", "nickel"),
    ("tungsten", "nickel"),
    ("fibre_glass", "fiberglass"),
    ("fiber_glass", "fiberglass"),
    ("cf", "carbon_fiber"),
    ("cfrp", "carbon_fiber"),
    ("gfrp", "fiberglass"),
    ("battery", "lithium_ion_battery"),
    ("li_ion", "lithium_ion_battery"),
    ("lithium", "lithium_ion_battery"),
];

/// Manufacturing coefficients per kg of finished product, by category.
pub const MANUFACTURING_FACTORS: &[(&str, f64)] = &[
    ("electronics", 3.0),
    ("appliances", 2.0),
    ("furniture", 1.0),
    ("clothing", 2.5),
    ("toys", 1.5),
    ("automotive", 2.5),
    ("sports", 1.5),
    ("kitchen", 1.8),
    ("tools", 2.0),
    ("beauty", 1.0),
    ("office", 1.2),
    ("garden", 1.2),
    ("pet", 1.0),
];

/// Manufacturing coefficient for categories missing from the table.
pub const DEFAULT_MANUFACTURING_FACTOR: f64 = 1.5;

/// Use-phase coefficients, kg CO2e per kg of product per year.
pub const USE_PHASE_FACTORS: &[(&str, f64)] = &[
    ("electronics", 2.0),
    ("appliances", 3.0),
];

pub const DEFAULT_USE_PHASE_FACTOR: f64 = 0.1;

/// kg CO2e per kg per 1000 km.
pub const TRANSPORT_FACTOR: f64 = 0.1;
/// 5000 km, in units of 1000 km.
pub const DEFAULT_TRANSPORT_DISTANCE_KKM: f64 = 5.0;
pub const DEFAULT_PRODUCT_LIFETIME_YEARS: f64 = 5.0;

/// Disposal method coefficients. Recycling is a credit.
pub const EOL_METHOD_FACTORS: &[(&str, f64)] = &[
    ("landfill", 0.5),
    ("incineration", 1.0),
    ("recycling", -0.3),
];

pub const BASELINE_MIX: &[(&str, f64)] =
    &[("landfill", 0.6), ("incineration", 0.2), ("recycling", 0.2)];
/// Recycling-heavy mixture.
pub const BEST_CASE_MIX: &[(&str, f64)] =
    &[("landfill", 0.1), ("incineration", 0.1), ("recycling", 0.8)];
/// No recycling at all.
pub const WORST_CASE_MIX: &[(&str, f64)] =
    &[("landfill", 0.8), ("incineration", 0.2), ("recycling", 0.0)];

/// Disposal scenarios as (name, [(method, fraction)]).
pub const EOL_SCENARIOS: &[(&str, &[(&str, f64)])] = &[
    ("baseline", BASELINE_MIX),
    ("best_case", BEST_CASE_MIX),
    ("worst_case", WORST_CASE_MIX),
];
