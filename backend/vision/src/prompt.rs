//! The fixed extraction prompt sent with every bag photo.

/// Asks for exactly one JSON object; any prose around it is stripped by
/// the parser before deserialization.
pub const EXTRACTION_PROMPT: &str = "\
You are reading the label of a specialty coffee bag. Extract the product \
metadata visible on the bag and respond with ONLY a JSON object (no markdown, \
no commentary) using exactly these keys, omitting any key you cannot read: \
roaster, productName, origin, region, varietal, processingMethod, roastLevel, \
flavorNotes (array of strings), altitude, harvestYear, price, weight, \
brewRecommendations (array of strings). Values are strings as printed on the \
label. Do not guess values that are not visible.";
