//! Script generation — turns a natural-language query into Earth-Engine
//! style JavaScript via the LLM, or falls back to the built-in scripts.
//!
//! DESIGN
//! ======
//! All failures collapse into fixed sentinel strings at this layer so the
//! editor surface always has text to render. The underlying `LlmError` is
//! logged and then deliberately flattened: auth failures, rate limiting,
//! and transient network errors are not distinguished here.

use std::sync::Arc;

use tracing::warn;

use super::classify::QueryKind;
use crate::llm::types::{LlmChat, Message};

/// Returned when the provider answered but the response carried no text.
pub const SENTINEL_EMPTY: &str = "// Error generating code";

/// Returned when the request failed outright (transport error or non-2xx).
pub const SENTINEL_CONNECT: &str =
    "// Error connecting to Claude API. Please check your connection and API key.";

/// Build the fixed single-turn instruction template around the user query.
#[must_use]
pub fn build_prompt(query: &str) -> String {
    format!(
        "Generate Google Earth Engine JavaScript code for the following satellite \
         data analysis request. Return only the code, with brief inline comments. \
         Use Sentinel-1/Sentinel-2 collections where appropriate.\n\n\
         Request: {query}"
    )
}

/// Generate script text for a query. Always returns a string: the first
/// text block of the completion, or a sentinel on any failure.
pub async fn generate(llm: &Arc<dyn LlmChat>, query: &str) -> String {
    let messages = vec![Message::user(build_prompt(query))];
    match llm.chat(&messages).await {
        Ok(response) => match response.first_text() {
            Some(text) => text.to_string(),
            None => SENTINEL_EMPTY.to_string(),
        },
        Err(e) => {
            warn!(error = %e, "codegen: generation failed");
            SENTINEL_CONNECT.to_string()
        }
    }
}

/// The editor's static script text, shown when no LLM is configured.
#[must_use]
pub fn fallback_script(kind: QueryKind) -> &'static str {
    match kind {
        QueryKind::Flood => FLOOD_SCRIPT,
        QueryKind::Crop => CROP_SCRIPT,
    }
}

const FLOOD_SCRIPT: &str = r"// Flood extent mapping with Sentinel-1 SAR
var aoi = ee.FeatureCollection('USDOS/LSIB_SIMPLE/2017')
  .filter(ee.Filter.eq('country_na', 'India'));

var before = ee.ImageCollection('COPERNICUS/S1_GRD')
  .filterBounds(aoi)
  .filterDate('2023-06-01', '2023-06-30')
  .filter(ee.Filter.eq('instrumentMode', 'IW'))
  .select('VV')
  .median();

var after = ee.ImageCollection('COPERNICUS/S1_GRD')
  .filterBounds(aoi)
  .filterDate('2023-08-01', '2023-08-31')
  .filter(ee.Filter.eq('instrumentMode', 'IW'))
  .select('VV')
  .median();

// Backscatter drop below -3 dB marks newly inundated pixels.
var difference = after.subtract(before);
var flooded = difference.lt(-3).selfMask();

Map.centerObject(aoi, 8);
Map.addLayer(flooded, {palette: ['#1d4ed8']}, 'Flood extent');

var stats = flooded.multiply(ee.Image.pixelArea()).reduceRegion({
  reducer: ee.Reducer.sum(),
  geometry: aoi,
  scale: 30,
  maxPixels: 1e10
});
print('Flooded area (m^2):', stats);
";

const CROP_SCRIPT: &str = r"// Rabi crop classification with Sentinel-2
var aoi = ee.FeatureCollection('FAO/GAUL/2015/level2')
  .filter(ee.Filter.eq('ADM2_NAME', 'Hoshiarpur'));

var s2 = ee.ImageCollection('COPERNICUS/S2_SR')
  .filterBounds(aoi)
  .filterDate('2023-11-01', '2024-03-31')
  .filter(ee.Filter.lt('CLOUDY_PIXEL_PERCENTAGE', 20))
  .median()
  .clip(aoi);

var ndvi = s2.normalizedDifference(['B8', 'B4']).rename('NDVI');
var stack = s2.select(['B2', 'B3', 'B4', 'B8', 'B11']).addBands(ndvi);

// Train a random forest on the labelled field polygons.
var training = stack.sampleRegions({
  collection: fields,
  properties: ['crop'],
  scale: 10
});
var classifier = ee.Classifier.smileRandomForest(100).train({
  features: training,
  classProperty: 'crop',
  inputProperties: stack.bandNames()
});
var classified = stack.classify(classifier);

Map.centerObject(aoi, 10);
Map.addLayer(classified, {min: 0, max: 2, palette: ['#fbbf24', '#22c55e', '#92400e']}, 'Crops');
";

#[cfg(test)]
#[path = "codegen_test.rs"]
mod tests;
