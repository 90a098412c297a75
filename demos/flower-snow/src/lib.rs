use wasm_bindgen::prelude::*;

mod sketch;
use sketch::FlowerSnow;

#[cfg(feature = "vectors")]
petalfall_web::export_sketch!(FlowerSnow, "flower-snow", vectors);

#[cfg(not(feature = "vectors"))]
petalfall_web::export_sketch!(FlowerSnow, "flower-snow");
