pub mod runner;

pub use runner::SketchRunner;

// Re-exported so `export_sketch!` expands without extra dependencies in the caller.
#[doc(hidden)]
pub use console_error_panic_hook;
#[doc(hidden)]
pub use console_log;
#[doc(hidden)]
pub use js_sys;
#[doc(hidden)]
pub use log;
pub use petalfall;

/// Generate all `#[wasm_bindgen]` exports for a sketch.
///
/// Generates:
/// - `thread_local!` storage for the SketchRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, input, detector and resize
///   handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod sketch;
/// use sketch::MySketch;
///
/// petalfall_web::export_sketch!(MySketch, "my-sketch");
/// // or, with the `vectors` feature, also export the tessellated buffer:
/// petalfall_web::export_sketch!(MySketch, "my-sketch", vectors);
/// ```
///
/// # Arguments
///
/// - `$sketch_type`: The sketch struct type that implements `petalfall::Sketch`
///   and has a `new()` constructor
/// - `$sketch_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_sketch {
    ($sketch_type:ty, $sketch_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SketchRunner<$sketch_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SketchRunner<$sketch_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Sketch not initialized. Call sketch_init() first.");
                f(runner)
            })
        }

        fn install_runner(runner: $crate::SketchRunner<$sketch_type>) {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            with_runner(|r| r.init());
            $crate::log::info!("{}: initialized", $sketch_name);
        }

        fn init_logging() {
            $crate::console_error_panic_hook::set_once();
            let _ = $crate::console_log::init_with_level($crate::log::Level::Info);
        }

        #[wasm_bindgen]
        pub fn sketch_init() {
            init_logging();
            let sketch = <$sketch_type>::new();
            install_runner($crate::SketchRunner::new(sketch));
        }

        /// Initialize with a JSON configuration. Invalid JSON is logged and
        /// the sketch's own configuration is used instead.
        #[wasm_bindgen]
        pub fn sketch_init_with_config(json: &str) {
            init_logging();
            let sketch = <$sketch_type>::new();
            let runner = match $crate::petalfall::SketchConfig::from_json(json) {
                Ok(config) => $crate::SketchRunner::with_config(sketch, config),
                Err(e) => {
                    $crate::log::error!("{}: bad config ({}), using defaults", $sketch_name, e);
                    $crate::SketchRunner::new(sketch)
                }
            };
            install_runner(runner);
        }

        #[wasm_bindgen]
        pub fn sketch_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn sketch_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::petalfall::InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn sketch_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::petalfall::InputEvent::PointerMove { x, y }));
        }

        /// Hand-pose callback: pass the raw predictions array.
        #[wasm_bindgen]
        pub fn sketch_hand_results(results: &$crate::js_sys::Array) {
            let hands = results.length();
            with_runner(|r| r.publish_hands(hands));
        }

        /// Hand-pose callback for detectors that only report a count.
        #[wasm_bindgen]
        pub fn sketch_hand_count(hands: u32) {
            with_runner(|r| r.publish_hands(hands));
        }

        #[wasm_bindgen]
        pub fn sketch_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_events_len() -> u32 {
            with_runner(|r| r.events_len())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }

        #[wasm_bindgen]
        pub fn get_frame_count() -> f64 {
            with_runner(|r| r.frame_count())
        }

        #[wasm_bindgen]
        pub fn get_dropped_detections() -> f64 {
            with_runner(|r| r.dropped_detections())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };

    // Variant with vectors feature
    ($sketch_type:ty, $sketch_name:literal, vectors) => {
        $crate::export_sketch!($sketch_type, $sketch_name);

        // ---- Vector accessors (only when vectors feature is enabled) ----

        #[wasm_bindgen]
        pub fn get_vector_vertices_ptr() -> *const f32 {
            with_runner(|r| r.vector_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_vector_vertex_count() -> u32 {
            with_runner(|r| r.vector_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_max_vector_vertices() -> u32 {
            with_runner(|r| r.max_vector_vertices())
        }
    };
}
