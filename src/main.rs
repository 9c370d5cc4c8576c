use leptos::prelude::*;
use mini_swap_leptos::App;
use tracing::Level;
use tracing_subscriber_wasm::MakeConsoleWriter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter::default().map_trace_level_to(Level::DEBUG))
        .with_max_level(if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        })
        // the browser console already shows timestamps
        .without_time()
        .with_ansi(false)
        .init();

    console_error_panic_hook::set_once();

    mount_to_body(App)
}
