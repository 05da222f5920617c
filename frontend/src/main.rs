#[cfg(target_arch = "wasm32")]
fn main() {
    ahorrista::ui::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("ahorrista runs in the browser; build it for wasm32 (e.g. `trunk serve`)");
}
