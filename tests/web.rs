#![cfg(target_arch = "wasm32")]

use aurora_waves::viewport::clamp_pixel_ratio;
use aurora_waves::AuroraHandle;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_point(id: &str, width: u32, height: u32) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document.create_element("div").unwrap();
    div.set_id(id);
    div.set_attribute("style", &format!("width: {width}px; height: {height}px;"))
        .unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

fn options(mount_id: &str, seed: f64) -> JsValue {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"mountId".into(), &mount_id.into()).unwrap();
    js_sys::Reflect::set(&obj, &"seed".into(), &seed.into()).unwrap();
    obj.into()
}

#[wasm_bindgen_test]
fn mounts_labelled_canvas_at_device_resolution() {
    let container = mount_point("aurora-web-mount", 300, 150);
    let mut handle = AuroraHandle::mount(options("aurora-web-mount", 7.0))
        .unwrap()
        .expect("mount point exists");

    let canvas = handle.canvas();
    assert_eq!(canvas.get_attribute("role").as_deref(), Some("img"));
    assert_eq!(
        canvas.get_attribute("aria-label").as_deref(),
        Some("Animated aurora waves background")
    );
    let ratio = clamp_pixel_ratio(web_sys::window().unwrap().device_pixel_ratio());
    assert_eq!(canvas.width(), (300.0 * ratio) as u32);
    assert_eq!(canvas.height(), (150.0 * ratio) as u32);
    assert!(handle.running());
    assert!(handle.base_hue() >= 180.0 && handle.base_hue() < 240.0);

    handle.unmount();
    handle.unmount();
    assert!(!handle.running());
    assert!(canvas.parent_node().is_none());
    container.remove();
}

#[wasm_bindgen_test]
fn missing_mount_point_is_not_an_error() {
    let mounted = AuroraHandle::mount(options("no-such-element", 1.0)).unwrap();
    assert!(mounted.is_none());
}

#[wasm_bindgen_test]
fn zero_size_container_still_gets_a_pixel() {
    let container = mount_point("aurora-empty-mount", 0, 0);
    let mut handle = AuroraHandle::mount(options("aurora-empty-mount", 2.0))
        .unwrap()
        .expect("mount point exists");
    let canvas = handle.canvas();
    assert!(canvas.width() >= 1 && canvas.height() >= 1);
    handle.unmount();
    container.remove();
}
