mod support;

use std::sync::Arc;
use std::time::Duration;

use airlens::animation::{AnimationFetchError, fetch_animation, spawn_fetch};
use airlens::dataset::load_dataset;
use airlens::egui_app::controller::DashboardController;
use airlens::egui_app::state::{AnimationState, Page};
use airlens::resources::AppResources;
use airlens::settings::{AnimationSettings, EdaSettings};
use support::fixtures::{AIR_QUALITY_CSV, OzoneSensitive, write_file};
use support::http::{json_response, serve_once};

const LOTTIE: &str = r#"{"v":"5.7.4","nm":"aqi","fr":24,"ip":0,"op":48,"w":300,"h":300,"layers":[]}"#;

fn controller() -> DashboardController {
    let temp = tempfile::tempdir().expect("create tempdir");
    let dataset = load_dataset(&write_file(temp.path(), "aq.csv", AIR_QUALITY_CSV)).expect("load");
    let resources = AppResources::from_parts(Ok(Arc::new(dataset)), Ok(Arc::new(OzoneSensitive)));
    DashboardController::new(resources, EdaSettings::default())
}

fn settings_for(url: String) -> AnimationSettings {
    AnimationSettings {
        enabled: true,
        url,
        timeout_secs: 5,
        max_bytes: 64 * 1024,
    }
}

fn wait_for_fetch(controller: &mut DashboardController) {
    for _ in 0..500 {
        if controller.poll_animation() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("animation fetch did not finish");
}

#[test]
fn successful_fetch_reports_header() {
    let url = serve_once(json_response("200 OK", LOTTIE));
    let info = fetch_animation(&url, Duration::from_secs(5), 64 * 1024).expect("fetch");
    assert_eq!(info.name.as_deref(), Some("aqi"));
    assert_eq!(info.duration_secs(), 2.0);
}

#[test]
fn server_error_degrades_to_warning_and_views_still_work() {
    let url = serve_once(json_response("500 Internal Server Error", "{}"));
    let mut controller = controller();
    controller.attach_animation(spawn_fetch(&settings_for(url)));
    wait_for_fetch(&mut controller);

    assert!(matches!(controller.ui.animation, AnimationState::Failed(_)));
    controller.select_page(Page::Eda);
    assert!(controller.overview().is_some());
    assert!(controller.city_breakdown().is_some());
    controller.select_page(Page::Prediction);
    controller.submit_prediction();
    assert!(controller.ui.prediction.outcome.is_some());
}

#[test]
fn unparsable_body_degrades_to_warning() {
    let url = serve_once(json_response("200 OK", "<html>maintenance</html>"));
    let mut controller = controller();
    controller.attach_animation(spawn_fetch(&settings_for(url)));
    wait_for_fetch(&mut controller);

    assert!(matches!(controller.ui.animation, AnimationState::Failed(_)));
    assert!(controller.correlation().is_some());
}

#[test]
fn unreachable_host_is_an_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = fetch_animation(&format!("http://{addr}/"), Duration::from_secs(2), 1024)
        .expect_err("closed port must fail");
    assert!(matches!(err, AnimationFetchError::Http(_)));
}
