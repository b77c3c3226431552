use std::sync::Mutex;

use super::*;

#[derive(Default)]
struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_owned());
    }
}

#[test]
fn delay_constant_is_one_second() {
    assert_eq!(SESSION_EXPIRED_REDIRECT_DELAY, Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn redirect_fires_after_delay() {
    let nav = Arc::new(RecordingNavigator::default());
    let scheduler = RedirectScheduler::new(nav.clone(), "/");
    let pending = scheduler.schedule();

    tokio::time::advance(Duration::from_millis(999)).await;
    tokio::task::yield_now().await;
    assert!(nav.paths().is_empty());

    pending.wait().await;
    assert_eq!(nav.paths(), vec!["/".to_owned()]);
}

#[tokio::test(start_paused = true)]
async fn cancelled_redirect_never_fires() {
    let nav = Arc::new(RecordingNavigator::default());
    let scheduler = RedirectScheduler::new(nav.clone(), "/");
    let pending = scheduler.schedule();

    pending.cancel();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(nav.paths().is_empty());
    assert!(pending.is_finished());
    pending.wait().await;
}

#[tokio::test(start_paused = true)]
async fn custom_delay_is_respected() {
    let nav = Arc::new(RecordingNavigator::default());
    let scheduler = RedirectScheduler::new(nav.clone(), "/login").with_delay(Duration::from_millis(50));
    assert_eq!(scheduler.delay(), Duration::from_millis(50));
    assert_eq!(scheduler.target(), "/login");

    scheduler.schedule().wait().await;
    assert_eq!(nav.paths(), vec!["/login".to_owned()]);
}

#[tokio::test(start_paused = true)]
async fn each_schedule_fires_once() {
    let nav = Arc::new(RecordingNavigator::default());
    let scheduler = RedirectScheduler::new(nav.clone(), "/");
    let first = scheduler.schedule();
    let second = scheduler.schedule();
    first.wait().await;
    second.wait().await;
    assert_eq!(nav.paths().len(), 2);
}
