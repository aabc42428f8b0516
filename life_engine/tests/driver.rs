use std::time::Duration;

use life_engine::patterns::{BLINKER, GLIDER};
use life_engine::{Driver, Session, SharedSession, SimConfig, TickPeriod};
use tokio::time::sleep;

fn shared(config: SimConfig) -> SharedSession {
    SharedSession::new(Session::new(config.with_seed(9)))
}

fn generation(session: &SharedSession) -> u64 {
    session.read(Session::generation)
}

#[tokio::test(start_paused = true)]
async fn stops_itself_on_stasis() {
    let session = shared(SimConfig::default());
    session.update(|s| s.load_pattern(&BLINKER)).unwrap();
    let _driver = Driver::spawn(session.clone());

    session.update(Session::start);
    sleep(Duration::from_millis(1000)).await;

    session.read(|s| {
        assert!(!s.is_running());
        assert_eq!(s.generation(), 2);
        assert_eq!(s.stasis().generation(), Some(2));
    });
}

#[tokio::test(start_paused = true)]
async fn ticks_once_per_period() {
    let session = shared(SimConfig::default());
    session.update(|s| s.drop_pattern(&GLIDER, 5, 5)).unwrap();
    let _driver = Driver::spawn(session.clone());

    session.update(Session::start);
    sleep(Duration::from_millis(1100)).await;
    assert_eq!(generation(&session), 5);
}

#[tokio::test(start_paused = true)]
async fn rejected_input_keeps_the_cadence() {
    let session = shared(SimConfig::default());
    session.update(|s| s.drop_pattern(&GLIDER, 5, 5)).unwrap();
    let _driver = Driver::spawn(session.clone());

    session.update(Session::start);
    for _ in 0..7 {
        sleep(Duration::from_millis(150)).await;
        assert!(session.update(|s| s.toggle_cell(0, 0)).is_err());
        assert!(session.update(|s| s.drop_pattern(&BLINKER, 20, 20)).is_err());
        session.update(|s| s.is_running());
    }
    assert_eq!(generation(&session), 5);
}

#[tokio::test(start_paused = true)]
async fn idle_until_started() {
    let session = shared(SimConfig::default());
    session.update(|s| s.drop_pattern(&GLIDER, 5, 5)).unwrap();
    let _driver = Driver::spawn(session.clone());

    sleep(Duration::from_millis(3000)).await;
    assert_eq!(generation(&session), 0);
}

#[tokio::test(start_paused = true)]
async fn pause_halts_further_ticks() {
    let session = shared(SimConfig::default());
    session.update(|s| s.drop_pattern(&GLIDER, 5, 5)).unwrap();
    let _driver = Driver::spawn(session.clone());

    session.update(Session::start);
    sleep(Duration::from_millis(650)).await;
    session.update(Session::pause);
    let paused_at = generation(&session);
    let grid = session.read(|s| *s.grid());
    assert!(paused_at > 0);

    sleep(Duration::from_millis(2000)).await;
    assert_eq!(generation(&session), paused_at);
    assert_eq!(session.read(|s| *s.grid()), grid);
}

#[tokio::test(start_paused = true)]
async fn reset_while_running_wins() {
    let session = shared(SimConfig::default());
    session.update(|s| s.drop_pattern(&GLIDER, 5, 5)).unwrap();
    let _driver = Driver::spawn(session.clone());

    session.update(Session::start);
    sleep(Duration::from_millis(450)).await;
    session.update(Session::reset);

    sleep(Duration::from_millis(2000)).await;
    session.read(|s| {
        assert!(!s.is_running());
        assert_eq!(s.generation(), 0);
        assert_eq!(s.population(), 0);
    });
}

#[tokio::test(start_paused = true)]
async fn period_change_rearms() {
    let slow = TickPeriod::from_millis(1000).unwrap();
    let session = shared(SimConfig::default().with_tick_period(slow));
    session.update(|s| s.drop_pattern(&GLIDER, 5, 5)).unwrap();
    let _driver = Driver::spawn(session.clone());

    session.update(Session::start);
    sleep(Duration::from_millis(500)).await;
    assert_eq!(generation(&session), 0);

    session.update(|s| s.set_tick_millis(100)).unwrap();
    sleep(Duration::from_millis(550)).await;
    assert_eq!(generation(&session), 5);
}

#[tokio::test(start_paused = true)]
async fn resumes_after_stasis_when_restarted() {
    let session = shared(SimConfig::default());
    session.update(|s| s.load_pattern(&BLINKER)).unwrap();
    let _driver = Driver::spawn(session.clone());

    session.update(Session::start);
    sleep(Duration::from_millis(1000)).await;
    assert_eq!(generation(&session), 2);

    session.update(Session::start);
    sleep(Duration::from_millis(1000)).await;
    session.read(|s| {
        assert_eq!(s.generation(), 4);
        assert_eq!(s.stasis().generation(), Some(4));
    });
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_task() {
    let session = shared(SimConfig::default());
    session.update(|s| s.drop_pattern(&GLIDER, 5, 5)).unwrap();
    let driver = Driver::spawn(session.clone());

    session.update(Session::start);
    sleep(Duration::from_millis(450)).await;
    driver.shutdown();
    let stopped_at = generation(&session);

    sleep(Duration::from_millis(2000)).await;
    assert!(driver.is_finished());
    assert_eq!(generation(&session), stopped_at);
    assert!(session.read(Session::is_running));
}
