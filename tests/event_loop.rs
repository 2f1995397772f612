use std::time::Duration;

use calloop::EventLoop;
use spring_digits::prelude::*;

struct Counter {
    number: SpringNumber<RecordingRenderer, CalloopHost<Counter>>,
}

fn route(counter: &mut Counter, event: HostEvent) {
    counter.number.handle_event(event);
}

#[test]
fn test_calloop_host_drives_animation_to_rest() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut event_loop: EventLoop<'static, Counter> = EventLoop::try_new().unwrap();
    let host = CalloopHost::new(event_loop.handle(), route).frame_interval(Duration::from_millis(4));
    let mut counter = Counter {
        number: SpringNumber::new(
            RecordingRenderer::new(),
            host,
            SpringNumberConfig::new()
                .value(8)
                .commit_delay(Duration::from_millis(10)),
        ),
    };

    counter.number.set_value(13);
    assert_eq!(counter.number.digit_count(), 2);
    counter.number.set_value(21);

    let mut dispatches = 0;
    while counter.number.is_animating() {
        event_loop
            .dispatch(Some(Duration::from_millis(20)), &mut counter)
            .unwrap();
        dispatches += 1;
        assert!(dispatches < 5_000, "animation never settled");
    }

    assert_eq!(
        counter.number.renderer().displayed_digits(),
        vec![Some(2), Some(1)]
    );
    let last = counter.number.renderer().slot(0).copied().unwrap();
    assert_eq!(last.offset, -144.0);
    assert_eq!(last.opacity, 1.0);
}
