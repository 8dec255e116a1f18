use formdom::{Event, EventKind};

#[test]
fn test_event_names_round_trip() {
    for kind in EventKind::FIELD_EVENTS {
        assert_eq!(EventKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(EventKind::from_name("submit"), Some(EventKind::Submit));
    assert_eq!(EventKind::from_name("click"), None);
}

#[test]
fn test_prevent_default_and_stop_propagation() {
    let mut event = Event::submit("form-1");
    assert!(!event.is_default_prevented());
    assert!(!event.is_propagation_stopped());

    event.prevent_default();
    event.stop_immediate_propagation();

    assert!(event.is_default_prevented());
    assert!(event.is_propagation_stopped());
}

#[test]
fn test_constructors_set_kind_and_target() {
    assert_eq!(Event::blur("a").kind, EventKind::Blur);
    assert_eq!(Event::key_up("a").kind, EventKind::KeyUp);
    assert_eq!(Event::key_down("a").kind, EventKind::KeyDown);
    assert_eq!(Event::change("a").target, "a");
}
