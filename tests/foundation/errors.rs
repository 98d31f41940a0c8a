//! Error construction and display tests

use mushlock_foundation::{Dbref, Error, ErrorContext, ErrorKind};

#[test]
fn helpers_pick_kinds() {
    assert!(matches!(
        Error::object_not_found(Dbref::new(4)).kind,
        ErrorKind::ObjectNotFound(obj) if obj == Dbref::new(4)
    ));
    assert!(matches!(
        Error::unknown_attribute("GATE").kind,
        ErrorKind::UnknownAttribute(ref name) if name == "GATE"
    ));
    assert!(matches!(
        Error::containment_cycle(Dbref::new(2), Dbref::new(3)).kind,
        ErrorKind::ContainmentCycle { .. }
    ));
}

#[test]
fn display_names_objects() {
    let err = Error::containment_cycle(Dbref::new(2), Dbref::new(3));
    assert_eq!(err.to_string(), "cannot move #2 into #3: containment cycle");
    assert_eq!(
        Error::duplicate_attribute("LOCK").to_string(),
        "duplicate attribute: LOCK"
    );
}

#[test]
fn context_attaches() {
    let context = ErrorContext::new()
        .with_operation("@lock")
        .with_actor(Dbref::new(5));
    assert_eq!(context.to_string(), "in @lock by #5");
    let err = Error::invalid_object(Dbref::new(9)).with_context(context);
    assert_eq!(err.context.map(|c| c.actor), Some(Some(Dbref::new(5))));
}
