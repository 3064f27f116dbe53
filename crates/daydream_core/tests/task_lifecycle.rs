use daydream_core::{
    EmptyState, Intent, MemoryKvStore, StoreAdapter, TaskFilter, TaskValidationError,
    TodoSession,
};

fn fresh_session() -> TodoSession<MemoryKvStore> {
    TodoSession::start(StoreAdapter::open(MemoryKvStore::new()))
}

fn reload(session: TodoSession<MemoryKvStore>) -> TodoSession<MemoryKvStore> {
    let backend = session.into_store().into_backend().unwrap();
    TodoSession::start(StoreAdapter::open(backend))
}

fn create(session: &mut TodoSession<MemoryKvStore>, title: &str, due: Option<&str>) -> String {
    session
        .dispatch(Intent::Create {
            title: title.to_string(),
            due_date: due.map(str::to_string),
        })
        .unwrap();
    session.tasks().tasks()[0].id.clone()
}

#[test]
fn create_toggle_filter_scenario() {
    let mut session = fresh_session();
    let milk = create(&mut session, "Buy milk", None);
    create(&mut session, "Call dentist", Some("2024-05-01"));

    session.dispatch(Intent::Toggle(milk)).unwrap();
    let model = session
        .dispatch(Intent::SetFilter("active".to_string()))
        .unwrap();

    assert_eq!(model.visible_titles(), vec!["Call dentist"]);
    assert_eq!(model.total_count, 2);
    assert_eq!(model.active_count, 1);
    assert!(!model.empty_state_visible);
    assert_eq!(
        model.visible_tasks[0].due_date.unwrap().to_string(),
        "2024-05-01"
    );
}

#[test]
fn clear_all_completed_scenario() {
    let mut session = fresh_session();
    let a = create(&mut session, "a", None);
    let b = create(&mut session, "b", None);
    session.dispatch(Intent::Toggle(a)).unwrap();
    session.dispatch(Intent::Toggle(b)).unwrap();

    let model = session.dispatch(Intent::ClearCompleted).unwrap();

    assert_eq!(model.total_count, 0);
    assert!(model.visible_tasks.is_empty());
    assert!(!model.clear_button_enabled);
    assert!(model.empty_state_visible);
    assert_eq!(model.empty_state, EmptyState::NoTasks);
}

#[test]
fn create_increments_count_and_prepends() {
    let mut session = fresh_session();
    create(&mut session, "older", None);
    let before = session.display_model().total_count;

    let model = session
        .dispatch(Intent::Create {
            title: "  newer  ".to_string(),
            due_date: None,
        })
        .unwrap();

    assert_eq!(model.total_count, before + 1);
    assert_eq!(model.visible_titles(), vec!["newer", "older"]);
}

#[test]
fn blank_titles_are_rejected_without_state_change() {
    let mut session = fresh_session();
    create(&mut session, "keep", None);

    for title in ["", "   "] {
        let err = session
            .dispatch(Intent::Create {
                title: title.to_string(),
                due_date: None,
            })
            .unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyTitle);
    }
    assert_eq!(session.display_model().visible_titles(), vec!["keep"]);
}

#[test]
fn delete_twice_matches_delete_once() {
    let mut session = fresh_session();
    let gone = create(&mut session, "gone", None);
    create(&mut session, "stays", None);

    let once = session.dispatch(Intent::Delete(gone.clone())).unwrap();
    let twice = session.dispatch(Intent::Delete(gone)).unwrap();
    assert_eq!(once, twice);
    assert_eq!(twice.visible_titles(), vec!["stays"]);
}

#[test]
fn active_count_ignores_filter() {
    let mut session = fresh_session();
    let done = create(&mut session, "done", None);
    create(&mut session, "open", None);
    session.dispatch(Intent::Toggle(done)).unwrap();

    for filter in ["all", "active", "completed"] {
        let model = session
            .dispatch(Intent::SetFilter(filter.to_string()))
            .unwrap();
        assert_eq!(model.active_count, 1, "filter {filter}");
    }
}

#[test]
fn completed_filter_with_no_matches_uses_no_matches_message() {
    let mut session = fresh_session();
    create(&mut session, "open", None);
    let model = session
        .dispatch(Intent::SetFilter("completed".to_string()))
        .unwrap();

    assert!(model.empty_state_visible);
    assert_eq!(model.empty_state, EmptyState::NoMatches);
    assert_eq!(model.counter_label(), "1 total · 1 active (Completed: 0 shown)");
}

#[test]
fn state_survives_reload() {
    let mut session = fresh_session();
    let milk = create(&mut session, "Buy milk", None);
    create(&mut session, "Call dentist", Some("2024-05-01"));
    session.dispatch(Intent::Toggle(milk)).unwrap();
    session
        .dispatch(Intent::SetFilter("completed".to_string()))
        .unwrap();
    let before = session.tasks().tasks().to_vec();

    let reloaded = reload(session);

    assert_eq!(reloaded.tasks().tasks(), before.as_slice());
    assert_eq!(reloaded.filter(), TaskFilter::Completed);
    assert_eq!(
        reloaded.display_model().visible_titles(),
        vec!["Buy milk"]
    );
}
