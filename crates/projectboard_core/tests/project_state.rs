use projectboard_core::{MoveOutcome, Project, ProjectState, ProjectStatus};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

type Calls = Arc<Mutex<Vec<Vec<Project>>>>;

fn record_calls(state: &ProjectState) -> Calls {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    state.subscribe(move |projects: &[Project]| {
        sink.lock().expect("calls lock").push(projects.to_vec());
    });
    calls
}

fn call_count(calls: &Calls) -> usize {
    calls.lock().expect("calls lock").len()
}

#[test]
fn add_then_move_scenario() {
    let state = ProjectState::new();
    let calls = record_calls(&state);

    let website = state
        .add_project("Website", "Build site", 3)
        .expect("add Website");
    state.add_project("App", "Build app", 2).expect("add App");

    let projects = state.projects();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].title, "Website");
    assert_eq!(projects[1].title, "App");
    assert!(projects.iter().all(|p| p.status == ProjectStatus::Active));
    {
        let calls = calls.lock().expect("calls lock");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].len(), 2);
    }

    let outcome = state
        .move_project(&website, ProjectStatus::Finished)
        .expect("move Website");
    assert_eq!(outcome, MoveOutcome::Moved);
    {
        let calls = calls.lock().expect("calls lock");
        assert_eq!(calls.len(), 3);
        let third = &calls[2];
        assert_eq!(third[0].title, "Website");
        assert_eq!(third[0].status, ProjectStatus::Finished);
        assert_eq!(third[1].title, "App");
        assert_eq!(third[1].status, ProjectStatus::Active);
    }

    let outcome = state
        .move_project("nonexistent-id", ProjectStatus::Finished)
        .expect("move miss is not an error");
    assert_eq!(outcome, MoveOutcome::NotFound);
    assert_eq!(call_count(&calls), 3);
}

#[test]
fn generated_ids_are_pairwise_distinct() {
    let state = ProjectState::new();
    for index in 0..200 {
        state
            .add_project(&format!("Project {index}"), "Some description", 1)
            .expect("add");
    }

    let ids: HashSet<String> = state
        .projects()
        .into_iter()
        .map(|project| project.id.to_string())
        .collect();
    assert_eq!(ids.len(), 200);
}

#[test]
fn add_only_appends() {
    let state = ProjectState::new();
    state.add_project("First", "First entry", 1).expect("add");
    state.add_project("Second", "Second entry", 2).expect("add");
    let before = state.projects();

    state.add_project("Third", "Third entry", 3).expect("add");
    let after = state.projects();

    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(&after[..before.len()], before.as_slice());
    assert_eq!(after[2].title, "Third");
    assert_eq!(after[2].people, 3);
}

#[test]
fn move_changes_only_status_of_one_entry() {
    let state = ProjectState::new();
    state.add_project("A", "Entry A", 1).expect("add");
    let target = state.add_project("B", "Entry B", 2).expect("add");
    state.add_project("C", "Entry C", 3).expect("add");
    let before = state.projects();

    state
        .move_project(&target, ProjectStatus::Finished)
        .expect("move");
    let after = state.projects();

    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(after.iter()) {
        assert_eq!(old.id, new.id);
        assert_eq!(old.title, new.title);
        assert_eq!(old.description, new.description);
        assert_eq!(old.people, new.people);
        if old.id == target {
            assert_eq!(new.status, ProjectStatus::Finished);
        } else {
            assert_eq!(new.status, old.status);
        }
    }
}

#[test]
fn move_miss_leaves_state_identical_and_silent() {
    let state = ProjectState::new();
    state.add_project("Only", "Single entry", 1).expect("add");
    let calls = record_calls(&state);
    let before = state.projects();

    let outcome = state
        .move_project("", ProjectStatus::Finished)
        .expect("miss");

    assert_eq!(outcome, MoveOutcome::NotFound);
    assert_eq!(state.projects(), before);
    assert_eq!(call_count(&calls), 0);
}

#[test]
fn listeners_run_in_registration_order_once_per_mutation() {
    let state = ProjectState::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    for name in ["first", "second", "third"] {
        let order = Arc::clone(&order);
        state.subscribe(move |projects: &[Project]| {
            order
                .lock()
                .expect("order lock")
                .push((name, projects.len()));
        });
    }

    state.add_project("One", "First entry", 1).expect("add");

    assert_eq!(
        *order.lock().expect("order lock"),
        vec![("first", 1), ("second", 1), ("third", 1)]
    );
}

#[test]
fn same_listener_registered_twice_runs_twice() {
    let state = ProjectState::new();
    let count = Arc::new(Mutex::new(0));
    let listener: projectboard_core::Listener<Project> = {
        let count = Arc::clone(&count);
        Arc::new(move |_: &[Project]| *count.lock().expect("count lock") += 1)
    };
    state.subscribe_shared(Arc::clone(&listener));
    state.subscribe_shared(listener);

    state.add_project("Twice", "Counted twice", 1).expect("add");

    assert_eq!(state.listener_count(), 2);
    assert_eq!(*count.lock().expect("count lock"), 2);
}

#[test]
fn panicking_listener_does_not_block_later_listeners_or_state() {
    let state = ProjectState::new();
    state.subscribe(|_: &[Project]| panic!("broken view"));
    let calls = record_calls(&state);

    let id = state.add_project("Robust", "Survives panic", 1).expect("add");
    state
        .move_project(&id, ProjectStatus::Finished)
        .expect("store stays usable after a listener panic");

    assert_eq!(call_count(&calls), 2);
    assert_eq!(
        state.project(&id).expect("project").status,
        ProjectStatus::Finished
    );
}

#[test]
fn snapshots_are_not_live_state() {
    let state = ProjectState::new();
    let id = state.add_project("Copy", "Snapshot copy", 1).expect("add");

    let mut snapshot = state.projects();
    snapshot[0].status = ProjectStatus::Finished;
    snapshot[0].title = "Mutated".to_string();

    let stored = state.project(&id).expect("project");
    assert_eq!(stored.status, ProjectStatus::Active);
    assert_eq!(stored.title, "Copy");
}

#[test]
fn concurrent_adds_are_serialized() {
    let state = Arc::new(ProjectState::new());
    let lengths = Arc::new(Mutex::new(Vec::new()));
    {
        let lengths = Arc::clone(&lengths);
        state.subscribe(move |projects: &[Project]| {
            lengths.lock().expect("lengths lock").push(projects.len());
        });
    }

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for index in 0..25 {
                    state
                        .add_project(&format!("w{worker}-{index}"), "Threaded add", 1)
                        .expect("add");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread");
    }

    assert_eq!(state.len(), 100);
    let lengths = lengths.lock().expect("lengths lock");
    assert_eq!(*lengths, (1..=100).collect::<Vec<_>>());
}
