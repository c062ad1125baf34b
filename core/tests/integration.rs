//! Store lifecycle tests against the live mock CMS.
//!
//! # Design
//! Starts `mock-cms` on a random port and plays the host for `TodoStore`:
//! every `Pending` the store hands out is executed over real HTTP with
//! ureq and completed via `finish`. Covers both reconciliation disciplines
//! end-to-end, plus a rollback against a server that is not there at all.

use todo_store::{
    ApiError, EditState, HttpMethod, HttpRequest, HttpResponse, ReconcileMode, Severity, TodoStore,
};

/// Execute an `HttpRequest` using ureq, reporting transport failures the
/// way a UI shell would: as `ApiError::Network`.
///
/// Disables ureq's status-code-as-error behavior so 4xx/5xx responses are
/// returned as data and status interpretation stays in the core.
fn execute(req: &HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    };

    let mut response = result.map_err(|e| ApiError::Network(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

/// Run one store operation's round-trip: execute the request, feed the
/// outcome back.
fn round_trip(store: &mut TodoStore, pending: todo_store::Pending) {
    let outcome = execute(&pending.request);
    store.finish(pending, outcome);
}

/// Start the mock CMS on a random port and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_cms::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn manual_store_lifecycle() {
    let base_url = start_server();
    let mut store = TodoStore::new(&base_url, ReconcileMode::Manual);

    // initial load — empty
    let pending = store.load();
    round_trip(&mut store, pending);
    assert!(store.todos().is_empty());

    // create waits for the server, then appends with the server id
    let pending = store.create("  Walk the dog  ").unwrap();
    assert!(store.todos().is_empty(), "nothing local before confirmation");
    round_trip(&mut store, pending);
    assert_eq!(store.todos().len(), 1);
    assert_eq!(store.todos()[0].task, "Walk the dog");
    let id = store.todos()[0].id;

    // round-trip: a fresh load still contains the created task
    let pending = store.load();
    round_trip(&mut store, pending);
    assert_eq!(store.todos().len(), 1);
    assert_eq!(store.todos()[0].task, "Walk the dog");

    // edit through the session
    store.begin_edit(id);
    store.set_draft("Walk the cat");
    let pending = store.save_edit().unwrap();
    assert_eq!(store.todos()[0].task, "Walk the dog", "unchanged until confirmed");
    round_trip(&mut store, pending);
    assert_eq!(store.todos()[0].task, "Walk the cat");
    assert_eq!(*store.edit_state(), EditState::Idle);

    // toggle applies the server-confirmed flag
    let pending = store.toggle_complete(id).unwrap();
    assert!(!store.todos()[0].complete);
    round_trip(&mut store, pending);
    assert!(store.todos()[0].complete);

    // remove by the id in the server's deleted record
    let pending = store.remove(id);
    round_trip(&mut store, pending);
    assert!(store.todos().is_empty());

    // removing it again 404s; the list is untouched, an error notice lands
    store.drain_notices();
    let pending = store.remove(id);
    round_trip(&mut store, pending);
    assert!(store.todos().is_empty());
    let notices = store.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
}

#[test]
fn instant_store_lifecycle() {
    let base_url = start_server();
    let mut store = TodoStore::new(&base_url, ReconcileMode::Instant);

    let pending = store.load();
    round_trip(&mut store, pending);
    assert!(store.todos().is_empty());

    // optimistic create shows up immediately, newest first
    let pending = store.create("first").unwrap();
    assert_eq!(store.todos()[0].task, "first");
    round_trip(&mut store, pending);

    let pending = store.create("second").unwrap();
    round_trip(&mut store, pending);

    let tasks: Vec<&str> = store.todos().iter().map(|t| t.task.as_str()).collect();
    assert_eq!(tasks, vec!["second", "first"]);

    // server ids were adopted: a reload yields the same list
    let local = store.todos().to_vec();
    let pending = store.load();
    round_trip(&mut store, pending);
    assert_eq!(store.todos(), local.as_slice());

    // optimistic toggle and update survive their round-trips
    let id = store.todos()[0].id;
    let pending = store.toggle_complete(id).unwrap();
    assert!(store.todos()[0].complete);
    round_trip(&mut store, pending);
    assert!(store.todos()[0].complete);

    let pending = store.update(id, "second, revised").unwrap();
    round_trip(&mut store, pending);
    assert_eq!(store.todos()[0].task, "second, revised");

    // optimistic remove
    let pending = store.remove(id);
    assert_eq!(store.todos().len(), 1);
    round_trip(&mut store, pending);
    let pending = store.load();
    round_trip(&mut store, pending);
    assert_eq!(store.todos().len(), 1);
    assert_eq!(store.todos()[0].task, "first");

    // every instant operation produced loading/success notices
    let notices = store.drain_notices();
    assert!(notices.iter().any(|n| n.severity == Severity::Loading));
    assert!(notices.iter().any(|n| n.severity == Severity::Success));
    assert!(notices.iter().all(|n| n.severity != Severity::Error));
}

#[test]
fn instant_rollback_when_server_is_unreachable() {
    // A port nothing listens on: the transport layer fails, the host
    // reports `Network`, and the store restores its snapshot.
    let dead = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", dead.local_addr().unwrap());
    drop(dead);

    let mut store = TodoStore::new(&base_url, ReconcileMode::Instant);
    let pending = store.create("doomed").unwrap();
    assert_eq!(store.todos().len(), 1);
    round_trip(&mut store, pending);
    assert!(store.todos().is_empty(), "optimistic insert rolled back");
    let notices = store.drain_notices();
    assert_eq!(notices.last().map(|n| n.severity), Some(Severity::Error));
}
