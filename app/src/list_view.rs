//! List view controller: one page of todos plus the bookkeeping around it.
//!
//! # Design
//! `ListView` owns the only mutable UI state — the displayed page of items,
//! pagination metadata, a loading flag and a queue of pending notices. Every
//! operation is synchronous; the embedding event loop suspends at the
//! transport call and resumes with the state already settled.
//!
//! Mutations are optimistic where the outcome is locally predictable (toggle,
//! delete): the displayed state changes first, and on failure the exact
//! pre-mutation snapshot is restored — a whole-state replace, never a merge.
//! Creation is not predictable (the backend assigns id and timestamps), so
//! `add` reloads page 1 instead of splicing the item in locally.

use todo_client::{validate_title, CreateTodo, Page, Todo, TodoClient, UpdateTodo};

use crate::notice::Notice;
use crate::transport::Transport;

/// Page size used until the first reload reports one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Controller for the paginated todo list.
///
/// Generic over [`Transport`] so tests can drive it with scripted responses
/// while the real UI hands it a [`crate::transport::UreqTransport`].
pub struct ListView<T: Transport> {
    client: TodoClient,
    transport: T,
    items: Vec<Todo>,
    page: u64,
    page_size: u64,
    total: u64,
    total_page: u64,
    loading: bool,
    notices: Vec<Notice>,
}

impl<T: Transport> ListView<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
            items: Vec::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
            total_page: 0,
            loading: false,
            notices: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_page(&self) -> u64 {
        self.total_page
    }

    /// True while a reload is in flight. The embedding UI disables its
    /// controls on this flag; nothing else gates concurrent operations.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Drain the queued feedback for the UI to render.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Fetch `page` at `page_size` and replace the displayed state.
    ///
    /// On failure the previous items stay on screen and an error toast is
    /// queued; the loading flag is cleared on every path.
    pub fn reload(&mut self, page: u64, page_size: u64) {
        self.loading = true;
        match self.fetch_page(page, page_size) {
            Ok(data) => {
                self.items = data.list;
                self.page = data.page;
                self.page_size = data.page_size;
                self.total = data.total;
                self.total_page = data.total_page;
            }
            Err(message) => self.notices.push(Notice::error(message)),
        }
        self.loading = false;
    }

    /// Reload the page currently displayed.
    pub fn refresh(&mut self) {
        self.reload(self.page, self.page_size);
    }

    /// Validate and create a todo.
    ///
    /// Returns true when the item was created, so the embedding form knows to
    /// clear its draft. A validation failure queues an inline field notice
    /// and issues no request; after a successful create the view jumps to
    /// page 1, where the backend sorts the newest item.
    pub fn add(&mut self, title: &str) -> bool {
        if let Err(e) = validate_title(title) {
            self.notices.push(Notice::field("title", e.to_string()));
            return false;
        }

        let input = CreateTodo {
            title: title.to_string(),
        };
        let result = self
            .client
            .build_create_todo(&input)
            .map_err(|e| e.to_string())
            .and_then(|req| self.transport.execute(&req).map_err(|e| e.to_string()))
            .and_then(|resp| self.client.parse_create_todo(resp).map_err(|e| e.to_string()));

        match result {
            Ok(_) => {
                self.notices.push(Notice::success("Created"));
                self.reload(1, self.page_size);
                true
            }
            Err(message) => {
                self.notices.push(Notice::error(format!("Create failed: {message}")));
                false
            }
        }
    }

    /// Optimistically set the done flag of the item with `id`, then confirm
    /// with the backend. On failure the pre-toggle snapshot is restored. On
    /// success the flip is trusted — no reload.
    pub fn toggle_done(&mut self, id: u64, done: bool) {
        let snapshot = self.items.clone();
        if let Some(item) = self.items.iter_mut().find(|t| t.id == id) {
            item.done = done;
        }

        let patch = UpdateTodo {
            title: None,
            done: Some(done),
        };
        let result = self
            .client
            .build_update_todo(id, &patch)
            .map_err(|e| e.to_string())
            .and_then(|req| self.transport.execute(&req).map_err(|e| e.to_string()))
            .and_then(|resp| self.client.parse_update_todo(resp).map_err(|e| e.to_string()));

        if result.is_err() {
            self.items = snapshot;
            self.notices.push(Notice::error("Update failed"));
        }
    }

    /// Optimistically remove the item with `id`, then confirm with the
    /// backend.
    ///
    /// On success the page is reloaded to pull the next item across the page
    /// boundary; deleting the sole displayed item of a page beyond the first
    /// steps back one page instead. The sole-item check uses the count before
    /// the optimistic removal. On failure the snapshot is restored.
    pub fn delete(&mut self, id: u64) {
        let snapshot = self.items.clone();
        let count_before = self.items.len();
        self.items.retain(|t| t.id != id);

        let request = self.client.build_delete_todo(id);
        let result = self
            .transport
            .execute(&request)
            .map_err(|e| e.to_string())
            .and_then(|resp| self.client.parse_delete_todo(resp).map_err(|e| e.to_string()));

        match result {
            Ok(()) => {
                self.notices.push(Notice::success("Deleted"));
                if count_before == 1 && self.page > 1 {
                    self.reload(self.page - 1, self.page_size);
                } else {
                    self.reload(self.page, self.page_size);
                }
            }
            Err(_) => {
                self.items = snapshot;
                self.notices.push(Notice::error("Delete failed"));
            }
        }
    }

    fn fetch_page(&self, page: u64, page_size: u64) -> Result<Page, String> {
        let request = self.client.build_list_todos(page, page_size);
        let response = self
            .transport
            .execute(&request)
            .map_err(|e| format!("Load failed: {e}"))?;
        self.client
            .parse_list_todos(response)
            .map_err(|e| format!("Load failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use todo_client::{HttpRequest, HttpResponse};

    use super::*;
    use crate::notice::Level;
    use crate::transport::TransportError;

    /// Transport that replays a fixed script of responses and records every
    /// request it was asked to execute.
    struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn request_paths(&self) -> Vec<String> {
            self.requests.borrow().iter().map(|r| r.path.clone()).collect()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("transport called more often than scripted")
        }
    }

    fn ok(status: u16, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn down() -> Result<HttpResponse, TransportError> {
        Err(TransportError::new("connection refused"))
    }

    fn no_content() -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        })
    }

    fn todo_json(id: u64, title: &str, done: bool) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": title,
            "done": done,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z",
        })
    }

    fn page_json(
        list: Vec<serde_json::Value>,
        page: u64,
        page_size: u64,
        total: u64,
    ) -> serde_json::Value {
        serde_json::json!({
            "list": list,
            "page": page,
            "page_size": page_size,
            "total": total,
            "total_page": total.div_ceil(page_size),
        })
    }

    fn view(script: Vec<Result<HttpResponse, TransportError>>) -> ListView<ScriptedTransport> {
        ListView::new("http://test/api", ScriptedTransport::new(script))
    }

    fn errors(view: &mut ListView<ScriptedTransport>) -> Vec<Notice> {
        view.take_notices().into_iter().filter(Notice::is_error).collect()
    }

    #[test]
    fn reload_replaces_displayed_state() {
        let mut view = view(vec![ok(
            200,
            page_json(vec![todo_json(2, "b", false), todo_json(1, "a", true)], 1, 10, 2),
        )]);

        view.reload(1, 10);

        assert_eq!(view.items().len(), 2);
        assert_eq!(view.page(), 1);
        assert_eq!(view.page_size(), 10);
        assert_eq!(view.total(), 2);
        assert_eq!(view.total_page(), 1);
        assert!(!view.is_loading());
        assert!(view.take_notices().is_empty());
    }

    #[test]
    fn reload_failure_keeps_prior_items() {
        let mut view = view(vec![
            ok(200, page_json(vec![todo_json(1, "a", false)], 1, 10, 1)),
            down(),
        ]);

        view.reload(1, 10);
        view.reload(2, 10);

        assert_eq!(view.items().len(), 1);
        assert_eq!(view.page(), 1);
        assert!(!view.is_loading());
        let errors = errors(&mut view);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            Notice::Toast { level: Level::Error, message } if message.starts_with("Load failed")
        ));
    }

    #[test]
    fn add_empty_title_issues_no_request() {
        let mut view = view(Vec::new());

        assert!(!view.add(""));

        assert!(view.transport.request_paths().is_empty());
        let notices = view.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(matches!(&notices[0], Notice::Field { field: "title", .. }));
    }

    #[test]
    fn add_overlong_title_issues_no_request() {
        let mut view = view(Vec::new());

        assert!(!view.add(&"x".repeat(201)));

        assert!(view.transport.request_paths().is_empty());
        assert!(matches!(&view.take_notices()[0], Notice::Field { field: "title", .. }));
    }

    #[test]
    fn add_reloads_first_page_on_success() {
        let mut view = view(vec![
            ok(201, todo_json(1, "Buy milk", false)),
            ok(200, page_json(vec![todo_json(1, "Buy milk", false)], 1, 10, 1)),
        ]);

        assert!(view.add("Buy milk"));

        let paths = view.transport.request_paths();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("/todos"));
        assert!(paths[1].ends_with("/todos?page=1&page_size=10"));
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.items()[0].title, "Buy milk");
        assert!(view
            .take_notices()
            .contains(&Notice::success("Created")));
    }

    #[test]
    fn add_transport_failure_skips_reload() {
        let mut view = view(vec![down()]);

        assert!(!view.add("Buy milk"));

        assert_eq!(view.transport.request_paths().len(), 1);
        let errors = errors(&mut view);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            Notice::Toast { message, .. } if message.starts_with("Create failed")
        ));
    }

    #[test]
    fn add_server_rejection_is_a_failure() {
        let mut view = view(vec![ok(400, serde_json::json!({"error": "invalid payload"}))]);

        assert!(!view.add("Buy milk"));

        assert_eq!(errors(&mut view).len(), 1);
    }

    #[test]
    fn toggle_done_flips_immediately_without_reload() {
        let mut view = view(vec![
            ok(200, page_json(vec![todo_json(1, "a", false)], 1, 10, 1)),
            ok(200, todo_json(1, "a", true)),
        ]);
        view.reload(1, 10);

        view.toggle_done(1, true);

        assert!(view.items()[0].done);
        let requests = view.transport.requests.borrow();
        assert_eq!(requests.len(), 2);
        let body: serde_json::Value =
            serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"done": true}));
        drop(requests);
        assert!(view.take_notices().is_empty());
    }

    #[test]
    fn toggle_done_failure_restores_snapshot() {
        let mut view = view(vec![
            ok(200, page_json(vec![todo_json(1, "a", false)], 1, 10, 1)),
            down(),
        ]);
        view.reload(1, 10);

        view.toggle_done(1, true);

        assert!(!view.items()[0].done);
        assert_eq!(view.take_notices(), vec![Notice::error("Update failed")]);
    }

    #[test]
    fn toggle_done_server_rejection_restores_snapshot() {
        let mut view = view(vec![
            ok(200, page_json(vec![todo_json(1, "a", false)], 1, 10, 1)),
            ok(404, serde_json::json!({"error": "not found"})),
        ]);
        view.reload(1, 10);

        view.toggle_done(1, true);

        assert!(!view.items()[0].done);
        assert_eq!(view.take_notices(), vec![Notice::error("Update failed")]);
    }

    #[test]
    fn delete_removes_and_reloads_current_page() {
        let mut view = view(vec![
            ok(
                200,
                page_json(vec![todo_json(2, "b", false), todo_json(1, "a", false)], 1, 10, 2),
            ),
            no_content(),
            ok(200, page_json(vec![todo_json(1, "a", false)], 1, 10, 1)),
        ]);
        view.reload(1, 10);

        view.delete(2);

        assert_eq!(view.items().len(), 1);
        assert_eq!(view.items()[0].id, 1);
        let paths = view.transport.request_paths();
        assert!(paths[2].ends_with("/todos?page=1&page_size=10"));
        assert!(view.take_notices().contains(&Notice::success("Deleted")));
    }

    #[test]
    fn delete_sole_item_on_later_page_steps_back() {
        let mut view = view(vec![
            ok(200, page_json(vec![todo_json(11, "last", false)], 2, 10, 11)),
            no_content(),
            ok(
                200,
                page_json((1..=10).map(|i| todo_json(i, "t", false)).collect(), 1, 10, 10),
            ),
        ]);
        view.reload(2, 10);

        view.delete(11);

        assert_eq!(view.page(), 1);
        assert_eq!(view.items().len(), 10);
        assert_eq!(view.total(), 10);
        let paths = view.transport.request_paths();
        assert!(paths[2].ends_with("/todos?page=1&page_size=10"));
    }

    #[test]
    fn delete_failure_restores_snapshot() {
        let mut view = view(vec![
            ok(
                200,
                page_json(vec![todo_json(2, "b", false), todo_json(1, "a", false)], 1, 10, 2),
            ),
            down(),
        ]);
        view.reload(1, 10);

        view.delete(2);

        assert_eq!(view.items().len(), 2);
        assert_eq!(view.items()[0].id, 2);
        assert_eq!(view.take_notices(), vec![Notice::error("Delete failed")]);
    }

    #[test]
    fn delete_server_rejection_restores_snapshot() {
        let mut view = view(vec![
            ok(200, page_json(vec![todo_json(1, "a", false)], 1, 10, 1)),
            ok(404, serde_json::json!({"error": "not found"})),
        ]);
        view.reload(1, 10);

        view.delete(1);

        assert_eq!(view.items().len(), 1);
        assert_eq!(view.take_notices(), vec![Notice::error("Delete failed")]);
    }

    #[test]
    fn delete_reload_failure_leaves_optimistic_removal() {
        let mut view = view(vec![
            ok(
                200,
                page_json(vec![todo_json(2, "b", false), todo_json(1, "a", false)], 1, 10, 2),
            ),
            no_content(),
            down(),
        ]);
        view.reload(1, 10);

        view.delete(2);

        // The delete itself succeeded; the follow-up reload failing leaves
        // the optimistically filtered list on screen.
        assert_eq!(view.items().len(), 1);
        let notices = view.take_notices();
        assert!(notices.contains(&Notice::success("Deleted")));
        assert!(notices.iter().any(|n| n.is_error()));
    }

    #[test]
    fn refresh_reloads_current_page() {
        let mut view = view(vec![
            ok(200, page_json(vec![todo_json(3, "c", false)], 2, 5, 7)),
            ok(200, page_json(vec![todo_json(3, "c", false)], 2, 5, 7)),
        ]);
        view.reload(2, 5);

        view.refresh();

        let paths = view.transport.request_paths();
        assert!(paths[1].ends_with("/todos?page=2&page_size=5"));
    }
}
